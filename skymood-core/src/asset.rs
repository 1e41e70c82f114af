//! Background clip selection from the current condition and time of day.

use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionFamily {
    Clear,
    Clouds,
    Rain,
    Snow,
}

impl ConditionFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionFamily::Clear => "clear",
            ConditionFamily::Clouds => "clouds",
            ConditionFamily::Rain => "rain",
            ConditionFamily::Snow => "snow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundAsset {
    ClearNight,
    ClearDay,
    RainNight,
    RainDay,
    SnowNight,
    SnowDay,
}

impl BackgroundAsset {
    pub fn id(&self) -> &'static str {
        match self {
            BackgroundAsset::ClearNight => "clear",
            BackgroundAsset::ClearDay => "day_clouds",
            BackgroundAsset::RainNight => "rain_night",
            BackgroundAsset::RainDay => "day_rain",
            BackgroundAsset::SnowNight => "snow_night",
            BackgroundAsset::SnowDay => "snow",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.mp4", self.id())
    }

    /// Clip used for labels outside every known family.
    pub const fn fallback(is_night: bool) -> Self {
        if is_night {
            BackgroundAsset::ClearNight
        } else {
            BackgroundAsset::ClearDay
        }
    }

    pub const fn all() -> &'static [BackgroundAsset] {
        &[
            BackgroundAsset::ClearNight,
            BackgroundAsset::ClearDay,
            BackgroundAsset::RainNight,
            BackgroundAsset::RainDay,
            BackgroundAsset::SnowNight,
            BackgroundAsset::SnowDay,
        ]
    }
}

impl std::fmt::Display for BackgroundAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

const FAMILIES: &[(ConditionFamily, &[&str])] = &[
    (ConditionFamily::Clear, &["clear"]),
    (
        ConditionFamily::Rain,
        &[
            "rain",
            "light rain",
            "moderate rain",
            "heavy intensity rain",
            "very heavy rain",
            "extreme rain",
            "freezing rain",
            "light intensity shower rain",
            "shower rain",
            "heavy intensity shower rain",
            "ragged shower rain",
        ],
    ),
    (
        ConditionFamily::Snow,
        &[
            "snow",
            "heavy snow",
            "sleet",
            "light shower sleet",
            "shower sleet",
            "light rain and snow",
            "rain and snow",
            "light shower snow",
            "shower snow",
            "heavy shower snow",
        ],
    ),
    (
        ConditionFamily::Clouds,
        &[
            "clouds",
            "few clouds",
            "scattered clouds",
            "broken clouds",
            "overcast clouds",
        ],
    ),
];

// Clouds share the clear clip in both periods.
const DAY_ASSETS: &[(ConditionFamily, BackgroundAsset)] = &[
    (ConditionFamily::Clear, BackgroundAsset::ClearDay),
    (ConditionFamily::Clouds, BackgroundAsset::ClearDay),
    (ConditionFamily::Rain, BackgroundAsset::RainDay),
    (ConditionFamily::Snow, BackgroundAsset::SnowDay),
];

const NIGHT_ASSETS: &[(ConditionFamily, BackgroundAsset)] = &[
    (ConditionFamily::Clear, BackgroundAsset::ClearNight),
    (ConditionFamily::Clouds, BackgroundAsset::ClearNight),
    (ConditionFamily::Rain, BackgroundAsset::RainNight),
    (ConditionFamily::Snow, BackgroundAsset::SnowNight),
];

static FAMILY_BY_LABEL: LazyLock<HashMap<&'static str, ConditionFamily>> = LazyLock::new(|| {
    FAMILIES
        .iter()
        .flat_map(|(family, labels)| labels.iter().map(move |label| (*label, *family)))
        .collect()
});

static DAY_TABLE: LazyLock<HashMap<&'static str, BackgroundAsset>> =
    LazyLock::new(|| build_table(DAY_ASSETS));

static NIGHT_TABLE: LazyLock<HashMap<&'static str, BackgroundAsset>> =
    LazyLock::new(|| build_table(NIGHT_ASSETS));

fn build_table(
    assets: &[(ConditionFamily, BackgroundAsset)],
) -> HashMap<&'static str, BackgroundAsset> {
    FAMILY_BY_LABEL
        .iter()
        .filter_map(|(label, family)| {
            assets
                .iter()
                .find_map(|(candidate, asset)| (candidate == family).then_some((*label, *asset)))
        })
        .collect()
}

/// Lowercases and trims a condition label for table lookup.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

pub fn condition_family(label: &str) -> Option<ConditionFamily> {
    FAMILY_BY_LABEL.get(normalize_label(label).as_str()).copied()
}

/// Picks the background clip for a condition label.
///
/// Matching is case-insensitive. Unknown labels resolve to
/// [`BackgroundAsset::fallback`] for the period.
pub fn select_background_asset(label: &str, is_night: bool) -> BackgroundAsset {
    let table = if is_night { &NIGHT_TABLE } else { &DAY_TABLE };
    let key = normalize_label(label);

    match table.get(key.as_str()) {
        Some(asset) => *asset,
        None => {
            tracing::debug!(label, is_night, "no background mapping, using fallback");
            BackgroundAsset::fallback(is_night)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalised_rain_by_day() {
        assert_eq!(select_background_asset("Rain", false), BackgroundAsset::RainDay);
    }

    #[test]
    fn rain_by_night() {
        assert_eq!(select_background_asset("rain", true), BackgroundAsset::RainNight);
    }

    #[test]
    fn every_rain_label_maps_to_rain_clip() {
        let (_, labels) = FAMILIES[1];
        for label in labels {
            assert_eq!(select_background_asset(label, false), BackgroundAsset::RainDay);
            assert_eq!(select_background_asset(label, true), BackgroundAsset::RainNight);
        }
    }

    #[test]
    fn snow_family_including_mixed_precipitation() {
        for label in ["Snow", "Sleet", "Light Rain and Snow", "HEAVY SHOWER SNOW"] {
            assert_eq!(select_background_asset(label, false), BackgroundAsset::SnowDay);
            assert_eq!(select_background_asset(label, true), BackgroundAsset::SnowNight);
        }
    }

    #[test]
    fn clouds_fold_into_clear() {
        for label in ["Clouds", "broken clouds", "\tovercast clouds"] {
            assert_eq!(select_background_asset(label, false), BackgroundAsset::ClearDay);
            assert_eq!(select_background_asset(label, true), BackgroundAsset::ClearNight);
        }
    }

    #[test]
    fn padded_label_still_matches() {
        assert_eq!(
            select_background_asset(" Light Intensity Shower Rain", true),
            BackgroundAsset::RainNight
        );
    }

    #[test]
    fn unknown_label_falls_back() {
        assert_eq!(select_background_asset("Thunderstorm", false), BackgroundAsset::ClearDay);
        assert_eq!(select_background_asset("", true), BackgroundAsset::ClearNight);
    }

    #[test]
    fn family_lookup() {
        assert_eq!(condition_family("Clear"), Some(ConditionFamily::Clear));
        assert_eq!(condition_family("few clouds"), Some(ConditionFamily::Clouds));
        assert_eq!(condition_family("Mist"), None);
    }

    #[test]
    fn file_names_are_distinct() {
        let mut names: Vec<_> = BackgroundAsset::all().iter().map(|a| a.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), BackgroundAsset::all().len());
        assert_eq!(BackgroundAsset::ClearDay.file_name(), "day_clouds.mp4");
    }
}
