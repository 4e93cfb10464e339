//! Seasons as fixed groups of calendar months.

use crate::config::ConfigError;
use crate::types::month::MonthOfYear;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named group of calendar months, e.g. `DJF = {12, 1, 2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Short code used for the chart title and file name.
    pub code: String,
    pub months: Vec<MonthOfYear>,
}

impl Season {
    pub fn new(code: impl Into<String>, months: &[u32]) -> Result<Self, ConfigError> {
        let months = months
            .iter()
            .map(|&m| MonthOfYear::try_from(m))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            code: code.into(),
            months,
        })
    }
}

/// Ordered mapping of season codes to their months.
///
/// Seasons are rendered in the order they appear here. A valid map assigns
/// every calendar month to exactly one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonMap(Vec<Season>);

impl SeasonMap {
    pub fn new(seasons: Vec<Season>) -> Result<Self, ConfigError> {
        let map = Self(seasons);
        map.validate()?;
        Ok(map)
    }

    /// The meteorological seasons DJF, MAM, JJA and SON.
    pub fn meteorological() -> Self {
        let season = |code: &str, months: [u32; 3]| Season {
            code: code.to_string(),
            months: months.into_iter().filter_map(MonthOfYear::new).collect(),
        };
        Self(vec![
            season("DJF", [12, 1, 2]),
            season("MAM", [3, 4, 5]),
            season("JJA", [6, 7, 8]),
            season("SON", [9, 10, 11]),
        ])
    }

    pub fn seasons(&self) -> &[Season] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Season> {
        self.0.iter()
    }

    /// Checks that codes are unique and non-empty and that the seasons
    /// partition the twelve months.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::InvalidSeasons("no seasons defined".into()));
        }

        let mut codes = HashSet::new();
        let mut seen = HashSet::new();
        for season in &self.0 {
            if season.code.trim().is_empty() {
                return Err(ConfigError::InvalidSeasons("season code is empty".into()));
            }
            if !codes.insert(season.code.as_str()) {
                return Err(ConfigError::InvalidSeasons(format!(
                    "season code '{}' is used more than once",
                    season.code
                )));
            }
            for month in &season.months {
                if !seen.insert(*month) {
                    return Err(ConfigError::InvalidSeasons(format!(
                        "{} is assigned to more than one season",
                        month
                    )));
                }
            }
        }

        let missing: Vec<String> = MonthOfYear::all()
            .filter(|m| !seen.contains(m))
            .map(|m| m.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::InvalidSeasons(format!(
                "months without a season: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for SeasonMap {
    fn default() -> Self {
        Self::meteorological()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meteorological_seasons_partition_the_year() {
        let seasons = SeasonMap::meteorological();
        assert!(seasons.validate().is_ok());
        for month in MonthOfYear::all() {
            let owners = seasons.iter().filter(|s| s.months.contains(&month)).count();
            assert_eq!(owners, 1, "{} should belong to exactly one season", month);
        }
        let december = MonthOfYear::new(12).unwrap();
        assert!(seasons.seasons()[0].months.contains(&december));
    }

    #[test]
    fn overlapping_seasons_are_rejected() -> Result<(), ConfigError> {
        let result = SeasonMap::new(vec![
            Season::new("A", &[1, 2, 3, 4, 5, 6])?,
            Season::new("B", &[6, 7, 8, 9, 10, 11, 12])?,
        ]);
        assert!(matches!(result, Err(ConfigError::InvalidSeasons(msg)) if msg.contains("Jun")));
        Ok(())
    }

    #[test]
    fn incomplete_seasons_are_rejected() -> Result<(), ConfigError> {
        let result = SeasonMap::new(vec![Season::new("WINTER", &[12, 1, 2])?]);
        assert!(matches!(result, Err(ConfigError::InvalidSeasons(msg)) if msg.contains("Mar")));
        Ok(())
    }

    #[test]
    fn duplicate_codes_are_rejected() -> Result<(), ConfigError> {
        let result = SeasonMap::new(vec![
            Season::new("X", &[1, 2, 3, 4, 5, 6])?,
            Season::new("X", &[7, 8, 9, 10, 11, 12])?,
        ]);
        assert!(matches!(result, Err(ConfigError::InvalidSeasons(_))));
        Ok(())
    }

    #[test]
    fn season_map_reads_from_json_in_order() -> Result<(), serde_json::Error> {
        let json = r#"[
            {"code": "WET", "months": [10, 11, 12, 1, 2, 3]},
            {"code": "DRY", "months": [4, 5, 6, 7, 8, 9]}
        ]"#;
        let map: SeasonMap = serde_json::from_str(json)?;
        let codes: Vec<&str> = map.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["WET", "DRY"]);
        assert!(map.validate().is_ok());
        Ok(())
    }
}
