use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

const ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month number, guaranteed to lie in `1..=12`.
///
/// # Examples
///
/// ```
/// use windrose_rs::MonthOfYear;
///
/// let march = MonthOfYear::new(3).unwrap();
/// assert_eq!(march.abbreviation(), "Mar");
/// assert!(MonthOfYear::new(13).is_none());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MonthOfYear(u32);

impl MonthOfYear {
    pub fn new(month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Three-letter English abbreviation, also used as the chart file stem.
    pub fn abbreviation(self) -> &'static str {
        ABBREVIATIONS[(self.0 - 1) as usize]
    }

    /// January through December, in order.
    pub fn all() -> impl Iterator<Item = MonthOfYear> {
        (1..=12).map(MonthOfYear)
    }
}

impl TryFrom<u32> for MonthOfYear {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ConfigError::InvalidMonth(value))
    }
}

impl From<MonthOfYear> for u32 {
    fn from(month: MonthOfYear) -> Self {
        month.0
    }
}

impl Display for MonthOfYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviations_cover_the_year() {
        let labels: Vec<&str> = MonthOfYear::all().map(MonthOfYear::abbreviation).collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels.first(), Some(&"Jan"));
        assert_eq!(labels.last(), Some(&"Dec"));
    }

    #[test]
    fn out_of_range_months_are_rejected() {
        assert!(MonthOfYear::new(0).is_none());
        assert!(matches!(
            MonthOfYear::try_from(13),
            Err(ConfigError::InvalidMonth(13))
        ));
    }

    #[test]
    fn deserializes_from_plain_numbers() -> Result<(), serde_json::Error> {
        let months: Vec<MonthOfYear> = serde_json::from_str("[12, 1, 2]")?;
        assert_eq!(months.iter().map(|m| m.get()).collect::<Vec<_>>(), vec![12, 1, 2]);
        assert!(serde_json::from_str::<MonthOfYear>("0").is_err());
        Ok(())
    }
}
