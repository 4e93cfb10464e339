use crate::types::month::MonthOfYear;
use crate::types::season::Season;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A subset of the filtered observations that gets its own chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bucket {
    Month(MonthOfYear),
    Season(Season),
}

impl Bucket {
    /// Human-readable label, used as the chart file stem (`Jan`, `DJF`, ...).
    pub fn label(&self) -> &str {
        match self {
            Bucket::Month(month) => month.abbreviation(),
            Bucket::Season(season) => &season.code,
        }
    }

    /// Output file name for the rendered chart.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.label())
    }

    /// Fills `{label}` in a title template.
    pub fn title(&self, template: &str) -> String {
        template.replace("{label}", self.label())
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Month(month) => write!(f, "month {}", month),
            Bucket::Season(season) => write!(f, "season {}", season.code),
        }
    }
}
