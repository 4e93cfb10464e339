use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Ascending wind-speed thresholds that split observations into stacked bins.
///
/// With edges `[0, 2, 4, 6]` the bins are `[0, 2)`, `[2, 4)`, `[4, 6)` and
/// the open-ended `[6, inf)`. Speeds below the first edge fall in no bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct SpeedBins {
    edges: Vec<f64>,
}

impl SpeedBins {
    pub fn new(edges: Vec<f64>) -> Result<Self, ConfigError> {
        if edges.is_empty() {
            return Err(ConfigError::InvalidBinEdges(
                "at least one edge is required".into(),
            ));
        }
        if let Some(bad) = edges.iter().find(|e| !e.is_finite()) {
            return Err(ConfigError::InvalidBinEdges(format!(
                "edge {} is not a finite number",
                bad
            )));
        }
        if let Some(pair) = edges.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidBinEdges(format!(
                "edges must be strictly ascending, found {} before {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { edges })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins, including the open-ended last one.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Index of the bin holding `speed`, if any.
    pub fn bin_of(&self, speed: f64) -> Option<usize> {
        if !speed.is_finite() || speed < self.edges[0] {
            return None;
        }
        // Number of edges <= speed, minus one, is the bin index.
        let position = self.edges.partition_point(|edge| *edge <= speed);
        Some(position - 1)
    }

    /// Lower and upper bound of a bin; the last bin's upper bound is infinite.
    pub fn bounds(&self, bin: usize) -> Option<(f64, f64)> {
        let lower = *self.edges.get(bin)?;
        let upper = self.edges.get(bin + 1).copied().unwrap_or(f64::INFINITY);
        Some((lower, upper))
    }

    /// Legend labels such as `[0.0 : 2.0)` and `[6.0 : inf)`.
    pub fn labels(&self) -> Vec<String> {
        (0..self.len())
            .filter_map(|bin| self.bounds(bin))
            .map(|(lower, upper)| {
                if upper.is_infinite() {
                    format!("[{:.1} : inf)", lower)
                } else {
                    format!("[{:.1} : {:.1})", lower, upper)
                }
            })
            .collect()
    }
}

impl Default for SpeedBins {
    fn default() -> Self {
        Self {
            edges: vec![0.0, 2.0, 4.0, 6.0],
        }
    }
}

impl TryFrom<Vec<f64>> for SpeedBins {
    type Error = ConfigError;

    fn try_from(edges: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(edges)
    }
}

impl From<SpeedBins> for Vec<f64> {
    fn from(bins: SpeedBins) -> Self {
        bins.edges
    }
}
