//! Binning of (direction, speed) pairs into a windrose table.

use crate::types::observation::Observation;
use crate::types::speed_bins::SpeedBins;

/// Counts or percentages of observations per direction sector and speed bin.
///
/// Sector `i` is centered on `i * 360 / sectors` degrees (0 = North,
/// clockwise) and spans half a sector width to either side. Values are laid
/// out per speed bin, so `value(bin, sector)` is one stacked bar segment.
#[derive(Debug, Clone, PartialEq)]
pub struct WindroseHistogram {
    sectors: usize,
    bins: SpeedBins,
    /// `table[bin][sector]`
    table: Vec<Vec<f64>>,
    counted: usize,
    total: usize,
    normalized: bool,
}

impl WindroseHistogram {
    /// Bins `(direction, speed)` pairs.
    ///
    /// When `normalize` is set each cell holds the percentage of counted
    /// observations; otherwise raw counts. Pairs whose speed falls in no bin
    /// are ignored, and a histogram without counted pairs is all zeros.
    pub fn compute<I>(pairs: I, bins: &SpeedBins, sectors: usize, normalize: bool) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let sectors = sectors.max(1);
        let mut table = vec![vec![0.0; sectors]; bins.len()];
        let mut counted = 0;
        let mut total = 0;

        for (direction, speed) in pairs {
            total += 1;
            if !direction.is_finite() {
                continue;
            }
            if let Some(bin) = bins.bin_of(speed) {
                table[bin][sector_of(direction, sectors)] += 1.0;
                counted += 1;
            }
        }

        if normalize && counted > 0 {
            let scale = 100.0 / counted as f64;
            table
                .iter_mut()
                .flat_map(|row| row.iter_mut())
                .for_each(|cell| *cell *= scale);
        }

        Self {
            sectors,
            bins: bins.clone(),
            table,
            counted,
            total,
            normalized: normalize,
        }
    }

    pub fn from_observations(
        observations: &[Observation],
        bins: &SpeedBins,
        sectors: usize,
        normalize: bool,
    ) -> Self {
        Self::compute(
            observations.iter().map(|o| (o.direction, o.speed)),
            bins,
            sectors,
            normalize,
        )
    }

    pub fn sectors(&self) -> usize {
        self.sectors
    }

    pub fn bins(&self) -> &SpeedBins {
        &self.bins
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Observations that landed in a cell.
    pub fn counted(&self) -> usize {
        self.counted
    }

    /// Observations offered, including ones outside every speed bin.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.counted == 0
    }

    /// Sector width in degrees.
    pub fn sector_width(&self) -> f64 {
        360.0 / self.sectors as f64
    }

    /// Compass bearing of a sector's center line.
    pub fn sector_center(&self, sector: usize) -> f64 {
        sector as f64 * self.sector_width()
    }

    pub fn value(&self, bin: usize, sector: usize) -> f64 {
        self.table
            .get(bin)
            .and_then(|row| row.get(sector))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum over all speed bins of one sector, i.e. the full bar height.
    pub fn sector_total(&self, sector: usize) -> f64 {
        self.table.iter().map(|row| row[sector]).sum()
    }

    /// Sum over all sectors for each speed bin.
    pub fn bin_totals(&self) -> Vec<f64> {
        self.table.iter().map(|row| row.iter().sum()).collect()
    }

    /// Height of the tallest stacked bar.
    pub fn max_sector_total(&self) -> f64 {
        (0..self.sectors)
            .map(|sector| self.sector_total(sector))
            .fold(0.0, f64::max)
    }

    /// `(bottom, top)` of each stacked segment of a sector's bar, in bin order.
    pub fn stacked(&self, sector: usize) -> Vec<(f64, f64)> {
        let mut bottom = 0.0;
        self.table
            .iter()
            .map(|row| {
                let top = bottom + row[sector];
                let segment = (bottom, top);
                bottom = top;
                segment
            })
            .collect()
    }
}

/// Index of the sector containing `direction` degrees.
///
/// Directions are wrapped into `[0, 360)` first, so 360 and -22.5 are valid.
/// Zero sectors is treated as a single sector covering the whole compass.
pub fn sector_of(direction: f64, sectors: usize) -> usize {
    let sectors = sectors.max(1);
    let width = 360.0 / sectors as f64;
    let shifted = (direction + width / 2.0).rem_euclid(360.0);
    ((shifted / width).floor() as usize) % sectors
}
