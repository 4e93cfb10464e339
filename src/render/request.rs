use crate::config::{EmptyBucketPolicy, DEFAULT_SECTORS};
use crate::histogram::WindroseHistogram;
use crate::render::error::RenderError;
use crate::types::observation::Observation;
use crate::types::speed_bins::SpeedBins;
use bon::bon;
use log::{debug, warn};

/// Everything a renderer needs for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    /// Bucket label, e.g. `Jan` or `DJF`.
    pub label: String,
    pub title: String,
    pub histogram: WindroseHistogram,
}

#[bon]
impl ChartRequest {
    /// Bins the observations of one bucket and packages them for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyBucket`] when `observations` is empty and
    /// the policy is [`EmptyBucketPolicy::Error`]. Under
    /// [`EmptyBucketPolicy::Blank`] the request is built with an all-zero
    /// histogram and a warning is logged.
    #[builder]
    pub fn new(
        #[builder(into)] label: String,
        #[builder(into)] title: String,
        observations: &[Observation],
        bins: &SpeedBins,
        #[builder(default = DEFAULT_SECTORS)] sectors: usize,
        #[builder(default = true)] normalize: bool,
        #[builder(default)] empty_bucket: EmptyBucketPolicy,
    ) -> Result<Self, RenderError> {
        if observations.is_empty() {
            match empty_bucket {
                EmptyBucketPolicy::Error => return Err(RenderError::EmptyBucket(label)),
                EmptyBucketPolicy::Blank => {
                    warn!("Bucket '{}' has no observations, rendering a blank chart", label)
                }
            }
        }

        let histogram = WindroseHistogram::from_observations(observations, bins, sectors, normalize);
        debug!(
            "Bucket '{}': {} observations, {} binned",
            label,
            histogram.total(),
            histogram.counted()
        );

        Ok(Self {
            label,
            title,
            histogram,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn observation(direction: f64, speed: f64) -> Observation {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Observation::new(ts, direction, speed)
    }

    #[test]
    fn builds_histogram_from_observations() -> Result<(), RenderError> {
        let observations = [observation(10.0, 1.0), observation(190.0, 3.0)];
        let request = ChartRequest::builder()
            .label("Jan")
            .title("Windrose for Jan")
            .observations(&observations)
            .bins(&SpeedBins::default())
            .build()?;
        assert_eq!(request.label, "Jan");
        assert_eq!(request.histogram.counted(), 2);
        assert!(request.histogram.is_normalized());
        Ok(())
    }

    #[test]
    fn empty_bucket_policy_is_deterministic() -> Result<(), RenderError> {
        let bins = SpeedBins::default();
        let refused = ChartRequest::builder()
            .label("Jul")
            .title("Windrose for Jul")
            .observations(&[])
            .bins(&bins)
            .build();
        assert!(matches!(refused, Err(RenderError::EmptyBucket(label)) if label == "Jul"));

        let blank = ChartRequest::builder()
            .label("Jul")
            .title("Windrose for Jul")
            .observations(&[])
            .bins(&bins)
            .empty_bucket(EmptyBucketPolicy::Blank)
            .build()?;
        assert!(blank.histogram.is_empty());
        Ok(())
    }
}
