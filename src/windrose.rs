//! The pipeline runner: load, clean, window, then one chart per month and per
//! season.

use crate::config::WindroseConfig;
use crate::error::WindroseError;
use crate::observations::cleaner::clean_observations;
use crate::observations::frame::ObservationFrame;
use crate::observations::loader::load_observations;
use crate::render::{ChartRequest, PlottersRenderer, PolarHistogramRenderer};
use crate::types::bucket::Bucket;
use crate::utils::ensure_output_dir_exists;
use log::{debug, info};
use std::path::PathBuf;

/// One chart written by [`Windrose::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenChart {
    pub label: String,
    pub path: PathBuf,
    /// Observations in the bucket, binned or not.
    pub observations: usize,
}

/// Row counts per stage and the charts produced by a run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    pub loaded_rows: usize,
    pub cleaned_rows: usize,
    pub filtered_rows: usize,
    pub charts: Vec<WrittenChart>,
}

/// Observations after the load, clean and window stages.
#[derive(Debug, Clone)]
pub struct PreparedObservations {
    pub loaded_rows: usize,
    pub cleaned_rows: usize,
    pub frame: ObservationFrame,
}

/// Runs the windrose pipeline for one configuration.
///
/// Months are charted in ascending order, followed by the seasons in their
/// configured order. Each chart is written as `<output_dir>/<label>.png`; the
/// output directory has to exist beforehand.
///
/// # Examples
///
/// ```no_run
/// use windrose_rs::{PlottersRenderer, Windrose, WindroseConfig, WindroseError};
///
/// # fn run() -> Result<(), WindroseError> {
/// let config = WindroseConfig::builder()
///     .input_path("data/Field1.csv")
///     .output_dir("plots/field1")
///     .build();
///
/// let summary = Windrose::new(config, PlottersRenderer::new()).run()?;
/// println!("{} charts written", summary.charts.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Windrose<R = PlottersRenderer> {
    config: WindroseConfig,
    renderer: R,
}

impl Windrose<PlottersRenderer> {
    /// A runner that draws with [`PlottersRenderer`].
    pub fn with_default_renderer(config: WindroseConfig) -> Self {
        Self::new(config, PlottersRenderer::new())
    }
}

impl<R: PolarHistogramRenderer> Windrose<R> {
    pub fn new(config: WindroseConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &WindroseConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Validates the configuration and the output directory, then writes all
    /// charts.
    ///
    /// Nothing is read or written when validation fails. A failing bucket
    /// aborts the run; charts written before it stay on disk.
    ///
    /// # Errors
    ///
    /// * [`WindroseError::Config`] for an invalid configuration.
    /// * [`WindroseError::OutputDirMissing`] if `output_dir` is not an existing directory.
    /// * [`WindroseError::Observations`] if loading or cleaning the input fails.
    /// * [`WindroseError::Render`] naming the bucket whose chart failed.
    /// * [`WindroseError::OutputWrite`] if a chart file cannot be written.
    pub fn run(&self) -> Result<RunSummary, WindroseError> {
        self.config.validate()?;
        ensure_output_dir_exists(&self.config.output_dir)?;

        let prepared = self.prepare()?;
        let mut summary = RunSummary {
            loaded_rows: prepared.loaded_rows,
            cleaned_rows: prepared.cleaned_rows,
            filtered_rows: prepared.frame.height(),
            charts: Vec::new(),
        };

        for bucket in self.buckets() {
            let chart = self.render_bucket(&prepared.frame, &bucket)?;
            summary.charts.push(chart);
        }

        info!(
            "Wrote {} charts to {}",
            summary.charts.len(),
            self.config.output_dir.display()
        );
        Ok(summary)
    }

    /// Loads, cleans and windows the input table.
    pub fn prepare(&self) -> Result<PreparedObservations, WindroseError> {
        let raw = load_observations(&self.config.input_path, &self.config.null_values)?;
        let cleaned = clean_observations(&raw, &self.config.columns)?;
        let frame = cleaned.window(&self.config.date_window)?;
        info!(
            "Kept {} of {} observations inside {}",
            frame.height(),
            cleaned.height(),
            self.config.date_window
        );

        Ok(PreparedObservations {
            loaded_rows: raw.height(),
            cleaned_rows: cleaned.height(),
            frame,
        })
    }

    /// Requested months in ascending order, then the configured seasons.
    pub fn buckets(&self) -> Vec<Bucket> {
        self.config
            .months_to_render()
            .into_iter()
            .map(Bucket::Month)
            .chain(self.config.seasons.iter().cloned().map(Bucket::Season))
            .collect()
    }

    /// Charts one bucket of `frame` and writes it to the output directory.
    pub fn render_bucket(
        &self,
        frame: &ObservationFrame,
        bucket: &Bucket,
    ) -> Result<WrittenChart, WindroseError> {
        let subset = match bucket {
            Bucket::Month(month) => frame.month(*month)?,
            Bucket::Season(season) => frame.season(season)?,
        };
        let observations = subset.observations()?;
        debug!("{}: {} observations", bucket, observations.len());

        let template = match bucket {
            Bucket::Month(_) => &self.config.month_title,
            Bucket::Season(_) => &self.config.season_title,
        };
        let render_error = |source| WindroseError::Render {
            bucket: bucket.to_string(),
            source,
        };

        let request = ChartRequest::builder()
            .label(bucket.label())
            .title(bucket.title(template))
            .observations(&observations)
            .bins(&self.config.bin_edges)
            .sectors(self.config.sectors)
            .normalize(self.config.render.normalize)
            .empty_bucket(self.config.empty_bucket)
            .build()
            .map_err(render_error)?;
        let bytes = self
            .renderer
            .render(&request, &self.config.render)
            .map_err(render_error)?;

        let path = self.config.output_dir.join(bucket.file_name());
        std::fs::write(&path, bytes).map_err(|e| WindroseError::OutputWrite(path.clone(), e))?;
        info!("Wrote {} ({} observations)", path.display(), observations.len());

        Ok(WrittenChart {
            label: bucket.label().to_string(),
            path,
            observations: observations.len(),
        })
    }
}
