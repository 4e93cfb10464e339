//! Chart rendering: the renderer seam, its options and the plotters-backed
//! default implementation.

mod encode;
pub mod error;
mod geometry;
mod options;
mod palette;
mod plotters_renderer;
mod request;

pub use error::RenderError;
pub use options::{RenderOptions, DEFAULT_CAPTION};
pub use plotters_renderer::PlottersRenderer;
pub use request::ChartRequest;

/// Turns a binned windrose into encoded image bytes.
///
/// Implementations must not keep drawing state between calls: every call
/// starts from a fresh surface and releases it before returning, on success
/// and on failure alike. Writing the bytes to disk is the caller's job.
pub trait PolarHistogramRenderer {
    fn render(&self, request: &ChartRequest, options: &RenderOptions)
        -> Result<Vec<u8>, RenderError>;
}

impl<T: PolarHistogramRenderer + ?Sized> PolarHistogramRenderer for &T {
    fn render(
        &self,
        request: &ChartRequest,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError> {
        (**self).render(request, options)
    }
}

impl<T: PolarHistogramRenderer + ?Sized> PolarHistogramRenderer for Box<T> {
    fn render(
        &self,
        request: &ChartRequest,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError> {
        (**self).render(request, options)
    }
}
