pub mod bucket;
pub mod date_window;
pub mod month;
pub mod observation;
pub mod season;
pub mod speed_bins;
pub mod timestamp;
