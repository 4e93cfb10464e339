pub mod cleaner;
pub mod error;
pub mod frame;
pub mod loader;
