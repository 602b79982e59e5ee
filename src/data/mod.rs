//! Data module - CSV loading and column processing

mod loader;
mod processor;

pub use loader::{LoaderError, StudentTable};
pub use processor::{DataProcessor, RANK_COLUMN, TOTAL_SCORE_COLUMN};
