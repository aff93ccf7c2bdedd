//! Horizon Core: shared configuration, extraction limits and error types.

pub mod config;
pub mod error;
pub mod limits;

pub use config::{DataPaths, HorizonConfig};
pub use error::{Error, Result};
pub use limits::{ExtractionLimits, ExtractionMode, LengthWindow};
