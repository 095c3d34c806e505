//! hdrgen Core
//!
//! Core types and configuration for the hdrgen signature extractor.

pub mod config;
pub mod error;
pub mod location;
pub mod types;

pub use config::ExtractConfig;
pub use error::{Error, Result};
pub use location::Location;
pub use types::*;
