//! Core interval remapping functionality
//!
//! This module contains the interval algebra, the stage splitting
//! algorithm and pipeline evaluation.

mod error;
mod interval;
pub mod io;
mod pipeline;
mod stage;

pub use error::{
    AlmanacParseError, AlmanacResult, MappingError, MappingResult, RangeMapError, Result,
    SeedError, SeedResult,
};
pub use interval::Interval;
pub use io::{detect_compression, open_input, CompressionFormat};
pub use pipeline::{lowest_start, Execution, Pipeline, PipelineReport, StageReport};
pub use stage::{Stage, StageStats, Translation};
