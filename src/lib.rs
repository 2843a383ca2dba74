//! FastRangeMap - exact interval remapping through chained stages
//!
//! Pushes whole sets of integer intervals through an ordered chain of
//! translation stages and reports the smallest reachable value.
//!
//! # Features
//!
//! - Set-based splitting: intervals are never expanded into points
//! - O(log T) translation lookup per interval via binary search
//! - Optional parallel fan-out within each stage with rayon
//! - Support for compressed almanac files (gzip, bzip2)
//!
//! # Example
//!
//! ```
//! use fast_rangemap::{parse_almanac_bytes, Execution, SeedMode};
//!
//! let text = b"seeds: 79 14 55 13\n\nseed-to-soil map:\n50 98 2\n52 50 48\n";
//! let almanac = parse_almanac_bytes(text)?;
//! let lowest = almanac.lowest_location(SeedMode::Ranges, Execution::Sequential)?;
//! assert_eq!(lowest, 57);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    lowest_start, AlmanacParseError, Execution, Interval, MappingError, Pipeline,
    PipelineReport, RangeMapError, SeedError, Stage, StageReport, StageStats, Translation,
};
pub use crate::formats::{
    parse_almanac_bytes, parse_almanac_file, seed_intervals, Almanac, SeedMode,
};
