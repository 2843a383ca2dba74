//! Seed interpretation
//!
//! The seed line is a flat list of integers; the caller decides whether each
//! value is a point or whether consecutive values form `(start, length)`
//! pairs.

use crate::core::{Interval, SeedError, SeedResult};
use log::warn;
use std::fmt;

/// How the seed integers are turned into intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Every value is a single-point interval
    Points,
    /// Consecutive `(start, length)` pairs
    #[default]
    Ranges,
}

impl SeedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedMode::Points => "points",
            SeedMode::Ranges => "ranges",
        }
    }
}

impl fmt::Display for SeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the initial interval set
///
/// In `Ranges` mode zero-length pairs produce nothing and a trailing
/// unpaired value is ignored. A pair whose last value does not fit in `i64`
/// is an error.
pub fn seed_intervals(values: &[i64], mode: SeedMode) -> SeedResult<Vec<Interval>> {
    match mode {
        SeedMode::Points => Ok(values.iter().map(|&v| Interval::point(v)).collect()),
        SeedMode::Ranges => {
            let pairs = values.chunks_exact(2);
            if let [last] = pairs.remainder() {
                warn!("Ignoring unpaired trailing seed value {}", last);
            }
            let mut intervals = Vec::with_capacity(values.len() / 2);
            for pair in pairs {
                let (start, length) = (pair[0], pair[1]);
                let interval = Interval::checked_from_start_len(start, length)
                    .ok_or(SeedError::RangeOverflow { start, length })?;
                if !interval.is_empty() {
                    intervals.push(interval);
                }
            }
            Ok(intervals)
        }
    }
}
