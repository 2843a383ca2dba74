//! Almanac parsing
//!
//! Parses the line-oriented description of seeds and remapping stages.
//!
//! # Almanac Format
//!
//! ```text
//! seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//!
//! soil-to-fertilizer map:
//! 0 15 37
//! ```
//!
//! - First non-blank line: `<label>: <integers>`
//! - Header line: `<source>-to-<destination>` followed by anything
//! - Data lines: `destination_start source_start length`
//! - Blank lines end a map block

use crate::core::{
    open_input, AlmanacParseError, AlmanacResult, Execution, Interval, Pipeline, RangeMapError,
    SeedResult, Stage, Translation,
};
use crate::formats::seeds::{seed_intervals, SeedMode};
use log::{info, warn};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parsed almanac: seed values plus stages in file order
#[derive(Debug, Clone, Default)]
pub struct Almanac {
    pub seeds: Vec<i64>,
    pub stages: Vec<Stage>,
}

impl Almanac {
    /// Initial interval set for the given mode
    pub fn seed_intervals(&self, mode: SeedMode) -> SeedResult<Vec<Interval>> {
        seed_intervals(&self.seeds, mode)
    }

    /// Pipeline over a copy of the stages
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.stages.clone())
    }

    /// Lowest location reachable from the seeds
    pub fn lowest_location(
        &self,
        mode: SeedMode,
        execution: Execution,
    ) -> Result<i64, RangeMapError> {
        let seeds = self.seed_intervals(mode)?;
        self.pipeline().lowest_location(&seeds, execution)
    }
}

/// Map block being accumulated
struct PendingStage {
    source: String,
    destination: String,
    translations: Vec<Translation>,
}

impl PendingStage {
    fn finish(self) -> Stage {
        let stage = Stage::new(self.source, self.destination, self.translations);
        let overlaps = stage.overlapping_translations();
        if !overlaps.is_empty() {
            warn!(
                "Stage {} has {} overlapping translation pair(s); results are unspecified",
                stage.name(),
                overlaps.len()
            );
        }
        stage
    }
}

fn parse_int(field: &str, line_number: usize) -> AlmanacResult<i64> {
    field.parse::<i64>().map_err(|_| AlmanacParseError::ParseInt {
        line: line_number,
        value: field.to_string(),
    })
}

/// Parse `label: v1 v2 ...`
fn parse_seed_line(line: &str, line_number: usize) -> AlmanacResult<Vec<i64>> {
    let (label, values) = line
        .split_once(':')
        .ok_or(AlmanacParseError::MissingSeeds { line: line_number })?;

    // A map header in first position means the seed line is absent
    if label.contains("-to-") {
        return Err(AlmanacParseError::MissingSeeds { line: line_number });
    }

    values
        .split_whitespace()
        .map(|v| parse_int(v, line_number))
        .collect()
}

/// Parse `source-to-destination map:` into the two category names
fn parse_header(line: &str, line_number: usize) -> AlmanacResult<(String, String)> {
    let invalid = || AlmanacParseError::InvalidHeader {
        line: line_number,
        content: line.chars().take(100).collect(),
    };

    let token = line.split_whitespace().next().ok_or_else(invalid)?;
    let token = token.trim_end_matches(':');
    let names: Vec<&str> = token.split("-to-").collect();

    match names.as_slice() {
        [source, destination] if !source.is_empty() && !destination.is_empty() => {
            Ok((source.to_string(), destination.to_string()))
        }
        _ => Err(invalid()),
    }
}

/// Parse `destination_start source_start length`
fn parse_translation(line: &str, line_number: usize) -> AlmanacResult<Translation> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() != 3 {
        return Err(AlmanacParseError::InvalidTranslation {
            line: line_number,
            message: format!("Expected 3 fields, got {}", fields.len()),
        });
    }

    let destination_start = parse_int(fields[0], line_number)?;
    let source_start = parse_int(fields[1], line_number)?;
    let length = parse_int(fields[2], line_number)?;

    if length < 0 {
        return Err(AlmanacParseError::InvalidTranslation {
            line: line_number,
            message: format!("Length must not be negative, got {}", length),
        });
    }

    Translation::new(destination_start, source_start, length).ok_or_else(|| {
        AlmanacParseError::InvalidTranslation {
            line: line_number,
            message: format!(
                "Range end overflows i64 (destination {}, source {}, length {})",
                destination_start, source_start, length
            ),
        }
    })
}

/// Outside a block every line must be a header; inside one, only lines
/// that look like `a-to-b` or end with `:` are
fn is_header_line(line: &str, in_block: bool) -> bool {
    if !in_block || line.ends_with(':') {
        return true;
    }
    line.split_whitespace().next().is_some_and(|token| token.contains("-to-"))
}

/// Parse an almanac from a reader
pub fn parse_almanac_reader<R: BufRead>(reader: R) -> AlmanacResult<Almanac> {
    let mut seeds: Option<Vec<i64>> = None;
    let mut stages = Vec::new();
    let mut current: Option<PendingStage> = None;
    let mut line_number: usize = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if let Some(pending) = current.take() {
                stages.push(pending.finish());
            }
            continue;
        }

        if seeds.is_none() {
            seeds = Some(parse_seed_line(trimmed, line_number)?);
            continue;
        }

        if is_header_line(trimmed, current.is_some()) {
            if let Some(pending) = current.take() {
                stages.push(pending.finish());
            }
            let (source, destination) = parse_header(trimmed, line_number)?;
            current = Some(PendingStage { source, destination, translations: Vec::new() });
            continue;
        }

        if let Some(pending) = current.as_mut() {
            pending.translations.push(parse_translation(trimmed, line_number)?);
        }
    }

    if let Some(pending) = current.take() {
        stages.push(pending.finish());
    }

    let seeds = seeds.ok_or(AlmanacParseError::MissingSeeds { line: line_number.max(1) })?;

    info!("Parsed almanac: {} seed values, {} stages", seeds.len(), stages.len());

    Ok(Almanac { seeds, stages })
}

/// Parse an almanac from a path (plain, gzip, bzip2 or `-` for stdin)
pub fn parse_almanac_file(path: &Path) -> AlmanacResult<Almanac> {
    let reader = open_input(path)?;
    parse_almanac_reader(reader)
}

/// Parse an almanac from bytes
pub fn parse_almanac_bytes(data: &[u8]) -> AlmanacResult<Almanac> {
    parse_almanac_reader(BufReader::new(data))
}
