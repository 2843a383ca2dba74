//! Integration tests: almanac files through the full query
//!
//! Writes almanacs to temporary files (plain and compressed) and checks the
//! lowest locations for both seed modes.

use fast_rangemap::core::{detect_compression, CompressionFormat};
use fast_rangemap::{
    parse_almanac_file, AlmanacParseError, Execution, RangeMapError, SeedError, SeedMode,
};
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

const EXAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

#[test]
fn test_plain_file_both_modes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("almanac.txt");
    std::fs::write(&path, EXAMPLE).unwrap();

    let almanac = parse_almanac_file(&path).unwrap();
    assert_eq!(almanac.lowest_location(SeedMode::Points, Execution::Sequential).unwrap(), 35);
    assert_eq!(almanac.lowest_location(SeedMode::Ranges, Execution::Sequential).unwrap(), 46);
    assert_eq!(
        almanac.lowest_location(SeedMode::Ranges, Execution::Parallel { threads: 2 }).unwrap(),
        46
    );
}

#[test]
fn test_gzip_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("almanac.txt.gz");
    let mut enc = flate2::write::GzEncoder::new(
        File::create(&path).unwrap(),
        flate2::Compression::default(),
    );
    enc.write_all(EXAMPLE.as_bytes()).unwrap();
    enc.finish().unwrap();

    assert_eq!(detect_compression(&path).unwrap(), CompressionFormat::Gzip);
    let almanac = parse_almanac_file(&path).unwrap();
    assert_eq!(almanac.stages.len(), 7);
    assert_eq!(almanac.lowest_location(SeedMode::Ranges, Execution::Sequential).unwrap(), 46);
}

#[test]
fn test_bzip2_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("almanac.bz2");
    let mut enc = bzip2::write::BzEncoder::new(
        File::create(&path).unwrap(),
        bzip2::Compression::default(),
    );
    enc.write_all(EXAMPLE.as_bytes()).unwrap();
    enc.finish().unwrap();

    assert_eq!(detect_compression(&path).unwrap(), CompressionFormat::Bzip2);
    let almanac = parse_almanac_file(&path).unwrap();
    assert_eq!(almanac.lowest_location(SeedMode::Points, Execution::Sequential).unwrap(), 35);
}

#[test]
fn test_trace_statistics() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("almanac.txt");
    std::fs::write(&path, EXAMPLE).unwrap();

    let almanac = parse_almanac_file(&path).unwrap();
    let pipeline = almanac.pipeline();
    let seeds = almanac.seed_intervals(SeedMode::Points).unwrap();
    let report = pipeline.trace(&seeds, Execution::Sequential).unwrap();

    assert_eq!(report.stages.len(), 7);
    assert_eq!(report.stages[0].name, "seed-to-soil");
    assert_eq!(report.stages[0].stats.inputs, 4);
    // Points never split
    assert!(report.stages.iter().all(|s| s.stats.inputs == s.stats.outputs));
    assert_eq!(report.lowest().unwrap(), 35);
}

#[test]
fn test_overflowing_seed_range_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("overflow.txt");
    std::fs::write(&path, "seeds: 9223372036854775800 100\n\nseed-to-soil map:\n0 0 5\n").unwrap();

    let almanac = parse_almanac_file(&path).unwrap();
    let err = almanac.lowest_location(SeedMode::Ranges, Execution::Sequential).unwrap_err();
    assert!(matches!(err, RangeMapError::Seed(SeedError::RangeOverflow { length: 100, .. })));
    // The same values as points are fine
    let lowest = almanac.lowest_location(SeedMode::Points, Execution::Sequential).unwrap();
    assert_eq!(lowest, 100);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = parse_almanac_file(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, AlmanacParseError::Io(_)));
}

#[test]
fn test_malformed_file_reports_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    std::fs::write(&path, "seeds: 1 2\n\nseed-to-soil map:\n1 2 3 4\n").unwrap();

    let err = parse_almanac_file(&path).unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert!(matches!(err, AlmanacParseError::InvalidTranslation { .. }));
}
