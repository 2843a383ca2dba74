//! Input format adapters
//!
//! Turns almanac text into stages and seed values into interval sets.

pub mod almanac;
pub mod seeds;

pub use almanac::{parse_almanac_bytes, parse_almanac_file, parse_almanac_reader, Almanac};
pub use seeds::{seed_intervals, SeedMode};
