//! Single remapping stage
//!
//! A [`Stage`] holds translations sorted by source start. Lookup uses a
//! binary search for the rightmost translation starting at or before the
//! query, then scans forward until candidates start past the query end.
//!
//! # Preconditions
//!
//! Source intervals of a stage's translations must be pairwise disjoint.
//! This is not checked while mapping; [`Stage::overlapping_translations`]
//! exists for callers that want to diagnose bad input.

use crate::core::Interval;
use log::{debug, warn};

/// One offset-preserving source → destination mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    source: Interval,
    destination: Interval,
}

impl Translation {
    /// Build from a `(destination_start, source_start, length)` triple
    ///
    /// Returns `None` when either end falls outside `i64`.
    pub fn new(destination_start: i64, source_start: i64, length: i64) -> Option<Self> {
        Some(Self {
            source: Interval::checked_from_start_len(source_start, length)?,
            destination: Interval::checked_from_start_len(destination_start, length)?,
        })
    }

    #[inline]
    pub fn source(&self) -> Interval {
        self.source
    }

    #[inline]
    pub fn destination(&self) -> Interval {
        self.destination
    }

    /// Image of a value covered by `source`
    ///
    /// Measured from the source start, so the result stays inside
    /// `destination` without forming the (possibly overflowing) offset.
    #[inline]
    pub fn translate_value(&self, value: i64) -> i64 {
        self.destination.start() + (value - self.source.start())
    }

    /// Image of a sub-interval of `source`
    #[inline]
    pub fn translate(&self, overlap: &Interval) -> Interval {
        Interval::new(self.translate_value(overlap.start()), self.translate_value(overlap.end()))
    }
}

/// Counters for one stage evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStats {
    /// Intervals received
    pub inputs: usize,
    /// Intervals emitted
    pub outputs: usize,
    /// Emitted intervals that went through a translation
    pub mapped: usize,
    /// Emitted intervals left unchanged
    pub passed_through: usize,
}

impl StageStats {
    pub fn merge(&mut self, other: &StageStats) {
        self.inputs += other.inputs;
        self.outputs += other.outputs;
        self.mapped += other.mapped;
        self.passed_through += other.passed_through;
    }
}

/// Named remapping layer, e.g. `seed-to-soil`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    source_category: String,
    destination_category: String,
    translations: Vec<Translation>,
}

impl Stage {
    /// Create a stage, sorting translations by source start
    ///
    /// Zero-length translations are dropped since they cover nothing.
    pub fn new(
        source_category: impl Into<String>,
        destination_category: impl Into<String>,
        translations: Vec<Translation>,
    ) -> Self {
        let mut translations: Vec<Translation> = translations
            .into_iter()
            .filter(|t| !t.source.is_empty())
            .collect();
        translations.sort_by_key(|t| t.source.start());

        Self {
            source_category: source_category.into(),
            destination_category: destination_category.into(),
            translations,
        }
    }

    /// Create a stage from `(destination_start, source_start, length)` triples
    pub fn from_triples<I>(
        source_category: impl Into<String>,
        destination_category: impl Into<String>,
        triples: I,
    ) -> Self
    where
        I: IntoIterator<Item = (i64, i64, i64)>,
    {
        let source_category = source_category.into();
        let destination_category = destination_category.into();
        let translations = triples
            .into_iter()
            .filter_map(|(dst, src, len)| {
                let translation = Translation::new(dst, src, len);
                if translation.is_none() {
                    warn!(
                        "Dropping translation ({}, {}, {}) in {}-to-{}: end overflows i64",
                        dst, src, len, source_category, destination_category
                    );
                }
                translation
            })
            .collect();
        Self::new(source_category, destination_category, translations)
    }

    pub fn source_category(&self) -> &str {
        &self.source_category
    }

    pub fn destination_category(&self) -> &str {
        &self.destination_category
    }

    /// Translations in ascending source order
    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    /// `source-to-destination`
    pub fn name(&self) -> String {
        format!("{}-to-{}", self.source_category, self.destination_category)
    }

    /// Index pairs of translations whose sources overlap
    pub fn overlapping_translations(&self) -> Vec<(usize, usize)> {
        self.translations
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].source.end() >= pair[1].source.start())
            .map(|(i, _)| (i, i + 1))
            .collect()
    }

    /// Index of the rightmost translation with `source.start <= value`,
    /// clamped to 0 when every translation starts later
    #[inline]
    fn search_start(&self, value: i64) -> usize {
        self.translations
            .partition_point(|t| t.source.start() <= value)
            .saturating_sub(1)
    }

    /// First translation whose source overlaps `interval`
    pub fn find_overlap(&self, interval: &Interval) -> Option<&Translation> {
        if interval.is_empty() {
            return None;
        }
        self.translations[self.search_start(interval.start())..]
            .iter()
            .take_while(|t| t.source.start() <= interval.end())
            .find(|t| !t.source.intersection(interval).is_empty())
    }

    /// Image of a single value
    pub fn map_value(&self, value: i64) -> i64 {
        let point = Interval::point(value);
        match self.find_overlap(&point) {
            Some(t) => t.translate_value(value),
            None => value,
        }
    }

    /// Split one interval across the translations, appending images to `out`
    ///
    /// Remainders left after a translation consumes its overlap go back on a
    /// local work list until nothing is left.
    pub fn map_interval_into(&self, interval: Interval, out: &mut Vec<Interval>) -> StageStats {
        let mut stats = StageStats { inputs: 1, ..StageStats::default() };
        let mut pending = Vec::with_capacity(2);
        pending.push(interval);

        while let Some(current) = pending.pop() {
            if current.is_empty() {
                continue;
            }

            match self.find_overlap(&current) {
                Some(translation) => {
                    let overlap = current.intersection(&translation.source);
                    out.push(translation.translate(&overlap));
                    stats.mapped += 1;

                    let (before, after) = current.difference(&overlap);
                    if !before.is_empty() {
                        pending.push(before);
                    }
                    if !after.is_empty() {
                        pending.push(after);
                    }
                }
                None => {
                    out.push(current);
                    stats.passed_through += 1;
                }
            }
        }

        stats.outputs = stats.mapped + stats.passed_through;
        stats
    }

    /// Map one interval, returning its images
    pub fn map_interval(&self, interval: Interval) -> Vec<Interval> {
        let mut out = Vec::new();
        self.map_interval_into(interval, &mut out);
        out
    }

    /// Map a whole interval set sequentially
    pub fn map_intervals(&self, intervals: &[Interval]) -> (Vec<Interval>, StageStats) {
        let mut out = Vec::with_capacity(intervals.len());
        let mut stats = StageStats::default();

        for interval in intervals {
            let s = self.map_interval_into(*interval, &mut out);
            stats.merge(&s);
        }

        debug!(
            "Stage {}: {} -> {} intervals ({} mapped, {} unchanged)",
            self.name(),
            stats.inputs,
            stats.outputs,
            stats.mapped,
            stats.passed_through
        );

        (out, stats)
    }
}
