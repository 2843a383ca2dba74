//! Closed integer intervals
//!
//! An [`Interval`] is `[start, end]` with both bounds inclusive. An interval
//! is empty iff `start > end`; constructors normalise every inverted pair to
//! [`Interval::EMPTY`] so that empty intervals compare equal.

use std::fmt;

/// Closed interval `[start, end]` of `i64` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: i64,
    end: i64,
}

impl Interval {
    /// The canonical empty interval
    pub const EMPTY: Interval = Interval { start: 0, end: -1 };

    /// Create `[start, end]`; inverted bounds yield [`Interval::EMPTY`]
    #[inline]
    pub fn new(start: i64, end: i64) -> Self {
        if start > end {
            Self::EMPTY
        } else {
            Self { start, end }
        }
    }

    /// Single-value interval `[value, value]`
    #[inline]
    pub fn point(value: i64) -> Self {
        Self { start: value, end: value }
    }

    /// Interval covering `length` values starting at `start`
    ///
    /// A length of zero (or less) yields [`Interval::EMPTY`]. The end is
    /// clamped to `i64::MAX`; use [`Interval::checked_from_start_len`] to
    /// detect that case.
    #[inline]
    pub fn from_start_len(start: i64, length: i64) -> Self {
        Self::checked_from_start_len(start, length)
            .unwrap_or_else(|| Self::new(start, i64::MAX))
    }

    /// Like [`Interval::from_start_len`], but `None` when the end does not
    /// fit in `i64`
    #[inline]
    pub fn checked_from_start_len(start: i64, length: i64) -> Option<Self> {
        if length <= 0 {
            return Some(Self::EMPTY);
        }
        start.checked_add(length - 1).map(|end| Self::new(start, end))
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of integers covered
    #[inline]
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end.abs_diff(self.start).saturating_add(1)
        }
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value <= self.end
    }

    /// Overlap of `self` and `other`, or [`Interval::EMPTY`]
    #[inline]
    pub fn intersection(&self, other: &Interval) -> Interval {
        if self.is_empty() || other.is_empty() {
            return Self::EMPTY;
        }
        Self::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// Remove the overlap with `subtrahend` from `self`
    ///
    /// Returns the parts of `self` left and right of the overlap, each
    /// possibly empty. When nothing overlaps, or when the overlap is all of
    /// `self`, both parts are empty.
    pub fn difference(&self, subtrahend: &Interval) -> (Interval, Interval) {
        let overlap = self.intersection(subtrahend);

        if overlap.is_empty() || overlap == *self {
            return (Self::EMPTY, Self::EMPTY);
        }

        let left = if overlap.start == self.start {
            Self::EMPTY
        } else {
            Self::new(self.start, overlap.start - 1)
        };
        let right = if overlap.end == self.end {
            Self::EMPTY
        } else {
            Self::new(overlap.end + 1, self.end)
        };

        (left, right)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "[]")
        } else {
            write!(f, "[{}, {}]", self.start, self.end)
        }
    }
}
