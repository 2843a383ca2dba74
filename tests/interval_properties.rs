//! Property-based tests for Interval
//!
//! Covers intersection and difference algebra on closed intervals.

use fast_rangemap::Interval;
use proptest::prelude::*;

/// Generate a non-empty interval with modest bounds
fn arb_interval() -> impl Strategy<Value = Interval> {
    (-1_000i64..1_000, 0i64..200).prop_map(|(start, len)| Interval::new(start, start + len))
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 200, max_global_rejects: 65536, ..ProptestConfig::default() })]

    /// Intersection is commutative and idempotent
    #[test]
    fn prop_intersection_commutative(a in arb_interval(), b in arb_interval()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
        prop_assert_eq!(a.intersection(&a), a);
    }

    /// Every value of the intersection lies in both inputs
    #[test]
    fn prop_intersection_contained(a in arb_interval(), b in arb_interval()) {
        let i = a.intersection(&b);
        if !i.is_empty() {
            prop_assert!(a.contains(i.start()) && a.contains(i.end()));
            prop_assert!(b.contains(i.start()) && b.contains(i.end()));
        } else {
            prop_assert!(a.end() < b.start() || b.end() < a.start());
        }
    }

    /// left + overlap + right partitions the base interval
    #[test]
    fn prop_difference_partitions_base(base in arb_interval(), sub in arb_interval()) {
        let overlap = base.intersection(&sub);
        let (left, right) = base.difference(&sub);

        if overlap.is_empty() || overlap == base {
            prop_assert!(left.is_empty() && right.is_empty());
        } else {
            prop_assert_eq!(left.len() + overlap.len() + right.len(), base.len());
            if !left.is_empty() {
                prop_assert_eq!(left.start(), base.start());
                prop_assert_eq!(left.end() + 1, overlap.start());
            }
            if !right.is_empty() {
                prop_assert_eq!(right.start(), overlap.end() + 1);
                prop_assert_eq!(right.end(), base.end());
            }
            prop_assert!(!left.is_empty() || !right.is_empty());
        }
    }

    /// Point membership agrees with the partition
    #[test]
    fn prop_difference_pointwise(base in arb_interval(), sub in arb_interval()) {
        let overlap = base.intersection(&sub);
        prop_assume!(!overlap.is_empty() && overlap != base);
        let (left, right) = base.difference(&sub);

        for v in base.start()..=base.end() {
            let hits = [left.contains(v), overlap.contains(v), right.contains(v)]
                .iter()
                .filter(|h| **h)
                .count();
            prop_assert_eq!(hits, 1, "value {} covered {} times", v, hits);
        }
    }

    /// Disjoint inputs yield empty results
    #[test]
    fn prop_disjoint_is_empty(a in arb_interval(), gap in 1i64..50, len in 0i64..50) {
        let b = Interval::new(a.end() + gap, a.end() + gap + len);
        prop_assert!(a.intersection(&b).is_empty());
        prop_assert_eq!(a.difference(&b), (Interval::EMPTY, Interval::EMPTY));
        prop_assert_eq!(a.difference(&a), (Interval::EMPTY, Interval::EMPTY));
    }
}
