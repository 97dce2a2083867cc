//! Property-based tests for `DateRange` day arithmetic.

use super::DateRange;
use chrono::{Days as ChronoDays, NaiveDate};
use proptest::prelude::*;

fn day_strategy() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~50 years.
    (0u64..18_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + ChronoDays::new(offset)
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Length law: len == (end - start) + 1 and equals the number of days walked.
    #[test]
    fn range_len_matches_walk(start in day_strategy(), span in 0u64..800) {
        let end = start + ChronoDays::new(span);
        let range = DateRange::new(start, end).unwrap();

        prop_assert_eq!(range.len() as u64, span + 1);
        prop_assert_eq!(range.days().count(), range.len());
    }

    // Walked days are strictly ascending, consecutive and inside the range.
    #[test]
    fn range_days_consecutive(start in day_strategy(), span in 0u64..120) {
        let range = DateRange::new(start, start + ChronoDays::new(span)).unwrap();
        let days: Vec<_> = range.days().collect();

        prop_assert_eq!(days.first().copied(), Some(range.start()));
        prop_assert_eq!(days.last().copied(), Some(range.end()));
        for pair in days.windows(2) {
            prop_assert_eq!(pair[0].succ_opt(), Some(pair[1]));
        }
        prop_assert!(days.iter().all(|d| range.contains(*d)));
    }

    // Inverted ranges are always rejected.
    #[test]
    fn inverted_range_rejected(start in day_strategy(), back in 1u64..400) {
        let end = start - ChronoDays::new(back);
        prop_assert!(DateRange::new(start, end).is_err());
    }

    // Overlap is symmetric and agrees with a day-by-day comparison.
    #[test]
    fn overlap_symmetric(a in day_strategy(), a_span in 0u64..30, b_offset in 0u64..60, b_span in 0u64..30) {
        let r1 = DateRange::new(a, a + ChronoDays::new(a_span)).unwrap();
        let b = a + ChronoDays::new(b_offset);
        let r2 = DateRange::new(b, b + ChronoDays::new(b_span)).unwrap();

        let shared = r1.days().any(|d| r2.contains(d));
        prop_assert_eq!(r1.overlaps(&r2), shared);
        prop_assert_eq!(r1.overlaps(&r2), r2.overlaps(&r1));
    }
}
