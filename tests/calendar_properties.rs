use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;
use rust_timeline_editor::model::Granularity;
use rust_timeline_editor::timeline::calendar::{
    clamp_to_start, expand_to_full_period, relative_time_label, relative_week_index,
};
use rust_timeline_editor::timeline::LaneAllocator;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~60 years.
    let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    (0i64..22_000).prop_map(move |offset| base + Duration::days(offset))
}

fn any_granularity() -> impl Strategy<Value = Granularity> {
    prop_oneof![
        Just(Granularity::Day),
        Just(Granularity::Week),
        Just(Granularity::Month),
    ]
}

proptest! {
    #[test]
    fn expanded_range_contains_and_aligns(
        start in any_date(),
        span in 0i64..800,
        granularity in any_granularity(),
    ) {
        let end = start + Duration::days(span);
        let (from, to) = expand_to_full_period(start, end, granularity);
        prop_assert!(from <= start);
        prop_assert!(to >= end);
        match granularity {
            Granularity::Day => prop_assert_eq!((from, to), (start, end)),
            Granularity::Week => {
                prop_assert_eq!(from.weekday(), Weekday::Mon);
                prop_assert_eq!(to.weekday(), Weekday::Sun);
            }
            Granularity::Month => {
                prop_assert_eq!(from.day(), 1);
                prop_assert_eq!((to + Duration::days(1)).day(), 1);
            }
        }
    }

    #[test]
    fn relative_labels_are_positive_and_monotonic(
        project_start in any_date(),
        offset in -400i64..2_000,
        step in 0i64..200,
        granularity in any_granularity(),
    ) {
        let a = project_start + Duration::days(offset);
        let b = a + Duration::days(step);
        let la = relative_time_label(a, project_start, granularity);
        let lb = relative_time_label(b, project_start, granularity);
        prop_assert!(la.index >= 1);
        prop_assert!(la.index <= lb.index);
        if offset >= 0 {
            let size = granularity.default_duration_days();
            prop_assert_eq!(la.index as i64, offset / size + 1);
        }
    }

    #[test]
    fn week_index_advances_one_per_week(project_start in any_date(), weeks in 0i64..300) {
        let date = project_start + Duration::weeks(weeks);
        prop_assert_eq!(relative_week_index(date, project_start) as i64, weeks + 1);
    }

    #[test]
    fn clamp_never_precedes_start(date in any_date(), project_start in any_date()) {
        let clamped = clamp_to_start(date, project_start);
        prop_assert!(clamped >= project_start);
        if date >= project_start {
            prop_assert_eq!(clamped, date);
        }
    }

    #[test]
    fn lanes_stay_injective_and_compact(
        first in prop::collection::btree_set(0u16..500, 0..40),
        second in prop::collection::btree_set(0u16..500, 0..40),
        moves in prop::collection::vec((0u16..500, 0usize..50), 0..20),
    ) {
        let mut lanes = LaneAllocator::new();
        let ids: Vec<String> = first.iter().map(|n| format!("task-{n}")).collect();
        lanes.sync(ids.iter().map(String::as_str));

        // A fresh allocation has no gaps.
        let used: HashSet<usize> = ids.iter().filter_map(|id| lanes.lane_of(id)).collect();
        prop_assert_eq!(used.len(), ids.len());
        prop_assert_eq!(used, (0..ids.len()).collect::<HashSet<_>>());

        let ids: Vec<String> = second.iter().map(|n| format!("task-{n}")).collect();
        lanes.sync(ids.iter().map(String::as_str));
        for (n, lane) in moves {
            let id = format!("task-{n}");
            if ids.contains(&id) {
                lanes.assign(&id, lane);
            }
        }

        let assigned: Vec<usize> = ids.iter().filter_map(|id| lanes.lane_of(id)).collect();
        prop_assert_eq!(assigned.len(), ids.len());
        let distinct: HashSet<usize> = assigned.iter().copied().collect();
        prop_assert_eq!(distinct.len(), assigned.len());
        prop_assert_eq!(lanes.len(), ids.len());
        if let Some(max) = assigned.iter().max() {
            prop_assert_eq!(lanes.lane_count(), max + 2);
        }
    }
}
