//! Property-based tests for availability resolution using proptest.
//!
//! These verify invariants that should hold for *any* input interval
//! set and query shape, not just the worked examples in the unit tests.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use proptest::prelude::*;

use huddle_core::{
    find_free_slots, rank_available_rooms, AvailabilityQuery, BusyTimeline, LunchBreak, Room,
    RoomFilters, TimeInterval, WorkingHours,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// All offsets are minutes from this instant; two weeks of room keeps
/// every generated interval inside the scanned range.
fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap()
}

fn scan_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn scan_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()
}

/// Generate an interval as (start offset, duration) in minutes.
fn arb_interval() -> impl Strategy<Value = TimeInterval> {
    (0i64..14 * 24 * 60, 1i64..480).prop_map(|(offset, duration)| {
        let start = base() + chrono::Duration::minutes(offset);
        let end = start + chrono::Duration::minutes(duration);
        TimeInterval::new(start, end).expect("generated interval has positive duration")
    })
}

fn arb_intervals() -> impl Strategy<Value = Vec<TimeInterval>> {
    prop::collection::vec(arb_interval(), 0..40)
}

fn arb_timezone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(chrono_tz::UTC),
        Just(chrono_tz::Asia::Seoul),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Europe::London),
    ]
}

fn arb_query() -> impl Strategy<Value = AvailabilityQuery> {
    (15i64..=120, 5i64..=60, 6u32..=10, 14u32..=20, arb_timezone(), any::<bool>()).prop_map(
        |(duration, stride, start_hour, end_hour, tz, lunch)| {
            let mut query = AvailabilityQuery::new(scan_start(), scan_end(), duration)
                .with_working_hours(
                    WorkingHours::new(start_hour, end_hour).expect("start < end by construction"),
                )
                .with_stride(stride)
                .with_timezone(tz);
            if lunch {
                query = query.with_lunch_break(
                    LunchBreak::new(12, 13).expect("fixed lunch bounds are valid"),
                );
            }
            query
        },
    )
}

fn arb_catalog() -> impl Strategy<Value = Vec<Room>> {
    prop::collection::vec((1u32..=20, any::<bool>()), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (capacity, preferred))| Room {
                name: format!("room-{i}"),
                resource_id: format!("room-{i}@resource.calendar.google.com"),
                capacity,
                kind: "conference".to_string(),
                location: "hq".to_string(),
                preferred,
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Merge properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn merge_output_is_sorted_and_disjoint(intervals in arb_intervals()) {
        let timeline = BusyTimeline::merge(intervals);
        for pair in timeline.intervals().windows(2) {
            prop_assert!(pair[0].end() <= pair[1].start());
        }
    }

    #[test]
    fn merge_is_idempotent(intervals in arb_intervals()) {
        let once = BusyTimeline::merge(intervals);
        let twice = BusyTimeline::merge(once.intervals().iter().copied());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_covers_every_input_exactly_once(intervals in arb_intervals()) {
        let timeline = BusyTimeline::merge(intervals.clone());
        for input in &intervals {
            let containing = timeline
                .intervals()
                .iter()
                .filter(|m| m.start() <= input.start() && input.end() <= m.end())
                .count();
            prop_assert_eq!(containing, 1);
        }
    }
}

// ---------------------------------------------------------------------------
// Scanner properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn slots_never_overlap_busy_intervals(
        intervals in arb_intervals(),
        query in arb_query(),
    ) {
        let timeline = BusyTimeline::merge(intervals);
        let slots = find_free_slots(&timeline, &query).expect("query is valid by construction");
        for slot in &slots {
            for busy in timeline.intervals() {
                prop_assert!(slot.end <= busy.start() || slot.start >= busy.end());
            }
        }
    }

    #[test]
    fn slots_never_start_on_weekends(query in arb_query()) {
        let slots = find_free_slots(&BusyTimeline::default(), &query)
            .expect("query is valid by construction");
        for slot in &slots {
            let weekday = slot.start.with_timezone(&query.timezone).weekday();
            prop_assert!(!matches!(weekday, Weekday::Sat | Weekday::Sun));
        }
    }

    #[test]
    fn slots_never_start_inside_lunch(
        intervals in arb_intervals(),
        query in arb_query(),
    ) {
        let timeline = BusyTimeline::merge(intervals);
        let slots = find_free_slots(&timeline, &query).expect("query is valid by construction");
        if let Some(lunch) = &query.lunch_break {
            for slot in &slots {
                let local = slot.start.with_timezone(&query.timezone);
                prop_assert!(!lunch.contains_hour(chrono::Timelike::hour(&local)));
            }
        }
    }

    #[test]
    fn slots_are_chronological(
        intervals in arb_intervals(),
        query in arb_query(),
    ) {
        let timeline = BusyTimeline::merge(intervals);
        let slots = find_free_slots(&timeline, &query).expect("query is valid by construction");
        for pair in slots.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }
        for slot in &slots {
            prop_assert_eq!(slot.duration_minutes(), query.duration_minutes);
        }
    }
}

// ---------------------------------------------------------------------------
// Ranking properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ranking_follows_policy_and_is_stable(catalog in arb_catalog()) {
        let window = TimeInterval::new(
            base() + chrono::Duration::hours(14),
            base() + chrono::Duration::hours(15),
        )
        .expect("window has positive duration");

        let ranked = rank_available_rooms(
            &catalog,
            &window,
            |_| Ok::<_, std::convert::Infallible>(BusyTimeline::default()),
            &RoomFilters::default(),
        );

        // Everything available -> output is a permutation of the catalog
        prop_assert_eq!(ranked.len(), catalog.len());

        // Sorted by (not preferred, -capacity)
        for pair in ranked.windows(2) {
            let a = (!pair[0].room.preferred, std::cmp::Reverse(pair[0].room.capacity));
            let b = (!pair[1].room.preferred, std::cmp::Reverse(pair[1].room.capacity));
            prop_assert!(a <= b);
        }

        // Rooms tied on both keys keep catalog order: names carry their
        // catalog index, so tied runs must have increasing indices
        for pair in ranked.windows(2) {
            if pair[0].room.preferred == pair[1].room.preferred
                && pair[0].room.capacity == pair[1].room.capacity
            {
                let index = |room: &Room| -> usize {
                    catalog
                        .iter()
                        .position(|c| c.name == room.name)
                        .expect("ranked room came from the catalog")
                };
                prop_assert!(index(&pair[0].room) < index(&pair[1].room));
            }
        }
    }
}
