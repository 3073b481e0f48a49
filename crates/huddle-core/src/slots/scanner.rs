//! Free-slot scanning over a merged busy timeline.
//!
//! Walks the query's date range day by day, generates fixed-duration
//! candidate slots at the configured stride, and keeps the ones that
//! avoid weekends, the lunch break, and every busy interval.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::interval::BusyTimeline;
use crate::slots::query::AvailabilityQuery;

/// A candidate meeting window that passed all filters.
///
/// Produced fresh per query; busy data is point-in-time, so slots are
/// never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FreeSlot {
    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Find free slots in `range_start..=range_end` against a merged
/// timeline.
///
/// Saturdays and Sundays are skipped unconditionally (office-scheduling
/// policy, not configurable). Output is chronological: the day loop and
/// the in-day cursor both advance monotonically. Truncation to "top N"
/// is the caller's job.
///
/// # Errors
/// Returns an error if the query fails [`AvailabilityQuery::validate`].
/// An impossible configuration (duration longer than the working
/// window) is not an error; it yields zero slots.
pub fn find_free_slots(
    timeline: &BusyTimeline,
    query: &AvailabilityQuery,
) -> Result<Vec<FreeSlot>, ValidationError> {
    query.validate()?;

    let tz = query.timezone;
    let duration = Duration::minutes(query.duration_minutes);
    let stride = Duration::minutes(query.slot_stride_minutes);

    let mut slots = Vec::new();
    let mut day = query.range_start;

    while day <= query.range_end {
        let next_day = day.succ_opt();

        // 1. Skip weekends
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            match next_day {
                Some(d) => {
                    day = d;
                    continue;
                }
                None => break,
            }
        }

        // 2. Build the day's working window in the reference timezone.
        //    A day whose window cannot be constructed (DST gap at the
        //    boundary hour) is skipped.
        let window = zoned_hour(day, query.working_hours.start_hour, tz)
            .zip(zoned_hour(day, query.working_hours.end_hour, tz));
        let Some((window_start, window_end)) = window else {
            match next_day {
                Some(d) => {
                    day = d;
                    continue;
                }
                None => break,
            }
        };

        // 3. Walk the cursor; stop once no further slot can fit
        let mut cursor = window_start;
        while cursor + duration <= window_end {
            // 3a. Never start a slot inside the lunch break: jump the
            //     cursor to the end of the break and re-enter the loop.
            //     A break ending at or past closing time ends the day.
            if let Some(lunch) = &query.lunch_break {
                if lunch.contains_hour(cursor.with_timezone(&tz).hour()) {
                    match zoned_hour(day, lunch.end_hour, tz) {
                        Some(after_lunch) => {
                            cursor = after_lunch;
                            continue;
                        }
                        None => break,
                    }
                }
            }

            // 3b. Test the candidate against the merged timeline
            let candidate_end = cursor + duration;
            if timeline.is_free(cursor, candidate_end) {
                slots.push(FreeSlot {
                    start: cursor,
                    end: candidate_end,
                });
            }

            cursor += stride;
        }

        match next_day {
            Some(d) => day = d,
            None => break,
        }
    }

    let scanned_days = (query.range_end - query.range_start).num_days() + 1;
    tracing::debug!(days = scanned_days, slots = slots.len(), "free-slot scan complete");
    Ok(slots)
}

/// Resolve a wall-clock hour on `day` in `tz` to a UTC instant.
///
/// Hour 24 means midnight ending the day. Ambiguous local times (DST
/// fall-back) resolve to the earliest instant; nonexistent ones yield
/// `None`.
fn zoned_hour(day: NaiveDate, hour: u32, tz: Tz) -> Option<DateTime<Utc>> {
    let (day, hour) = if hour == 24 {
        (day.succ_opt()?, 0)
    } else {
        (day, hour)
    };
    tz.with_ymd_and_hms(day.year(), day.month(), day.day(), hour, 0, 0)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
