//! Busy intervals and timeline merging.
//!
//! Raw busy periods arrive from multiple calendars, unsorted and
//! overlapping. [`BusyTimeline::merge`] normalizes them into a single
//! sorted, non-overlapping timeline that the slot scanner and room
//! ranker test candidate windows against.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ValidationError;

/// A half-open time interval `[start, end)` in UTC.
///
/// Construction rejects `start >= end`, so downstream interval math
/// never has to revalidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Create a new interval.
    ///
    /// # Errors
    /// Returns an error if `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Check if this interval overlaps another
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Merged busy periods: sorted by start, pairwise disjoint.
///
/// Built once per query via [`merge`](Self::merge) and never mutated in
/// place. The inner vector stays private so the invariant cannot be
/// broken from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BusyTimeline(Vec<TimeInterval>);

impl BusyTimeline {
    /// Merge raw busy intervals into a sorted, non-overlapping timeline.
    ///
    /// Sorts by `(start, end)` (stable, so equal intervals keep their
    /// input order), then sweeps left to right extending the current
    /// interval whenever the next one overlaps or touches it. Touching
    /// intervals coalesce into one. Empty input yields an empty
    /// timeline; the merge itself cannot fail.
    pub fn merge<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = TimeInterval>,
    {
        let mut sorted: Vec<TimeInterval> = intervals.into_iter().collect();
        sorted.sort_by_key(|iv| (iv.start, iv.end));

        let raw_count = sorted.len();
        let mut merged: Vec<TimeInterval> = Vec::with_capacity(raw_count);
        for next in sorted {
            match merged.last_mut() {
                Some(current) if next.start <= current.end => {
                    current.end = current.end.max(next.end);
                }
                _ => merged.push(next),
            }
        }

        tracing::debug!(raw = raw_count, merged = merged.len(), "merged busy intervals");
        Self(merged)
    }

    /// The merged intervals, sorted by start.
    pub fn intervals(&self) -> &[TimeInterval] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether `[start, end)` overlaps no busy interval.
    ///
    /// The timeline is sorted, so scanning stops at the first interval
    /// starting at or after `end`.
    pub fn is_free(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        for busy in &self.0 {
            if busy.start >= end {
                break;
            }
            if start < busy.end && end > busy.start {
                return false;
            }
        }
        true
    }
}

impl<'a> IntoIterator for &'a BusyTimeline {
    type Item = &'a TimeInterval;
    type IntoIter = std::slice::Iter<'a, TimeInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
