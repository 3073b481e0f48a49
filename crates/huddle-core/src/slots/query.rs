//! Availability query parameters.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Daily working-hour bounds, as wall-clock hours in the reference
/// timezone. `end_hour` of 24 means midnight at the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WorkingHours {
    /// Create working-hour bounds.
    ///
    /// # Errors
    /// Returns an error unless `start_hour < end_hour <= 24`.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ValidationError> {
        if end_hour > 24 || start_hour >= end_hour {
            return Err(ValidationError::invalid_value(
                "working_hours",
                format!("expected start < end <= 24, got {start_hour}-{end_hour}"),
            ));
        }
        Ok(Self { start_hour, end_hour })
    }

    /// Parse bounds from `"09:00-18:00"`, `"9-18"`, or `"09:00~18:00"`.
    /// Minutes are accepted and ignored; scheduling is hour-granular.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let (start, end) = parse_hour_pair(s, "working_hours")?;
        Self::new(start, end)
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self { start_hour: 9, end_hour: 18 }
    }
}

/// Lunch-break bounds, as wall-clock hours in the reference timezone.
/// Slots never start inside `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchBreak {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl LunchBreak {
    /// Create lunch-break bounds.
    ///
    /// # Errors
    /// Returns an error unless `start_hour < end_hour <= 24`.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ValidationError> {
        if end_hour > 24 || start_hour >= end_hour {
            return Err(ValidationError::invalid_value(
                "lunch_break",
                format!("expected start < end <= 24, got {start_hour}-{end_hour}"),
            ));
        }
        Ok(Self { start_hour, end_hour })
    }

    /// Parse bounds from `"12:00-13:00"` or `"12-13"`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let (start, end) = parse_hour_pair(s, "lunch_break")?;
        Self::new(start, end)
    }

    /// Check whether a wall-clock hour falls inside the break.
    pub fn contains_hour(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }
}

fn parse_hour_pair(s: &str, field: &str) -> Result<(u32, u32), ValidationError> {
    let normalized = s.replace('~', "-");
    let mut parts = normalized.splitn(2, '-');
    let (Some(start), Some(end)) = (parts.next(), parts.next()) else {
        return Err(ValidationError::invalid_value(
            field,
            format!("expected HH:MM-HH:MM, got '{s}'"),
        ));
    };

    let hour_of = |part: &str| -> Result<u32, ValidationError> {
        part.trim()
            .split(':')
            .next()
            .and_then(|h| h.parse().ok())
            .ok_or_else(|| {
                ValidationError::invalid_value(field, format!("unparseable hour in '{s}'"))
            })
    };

    Ok((hour_of(start)?, hour_of(end)?))
}

/// Parameters for a free-slot scan.
///
/// Construct with [`new`](Self::new) and refine with the `with_*`
/// builders. [`validate`](Self::validate) runs before any scanning and
/// fails fast on bad input; the scanner never silently fixes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// Calendars whose busy periods were merged for this query.
    /// Informational to the scanner itself; the fetch layer uses it.
    pub calendar_ids: Vec<String>,
    /// First calendar day to scan (inclusive).
    pub range_start: NaiveDate,
    /// Last calendar day to scan (inclusive).
    pub range_end: NaiveDate,
    /// Desired meeting duration in minutes.
    pub duration_minutes: i64,
    pub working_hours: WorkingHours,
    pub lunch_break: Option<LunchBreak>,
    /// Candidate-slot stride in minutes.
    pub slot_stride_minutes: i64,
    /// Reference timezone for working hours, lunch bounds, and weekday
    /// classification.
    pub timezone: Tz,
}

impl AvailabilityQuery {
    /// Create a query with default working hours (9-18), a 30-minute
    /// stride, no lunch break, and UTC as the reference timezone.
    pub fn new(range_start: NaiveDate, range_end: NaiveDate, duration_minutes: i64) -> Self {
        Self {
            calendar_ids: Vec::new(),
            range_start,
            range_end,
            duration_minutes,
            working_hours: WorkingHours::default(),
            lunch_break: None,
            slot_stride_minutes: 30,
            timezone: Tz::UTC,
        }
    }

    /// Set the attendee calendar ids.
    pub fn with_calendars<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.calendar_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set working hours.
    pub fn with_working_hours(mut self, hours: WorkingHours) -> Self {
        self.working_hours = hours;
        self
    }

    /// Set the lunch break.
    pub fn with_lunch_break(mut self, lunch: LunchBreak) -> Self {
        self.lunch_break = Some(lunch);
        self
    }

    /// Set the candidate stride in minutes.
    pub fn with_stride(mut self, minutes: i64) -> Self {
        self.slot_stride_minutes = minutes;
        self
    }

    /// Set the reference timezone.
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = tz;
        self
    }

    /// Validate the query shape.
    ///
    /// # Errors
    /// Returns an error for a non-positive duration or stride, or a
    /// range ending before it starts. A duration that cannot fit the
    /// working window is not an error; the scan just yields no slots.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration_minutes <= 0 {
            return Err(ValidationError::invalid_value(
                "duration_minutes",
                format!("must be positive, got {}", self.duration_minutes),
            ));
        }
        if self.slot_stride_minutes <= 0 {
            return Err(ValidationError::invalid_value(
                "slot_stride_minutes",
                format!("must be positive, got {}", self.slot_stride_minutes),
            ));
        }
        if self.range_end < self.range_start {
            return Err(ValidationError::invalid_value(
                "range_end",
                format!(
                    "range end {} is before range start {}",
                    self.range_end, self.range_start
                ),
            ));
        }
        Ok(())
    }
}
