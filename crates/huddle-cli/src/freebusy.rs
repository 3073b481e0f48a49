//! Pre-fetched freebusy payload parsing.
//!
//! The CLI never talks to a calendar service itself. The fetch layer
//! (which may fan out one request per calendar and join the results)
//! exports a `freebusy.query` response to a JSON file:
//!
//! ```json
//! {"calendars": {"alice@example.com": {"busy": [{"start": "...", "end": "..."}]}}}
//! ```
//!
//! Timestamps are RFC 3339 with an explicit UTC offset and are
//! normalized to UTC here, before any interval math happens.

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use huddle_core::{BusyTimeline, TimeInterval, ValidationError};

/// A freebusy response exported to a file by the fetch layer.
#[derive(Debug, Deserialize)]
pub struct FreeBusyDocument {
    pub calendars: HashMap<String, CalendarBusy>,
}

/// Busy periods for one calendar or room resource.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarBusy {
    #[serde(default)]
    pub busy: Vec<BusyPeriod>,
}

/// One busy period; timestamps carry their own UTC offset.
#[derive(Debug, Deserialize)]
pub struct BusyPeriod {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl BusyPeriod {
    fn to_interval(&self) -> Result<TimeInterval, ValidationError> {
        TimeInterval::new(self.start.with_timezone(&Utc), self.end.with_timezone(&Utc))
    }
}

impl FreeBusyDocument {
    /// Load a freebusy document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| format!("cannot read freebusy file {}: {err}", path.display()))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Busy intervals for the selected calendars, normalized to UTC.
    ///
    /// An empty selection means every calendar in the document. A
    /// selected calendar missing from the document is an error: the
    /// fetch layer was asked for it and did not deliver, and treating
    /// that silence as "free all week" would book over real meetings.
    pub fn intervals_for(
        &self,
        calendar_ids: &[String],
    ) -> Result<Vec<TimeInterval>, Box<dyn Error>> {
        let mut intervals = Vec::new();

        if calendar_ids.is_empty() {
            for calendar in self.calendars.values() {
                collect_intervals(calendar, &mut intervals)?;
            }
        } else {
            for id in calendar_ids {
                let calendar = self
                    .calendars
                    .get(id)
                    .ok_or_else(|| format!("no freebusy data for calendar '{id}'"))?;
                collect_intervals(calendar, &mut intervals)?;
            }
        }

        Ok(intervals)
    }

    /// Merged busy timeline for a single calendar/resource id.
    ///
    /// Used as the room ranker's lookup; errors here exclude one room
    /// from the ranking rather than failing the whole command.
    pub fn timeline_for(&self, id: &str) -> Result<BusyTimeline, String> {
        let calendar = self
            .calendars
            .get(id)
            .ok_or_else(|| format!("no freebusy data for '{id}'"))?;

        let mut intervals = Vec::with_capacity(calendar.busy.len());
        for period in &calendar.busy {
            intervals.push(period.to_interval().map_err(|err| err.to_string())?);
        }
        Ok(BusyTimeline::merge(intervals))
    }
}

fn collect_intervals(
    calendar: &CalendarBusy,
    intervals: &mut Vec<TimeInterval>,
) -> Result<(), Box<dyn Error>> {
    for period in &calendar.busy {
        intervals.push(period.to_interval()?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "calendars": {
            "alice@example.com": {
                "busy": [
                    {"start": "2025-03-10T09:00:00+09:00", "end": "2025-03-10T10:00:00+09:00"}
                ]
            },
            "bob@example.com": {
                "busy": []
            }
        }
    }"#;

    #[test]
    fn test_parse_and_normalize() {
        let document: FreeBusyDocument = serde_json::from_str(DOCUMENT).unwrap();
        let intervals = document
            .intervals_for(&["alice@example.com".to_string()])
            .unwrap();

        assert_eq!(intervals.len(), 1);
        // +09:00 normalizes to midnight UTC
        assert_eq!(intervals[0].start().to_rfc3339(), "2025-03-10T00:00:00+00:00");
    }

    #[test]
    fn test_empty_selection_takes_all_calendars() {
        let document: FreeBusyDocument = serde_json::from_str(DOCUMENT).unwrap();
        let intervals = document.intervals_for(&[]).unwrap();
        assert_eq!(intervals.len(), 1);
    }

    #[test]
    fn test_missing_calendar_is_an_error() {
        let document: FreeBusyDocument = serde_json::from_str(DOCUMENT).unwrap();
        assert!(document
            .intervals_for(&["carol@example.com".to_string()])
            .is_err());
        assert!(document.timeline_for("carol@example.com").is_err());
    }

    #[test]
    fn test_timeline_for_merges() {
        let raw = r#"{
            "calendars": {
                "room": {
                    "busy": [
                        {"start": "2025-03-10T09:00:00Z", "end": "2025-03-10T10:00:00Z"},
                        {"start": "2025-03-10T09:45:00Z", "end": "2025-03-10T11:00:00Z"}
                    ]
                }
            }
        }"#;
        let document: FreeBusyDocument = serde_json::from_str(raw).unwrap();
        let timeline = document.timeline_for("room").unwrap();
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn test_inverted_period_rejected() {
        let raw = r#"{
            "calendars": {
                "x": {
                    "busy": [
                        {"start": "2025-03-10T11:00:00Z", "end": "2025-03-10T10:00:00Z"}
                    ]
                }
            }
        }"#;
        let document: FreeBusyDocument = serde_json::from_str(raw).unwrap();
        assert!(document.intervals_for(&[]).is_err());
        assert!(document.timeline_for("x").is_err());
    }
}
