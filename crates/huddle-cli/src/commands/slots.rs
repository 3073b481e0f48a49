use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::Args;
use serde::Serialize;

use huddle_core::{
    find_free_slots, AvailabilityQuery, BusyTimeline, FreeSlot, LunchBreak, WorkingHours,
};

use crate::commands::OutputFormat;
use crate::freebusy::FreeBusyDocument;

#[derive(Args)]
pub struct SlotsArgs {
    /// Freebusy JSON exported by the calendar fetch layer
    #[arg(long, value_name = "FILE")]
    pub busy: PathBuf,
    /// Attendee calendar ids (comma separated); defaults to every
    /// calendar in the busy file
    #[arg(long, value_delimiter = ',')]
    pub attendees: Vec<String>,
    /// First day to scan (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: NaiveDate,
    /// Last day to scan (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: NaiveDate,
    /// Meeting duration in minutes
    #[arg(long, default_value_t = 60)]
    pub duration: i64,
    /// Working hours (HH:MM-HH:MM)
    #[arg(long, default_value = "09:00-18:00")]
    pub working_hours: String,
    /// Lunch break (HH:MM-HH:MM)
    #[arg(long, default_value = "12:00-13:00")]
    pub lunch: String,
    /// Disable the lunch break
    #[arg(long)]
    pub no_lunch: bool,
    /// Candidate stride in minutes
    #[arg(long, default_value_t = 30)]
    pub stride: i64,
    /// Reference IANA timezone
    #[arg(long, default_value = "Asia/Seoul")]
    pub timezone: Tz,
    /// Keep only the first N slots
    #[arg(long, default_value_t = 3)]
    pub top: usize,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct SlotRecord {
    start: String,
    end: String,
    display: String,
}

pub fn run(args: SlotsArgs) -> Result<(), Box<dyn Error>> {
    let document = FreeBusyDocument::load(&args.busy)?;
    let intervals = document.intervals_for(&args.attendees)?;
    let timeline = BusyTimeline::merge(intervals);

    let mut query = AvailabilityQuery::new(args.start_date, args.end_date, args.duration)
        .with_calendars(args.attendees.iter().cloned())
        .with_working_hours(WorkingHours::parse(&args.working_hours)?)
        .with_stride(args.stride)
        .with_timezone(args.timezone);
    if !args.no_lunch {
        query = query.with_lunch_break(LunchBreak::parse(&args.lunch)?);
    }

    let slots = find_free_slots(&timeline, &query)?;
    let top: Vec<FreeSlot> = slots.into_iter().take(args.top).collect();

    match args.format {
        OutputFormat::Json => {
            let records: Vec<SlotRecord> = top
                .iter()
                .map(|slot| SlotRecord {
                    start: slot.start.with_timezone(&args.timezone).to_rfc3339(),
                    end: slot.end.with_timezone(&args.timezone).to_rfc3339(),
                    display: format_slot(slot, args.timezone),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Text => {
            if top.is_empty() {
                println!("No common free time found.");
                println!();
                if !args.attendees.is_empty() {
                    println!("Attendees: {}", args.attendees.join(", "));
                }
                println!("Range: {} ~ {}", args.start_date, args.end_date);
                println!("Duration: {} min", args.duration);
            } else {
                println!("Common free time (top {})", top.len());
                if !args.attendees.is_empty() {
                    println!("Attendees: {}", args.attendees.join(", "));
                }
                println!("Duration: {} min", args.duration);
                println!();
                for (i, slot) in top.iter().enumerate() {
                    println!("  {}. {}", i + 1, format_slot(slot, args.timezone));
                }

                // First slot echoed in a machine-friendly block for
                // scripts that chain into booking
                let first = &top[0];
                let start = first.start.with_timezone(&args.timezone);
                let end = first.end.with_timezone(&args.timezone);
                println!();
                println!("Recommended: {}", format_slot(first, args.timezone));
                println!("   start: {}", start.format("%Y-%m-%dT%H:%M:%S"));
                println!("   end:   {}", end.format("%Y-%m-%dT%H:%M:%S"));
            }
        }
    }
    Ok(())
}

/// Render a slot like `03/10 (Mon) 11:00 ~ 12:00` in the reference
/// timezone.
fn format_slot(slot: &FreeSlot, tz: Tz) -> String {
    let start = slot.start.with_timezone(&tz);
    let end = slot.end.with_timezone(&tz);
    format!(
        "{} ({}) {} ~ {}",
        start.format("%m/%d"),
        start.format("%a"),
        start.format("%H:%M"),
        end.format("%H:%M")
    )
}
