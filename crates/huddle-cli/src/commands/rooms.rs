use std::error::Error;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use clap::Args;

use huddle_core::{rank_available_rooms, RoomCatalog, RoomFilters, TimeInterval};

use crate::commands::OutputFormat;
use crate::freebusy::FreeBusyDocument;

#[derive(Args)]
pub struct RoomsArgs {
    /// Freebusy JSON covering the room resource calendars
    #[arg(long, value_name = "FILE")]
    pub busy: PathBuf,
    /// Window start, wall clock in the reference timezone
    /// (YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub start: NaiveDateTime,
    /// Window end, wall clock in the reference timezone
    #[arg(long)]
    pub end: NaiveDateTime,
    /// Minimum seat count; 0 disables the filter
    #[arg(long, default_value_t = 0)]
    pub min_capacity: u32,
    /// Keep only preferred rooms
    #[arg(long)]
    pub preferred_only: bool,
    /// Exact location match
    #[arg(long)]
    pub location: Option<String>,
    /// Room catalog TOML; defaults to the built-in catalog
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
    /// Reference IANA timezone
    #[arg(long, default_value = "Asia/Seoul")]
    pub timezone: Tz,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(args: RoomsArgs) -> Result<(), Box<dyn Error>> {
    let document = FreeBusyDocument::load(&args.busy)?;
    let catalog = RoomCatalog::load_or_builtin(args.catalog.as_deref())?;

    let window = TimeInterval::new(
        localize(args.start, args.timezone)?,
        localize(args.end, args.timezone)?,
    )?;

    let filters = RoomFilters {
        min_capacity: args.min_capacity,
        preferred_only: args.preferred_only,
        location: args.location.clone(),
    };

    let ranked = rank_available_rooms(
        catalog.rooms(),
        &window,
        |id| document.timeline_for(id),
        &filters,
    );

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
        OutputFormat::Text => {
            if ranked.is_empty() {
                println!("No rooms available.");
                println!();
                println!("Window: {} ~ {}", args.start, args.end);
            } else {
                println!("Available rooms ({})", ranked.len());
                println!("Window: {} ~ {}", args.start, args.end);
                println!();
                for (i, entry) in ranked.iter().enumerate() {
                    let preferred = if entry.room.preferred { " *" } else { "" };
                    println!(
                        "  {}. {} ({} seats) [{}] @ {}{}",
                        i + 1,
                        entry.room.name,
                        entry.room.capacity,
                        entry.room.kind,
                        entry.room.location,
                        preferred
                    );
                    println!("     id: {}", entry.room.resource_id);
                }
            }
        }
    }
    Ok(())
}

/// Resolve a wall-clock time in `tz` to a UTC instant. Ambiguous local
/// times (DST fall-back) resolve to the earliest instant.
fn localize(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, Box<dyn Error>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("{naive} does not exist in {tz}").into())
}
