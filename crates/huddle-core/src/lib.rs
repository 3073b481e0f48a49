//! # Huddle Core Library
//!
//! Availability resolution for meeting scheduling: given the busy
//! intervals of several independent calendars (people and rooms), find
//! the windows where everyone is simultaneously free, and rank the
//! rooms fit for a chosen window.
//!
//! The library is computationally pure: no I/O, no clock reads, no
//! shared state. The calling layer fetches busy data (concurrently if
//! it likes), joins it, and hands finished inputs to three operations:
//!
//! - [`BusyTimeline::merge`]: normalize raw busy intervals into one
//!   sorted, non-overlapping timeline
//! - [`find_free_slots`]: scan a date range for candidate slots that
//!   avoid weekends, lunch, and the merged timeline
//! - [`rank_available_rooms`]: filter and rank a room catalog against
//!   per-room timelines for a single window
//!
//! Every invocation works on its own inputs and returns freshly
//! allocated results, so calls are safe to issue from multiple threads
//! without locking.

pub mod error;
pub mod interval;
pub mod rooms;
pub mod slots;

pub use error::{CatalogError, CoreError, ValidationError};
pub use interval::{BusyTimeline, TimeInterval};
pub use rooms::{rank_available_rooms, RankedRoom, Room, RoomCatalog, RoomFilters};
pub use slots::{find_free_slots, AvailabilityQuery, FreeSlot, LunchBreak, WorkingHours};
