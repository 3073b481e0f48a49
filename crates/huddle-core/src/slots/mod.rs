//! Free-slot scanning: query parameters and the day-by-day scanner.

mod query;
mod scanner;

pub use query::{AvailabilityQuery, LunchBreak, WorkingHours};
pub use scanner::{find_free_slots, FreeSlot};
