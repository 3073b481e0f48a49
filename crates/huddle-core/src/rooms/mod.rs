//! Room filtering and availability ranking.
//!
//! The catalog is injected, read-only reference data; the ranker
//! filters it, checks each survivor against its own busy timeline, and
//! orders the available rooms by a fixed business policy: preferred
//! rooms first, then larger capacity, then catalog order.

mod catalog;

pub use catalog::RoomCatalog;

use serde::{Deserialize, Serialize};

use crate::interval::{BusyTimeline, TimeInterval};

/// A bookable room from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Calendar resource id used for freebusy lookups.
    pub resource_id: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    #[serde(default)]
    pub preferred: bool,
}

/// Conjunctive filters applied before any availability check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilters {
    /// Minimum capacity; 0 disables the filter.
    #[serde(default)]
    pub min_capacity: u32,
    /// Keep only rooms flagged as preferred.
    #[serde(default)]
    pub preferred_only: bool,
    /// Exact location match.
    #[serde(default)]
    pub location: Option<String>,
}

impl RoomFilters {
    fn matches(&self, room: &Room) -> bool {
        if self.min_capacity > 0 && room.capacity < self.min_capacity {
            return false;
        }
        if self.preferred_only && !room.preferred {
            return false;
        }
        if let Some(location) = &self.location {
            if &room.location != location {
                return false;
            }
        }
        true
    }
}

/// A room that passed filtering and the availability check.
#[derive(Debug, Clone, Serialize)]
pub struct RankedRoom {
    #[serde(flatten)]
    pub room: Room,
    pub available: bool,
}

/// Rank the rooms available for `window`.
///
/// `busy_lookup` supplies each room's own merged busy timeline, keyed
/// by resource id. The caller fetches those timelines however it likes
/// (typically fanned out concurrently); by the time this runs, every
/// input is present. A lookup that fails excludes that room from the
/// output without aborting the batch.
///
/// Ordering is a stable sort on `(not preferred, -capacity)`: a small
/// preferred room outranks a large non-preferred one, and rooms tied on
/// both keys keep their catalog order.
pub fn rank_available_rooms<F, E>(
    catalog: &[Room],
    window: &TimeInterval,
    mut busy_lookup: F,
    filters: &RoomFilters,
) -> Vec<RankedRoom>
where
    F: FnMut(&str) -> Result<BusyTimeline, E>,
    E: std::fmt::Display,
{
    let mut ranked: Vec<RankedRoom> = catalog
        .iter()
        .filter(|room| filters.matches(room))
        .filter_map(|room| match busy_lookup(&room.resource_id) {
            Ok(timeline) if timeline.is_free(window.start(), window.end()) => Some(RankedRoom {
                room: room.clone(),
                available: true,
            }),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(room = %room.name, error = %err, "freebusy lookup failed, excluding room");
                None
            }
        })
        .collect();

    ranked.sort_by_key(|r| (!r.room.preferred, std::cmp::Reverse(r.room.capacity)));
    ranked
}
