//! TOML-backed room catalog.
//!
//! The catalog is read-only configuration injected into ranking, never
//! a process-wide singleton. Deployments point at a `rooms.toml` of
//! `[[rooms]]` tables; [`RoomCatalog::builtin`] ships the default
//! office catalog for callers that don't.

use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::rooms::Room;

/// An ordered, read-only collection of bookable rooms.
///
/// Catalog order is meaningful: the ranker uses it as the final
/// tie-break for rooms equal on preference and capacity.
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    rooms: Vec<Room>,
}

impl RoomCatalog {
    /// Load a catalog from a `rooms.toml` file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|err| CatalogError::LoadFailed {
            path: path.to_path_buf(),
            source: err,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse a catalog from TOML text.
    ///
    /// # Errors
    /// Returns an error on malformed TOML or missing room fields.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Ok(Self { rooms: file.rooms })
    }

    /// Load from `path` when given, otherwise fall back to the built-in
    /// catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// The default office catalog.
    pub fn builtin() -> Self {
        fn room(
            name: &str,
            resource_id: &str,
            capacity: u32,
            kind: &str,
            location: &str,
            preferred: bool,
        ) -> Room {
            Room {
                name: name.to_string(),
                resource_id: resource_id.to_string(),
                capacity,
                kind: kind.to_string(),
                location: location.to_string(),
                preferred,
            }
        }

        Self {
            rooms: vec![
                // Preferred rooms, recommended first
                room(
                    "Silicon Valley",
                    "c_18841ts7pgvskhnujrglhn2jgnor8@resource.calendar.google.com",
                    8,
                    "medium",
                    "maumai",
                    true,
                ),
                room(
                    "Edmonton",
                    "c_1887lphdporkii72ll8hsid9uc410@resource.calendar.google.com",
                    6,
                    "medium",
                    "maumai",
                    true,
                ),
                // Headquarters
                room(
                    "Toronto",
                    "c_1881cvo6akpmqjvnm2oj3ht8r8vi6@resource.calendar.google.com",
                    10,
                    "large",
                    "maumai",
                    false,
                ),
                room(
                    "London",
                    "c_1886gsmm0vlrcjcbkqrjeui24cc04@resource.calendar.google.com",
                    8,
                    "medium",
                    "maumai",
                    false,
                ),
                room(
                    "NewYork",
                    "c_18875rvtng67ih2klnmjpnmi6qum4@resource.calendar.google.com",
                    8,
                    "medium",
                    "maumai",
                    false,
                ),
                room(
                    "Tokyo",
                    "c_18897kknt7a68hp0hkivg46asdv5u@resource.calendar.google.com",
                    8,
                    "medium",
                    "maumai",
                    false,
                ),
                room(
                    "CEO Room",
                    "c_1884i3n5hs7keh0fjogog6ktrc7qi@resource.calendar.google.com",
                    6,
                    "medium",
                    "maumai",
                    false,
                ),
                room(
                    "MUH Lounge",
                    "c_1882u8i9f1a5cgm2itn8eatrbkupg@resource.calendar.google.com",
                    100,
                    "lounge",
                    "maumai",
                    false,
                ),
                // CW building, 5th floor
                room(
                    "CW Board Room",
                    "c_1884c8tu594oihv3k31644040ljn4@resource.calendar.google.com",
                    8,
                    "conference",
                    "cw-5f",
                    false,
                ),
                room(
                    "CW Works",
                    "c_1887ur99i9ph2jobhss4ndhthstiq@resource.calendar.google.com",
                    10,
                    "conference",
                    "cw-5f",
                    false,
                ),
                // Teheran-ro annex
                room(
                    "Teheran Room 1",
                    "c_188e30525cst6grulqi28pconqt3q@resource.calendar.google.com",
                    6,
                    "conference",
                    "teheran-242-3",
                    false,
                ),
                // 4th floor, executive
                room(
                    "CEO Office",
                    "c_1888ejgvn5jjggjkgl77k8hg1hb52@resource.calendar.google.com",
                    10,
                    "executive",
                    "4f",
                    false,
                ),
                room(
                    "CTO Office",
                    "c_188akaaeo5ihkh9jmsbjjhq1m60ns@resource.calendar.google.com",
                    6,
                    "executive",
                    "4f",
                    false,
                ),
                room(
                    "Next Hall",
                    "c_188ajksptvrr6iq7g0mh4m07udno8@resource.calendar.google.com",
                    16,
                    "large",
                    "4f",
                    false,
                ),
            ],
        }
    }

    /// Rooms in catalog order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Look up a room by display name.
    pub fn find(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name == name)
    }
}
