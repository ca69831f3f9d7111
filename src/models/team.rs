//! Team model — a club participating in a league.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, TeamId};

/// A club acting as a league participant. External to the engine:
/// registration approval creates these, the engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    pub id: TeamId,

    /// Club name, e.g. "Riverside LTC". Mirrored-schedule matching and
    /// the access gate both compare this case-insensitively.
    pub name: String,

    /// Home venue address line; falls back to the club name when absent
    pub home_venue: Option<String>,

    /// Contact name of the club official, if registered
    pub club_official: Option<String>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new Team with a random ID.
    pub fn new(name: String) -> Self {
        Self {
            id: EntityId::random(),
            name,
            home_venue: None,
            club_official: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set the home venue.
    pub fn with_home_venue(mut self, venue: String) -> Self {
        self.home_venue = Some(venue);
        self
    }

    /// Builder method to set the club official contact.
    pub fn with_club_official(mut self, official: String) -> Self {
        self.club_official = Some(official);
        self
    }

    /// The venue ties at this club default to.
    pub fn venue(&self) -> &str {
        self.home_venue.as_deref().unwrap_or(&self.name)
    }

    /// Case-insensitive club name match, used by mirrored scheduling and
    /// the access gate.
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(other.trim())
    }
}
