//! Calendar event model — the federation calendar consumed for league
//! match days and playoff dates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{CalendarEventId, EntityId};

/// Calendar event kind. The engine only consumes `League` match days;
/// other kinds pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEventType {
    League,
    Tournament,
    Social,
    Training,
}

/// An entry in the federation calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: CalendarEventId,

    pub event_type: CalendarEventType,

    pub date: NaiveDate,

    pub title: String,

    /// Region the event applies to; None means federation-wide
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl CalendarEvent {
    pub fn new(event_type: CalendarEventType, date: NaiveDate, title: String) -> Self {
        Self {
            id: EntityId::random(),
            event_type,
            date,
            title,
            region: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to scope the event to a region.
    pub fn with_region(mut self, region: String) -> Self {
        self.region = Some(region);
        self
    }

    /// Whether this event supplies a match day for the given region:
    /// a league-typed event that is federation-wide or in that region.
    pub fn is_league_day_for(&self, region: &str) -> bool {
        self.event_type == CalendarEventType::League
            && self
                .region
                .as_deref()
                .map(|r| r.eq_ignore_ascii_case(region))
                .unwrap_or(true)
    }
}
