//! Tie model — one fixture between a home and away team within a round.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{CalendarEventId, EntityId, LeagueId, MatchFormat, Rubber, RubberKind, Side, TeamId, TieId};

/// Round number used for semi-final ties.
pub const SEMI_FINAL_ROUND: u32 = 100;

/// Round number used for the final tie.
pub const FINAL_ROUND: u32 = 200;

/// Tie lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieStatus {
    Scheduled,
    Completed,
    Walkover,
}

impl TieStatus {
    /// Completed and walkover ties both count as decided for standings.
    pub fn is_decided(&self) -> bool {
        matches!(self, TieStatus::Completed | TieStatus::Walkover)
    }
}

/// Rubbers, sets and games won by one side, aggregated over a tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTally {
    pub rubbers: u32,
    pub sets: u32,
    pub games: u32,
}

/// Aggregated per-side tallies for a tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieStats {
    pub home: SideTally,
    pub away: SideTally,
}

/// Rubbers won per side; the tie-level result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieScore {
    pub home: u32,
    pub away: u32,
}

/// Record of a whole-tie walkover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkoverRecord {
    pub winner: Side,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// One fixture between two teams within a league round.
///
/// Created by the fixture or playoff generator; mutated by the external
/// scoring workflow; read by the standings calculator once decided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tie {
    /// Unique identifier (derived from league + round + home + away)
    pub id: TieId,

    /// League this tie belongs to
    pub league_id: LeagueId,

    /// Match day number: 1..N for the regular season, 100 for
    /// semi-finals, 200 for the final
    pub round: u32,

    pub home_team_id: TeamId,

    pub away_team_id: TeamId,

    /// Scheduled match day
    pub scheduled_date: NaiveDate,

    /// Venue; defaults to the home team's venue
    pub venue: String,

    pub status: TieStatus,

    /// Rubber shells fixed by the league's match format at creation
    pub rubbers: Vec<Rubber>,

    /// Aggregated per-side tallies, derived from the rubbers
    #[serde(default)]
    pub stats: TieStats,

    /// Rubbers won per side, derived from the rubbers
    #[serde(default)]
    pub score: TieScore,

    /// Calendar event that supplied the scheduled date, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_event_id: Option<CalendarEventId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postponement_reason: Option<String>,

    /// Present once a whole-tie walkover has been recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walkover: Option<WalkoverRecord>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Tie {
    /// Create a new scheduled Tie with fresh rubber shells for the format.
    pub fn new(
        league_id: LeagueId,
        round: u32,
        home_team_id: TeamId,
        away_team_id: TeamId,
        scheduled_date: NaiveDate,
        venue: String,
        format: MatchFormat,
    ) -> Self {
        let id = EntityId::generate(&[
            league_id.as_str(),
            &round.to_string(),
            home_team_id.as_str(),
            away_team_id.as_str(),
        ]);

        Self {
            id,
            league_id,
            round,
            home_team_id,
            away_team_id,
            scheduled_date,
            venue,
            status: TieStatus::Scheduled,
            rubbers: rubber_shells(format),
            stats: TieStats::default(),
            score: TieScore::default(),
            calendar_event_id: None,
            notes: None,
            postponement_reason: None,
            walkover: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to link the originating calendar event.
    pub fn with_calendar_event(mut self, event_id: CalendarEventId) -> Self {
        self.calendar_event_id = Some(event_id);
        self
    }

    /// Builder method to set notes.
    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Whether this is a playoff tie rather than a season fixture.
    pub fn is_playoff(&self) -> bool {
        self.round >= SEMI_FINAL_ROUND
    }

    /// Whether the given team plays in this tie.
    pub fn involves(&self, team_id: &TeamId) -> bool {
        &self.home_team_id == team_id || &self.away_team_id == team_id
    }
}

/// Fresh not-started rubber shells for a match format, singles first.
pub fn rubber_shells(format: MatchFormat) -> Vec<Rubber> {
    let mut rubbers = Vec::with_capacity(format.rubber_count());
    for n in 1..=format.singles_count() {
        rubbers.push(Rubber::shell(RubberKind::Singles, n));
    }
    for n in 1..=format.doubles_count() {
        rubbers.push(Rubber::shell(RubberKind::Doubles, n));
    }
    rubbers
}
