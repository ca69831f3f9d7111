pub mod health;
pub mod leagues;
pub mod playoffs;
pub mod standings;
pub mod ties;

use serde::Serialize;

use crate::models::{Rubber, RubberStatus, SetScore, Side, Team, Tie, TieScore, TieStatus};
use crate::storage::team_name;

/// Wire representation of a tie, shared by the fixture, scoring and
/// playoff endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TieSummary {
    pub id: String,
    pub round: u32,
    pub home_team: String,
    pub away_team: String,
    pub scheduled_date: String,
    pub venue: String,
    pub status: TieStatus,
    pub score: TieScore,
    pub rubbers: Vec<RubberSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RubberSummary {
    pub label: String,
    pub status: RubberStatus,
    pub sets: Vec<SetScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
}

impl TieSummary {
    pub fn from_tie(tie: &Tie, teams: &[Team]) -> Self {
        Self {
            id: tie.id.to_string(),
            round: tie.round,
            home_team: team_name(teams, &tie.home_team_id),
            away_team: team_name(teams, &tie.away_team_id),
            scheduled_date: tie.scheduled_date.to_string(),
            venue: tie.venue.clone(),
            status: tie.status,
            score: tie.score,
            rubbers: tie.rubbers.iter().map(RubberSummary::from_rubber).collect(),
            notes: tie.notes.clone(),
        }
    }
}

impl RubberSummary {
    pub fn from_rubber(rubber: &Rubber) -> Self {
        Self {
            label: rubber.label(),
            status: rubber.status,
            sets: rubber.sets.clone(),
            winner: rubber.winner,
        }
    }
}
