//! Derived standings models. Never persisted; recomputed from scratch
//! on every cache miss.

use serde::{Deserialize, Serialize};

use super::TeamId;

/// One team's row in a league standings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsEntry {
    pub team_id: TeamId,
    pub team_name: String,

    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,

    pub rubbers_for: u32,
    pub rubbers_against: u32,
    pub sets_for: u32,
    pub sets_against: u32,
    pub games_for: u32,
    pub games_against: u32,

    pub points: i64,
}

impl StandingsEntry {
    pub fn new(team_id: TeamId, team_name: String) -> Self {
        Self {
            team_id,
            team_name,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            rubbers_for: 0,
            rubbers_against: 0,
            sets_for: 0,
            sets_against: 0,
            games_for: 0,
            games_against: 0,
            points: 0,
        }
    }

    pub fn rubber_difference(&self) -> i64 {
        self.rubbers_for as i64 - self.rubbers_against as i64
    }

    pub fn set_difference(&self) -> i64 {
        self.sets_for as i64 - self.sets_against as i64
    }

    pub fn game_difference(&self) -> i64 {
        self.games_for as i64 - self.games_against as i64
    }
}

/// Head-to-head record between an ordered pair of teams, accumulated
/// while scanning ties and discarded after the sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadToHead {
    pub played: u32,
    /// Wins minus losses from the first team's perspective
    pub net: i32,
}
