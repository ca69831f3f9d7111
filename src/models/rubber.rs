//! Rubber model — one singles or doubles match inside a tie.

use serde::{Deserialize, Serialize};

/// Which side of a tie a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(&self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Singles or doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubberKind {
    Singles,
    Doubles,
}

/// Rubber lifecycle status. The terminal states all decide the rubber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubberStatus {
    NotStarted,
    InProgress,
    Completed,
    Retired,
    Walkover,
    Defaulted,
}

impl RubberStatus {
    /// Whether this status decides the rubber. A tie auto-completes once
    /// every rubber is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RubberStatus::Completed
                | RubberStatus::Retired
                | RubberStatus::Walkover
                | RubberStatus::Defaulted
        )
    }
}

/// Tiebreak detail recorded alongside a 7-6 set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tiebreak {
    pub played: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_points: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_points: Option<u32>,
}

/// One set's score within a rubber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetScore {
    pub home_games: u32,
    pub away_games: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiebreak: Option<Tiebreak>,
}

impl SetScore {
    pub fn new(home_games: u32, away_games: u32) -> Self {
        Self {
            home_games,
            away_games,
            tiebreak: None,
        }
    }

    pub fn with_tiebreak(mut self, played: bool) -> Self {
        self.tiebreak = Some(Tiebreak {
            played,
            home_points: None,
            away_points: None,
        });
        self
    }

    /// The side that took this set, if the games differ.
    pub fn winner(&self) -> Option<Side> {
        match self.home_games.cmp(&self.away_games) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// One singles or doubles match inside a tie.
///
/// The rubber shell (kind + position) is fixed by the league's match
/// format at tie creation and never changes; the external scoring
/// workflow fills in sets, status and winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubber {
    pub kind: RubberKind,

    /// 1-based position within rubbers of the same kind
    pub position: u8,

    pub status: RubberStatus,

    #[serde(default)]
    pub sets: Vec<SetScore>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
}

impl Rubber {
    /// A fresh not-started shell.
    pub fn shell(kind: RubberKind, position: u8) -> Self {
        Self {
            kind,
            position,
            status: RubberStatus::NotStarted,
            sets: Vec::new(),
            winner: None,
        }
    }

    /// Display label, e.g. "Singles 2".
    pub fn label(&self) -> String {
        match self.kind {
            RubberKind::Singles => format!("Singles {}", self.position),
            RubberKind::Doubles => format!("Doubles {}", self.position),
        }
    }
}
