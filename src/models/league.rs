//! League model — a season-long team competition within one region.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, LeagueId, TeamId};

/// League gender division. Men's and women's leagues in the same region
/// and year are siblings for scheduling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    /// The opposite division, used to locate a sibling league.
    pub fn opposite(&self) -> Self {
        match self {
            Gender::Men => Gender::Women,
            Gender::Women => Gender::Men,
        }
    }
}

/// League lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueStatus {
    Upcoming,
    Active,
    Completed,
}

/// Match format code fixing the rubber count and types of every tie
/// in a league. Frozen at tie creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchFormat {
    /// Two singles, one doubles
    #[serde(rename = "2S1D")]
    TwoSinglesOneDoubles,
    /// Three singles, two doubles
    #[serde(rename = "3S2D")]
    ThreeSinglesTwoDoubles,
    /// Four singles, two doubles
    #[serde(rename = "4S2D")]
    FourSinglesTwoDoubles,
}

impl MatchFormat {
    /// Wire code as used in league settings.
    pub fn code(&self) -> &'static str {
        match self {
            MatchFormat::TwoSinglesOneDoubles => "2S1D",
            MatchFormat::ThreeSinglesTwoDoubles => "3S2D",
            MatchFormat::FourSinglesTwoDoubles => "4S2D",
        }
    }

    /// Number of singles rubbers in this format.
    pub fn singles_count(&self) -> u8 {
        match self {
            MatchFormat::TwoSinglesOneDoubles => 2,
            MatchFormat::ThreeSinglesTwoDoubles => 3,
            MatchFormat::FourSinglesTwoDoubles => 4,
        }
    }

    /// Number of doubles rubbers in this format.
    pub fn doubles_count(&self) -> u8 {
        match self {
            MatchFormat::TwoSinglesOneDoubles => 1,
            MatchFormat::ThreeSinglesTwoDoubles => 2,
            MatchFormat::FourSinglesTwoDoubles => 2,
        }
    }

    /// Total rubbers per tie.
    pub fn rubber_count(&self) -> usize {
        (self.singles_count() + self.doubles_count()) as usize
    }
}

/// Points and format settings for a league.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSettings {
    #[serde(default = "default_points_for_win")]
    pub points_for_win: i64,

    #[serde(default = "default_points_for_draw")]
    pub points_for_draw: i64,

    #[serde(default)]
    pub points_for_loss: i64,

    #[serde(default = "default_match_format")]
    pub match_format: MatchFormat,

    #[serde(default = "default_number_of_rounds")]
    pub number_of_rounds: u32,
}

fn default_points_for_win() -> i64 {
    2
}

fn default_points_for_draw() -> i64 {
    1
}

fn default_match_format() -> MatchFormat {
    MatchFormat::ThreeSinglesTwoDoubles
}

fn default_number_of_rounds() -> u32 {
    1
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            points_for_win: default_points_for_win(),
            points_for_draw: default_points_for_draw(),
            points_for_loss: 0,
            match_format: default_match_format(),
            number_of_rounds: default_number_of_rounds(),
        }
    }
}

/// A team league for one region, gender and season year.
///
/// Created and administered outside the engine; the engine only reads it
/// (team order, settings, status) and writes ties that reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    /// Unique identifier (derived from name + region + gender + year)
    pub id: LeagueId,

    /// Display name, e.g. "Surrey Division 1"
    pub name: String,

    /// Season year
    pub season_year: i32,

    /// Region the league belongs to, e.g. "north"
    pub region: String,

    /// Gender division
    pub gender: Gender,

    /// Participating teams, in registration order
    pub team_ids: Vec<TeamId>,

    /// Points and format settings
    #[serde(default)]
    pub settings: LeagueSettings,

    /// Lifecycle status
    pub status: LeagueStatus,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl League {
    /// Create a new League with auto-generated ID.
    pub fn new(name: String, season_year: i32, region: String, gender: Gender) -> Self {
        let gender_str = match gender {
            Gender::Men => "men",
            Gender::Women => "women",
        };
        let id = EntityId::generate(&[&name, &region, gender_str, &season_year.to_string()]);

        Self {
            id,
            name,
            season_year,
            region,
            gender,
            team_ids: Vec::new(),
            settings: LeagueSettings::default(),
            status: LeagueStatus::Upcoming,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set participating teams.
    pub fn with_teams(mut self, team_ids: Vec<TeamId>) -> Self {
        self.team_ids = team_ids;
        self
    }

    /// Builder method to set settings.
    pub fn with_settings(mut self, settings: LeagueSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder method to set status.
    pub fn with_status(mut self, status: LeagueStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether a sibling league in this status may serve as a mirror
    /// source for fixture generation.
    pub fn is_schedulable(&self) -> bool {
        matches!(self.status, LeagueStatus::Upcoming | LeagueStatus::Active)
    }

    /// Whether this league has play underway or finished, which is what
    /// playoff generation requires.
    pub fn has_started(&self) -> bool {
        matches!(self.status, LeagueStatus::Active | LeagueStatus::Completed)
    }
}
