//! League fixture scheduling and standings engine.
//!
//! The combinatorial and ranking core of the service:
//! - **fixtures**: circle-method round-robin generation, calendar- or
//!   interval-driven, with a mirrored variant for sibling leagues
//! - **standings**: aggregation of decided ties into a ranked table
//! - **cache**: short-TTL standings memo with explicit invalidation
//! - **playoffs**: cross-region semi-final/final bracket derivation
//! - **score**: set-score validation and tie score derivation
//! - **access**: mutation authorization predicate

pub mod access;
pub mod cache;
pub mod fixtures;
pub mod playoffs;
pub mod score;
pub mod standings;

use thiserror::Error;

/// Errors produced by the engine. Validation and capacity failures are
/// detected before any mutation; generation either writes the full batch
/// of ties or nothing.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("league needs at least two teams to generate fixtures")]
    NoTeams,

    #[error("fixtures already exist for this league; delete them before regenerating")]
    FixturesExist,

    #[error("not enough league match days on the calendar: need {needed}, found {found}")]
    InsufficientScheduleDates { needed: usize, found: usize },

    #[error("playoff ties already exist for this league")]
    PlayoffsExist,

    #[error("playoffs need at least two ranked teams per region, {region} has {found}")]
    InsufficientStandings { region: String, found: usize },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),
}
