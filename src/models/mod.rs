//! Core data models for the league engine.

mod calendar;
mod ids;
mod league;
mod rubber;
mod standings;
mod team;
mod tie;

pub use calendar::*;
pub use ids::*;
pub use league::*;
pub use rubber::*;
pub use standings::*;
pub use team::*;
pub use tie::*;
