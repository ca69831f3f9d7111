//! # League Engine
//!
//! Fixture scheduling and standings engine for a national tennis
//! federation's team leagues.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (leagues, teams, ties, rubbers, standings)
//! - **engine**: Fixture generation, standings calculation, caching,
//!   playoff brackets, scoring rules and the access gate
//! - **storage**: JSONL document store operations
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod engine;
pub mod models;
pub mod storage;

pub use models::*;
