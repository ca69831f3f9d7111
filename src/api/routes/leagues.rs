use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{EntityId, Gender, League, LeagueStatus};
use crate::storage::{read_league, read_league_teams, read_leagues};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSummary {
    pub id: String,
    pub name: String,
    pub season_year: i32,
    pub region: String,
    pub gender: Gender,
    pub status: LeagueStatus,
    pub team_count: usize,
}

#[derive(Debug, Serialize)]
pub struct LeagueListResponse {
    pub leagues: Vec<LeagueSummary>,
}

fn summarize(league: &League) -> LeagueSummary {
    LeagueSummary {
        id: league.id.to_string(),
        name: league.name.clone(),
        season_year: league.season_year,
        region: league.region.clone(),
        gender: league.gender,
        status: league.status,
        team_count: league.team_ids.len(),
    }
}

pub async fn list_leagues(
    State(state): State<AppState>,
) -> Result<Json<LeagueListResponse>, ApiError> {
    let mut leagues = read_leagues(&state.storage)?;
    leagues.sort_by(|a, b| {
        b.season_year
            .cmp(&a.season_year)
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(Json(LeagueListResponse {
        leagues: leagues.iter().map(summarize).collect(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueDetailResponse {
    pub id: String,
    pub name: String,
    pub season_year: i32,
    pub region: String,
    pub gender: Gender,
    pub status: LeagueStatus,
    pub match_format: String,
    pub number_of_rounds: u32,
    pub teams: Vec<TeamSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
    pub home_venue: Option<String>,
}

pub async fn get_league(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LeagueDetailResponse>, ApiError> {
    let league = read_league(&state.storage, &EntityId::from(id.as_str()))?
        .ok_or_else(|| ApiError::NotFound(format!("League not found: {}", id)))?;
    let teams = read_league_teams(&state.storage, &league)?;

    Ok(Json(LeagueDetailResponse {
        id: league.id.to_string(),
        name: league.name.clone(),
        season_year: league.season_year,
        region: league.region.clone(),
        gender: league.gender,
        status: league.status,
        match_format: league.settings.match_format.code().to_string(),
        number_of_rounds: league.settings.number_of_rounds,
        teams: teams
            .iter()
            .map(|t| TeamSummary {
                id: t.id.to_string(),
                name: t.name.clone(),
                home_venue: t.home_venue.clone(),
            })
            .collect(),
    }))
}
