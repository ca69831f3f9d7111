use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::engine::standings::compute_standings;
use crate::models::{EntityId, StandingsEntry};
use crate::storage::{read_league, read_league_teams, read_league_ties};

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub data: Vec<StandingsEntry>,
    pub cached: bool,
}

pub async fn get_standings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let league_id = EntityId::from(id.as_str());
    let league = read_league(&state.storage, &league_id)?
        .ok_or_else(|| ApiError::NotFound(format!("League not found: {}", id)))?;

    if let Some(data) = state.standings_cache.get(league.id.as_str()) {
        return Ok(Json(StandingsResponse { data, cached: true }));
    }

    let teams = read_league_teams(&state.storage, &league)?;
    let ties = read_league_ties(&state.storage, &league.id)?;
    let data = compute_standings(&league, &teams, &ties);

    state.standings_cache.put(league.id.as_str(), data.clone());
    Ok(Json(StandingsResponse {
        data,
        cached: false,
    }))
}
