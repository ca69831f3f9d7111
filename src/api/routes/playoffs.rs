use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::api::identity::identity_from_headers;
use crate::api::routes::TieSummary;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::engine::access::can_administer_league;
use crate::engine::playoffs::{find_sibling_league, generate_playoffs as build_bracket, playoff_dates};
use crate::engine::standings::compute_standings;
use crate::models::{EntityId, League, StandingsEntry};
use crate::storage::{
    append_ties, read_league, read_league_teams, read_league_ties, read_leagues, read_teams,
    upcoming_league_days,
};

fn load_league(state: &AppState, id: &str) -> Result<League, ApiError> {
    read_league(&state.storage, &EntityId::from(id))?
        .ok_or_else(|| ApiError::NotFound(format!("League not found: {}", id)))
}

/// Standings for a league, served from the cache when fresh.
fn standings_for(state: &AppState, league: &League) -> Result<Vec<StandingsEntry>, ApiError> {
    if let Some(entries) = state.standings_cache.get(league.id.as_str()) {
        return Ok(entries);
    }
    let teams = read_league_teams(&state.storage, league)?;
    let ties = read_league_ties(&state.storage, &league.id)?;
    let entries = compute_standings(league, &teams, &ties);
    state
        .standings_cache
        .put(league.id.as_str(), entries.clone());
    Ok(entries)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlayoffsResponse {
    pub created: usize,
    pub sibling_league: String,
    pub ties: Vec<TieSummary>,
}

pub async fn generate_playoffs(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<GeneratePlayoffsResponse>), ApiError> {
    let identity = identity_from_headers(&headers);
    if !can_administer_league(&identity) {
        return Err(ApiError::Authorization(
            "playoff generation requires a staff or administrator role".to_string(),
        ));
    }

    let league = load_league(&state, &id)?;
    let existing = read_league_ties(&state.storage, &league.id)?;

    let leagues = read_leagues(&state.storage)?;
    let sibling = find_sibling_league(&league, &leagues)?;

    let home_standings = standings_for(&state, &league)?;
    let away_standings = standings_for(&state, sibling)?;

    let today = Utc::now().date_naive();
    let upcoming: Vec<chrono::NaiveDate> =
        upcoming_league_days(&state.storage, &league.region, today)?
            .iter()
            .map(|e| e.date)
            .collect();
    let dates = playoff_dates(&upcoming, today);

    let teams = read_teams(&state.storage)?;
    let ties = build_bracket(
        &league,
        &existing,
        &home_standings,
        &away_standings,
        &sibling.region,
        &teams,
        dates,
    )?;

    append_ties(&state.storage, &ties)?;
    info!(
        "Created playoff bracket for league {} against {}",
        league.id, sibling.id
    );

    Ok((
        StatusCode::CREATED,
        Json(GeneratePlayoffsResponse {
            created: ties.len(),
            sibling_league: sibling.id.to_string(),
            ties: ties
                .iter()
                .map(|t| TieSummary::from_tie(t, &teams))
                .collect(),
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct PlayoffListResponse {
    pub ties: Vec<TieSummary>,
}

pub async fn list_playoffs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayoffListResponse>, ApiError> {
    let league = load_league(&state, &id)?;
    let teams = read_teams(&state.storage)?;

    let mut ties: Vec<_> = read_league_ties(&state.storage, &league.id)?
        .into_iter()
        .filter(|t| t.is_playoff())
        .collect();
    ties.sort_by_key(|t| (t.round, t.scheduled_date));

    Ok(Json(PlayoffListResponse {
        ties: ties.iter().map(|t| TieSummary::from_tie(t, &teams)).collect(),
    }))
}
