use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::identity::identity_from_headers;
use crate::api::routes::TieSummary;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::engine::access::{can_administer_league, can_score_tie};
use crate::engine::fixtures::{generate_fixtures, mirror_fixtures, ScheduleSource, DEFAULT_INTERVAL_DAYS};
use crate::engine::score::{
    apply_walkover, refresh_tie, rubber_winner_from_sets, validate_rubber_submission,
};
use crate::models::{EntityId, League, RubberStatus, SetScore, Side, Team, Tie, TieStatus};
use crate::storage::{
    append_ties, read_league, read_league_teams, read_league_ties, read_leagues, read_teams,
    read_tie, team_name, update_tie as store_tie, upcoming_league_days,
};

fn load_league(state: &AppState, id: &str) -> Result<League, ApiError> {
    read_league(&state.storage, &EntityId::from(id))?
        .ok_or_else(|| ApiError::NotFound(format!("League not found: {}", id)))
}

fn load_tie(state: &AppState, league: &League, tie_id: &str) -> Result<Tie, ApiError> {
    read_tie(&state.storage, &league.id, &EntityId::from(tie_id))?
        .ok_or_else(|| ApiError::NotFound(format!("Tie not found: {}", tie_id)))
}

fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    value.parse::<NaiveDate>().map_err(|_| {
        ApiError::Validation(format!("invalid date {:?}, expected YYYY-MM-DD", value))
    })
}

// ── List fixtures ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TieListResponse {
    pub ties: Vec<TieSummary>,
}

pub async fn list_ties(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TieListResponse>, ApiError> {
    let league = load_league(&state, &id)?;
    let teams = read_teams(&state.storage)?;

    let mut ties: Vec<Tie> = read_league_ties(&state.storage, &league.id)?
        .into_iter()
        .filter(|t| !t.is_playoff())
        .collect();
    ties.sort_by(|a, b| {
        a.round
            .cmp(&b.round)
            .then_with(|| a.scheduled_date.cmp(&b.scheduled_date))
    });

    Ok(Json(TieListResponse {
        ties: ties.iter().map(|t| TieSummary::from_tie(t, &teams)).collect(),
    }))
}

// ── Fixture generation ───────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTiesRequest {
    /// First match day for interval-driven scheduling; defaults to today
    pub start_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTiesResponse {
    pub created: usize,
    pub mirrored: bool,
    pub ties: Vec<TieSummary>,
}

/// Locate a sibling league whose schedule this league must mirror:
/// opposite gender, same region and year, still schedulable, and with
/// season ties already generated.
fn find_mirror_source(
    state: &AppState,
    league: &League,
) -> Result<Option<(League, Vec<Tie>, Vec<Team>)>, ApiError> {
    let leagues = read_leagues(&state.storage)?;
    let sibling = leagues.into_iter().find(|l| {
        l.id != league.id
            && l.gender == league.gender.opposite()
            && l.season_year == league.season_year
            && l.region.eq_ignore_ascii_case(&league.region)
            && l.is_schedulable()
    });

    let Some(sibling) = sibling else {
        return Ok(None);
    };
    let ties: Vec<Tie> = read_league_ties(&state.storage, &sibling.id)?
        .into_iter()
        .filter(|t| !t.is_playoff())
        .collect();
    if ties.is_empty() {
        return Ok(None);
    }
    let teams = read_league_teams(&state.storage, &sibling)?;
    Ok(Some((sibling, ties, teams)))
}

pub async fn generate_ties(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Option<Json<GenerateTiesRequest>>,
) -> Result<(StatusCode, Json<GenerateTiesResponse>), ApiError> {
    let identity = identity_from_headers(&headers);
    if !can_administer_league(&identity) {
        return Err(ApiError::Authorization(
            "fixture generation requires a staff or administrator role".to_string(),
        ));
    }

    let league = load_league(&state, &id)?;
    let teams = read_league_teams(&state.storage, &league)?;
    let existing = read_league_ties(&state.storage, &league.id)?;

    let request = body.map(|Json(r)| r).unwrap_or_default();
    let start_date = match &request.start_date {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };

    // A sibling league with fixtures pins this league to its schedule.
    let (ties, mirrored) = match find_mirror_source(&state, &league)? {
        Some((sibling, sibling_ties, sibling_teams)) => {
            info!(
                "Mirroring fixtures for league {} from sibling {}",
                league.id, sibling.id
            );
            let ties =
                mirror_fixtures(&league, &teams, &existing, &sibling_ties, &sibling_teams)?;
            (ties, true)
        }
        None => {
            let days = upcoming_league_days(&state.storage, &league.region, start_date)?;
            let schedule = if days.is_empty() {
                ScheduleSource::Interval {
                    start: start_date,
                    interval_days: DEFAULT_INTERVAL_DAYS,
                }
            } else {
                ScheduleSource::Calendar(days)
            };
            let ties = generate_fixtures(&league, &teams, &existing, &schedule)?;
            (ties, false)
        }
    };

    append_ties(&state.storage, &ties)?;
    info!("Created {} ties for league {}", ties.len(), league.id);

    let all_teams = read_teams(&state.storage)?;
    Ok((
        StatusCode::CREATED,
        Json(GenerateTiesResponse {
            created: ties.len(),
            mirrored,
            ties: ties
                .iter()
                .map(|t| TieSummary::from_tie(t, &all_teams))
                .collect(),
        }),
    ))
}

// ── Tie updates ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTieRequest {
    pub status: Option<TieStatus>,
    pub notes: Option<String>,
    pub scheduled_date: Option<String>,
    pub venue: Option<String>,
    pub postponement_reason: Option<String>,
}

pub async fn update_tie(
    State(state): State<AppState>,
    Path((league_id, tie_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(request): Json<UpdateTieRequest>,
) -> Result<Json<TieSummary>, ApiError> {
    let identity = identity_from_headers(&headers);
    if !can_administer_league(&identity) {
        return Err(ApiError::Authorization(
            "tie schedule edits require a staff or administrator role".to_string(),
        ));
    }

    let league = load_league(&state, &league_id)?;
    let mut tie = load_tie(&state, &league, &tie_id)?;

    if let Some(raw) = &request.scheduled_date {
        tie.scheduled_date = parse_date(raw)?;
    }
    if let Some(venue) = request.venue {
        tie.venue = venue;
    }
    if let Some(notes) = request.notes {
        tie.notes = Some(notes);
    }
    if let Some(reason) = request.postponement_reason {
        tie.postponement_reason = Some(reason);
    }

    let mut became_decided = false;
    if let Some(status) = request.status {
        became_decided = !tie.status.is_decided() && status.is_decided();
        tie.status = status;
        if became_decided {
            // Manual completion still publishes whatever the rubbers say.
            let (stats, score) = crate::engine::score::derive_tie_score(&tie.rubbers);
            tie.stats = stats;
            tie.score = score;
        }
    }

    if !store_tie(&state.storage, &tie)? {
        return Err(ApiError::NotFound(format!("Tie not found: {}", tie_id)));
    }
    if became_decided {
        state.standings_cache.invalidate(league.id.as_str());
    }

    let teams = read_teams(&state.storage)?;
    Ok(Json(TieSummary::from_tie(&tie, &teams)))
}

// ── Rubber scoring ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubberScoreRequest {
    pub sets: Vec<SetScore>,
    pub status: RubberStatus,
    /// Required for retired, walkover and defaulted rubbers, where the
    /// winner cannot be read off the sets
    pub winner: Option<Side>,
}

pub async fn update_rubber_score(
    State(state): State<AppState>,
    Path((league_id, tie_id, rubber_index)): Path<(String, String, usize)>,
    headers: HeaderMap,
    Json(request): Json<RubberScoreRequest>,
) -> Result<Json<TieSummary>, ApiError> {
    let league = load_league(&state, &league_id)?;
    let mut tie = load_tie(&state, &league, &tie_id)?;

    let teams = read_teams(&state.storage)?;
    let home_name = team_name(&teams, &tie.home_team_id);
    let away_name = team_name(&teams, &tie.away_team_id);

    let identity = identity_from_headers(&headers);
    if !can_score_tie(&identity, &home_name, &away_name) {
        return Err(ApiError::Authorization(format!(
            "scores for {} v {} can only be entered by staff or a club official of either side",
            home_name, away_name
        )));
    }

    if tie.status.is_decided() {
        return Err(ApiError::Validation("tie is already decided".to_string()));
    }
    if rubber_index >= tie.rubbers.len() {
        return Err(ApiError::NotFound(format!(
            "Rubber index {} out of range",
            rubber_index
        )));
    }

    validate_rubber_submission(&request.sets, request.status)?;

    let winner = match request.status {
        RubberStatus::Completed => rubber_winner_from_sets(&request.sets),
        RubberStatus::Retired | RubberStatus::Walkover | RubberStatus::Defaulted => {
            let side = request.winner.ok_or_else(|| {
                ApiError::Validation(format!(
                    "a {:?} rubber needs an explicit winner",
                    request.status
                ))
            })?;
            Some(side)
        }
        RubberStatus::NotStarted | RubberStatus::InProgress => None,
    };

    let rubber = &mut tie.rubbers[rubber_index];
    rubber.sets = request.sets;
    rubber.status = request.status;
    rubber.winner = winner;

    let became_decided = refresh_tie(&mut tie);

    if !store_tie(&state.storage, &tie)? {
        return Err(ApiError::NotFound(format!("Tie not found: {}", tie_id)));
    }
    if became_decided {
        state.standings_cache.invalidate(league.id.as_str());
        info!(
            "Tie {} completed; standings cache evicted for league {}",
            tie.id, league.id
        );
    }

    Ok(Json(TieSummary::from_tie(&tie, &teams)))
}

// ── Walkovers ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkoverRequest {
    /// The side awarded the walkover
    pub walkover_team: Side,
    pub reason: Option<String>,
    /// Concede a single rubber instead of the whole tie
    pub rubber_index: Option<usize>,
}

pub async fn record_walkover(
    State(state): State<AppState>,
    Path((league_id, tie_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(request): Json<WalkoverRequest>,
) -> Result<Json<TieSummary>, ApiError> {
    let league = load_league(&state, &league_id)?;
    let mut tie = load_tie(&state, &league, &tie_id)?;

    let teams = read_teams(&state.storage)?;
    let home_name = team_name(&teams, &tie.home_team_id);
    let away_name = team_name(&teams, &tie.away_team_id);

    let identity = identity_from_headers(&headers);
    if !can_score_tie(&identity, &home_name, &away_name) {
        return Err(ApiError::Authorization(format!(
            "walkovers for {} v {} can only be recorded by staff or a club official of either side",
            home_name, away_name
        )));
    }

    let became_decided = apply_walkover(
        &mut tie,
        request.walkover_team,
        request.reason,
        request.rubber_index,
    )?;

    if !store_tie(&state.storage, &tie)? {
        return Err(ApiError::NotFound(format!("Tie not found: {}", tie_id)));
    }
    if became_decided {
        state.standings_cache.invalidate(league.id.as_str());
        info!(
            "Walkover recorded on tie {}; standings cache evicted for league {}",
            tie.id, league.id
        );
    }

    Ok(Json(TieSummary::from_tie(&tie, &teams)))
}
