//! Set-score validation and tie score derivation.
//!
//! The point-by-point scoring workflow lives elsewhere; this module only
//! validates submitted set scores and folds rubber results into the
//! tie-level stats and score that standings consume.

use crate::models::{
    Rubber, RubberStatus, SetScore, Side, SideTally, Tie, TieScore, TieStats, TieStatus,
    WalkoverRecord,
};

use super::EngineError;

/// Validate one set score.
///
/// Games per side never exceed 7. A 7-game set is only valid as 7-5 or
/// 7-6, and 7-6 requires a recorded, played tiebreak. A set reaching 6
/// games is otherwise decided by a margin of at least two.
pub fn validate_set_score(set: &SetScore) -> Result<(), EngineError> {
    let high = set.home_games.max(set.away_games);
    let low = set.home_games.min(set.away_games);

    if high > 7 {
        return Err(EngineError::Validation(format!(
            "set score {}-{} exceeds 7 games",
            set.home_games, set.away_games
        )));
    }

    if high == 7 {
        match low {
            5 => {}
            6 => {
                let tiebreak_played = set
                    .tiebreak
                    .as_ref()
                    .map(|tb| tb.played)
                    .unwrap_or(false);
                if !tiebreak_played {
                    return Err(EngineError::Validation(
                        "a 7-6 set requires a recorded tiebreak".to_string(),
                    ));
                }
            }
            _ => {
                return Err(EngineError::Validation(format!(
                    "invalid set score {}-{}: a 7-game set is only 7-5 or 7-6",
                    set.home_games, set.away_games
                )));
            }
        }
    }

    if high == 6 && low > 4 {
        return Err(EngineError::Validation(format!(
            "invalid set score {}-{}: a 6-game set needs a two-game margin",
            set.home_games, set.away_games
        )));
    }

    Ok(())
}

/// Whether a set has reached a valid finished score.
pub fn is_set_finished(set: &SetScore) -> bool {
    if validate_set_score(set).is_err() {
        return false;
    }
    let high = set.home_games.max(set.away_games);
    let low = set.home_games.min(set.away_games);
    high == 7 || (high == 6 && high - low >= 2)
}

/// Validate a full score submission for one rubber.
///
/// Every set must pass [`validate_set_score`]. A submission marking the
/// rubber completed must carry only finished sets and a decided winner;
/// other statuses may carry a trailing partial set.
pub fn validate_rubber_submission(
    sets: &[SetScore],
    status: RubberStatus,
) -> Result<(), EngineError> {
    if sets.is_empty() && status == RubberStatus::Completed {
        return Err(EngineError::Validation(
            "a completed rubber needs at least one set".to_string(),
        ));
    }

    for set in sets {
        validate_set_score(set)?;
    }

    if status == RubberStatus::Completed {
        if let Some(unfinished) = sets.iter().find(|s| !is_set_finished(s)) {
            return Err(EngineError::Validation(format!(
                "completed rubber contains an unfinished set {}-{}",
                unfinished.home_games, unfinished.away_games
            )));
        }
        if rubber_winner_from_sets(sets).is_none() {
            return Err(EngineError::Validation(
                "completed rubber has no winner on sets".to_string(),
            ));
        }
    }

    Ok(())
}

/// The side that won more sets, if the sets are not level.
pub fn rubber_winner_from_sets(sets: &[SetScore]) -> Option<Side> {
    let mut home = 0u32;
    let mut away = 0u32;
    for set in sets {
        match set.winner() {
            Some(Side::Home) => home += 1,
            Some(Side::Away) => away += 1,
            None => {}
        }
    }
    match home.cmp(&away) {
        std::cmp::Ordering::Greater => Some(Side::Home),
        std::cmp::Ordering::Less => Some(Side::Away),
        std::cmp::Ordering::Equal => None,
    }
}

/// Derive the tie-level stats and score from its rubbers.
///
/// A pure function invoked by callers before persisting a tie; the
/// storage layer never recomputes this behind the caller's back.
pub fn derive_tie_score(rubbers: &[Rubber]) -> (TieStats, TieScore) {
    let mut home = SideTally::default();
    let mut away = SideTally::default();

    for rubber in rubbers {
        match rubber.winner {
            Some(Side::Home) => home.rubbers += 1,
            Some(Side::Away) => away.rubbers += 1,
            None => {}
        }
        for set in &rubber.sets {
            match set.winner() {
                Some(Side::Home) => home.sets += 1,
                Some(Side::Away) => away.sets += 1,
                None => {}
            }
            home.games += set.home_games;
            away.games += set.away_games;
        }
    }

    let score = TieScore {
        home: home.rubbers,
        away: away.rubbers,
    };
    (TieStats { home, away }, score)
}

/// Whether every rubber of a tie has reached a terminal status.
pub fn all_rubbers_terminal(rubbers: &[Rubber]) -> bool {
    !rubbers.is_empty() && rubbers.iter().all(|r| r.status.is_terminal())
}

/// Refresh a tie's derived fields and auto-complete it once every rubber
/// is terminal. Returns true when the tie became decided by this call,
/// which is the signal to invalidate the standings cache.
pub fn refresh_tie(tie: &mut Tie) -> bool {
    let (stats, score) = derive_tie_score(&tie.rubbers);
    tie.stats = stats;
    tie.score = score;

    if tie.status == TieStatus::Scheduled && all_rubbers_terminal(&tie.rubbers) {
        tie.status = TieStatus::Completed;
        return true;
    }
    false
}

/// Record a walkover.
///
/// With a rubber index, only that rubber is conceded; the tie then
/// completes if every rubber is terminal. Without one, every rubber is
/// forced to walkover with the shared winning side and the tie itself
/// becomes a walkover with the reason recorded. Returns true when the
/// tie became decided.
pub fn apply_walkover(
    tie: &mut Tie,
    winner: Side,
    reason: Option<String>,
    rubber_index: Option<usize>,
) -> Result<bool, EngineError> {
    if tie.status.is_decided() {
        return Err(EngineError::Validation(
            "tie is already decided".to_string(),
        ));
    }

    match rubber_index {
        Some(index) => {
            let rubber = tie.rubbers.get_mut(index).ok_or_else(|| {
                EngineError::NotFound(format!("rubber index {} out of range", index))
            })?;
            rubber.status = RubberStatus::Walkover;
            rubber.winner = Some(winner);
            Ok(refresh_tie(tie))
        }
        None => {
            for rubber in &mut tie.rubbers {
                rubber.status = RubberStatus::Walkover;
                rubber.winner = Some(winner);
            }
            let (stats, score) = derive_tie_score(&tie.rubbers);
            tie.stats = stats;
            tie.score = score;
            tie.status = TieStatus::Walkover;
            tie.walkover = Some(WalkoverRecord { winner, reason });
            Ok(true)
        }
    }
}
