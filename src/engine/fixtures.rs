//! Round-robin fixture generation.
//!
//! Pairings come from the circle method: fix one slot, rotate the rest
//! one step per match day. Odd team counts get a phantom bye slot whose
//! pairings are dropped. Dates come either from league match days on the
//! federation calendar or from a start date plus a fixed interval.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::models::{CalendarEvent, League, Team, Tie};

use super::EngineError;

/// Default spacing between synthesized match days.
pub const DEFAULT_INTERVAL_DAYS: u64 = 7;

/// Where match-day dates come from.
#[derive(Debug, Clone)]
pub enum ScheduleSource {
    /// Ordered league match days from the federation calendar.
    Calendar(Vec<CalendarEvent>),
    /// Synthesized dates: `start + matchday_index * interval_days`.
    Interval { start: NaiveDate, interval_days: u64 },
}

impl ScheduleSource {
    /// The date (and originating calendar event, if any) for a 0-based
    /// match day index.
    fn matchday(&self, index: usize) -> Option<(NaiveDate, Option<&CalendarEvent>)> {
        match self {
            ScheduleSource::Calendar(events) => {
                events.get(index).map(|e| (e.date, Some(e)))
            }
            ScheduleSource::Interval {
                start,
                interval_days,
            } => start
                .checked_add_days(Days::new(index as u64 * interval_days))
                .map(|d| (d, None)),
        }
    }

    fn available(&self) -> usize {
        match self {
            ScheduleSource::Calendar(events) => events.len(),
            ScheduleSource::Interval { .. } => usize::MAX,
        }
    }
}

/// Circle-method pairings for one match day.
///
/// Positions `1..total-1` rotate by the match day index while position 0
/// stays fixed; position `m` then meets `total - 1 - m`. `total` must be
/// even (callers add the bye slot first). Pairs are returned as slot
/// indices; a slot `>= team_count` is the bye.
fn matchday_pairings(total: usize, matchday: usize) -> Vec<(usize, usize)> {
    debug_assert!(total % 2 == 0);

    // Rotated slot layout for this match day.
    let mut slots: Vec<usize> = Vec::with_capacity(total);
    slots.push(0);
    for i in 1..total {
        let rotated = (i - 1 + matchday) % (total - 1) + 1;
        slots.push(rotated);
    }

    let mut pairs = Vec::with_capacity(total / 2);
    for m in 0..total / 2 {
        pairs.push((slots[m], slots[total - 1 - m]));
    }
    pairs
}

/// Generate the full set of round-robin ties for a league.
///
/// Preconditions: at least two teams and no existing ties. The returned
/// batch is complete; callers persist it in one append or not at all.
pub fn generate_fixtures(
    league: &League,
    teams: &[Team],
    existing_ties: &[Tie],
    schedule: &ScheduleSource,
) -> Result<Vec<Tie>, EngineError> {
    if teams.len() < 2 {
        return Err(EngineError::NoTeams);
    }
    if !existing_ties.is_empty() {
        return Err(EngineError::FixturesExist);
    }

    let n = teams.len();
    // Phantom bye slot when the team count is odd.
    let total = if n % 2 == 0 { n } else { n + 1 };
    let repetitions = league.settings.number_of_rounds.max(1) as usize;
    let matchdays_per_repetition = total - 1;
    let needed = matchdays_per_repetition * repetitions;

    if schedule.available() < needed {
        return Err(EngineError::InsufficientScheduleDates {
            needed,
            found: schedule.available(),
        });
    }

    let mut ties = Vec::new();
    for repetition in 0..repetitions {
        for day in 0..matchdays_per_repetition {
            let matchday_index = repetition * matchdays_per_repetition + day;
            let (date, event) = schedule
                .matchday(matchday_index)
                .ok_or(EngineError::InsufficientScheduleDates {
                    needed,
                    found: matchday_index,
                })?;

            for (a, b) in matchday_pairings(total, day) {
                // Pairings touching the bye slot are dropped.
                if a >= n || b >= n {
                    continue;
                }

                // Odd repetitions swap home and away for the return leg.
                let (home, away) = if repetition % 2 == 1 { (b, a) } else { (a, b) };
                let home_team = &teams[home];
                let away_team = &teams[away];

                let mut tie = Tie::new(
                    league.id.clone(),
                    (matchday_index + 1) as u32,
                    home_team.id.clone(),
                    away_team.id.clone(),
                    date,
                    home_team.venue().to_string(),
                    league.settings.match_format,
                );
                if let Some(event) = event {
                    tie = tie.with_calendar_event(event.id.clone());
                }
                ties.push(tie);
            }
        }
    }

    debug!(
        "Generated {} ties for league {} ({} teams, {} repetitions)",
        ties.len(),
        league.id,
        n,
        repetitions
    );
    Ok(ties)
}

/// Generate fixtures by mirroring a sibling league's schedule.
///
/// For each sibling tie, this league's teams are resolved by
/// case-insensitive club name match against the sibling fixture's home
/// and away team names; pairings this league cannot resolve are skipped.
/// Round numbers and dates are copied so that men's and women's ties for
/// the same clubs land on the same match day.
pub fn mirror_fixtures(
    league: &League,
    teams: &[Team],
    existing_ties: &[Tie],
    sibling_ties: &[Tie],
    sibling_teams: &[Team],
) -> Result<Vec<Tie>, EngineError> {
    if teams.len() < 2 {
        return Err(EngineError::NoTeams);
    }
    if !existing_ties.is_empty() {
        return Err(EngineError::FixturesExist);
    }

    let resolve = |sibling_id: &crate::models::TeamId| -> Option<&Team> {
        let name = sibling_teams.iter().find(|t| &t.id == sibling_id)?;
        teams.iter().find(|t| t.name_matches(&name.name))
    };

    let mut ordered: Vec<&Tie> = sibling_ties.iter().filter(|t| !t.is_playoff()).collect();
    ordered.sort_by_key(|t| (t.round, t.scheduled_date));

    let mut ties = Vec::new();
    let mut skipped = 0usize;
    for sibling in ordered {
        let (Some(home), Some(away)) = (
            resolve(&sibling.home_team_id),
            resolve(&sibling.away_team_id),
        ) else {
            skipped += 1;
            continue;
        };

        let mut tie = Tie::new(
            league.id.clone(),
            sibling.round,
            home.id.clone(),
            away.id.clone(),
            sibling.scheduled_date,
            home.venue().to_string(),
            league.settings.match_format,
        );
        if let Some(event_id) = &sibling.calendar_event_id {
            tie = tie.with_calendar_event(event_id.clone());
        }
        ties.push(tie);
    }

    debug!(
        "Mirrored {} ties for league {} from sibling schedule ({} unresolved pairings skipped)",
        ties.len(),
        league.id,
        skipped
    );
    Ok(ties)
}
