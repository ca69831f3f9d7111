//! Typed collection helpers over the JSONL store.

use chrono::NaiveDate;

use crate::models::{CalendarEvent, League, LeagueId, Team, TeamId, Tie, TieId};

use super::{Collection, JsonlReader, JsonlWriter, StorageConfig, StorageError};

/// Read every league.
pub fn read_leagues(config: &StorageConfig) -> Result<Vec<League>, StorageError> {
    JsonlReader::for_collection(config, Collection::Leagues).read_all()
}

/// Read one league by id.
pub fn read_league(config: &StorageConfig, id: &LeagueId) -> Result<Option<League>, StorageError> {
    let leagues = read_leagues(config)?;
    Ok(leagues.into_iter().find(|l| &l.id == id))
}

/// Read every team.
pub fn read_teams(config: &StorageConfig) -> Result<Vec<Team>, StorageError> {
    JsonlReader::for_collection(config, Collection::Teams).read_all()
}

/// Read a league's teams in the league's participation order. Teams the
/// store no longer has are dropped from the result.
pub fn read_league_teams(
    config: &StorageConfig,
    league: &League,
) -> Result<Vec<Team>, StorageError> {
    let all = read_teams(config)?;
    let ordered = league
        .team_ids
        .iter()
        .filter_map(|id| all.iter().find(|t| &t.id == id).cloned())
        .collect();
    Ok(ordered)
}

/// Read every tie belonging to a league.
pub fn read_league_ties(
    config: &StorageConfig,
    league_id: &LeagueId,
) -> Result<Vec<Tie>, StorageError> {
    JsonlReader::for_collection(config, Collection::Ties)
        .read_where(|t: &Tie| &t.league_id == league_id)
}

/// Append a batch of new ties.
pub fn append_ties(config: &StorageConfig, ties: &[Tie]) -> Result<usize, StorageError> {
    JsonlWriter::for_collection(config, Collection::Ties).append_batch(ties)
}

/// Replace a single tie in place, matched by id. Returns false when the
/// tie is not in the store.
pub fn update_tie(config: &StorageConfig, updated: &Tie) -> Result<bool, StorageError> {
    let reader: JsonlReader<Tie> = JsonlReader::for_collection(config, Collection::Ties);
    let mut ties = reader.read_all()?;

    let Some(slot) = ties.iter_mut().find(|t| t.id == updated.id) else {
        return Ok(false);
    };
    *slot = updated.clone();

    JsonlWriter::for_collection(config, Collection::Ties).write_all(&ties)?;
    Ok(true)
}

/// Read one tie by league and tie id.
pub fn read_tie(
    config: &StorageConfig,
    league_id: &LeagueId,
    tie_id: &TieId,
) -> Result<Option<Tie>, StorageError> {
    let ties = read_league_ties(config, league_id)?;
    Ok(ties.into_iter().find(|t| &t.id == tie_id))
}

/// Look up a team name, falling back to the raw id for dangling refs.
pub fn team_name(teams: &[Team], id: &TeamId) -> String {
    teams
        .iter()
        .find(|t| &t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Upcoming league match days for a region, sorted by date ascending.
pub fn upcoming_league_days(
    config: &StorageConfig,
    region: &str,
    from: NaiveDate,
) -> Result<Vec<CalendarEvent>, StorageError> {
    let reader: JsonlReader<CalendarEvent> =
        JsonlReader::for_collection(config, Collection::CalendarEvents);
    let mut events =
        reader.read_where(|e| e.is_league_day_for(region) && e.date >= from)?;
    events.sort_by_key(|e| e.date);
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalendarEventType, EntityId, Gender, MatchFormat, TieStatus};
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> StorageConfig {
        StorageConfig::new(temp_dir.path().to_path_buf())
    }

    fn make_tie(league_id: &str, round: u32, home: &str, away: &str) -> Tie {
        Tie::new(
            EntityId::from(league_id),
            round,
            EntityId::from(home),
            EntityId::from(away),
            NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            "Venue".to_string(),
            MatchFormat::TwoSinglesOneDoubles,
        )
    }

    #[test]
    fn test_read_league_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let league = League::new("D1".to_string(), 2026, "north".to_string(), Gender::Men);
        JsonlWriter::for_collection(&config, Collection::Leagues)
            .append(&league)
            .unwrap();

        let found = read_league(&config, &league.id).unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().name, "D1");

        let missing = read_league(&config, &EntityId::from("nope")).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_read_league_teams_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let a = Team::new("Alpha".to_string());
        let b = Team::new("Beta".to_string());
        let c = Team::new("Gamma".to_string());
        JsonlWriter::for_collection(&config, Collection::Teams)
            .append_batch(&[a.clone(), b.clone(), c.clone()])
            .unwrap();

        let league = League::new("D1".to_string(), 2026, "north".to_string(), Gender::Men)
            .with_teams(vec![c.id.clone(), a.id.clone()]);

        let teams = read_league_teams(&config, &league).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "Gamma");
        assert_eq!(teams[1].name, "Alpha");
    }

    #[test]
    fn test_read_league_ties_filters_by_league() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        append_ties(
            &config,
            &[
                make_tie("league-1", 1, "a", "b"),
                make_tie("league-2", 1, "c", "d"),
                make_tie("league-1", 2, "b", "a"),
            ],
        )
        .unwrap();

        let ties = read_league_ties(&config, &EntityId::from("league-1")).unwrap();
        assert_eq!(ties.len(), 2);
        assert!(ties.iter().all(|t| t.league_id.as_str() == "league-1"));
    }

    #[test]
    fn test_update_tie() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let tie = make_tie("league-1", 1, "a", "b");
        append_ties(&config, &[tie.clone()]).unwrap();

        let mut updated = tie.clone();
        updated.status = TieStatus::Completed;
        assert!(update_tie(&config, &updated).unwrap());

        let stored = read_tie(&config, &tie.league_id, &tie.id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, TieStatus::Completed);
    }

    #[test]
    fn test_update_tie_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let tie = make_tie("league-1", 1, "a", "b");
        assert!(!update_tie(&config, &tie).unwrap());
    }

    #[test]
    fn test_upcoming_league_days_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let d = |m, day| NaiveDate::from_ymd_opt(2026, m, day).unwrap();
        let events = vec![
            CalendarEvent::new(CalendarEventType::League, d(6, 6), "MD3".to_string()),
            CalendarEvent::new(CalendarEventType::League, d(5, 2), "MD1".to_string()),
            CalendarEvent::new(CalendarEventType::Social, d(5, 9), "BBQ".to_string()),
            CalendarEvent::new(CalendarEventType::League, d(5, 16), "MD2".to_string())
                .with_region("south".to_string()),
            CalendarEvent::new(CalendarEventType::League, d(4, 1), "Past".to_string()),
        ];
        JsonlWriter::for_collection(&config, Collection::CalendarEvents)
            .append_batch(&events)
            .unwrap();

        let days = upcoming_league_days(&config, "north", d(5, 1)).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].title, "MD1");
        assert_eq!(days[1].title, "MD3");
    }

    #[test]
    fn test_team_name_fallback() {
        let teams = vec![Team::new("Alpha".to_string())];
        assert_eq!(team_name(&teams, &teams[0].id), "Alpha");
        assert_eq!(team_name(&teams, &EntityId::from("ghost")), "ghost");
    }
}
