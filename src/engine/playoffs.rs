//! Cross-region playoff bracket derivation.
//!
//! Consumes two standings tables from paired regions and produces the
//! three playoff ties: both semi-finals and a placeholder final. The
//! engine never advances semi-final winners into the final; that pairing
//! is resolved manually once the semis are decided.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::models::{
    League, StandingsEntry, Team, Tie, FINAL_ROUND, SEMI_FINAL_ROUND,
};

use super::EngineError;

/// The conventionally paired region name, when one exists.
pub fn paired_region(region: &str) -> Option<&'static str> {
    match region.trim().to_ascii_lowercase().as_str() {
        "north" => Some("south"),
        "south" => Some("north"),
        "east" => Some("west"),
        "west" => Some("east"),
        _ => None,
    }
}

/// Locate the sibling league playoffs draw against: a league in another
/// region with the same gender and season year whose play has started.
/// The conventional region pairing wins when it resolves; otherwise the
/// other region must be unambiguous.
pub fn find_sibling_league<'a>(
    league: &League,
    leagues: &'a [League],
) -> Result<&'a League, EngineError> {
    let candidates: Vec<&League> = leagues
        .iter()
        .filter(|l| {
            l.id != league.id
                && l.gender == league.gender
                && l.season_year == league.season_year
                && !l.region.eq_ignore_ascii_case(&league.region)
                && l.has_started()
        })
        .collect();

    if let Some(paired) = paired_region(&league.region) {
        if let Some(found) = candidates
            .iter()
            .copied()
            .find(|l| l.region.eq_ignore_ascii_case(paired))
        {
            return Ok(found);
        }
    }

    match candidates.as_slice() {
        [] => Err(EngineError::NotFound(format!(
            "no paired-region league found for {} ({} {})",
            league.name, league.region, league.season_year
        ))),
        [only] => Ok(*only),
        _ => Err(EngineError::NotFound(format!(
            "multiple candidate regions for {} playoffs; cannot pick a sibling",
            league.name
        ))),
    }
}

/// Semi-final and final dates: up to two upcoming league match days,
/// defaults of today and a week later filling the gaps.
pub fn playoff_dates(upcoming: &[NaiveDate], today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let semi = upcoming.first().copied().unwrap_or(today);
    let fallback_final = semi
        .checked_add_days(Days::new(7))
        .unwrap_or(semi);
    let final_date = upcoming.get(1).copied().unwrap_or(fallback_final);
    (semi, final_date)
}

/// Generate the three playoff ties for a league and its sibling region.
///
/// `home_standings` is the requesting league's table, `away_standings`
/// the sibling's. Both must rank at least two teams. The returned batch
/// is complete; callers persist it in one append or not at all.
pub fn generate_playoffs(
    league: &League,
    existing_ties: &[Tie],
    home_standings: &[StandingsEntry],
    away_standings: &[StandingsEntry],
    sibling_region: &str,
    teams: &[Team],
    dates: (NaiveDate, NaiveDate),
) -> Result<Vec<Tie>, EngineError> {
    if !league.has_started() {
        return Err(EngineError::Validation(format!(
            "league {} has not started; playoffs need an active or completed season",
            league.name
        )));
    }
    if existing_ties.iter().any(|t| t.is_playoff()) {
        return Err(EngineError::PlayoffsExist);
    }
    if home_standings.len() < 2 {
        return Err(EngineError::InsufficientStandings {
            region: league.region.clone(),
            found: home_standings.len(),
        });
    }
    if away_standings.len() < 2 {
        return Err(EngineError::InsufficientStandings {
            region: sibling_region.to_string(),
            found: away_standings.len(),
        });
    }

    let venue_of = |entry: &StandingsEntry| -> String {
        teams
            .iter()
            .find(|t| t.id == entry.team_id)
            .map(|t| t.venue().to_string())
            .unwrap_or_else(|| entry.team_name.clone())
    };

    let (semi_date, final_date) = dates;
    let format = league.settings.match_format;

    // Semi-final 1: home region winners host the other region's runners-up.
    let semi_one = Tie::new(
        league.id.clone(),
        SEMI_FINAL_ROUND,
        home_standings[0].team_id.clone(),
        away_standings[1].team_id.clone(),
        semi_date,
        venue_of(&home_standings[0]),
        format,
    )
    .with_notes(format!(
        "Semi-final 1: {} v {}",
        home_standings[0].team_name, away_standings[1].team_name
    ));

    // Semi-final 2: hosted by the other region's winners.
    let semi_two = Tie::new(
        league.id.clone(),
        SEMI_FINAL_ROUND,
        away_standings[0].team_id.clone(),
        home_standings[1].team_id.clone(),
        semi_date,
        venue_of(&away_standings[0]),
        format,
    )
    .with_notes(format!(
        "Semi-final 2: {} v {}",
        away_standings[0].team_name, home_standings[1].team_name
    ));

    // Placeholder final between both table-toppers. The real pairing is
    // the two semi-final winners, entered manually once known.
    let final_tie = Tie::new(
        league.id.clone(),
        FINAL_ROUND,
        home_standings[0].team_id.clone(),
        away_standings[0].team_id.clone(),
        final_date,
        venue_of(&home_standings[0]),
        format,
    )
    .with_notes(
        "Final: winners of semi-final 1 and semi-final 2; pairing resolved manually".to_string(),
    );

    debug!(
        "Generated playoff bracket for league {} against region {}",
        league.id, sibling_region
    );
    Ok(vec![semi_one, semi_two, final_tie])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, LeagueStatus, MatchFormat};

    fn entry(team: &Team) -> StandingsEntry {
        StandingsEntry::new(team.id.clone(), team.name.clone())
    }

    fn setup() -> (League, Vec<Team>, Vec<Team>) {
        let north: Vec<Team> = ["N1", "N2", "N3"]
            .iter()
            .map(|n| Team::new(n.to_string()))
            .collect();
        let south: Vec<Team> = ["S1", "S2", "S3"]
            .iter()
            .map(|n| Team::new(n.to_string()))
            .collect();
        let league = League::new("D1 North".to_string(), 2026, "north".to_string(), Gender::Men)
            .with_teams(north.iter().map(|t| t.id.clone()).collect())
            .with_status(LeagueStatus::Active);
        (league, north, south)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_paired_region_names() {
        assert_eq!(paired_region("north"), Some("south"));
        assert_eq!(paired_region("South"), Some("north"));
        assert_eq!(paired_region("east"), Some("west"));
        assert_eq!(paired_region("midlands"), None);
    }

    #[test]
    fn test_bracket_shape() {
        let (league, north, south) = setup();
        let home: Vec<StandingsEntry> = north.iter().map(entry).collect();
        let away: Vec<StandingsEntry> = south.iter().map(entry).collect();
        let all_teams: Vec<Team> = north.iter().chain(south.iter()).cloned().collect();

        let ties = generate_playoffs(
            &league,
            &[],
            &home,
            &away,
            "south",
            &all_teams,
            (date(9, 5), date(9, 12)),
        )
        .unwrap();

        assert_eq!(ties.len(), 3);

        let semi_one = &ties[0];
        assert_eq!(semi_one.round, SEMI_FINAL_ROUND);
        assert_eq!(semi_one.home_team_id, north[0].id);
        assert_eq!(semi_one.away_team_id, south[1].id);
        assert_eq!(semi_one.scheduled_date, date(9, 5));

        let semi_two = &ties[1];
        assert_eq!(semi_two.round, SEMI_FINAL_ROUND);
        assert_eq!(semi_two.home_team_id, south[0].id);
        assert_eq!(semi_two.away_team_id, north[1].id);

        let final_tie = &ties[2];
        assert_eq!(final_tie.round, FINAL_ROUND);
        assert_eq!(final_tie.home_team_id, north[0].id);
        assert_eq!(final_tie.away_team_id, south[0].id);
        assert_eq!(final_tie.scheduled_date, date(9, 12));
        assert!(final_tie
            .notes
            .as_deref()
            .unwrap()
            .contains("resolved manually"));

        // All three carry the league's match format and belong to it.
        for tie in &ties {
            assert_eq!(tie.league_id, league.id);
            assert_eq!(
                tie.rubbers.len(),
                MatchFormat::ThreeSinglesTwoDoubles.rubber_count()
            );
            assert!(tie.is_playoff());
        }
    }

    #[test]
    fn test_existing_playoffs_rejected() {
        let (league, north, south) = setup();
        let home: Vec<StandingsEntry> = north.iter().map(entry).collect();
        let away: Vec<StandingsEntry> = south.iter().map(entry).collect();

        let existing = generate_playoffs(
            &league,
            &[],
            &home,
            &away,
            "south",
            &north,
            (date(9, 5), date(9, 12)),
        )
        .unwrap();

        let err = generate_playoffs(
            &league,
            &existing,
            &home,
            &away,
            "south",
            &north,
            (date(9, 5), date(9, 12)),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::PlayoffsExist));
    }

    #[test]
    fn test_season_ties_do_not_block_playoffs() {
        let (league, north, south) = setup();
        let home: Vec<StandingsEntry> = north.iter().map(entry).collect();
        let away: Vec<StandingsEntry> = south.iter().map(entry).collect();

        let season_tie = Tie::new(
            league.id.clone(),
            3,
            north[0].id.clone(),
            north[1].id.clone(),
            date(6, 1),
            "N1".to_string(),
            MatchFormat::ThreeSinglesTwoDoubles,
        );

        let result = generate_playoffs(
            &league,
            &[season_tie],
            &home,
            &away,
            "south",
            &north,
            (date(9, 5), date(9, 12)),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_insufficient_standings() {
        let (league, north, south) = setup();
        let home: Vec<StandingsEntry> = north.iter().take(1).map(entry).collect();
        let away: Vec<StandingsEntry> = south.iter().map(entry).collect();

        let err = generate_playoffs(
            &league,
            &[],
            &home,
            &away,
            "south",
            &north,
            (date(9, 5), date(9, 12)),
        )
        .unwrap_err();
        match err {
            EngineError::InsufficientStandings { region, found } => {
                assert_eq!(region, "north");
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_upcoming_league_not_eligible() {
        let (league, north, south) = setup();
        let league = league.with_status(LeagueStatus::Upcoming);
        let home: Vec<StandingsEntry> = north.iter().map(entry).collect();
        let away: Vec<StandingsEntry> = south.iter().map(entry).collect();

        let err = generate_playoffs(
            &league,
            &[],
            &home,
            &away,
            "south",
            &north,
            (date(9, 5), date(9, 12)),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_find_sibling_prefers_paired_region() {
        let (league, _, _) = setup();
        let make = |region: &str, status| {
            League::new(
                format!("D1 {}", region),
                2026,
                region.to_string(),
                Gender::Men,
            )
            .with_status(status)
        };
        let leagues = vec![
            league.clone(),
            make("west", LeagueStatus::Active),
            make("south", LeagueStatus::Active),
        ];

        let sibling = find_sibling_league(&league, &leagues).unwrap();
        assert_eq!(sibling.region, "south");
    }

    #[test]
    fn test_find_sibling_requires_started_play() {
        let (league, _, _) = setup();
        let upcoming =
            League::new("D1 South".to_string(), 2026, "south".to_string(), Gender::Men);
        let leagues = vec![league.clone(), upcoming];

        let err = find_sibling_league(&league, &leagues).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn test_find_sibling_matches_gender_and_year() {
        let (league, _, _) = setup();
        let women = League::new("D1 South W".to_string(), 2026, "south".to_string(), Gender::Women)
            .with_status(LeagueStatus::Active);
        let last_year = League::new("D1 South".to_string(), 2025, "south".to_string(), Gender::Men)
            .with_status(LeagueStatus::Completed);
        let leagues = vec![league.clone(), women, last_year];

        assert!(find_sibling_league(&league, &leagues).is_err());
    }

    #[test]
    fn test_find_sibling_ambiguous_without_pairing() {
        let league =
            League::new("D1 Mid".to_string(), 2026, "midlands".to_string(), Gender::Men)
                .with_status(LeagueStatus::Active);
        let a = League::new("D1 A".to_string(), 2026, "highlands".to_string(), Gender::Men)
            .with_status(LeagueStatus::Active);
        let b = League::new("D1 B".to_string(), 2026, "lowlands".to_string(), Gender::Men)
            .with_status(LeagueStatus::Active);

        let err = find_sibling_league(&league, &[league.clone(), a, b]).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn test_playoff_dates_defaults() {
        let today = date(9, 1);
        assert_eq!(playoff_dates(&[], today), (today, date(9, 8)));
        assert_eq!(
            playoff_dates(&[date(9, 5)], today),
            (date(9, 5), date(9, 12))
        );
        assert_eq!(
            playoff_dates(&[date(9, 5), date(9, 19)], today),
            (date(9, 5), date(9, 19))
        );
    }
}
