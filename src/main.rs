use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_engine::api::state::AppState;
use league_engine::config::AppConfig;
use league_engine::engine::fixtures::{
    generate_fixtures, ScheduleSource, DEFAULT_INTERVAL_DAYS,
};
use league_engine::engine::playoffs::{find_sibling_league, generate_playoffs, playoff_dates};
use league_engine::engine::standings::compute_standings;
use league_engine::models::{
    CalendarEvent, CalendarEventType, EntityId, Gender, League, LeagueStatus, Team,
};
use league_engine::storage::{
    append_ties, read_league, read_league_teams, read_league_ties, read_leagues, read_teams,
    upcoming_league_days, Collection, JsonlWriter, StorageConfig,
};

#[derive(Parser)]
#[command(name = "league-engine")]
#[command(about = "Team league fixture scheduling and standings engine")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port number
        #[arg(long, default_value = "8080")]
        port: u16,
    },

    /// Seed a demo season (two regions, men's and women's leagues)
    Seed,

    /// Generate round-robin fixtures for a league
    GenerateFixtures {
        /// League id
        league: String,

        /// First match day (YYYY-MM-DD); defaults to today
        #[arg(long)]
        start_date: Option<String>,
    },

    /// Print the standings table for a league
    Standings {
        /// League id
        league: String,
    },

    /// Generate the cross-region playoff bracket for a league
    GeneratePlayoffs {
        /// League id
        league: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting league-engine v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(PathBuf::from(&cli.data_dir));

    match cli.command {
        Commands::Serve { host, port } => {
            // A config file refines the CLI defaults when present.
            let config_path = PathBuf::from(&cli.config);
            let config = if config_path.exists() {
                AppConfig::from_file(&config_path)?
            } else {
                AppConfig::default()
            };

            let cache = league_engine::engine::cache::StandingsCache::new(Duration::from_secs(
                config.cache.standings_ttl_seconds,
            ));
            let data_dir = storage.data_dir.clone();
            let state = AppState::with_cache(storage, cache);
            let app = league_engine::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(
                "Serving league API on http://{} (data dir {:?})",
                addr,
                data_dir
            );
            axum::serve(listener, app).await?;
        }

        Commands::Seed => {
            let season = Utc::now().date_naive().format("%Y").to_string();
            let year: i32 = season.parse().unwrap_or(2026);

            let regions = [
                (
                    "north",
                    ["Riverside LTC", "Park Road LTC", "Northfield LTC", "Harbour LTC"],
                ),
                (
                    "south",
                    ["Southgate LTC", "Marina LTC", "Oakwood LTC", "St Jude's LTC"],
                ),
            ];

            let mut leagues = Vec::new();
            let mut teams = Vec::new();
            for (region, clubs) in &regions {
                for gender in [Gender::Men, Gender::Women] {
                    let gender_label = match gender {
                        Gender::Men => "Men",
                        Gender::Women => "Women",
                    };
                    let league_teams: Vec<Team> = clubs
                        .iter()
                        .map(|name| Team::new(name.to_string()))
                        .collect();
                    let league = League::new(
                        format!("Division 1 {} {}", region, gender_label),
                        year,
                        region.to_string(),
                        gender,
                    )
                    .with_teams(league_teams.iter().map(|t| t.id.clone()).collect())
                    .with_status(LeagueStatus::Upcoming);

                    println!("  {}  {}", league.id, league.name);
                    teams.extend(league_teams);
                    leagues.push(league);
                }
            }

            // A block of shared league match days.
            let start = Utc::now().date_naive();
            let events: Vec<CalendarEvent> = (0..8u64)
                .map(|week| {
                    let date = start + chrono::Days::new(7 * week);
                    CalendarEvent::new(
                        CalendarEventType::League,
                        date,
                        format!("League match day {}", week + 1),
                    )
                })
                .collect();

            JsonlWriter::for_collection(&storage, Collection::Leagues)
                .append_batch(&leagues)?;
            JsonlWriter::for_collection(&storage, Collection::Teams).append_batch(&teams)?;
            JsonlWriter::for_collection(&storage, Collection::CalendarEvents)
                .append_batch(&events)?;

            println!(
                "\nSeeded {} leagues, {} teams, {} calendar days into {:?}",
                leagues.len(),
                teams.len(),
                events.len(),
                storage.data_dir
            );
        }

        Commands::GenerateFixtures { league, start_date } => {
            let league = read_league(&storage, &EntityId::from(league.as_str()))?
                .unwrap_or_else(|| panic!("League not found: {}", league));
            let teams = read_league_teams(&storage, &league)?;
            let existing = read_league_ties(&storage, &league.id)?;

            let start = start_date
                .map(|s| {
                    NaiveDate::parse_from_str(&s, "%Y-%m-%d").unwrap_or_else(|_| {
                        panic!("Invalid --start-date (expected YYYY-MM-DD): {}", s)
                    })
                })
                .unwrap_or_else(|| Utc::now().date_naive());

            let days = upcoming_league_days(&storage, &league.region, start)?;
            let schedule = if days.is_empty() {
                ScheduleSource::Interval {
                    start,
                    interval_days: DEFAULT_INTERVAL_DAYS,
                }
            } else {
                ScheduleSource::Calendar(days)
            };

            match generate_fixtures(&league, &teams, &existing, &schedule) {
                Ok(ties) => {
                    append_ties(&storage, &ties)?;
                    println!("Created {} ties for {}", ties.len(), league.name);
                    for tie in &ties {
                        println!(
                            "  round {:>2}  {}  {} v {}",
                            tie.round,
                            tie.scheduled_date,
                            league_engine::storage::team_name(&teams, &tie.home_team_id),
                            league_engine::storage::team_name(&teams, &tie.away_team_id),
                        );
                    }
                }
                Err(e) => {
                    tracing::error!("Fixture generation failed: {}", e);
                }
            }
        }

        Commands::Standings { league } => {
            let league = read_league(&storage, &EntityId::from(league.as_str()))?
                .unwrap_or_else(|| panic!("League not found: {}", league));
            let teams = read_league_teams(&storage, &league)?;
            let ties = read_league_ties(&storage, &league.id)?;
            let table = compute_standings(&league, &teams, &ties);

            println!("=== {} ({}, {}) ===\n", league.name, league.region, league.season_year);
            println!(
                "{:<4} {:<24} {:>2} {:>2} {:>2} {:>2}  {:>7}  {:>7}  {:>9}  {:>3}",
                "Pos", "Team", "P", "W", "D", "L", "Rubbers", "Sets", "Games", "Pts"
            );
            for (i, entry) in table.iter().enumerate() {
                println!(
                    "{:<4} {:<24} {:>2} {:>2} {:>2} {:>2}  {:>3}-{:<3}  {:>3}-{:<3}  {:>4}-{:<4}  {:>3}",
                    i + 1,
                    entry.team_name,
                    entry.played,
                    entry.won,
                    entry.drawn,
                    entry.lost,
                    entry.rubbers_for,
                    entry.rubbers_against,
                    entry.sets_for,
                    entry.sets_against,
                    entry.games_for,
                    entry.games_against,
                    entry.points,
                );
            }
        }

        Commands::GeneratePlayoffs { league } => {
            let league = read_league(&storage, &EntityId::from(league.as_str()))?
                .unwrap_or_else(|| panic!("League not found: {}", league));
            let existing = read_league_ties(&storage, &league.id)?;
            let leagues = read_leagues(&storage)?;

            let sibling = match find_sibling_league(&league, &leagues) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!("Playoff generation failed: {}", e);
                    return Ok(());
                }
            };

            let home_teams = read_league_teams(&storage, &league)?;
            let home_ties = read_league_ties(&storage, &league.id)?;
            let home_standings = compute_standings(&league, &home_teams, &home_ties);

            let away_teams = read_league_teams(&storage, sibling)?;
            let away_ties = read_league_ties(&storage, &sibling.id)?;
            let away_standings = compute_standings(sibling, &away_teams, &away_ties);

            let today = Utc::now().date_naive();
            let upcoming: Vec<NaiveDate> = upcoming_league_days(&storage, &league.region, today)?
                .iter()
                .map(|e| e.date)
                .collect();
            let dates = playoff_dates(&upcoming, today);

            let all_teams = read_teams(&storage)?;
            match generate_playoffs(
                &league,
                &existing,
                &home_standings,
                &away_standings,
                &sibling.region,
                &all_teams,
                dates,
            ) {
                Ok(ties) => {
                    append_ties(&storage, &ties)?;
                    println!(
                        "Created playoff bracket for {} against {}:",
                        league.name, sibling.name
                    );
                    for tie in &ties {
                        println!(
                            "  round {:>3}  {}  {} v {}",
                            tie.round,
                            tie.scheduled_date,
                            league_engine::storage::team_name(&all_teams, &tie.home_team_id),
                            league_engine::storage::team_name(&all_teams, &tie.away_team_id),
                        );
                    }
                }
                Err(e) => {
                    tracing::error!("Playoff generation failed: {}", e);
                }
            }
        }
    }

    Ok(())
}
