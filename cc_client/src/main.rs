//! Creature Cup: a single-elimination tournament between creatures.
//!
//! The client fetches a roster from PokeAPI (or a JSON file), selects the
//! field, and plays the tournament on the console or in a terminal dashboard.

use anyhow::{Context, Result};
use cc_client::{
    api_client::PokeApiClient,
    config::{ClientConfig, ConfigOverrides, FetchMode},
    console::ConsoleReporter,
    tui_app::Dashboard,
};
use creature_cup::{Draw, Roster, RosterProvider, RosterTable, StaticRoster, TournamentEngine};
use log::info;
use pico_args::Arguments;
use std::path::PathBuf;

const HELP: &str = "\
Run a creature tournament

USAGE:
  cc_client [OPTIONS]

OPTIONS:
  --count N             Contestants in the tournament  [default: 16]
  --limit N             Creatures fetched by ID 1..=N (1-200)  [default: 100]
  --rule RULE           Match rule: score or hp  [default: hp]
  --seed SEED           Seed for reproducible draws
  --api URL             Creature endpoint  [default: https://pokeapi.co/api/v2/pokemon]
  --delay-ms MS         Pause between requests  [default: 100]
  --max-id N            Highest ID for --random-ids  [default: 898]
  --roster-file PATH    Load the roster from a JSON file instead of HTTP

FLAGS:
  --random-ids          Fetch distinct random IDs instead of 1..=limit
  --no-shuffle          Keep the field order between rounds
  --tui                 Use TUI (Terminal UI) mode
  -v, --verbose         Print the strike log of HP matches
  -h, --help            Print help information

ENVIRONMENT:
  CC_CONTESTANTS, CC_FETCH_LIMIT, CC_RULE, CC_SEED, CC_API_URL,
  CC_FETCH_DELAY_MS, CC_MAX_ID, CC_SHUFFLE, RUST_LOG
";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = ConfigOverrides {
        contestants: pargs.opt_value_from_str("--count")?,
        fetch_limit: pargs.opt_value_from_str("--limit")?,
        rule: pargs.opt_value_from_str("--rule")?,
        seed: pargs.opt_value_from_str("--seed")?,
        api_url: pargs.opt_value_from_str("--api")?,
        fetch_delay_ms: pargs.opt_value_from_str("--delay-ms")?,
        max_id: pargs.opt_value_from_str("--max-id")?,
        roster_file: pargs.opt_value_from_str::<_, PathBuf>("--roster-file")?,
        random_ids: pargs.contains("--random-ids"),
        no_shuffle: pargs.contains("--no-shuffle"),
        tui: pargs.contains("--tui"),
        verbose: pargs.contains(["-v", "--verbose"]),
    };

    let config = ClientConfig::from_env(overrides)?;
    config.validate()?;

    // The dashboard owns the terminal, so only warnings reach stderr there
    let default_filter = if config.tui { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();

    run(config).await
}

async fn run(config: ClientConfig) -> Result<()> {
    let mut draw = config.draw();
    let roster = load_roster(&config, &mut draw).await?;
    info!("Roster holds {} creatures", roster.len());

    let field = roster
        .select(config.contestants, &mut draw)
        .context("Failed to select the tournament field")?;
    let engine = TournamentEngine::new(config.tournament_config());

    if config.tui {
        let dashboard = Dashboard::new(&roster, field, engine, draw, config.verbose)?;

        let terminal = ratatui::init();
        let result = dashboard.run(terminal);
        ratatui::restore();

        result?;
    } else {
        let mut reporter = ConsoleReporter::new(config.verbose);
        reporter.print_roster(&RosterTable::from_contestants(&field));

        let outcome = engine.run(field, &mut draw, &mut reporter)?;
        info!(
            "{} won in {} round(s)",
            outcome.champion.name,
            outcome.round_count()
        );
    }

    Ok(())
}

async fn load_roster(config: &ClientConfig, draw: &mut Draw) -> Result<Roster> {
    if let Some(path) = &config.roster_file {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read roster file {}", path.display()))?;
        let provider = StaticRoster::from_json(&json)
            .with_context(|| format!("Failed to parse roster file {}", path.display()))?;
        return Ok(provider.fetch(usize::MAX).await?);
    }

    let client = PokeApiClient::new(config.api_url.clone()).with_delay(config.fetch_delay);

    match config.fetch_mode {
        FetchMode::Range => {
            info!(
                "Fetching creatures 1..={} from {}",
                config.fetch_limit,
                client.base_url()
            );
            Ok(client.fetch(config.fetch_limit).await?)
        }
        FetchMode::RandomIds => {
            info!(
                "Fetching {} random creatures (IDs up to {}) from {}",
                config.contestants,
                config.max_id,
                client.base_url()
            );
            client
                .fetch_random(config.contestants, config.max_id, draw)
                .await
        }
    }
}
