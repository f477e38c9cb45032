//! GeoQuiz terminal front end
//!
//! Usage:
//!   geoquiz                          # play, resuming a saved game if any
//!   geoquiz play --mode oceania      # start a continent game
//!   geoquiz play --lang fr --fresh   # ignore the saved game
//!   geoquiz lookup Allemagne Germani # resolve guesses without playing
//!   geoquiz modes                    # list mode slugs

mod game;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoquiz_core::mode::group_slug;
use geoquiz_core::normalize::normalize_guess;
use geoquiz_core::snapshot::load_resumable;
use geoquiz_core::{
    Catalog, Collection, GameMode, GuessResolver, Guessable, Language, QuizConfig, ResolvedGuess,
    Session, SnapshotStore,
};

use crate::game::Game;
use crate::store::FileSnapshotStore;

/// Default configuration path
const DEFAULT_CONFIG_PATH: &str = "config/geoquiz.yaml";

#[derive(Parser)]
#[command(name = "geoquiz")]
#[command(about = "Name every country or U.S. state you can")]
struct Cli {
    /// Path to the YAML configuration
    #[arg(short, long, env = "GEOQUIZ_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively (the default)
    Play {
        /// Mode slug, e.g. classic, timed, us-states, oceania, west
        #[arg(short, long)]
        mode: Option<String>,

        /// Guess language (en, fr)
        #[arg(short, long)]
        lang: Option<String>,

        /// Start a new game even if one was saved
        #[arg(long)]
        fresh: bool,
    },

    /// Resolve guesses and show what they match
    Lookup {
        /// Guess language (en, fr)
        #[arg(short, long, default_value = "en")]
        lang: String,

        /// Match against U.S. states instead of countries
        #[arg(long)]
        states: bool,

        guesses: Vec<String>,
    },

    /// List available game modes
    Modes,

    /// Delete the saved game
    Reset,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the prompt
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoquiz=info,geoquiz_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let data_dir = config.data_dir();
    let catalog = Catalog::load_dir(&data_dir)
        .with_context(|| format!("loading tables from {}", data_dir.display()))?;

    match cli.command.unwrap_or(Commands::Play {
        mode: None,
        lang: None,
        fresh: false,
    }) {
        Commands::Play { mode, lang, fresh } => cmd_play(&config, &catalog, mode, lang, fresh),
        Commands::Lookup {
            lang,
            states,
            guesses,
        } => cmd_lookup(&catalog, &lang, states, &guesses),
        Commands::Modes => {
            cmd_modes(&catalog);
            Ok(())
        }
        Commands::Reset => {
            FileSnapshotStore::new(&config.snapshot_path).clear()?;
            println!("Saved game deleted.");
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<QuizConfig> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Path::new(DEFAULT_CONFIG_PATH),
        None => {
            tracing::info!("No configuration file, using defaults");
            return Ok(QuizConfig::default());
        }
    };

    tracing::info!(path = %path.display(), "Loading configuration");
    let config = QuizConfig::from_file(path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    tracing::info!(
        mode = %config.default_mode,
        language = %config.default_language,
        timed_limit_secs = config.timed_limit_secs,
        "Configuration loaded"
    );
    Ok(config)
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_play(
    config: &QuizConfig,
    catalog: &Catalog,
    mode: Option<String>,
    lang: Option<String>,
    fresh: bool,
) -> Result<()> {
    let store = FileSnapshotStore::new(&config.snapshot_path);
    let mut settings = config.session_settings();
    if let Some(lang) = lang {
        settings.language = lang.parse::<Language>()?;
    }

    let resumable = if fresh || mode.is_some() {
        None
    } else {
        load_resumable(&store, catalog)?
    };

    let session = match resumable {
        Some(state) => {
            println!(
                "Resuming your {} game ({} guessed). Type :restart for a new one.",
                state.mode.slug().cyan(),
                state.guessed_codes.len()
            );
            Session::resume(catalog, state, settings)
        }
        None => {
            let slug = mode.as_deref().unwrap_or(&config.default_mode);
            let mode = GameMode::parse(slug, catalog)?;
            Session::new(catalog, mode, settings)
        }
    };

    let mut game = Game::new(session, &store as &dyn SnapshotStore);
    game::run(&mut game);
    Ok(())
}

fn cmd_lookup(catalog: &Catalog, lang: &str, states: bool, guesses: &[String]) -> Result<()> {
    let language: Language = lang.parse()?;
    let collection = if states {
        Collection::States
    } else {
        Collection::Countries
    };
    let resolver = GuessResolver::new(catalog);

    for guess in guesses {
        match resolver.resolve(guess, language, collection) {
            ResolvedGuess::Primary(entity) => println!(
                "{:<24} {} {} ({})",
                guess,
                entity.code().green(),
                entity.display_name(language),
                entity.group()
            ),
            ResolvedGuess::Dependency(dep) => {
                let location = if dep.has_geographic_override() {
                    format!(", located in {}", dep.group())
                } else {
                    String::new()
                };
                println!(
                    "{:<24} {} {} (territory of {}{})",
                    guess,
                    dep.code.yellow(),
                    dep.display_name(language),
                    dep.parent_name,
                    location
                );
            }
            ResolvedGuess::NoMatch(_) => {
                let input = normalize_guess(guess);
                let closest = match collection {
                    Collection::Countries => catalog
                        .countries()
                        .best_candidate(&input, language)
                        .map(|(c, score)| (c.display_name(language).to_string(), score)),
                    Collection::States => catalog
                        .states()
                        .best_candidate(&input, language)
                        .map(|(s, score)| (s.name.clone(), score)),
                };
                match closest {
                    Some((name, score)) => println!(
                        "{:<24} {} (closest: {} at {:.2})",
                        guess,
                        "no match".red(),
                        name,
                        score
                    ),
                    None => println!("{:<24} {}", guess, "no match".red()),
                }
            }
        }
    }
    Ok(())
}

fn cmd_modes(catalog: &Catalog) {
    println!("{}", "Countries".bold());
    println!("  {:<16} every country, clock counts up", "classic");
    println!("  {:<16} every country against the clock", "timed");
    for continent in catalog.continents() {
        println!("  {:<16} {} only", group_slug(continent), continent);
    }
    println!("{}", "U.S. states".bold());
    println!("  {:<16} all 50 states", "us-states");
    for region in catalog.regions() {
        println!("  {:<16} {} only", group_slug(region), region);
    }
}
