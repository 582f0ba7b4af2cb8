//! Binary entrypoint for the MindMaze CLI.
//!
//! Commands:
//! - `play [--seed <n>]` - start an interactive game
//! - `init` - create a starter `config.toml`
//! - `saves` - list saved games
//!
//! See the library crate docs for module-level details: `mindmaze::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use mindmaze::config::Config;
use mindmaze::game::{Catalog, Dice, GameError, SaveStore, SeededDice, Session, SessionEnd};

#[derive(Parser)]
#[command(name = "mindmaze")]
#[command(about = "A turn-based text adventure through a procedurally expanding labyrinth")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive game
    Play {
        /// RNG seed for a reproducible run (overrides the config)
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Initialize a new configuration file
    Init,
    /// List saved games
    Saves,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init, which
    // writes the default config later).
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Play { seed } => {
            let config = pre_config.unwrap_or_default();
            info!("Starting MindMaze v{}", env!("CARGO_PKG_VERSION"));

            let catalog = Catalog::load_from_dir(config.storage.seeds_dir());
            let store = SaveStore::new(config.storage.save_path());
            let dice: Box<dyn Dice> = match seed.or(config.rng.seed) {
                Some(seed) => {
                    info!("Using fixed RNG seed {}", seed);
                    Box::new(SeededDice::from_seed(seed))
                }
                None => Box::new(SeededDice::from_entropy()),
            };

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut session =
                Session::new(catalog, store, dice, stdin.lock(), stdout.lock());
            let end = match session.run() {
                Ok(end) => end,
                // A closed stdin (ctrl-D) is a quiet quit, not a crash.
                Err(GameError::InputClosed) => {
                    println!();
                    SessionEnd::Quit
                }
                Err(e) => return Err(e.into()),
            };
            info!("Session ended: {:?}", end);
        }
        Commands::Init => {
            info!("Initializing new configuration");
            Config::create_default(&cli.config)?;
            info!("Configuration file created at {}", cli.config);
            println!("Wrote {}. Edit it, then run `mindmaze play`.", cli.config);
        }
        Commands::Saves => {
            let config = pre_config.unwrap_or_default();
            let store = SaveStore::new(config.storage.save_path());
            let names = store.player_names();
            if names.is_empty() {
                println!("No saved games at {}.", store.path().display());
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level.
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.as_ref().and_then(|c| c.logging.file.clone());
    if let Some(ref file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
        {
            let mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            let write_mutex = mutex.clone();

            // When a log file is configured the game keeps its stdout
            // clean; records echo to the terminal only under -v, and only
            // when stderr really is one.
            let echo = verbosity > 0 && atty::is(atty::Stream::Stderr);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if echo {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        } else {
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }

    let _ = builder.try_init();
}
