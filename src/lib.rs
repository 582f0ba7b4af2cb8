//! # MindMaze - A Labyrinth of Doors and Buried Memories
//!
//! MindMaze is a turn-based text adventure. Every door leads to a freshly
//! generated room, every room may hold monsters, traders, and loot, and
//! every traversal surfaces a fragment of the player's forgotten past.
//!
//! ## Features
//!
//! - **Procedural World**: Rooms grow a labyrinth one frontier at a time,
//!   with 2-4 doors each and descriptions drawn from data-driven catalogs.
//! - **Turn-Based Combat**: One encounter engine drives practice fights,
//!   room fights, and the final boss under per-context rulesets.
//! - **Data-Driven Content**: Monsters, items, NPCs, traders, and room
//!   flavor load from JSON seed files and degrade gracefully when absent.
//! - **Persistence**: Multi-player JSON save store with atomic writes.
//! - **Deterministic Runs**: All randomness flows through an injectable
//!   dice trait; a fixed seed replays an entire labyrinth.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mindmaze::config::Config;
//! use mindmaze::game::{Catalog, SaveStore, SeededDice, Session};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     let catalog = Catalog::load_from_dir(config.storage.seeds_dir());
//!     let store = SaveStore::new(config.storage.save_path());
//!     let dice = Box::new(SeededDice::from_entropy());
//!
//!     let stdin = std::io::stdin();
//!     let stdout = std::io::stdout();
//!     let mut session = Session::new(catalog, store, dice, stdin.lock(), stdout.lock());
//!     session.run()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - the engine: combat, world generation, player state, seed
//!   catalogs, persistence, and the interactive session loop
//! - [`config`] - TOML configuration with validation and defaults
//! - [`logutil`] - log sanitizing helpers for player-supplied strings

pub mod config;
pub mod game;
pub mod logutil;
