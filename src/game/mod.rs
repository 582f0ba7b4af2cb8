//! The game engine: combat, world generation, player state, catalogs,
//! persistence, and the interactive session that ties them together.

pub mod boss;
pub mod cardgame;
pub mod catalog;
pub mod combat;
pub mod dice;
pub mod errors;
pub mod player;
pub mod prompt;
pub mod save;
pub mod session;
pub mod tutorial;
pub mod types;
pub mod visions;
pub mod world;

pub use catalog::Catalog;
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use errors::GameError;
pub use player::PlayerState;
pub use save::SaveStore;
pub use session::{Session, SessionEnd};
pub use world::World;
