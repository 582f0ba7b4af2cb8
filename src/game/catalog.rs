//! Seed catalog loading for data-driven content.
//!
//! Content lives in JSON files under `data/seeds/`. Loading failures are
//! never fatal to gameplay: each loader reports its error, the catalog
//! substitutes an empty collection, and the world generator falls back to
//! generic descriptions.

use crate::game::errors::GameError;
use crate::game::types::{Enemy, Item, Npc, Trader};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Generic fallback used when the room description list is empty.
pub const FALLBACK_ROOM_DESCRIPTION: &str = "An empty room.";
/// Generic fallback used when the door description list is empty or the
/// shuffled pool is exhausted mid-generation.
pub const FALLBACK_DOOR_DESCRIPTION: &str = "A plain door.";

#[derive(Debug, Deserialize)]
struct MonsterSeed {
    monsters: Vec<Enemy>,
}

#[derive(Debug, Deserialize)]
struct ItemSeed {
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct NpcSeed {
    #[serde(default)]
    npcs: Vec<Npc>,
    #[serde(default)]
    traders: Vec<Trader>,
}

#[derive(Debug, Deserialize)]
struct DescriptionSeed {
    #[serde(default)]
    room_descriptions: Vec<String>,
    #[serde(default)]
    door_descriptions: Vec<String>,
}

/// Immutable, read-only content templates. Constructed once and passed
/// into the world generator and session explicitly; tests substitute
/// their own via [`Catalog::default`] plus the builder helpers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub monsters: Vec<Enemy>,
    pub items: Vec<Item>,
    pub npcs: Vec<Npc>,
    pub traders: Vec<Trader>,
    pub room_descriptions: Vec<String>,
    pub door_descriptions: Vec<String>,
}

impl Catalog {
    /// Load all seed files from a directory. Each file degrades
    /// independently: a missing or malformed file logs a warning and
    /// leaves that collection empty.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let mut catalog = Catalog::default();

        match load_monsters(dir.join("monsters.json")) {
            Ok(monsters) => catalog.monsters = monsters,
            Err(e) => warn!("monster catalog unavailable: {}", e),
        }
        match load_items(dir.join("items.json")) {
            Ok(items) => catalog.items = items,
            Err(e) => warn!("item catalog unavailable: {}", e),
        }
        match load_npcs(dir.join("npcs.json")) {
            Ok((npcs, traders)) => {
                catalog.npcs = npcs;
                catalog.traders = traders;
            }
            Err(e) => warn!("npc catalog unavailable: {}", e),
        }
        match load_descriptions(dir.join("descriptions.json")) {
            Ok((rooms, doors)) => {
                catalog.room_descriptions = rooms;
                catalog.door_descriptions = doors;
            }
            Err(e) => warn!("description catalog unavailable: {}", e),
        }

        catalog
    }

    pub fn with_monsters(mut self, monsters: Vec<Enemy>) -> Self {
        self.monsters = monsters;
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn with_npcs(mut self, npcs: Vec<Npc>) -> Self {
        self.npcs = npcs;
        self
    }

    pub fn with_traders(mut self, traders: Vec<Trader>) -> Self {
        self.traders = traders;
        self
    }

    pub fn with_descriptions(mut self, rooms: Vec<String>, doors: Vec<String>) -> Self {
        self.room_descriptions = rooms;
        self.door_descriptions = doors;
        self
    }
}

fn parse_error<P: AsRef<Path>>(path: P, err: serde_json::Error) -> GameError {
    GameError::Catalog {
        file: path.as_ref().display().to_string(),
        message: err.to_string(),
    }
}

/// Load enemies from `monsters.json`.
pub fn load_monsters<P: AsRef<Path>>(path: P) -> Result<Vec<Enemy>, GameError> {
    let contents = fs::read_to_string(&path)?;
    let seed: MonsterSeed = serde_json::from_str(&contents).map_err(|e| parse_error(&path, e))?;
    Ok(seed.monsters)
}

/// Load items from `items.json`.
pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<Item>, GameError> {
    let contents = fs::read_to_string(&path)?;
    let seed: ItemSeed = serde_json::from_str(&contents).map_err(|e| parse_error(&path, e))?;
    Ok(seed.items)
}

/// Load NPCs and traders from `npcs.json`. Trader item lists deserialize
/// into owned [`Item`] values; each room later deep-copies its trader's
/// stock so purchases never alias the catalog.
pub fn load_npcs<P: AsRef<Path>>(path: P) -> Result<(Vec<Npc>, Vec<Trader>), GameError> {
    let contents = fs::read_to_string(&path)?;
    let seed: NpcSeed = serde_json::from_str(&contents).map_err(|e| parse_error(&path, e))?;
    Ok((seed.npcs, seed.traders))
}

/// Load room and door description pools from `descriptions.json`.
pub fn load_descriptions<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<String>, Vec<String>), GameError> {
    let contents = fs::read_to_string(&path)?;
    let seed: DescriptionSeed =
        serde_json::from_str(&contents).map_err(|e| parse_error(&path, e))?;
    Ok((seed.room_descriptions, seed.door_descriptions))
}
