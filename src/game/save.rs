//! Save-game persistence.
//!
//! The store is a single JSON object keyed by player name; each value is a
//! [`SaveRecord`]. Writes are atomic (temp file + rename under an
//! exclusive lock) so an interrupted save never corrupts earlier games.
//! Loading a name that is not present, or loading before any save exists,
//! is a reported no-op for the caller to message about.

use crate::game::errors::GameError;
use crate::game::player::PlayerState;
use crate::game::types::Item;
use fs2::FileExt;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The persisted subset of a player session, in the exact wire shape the
/// save file uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveRecord {
    pub name: String,
    pub health: i32,
    pub damage: i32,
    pub visited_rooms: Vec<String>,
    pub heal_used: i32,
    pub action_count: i32,
    pub defeated_enemy: Vec<String>,
    pub inventory: Vec<Item>,
    pub coins: i32,
}

impl SaveRecord {
    pub fn from_player(player: &PlayerState) -> Self {
        Self {
            name: player.name.clone(),
            health: player.health,
            damage: player.damage,
            visited_rooms: player.visited_rooms.clone(),
            heal_used: player.heal_used,
            action_count: player.action_count,
            defeated_enemy: player.defeated_enemy.clone(),
            inventory: player.inventory.clone(),
            coins: player.coins,
        }
    }

    /// Restore the persisted fields into a live session. Transient state
    /// (current room, per-room flags) is left alone; the world graph is
    /// not part of a save.
    pub fn apply_to(&self, player: &mut PlayerState) {
        player.name = self.name.clone();
        player.health = self.health;
        player.damage = self.damage;
        player.visited_rooms = self.visited_rooms.clone();
        player.heal_used = self.heal_used;
        player.action_count = self.action_count;
        player.defeated_enemy = self.defeated_enemy.clone();
        player.inventory = self.inventory.clone();
        player.coins = self.coins;
    }
}

pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Upsert this player's record, preserving everyone else's.
    pub fn save(&self, player: &PlayerState) -> Result<(), GameError> {
        let mut store = self.read_all().unwrap_or_default();
        store.insert(player.name.clone(), SaveRecord::from_player(player));
        let body = serde_json::to_string_pretty(&store)?;
        write_json_atomic(&self.path, &body)?;
        info!("saved game for player {}", player.name);
        Ok(())
    }

    /// Fetch one player's record. Distinguishes "no save file yet" from
    /// "file exists but this name is unknown" so callers can message each
    /// case without treating either as fatal.
    pub fn load(&self, name: &str) -> Result<SaveRecord, GameError> {
        if !self.path.exists() {
            return Err(GameError::SaveStoreMissing(
                self.path.display().to_string(),
            ));
        }
        let store = self.read_all()?;
        store
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::SaveNotFound(name.to_string()))
    }

    /// Names with saved games; empty when the store does not exist yet.
    pub fn player_names(&self) -> Vec<String> {
        self.read_all()
            .map(|store| store.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.player_names().iter().any(|n| n == name)
    }

    fn read_all(&self) -> Result<BTreeMap<String, SaveRecord>, GameError> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

fn write_json_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;

    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("save.json");

    // Exclusive lock on a sidecar file guards against a second process
    // racing the rename. The target itself is only ever created by the
    // rename, so it never exists empty or half-written.
    let lock_path = dir.join(format!(".{}.lock", base));
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(&lock_path)?;
    lock_file.lock_exclusive()?;

    let tmp_path = dir.join(format!(".{}.tmp-{}", base, std::process::id()));
    {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.sync_all()?;
    }
    std::fs::rename(&tmp_path, path)?;
    if let Ok(dirf) = File::open(dir) {
        let _ = dirf.sync_all();
    }
    drop(lock_file);
    Ok(())
}
