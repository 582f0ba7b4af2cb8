//! Player session state and the inventory operations the combat engine
//! and world generator depend on.

use crate::game::catalog::Catalog;
use crate::game::dice::Dice;
use crate::game::types::{EffectType, Item, Rarity, RoomId, Trader};
use std::collections::HashMap;

/// Health never rises above this; there is no programmatic floor, a
/// negative value is the "defeated" signal.
pub const MAX_HEALTH: i32 = 100;

pub const STARTING_HEALTH: i32 = 100;
pub const STARTING_DAMAGE: i32 = 10;
pub const STARTING_COINS: i32 = 5;

/// Outcome of consuming an inventory item by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemUse {
    /// A health item was consumed; `amount` is the actual gain after the
    /// 100-point cap.
    Healed { item: String, amount: i32 },
    /// A damage item was consumed; the damage stat rose permanently.
    Empowered { item: String, amount: i32 },
    /// Index out of range; nothing changed.
    InvalidIndex,
}

impl ItemUse {
    pub fn consumed(&self) -> bool {
        !matches!(self, ItemUse::InvalidIndex)
    }
}

/// Result of searching the current room for loot.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemSearch {
    /// This room has already been searched.
    AlreadySearched,
    /// Names of the items that went into the inventory.
    Found(Vec<String>),
}

/// Result of attempting a purchase from a trader.
#[derive(Debug, Clone, PartialEq)]
pub enum Purchase {
    Bought { item: String, price: i32 },
    NotEnoughCoins { item: String, price: i32 },
    InvalidIndex,
}

/// The player's mutable world-interaction state. Created once per session
/// (or restored from a save) and mutated by the combat engine, the world
/// generator, and the orchestrator. Nothing else owns it. The persisted
/// subset of these fields lives in [`crate::game::save::SaveRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub name: String,
    pub health: i32,
    pub damage: i32,
    pub coins: i32,
    pub inventory: Vec<Item>,
    /// Room names in visit order; length drives the milestone triggers.
    pub visited_rooms: Vec<String>,
    /// Names of permanently defeated enemies, insertion-ordered so saves
    /// round-trip byte-stable.
    pub defeated_enemy: Vec<String>,
    pub fought_in_room: HashMap<String, bool>,
    pub action_count: i32,
    pub heal_used: i32,
    pub looked_for_items: bool,
    pub current_room: RoomId,
}

impl PlayerState {
    pub fn new(name: &str, starting_room: RoomId, starting_room_name: &str) -> Self {
        Self {
            name: name.to_string(),
            health: STARTING_HEALTH,
            damage: STARTING_DAMAGE,
            coins: STARTING_COINS,
            inventory: Vec::new(),
            visited_rooms: vec![starting_room_name.to_string()],
            defeated_enemy: Vec::new(),
            fought_in_room: HashMap::new(),
            action_count: 0,
            heal_used: 0,
            looked_for_items: false,
            current_room: starting_room,
        }
    }

    /// Restore health, clamped to the cap. Returns the actual gain.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(MAX_HEALTH);
        self.health - before
    }

    pub fn record_defeat(&mut self, enemy_name: &str) {
        if !self.has_defeated(enemy_name) {
            self.defeated_enemy.push(enemy_name.to_string());
        }
    }

    pub fn has_defeated(&self, enemy_name: &str) -> bool {
        self.defeated_enemy.iter().any(|n| n == enemy_name)
    }

    pub fn fought_in(&self, room_name: &str) -> bool {
        self.fought_in_room.get(room_name).copied().unwrap_or(false)
    }

    pub fn mark_fought(&mut self, room_name: &str) {
        self.fought_in_room.insert(room_name.to_string(), true);
    }

    /// Consume an inventory item by index. Health items heal up to the
    /// cap, damage items raise the damage stat permanently; either way
    /// the item leaves the inventory. An invalid index changes nothing.
    pub fn use_item(&mut self, index: usize) -> ItemUse {
        if index >= self.inventory.len() {
            return ItemUse::InvalidIndex;
        }
        let item = self.inventory.remove(index);
        match item.effect_type {
            EffectType::Health => {
                let gained = self.heal(item.value);
                ItemUse::Healed {
                    item: item.name,
                    amount: gained,
                }
            }
            EffectType::Damage => {
                self.damage += item.value;
                ItemUse::Empowered {
                    item: item.name,
                    amount: item.value,
                }
            }
        }
    }

    /// Search the current room for 1-3 items, once per room. Rarity is
    /// drawn from a weighted table (50/30/15/4/1 percent); the concrete
    /// item is a uniform pick among catalog items of that rarity. A
    /// rarity with no catalog entries yields nothing for that draw.
    pub fn look_for_items(&mut self, catalog: &Catalog, dice: &mut dyn Dice) -> ItemSearch {
        if self.looked_for_items {
            return ItemSearch::AlreadySearched;
        }
        self.looked_for_items = true;

        let count = dice.roll(1, 3);
        let mut found = Vec::new();
        for _ in 0..count {
            let rarity = roll_rarity(dice);
            let pool: Vec<&Item> = catalog
                .items
                .iter()
                .filter(|item| item.rarity == rarity)
                .collect();
            if pool.is_empty() {
                continue;
            }
            let item = pool[dice.index(pool.len())].clone();
            found.push(item.name.clone());
            self.inventory.push(item);
        }
        ItemSearch::Found(found)
    }

    /// Buy an item from a trader by index. On success the item moves from
    /// the trader's stock into the inventory and coins are debited;
    /// otherwise nothing changes.
    pub fn buy_from(&mut self, trader: &mut Trader, index: usize) -> Purchase {
        if index >= trader.items.len() {
            return Purchase::InvalidIndex;
        }
        let price = trader.items[index].price;
        if self.coins < price {
            return Purchase::NotEnoughCoins {
                item: trader.items[index].name.clone(),
                price,
            };
        }
        let item = trader.items.remove(index);
        self.coins -= price;
        let name = item.name.clone();
        self.inventory.push(item);
        Purchase::Bought { item: name, price }
    }

    /// Called on every room change.
    pub fn enter_room(&mut self, room: RoomId, room_name: &str) {
        self.current_room = room;
        self.visited_rooms.push(room_name.to_string());
        self.looked_for_items = false;
    }
}

/// Map a 1..=100 roll onto the rarity table:
/// 50% common, 30% rare, 15% super rare, 4% epic, 1% legendary.
pub fn roll_rarity(dice: &mut dyn Dice) -> Rarity {
    match dice.percent() {
        1..=50 => Rarity::Common,
        51..=80 => Rarity::Rare,
        81..=95 => Rarity::SuperRare,
        96..=99 => Rarity::Epic,
        _ => Rarity::Legendary,
    }
}
