//! Procedural world graph.
//!
//! Rooms live in an arena (`Vec<Room>`) and doors refer to destinations by
//! [`RoomId`]. A room's doors are generated once, on the player's first
//! need to leave it; every door's destination room is created eagerly at
//! door-creation time (characters populated, doors still empty, so the
//! graph grows one frontier at a time).

use crate::game::catalog::{Catalog, FALLBACK_DOOR_DESCRIPTION, FALLBACK_ROOM_DESCRIPTION};
use crate::game::dice::Dice;
use crate::game::player::PlayerState;
use crate::game::types::{Character, Door, Room, RoomId};
use log::debug;

/// Result of trying to leave through a door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Traverse {
    /// The chosen number did not name a door.
    InvalidDoor,
    /// The door is locked; no movement.
    Locked { door: String },
    /// The door leads nowhere; no movement.
    DeadEnd,
    /// Moved into a new room and collected the room-clear bonus.
    Moved { room: RoomId, coins_awarded: i32 },
}

/// Coins awarded for clearing a room (stepping through any working door).
pub const ROOM_CLEAR_BONUS: i32 = 1;

pub struct World {
    rooms: Vec<Room>,
    catalog: Catalog,
}

impl World {
    /// An empty world over an injected, immutable catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            rooms: Vec::new(),
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.0]
    }

    /// A room with a fixed description and no occupants. Used for the
    /// starting room, which hosts the guide rather than random NPCs.
    pub fn create_empty_room(&mut self, name: &str, description: &str) -> RoomId {
        let id = RoomId(self.rooms.len());
        self.rooms.push(Room::new(name, description));
        id
    }

    /// Create a room and populate its characters exactly once: 0-3 NPCs
    /// sampled without replacement, and exactly one trader (chosen with
    /// replacement from the catalog, stock deep-copied). A missing
    /// description is sampled from the catalog, with a generic fallback
    /// when the pool is empty.
    pub fn create_room(
        &mut self,
        name: &str,
        description: Option<&str>,
        dice: &mut dyn Dice,
    ) -> RoomId {
        let description = match description {
            Some(text) => text.to_string(),
            None => {
                if self.catalog.room_descriptions.is_empty() {
                    FALLBACK_ROOM_DESCRIPTION.to_string()
                } else {
                    let i = dice.index(self.catalog.room_descriptions.len());
                    self.catalog.room_descriptions[i].clone()
                }
            }
        };

        let mut room = Room::new(name, &description);

        if !self.catalog.npcs.is_empty() {
            let count = (dice.roll(0, 3) as usize).min(self.catalog.npcs.len());
            let mut pool: Vec<usize> = (0..self.catalog.npcs.len()).collect();
            for _ in 0..count {
                let picked = pool.swap_remove(dice.index(pool.len()));
                room.characters
                    .push(Character::Npc(self.catalog.npcs[picked].clone()));
            }
        }

        if !self.catalog.traders.is_empty() {
            let picked = dice.index(self.catalog.traders.len());
            // Clone gives the room its own stock; sales never touch the catalog.
            room.trader = Some(self.catalog.traders[picked].clone());
        }

        debug!(
            "created room '{}' ({} npcs, trader: {})",
            name,
            room.characters.len(),
            room.trader.is_some()
        );

        let id = RoomId(self.rooms.len());
        self.rooms.push(room);
        id
    }

    /// Attach 2-4 doors to a room. Labels are sequential ("Door 1"..),
    /// descriptions are drawn without replacement from a shuffled copy of
    /// the catalog pool (generic fallback once exhausted), and every door
    /// gets a fresh destination room named from the running room count.
    ///
    /// Callers are responsible for invoking this only on rooms with no
    /// doors yet; door sets never regenerate.
    pub fn add_doors(&mut self, room_id: RoomId, dice: &mut dyn Dice) {
        let count = dice.roll(2, 4);
        let mut descriptions = self.shuffled_door_descriptions(dice);

        for i in 0..count {
            let door_name = format!("Door {}", i + 1);
            let door_description = descriptions
                .pop()
                .unwrap_or_else(|| FALLBACK_DOOR_DESCRIPTION.to_string());
            let destination_name = format!("Room {}", self.rooms.len() + 1);
            let destination = self.create_room(&destination_name, None, dice);
            self.rooms[room_id.0]
                .doors
                .push(Door::new(&door_name, &door_description, Some(destination)));
        }

        debug!(
            "room '{}' grew {} doors",
            self.rooms[room_id.0].name, count
        );
    }

    /// Move the player through a door of their current room. Locked doors
    /// and dead ends never mutate the player; a successful move appends
    /// to the visited list, pays the room-clear bonus, and triggers door
    /// generation for a room entered for the first time.
    pub fn traverse_door(
        &mut self,
        player: &mut PlayerState,
        door_index: usize,
        dice: &mut dyn Dice,
    ) -> Traverse {
        let current = player.current_room;
        let door = match self.rooms[current.0].doors.get(door_index) {
            Some(door) => door.clone(),
            None => return Traverse::InvalidDoor,
        };

        if door.locked {
            return Traverse::Locked { door: door.name };
        }
        let destination = match door.destination {
            Some(id) => id,
            None => return Traverse::DeadEnd,
        };

        let room_name = self.rooms[destination.0].name.clone();
        player.enter_room(destination, &room_name);
        player.coins += ROOM_CLEAR_BONUS;

        if self.rooms[destination.0].doors.is_empty() {
            self.add_doors(destination, dice);
        }

        Traverse::Moved {
            room: destination,
            coins_awarded: ROOM_CLEAR_BONUS,
        }
    }

    fn shuffled_door_descriptions(&self, dice: &mut dyn Dice) -> Vec<String> {
        let mut pool = self.catalog.door_descriptions.clone();
        // Fisher-Yates; drawing then happens by popping from the end.
        for i in (1..pool.len()).rev() {
            let j = dice.index(i + 1);
            pool.swap(i, j);
        }
        pool
    }
}
