//! Entity model for the game world: items, enemies, NPCs, traders, doors,
//! and rooms. These are value-like records; the interesting behavior lives
//! in [`crate::game::combat`], [`crate::game::world`], and
//! [`crate::game::player`].

use serde::{Deserialize, Serialize};

/// Index of a room in the world arena. Doors refer to their destination
/// room through this id rather than owning it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RoomId(pub usize);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    SuperRare,
    Epic,
    Legendary,
}

/// What an item does when consumed: restore health or permanently raise
/// the player's damage stat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Health,
    Damage,
}

/// A consumable or equippable item. Owned by exactly one inventory at a
/// time (the player's or a trader's) and destroyed on use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub name: String,
    pub rarity: Rarity,
    pub effect_type: EffectType,
    pub value: i32,
    pub description: String,
    pub price: i32,
}

impl Item {
    pub fn new(
        name: &str,
        rarity: Rarity,
        effect_type: EffectType,
        value: i32,
        description: &str,
        price: i32,
    ) -> Self {
        Self {
            name: name.to_string(),
            rarity,
            effect_type,
            value,
            description: description.to_string(),
            price,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    FinalBoss,
}

impl Difficulty {
    /// Coin reward for defeating an enemy of this tier in a standard
    /// fight. The tutorial dummy and the final boss award nothing.
    pub fn coin_reward(self) -> i32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
            Difficulty::FinalBoss => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::FinalBoss => "FINAL BOSS",
        }
    }
}

/// A combatant. Health is mutated during combat; identity for
/// defeat-tracking is the name, not an instance id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enemy {
    pub name: String,
    pub description: String,
    pub health: i32,
    pub damage: i32,
    pub difficulty: Difficulty,
}

impl Enemy {
    pub fn new(
        name: &str,
        description: &str,
        health: i32,
        damage: i32,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            health,
            damage,
            difficulty,
        }
    }
}

/// One response the player can pick during a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogueOption {
    pub prompt: String,
    pub reply: String,
}

/// A top-level line an NPC opens with, plus the responses it accepts.
/// Options keep their seed-file order so menus are deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogueNode {
    pub line: String,
    #[serde(default)]
    pub options: Vec<DialogueOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Npc {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub dialogues: Vec<DialogueNode>,
}

impl Npc {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            dialogues: Vec::new(),
        }
    }

    pub fn with_dialogue(mut self, line: &str, options: Vec<DialogueOption>) -> Self {
        self.dialogues.push(DialogueNode {
            line: line.to_string(),
            options,
        });
        self
    }
}

/// A merchant NPC with a stock of items for sale. Purchases move the item
/// out of this list into the buyer's inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trader {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub dialogues: Vec<DialogueNode>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A character occupying a room. Dispatch (conversation vs. combat)
/// branches on the variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Character {
    Npc(Npc),
    Enemy(Enemy),
}

impl Character {
    pub fn name(&self) -> &str {
        match self {
            Character::Npc(npc) => &npc.name,
            Character::Enemy(enemy) => &enemy.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Character::Npc(npc) => &npc.description,
            Character::Enemy(enemy) => &enemy.description,
        }
    }
}

/// An edge in the world graph. The destination is resolved exactly once,
/// at creation; a door built with `destination: None` stays a dead end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Door {
    pub name: String,
    pub description: String,
    pub destination: Option<RoomId>,
    pub locked: bool,
}

impl Door {
    pub fn new(name: &str, description: &str, destination: Option<RoomId>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            destination,
            locked: false,
        }
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

/// A node in the world graph. Door labels are unique and sequential by
/// construction; the door set grows from empty to its final size exactly
/// once. At most one trader per room, held by `Option`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub name: String,
    pub description: String,
    pub doors: Vec<Door>,
    pub characters: Vec<Character>,
    pub trader: Option<Trader>,
}

impl Room {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            doors: Vec::new(),
            characters: Vec::new(),
            trader: None,
        }
    }

    pub fn door(&self, index: usize) -> Option<&Door> {
        self.doors.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_rewards_by_tier() {
        assert_eq!(Difficulty::Easy.coin_reward(), 2);
        assert_eq!(Difficulty::Medium.coin_reward(), 3);
        assert_eq!(Difficulty::Hard.coin_reward(), 5);
        assert_eq!(Difficulty::FinalBoss.coin_reward(), 0);
    }

    #[test]
    fn rarity_serializes_snake_case() {
        let json = serde_json::to_string(&Rarity::SuperRare).unwrap();
        assert_eq!(json, "\"super_rare\"");
        let back: Rarity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rarity::SuperRare);
    }

    #[test]
    fn character_dispatch_by_variant() {
        let npc = Character::Npc(Npc::new("Old Hermit", "A quiet man."));
        let foe = Character::Enemy(Enemy::new(
            "Goblin",
            "Small and mean.",
            12,
            3,
            Difficulty::Easy,
        ));
        assert_eq!(npc.name(), "Old Hermit");
        assert_eq!(foe.name(), "Goblin");
        assert!(matches!(foe, Character::Enemy(_)));
    }

    #[test]
    fn door_without_destination_is_dead_end() {
        let door = Door::new("Door 1", "A plain door.", None);
        assert!(door.destination.is_none());
        assert!(!door.locked);
        let locked = Door::new("Door 2", "Iron-bound.", None).locked();
        assert!(locked.locked);
    }
}
