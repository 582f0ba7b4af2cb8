//! The one-time side-quest encounter: a mermaid offers a four-card draw.
//! Spades punishes, anything else rewards an epic weapon. Fires once, at
//! the eight-rooms-visited milestone.

use crate::game::dice::Dice;
use crate::game::player::PlayerState;
use crate::game::types::{EffectType, Item, Rarity};

/// Rooms visited before the card game is offered.
pub const CARD_GAME_MILESTONE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

impl Card {
    pub fn from_choice(choice: i32) -> Option<Card> {
        match choice {
            0 => Some(Card::Hearts),
            1 => Some(Card::Diamonds),
            2 => Some(Card::Spades),
            3 => Some(Card::Clubs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardGameResult {
    /// Declined the offer; it will not come again.
    Declined,
    /// Picked an invalid card and forfeited the chance.
    Forfeited,
    /// Spades: health halved.
    Punished { health_after: i32 },
    /// Any other card: an epic damage item.
    Rewarded { item: String, value: i32 },
}

/// The reward table the mermaid draws from.
fn epic_rewards() -> Vec<Item> {
    vec![
        Item::new(
            "Epic Sword",
            Rarity::Epic,
            EffectType::Damage,
            20,
            "A sword of epic proportions.",
            0,
        ),
        Item::new(
            "Epic Axe",
            Rarity::Epic,
            EffectType::Damage,
            15,
            "An axe with unstoppable power.",
            0,
        ),
        Item::new(
            "Epic Bow",
            Rarity::Epic,
            EffectType::Damage,
            18,
            "A bow that shoots arrows with great precision.",
            0,
        ),
    ]
}

/// One-shot card game state.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardGame {
    played: bool,
}

impl CardGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> bool {
        self.played
    }

    pub fn decline(&mut self) -> CardGameResult {
        self.played = true;
        CardGameResult::Declined
    }

    /// Resolve a card pick. Spades halves the player's health; the other
    /// three cards award a random epic damage item. An out-of-range pick
    /// forfeits the game entirely.
    pub fn play(
        &mut self,
        player: &mut PlayerState,
        choice: i32,
        dice: &mut dyn Dice,
    ) -> CardGameResult {
        self.played = true;
        let card = match Card::from_choice(choice) {
            Some(card) => card,
            None => return CardGameResult::Forfeited,
        };

        if card == Card::Spades {
            player.health /= 2;
            return CardGameResult::Punished {
                health_after: player.health,
            };
        }

        let rewards = epic_rewards();
        let item = rewards[dice.index(rewards.len())].clone();
        let result = CardGameResult::Rewarded {
            item: item.name.clone(),
            value: item.value,
        };
        player.inventory.push(item);
        result
    }
}
