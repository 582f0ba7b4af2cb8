//! Final boss encounter construction. The fight itself runs through the
//! shared [`crate::game::combat::Encounter`] under the FinalBoss ruleset.

use crate::game::combat::{Encounter, Ruleset};
use crate::game::dice::Dice;
use crate::game::player::PlayerState;
use crate::game::types::{Difficulty, Enemy};

pub const BOSS_NAME: &str = "Lord of Shadows";

/// Inclusive range for the visited-room threshold that triggers the boss.
/// Rolled once at session start.
pub const BOSS_MILESTONE_RANGE: (i32, i32) = (20, 25);

/// Roll the boss and wrap it in a FinalBoss-ruleset encounter. Health is
/// uniform 250-300, damage uniform 10-20.
pub fn final_boss_encounter(dice: &mut dyn Dice) -> Encounter {
    let boss = Enemy::new(
        BOSS_NAME,
        "The final test of your strength and courage.",
        dice.roll(250, 300),
        dice.roll(10, 20),
        Difficulty::FinalBoss,
    );
    Encounter::new(boss, Ruleset::FinalBoss)
}

/// The chamber description shown before the fight begins.
pub fn chamber_lines(player: &PlayerState) -> Vec<String> {
    vec![
        format!(
            "{}, you stand in a dark, ominous chamber. This is the final test \
             of your strength and courage. The air is thick with tension.",
            player.name
        ),
        format!(
            "Your current health: {}, strength: {}, and you have {} item(s) in your inventory.",
            player.health,
            player.damage,
            player.inventory.len()
        ),
        format!("The Final Boss, {}, stands before you.", BOSS_NAME),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dice::{ScriptedDice, SeededDice};
    use crate::game::types::RoomId;

    #[test]
    fn boss_stats_come_from_the_rolled_ranges() {
        let mut dice = ScriptedDice::new(&[277, 14]);
        let encounter = final_boss_encounter(&mut dice);
        assert_eq!(encounter.enemy.name, BOSS_NAME);
        assert_eq!(encounter.enemy.health, 277);
        assert_eq!(encounter.enemy.damage, 14);
        assert_eq!(encounter.enemy.difficulty, Difficulty::FinalBoss);
        assert_eq!(encounter.ruleset(), Ruleset::FinalBoss);
    }

    #[test]
    fn rolled_stats_stay_in_range() {
        let mut dice = SeededDice::from_seed(5);
        for _ in 0..50 {
            let encounter = final_boss_encounter(&mut dice);
            assert!((250..=300).contains(&encounter.enemy.health));
            assert!((10..=20).contains(&encounter.enemy.damage));
        }
    }

    #[test]
    fn chamber_lines_name_the_player() {
        let player = PlayerState::new("Alice", RoomId(0), "Starting room");
        let lines = chamber_lines(&player);
        assert!(lines[0].starts_with("Alice,"));
        assert!(lines[1].contains("health: 100"));
    }
}
