//! Turn-based combat resolution.
//!
//! One [`Encounter`] state machine drives all three fight contexts; a
//! [`Ruleset`] selects the numeric ranges and permitted actions. The
//! engine mutates the player and the enemy, returns display lines for the
//! caller to render, and reports a terminal [`CombatOutcome`]. It never
//! terminates the process; the orchestrator decides what a defeat means.

use crate::game::dice::Dice;
use crate::game::player::PlayerState;
use crate::game::types::{Difficulty, Enemy};

/// Numeric ranges and permitted actions for one combat context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ruleset {
    /// Starting-room practice fight: no items, merciful escape, the guide
    /// tops the player back up when they fall to half health.
    Tutorial,
    /// Regular room fight: full action set, coins on victory, defeat is
    /// fatal to the session (the orchestrator enforces that).
    Standard,
    /// Boss chamber: running is refused, no coins, defeat ends only the
    /// encounter.
    FinalBoss,
}

impl Ruleset {
    fn heal_range(self) -> (i32, i32) {
        match self {
            Ruleset::Tutorial => (7, 15),
            Ruleset::Standard | Ruleset::FinalBoss => (10, 30),
        }
    }

    /// Whether a heal rejected for cooldown still exposes the player to
    /// the enemy's counter-attack. The standard fight (and the tutorial)
    /// treat it as a wasted turn; the final boss does not.
    fn counters_failed_heal(self) -> bool {
        matches!(self, Ruleset::Standard | Ruleset::Tutorial)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Defend,
    Heal,
    UseItem(usize),
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    AttackerWon,
    DefenderWon,
    Fled,
}

/// What one turn produced: text for the caller to render, and the
/// terminal outcome if the fight just ended.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub lines: Vec<String>,
    pub outcome: Option<CombatOutcome>,
}

/// A fight in progress between the player and one enemy.
pub struct Encounter {
    pub enemy: Enemy,
    ruleset: Ruleset,
    defending: bool,
    outcome: Option<CombatOutcome>,
}

impl Encounter {
    pub fn new(enemy: Enemy, ruleset: Ruleset) -> Self {
        Self {
            enemy,
            ruleset,
            defending: false,
            outcome: None,
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    pub fn in_progress(&self) -> bool {
        self.outcome.is_none()
    }

    /// Health summary shown at the top of each turn.
    pub fn status_lines(&self, player: &PlayerState) -> Vec<String> {
        vec![
            format!("{} has {} health.", self.enemy.name, self.enemy.health),
            format!("Your current health: {}", player.health),
        ]
    }

    /// Resolve one player action and, when the protocol calls for it, the
    /// enemy's counter-attack. Re-entered only while both sides are above
    /// zero health; once an outcome is set further turns are refused.
    pub fn take_turn(
        &mut self,
        player: &mut PlayerState,
        action: CombatAction,
        dice: &mut dyn Dice,
    ) -> TurnReport {
        if self.outcome.is_some() {
            return TurnReport {
                lines: vec!["The fight is already over.".to_string()],
                outcome: self.outcome,
            };
        }

        let mut lines = Vec::new();
        let counters = match action {
            CombatAction::Attack => {
                let dealt = player.damage;
                self.enemy.health -= dealt;
                player.action_count += 1;
                lines.push(format!("You attack {} for {} damage!", self.enemy.name, dealt));
                if self.enemy.health <= 0 {
                    lines.push(format!("You defeated {}!", self.enemy.name));
                    self.award_victory(player, &mut lines);
                    self.outcome = Some(CombatOutcome::AttackerWon);
                    return TurnReport {
                        lines,
                        outcome: self.outcome,
                    };
                }
                lines.push(format!(
                    "{} has {} health remaining.",
                    self.enemy.name, self.enemy.health
                ));
                true
            }
            CombatAction::Defend => {
                self.defending = true;
                player.action_count += 1;
                lines.push("You brace yourself for the next attack.".to_string());
                true
            }
            CombatAction::Heal => {
                if player.action_count >= 3 {
                    let (lo, hi) = self.ruleset.heal_range();
                    let amount = dice.roll(lo, hi);
                    let gained = player.heal(amount);
                    player.action_count = 0;
                    player.heal_used += 1;
                    if gained < amount {
                        lines.push(format!(
                            "You healed yourself to full health! Your current health is {}.",
                            player.health
                        ));
                    } else {
                        lines.push(format!(
                            "You healed yourself for {} health! Your current health is {}.",
                            gained, player.health
                        ));
                    }
                    true
                } else {
                    lines.push("You need to take 3 actions before healing again.".to_string());
                    self.ruleset.counters_failed_heal()
                }
            }
            CombatAction::UseItem(index) => {
                if self.ruleset == Ruleset::Tutorial {
                    lines.push("No items during practice. Stick to the basics.".to_string());
                    false
                } else {
                    use crate::game::player::ItemUse;
                    match player.use_item(index) {
                        ItemUse::Healed { item, amount } => {
                            player.action_count += 1;
                            lines.push(format!(
                                "You used {} and healed for {} health. Current health: {}.",
                                item, amount, player.health
                            ));
                            true
                        }
                        ItemUse::Empowered { item, amount } => {
                            player.action_count += 1;
                            lines.push(format!(
                                "You equipped {} and gained {} damage. Current damage: {}.",
                                item, amount, player.damage
                            ));
                            true
                        }
                        ItemUse::InvalidIndex => {
                            lines.push("Invalid item selection.".to_string());
                            false
                        }
                    }
                }
            }
            CombatAction::Run => match self.ruleset {
                Ruleset::Standard => {
                    player.health /= 2;
                    lines.push(format!(
                        "You ran away but lost half your health. Your current health is {}.",
                        player.health
                    ));
                    self.outcome = Some(CombatOutcome::Fled);
                    return TurnReport {
                        lines,
                        outcome: self.outcome,
                    };
                }
                Ruleset::Tutorial => {
                    player.health = (player.health / 2).max(1);
                    lines.push("Come oooonn! You can do better than that!".to_string());
                    self.outcome = Some(CombatOutcome::Fled);
                    return TurnReport {
                        lines,
                        outcome: self.outcome,
                    };
                }
                Ruleset::FinalBoss => {
                    lines.push("There is no escape from the final battle!".to_string());
                    false
                }
            },
        };

        if counters && self.enemy.health > 0 {
            self.counter_attack(player, &mut lines);
        }

        TurnReport {
            lines,
            outcome: self.outcome,
        }
    }

    fn award_victory(&self, player: &mut PlayerState, lines: &mut Vec<String>) {
        if self.ruleset != Ruleset::Standard {
            return;
        }
        player.record_defeat(&self.enemy.name);
        let coins = self.enemy.difficulty.coin_reward();
        if coins > 0 {
            player.coins += coins;
            lines.push(format!(
                "You received {} coins for beating a {} monster! Total coins: {}",
                coins,
                self.enemy.difficulty.label().to_lowercase(),
                player.coins
            ));
        }
    }

    fn counter_attack(&mut self, player: &mut PlayerState, lines: &mut Vec<String>) {
        let mut damage = self.enemy.damage;
        if self.defending {
            damage = (damage / 2).max(0);
            self.defending = false;
            lines.push(format!(
                "{}'s attack is weakened! You take {} damage.",
                self.enemy.name, damage
            ));
        } else {
            lines.push(format!(
                "{} attacks you for {} damage!",
                self.enemy.name, damage
            ));
        }
        player.health -= damage;

        if player.health <= 0 {
            lines.push("You have been defeated!".to_string());
            self.outcome = Some(CombatOutcome::DefenderWon);
            return;
        }

        lines.push(format!("You have {} health remaining.", player.health));

        // The guide keeps tutorial fights winnable.
        if self.ruleset == Ruleset::Tutorial && player.health <= 50 {
            player.health = 100;
            lines.push(
                "Game guide: 'You are losing! I'll restore your health to 100.'".to_string(),
            );
        }
    }
}

/// The practice opponent in the starting room.
pub fn training_dummy() -> Enemy {
    Enemy::new(
        "Training Dummy",
        "A wooden training dummy. Not as friendly as it looks.",
        30,
        5,
        Difficulty::Easy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dice::ScriptedDice;
    use crate::game::player::PlayerState;
    use crate::game::types::RoomId;

    fn test_player() -> PlayerState {
        PlayerState::new("Alice", RoomId(0), "Starting room")
    }

    fn easy_enemy() -> Enemy {
        Enemy::new("Goblin", "Small and mean.", 30, 5, Difficulty::Easy)
    }

    #[test]
    fn three_attacks_beat_a_thirty_health_enemy() {
        let mut player = test_player();
        let mut fight = Encounter::new(easy_enemy(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        let r1 = fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        assert!(r1.outcome.is_none());
        assert_eq!(fight.enemy.health, 20);

        let r2 = fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        assert!(r2.outcome.is_none());
        assert_eq!(fight.enemy.health, 10);

        let r3 = fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        assert_eq!(r3.outcome, Some(CombatOutcome::AttackerWon));
        assert!(fight.enemy.health <= 0);

        // Exactly two counter-attacks landed before the killing blow.
        assert_eq!(player.health, 90);
        // Easy tier pays 2 coins on top of the 5 starting coins.
        assert_eq!(player.coins, 7);
        assert!(player.has_defeated("Goblin"));
    }

    #[test]
    fn overkill_attack_wins_without_counter() {
        let mut player = test_player();
        player.damage = 50;
        let mut fight = Encounter::new(easy_enemy(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        assert_eq!(report.outcome, Some(CombatOutcome::AttackerWon));
        assert!(fight.enemy.health <= 0);
        assert_eq!(player.health, 100);
    }

    #[test]
    fn defend_halves_next_counter_exactly_once() {
        let mut player = test_player();
        let enemy = Enemy::new("Ogre", "Large.", 100, 9, Difficulty::Hard);
        let mut fight = Encounter::new(enemy, Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        fight.take_turn(&mut player, CombatAction::Defend, &mut dice);
        // 9 / 2 floors to 4.
        assert_eq!(player.health, 96);

        fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        // Discount consumed; full 9 this time.
        assert_eq!(player.health, 87);
    }

    #[test]
    fn heal_requires_three_actions_and_resets_counter() {
        let mut player = test_player();
        player.health = 40;
        let enemy = Enemy::new("Wraith", "Cold.", 100, 5, Difficulty::Medium);
        let mut fight = Encounter::new(enemy, Ruleset::Standard);

        // Cooldown not met: nothing changes, enemy still counters.
        let mut dice = ScriptedDice::new(&[]);
        player.action_count = 2;
        let report = fight.take_turn(&mut player, CombatAction::Heal, &mut dice);
        assert!(report.outcome.is_none());
        assert_eq!(player.action_count, 2);
        assert_eq!(player.health, 35);
        assert_eq!(player.heal_used, 0);

        // Cooldown met: heal lands, action count resets, counter follows.
        player.action_count = 3;
        let mut dice = ScriptedDice::new(&[20]);
        fight.take_turn(&mut player, CombatAction::Heal, &mut dice);
        assert_eq!(player.action_count, 0);
        assert_eq!(player.heal_used, 1);
        // 35 + 20 - 5 counter.
        assert_eq!(player.health, 50);
    }

    #[test]
    fn heal_caps_at_one_hundred() {
        let mut player = test_player();
        player.health = 95;
        player.action_count = 3;
        let enemy = Enemy::new("Wraith", "Cold.", 100, 5, Difficulty::Medium);
        let mut fight = Encounter::new(enemy, Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[30]);

        fight.take_turn(&mut player, CombatAction::Heal, &mut dice);
        // Capped at 100 before the 5-damage counter.
        assert_eq!(player.health, 95);
    }

    #[test]
    fn run_halves_health_and_flees() {
        let mut player = test_player();
        player.health = 75;
        let mut fight = Encounter::new(easy_enemy(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::Run, &mut dice);
        assert_eq!(report.outcome, Some(CombatOutcome::Fled));
        // floor(75 * 0.5)
        assert_eq!(player.health, 37);
        assert_eq!(fight.enemy.health, 30);
    }

    #[test]
    fn boss_refuses_escape_without_counter() {
        let mut player = test_player();
        let boss = Enemy::new("Lord of Shadows", "The end.", 280, 15, Difficulty::FinalBoss);
        let mut fight = Encounter::new(boss, Ruleset::FinalBoss);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::Run, &mut dice);
        assert!(report.outcome.is_none());
        assert!(report.lines.iter().any(|l| l.contains("no escape")));
        assert_eq!(player.health, 100);
        assert!(fight.in_progress());
    }

    #[test]
    fn boss_failed_heal_forfeits_counter() {
        let mut player = test_player();
        player.action_count = 0;
        let boss = Enemy::new("Lord of Shadows", "The end.", 280, 15, Difficulty::FinalBoss);
        let mut fight = Encounter::new(boss, Ruleset::FinalBoss);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::Heal, &mut dice);
        assert!(report.outcome.is_none());
        assert_eq!(player.health, 100);
        assert_eq!(player.action_count, 0);
    }

    #[test]
    fn boss_victory_pays_no_coins() {
        let mut player = test_player();
        player.damage = 300;
        let boss = Enemy::new("Lord of Shadows", "The end.", 280, 15, Difficulty::FinalBoss);
        let mut fight = Encounter::new(boss, Ruleset::FinalBoss);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        assert_eq!(report.outcome, Some(CombatOutcome::AttackerWon));
        assert_eq!(player.coins, 5);
        assert!(!player.has_defeated("Lord of Shadows"));
    }

    #[test]
    fn use_item_consumes_turn_and_draws_counter() {
        use crate::game::types::{EffectType, Item, Rarity};
        let mut player = test_player();
        player.health = 50;
        player.inventory.push(Item::new(
            "Tonic",
            Rarity::Common,
            EffectType::Health,
            20,
            "Bitter.",
            3,
        ));
        let mut fight = Encounter::new(easy_enemy(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::UseItem(0), &mut dice);
        assert!(report.outcome.is_none());
        // 50 + 20 heal - 5 counter.
        assert_eq!(player.health, 65);
        assert_eq!(player.action_count, 1);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn invalid_item_selection_skips_counter() {
        let mut player = test_player();
        let mut fight = Encounter::new(easy_enemy(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::UseItem(9), &mut dice);
        assert!(report.outcome.is_none());
        assert_eq!(player.health, 100);
        assert_eq!(player.action_count, 0);
    }

    #[test]
    fn counter_can_defeat_the_player() {
        let mut player = test_player();
        player.health = 4;
        let mut fight = Encounter::new(easy_enemy(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        assert_eq!(report.outcome, Some(CombatOutcome::DefenderWon));
        assert!(player.health <= 0);
    }

    #[test]
    fn finished_encounter_refuses_further_turns() {
        let mut player = test_player();
        player.damage = 50;
        let mut fight = Encounter::new(easy_enemy(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        let health_after = player.health;
        let report = fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        assert_eq!(report.outcome, Some(CombatOutcome::AttackerWon));
        assert_eq!(player.health, health_after);
    }

    #[test]
    fn tutorial_guide_restores_a_losing_player() {
        let mut player = test_player();
        player.health = 53;
        let mut fight = Encounter::new(training_dummy(), Ruleset::Tutorial);
        let mut dice = ScriptedDice::new(&[]);

        // Counter drops the player to 48, the guide tops them back up.
        let report = fight.take_turn(&mut player, CombatAction::Attack, &mut dice);
        assert!(report.outcome.is_none());
        assert_eq!(player.health, 100);
    }

    #[test]
    fn tutorial_run_leaves_at_least_one_health() {
        let mut player = test_player();
        player.health = 1;
        let mut fight = Encounter::new(training_dummy(), Ruleset::Tutorial);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::Run, &mut dice);
        assert_eq!(report.outcome, Some(CombatOutcome::Fled));
        assert_eq!(player.health, 1);
    }

    #[test]
    fn tutorial_rejects_items() {
        let mut player = test_player();
        let mut fight = Encounter::new(training_dummy(), Ruleset::Tutorial);
        let mut dice = ScriptedDice::new(&[]);

        let report = fight.take_turn(&mut player, CombatAction::UseItem(0), &mut dice);
        assert!(report.outcome.is_none());
        assert_eq!(player.health, 100);
        assert_eq!(player.action_count, 0);
    }

    #[test]
    fn tutorial_heal_uses_lower_range() {
        let mut player = test_player();
        player.health = 60;
        player.action_count = 3;
        let mut fight = Encounter::new(training_dummy(), Ruleset::Tutorial);
        // A 7-15 roll; scripted dice assert the requested range.
        let mut dice = ScriptedDice::new(&[15]);

        fight.take_turn(&mut player, CombatAction::Heal, &mut dice);
        // 60 + 15 - 5 counter.
        assert_eq!(player.health, 70);
    }
}
