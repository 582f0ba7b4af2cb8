//! The starting room: name selection, the game guide, and the practice
//! fight that unlocks the only door out.

use crate::game::combat::{training_dummy, CombatOutcome, Encounter, Ruleset};
use crate::game::dice::Dice;
use crate::game::errors::GameError;
use crate::game::player::{PlayerState, MAX_HEALTH};
use crate::game::prompt::Console;
use crate::game::save::SaveStore;
use crate::game::session::run_encounter;
use crate::logutil::escape_log;
use log::info;
use std::io::{BufRead, Write};

pub const GUIDE_NAME: &str = "Game Guide";

pub const STARTING_ROOM_NAME: &str = "Starting room";

pub const STARTING_ROOM_DESCRIPTION: &str = "You wake on cold stone in a bare chamber. \
A single heavy door stands before you, and a hooded figure waits by the wall, \
watching you with patient eyes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialEnd {
    /// The dummy is down and the player stepped through the door.
    Completed,
    /// The player quit from the starting room.
    Quit,
}

/// Prompt for a player name. Empty names and names that already have a
/// saved game are refused; loading an old game goes through the save menu
/// instead.
pub fn choose_player_name<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &SaveStore,
) -> Result<String, GameError> {
    loop {
        let name = console.read_line("Enter your name: ")?;
        if name.is_empty() {
            console.say("Your name cannot be empty.")?;
            continue;
        }
        if store.has_player(&name) {
            console.say(
                "That name already has a saved game. Pick another, or load it from the save menu later.",
            )?;
            continue;
        }
        info!("player '{}' begins a new game", escape_log(&name));
        return Ok(name);
    }
}

/// Run the starting-room sequence. The door out stays locked until the
/// practice fight against the training dummy is won; the guide heals the
/// player back to full once it is.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    player: &mut PlayerState,
    dice: &mut dyn Dice,
) -> Result<TutorialEnd, GameError> {
    console.say(STARTING_ROOM_DESCRIPTION)?;
    console.say(&format!(
        "The hooded figure raises a hand in greeting. \"Welcome, {}.\"",
        player.name
    ))?;

    let mut dummy_defeated = false;
    loop {
        console.say(&format!("\n--- {} ---", STARTING_ROOM_NAME))?;
        console.say("1) Talk to the game guide")?;
        console.say("2) Open the door")?;
        console.say("3) Look around")?;
        console.say("-1) Quit")?;
        match console.read_menu_choice("Choose: ", 1, 3)? {
            -1 => {
                console.say("You sit back down on the cold stone. Perhaps another time.")?;
                return Ok(TutorialEnd::Quit);
            }
            1 => talk_to_guide(console, player, dice, &mut dummy_defeated)?,
            2 => {
                if dummy_defeated {
                    console.say(
                        "The door swings open at your touch. Beyond it, a corridor of doors \
                         stretches into darkness.",
                    )?;
                    return Ok(TutorialEnd::Completed);
                }
                console.say(&format!(
                    "The door is locked tight. The {} watches you expectantly.",
                    GUIDE_NAME
                ))?;
            }
            3 => {
                console.say(STARTING_ROOM_DESCRIPTION)?;
                if dummy_defeated {
                    console.say("The splintered remains of the training dummy litter the floor.")?;
                } else {
                    console.say("A battered training dummy stands in the corner.")?;
                }
            }
            _ => {}
        }
    }
}

fn talk_to_guide<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    player: &mut PlayerState,
    dice: &mut dyn Dice,
    dummy_defeated: &mut bool,
) -> Result<(), GameError> {
    if *dummy_defeated {
        console.say(&format!(
            "{}: \"You've learned all I can teach. The door is open; your past waits beyond it.\"",
            GUIDE_NAME
        ))?;
        return Ok(());
    }

    loop {
        console.say(&format!(
            "\n{}: \"Ask me anything, or tell me when you're ready.\"",
            GUIDE_NAME
        ))?;
        console.say("1) What is this place?")?;
        console.say("2) How do I fight?")?;
        console.say("3) I'm ready to practice.")?;
        console.say("-1) Step away")?;
        match console.read_menu_choice("Choose: ", 1, 3)? {
            -1 => {
                console.say(&format!("{}: \"I'll be here.\"", GUIDE_NAME))?;
                return Ok(());
            }
            1 => {
                console.say(&format!(
                    "{}: \"A labyrinth of doors, and behind each one a piece of what you've \
                     forgotten. Monsters guard the way. Beat the dummy and I'll unlock the \
                     first door.\"",
                    GUIDE_NAME
                ))?;
            }
            2 => {
                console.say(&format!(
                    "{}: \"Attack to deal your damage. Defend to halve the next blow. Healing \
                     takes three actions to ready, so spend them wisely. And you can always \
                     run, though it will cost you half your health.\"",
                    GUIDE_NAME
                ))?;
            }
            3 => {
                console.say(&format!(
                    "{}: \"Then show me. The dummy won't hold back... much.\"",
                    GUIDE_NAME
                ))?;
                // The guide readies the heal so it can be practiced at once.
                player.action_count = 3;
                let mut fight = Encounter::new(training_dummy(), Ruleset::Tutorial);
                let outcome = run_encounter(console, player, &mut fight, dice)?;
                match outcome {
                    CombatOutcome::AttackerWon => {
                        *dummy_defeated = true;
                        player.health = MAX_HEALTH;
                        player.action_count = 0;
                        console.say(&format!(
                            "{}: \"Well fought! I've restored your health and unlocked the \
                             door. The five coins in your pouch should get you started. Good \
                             luck out there.\"",
                            GUIDE_NAME
                        ))?;
                        info!("player '{}' completed the practice fight", escape_log(&player.name));
                    }
                    CombatOutcome::Fled => {
                        console.say(&format!(
                            "{}: \"Running from a wooden dummy? Come back when you're ready.\"",
                            GUIDE_NAME
                        ))?;
                    }
                    CombatOutcome::DefenderWon => {
                        player.health = MAX_HEALTH;
                        console.say(&format!(
                            "{}: \"Beaten by the dummy... there's a first. On your feet, \
                             you're patched up. Try again when you've caught your breath.\"",
                            GUIDE_NAME
                        ))?;
                    }
                }
                return Ok(());
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dice::ScriptedDice;
    use crate::game::types::RoomId;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn new_player() -> PlayerState {
        PlayerState::new("Alice", RoomId(0), STARTING_ROOM_NAME)
    }

    #[test]
    fn name_prompt_rejects_empty_and_taken_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("game_save.json"));
        store.save(&new_player()).unwrap();

        let mut c = console("\nAlice\nBob\n");
        let name = choose_player_name(&mut c, &store).unwrap();
        assert_eq!(name, "Bob");
    }

    #[test]
    fn door_stays_locked_until_the_dummy_falls() {
        let mut player = new_player();
        // Try the door, then quit.
        let mut c = console("2\n-1\n");
        let mut dice = ScriptedDice::new(&[]);
        let end = run(&mut c, &mut player, &mut dice).unwrap();
        assert_eq!(end, TutorialEnd::Quit);
    }

    #[test]
    fn beating_the_dummy_unlocks_the_door() {
        let mut player = new_player();
        // Talk -> practice -> three attacks fell the 30-health dummy
        // (two 5-damage counters land, guide restores after), then open
        // the door.
        let mut c = console("1\n3\n0\n0\n0\n2\n");
        let mut dice = ScriptedDice::new(&[]);
        let end = run(&mut c, &mut player, &mut dice).unwrap();
        assert_eq!(end, TutorialEnd::Completed);
        assert_eq!(player.health, MAX_HEALTH);
        assert_eq!(player.action_count, 0);
        // The practice dummy never joins the permanent defeat record.
        assert!(!player.has_defeated("Training Dummy"));
        assert_eq!(player.coins, 5);
    }

    #[test]
    fn fleeing_the_practice_fight_keeps_the_door_locked() {
        let mut player = new_player();
        // Talk -> practice -> run -> try the door -> quit.
        let mut c = console("1\n3\n4\n2\n-1\n");
        let mut dice = ScriptedDice::new(&[]);
        let end = run(&mut c, &mut player, &mut dice).unwrap();
        assert_eq!(end, TutorialEnd::Quit);
        // The merciful escape halved health with a floor of one.
        assert_eq!(player.health, 50);
    }

    #[test]
    fn tutorial_heal_can_be_practiced_immediately() {
        let mut player = new_player();
        player.health = 60;
        // Talk -> practice -> heal (guide pre-readied it) -> run out.
        let mut c = console("1\n3\n2\n4\n-1\n");
        // Heal rolls the 7-15 practice range; the dummy counters for 5.
        let mut dice = ScriptedDice::new(&[10]);
        run(&mut c, &mut player, &mut dice).unwrap();
        assert_eq!(player.heal_used, 1);
    }
}
