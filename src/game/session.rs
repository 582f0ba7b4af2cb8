//! The interactive game loop.
//!
//! A [`Session`] owns the console, the world, the dice, and the save
//! store; the player state is created after the name prompt and threaded
//! through every handler. The combat engine and world generator report
//! results as values; this module is the only place that turns them into
//! text and decides what ends a session.

use crate::game::boss::{chamber_lines, final_boss_encounter, BOSS_MILESTONE_RANGE, BOSS_NAME};
use crate::game::cardgame::{CardGame, CardGameResult, CARD_GAME_MILESTONE};
use crate::game::catalog::Catalog;
use crate::game::combat::{CombatAction, CombatOutcome, Encounter, Ruleset};
use crate::game::dice::Dice;
use crate::game::errors::GameError;
use crate::game::player::{ItemSearch, ItemUse, PlayerState, Purchase};
use crate::game::prompt::Console;
use crate::game::save::SaveStore;
use crate::game::tutorial::{self, TutorialEnd, STARTING_ROOM_DESCRIPTION, STARTING_ROOM_NAME};
use crate::game::types::{Character, EffectType, Item, Npc, RoomId};
use crate::game::visions::{VisionReel, TRUTH_REVEALED};
use crate::game::world::{Traverse, World};
use crate::logutil::escape_log;
use log::info;
use std::io::{BufRead, Write};

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player chose to leave.
    Quit,
    /// A standard fight was lost; the run is over.
    PlayerDefeated,
    /// The final boss fell and the truth came out.
    BossVictory,
    /// The final boss won; the run ends, but gently.
    BossDefeat,
}

pub struct Session<R: BufRead, W: Write> {
    console: Console<R, W>,
    world: World,
    store: SaveStore,
    dice: Box<dyn Dice>,
    visions: VisionReel,
    card_game: CardGame,
    start: RoomId,
    boss_milestone: usize,
    boss_fought: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        catalog: Catalog,
        store: SaveStore,
        mut dice: Box<dyn Dice>,
        input: R,
        output: W,
    ) -> Self {
        let mut world = World::new(catalog);
        let start = world.create_empty_room(STARTING_ROOM_NAME, STARTING_ROOM_DESCRIPTION);
        // Rolled once per session so the boss never lands at a fixed count.
        let boss_milestone =
            dice.roll(BOSS_MILESTONE_RANGE.0, BOSS_MILESTONE_RANGE.1) as usize;
        Self {
            console: Console::new(input, output),
            world,
            store,
            dice,
            visions: VisionReel::new(),
            card_game: CardGame::new(),
            start,
            boss_milestone,
            boss_fought: false,
        }
    }

    /// Run one complete game: name prompt, tutorial, main loop. Every
    /// ending goes through [`SessionEnd`]; the process is never exited
    /// from here.
    pub fn run(&mut self) -> Result<SessionEnd, GameError> {
        self.console
            .say("You open your eyes to darkness and the smell of old stone.")?;
        let name = tutorial::choose_player_name(&mut self.console, &self.store)?;
        let mut player = PlayerState::new(&name, self.start, STARTING_ROOM_NAME);

        match tutorial::run(&mut self.console, &mut player, self.dice.as_mut())? {
            TutorialEnd::Quit => return Ok(SessionEnd::Quit),
            TutorialEnd::Completed => {}
        }

        // The labyrinth proper: the starting room grows its doors now
        // that the tutorial door is open.
        self.world.add_doors(self.start, self.dice.as_mut());

        loop {
            if !self.card_game.played() && player.visited_rooms.len() >= CARD_GAME_MILESTONE {
                self.offer_card_game(&mut player)?;
            }
            if !self.boss_fought && player.visited_rooms.len() >= self.boss_milestone {
                return self.boss_sequence(&mut player);
            }

            self.print_menu(&player)?;
            match self.console.read_menu_choice("Choose: ", 0, 8)? {
                -1 => {
                    self.console
                        .say("You sit down against the wall and close your eyes. Farewell.")?;
                    info!("player '{}' quit the session", escape_log(&player.name));
                    return Ok(SessionEnd::Quit);
                }
                0 => self.show_visited(&player)?,
                1 => self.look_around(&player)?,
                2 => self.choose_door(&mut player)?,
                3 => {
                    if let Some(end) = self.approach_character(&mut player)? {
                        return Ok(end);
                    }
                }
                4 => {
                    if let Some(end) = self.look_for_fight(&mut player)? {
                        return Ok(end);
                    }
                }
                5 => self.open_inventory(&mut player)?,
                6 => self.search_for_items(&mut player)?,
                7 => self.visit_trader(&mut player)?,
                8 => self.save_or_load(&mut player)?,
                _ => {}
            }
        }
    }

    fn print_menu(&mut self, player: &PlayerState) -> Result<(), GameError> {
        let room_name = self.world.room(player.current_room).name.clone();
        self.console.say(&format!(
            "\n=== {} | Health {} | Damage {} | Coins {} ===",
            room_name, player.health, player.damage, player.coins
        ))?;
        self.console.say("0) Show visited rooms")?;
        self.console.say("1) Look around")?;
        self.console.say("2) Look for a way out")?;
        self.console.say("3) Look for company")?;
        self.console.say("4) Look for a fight")?;
        self.console.say("5) Open your inventory")?;
        self.console.say("6) Search for items")?;
        self.console.say("7) Visit the trader")?;
        self.console.say("8) Save or load")?;
        self.console.say("-1) Quit")?;
        Ok(())
    }

    fn show_visited(&mut self, player: &PlayerState) -> Result<(), GameError> {
        self.console.say(&format!(
            "You have passed through {} room(s):",
            player.visited_rooms.len()
        ))?;
        for name in &player.visited_rooms {
            self.console.say(&format!("  {}", name))?;
        }
        Ok(())
    }

    fn look_around(&mut self, player: &PlayerState) -> Result<(), GameError> {
        let room = self.world.room(player.current_room).clone();
        self.console.say(&format!("\n--- {} ---", room.name))?;
        self.console.say(&room.description)?;
        if room.doors.is_empty() {
            self.console.say("There are no doors here.")?;
        } else {
            for door in &room.doors {
                self.console
                    .say(&format!("{}: {}", door.name, door.description))?;
            }
        }
        for character in &room.characters {
            self.console.say(&format!(
                "{} is here. {}",
                character.name(),
                character.description()
            ))?;
        }
        if let Some(trader) = &room.trader {
            self.console.say(&format!(
                "{} has set up a stall in the corner.",
                trader.name
            ))?;
        }
        Ok(())
    }

    fn choose_door(&mut self, player: &mut PlayerState) -> Result<(), GameError> {
        let doors = self.world.room(player.current_room).doors.clone();
        if doors.is_empty() {
            self.console.say("There are no doors here.")?;
            return Ok(());
        }
        for (i, door) in doors.iter().enumerate() {
            self.console
                .say(&format!("{}) {}: {}", i + 1, door.name, door.description))?;
        }
        let choice = self
            .console
            .read_menu_choice("Which door? ", 1, doors.len() as i32)?;
        if choice == -1 {
            self.console.say("You stay where you are.")?;
            return Ok(());
        }

        let result =
            self.world
                .traverse_door(player, (choice - 1) as usize, self.dice.as_mut());
        match result {
            Traverse::Moved { coins_awarded, .. } => {
                self.console.say(&format!(
                    "You earned {} coin for braving a new room. Coins: {}",
                    coins_awarded, player.coins
                ))?;
                self.console
                    .say("\nAs you cross the threshold, a vision takes hold of you...")?;
                let vision = self.visions.next_vision();
                self.console.say(vision)?;
                self.console.say("\nThe vision fades.")?;
                self.look_around(player)?;
            }
            Traverse::Locked { door } => {
                self.console
                    .say(&format!("{} is locked and will not budge.", door))?;
            }
            Traverse::DeadEnd => {
                self.console
                    .say("The door opens onto bare stone. A dead end.")?;
            }
            Traverse::InvalidDoor => {
                self.console.say("There is no such door.")?;
            }
        }
        Ok(())
    }

    fn approach_character(
        &mut self,
        player: &mut PlayerState,
    ) -> Result<Option<SessionEnd>, GameError> {
        let characters = self.world.room(player.current_room).characters.clone();
        if characters.is_empty() {
            self.console.say("There is no one here.")?;
            return Ok(None);
        }
        for (i, character) in characters.iter().enumerate() {
            self.console.say(&format!(
                "{}) {} - {}",
                i + 1,
                character.name(),
                character.description()
            ))?;
        }
        let choice =
            self.console
                .read_menu_choice("Approach whom? ", 1, characters.len() as i32)?;
        if choice == -1 {
            self.console.say("You keep to yourself.")?;
            return Ok(None);
        }

        match &characters[(choice - 1) as usize] {
            Character::Npc(npc) => {
                self.converse(npc)?;
                Ok(None)
            }
            Character::Enemy(enemy) => {
                if player.has_defeated(&enemy.name) {
                    self.console.say(&format!(
                        "{} is no match for you anymore and slinks away.",
                        enemy.name
                    ))?;
                    return Ok(None);
                }
                self.console.say(&format!(
                    "{} snarls and moves to attack!",
                    enemy.name
                ))?;
                let mut fight = Encounter::new(enemy.clone(), Ruleset::Standard);
                let outcome =
                    run_encounter(&mut self.console, player, &mut fight, self.dice.as_mut())?;
                self.resolve_standard_outcome(player, outcome)
            }
        }
    }

    fn converse(&mut self, npc: &Npc) -> Result<(), GameError> {
        if npc.dialogues.is_empty() {
            self.console
                .say(&format!("{} has nothing to say.", npc.name))?;
            return Ok(());
        }
        let node = &npc.dialogues[self.dice.index(npc.dialogues.len())];
        self.console
            .say(&format!("{}: \"{}\"", npc.name, node.line))?;
        if node.options.is_empty() {
            return Ok(());
        }
        for (i, option) in node.options.iter().enumerate() {
            self.console.say(&format!("{}) {}", i + 1, option.prompt))?;
        }
        let choice =
            self.console
                .read_menu_choice("Say what? ", 1, node.options.len() as i32)?;
        if choice == -1 {
            self.console.say("You nod and step away.")?;
            return Ok(());
        }
        self.console.say(&format!(
            "{}: \"{}\"",
            npc.name,
            node.options[(choice - 1) as usize].reply
        ))?;
        Ok(())
    }

    /// Roll for 0-2 monsters from the catalog, filter out anything the
    /// player has already bested, and fight the chosen one. Once a fight
    /// resolves (or only bested monsters remain), the room is marked clear
    /// of further fights.
    fn look_for_fight(
        &mut self,
        player: &mut PlayerState,
    ) -> Result<Option<SessionEnd>, GameError> {
        let room_name = self.world.room(player.current_room).name.clone();
        if player.fought_in(&room_name) {
            self.console
                .say("You've cleared this room of monsters.")?;
            return Ok(None);
        }
        let monsters = self.world.catalog().monsters.clone();
        if monsters.is_empty() {
            self.console.say("Nothing stirs in the shadows.")?;
            return Ok(None);
        }

        let count = (self.dice.roll(0, 2) as usize).min(monsters.len());
        if count == 0 {
            self.console
                .say("You find no monsters lurking here right now.")?;
            return Ok(None);
        }
        let mut pool: Vec<usize> = (0..monsters.len()).collect();
        let mut found = Vec::new();
        for _ in 0..count {
            let picked = pool.swap_remove(self.dice.index(pool.len()));
            found.push(monsters[picked].clone());
        }

        let fightable: Vec<_> = found
            .into_iter()
            .filter(|m| !player.has_defeated(&m.name))
            .collect();
        if fightable.is_empty() {
            player.mark_fought(&room_name);
            self.console.say(
                "Only monsters you've already bested remain here. The room falls quiet.",
            )?;
            return Ok(None);
        }

        for (i, monster) in fightable.iter().enumerate() {
            self.console.say(&format!(
                "{}) {} ({}) - {}",
                i + 1,
                monster.name,
                monster.difficulty.label(),
                monster.description
            ))?;
        }
        let choice =
            self.console
                .read_menu_choice("Fight which monster? ", 1, fightable.len() as i32)?;
        if choice == -1 {
            self.console.say("You back away quietly.")?;
            return Ok(None);
        }

        let enemy = fightable[(choice - 1) as usize].clone();
        let mut fight = Encounter::new(enemy, Ruleset::Standard);
        let outcome = run_encounter(&mut self.console, player, &mut fight, self.dice.as_mut())?;
        player.mark_fought(&room_name);
        self.resolve_standard_outcome(player, outcome)
    }

    fn resolve_standard_outcome(
        &mut self,
        player: &mut PlayerState,
        outcome: CombatOutcome,
    ) -> Result<Option<SessionEnd>, GameError> {
        if outcome == CombatOutcome::DefenderWon {
            self.console
                .say("\nYour journey ends here. The labyrinth claims another soul.")?;
            info!("player '{}' fell in battle", escape_log(&player.name));
            return Ok(Some(SessionEnd::PlayerDefeated));
        }
        Ok(None)
    }

    fn search_for_items(&mut self, player: &mut PlayerState) -> Result<(), GameError> {
        let result = player.look_for_items(self.world.catalog(), self.dice.as_mut());
        match result {
            ItemSearch::AlreadySearched => {
                self.console
                    .say("You've already searched this room top to bottom.")?;
            }
            ItemSearch::Found(names) if names.is_empty() => {
                self.console
                    .say("You rummage through the room but find nothing of use.")?;
            }
            ItemSearch::Found(names) => {
                for name in names {
                    self.console.say(&format!("You found: {}", name))?;
                }
            }
        }
        Ok(())
    }

    fn visit_trader(&mut self, player: &mut PlayerState) -> Result<(), GameError> {
        let room_id = player.current_room;
        let greeting = match &self.world.room(room_id).trader {
            Some(trader) => format!(
                "{}: \"Welcome, welcome! Have a look at my wares.\" ({})",
                trader.name, trader.description
            ),
            None => {
                self.console.say("There is no trader in this room.")?;
                return Ok(());
            }
        };
        self.console.say(&greeting)?;

        loop {
            let stock: Vec<Item> = self
                .world
                .room(room_id)
                .trader
                .as_ref()
                .map(|t| t.items.clone())
                .unwrap_or_default();
            if stock.is_empty() {
                self.console.say("\"Sold out, friend. Come back later.\"")?;
                return Ok(());
            }
            for (i, item) in stock.iter().enumerate() {
                self.console.say(&format!(
                    "{}) {} ({} +{}) - {} coins. {}",
                    i + 1,
                    item.name,
                    effect_word(item.effect_type),
                    item.value,
                    item.price,
                    item.description
                ))?;
            }
            self.console
                .say(&format!("You have {} coins.", player.coins))?;
            let choice =
                self.console
                    .read_menu_choice("Buy which item? ", 1, stock.len() as i32)?;
            if choice == -1 {
                self.console.say("\"Come back any time.\"")?;
                return Ok(());
            }
            let result = match self.world.room_mut(room_id).trader.as_mut() {
                Some(trader) => player.buy_from(trader, (choice - 1) as usize),
                None => return Ok(()),
            };
            match result {
                Purchase::Bought { item, price } => {
                    self.console.say(&format!(
                        "You bought {} for {} coins. Coins left: {}",
                        item, price, player.coins
                    ))?;
                }
                Purchase::NotEnoughCoins { item, price } => {
                    self.console.say(&format!(
                        "\"{} costs {} coins, and you don't have them.\"",
                        item, price
                    ))?;
                }
                Purchase::InvalidIndex => {
                    self.console.say("\"That's not on the table, friend.\"")?;
                }
            }
        }
    }

    fn open_inventory(&mut self, player: &mut PlayerState) -> Result<(), GameError> {
        if player.inventory.is_empty() {
            self.console.say("Your inventory is empty.")?;
            return Ok(());
        }
        for (i, item) in player.inventory.iter().enumerate() {
            self.console.say(&format!(
                "{}) {} ({} +{}) - {}",
                i + 1,
                item.name,
                effect_word(item.effect_type),
                item.value,
                item.description
            ))?;
        }
        let choice = self.console.read_menu_choice(
            "Use which item? ",
            1,
            player.inventory.len() as i32,
        )?;
        if choice == -1 {
            self.console.say("You close your pack.")?;
            return Ok(());
        }
        match player.use_item((choice - 1) as usize) {
            ItemUse::Healed { item, amount } => {
                self.console.say(&format!(
                    "You used {} and healed for {}. Current health: {}",
                    item, amount, player.health
                ))?;
            }
            ItemUse::Empowered { item, amount } => {
                self.console.say(&format!(
                    "You equipped {} and gained {} damage. Current damage: {}",
                    item, amount, player.damage
                ))?;
            }
            ItemUse::InvalidIndex => {
                self.console.say("No such item.")?;
            }
        }
        Ok(())
    }

    fn save_or_load(&mut self, player: &mut PlayerState) -> Result<(), GameError> {
        self.console.say("1) Save game")?;
        self.console.say("2) Load game")?;
        match self.console.read_menu_choice("Choose: ", 1, 2)? {
            1 => {
                self.store.save(player)?;
                self.console
                    .say(&format!("Game saved for {}.", player.name))?;
            }
            2 => {
                let names = self.store.player_names();
                if !names.is_empty() {
                    self.console
                        .say(&format!("Saved games: {}", names.join(", ")))?;
                }
                let name = self.console.read_line("Load which name? ")?;
                match self.store.load(&name) {
                    Ok(record) => {
                        record.apply_to(player);
                        self.console.say(&format!(
                            "Welcome back, {}. Health {}, damage {}, coins {}.",
                            player.name, player.health, player.damage, player.coins
                        ))?;
                        info!("player '{}' loaded a saved game", escape_log(&player.name));
                    }
                    Err(GameError::SaveStoreMissing(_)) => {
                        self.console.say("No saved games exist yet.")?;
                    }
                    Err(GameError::SaveNotFound(missing)) => {
                        self.console
                            .say(&format!("No saved game for '{}'.", missing))?;
                    }
                    Err(e) => return Err(e),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn offer_card_game(&mut self, player: &mut PlayerState) -> Result<(), GameError> {
        self.console.say(
            "\nThe air shimmers. A mermaid materializes before you, fanning four cards.",
        )?;
        self.console.say(
            "\"Care to play, wanderer? Pick a card. Three bless, one curses.\"",
        )?;
        self.console.say("1) Play")?;
        self.console.say("2) Decline")?;
        let choice = self.console.read_menu_choice("Choose: ", 1, 2)?;
        if choice != 1 {
            self.card_game.decline();
            self.console
                .say("The mermaid pouts and dissolves into mist. She will not return.")?;
            return Ok(());
        }

        self.console
            .say("0) Hearts  1) Diamonds  2) Spades  3) Clubs")?;
        let pick = self.console.read_int("Pick a card: ")?.unwrap_or(-2);
        let result = self.card_game.play(player, pick, self.dice.as_mut());
        match result {
            CardGameResult::Punished { health_after } => {
                self.console.say(&format!(
                    "The Spades! The mermaid laughs as cold washes over you. \
                     Your health is halved to {}.",
                    health_after
                ))?;
            }
            CardGameResult::Rewarded { item, value } => {
                self.console.say(&format!(
                    "The mermaid smiles and presents you with {} (+{} damage).",
                    item, value
                ))?;
            }
            CardGameResult::Forfeited => {
                self.console.say(
                    "You fumble the draw. The mermaid sighs and vanishes, cards and all.",
                )?;
            }
            CardGameResult::Declined => {}
        }
        Ok(())
    }

    fn boss_sequence(&mut self, player: &mut PlayerState) -> Result<SessionEnd, GameError> {
        self.boss_fought = true;
        self.console
            .say("\nThe corridor narrows, and every door behind you vanishes.")?;
        self.console.say_lines(&chamber_lines(player))?;
        info!(
            "player '{}' reached the final boss after {} rooms",
            escape_log(&player.name),
            player.visited_rooms.len()
        );

        let mut fight = final_boss_encounter(self.dice.as_mut());
        let outcome = run_encounter(&mut self.console, player, &mut fight, self.dice.as_mut())?;
        match outcome {
            CombatOutcome::AttackerWon => {
                self.console.say("")?;
                self.console.say(TRUTH_REVEALED)?;
                info!("player '{}' defeated {}", escape_log(&player.name), BOSS_NAME);
                Ok(SessionEnd::BossVictory)
            }
            // The boss ruleset never yields Fled; a loss closes the run
            // without the game-over treatment a standard defeat gets.
            _ => {
                self.console.say(&format!(
                    "\n{} stands over you, and the shadows close in. Your memories stay \
                     buried... for now.",
                    BOSS_NAME
                ))?;
                Ok(SessionEnd::BossDefeat)
            }
        }
    }
}

fn effect_word(effect: EffectType) -> &'static str {
    match effect {
        EffectType::Health => "health",
        EffectType::Damage => "damage",
    }
}

/// Drive one encounter to its outcome: show status, read an action,
/// apply it through the engine, print the report. Shared by the tutorial
/// fight, standard fights, and the boss.
pub fn run_encounter<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    player: &mut PlayerState,
    fight: &mut Encounter,
    dice: &mut dyn Dice,
) -> Result<CombatOutcome, GameError> {
    let outcome = loop {
        console.say("")?;
        console.say_lines(&fight.status_lines(player))?;
        console.say("0) Attack  1) Defend  2) Heal  3) Use item  4) Run")?;
        let choice = match console.read_int("Choose your action: ")? {
            Some(choice) => choice,
            None => {
                console.say("Invalid input: please enter a valid number.")?;
                continue;
            }
        };
        let action = match choice {
            0 => CombatAction::Attack,
            1 => CombatAction::Defend,
            2 => CombatAction::Heal,
            3 => {
                if player.inventory.is_empty() {
                    console.say("You have no items.")?;
                    continue;
                }
                for (i, item) in player.inventory.iter().enumerate() {
                    console.say(&format!(
                        "{}) {} ({} +{})",
                        i + 1,
                        item.name,
                        effect_word(item.effect_type),
                        item.value
                    ))?;
                }
                match console.read_menu_choice(
                    "Use which item? ",
                    1,
                    player.inventory.len() as i32,
                )? {
                    -1 => {
                        console.say("You keep your items ready.")?;
                        continue;
                    }
                    picked => CombatAction::UseItem((picked - 1) as usize),
                }
            }
            4 => CombatAction::Run,
            _ => {
                console.say("Invalid input: please enter a valid number.")?;
                continue;
            }
        };

        let report = fight.take_turn(player, action, dice);
        console.say_lines(&report.lines)?;
        if let Some(outcome) = report.outcome {
            break outcome;
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dice::ScriptedDice;
    use crate::game::types::{Difficulty, Enemy};
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn test_player() -> PlayerState {
        PlayerState::new("Alice", RoomId(0), STARTING_ROOM_NAME)
    }

    fn goblin() -> Enemy {
        Enemy::new("Goblin", "Small and mean.", 30, 5, Difficulty::Easy)
    }

    #[test]
    fn encounter_loop_runs_to_victory() {
        let mut c = console("0\n0\n0\n");
        let mut player = test_player();
        let mut fight = Encounter::new(goblin(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        let outcome = run_encounter(&mut c, &mut player, &mut fight, &mut dice).unwrap();
        assert_eq!(outcome, CombatOutcome::AttackerWon);
        assert_eq!(player.health, 90);
        assert_eq!(player.coins, 7);
    }

    #[test]
    fn encounter_loop_survives_garbage_input() {
        let mut c = console("banana\n9\n4\n");
        let mut player = test_player();
        let mut fight = Encounter::new(goblin(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        let outcome = run_encounter(&mut c, &mut player, &mut fight, &mut dice).unwrap();
        assert_eq!(outcome, CombatOutcome::Fled);
        assert_eq!(player.health, 50);
    }

    #[test]
    fn backing_out_of_item_menu_costs_nothing() {
        use crate::game::types::{EffectType, Item, Rarity};
        let mut player = test_player();
        player.inventory.push(Item::new(
            "Tonic",
            Rarity::Common,
            EffectType::Health,
            10,
            "Bitter.",
            3,
        ));
        // Open the item menu, back out (no engine turn, no counter),
        // then flee.
        let mut c = console("3\n-1\n4\n");
        let mut fight = Encounter::new(goblin(), Ruleset::Standard);
        let mut dice = ScriptedDice::new(&[]);

        let outcome = run_encounter(&mut c, &mut player, &mut fight, &mut dice).unwrap();
        assert_eq!(outcome, CombatOutcome::Fled);
        assert_eq!(player.inventory.len(), 1);
        // Only the flee touched health.
        assert_eq!(player.health, 50);
    }
}
