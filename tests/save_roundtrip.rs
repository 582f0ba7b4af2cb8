//! Save-store behavior across store instances and damaged files.

use mindmaze::game::types::{EffectType, Item, Rarity, RoomId};
use mindmaze::game::{GameError, PlayerState, SaveStore};

fn veteran() -> PlayerState {
    let mut p = PlayerState::new("Vex", RoomId(3), "Starting room");
    p.health = 74;
    p.damage = 22;
    p.coins = 31;
    p.heal_used = 4;
    p.action_count = 2;
    for room in ["Room 2", "Room 3", "Room 4"] {
        p.visited_rooms.push(room.to_string());
    }
    p.defeated_enemy.push("Goblin".to_string());
    p.defeated_enemy.push("Wraith".to_string());
    p.inventory.push(Item::new(
        "Phoenix Elixir",
        Rarity::Epic,
        EffectType::Health,
        60,
        "Warm.",
        20,
    ));
    p
}

#[test]
fn a_fresh_store_instance_sees_earlier_saves() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("game_save.json");

    SaveStore::new(&path).save(&veteran()).expect("save");

    let reopened = SaveStore::new(&path);
    assert_eq!(reopened.player_names(), vec!["Vex".to_string()]);
    let record = reopened.load("Vex").expect("load");
    assert_eq!(record.health, 74);
    assert_eq!(record.defeated_enemy, vec!["Goblin", "Wraith"]);
    assert_eq!(record.inventory.len(), 1);
    assert_eq!(record.visited_rooms.len(), 4);
}

#[test]
fn restoring_a_record_does_not_touch_transient_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("game_save.json");
    let store = SaveStore::new(&path);
    store.save(&veteran()).expect("save");

    let mut live = PlayerState::new("Vex", RoomId(9), "Starting room");
    live.mark_fought("Room 7");
    store.load("Vex").expect("load").apply_to(&mut live);

    assert_eq!(live.health, 74);
    assert_eq!(live.coins, 31);
    // The world graph is not persisted; position and per-room fight
    // flags belong to the running session.
    assert_eq!(live.current_room, RoomId(9));
    assert!(live.fought_in("Room 7"));
}

#[test]
fn corrupt_store_rejects_loads_but_allows_resaving() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("game_save.json");
    std::fs::write(&path, "{ this is not json").expect("write garbage");

    let store = SaveStore::new(&path);
    assert!(matches!(store.load("Vex"), Err(GameError::Json(_))));
    assert!(store.player_names().is_empty());

    // Saving replaces the damaged store wholesale.
    store.save(&veteran()).expect("save over garbage");
    assert_eq!(store.load("Vex").expect("load").damage, 22);
}
