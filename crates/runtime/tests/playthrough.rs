//! End-to-end run through the main beats of the game: fight, shop, quest,
//! unlock the cave, save and restore, and fell the warden.

use game_core::{CombatAction, CombatState, Position, QuestFlags};
use game_content::handles;
use runtime::{Direction, GameSession, SaveRepository, buy_item, sell_item};

/// Attack until the current encounter ends, panicking if it never does.
fn fight_to_the_end(session: &mut GameSession) -> CombatState {
    session.start_combat().unwrap();
    for _ in 0..100 {
        let (outcome, _) = session.combat_action(CombatAction::Attack).unwrap();
        if outcome.state.is_terminal() {
            return outcome.state;
        }
    }
    panic!("combat did not terminate");
}

#[test]
fn a_full_run_from_crossroads_to_the_keep() {
    let mut session = GameSession::new("Pilgrim", 42);

    // Fetch the meadow herb and hand it to the wanderer for gold.
    session.talk().unwrap();
    session.move_player(Direction::North).unwrap();
    session.take_item(handles::HEALING_HERB).unwrap();
    session.move_player(Direction::South).unwrap();
    let gold_before = session.player().gold;
    session.talk().unwrap();
    assert!(session.player().gold > gold_before);

    // Kill the wolf east of the crossroads.
    session.move_player(Direction::East).unwrap();
    assert_eq!(fight_to_the_end(&mut session), CombatState::Victory);
    assert!(!session.enemy_here());
    assert!(session.player().entity.stats.experience > 0);

    // Grab the key from the ruins and open the cave next door.
    session.move_player(Direction::South).unwrap();
    session.take_item(handles::RUSTY_KEY).unwrap();
    session.use_item(handles::RUSTY_KEY).unwrap();
    assert!(session.move_player(Direction::East).is_ok());
    session.move_player(Direction::West).unwrap();

    // Spend wolf loot and quest gold at the merchant.
    session.move_player(Direction::West).unwrap();
    assert!(session.at_merchant());
    sell_item(&mut session, handles::STALE_BREAD).unwrap();
    if session.player().gold >= 30 {
        buy_item(&mut session, handles::MINOR_POTION).unwrap();
        session.equip(handles::TRAVELERS_KNIFE).unwrap();
    }

    // Save, then make sure the restored session matches.
    let dir = tempfile::tempdir().unwrap();
    let repository = SaveRepository::new(dir.path().join("save.json"));
    session.save(&repository).unwrap();
    let restored = GameSession::restore(&repository, 42).unwrap().unwrap();
    assert_eq!(restored.player(), session.player());
    assert_eq!(restored.turn_count(), session.turn_count());
}

#[test]
fn felling_the_warden_wins_the_game() {
    let mut session = GameSession::new("Champion", 9);
    // An overwhelming champion so the fight cannot be lost.
    let stats = &mut session.player_mut().entity.stats;
    stats.max_health = 500;
    stats.current_health = 500;
    stats.attack_power = 50;
    session.move_player(Direction::East).unwrap();
    // Clear the wolf out of the way, then march to the keep.
    fight_to_the_end(&mut session);
    session.move_player(Direction::East).unwrap();
    session.move_player(Direction::East).unwrap();
    for _ in 0..3 {
        session.move_player(Direction::South).unwrap();
    }
    assert_eq!(session.player().position, Position::new(4, 4));

    assert_eq!(fight_to_the_end(&mut session), CombatState::Victory);
    assert!(session.is_won());
    assert!(session
        .player()
        .quest_flags
        .contains(QuestFlags::WARDEN_DEFEATED));
}
