//! The game session: one player's run through the world.
//!
//! `GameSession` threads the player, world, RNG, and config through every
//! operation so nothing reaches for ambient globals. Combat is delegated
//! to [`Encounter`]; the session supplies the aftermath the resolver
//! deliberately does not own (respawn on defeat, returning a fled-from
//! enemy to its room, the victory ending).

use std::collections::HashSet;

use game_core::{
    CombatAction, CombatError, CombatOutcome, CombatState, EffectOutcome, Encounter, EquipError,
    EquipSlot, GameConfig, InventoryError, ItemHandle, ItemKind, ItemOracle, PcgRng, Player,
    Position, QuestFlags, SaveError, SaveGame, UseError,
};
use game_content::{StaticCatalog, enemies::templates, handles, player, starting_player};
use thiserror::Error;
use tracing::{info, warn};

use crate::repository::SaveRepository;
use crate::world::{Direction, Room, RoomFeature, World};

/// Gold paid by the wanderer for the lost herb.
const HERB_QUEST_REWARD: u32 = 15;

/// Movement failures. The target room stays untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("there is nothing in that direction")]
    OutOfBounds,

    #[error("the way is locked")]
    Locked,

    #[error("you cannot leave during combat")]
    InCombat,
}

/// Non-movement session failures.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("there is no enemy here")]
    NoEnemyHere,

    #[error("already in combat")]
    AlreadyInCombat,

    #[error("not in combat")]
    NotInCombat,

    #[error("you cannot do that during combat")]
    InCombat,

    #[error("that item is not here")]
    ItemNotHere,

    #[error("the key fits no lock within reach")]
    NoMatchingLock,

    #[error("there is no riddle within reach")]
    NoRiddle,

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Equip(#[from] EquipError),

    #[error(transparent)]
    Use(#[from] UseError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Things the session layer did on top of a core operation, for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Terminal boss down; the run is complete.
    GameWon,

    /// The player fell and woke at the crossroads.
    Respawned { gold_lost: u32 },

    /// A consumable applied outside combat.
    ItemUsed {
        handle: ItemHandle,
        outcome: EffectOutcome,
    },

    /// A key opened a locked room.
    DoorUnlocked { position: Position },

    /// Quest flag progress (accepting or completing the herb quest).
    QuestAdvanced { flags: QuestFlags },

    /// Reward gold received.
    GoldReceived { amount: u32 },
}

/// A single-player run: world, player, fog of war, and the active
/// encounter if any.
#[derive(Debug)]
pub struct GameSession {
    player: Player,
    world: World,
    catalog: StaticCatalog,
    config: GameConfig,
    rng: PcgRng,
    turn_count: u64,
    discovered: HashSet<Position>,
    encounter: Option<Encounter>,
    won: bool,
}

impl GameSession {
    /// Start a fresh run with a deterministic seed.
    pub fn new(name: &str, seed: u64) -> Self {
        let catalog = StaticCatalog::builtin();
        let player = starting_player(name, &catalog);
        let mut discovered = HashSet::new();
        discovered.insert(player.position);
        info!(player = name, seed, "new session started");
        Self {
            player,
            world: World::generate(),
            catalog,
            config: GameConfig::default(),
            rng: PcgRng::from_seed(seed),
            turn_count: 0,
            discovered,
            encounter: None,
            won: false,
        }
    }

    /// Start a fresh run with an OS-provided seed.
    pub fn new_random(name: &str) -> Self {
        Self::new(name, rand::random())
    }

    /// [`GameSession::restore`] with an OS-provided seed.
    pub fn restore_random(repository: &SaveRepository) -> crate::error::Result<Option<Self>> {
        Self::restore(repository, rand::random())
    }

    /// Restore a session from the save repository. `Ok(None)` means no
    /// save exists. Corrupt saves surface as errors the caller can
    /// classify via [`crate::RuntimeError::is_corrupt_save`] and treat as
    /// "no save" without ending the process.
    pub fn restore(repository: &SaveRepository, seed: u64) -> crate::error::Result<Option<Self>> {
        let Some(save) = repository.load()? else {
            return Ok(None);
        };
        let catalog = StaticCatalog::builtin();
        let (player, turn_count, discovered) = save.into_player(&catalog)?;
        let won = player.quest_flags.contains(QuestFlags::WARDEN_DEFEATED);
        let mut world = World::generate();
        // Grid bounds live here, not in the record's own validation.
        if !world.in_bounds(player.position) {
            return Err(SaveError::InvalidPosition(player.position).into());
        }
        info!(player = %player.entity.name, turn_count, "session restored");
        if player.quest_flags.contains(QuestFlags::CAVE_UNSEALED) {
            world.unseal_riddle_doors();
        }
        Ok(Some(Self {
            player,
            world,
            catalog,
            config: GameConfig::default(),
            rng: PcgRng::from_seed(seed),
            turn_count,
            discovered: discovered.into_iter().collect(),
            encounter: None,
            won,
        }))
    }

    /// Write the current state to the save repository.
    pub fn save(&self, repository: &SaveRepository) -> crate::error::Result<()> {
        let mut discovered: Vec<Position> = self.discovered.iter().copied().collect();
        discovered.sort_by_key(|pos| (pos.y, pos.x));
        let record = SaveGame::from_player(&self.player, self.turn_count, discovered);
        repository.save(&record)?;
        info!(turn_count = self.turn_count, "session saved");
        Ok(())
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    pub fn in_combat(&self) -> bool {
        self.encounter.is_some()
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    /// True once the Obsidian Warden has fallen.
    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn current_room(&self) -> &Room {
        // World::generate covers every in-bounds cell and the player never
        // leaves bounds, so the room always exists.
        self.world
            .room(self.player.position)
            .unwrap_or_else(|| unreachable!("player outside the world grid"))
    }

    /// Exits from the current room, for display.
    pub fn exits(&self) -> Vec<Direction> {
        self.world
            .neighbors(self.player.position)
            .into_iter()
            .map(|(dir, _)| dir)
            .collect()
    }

    /// Minimap of the discovered world.
    pub fn minimap(&self) -> String {
        self.world.minimap(self.player.position, &self.discovered)
    }

    /// Step the player one room. Locked rooms block entry until unlocked.
    pub fn move_player(&mut self, direction: Direction) -> Result<&Room, MoveError> {
        if self.encounter.is_some() {
            return Err(MoveError::InCombat);
        }
        let target = direction.step(self.player.position);
        if !self.world.in_bounds(target) {
            return Err(MoveError::OutOfBounds);
        }
        let room = self.world.room(target).ok_or(MoveError::OutOfBounds)?;
        if room.locked {
            return Err(MoveError::Locked);
        }
        self.player.position = target;
        self.turn_count += 1;
        self.discovered.insert(target);
        info!(%direction, x = target.x, y = target.y, "moved");
        Ok(self.current_room())
    }

    /// Engage the enemy in the current room. The room gives up the enemy
    /// for the duration of the encounter.
    pub fn start_combat(&mut self) -> Result<&Encounter, SessionError> {
        if self.encounter.is_some() {
            return Err(SessionError::AlreadyInCombat);
        }
        let position = self.player.position;
        let enemy = self
            .world
            .room_mut(position)
            .and_then(|room| room.enemy.take())
            .ok_or(SessionError::NoEnemyHere)?;
        info!(enemy = %enemy.entity.name, "combat started");
        self.encounter = Some(Encounter::start(enemy));
        Ok(self.encounter.as_ref().ok_or(SessionError::NotInCombat)?)
    }

    /// Submit one combat action and apply the session-level aftermath of
    /// any terminal state the round reached.
    pub fn combat_action(
        &mut self,
        action: CombatAction,
    ) -> Result<(CombatOutcome, Vec<SessionEvent>), SessionError> {
        let encounter = self.encounter.as_mut().ok_or(SessionError::NotInCombat)?;
        let outcome = encounter.submit(
            &mut self.player,
            action,
            &self.catalog,
            &mut self.rng,
            &self.config,
        )?;
        self.turn_count += 1;

        let mut events = Vec::new();
        match outcome.state {
            CombatState::Victory => {
                if let Some(encounter) = self.encounter.take() {
                    let enemy = encounter.into_enemy();
                    info!(enemy = %enemy.entity.name, "enemy defeated");
                    if enemy.entity.name == templates::OBSIDIAN_WARDEN.name {
                        self.player.quest_flags.insert(QuestFlags::WARDEN_DEFEATED);
                        self.won = true;
                        events.push(SessionEvent::GameWon);
                    }
                }
            }
            CombatState::Fled => {
                // The enemy keeps its current health and stays in the room.
                if let Some(encounter) = self.encounter.take() {
                    let position = self.player.position;
                    if let Some(room) = self.world.room_mut(position) {
                        room.enemy = Some(encounter.into_enemy());
                    }
                }
            }
            CombatState::Defeat => {
                if let Some(encounter) = self.encounter.take() {
                    let position = self.player.position;
                    if let Some(room) = self.world.room_mut(position) {
                        room.enemy = Some(encounter.into_enemy());
                    }
                }
                events.push(self.respawn());
            }
            _ => {}
        }
        Ok((outcome, events))
    }

    /// Wake at the crossroads at half health, dropping a fifth of the gold.
    fn respawn(&mut self) -> SessionEvent {
        let stats = &mut self.player.entity.stats;
        stats.current_health = (stats.max_health / 2).max(1);
        let gold_lost = self.player.gold / 5;
        self.player.gold -= gold_lost;
        self.player.position = player::STARTING_POSITION;
        self.discovered.insert(self.player.position);
        warn!(gold_lost, "player defeated, respawned at the crossroads");
        SessionEvent::Respawned { gold_lost }
    }

    /// Use an item outside combat: consumables apply immediately, keys try
    /// every lock within one step of the player.
    pub fn use_item(&mut self, handle: ItemHandle) -> Result<Vec<SessionEvent>, SessionError> {
        if self.encounter.is_some() {
            return Err(SessionError::InCombat);
        }
        if !self.player.entity.inventory.contains(handle) {
            return Err(SessionError::Use(UseError::NotOwned));
        }
        let kind = self
            .catalog
            .definition(handle)
            .ok_or(SessionError::Use(UseError::UnknownItem))?
            .kind;
        match kind {
            ItemKind::Key { door_id } => self.use_key(handle, door_id),
            _ => {
                let outcome = self.player.entity.use_consumable(handle, &self.catalog)?;
                Ok(vec![SessionEvent::ItemUsed { handle, outcome }])
            }
        }
    }

    /// Unlock an adjacent (or current-tile, Manhattan distance <= 1) locked
    /// room whose door matches the key, consuming the key.
    fn use_key(&mut self, handle: ItemHandle, door_id: u16) -> Result<Vec<SessionEvent>, SessionError> {
        let player_pos = self.player.position;
        let target = self
            .world
            .iter()
            .find(|(pos, room)| {
                room.locked
                    && room.door_id == Some(door_id)
                    && pos.manhattan_distance(&player_pos) <= 1
            })
            .map(|(pos, _)| *pos)
            .ok_or(SessionError::NoMatchingLock)?;
        self.unlock(target)?;
        self.player
            .entity
            .inventory
            .remove(handle, 1)
            .map_err(SessionError::Inventory)?;
        Ok(vec![SessionEvent::DoorUnlocked { position: target }])
    }

    /// Answer the riddle carved on an adjacent locked door. A correct
    /// answer unlocks it; a wrong one does nothing.
    pub fn answer_riddle(&mut self, answer: &str) -> Result<Vec<SessionEvent>, SessionError> {
        if self.encounter.is_some() {
            return Err(SessionError::InCombat);
        }
        let player_pos = self.player.position;
        let target = self
            .world
            .iter()
            .find(|(pos, room)| {
                room.locked
                    && room.feature == Some(RoomFeature::Riddle)
                    && pos.manhattan_distance(&player_pos) <= 1
            })
            .map(|(pos, _)| *pos)
            .ok_or(SessionError::NoRiddle)?;
        if answer.to_lowercase().contains("echo") {
            self.unlock(target)?;
            Ok(vec![SessionEvent::DoorUnlocked { position: target }])
        } else {
            Ok(Vec::new())
        }
    }

    fn unlock(&mut self, position: Position) -> Result<(), SessionError> {
        let room = self
            .world
            .room_mut(position)
            .ok_or(SessionError::NoMatchingLock)?;
        room.locked = false;
        if room.feature == Some(RoomFeature::Riddle) {
            self.player.quest_flags.insert(QuestFlags::CAVE_UNSEALED);
        }
        info!(room = %room.name, "door unlocked");
        Ok(())
    }

    /// Pick up a ground item pile from the current room. Leaves the pile
    /// in place if the inventory cannot hold it.
    pub fn take_item(&mut self, handle: ItemHandle) -> Result<u16, SessionError> {
        if self.encounter.is_some() {
            return Err(SessionError::InCombat);
        }
        let position = self.player.position;
        let room = self
            .world
            .room_mut(position)
            .ok_or(SessionError::ItemNotHere)?;
        let pile = room.take_item(handle).ok_or(SessionError::ItemNotHere)?;
        match self.player.entity.take(handle, pile.quantity, &self.catalog) {
            Ok(()) => Ok(pile.quantity),
            Err(err) => {
                room.items.push(pile);
                Err(SessionError::Inventory(err))
            }
        }
    }

    /// Drop one item onto the current room's floor.
    pub fn drop_item(&mut self, handle: ItemHandle) -> Result<(), SessionError> {
        if self.encounter.is_some() {
            return Err(SessionError::InCombat);
        }
        self.player.entity.drop_item(handle)?;
        let position = self.player.position;
        if let Some(room) = self.world.room_mut(position) {
            match room.items.iter_mut().find(|slot| slot.handle == handle) {
                Some(pile) => pile.quantity = pile.quantity.saturating_add(1),
                None => room.items.push(game_core::InventorySlot::new(handle, 1)),
            }
        }
        Ok(())
    }

    pub fn equip(&mut self, handle: ItemHandle) -> Result<(), SessionError> {
        if self.encounter.is_some() {
            return Err(SessionError::InCombat);
        }
        self.player.entity.equip(handle, &self.catalog)?;
        Ok(())
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Result<Option<ItemHandle>, SessionError> {
        if self.encounter.is_some() {
            return Err(SessionError::InCombat);
        }
        Ok(self.player.entity.unequip(slot, &self.catalog)?)
    }

    /// True when a living enemy blocks the current room.
    pub fn enemy_here(&self) -> bool {
        self.current_room().has_live_enemy()
    }

    /// Talk to whoever is around. Drives the wanderer's lost-herb quest:
    /// the first conversation accepts it, and a later one with a Healing
    /// Herb in hand turns it in for gold.
    pub fn talk(&mut self) -> Result<Vec<SessionEvent>, SessionError> {
        if self.encounter.is_some() {
            return Err(SessionError::InCombat);
        }
        let flags = self.player.quest_flags;
        if !flags.contains(QuestFlags::HERB_QUEST_ACCEPTED) {
            self.player.quest_flags.insert(QuestFlags::HERB_QUEST_ACCEPTED);
            info!("herb quest accepted");
            return Ok(vec![SessionEvent::QuestAdvanced {
                flags: QuestFlags::HERB_QUEST_ACCEPTED,
            }]);
        }
        if !flags.contains(QuestFlags::HERB_QUEST_DONE)
            && self.player.entity.inventory.contains(handles::HEALING_HERB)
        {
            self.player
                .entity
                .inventory
                .remove(handles::HEALING_HERB, 1)
                .map_err(SessionError::Inventory)?;
            self.player.gold = self.player.gold.saturating_add(HERB_QUEST_REWARD);
            self.player.quest_flags.insert(QuestFlags::HERB_QUEST_DONE);
            info!(reward = HERB_QUEST_REWARD, "herb quest completed");
            return Ok(vec![
                SessionEvent::QuestAdvanced {
                    flags: QuestFlags::HERB_QUEST_DONE,
                },
                SessionEvent::GoldReceived {
                    amount: HERB_QUEST_REWARD,
                },
            ]);
        }
        Ok(Vec::new())
    }

    /// Shop access for the client; requires the merchant's room.
    pub fn at_merchant(&self) -> bool {
        self.current_room().feature == Some(RoomFeature::Merchant)
    }

    /// Direct mutable access to the player. The session keeps no derived
    /// state of its own, so callers cannot break invariants it relies on.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Add catalog items straight to the player's inventory.
    pub(crate) fn grant_item(
        &mut self,
        handle: ItemHandle,
        quantity: u16,
    ) -> Result<(), InventoryError> {
        self.player.entity.take(handle, quantity, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::CombatState;
    use game_content::handles;

    fn session() -> GameSession {
        GameSession::new("Tester", 7)
    }

    #[test]
    fn new_session_starts_at_the_crossroads() {
        let session = session();
        assert_eq!(session.player().position, Position::new(1, 1));
        assert_eq!(session.current_room().name, "Crossroads");
        assert_eq!(session.turn_count(), 0);
        assert!(!session.in_combat());
    }

    #[test]
    fn moving_reveals_rooms_and_counts_turns() {
        let mut session = session();
        let room = session.move_player(Direction::East).unwrap();
        assert_eq!(room.name, "Whispering Trees");
        assert_eq!(session.turn_count(), 1);
        assert!(session.minimap().contains('@'));
    }

    #[test]
    fn locked_room_blocks_entry_until_key_used() {
        let mut session = session();
        // Walk to the Old Ruins at (2, 2), next door to the cave at (3, 2).
        session.move_player(Direction::East).unwrap();
        session.move_player(Direction::South).unwrap();
        assert_eq!(session.player().position, Position::new(2, 2));
        assert_eq!(
            session.move_player(Direction::East).unwrap_err(),
            MoveError::Locked
        );

        // The Old Ruins floor holds the rusty key.
        session.take_item(handles::RUSTY_KEY).unwrap();
        let events = session.use_item(handles::RUSTY_KEY).unwrap();
        assert_eq!(
            events,
            vec![SessionEvent::DoorUnlocked {
                position: Position::new(3, 2)
            }]
        );
        assert!(!session.player().entity.inventory.contains(handles::RUSTY_KEY));
        assert!(session.move_player(Direction::East).is_ok());
    }

    #[test]
    fn riddle_answer_unlocks_the_cave() {
        let mut session = session();
        session.move_player(Direction::East).unwrap();
        session.move_player(Direction::South).unwrap();
        assert!(session.answer_riddle("a drum?").unwrap().is_empty());
        let events = session.answer_riddle("an ECHO").unwrap();
        assert_eq!(events.len(), 1);
        assert!(session
            .player()
            .quest_flags
            .contains(QuestFlags::CAVE_UNSEALED));
        assert!(session.move_player(Direction::East).is_ok());
    }

    #[test]
    fn combat_runs_to_victory_and_frees_the_room() {
        let mut session = session();
        session.move_player(Direction::East).unwrap();
        assert!(session.enemy_here());
        session.start_combat().unwrap();
        assert!(session.move_player(Direction::West).is_err());

        let mut guard = 0;
        loop {
            let (outcome, _) = session.combat_action(CombatAction::Attack).unwrap();
            if outcome.state == CombatState::Victory {
                break;
            }
            assert_eq!(outcome.state, CombatState::PlayerTurn);
            guard += 1;
            assert!(guard < 20, "combat did not terminate");
        }
        assert!(!session.in_combat());
        assert!(!session.enemy_here());
        assert!(session.player().entity.stats.experience > 0 || session.player().entity.stats.level > 1);
    }

    #[test]
    fn fleeing_returns_the_enemy_to_the_room() {
        let mut session = session();
        session.move_player(Direction::East).unwrap();
        // Enough health to shrug off every failed flee attempt.
        session.player_mut().entity.stats.max_health = 1000;
        session.player_mut().entity.stats.current_health = 1000;
        session.start_combat().unwrap();
        let mut guard = 0;
        loop {
            let (outcome, _) = session.combat_action(CombatAction::Flee).unwrap();
            if outcome.state == CombatState::Fled {
                break;
            }
            guard += 1;
            assert!(guard < 50, "flee never succeeded");
        }
        assert!(!session.in_combat());
        assert!(session.enemy_here());
    }

    #[test]
    fn actions_outside_combat_are_rejected_during_combat() {
        let mut session = session();
        session.move_player(Direction::East).unwrap();
        session.start_combat().unwrap();
        assert!(matches!(
            session.equip(handles::TRAVELERS_KNIFE),
            Err(SessionError::InCombat)
        ));
        assert!(matches!(session.talk(), Err(SessionError::InCombat)));
        assert!(matches!(
            session.combat_action(CombatAction::Attack),
            Ok(_)
        ));
    }

    #[test]
    fn herb_quest_accept_and_turn_in() {
        let mut session = session();
        let events = session.talk().unwrap();
        assert_eq!(
            events,
            vec![SessionEvent::QuestAdvanced {
                flags: QuestFlags::HERB_QUEST_ACCEPTED
            }]
        );
        // Without the herb, nothing more happens.
        assert!(session.talk().unwrap().is_empty());

        // Fetch the herb from the Sunlit Meadow at (1, 0).
        session.move_player(Direction::North).unwrap();
        session.take_item(handles::HEALING_HERB).unwrap();
        let gold_before = session.player().gold;
        let events = session.talk().unwrap();
        assert!(events.contains(&SessionEvent::GoldReceived {
            amount: HERB_QUEST_REWARD
        }));
        assert_eq!(session.player().gold, gold_before + HERB_QUEST_REWARD);
        assert!(session
            .player()
            .quest_flags
            .contains(QuestFlags::HERB_QUEST_DONE));
        // Turn-in is once only.
        assert!(session.talk().unwrap().is_empty());
    }

    #[test]
    fn take_and_drop_round_trip_through_the_room_floor() {
        let mut session = session();
        session.move_player(Direction::North).unwrap();
        assert_eq!(session.take_item(handles::HEALING_HERB).unwrap(), 1);
        assert!(session.current_room().items.is_empty());
        session.drop_item(handles::HEALING_HERB).unwrap();
        assert!(!session.player().entity.inventory.contains(handles::HEALING_HERB));
        assert_eq!(session.current_room().items.len(), 1);
        assert!(matches!(
            session.take_item(handles::RUSTY_KEY),
            Err(SessionError::ItemNotHere)
        ));
    }

    #[test]
    fn use_item_outside_combat_heals() {
        let mut session = session();
        session.player_mut().entity.stats.apply_damage(20);
        let events = session.use_item(handles::STALE_BREAD).unwrap();
        assert_eq!(
            events,
            vec![SessionEvent::ItemUsed {
                handle: handles::STALE_BREAD,
                outcome: EffectOutcome::Healed { amount: 8 },
            }]
        );
        assert!(!session.player().entity.inventory.contains(handles::STALE_BREAD));
    }

    #[test]
    fn save_and_restore_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repository = SaveRepository::new(dir.path().join("save.json"));

        let mut session = session();
        session.move_player(Direction::North).unwrap();
        session.take_item(handles::HEALING_HERB).unwrap();
        session.save(&repository).unwrap();

        let restored = GameSession::restore(&repository, 7).unwrap().unwrap();
        assert_eq!(restored.player(), session.player());
        assert_eq!(restored.turn_count(), session.turn_count());
        // Fog of war survives; world state (enemies, ground items) resets.
        assert!(restored.minimap().contains('@'));
        assert!(restored
            .current_room()
            .items
            .iter()
            .any(|slot| slot.handle == handles::HEALING_HERB));
    }

    #[test]
    fn restore_without_a_save_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let repository = SaveRepository::new(dir.path().join("save.json"));
        assert!(GameSession::restore(&repository, 1).unwrap().is_none());
    }

    #[test]
    fn restore_rejects_an_off_grid_position_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let repository = SaveRepository::new(dir.path().join("save.json"));
        session().save(&repository).unwrap();

        let mut record = repository.load().unwrap().unwrap();
        record.player.position = Position::new(99, 99);
        repository.save(&record).unwrap();

        let err = GameSession::restore(&repository, 1).unwrap_err();
        assert!(err.is_corrupt_save());
    }

    #[test]
    fn defeat_respawns_at_the_crossroads_with_a_gold_penalty() {
        let mut session = session();
        // Make defeat certain: 1 HP against the warden.
        session.player_mut().entity.stats.current_health = 1;
        session.player_mut().gold = 50;
        session.player_mut().position = Position::new(4, 4);
        session.start_combat().unwrap();
        let (outcome, events) = session.combat_action(CombatAction::Attack).unwrap();
        assert_eq!(outcome.state, CombatState::Defeat);
        assert_eq!(events, vec![SessionEvent::Respawned { gold_lost: 10 }]);
        assert_eq!(session.player().position, Position::new(1, 1));
        assert_eq!(session.player().gold, 40);
        assert_eq!(session.player().entity.stats.current_health, 20);
        assert!(!session.in_combat());
    }
}
