//! The versioned, serializable shape of persistent player state.
//!
//! Only the player persists; enemies are regenerated from world templates
//! on load. The record is plain data: rehydrating it back into a
//! [`Player`] validates every invariant and every item reference, so a
//! hand-edited or truncated file surfaces as a typed [`SaveError`] instead
//! of corrupt in-memory state. A failed load is fatal to the load only;
//! callers treat it as "no save available".

use thiserror::Error;

use crate::common::Position;
use crate::entity::{Entity, Equipment, Inventory, Player, QuestFlags};
use crate::error::{ErrorSeverity, GameError};
use crate::item::{ItemHandle, ItemKind, ItemOracle};
use crate::stats::StatBlock;

/// Current save format version. Bump on any incompatible record change.
pub const SAVE_VERSION: u32 = 1;

/// One inventory slot as stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotRecord {
    pub handle: ItemHandle,
    pub quantity: u16,
}

/// Persistent player state.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub stats: StatBlock,
    pub inventory: Vec<SlotRecord>,
    pub equipped_weapon: Option<ItemHandle>,
    pub equipped_armor: Option<ItemHandle>,
    pub gold: u32,
    pub quest_flags: u32,
    pub position: Position,
}

/// The full save record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub player: PlayerRecord,
    pub turn_count: u64,
    /// Revealed map positions (fog of war).
    pub discovered: Vec<Position>,
}

/// Deserialized-but-invalid save data. All variants mean the same thing to
/// the caller: the save cannot be trusted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("unsupported save version {found} (expected {SAVE_VERSION})")]
    UnsupportedVersion { found: u32 },

    #[error("stat block violates invariants: {0}")]
    InvalidStats(&'static str),

    #[error("save references unknown item {0:?}")]
    UnknownItem(ItemHandle),

    #[error("item {0:?} is equipped in the wrong slot")]
    WrongSlot(ItemHandle),

    #[error("inventory does not fit the slot limit")]
    TooManyItems,

    #[error("unknown quest flag bits {0:#x}")]
    UnknownQuestFlags(u32),

    /// The saved position lies outside the world grid. Raised by the
    /// restoring layer, which knows the grid bounds.
    #[error("position ({}, {}) is outside the world", .0.x, .0.y)]
    InvalidPosition(Position),
}

impl GameError for SaveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion { .. } => "SAVE_UNSUPPORTED_VERSION",
            Self::InvalidStats(_) => "SAVE_INVALID_STATS",
            Self::UnknownItem(_) => "SAVE_UNKNOWN_ITEM",
            Self::WrongSlot(_) => "SAVE_WRONG_SLOT",
            Self::TooManyItems => "SAVE_TOO_MANY_ITEMS",
            Self::UnknownQuestFlags(_) => "SAVE_UNKNOWN_QUEST_FLAGS",
            Self::InvalidPosition(_) => "SAVE_INVALID_POSITION",
        }
    }
}

impl SaveGame {
    /// Snapshot a player into the current record format.
    pub fn from_player(player: &Player, turn_count: u64, discovered: Vec<Position>) -> Self {
        Self {
            version: SAVE_VERSION,
            player: PlayerRecord {
                name: player.entity.name.clone(),
                stats: player.entity.stats.clone(),
                inventory: player
                    .entity
                    .inventory
                    .iter()
                    .map(|slot| SlotRecord {
                        handle: slot.handle,
                        quantity: slot.quantity,
                    })
                    .collect(),
                equipped_weapon: player.entity.equipment.weapon,
                equipped_armor: player.entity.equipment.armor,
                gold: player.gold,
                quest_flags: player.quest_flags.bits(),
                position: player.position,
            },
            turn_count,
            discovered,
        }
    }

    /// Rebuild the player, validating every invariant against the item
    /// catalog. Round-tripping through [`SaveGame::from_player`] yields an
    /// identical player.
    pub fn into_player(self, items: &impl ItemOracle) -> Result<(Player, u64, Vec<Position>), SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion { found: self.version });
        }
        let record = self.player;

        if !record.stats.is_valid() {
            return Err(SaveError::InvalidStats(
                "health above max, zero max health, or level below 1",
            ));
        }

        let mut inventory = Inventory::empty();
        for slot in &record.inventory {
            let definition = items
                .definition(slot.handle)
                .ok_or(SaveError::UnknownItem(slot.handle))?;
            inventory
                .add(definition, slot.quantity)
                .map_err(|_| SaveError::TooManyItems)?;
        }

        let mut equipment = Equipment::empty();
        if let Some(handle) = record.equipped_weapon {
            let definition = items
                .definition(handle)
                .ok_or(SaveError::UnknownItem(handle))?;
            if !matches!(definition.kind, ItemKind::Weapon(_)) {
                return Err(SaveError::WrongSlot(handle));
            }
            equipment.weapon = Some(handle);
        }
        if let Some(handle) = record.equipped_armor {
            let definition = items
                .definition(handle)
                .ok_or(SaveError::UnknownItem(handle))?;
            if !matches!(definition.kind, ItemKind::Armor(_)) {
                return Err(SaveError::WrongSlot(handle));
            }
            equipment.armor = Some(handle);
        }

        let quest_flags = QuestFlags::from_bits(record.quest_flags)
            .ok_or(SaveError::UnknownQuestFlags(record.quest_flags))?;

        let player = Player {
            entity: Entity {
                name: record.name,
                stats: record.stats,
                inventory,
                equipment,
            },
            gold: record.gold,
            quest_flags,
            position: record.position,
        };
        Ok((player, self.turn_count, self.discovered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::tests::TestCatalog;
    use crate::entity::EquipSlot;

    fn sample_player(items: &TestCatalog) -> Player {
        let mut entity = Entity::new("Hero", StatBlock::new(40, 6, 2));
        entity.take(ItemHandle(1), 1, items).unwrap();
        entity.take(ItemHandle(3), 2, items).unwrap();
        entity.take(ItemHandle(4), 1, items).unwrap();
        entity.equip(ItemHandle(1), items).unwrap();
        let mut player = Player::new(entity, 30, Position::new(1, 1));
        player.quest_flags = QuestFlags::HERB_QUEST_ACCEPTED;
        player
    }

    #[test]
    fn round_trip_reproduces_identical_player() {
        let items = TestCatalog::basic();
        let player = sample_player(&items);

        let record = SaveGame::from_player(&player, 17, vec![Position::new(1, 1)]);
        let json = serde_json::to_string(&record).unwrap();
        let parsed: SaveGame = serde_json::from_str(&json).unwrap();
        let (restored, turns, discovered) = parsed.into_player(&items).unwrap();

        assert_eq!(restored, player);
        assert_eq!(turns, 17);
        assert_eq!(discovered, vec![Position::new(1, 1)]);
    }

    #[test]
    fn wrong_version_is_rejected() {
        let items = TestCatalog::basic();
        let mut record = SaveGame::from_player(&sample_player(&items), 0, vec![]);
        record.version = 99;
        assert_eq!(
            record.into_player(&items),
            Err(SaveError::UnsupportedVersion { found: 99 })
        );
    }

    #[test]
    fn out_of_range_health_is_rejected() {
        let items = TestCatalog::basic();
        let mut record = SaveGame::from_player(&sample_player(&items), 0, vec![]);
        record.player.stats.current_health = record.player.stats.max_health + 1;
        assert!(matches!(
            record.into_player(&items),
            Err(SaveError::InvalidStats(_))
        ));
    }

    #[test]
    fn unknown_item_reference_is_rejected() {
        let items = TestCatalog::basic();
        let mut record = SaveGame::from_player(&sample_player(&items), 0, vec![]);
        record.player.inventory.push(SlotRecord {
            handle: ItemHandle(999),
            quantity: 1,
        });
        assert_eq!(
            record.into_player(&items),
            Err(SaveError::UnknownItem(ItemHandle(999)))
        );
    }

    #[test]
    fn armor_in_weapon_slot_is_rejected() {
        let items = TestCatalog::basic();
        let mut record = SaveGame::from_player(&sample_player(&items), 0, vec![]);
        record.player.equipped_weapon = Some(ItemHandle(2));
        assert_eq!(
            record.into_player(&items),
            Err(SaveError::WrongSlot(ItemHandle(2)))
        );
    }

    #[test]
    fn restored_equipment_modifiers_apply_once() {
        let items = TestCatalog::basic();
        let player = sample_player(&items);
        let record = SaveGame::from_player(&player, 0, vec![]);
        let (mut restored, _, _) = record.into_player(&items).unwrap();

        assert_eq!(restored.entity.effective_attack(&items), 6 + 4);
        restored.entity.unequip(EquipSlot::Weapon, &items).unwrap();
        assert_eq!(restored.entity.effective_attack(&items), 6);
    }
}
