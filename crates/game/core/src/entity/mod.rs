//! Combat participants: the unified entity plus player/enemy roles.
//!
//! Player and enemy share one [`Entity`] record (stat block + inventory +
//! equipment slots), so combat math has a single code path. Role-specific
//! data hangs off the wrapping [`Player`] and [`Enemy`] types: gold and
//! quest flags for the player, loot table and experience reward for enemies.

pub mod equipment;
pub mod inventory;

pub use equipment::{EquipSlot, Equipment};
pub use inventory::{Inventory, InventoryError, InventorySlot};

use thiserror::Error;

use crate::common::Position;
use crate::error::{ErrorSeverity, GameError};
use crate::item::{ConsumableEffect, ItemCategory, ItemHandle, ItemKind, ItemOracle};
use crate::stats::StatBlock;

/// Errors raised by equip and unequip operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EquipError {
    /// The item exists but is neither weapon nor armor.
    #[error("cannot equip a {0} item")]
    WrongCategory(ItemCategory),

    /// The item is not in the entity's inventory.
    #[error("item is not in the inventory")]
    NotOwned,

    /// The handle does not resolve to any item definition.
    #[error("unknown item")]
    UnknownItem,

    /// Unequipping needs a free inventory slot and none is available.
    #[error("inventory is full")]
    InventoryFull,
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::WrongCategory(_) | Self::NotOwned => ErrorSeverity::Validation,
            Self::UnknownItem => ErrorSeverity::Fatal,
            Self::InventoryFull => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongCategory(_) => "EQUIP_WRONG_CATEGORY",
            Self::NotOwned => "EQUIP_NOT_OWNED",
            Self::UnknownItem => "EQUIP_UNKNOWN_ITEM",
            Self::InventoryFull => "EQUIP_INVENTORY_FULL",
        }
    }
}

/// Errors raised when using a consumable.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UseError {
    /// The item is not in the entity's inventory.
    #[error("item is not in the inventory")]
    NotOwned,

    /// The item exists but is not a consumable.
    #[error("that item cannot be used")]
    NotConsumable,

    /// The handle does not resolve to any item definition.
    #[error("unknown item")]
    UnknownItem,
}

impl GameError for UseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotOwned | Self::NotConsumable => ErrorSeverity::Validation,
            Self::UnknownItem => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotOwned => "USE_NOT_OWNED",
            Self::NotConsumable => "USE_NOT_CONSUMABLE",
            Self::UnknownItem => "USE_UNKNOWN_ITEM",
        }
    }
}

/// Result of a successfully used consumable, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectOutcome {
    /// Health restored (actual amount after clamping at max health).
    Healed { amount: u32 },
}

/// A combat participant: stat block plus inventory and equipment slots.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub name: String,
    pub stats: StatBlock,
    pub inventory: Inventory,
    pub equipment: Equipment,
}

impl Entity {
    pub fn new(name: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            name: name.into(),
            stats,
            inventory: Inventory::empty(),
            equipment: Equipment::empty(),
        }
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.stats.is_defeated()
    }

    /// Base attack power plus the equipped weapon's modifier (0 if none).
    pub fn effective_attack(&self, items: &impl ItemOracle) -> u32 {
        let bonus = self
            .equipment
            .weapon
            .and_then(|handle| items.definition(handle))
            .map_or(0, |def| match def.kind {
                ItemKind::Weapon(data) => data.power,
                _ => 0,
            });
        self.stats.attack_power + bonus
    }

    /// Base defense plus the equipped armor's modifier (0 if none).
    pub fn effective_defense(&self, items: &impl ItemOracle) -> u32 {
        let bonus = self
            .equipment
            .armor
            .and_then(|handle| items.definition(handle))
            .map_or(0, |def| match def.kind {
                ItemKind::Armor(data) => data.power,
                _ => 0,
            });
        self.stats.defense + bonus
    }

    /// Equip a weapon or armor from the inventory.
    ///
    /// The item leaves the inventory and its modifier becomes active. A
    /// previously equipped item in the same slot moves back to the
    /// inventory. When the displaced item cannot be re-admitted (removing
    /// one unit of a stacked equippable frees no slot), the whole swap is
    /// rejected. Rejections leave all state untouched.
    pub fn equip(&mut self, handle: ItemHandle, items: &impl ItemOracle) -> Result<(), EquipError> {
        if !self.inventory.contains(handle) {
            return Err(EquipError::NotOwned);
        }
        let definition = items.definition(handle).ok_or(EquipError::UnknownItem)?;
        let slot = match definition.kind {
            ItemKind::Weapon(_) => EquipSlot::Weapon,
            ItemKind::Armor(_) => EquipSlot::Armor,
            _ => return Err(EquipError::WrongCategory(definition.category())),
        };
        let displaced = self
            .equipment
            .slot(slot)
            .map(|prev| items.definition(prev).ok_or(EquipError::UnknownItem))
            .transpose()?;

        // Stage the swap on a scratch copy so a full inventory rejects it
        // whole instead of destroying the displaced item.
        let mut inventory = self.inventory.clone();
        inventory
            .remove(handle, 1)
            .map_err(|_| EquipError::NotOwned)?;
        if let Some(prev) = displaced {
            inventory
                .add(prev, 1)
                .map_err(|_| EquipError::InventoryFull)?;
        }
        self.inventory = inventory;
        self.equipment.equip(slot, handle);
        Ok(())
    }

    /// Move the slotted item back to the inventory and deactivate its
    /// modifier. An already-empty slot is a no-op, not an error.
    pub fn unequip(
        &mut self,
        slot: EquipSlot,
        items: &impl ItemOracle,
    ) -> Result<Option<ItemHandle>, EquipError> {
        let Some(handle) = self.equipment.slot(slot) else {
            return Ok(None);
        };
        let definition = items.definition(handle).ok_or(EquipError::UnknownItem)?;
        // Equippables are non-stackable, so returning one needs a free slot.
        self.inventory
            .add(definition, 1)
            .map_err(|_| EquipError::InventoryFull)?;
        self.equipment.unequip(slot);
        Ok(Some(handle))
    }

    /// Use one consumable from the inventory, applying its effect and
    /// decrementing its count.
    pub fn use_consumable(
        &mut self,
        handle: ItemHandle,
        items: &impl ItemOracle,
    ) -> Result<EffectOutcome, UseError> {
        if !self.inventory.contains(handle) {
            return Err(UseError::NotOwned);
        }
        let definition = items.definition(handle).ok_or(UseError::UnknownItem)?;
        let ItemKind::Consumable(data) = definition.kind else {
            return Err(UseError::NotConsumable);
        };
        let outcome = match data.effect {
            ConsumableEffect::Heal(amount) => EffectOutcome::Healed {
                amount: self.stats.heal(amount),
            },
        };
        self.inventory
            .remove(handle, 1)
            .map_err(|_| UseError::NotOwned)?;
        Ok(outcome)
    }

    /// Pick up items into the inventory.
    pub fn take(
        &mut self,
        handle: ItemHandle,
        quantity: u16,
        items: &impl ItemOracle,
    ) -> Result<(), InventoryError> {
        let definition = items
            .definition(handle)
            .ok_or(InventoryError::NotOwned)?;
        self.inventory.add(definition, quantity)
    }

    /// Drop one item. An equipped item is unequipped first; since the
    /// dropped copy leaves the entity entirely, the slot is simply cleared.
    pub fn drop_item(&mut self, handle: ItemHandle) -> Result<(), InventoryError> {
        if self.equipment.weapon == Some(handle) {
            self.equipment.unequip(EquipSlot::Weapon);
            return Ok(());
        }
        if self.equipment.armor == Some(handle) {
            self.equipment.unequip(EquipSlot::Armor);
            return Ok(());
        }
        self.inventory.remove(handle, 1)
    }
}

bitflags::bitflags! {
    /// Quest progress flags. Opaque to combat; the session layer flips them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct QuestFlags: u32 {
        const HERB_QUEST_ACCEPTED = 1 << 0;
        const HERB_QUEST_DONE = 1 << 1;
        const CAVE_UNSEALED = 1 << 2;
        const WARDEN_DEFEATED = 1 << 3;
    }
}

/// The player character. Persists for the whole session and serializes
/// to the save record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub entity: Entity,
    pub gold: u32,
    pub quest_flags: QuestFlags,
    pub position: Position,
}

impl Player {
    pub fn new(entity: Entity, gold: u32, position: Position) -> Self {
        Self {
            entity,
            gold,
            quest_flags: QuestFlags::empty(),
            position,
        }
    }
}

/// One entry of an enemy's loot table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub handle: ItemHandle,
    pub quantity: u16,
}

/// Items and gold granted to the player when the enemy is defeated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTable {
    pub gold: u32,
    pub items: Vec<LootEntry>,
}

/// An enemy. Constructed from a read-only template when a room is entered
/// and destroyed on defeat; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub entity: Entity,
    pub loot: LootTable,
    pub experience_reward: u32,
}

impl Enemy {
    pub fn new(entity: Entity, loot: LootTable, experience_reward: u32) -> Self {
        Self {
            entity,
            loot,
            experience_reward,
        }
    }
}
