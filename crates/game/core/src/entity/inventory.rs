//! Inventory storage for entities.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::item::{ItemDefinition, ItemHandle};

/// Inventory slot containing an item and its quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub handle: ItemHandle,
    pub quantity: u16,
}

impl InventorySlot {
    pub fn new(handle: ItemHandle, quantity: u16) -> Self {
        Self { handle, quantity }
    }
}

/// Errors raised by raw inventory operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The item is not present in the inventory.
    #[error("item is not in the inventory")]
    NotOwned,

    /// No free slot for a non-stackable or new item.
    #[error("inventory is full")]
    Full,
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotOwned => ErrorSeverity::Validation,
            Self::Full => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotOwned => "INVENTORY_NOT_OWNED",
            Self::Full => "INVENTORY_FULL",
        }
    }
}

/// Ordered, bounded collection of owned items.
///
/// Identical stackable items collapse into a single slot count; equippables
/// and keys always occupy one slot each.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    slots: ArrayVec<InventorySlot, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventorySlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, handle: ItemHandle) -> bool {
        self.quantity(handle) > 0
    }

    /// Total owned quantity of an item across slots.
    pub fn quantity(&self, handle: ItemHandle) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.handle == handle)
            .map(|slot| u32::from(slot.quantity))
            .sum()
    }

    /// Add `quantity` of an item, stacking onto an existing slot where the
    /// definition allows. Fails atomically with [`InventoryError::Full`]
    /// when the remainder needs a slot and none is free.
    pub fn add(
        &mut self,
        definition: &ItemDefinition,
        mut quantity: u16,
    ) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Ok(());
        }

        let mut stacked = 0u16;
        if definition.is_stackable() {
            // Count the headroom first so a failure changes nothing.
            for slot in self.slots.iter().filter(|s| s.handle == definition.handle) {
                stacked = stacked.saturating_add(definition.max_stack.saturating_sub(slot.quantity));
            }
        }
        let overflow = quantity.saturating_sub(stacked);
        let new_slots = if definition.is_stackable() {
            overflow.div_ceil(definition.max_stack) as usize
        } else {
            overflow as usize
        };
        if self.slots.len() + new_slots > GameConfig::MAX_INVENTORY_SLOTS {
            return Err(InventoryError::Full);
        }

        if definition.is_stackable() {
            for slot in self
                .slots
                .iter_mut()
                .filter(|s| s.handle == definition.handle)
            {
                let room = definition.max_stack.saturating_sub(slot.quantity);
                let moved = room.min(quantity);
                slot.quantity += moved;
                quantity -= moved;
                if quantity == 0 {
                    return Ok(());
                }
            }
            while quantity > 0 {
                let moved = quantity.min(definition.max_stack);
                self.slots
                    .push(InventorySlot::new(definition.handle, moved));
                quantity -= moved;
            }
        } else {
            for _ in 0..quantity {
                self.slots.push(InventorySlot::new(definition.handle, 1));
            }
        }
        Ok(())
    }

    /// Remove `quantity` of an item. Fails atomically with
    /// [`InventoryError::NotOwned`] when fewer than `quantity` are owned.
    pub fn remove(&mut self, handle: ItemHandle, quantity: u16) -> Result<(), InventoryError> {
        if self.quantity(handle) < u32::from(quantity) {
            return Err(InventoryError::NotOwned);
        }
        let mut remaining = quantity;
        for slot in self.slots.iter_mut().filter(|s| s.handle == handle) {
            let taken = slot.quantity.min(remaining);
            slot.quantity -= taken;
            remaining -= taken;
            if remaining == 0 {
                break;
            }
        }
        self.slots.retain(|slot| slot.quantity > 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ConsumableData, ConsumableEffect, ItemKind, WeaponData};

    fn potion() -> ItemDefinition {
        ItemDefinition::new(
            ItemHandle(10),
            "Minor Potion",
            "Restores 25 HP.",
            ItemKind::Consumable(ConsumableData {
                effect: ConsumableEffect::Heal(25),
            }),
            99,
            20,
        )
    }

    fn knife() -> ItemDefinition {
        ItemDefinition::new(
            ItemHandle(11),
            "Traveler's Knife",
            "A simple steel knife.",
            ItemKind::Weapon(WeaponData { power: 2 }),
            1,
            4,
        )
    }

    #[test]
    fn stackables_collapse_into_one_slot() {
        let mut inv = Inventory::empty();
        inv.add(&potion(), 2).unwrap();
        inv.add(&potion(), 3).unwrap();
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.quantity(ItemHandle(10)), 5);
    }

    #[test]
    fn equippables_take_one_slot_each() {
        let mut inv = Inventory::empty();
        inv.add(&knife(), 2).unwrap();
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn remove_clears_empty_slots() {
        let mut inv = Inventory::empty();
        inv.add(&potion(), 3).unwrap();
        inv.remove(ItemHandle(10), 3).unwrap();
        assert!(inv.is_empty());
    }

    #[test]
    fn remove_more_than_owned_is_rejected_without_mutation() {
        let mut inv = Inventory::empty();
        inv.add(&potion(), 2).unwrap();
        assert_eq!(
            inv.remove(ItemHandle(10), 3),
            Err(InventoryError::NotOwned)
        );
        assert_eq!(inv.quantity(ItemHandle(10)), 2);
    }

    #[test]
    fn add_fails_atomically_when_full() {
        let mut inv = Inventory::empty();
        for i in 0..GameConfig::MAX_INVENTORY_SLOTS {
            let mut def = knife();
            def.handle = ItemHandle(100 + i as u32);
            inv.add(&def, 1).unwrap();
        }
        assert_eq!(inv.add(&knife(), 1), Err(InventoryError::Full));
        assert_eq!(inv.len(), GameConfig::MAX_INVENTORY_SLOTS);
    }
}
