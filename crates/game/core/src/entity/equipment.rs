//! Equipment slots for entities.
//!
//! An entity has at most one weapon and one armor equipped. Slots store
//! [`ItemHandle`]s; the modifier values come from the item catalog, so an
//! equipped item contributes its bonus exactly as long as its handle sits
//! in a slot.

use crate::item::ItemHandle;

/// The two equipment slot kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// Equipment state for an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    /// Currently equipped weapon.
    pub weapon: Option<ItemHandle>,

    /// Currently equipped armor.
    pub armor: Option<ItemHandle>,
}

impl Equipment {
    /// Creates empty equipment (no weapon or armor).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Contents of a slot.
    pub fn slot(&self, slot: EquipSlot) -> Option<ItemHandle> {
        match slot {
            EquipSlot::Weapon => self.weapon,
            EquipSlot::Armor => self.armor,
        }
    }

    /// Place a handle into a slot, returning the displaced handle if any.
    pub fn equip(&mut self, slot: EquipSlot, handle: ItemHandle) -> Option<ItemHandle> {
        match slot {
            EquipSlot::Weapon => self.weapon.replace(handle),
            EquipSlot::Armor => self.armor.replace(handle),
        }
    }

    /// Empty a slot, returning the handle that was equipped if any.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<ItemHandle> {
        match slot {
            EquipSlot::Weapon => self.weapon.take(),
            EquipSlot::Armor => self.armor.take(),
        }
    }

    /// True if the handle sits in either slot.
    pub fn is_equipped(&self, handle: ItemHandle) -> bool {
        self.weapon == Some(handle) || self.armor == Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equip_returns_displaced_handle() {
        let mut eq = Equipment::empty();
        assert_eq!(eq.equip(EquipSlot::Weapon, ItemHandle(1)), None);
        assert_eq!(
            eq.equip(EquipSlot::Weapon, ItemHandle(2)),
            Some(ItemHandle(1))
        );
        assert_eq!(eq.weapon, Some(ItemHandle(2)));
    }

    #[test]
    fn unequip_empty_slot_is_none() {
        let mut eq = Equipment::empty();
        assert_eq!(eq.unequip(EquipSlot::Armor), None);
    }

    #[test]
    fn slot_names_parse_case_insensitively() {
        assert_eq!("weapon".parse::<EquipSlot>().unwrap(), EquipSlot::Weapon);
        assert_eq!("Armor".parse::<EquipSlot>().unwrap(), EquipSlot::Armor);
    }
}
