//! Item definitions and the content oracle.
//!
//! Item data lives outside the core: the world/content collaborator provides
//! read-only [`ItemDefinition`] templates through the [`ItemOracle`] trait,
//! and entities reference them by [`ItemHandle`]. The core never mutates a
//! template, only per-entity inventory state.
//!
//! # Design: Base + Kind Pattern
//!
//! - [`ItemDefinition`] holds the common fields (handle, name, stack limit,
//!   gold value)
//! - [`ItemKind`] holds the category-specific payload (weapon power,
//!   consumable effect, ...)
//!
//! An item's effect type always matches its category: the category is
//! derived from the kind payload, so a mismatched pair is unrepresentable.

use strum::{Display, EnumIter};

/// Reference to an item definition (lookup via [`ItemOracle`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

/// Item category, derived from the kind payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    Weapon,
    Armor,
    Consumable,
    Key,
    QuestItem,
}

/// Weapon-specific data: a flat attack-power modifier while equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponData {
    pub power: u32,
}

/// Armor-specific data: a flat defense modifier while equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorData {
    pub power: u32,
}

/// Instantaneous effect applied when a consumable is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    /// Restore up to N health.
    Heal(u32),
}

/// Consumable-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableData {
    pub effect: ConsumableEffect,
}

/// Item type with category-specific payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Equippable weapon.
    Weapon(WeaponData),

    /// Equippable armor.
    Armor(ArmorData),

    /// Consumed on use (potions, food).
    Consumable(ConsumableData),

    /// Unlocks a world transition; consumed on use. No combat effect.
    Key { door_id: u16 },

    /// Quest token or valuable. No combat effect.
    Quest { token: u16 },
}

impl ItemKind {
    /// Category implied by the payload.
    pub const fn category(&self) -> ItemCategory {
        match self {
            Self::Weapon(_) => ItemCategory::Weapon,
            Self::Armor(_) => ItemCategory::Armor,
            Self::Consumable(_) => ItemCategory::Consumable,
            Self::Key { .. } => ItemCategory::Key,
            Self::Quest { .. } => ItemCategory::QuestItem,
        }
    }
}

/// Immutable item template.
///
/// # Stacking
///
/// - Weapons/Armor/Keys: `max_stack = 1`
/// - Consumables: stackable, identical items collapse into one slot count
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub handle: ItemHandle,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub max_stack: u16,
    /// Base gold value; shop prices derive from it.
    pub value: u32,
}

impl ItemDefinition {
    pub fn new(
        handle: ItemHandle,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ItemKind,
        max_stack: u16,
        value: u32,
    ) -> Self {
        Self {
            handle,
            name: name.into(),
            description: description.into(),
            kind,
            max_stack,
            value,
        }
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    pub fn is_equippable(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_) | ItemKind::Armor(_))
    }

    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }
}

/// Read-only access to item templates.
pub trait ItemOracle {
    /// Look up a definition by handle.
    fn definition(&self, handle: ItemHandle) -> Option<&ItemDefinition>;

    /// All definitions known to this oracle, in stable order.
    fn all_definitions(&self) -> &[ItemDefinition];
}

/// Price a merchant charges for an item (value x 3/2).
pub fn buy_price(definition: &ItemDefinition) -> u32 {
    definition.value.saturating_mul(3) / 2
}

/// Price a merchant pays for an item (value x 3/5).
pub fn sell_price(definition: &ItemDefinition) -> u32 {
    definition.value.saturating_mul(3) / 5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> ItemDefinition {
        ItemDefinition::new(
            ItemHandle(1),
            "Iron Sword",
            "A solid blade.",
            ItemKind::Weapon(WeaponData { power: 4 }),
            1,
            40,
        )
    }

    #[test]
    fn category_follows_kind() {
        assert_eq!(sword().category(), ItemCategory::Weapon);
        let key = ItemKind::Key { door_id: 3 };
        assert_eq!(key.category(), ItemCategory::Key);
    }

    #[test]
    fn shop_prices_round_down() {
        let def = sword();
        assert_eq!(buy_price(&def), 60);
        assert_eq!(sell_price(&def), 24);
    }

    #[test]
    fn equippables_are_not_stackable() {
        let def = sword();
        assert!(def.is_equippable());
        assert!(!def.is_stackable());
    }
}
