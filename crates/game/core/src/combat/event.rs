//! Narrative events produced by combat resolution.
//!
//! The resolver mutates entities and reports what happened as data; the
//! client turns these into text. Events never carry references into the
//! encounter so the caller can keep them after the resolver is discarded.

use crate::entity::EffectOutcome;
use crate::item::ItemHandle;

/// Which side of the encounter an event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Combatant {
    Player,
    Enemy,
}

/// One narrated step of combat resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// An attack landed.
    AttackLanded {
        attacker: Combatant,
        damage: u32,
        /// Target's health after the hit.
        target_health: u32,
    },

    /// The player used a consumable.
    ItemUsed {
        handle: ItemHandle,
        outcome: EffectOutcome,
    },

    /// A flee attempt was resolved.
    FleeAttempt { success: bool },

    /// Experience granted on victory.
    ExperienceGained { amount: u32 },

    /// A level was reached while awarding experience.
    LevelUp { level: u32 },

    /// Gold granted on victory.
    GoldLooted { amount: u32 },

    /// A loot item was added to the player's inventory.
    ItemLooted { handle: ItemHandle, quantity: u16 },

    /// A loot item did not fit the inventory and was left behind.
    LootLost { handle: ItemHandle, quantity: u16 },
}
