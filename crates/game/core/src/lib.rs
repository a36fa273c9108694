//! Combat resolution and character progression rules for Echoes of Asteria.
//!
//! `game-core` defines the canonical rules (stats, items, combat, progression)
//! and exposes pure APIs reused by the runtime and offline tools. The crate
//! performs no I/O: content arrives through the [`ItemOracle`] trait,
//! randomness through the [`RngSource`] trait, and the world layer drives
//! encounters through [`combat::Encounter`].
pub mod combat;
pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod item;
pub mod progression;
pub mod rng;
pub mod stats;

#[cfg(feature = "serde")]
pub mod save;

pub use combat::{
    CombatAction, CombatError, CombatEvent, CombatOutcome, CombatState, Combatant, Encounter,
    attack_damage,
};
pub use common::Position;
pub use config::GameConfig;
pub use entity::{
    EffectOutcome, Enemy, Entity, EquipError, EquipSlot, Equipment, Inventory, InventoryError,
    InventorySlot, LootEntry, LootTable, Player, QuestFlags, UseError,
};
pub use error::{ErrorSeverity, GameError};
pub use item::{
    ArmorData, ConsumableData, ConsumableEffect, ItemCategory, ItemDefinition, ItemHandle,
    ItemKind, ItemOracle, WeaponData, buy_price, sell_price,
};
pub use progression::{ProgressionOutcome, award_experience, level_threshold};
pub use rng::{PcgRng, RngSource};
pub use stats::StatBlock;

#[cfg(feature = "serde")]
pub use save::{PlayerRecord, SAVE_VERSION, SaveError, SaveGame, SlotRecord};
