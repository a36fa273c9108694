//! Static game content and data-file loaders.
//!
//! This crate houses the built-in item catalog, enemy templates, and the
//! starting player, plus RON loaders for external catalogs. Content is
//! consumed through the oracle traits in `game-core` and never mutated:
//! spawning always clones a read-only template into a per-entity instance.

pub mod catalog;
pub mod enemies;
pub mod player;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{StaticCatalog, handles};
pub use enemies::{EnemyTemplate, templates};
pub use player::starting_player;

#[cfg(feature = "loaders")]
pub use loaders::{EnemyCatalogLoader, EnemySpec, ItemCatalogLoader};
