//! RON catalog loaders.
//!
//! External content packs replace or extend the built-in catalogs without
//! touching code. All loaders use game-core types directly with serde.

mod enemies;
mod item;

pub use enemies::{EnemyCatalogLoader, EnemySpec};
pub use item::ItemCatalogLoader;

use std::path::Path;

/// Result alias for content loading.
pub type LoadResult<T> = anyhow::Result<T>;

/// Read a content file to a string with path context on failure.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))
}
