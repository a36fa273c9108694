//! Enemy catalog loader.

use std::path::Path;

use game_core::{Enemy, Entity, LootEntry, LootTable, StatBlock};
use serde::{Deserialize, Serialize};

use super::{LoadResult, read_file};

/// One enemy definition as it appears in data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpec {
    pub name: String,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience_reward: u32,
    pub gold_reward: u32,
    #[serde(default)]
    pub loot: Vec<LootEntry>,
}

impl EnemySpec {
    /// Create a fresh combat-ready instance of this definition.
    pub fn spawn(&self) -> Enemy {
        Enemy::new(
            Entity::new(
                self.name.clone(),
                StatBlock::new(self.max_health, self.attack, self.defense),
            ),
            LootTable {
                gold: self.gold_reward,
                items: self.loot.clone(),
            },
            self.experience_reward,
        )
    }
}

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemySpec>,
}

/// Loader for enemy catalogs from RON files.
pub struct EnemyCatalogLoader;

impl EnemyCatalogLoader {
    /// Load enemy specs from a RON file containing an [`EnemyCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<EnemySpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse enemy specs from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<EnemySpec>> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("failed to parse enemy catalog RON: {}", e))?;
        Ok(catalog.enemies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        (
            enemies: [
                (
                    name: "Cave Bat",
                    max_health: 8,
                    attack: 3,
                    defense: 0,
                    experience_reward: 6,
                    gold_reward: 2,
                ),
            ],
        )
    "#;

    #[test]
    fn parses_and_spawns() {
        let enemies = EnemyCatalogLoader::parse(SAMPLE).unwrap();
        assert_eq!(enemies.len(), 1);
        let bat = enemies[0].spawn();
        assert_eq!(bat.entity.name, "Cave Bat");
        assert_eq!(bat.entity.stats.current_health, 8);
        assert!(bat.loot.items.is_empty());
    }
}
