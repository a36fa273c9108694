//! Enemy templates.
//!
//! Templates are read-only data; [`EnemyTemplate::spawn`] clones one into a
//! fresh per-room [`Enemy`] instance. Enemies are never persisted, they are
//! respawned from these templates when a save is loaded.

use game_core::{Enemy, Entity, LootEntry, LootTable, StatBlock};

/// Read-only enemy definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience_reward: u32,
    pub gold_reward: u32,
}

impl EnemyTemplate {
    /// Create a fresh combat-ready instance of this template.
    pub fn spawn(&self) -> Enemy {
        Enemy::new(
            Entity::new(self.name, StatBlock::new(self.max_health, self.attack, self.defense)),
            LootTable {
                gold: self.gold_reward,
                items: Vec::new(),
            },
            self.experience_reward,
        )
    }

    /// Spawn with extra item drops on top of the template's gold.
    pub fn spawn_with_loot(&self, items: Vec<LootEntry>) -> Enemy {
        let mut enemy = self.spawn();
        enemy.loot.items = items;
        enemy
    }
}

/// The built-in enemy roster.
pub mod templates {
    use super::EnemyTemplate;

    pub const WOLF: EnemyTemplate = EnemyTemplate {
        name: "Wolf",
        max_health: 14,
        attack: 5,
        defense: 1,
        experience_reward: 12,
        gold_reward: 8,
    };

    pub const MARSH_SLIME: EnemyTemplate = EnemyTemplate {
        name: "Marsh Slime",
        max_health: 12,
        attack: 4,
        defense: 0,
        experience_reward: 10,
        gold_reward: 6,
    };

    pub const BANDIT: EnemyTemplate = EnemyTemplate {
        name: "Bandit",
        max_health: 18,
        attack: 6,
        defense: 1,
        experience_reward: 14,
        gold_reward: 12,
    };

    /// The boss of the Obsidian Keep; defeating it ends the game.
    pub const OBSIDIAN_WARDEN: EnemyTemplate = EnemyTemplate {
        name: "Obsidian Warden",
        max_health: 60,
        attack: 10,
        defense: 4,
        experience_reward: 80,
        gold_reward: 50,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_instances_are_independent() {
        let mut a = templates::WOLF.spawn();
        let b = templates::WOLF.spawn();
        a.entity.stats.apply_damage(5);
        assert_eq!(b.entity.stats.current_health, 14);
    }

    #[test]
    fn templates_match_expected_balance() {
        let warden = templates::OBSIDIAN_WARDEN.spawn();
        assert_eq!(warden.entity.stats.max_health, 60);
        assert_eq!(warden.experience_reward, 80);
        assert_eq!(warden.loot.gold, 50);
    }
}
