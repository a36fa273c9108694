//! The starting player.

use game_core::{Entity, Player, Position, StatBlock};

use crate::catalog::{StaticCatalog, handles};

/// Starting gold.
pub const STARTING_GOLD: u32 = 30;

/// Where a new game (and a post-defeat respawn) begins: the Crossroads.
pub const STARTING_POSITION: Position = Position::new(1, 1);

/// Build a fresh level-1 player with the starter kit: a knife, a vest,
/// and a piece of bread.
pub fn starting_player(name: &str, catalog: &StaticCatalog) -> Player {
    let mut entity = Entity::new(name, StatBlock::new(40, 6, 2));
    for handle in [
        handles::TRAVELERS_KNIFE,
        handles::LEATHER_VEST,
        handles::STALE_BREAD,
    ] {
        // The catalog is built-in and the inventory starts empty.
        let granted = entity.take(handle, 1, catalog);
        debug_assert!(granted.is_ok());
    }
    Player::new(entity, STARTING_GOLD, STARTING_POSITION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_kit_is_complete() {
        let catalog = StaticCatalog::builtin();
        let player = starting_player("Hero", &catalog);
        assert_eq!(player.entity.stats.max_health, 40);
        assert_eq!(player.gold, STARTING_GOLD);
        assert!(player.entity.inventory.contains(handles::TRAVELERS_KNIFE));
        assert!(player.entity.inventory.contains(handles::LEATHER_VEST));
        assert!(player.entity.inventory.contains(handles::STALE_BREAD));
        assert_eq!(player.position, STARTING_POSITION);
    }
}
