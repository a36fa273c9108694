//! The stat block shared by every combat participant.
//!
//! Only base attributes are stored here. Effective attack and defense
//! (base plus equipment modifiers) are computed on demand by
//! [`crate::entity::Entity`] because they need the item catalog.
//!
//! # Invariants
//!
//! - `current_health <= max_health`
//! - `level >= 1`
//! - all values are unsigned, so stats can never go negative

/// Numeric attributes of a combat participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub max_health: u32,
    pub current_health: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub level: u32,
    pub experience: u32,
}

impl StatBlock {
    /// Create a level-1 stat block at full health with no experience.
    pub fn new(max_health: u32, attack_power: u32, defense: u32) -> Self {
        Self {
            max_health,
            current_health: max_health,
            attack_power,
            defense,
            level: 1,
            experience: 0,
        }
    }

    /// Apply damage, clamping health at zero. Returns the damage dealt
    /// for display.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.current_health = self.current_health.saturating_sub(amount);
        amount
    }

    /// Restore health, clamping at `max_health`. Returns the amount
    /// actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = self.current_health.saturating_add(amount).min(self.max_health);
        self.current_health - before
    }

    /// True iff health has reached zero.
    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.current_health == 0
    }

    /// Checks the structural invariants. Used when rehydrating a save
    /// record, never violated by the mutation methods above.
    pub fn is_valid(&self) -> bool {
        self.current_health <= self.max_health && self.level >= 1 && self.max_health >= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        let mut stats = StatBlock::new(20, 5, 2);
        assert_eq!(stats.apply_damage(7), 7);
        assert_eq!(stats.current_health, 13);
        stats.apply_damage(100);
        assert_eq!(stats.current_health, 0);
        assert!(stats.is_defeated());
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut stats = StatBlock::new(20, 5, 2);
        stats.apply_damage(10);
        assert_eq!(stats.heal(4), 4);
        assert_eq!(stats.current_health, 14);
        assert_eq!(stats.heal(100), 6);
        assert_eq!(stats.current_health, 20);
    }

    #[test]
    fn fresh_block_is_valid_and_alive() {
        let stats = StatBlock::new(10, 3, 0);
        assert!(stats.is_valid());
        assert!(!stats.is_defeated());
        assert_eq!(stats.level, 1);
        assert_eq!(stats.experience, 0);
    }

    #[test]
    fn invalid_blocks_are_detected() {
        let mut stats = StatBlock::new(10, 3, 0);
        stats.current_health = 11;
        assert!(!stats.is_valid());

        let mut stats = StatBlock::new(10, 3, 0);
        stats.level = 0;
        assert!(!stats.is_valid());
    }
}
