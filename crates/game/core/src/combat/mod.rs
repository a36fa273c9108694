//! Turn-based combat resolution.
//!
//! - **Pure math**: the damage formula lives here as a free function
//! - **State machine**: [`Encounter`] drives one player-versus-one-enemy
//!   fight through explicit states and returns narrative events the
//!   caller renders as text
//!
//! The minimum-damage floor of 1 guarantees every landed attack makes
//! progress, so a fight always terminates in a bounded number of rounds.

pub mod encounter;
pub mod event;

pub use encounter::{CombatAction, CombatError, CombatOutcome, CombatState, Encounter};
pub use event::{CombatEvent, Combatant};

/// Damage dealt by a landed attack: `max(1, attack - defense)`.
pub fn attack_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_attack_minus_defense() {
        assert_eq!(attack_damage(5, 0), 5);
        assert_eq!(attack_damage(5, 3), 2);
    }

    #[test]
    fn damage_never_drops_below_one() {
        assert_eq!(attack_damage(3, 3), 1);
        assert_eq!(attack_damage(0, 10), 1);
    }
}
