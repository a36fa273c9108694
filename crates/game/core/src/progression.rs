//! Experience awarding and level-up growth.
//!
//! The threshold curve is content configuration, not a structural rule:
//! combat only requires it to be monotonically increasing and finite for
//! every reachable level. The default curve asks 30 XP to reach level 2
//! and grows by x1.4 (7/5 in integer math) per level.

use crate::config::GameConfig;
use crate::stats::StatBlock;

/// Experience required to advance from `level` to `level + 1`.
///
/// `threshold(level) = experience_base * (7/5)^(level - 1)`, computed in
/// u64 and clamped to `u32::MAX`. The clamp keeps the curve monotonic at
/// the top end; levels beyond it are simply unreachable.
pub fn level_threshold(level: u32, config: &GameConfig) -> u32 {
    let mut threshold = u64::from(config.experience_base.max(1));
    for _ in 1..level {
        threshold = threshold * GameConfig::EXPERIENCE_GROWTH_NUM / GameConfig::EXPERIENCE_GROWTH_DEN;
        if threshold >= u64::from(u32::MAX) {
            return u32::MAX;
        }
    }
    threshold as u32
}

/// Result of an experience award, for display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressionOutcome {
    /// Experience actually added.
    pub experience_gained: u32,

    /// Levels reached during this award, in order. Empty if no threshold
    /// was crossed.
    pub levels_reached: Vec<u32>,
}

/// Add experience and resolve any level-ups it triggers.
///
/// A large award may cross several thresholds; each crossing consumes the
/// threshold amount, raises the level, applies the per-level stat growth
/// from the config, and fully heals the character.
pub fn award_experience(
    stats: &mut StatBlock,
    amount: u32,
    config: &GameConfig,
) -> ProgressionOutcome {
    stats.experience = stats.experience.saturating_add(amount);
    let mut outcome = ProgressionOutcome {
        experience_gained: amount,
        levels_reached: Vec::new(),
    };

    loop {
        let threshold = level_threshold(stats.level, config);
        if stats.experience < threshold {
            break;
        }
        stats.experience -= threshold;
        stats.level += 1;
        stats.max_health += config.health_per_level;
        stats.attack_power += config.attack_per_level;
        stats.defense += config.defense_per_level;
        stats.current_health = stats.max_health;
        outcome.levels_reached.push(stats.level);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_follows_the_default_curve() {
        let config = GameConfig::default();
        assert_eq!(level_threshold(1, &config), 30);
        assert_eq!(level_threshold(2, &config), 42); // 30 * 7/5
        assert_eq!(level_threshold(3, &config), 58); // 42 * 7/5, floored
    }

    #[test]
    fn threshold_is_monotonic() {
        let config = GameConfig::default();
        let mut previous = 0;
        for level in 1..200 {
            let t = level_threshold(level, &config);
            assert!(t >= previous, "threshold dipped at level {level}");
            previous = t;
        }
    }

    #[test]
    fn exact_threshold_levels_exactly_once() {
        let config = GameConfig::default();
        let mut stats = StatBlock::new(40, 6, 2);

        let outcome = award_experience(&mut stats, 30, &config);
        assert_eq!(outcome.levels_reached, vec![2]);
        assert_eq!(stats.level, 2);
        assert_eq!(stats.experience, 0);
    }

    #[test]
    fn level_up_applies_growth_and_full_heal() {
        let config = GameConfig::default();
        let mut stats = StatBlock::new(40, 6, 2);
        stats.apply_damage(25);

        award_experience(&mut stats, 30, &config);
        assert_eq!(stats.max_health, 48);
        assert_eq!(stats.current_health, 48);
        assert_eq!(stats.attack_power, 8);
        assert_eq!(stats.defense, 3);
    }

    #[test]
    fn large_award_crosses_multiple_thresholds() {
        let config = GameConfig::default();
        let mut stats = StatBlock::new(40, 6, 2);

        // 30 + 42 = 72 to reach level 3; 80 leaves 8 toward level 4.
        let outcome = award_experience(&mut stats, 80, &config);
        assert_eq!(outcome.levels_reached, vec![2, 3]);
        assert_eq!(stats.level, 3);
        assert_eq!(stats.experience, 8);
    }

    #[test]
    fn below_threshold_awards_accumulate() {
        let config = GameConfig::default();
        let mut stats = StatBlock::new(40, 6, 2);

        let outcome = award_experience(&mut stats, 12, &config);
        assert!(outcome.levels_reached.is_empty());
        assert_eq!(stats.level, 1);
        assert_eq!(stats.experience, 12);
    }
}
