/// Game configuration constants and tunable content parameters.
///
/// Balance values live here rather than in the rules code: the combat and
/// progression modules read whatever curve the config carries, and only
/// require it to stay monotonic (see [`crate::progression::level_threshold`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Success chance of a flee attempt, in percent (0-100).
    pub flee_success_percent: u32,

    /// Max-health increase per level gained.
    pub health_per_level: u32,

    /// Attack-power increase per level gained.
    pub attack_per_level: u32,

    /// Defense increase per level gained.
    pub defense_per_level: u32,

    /// Experience required to reach level 2. Later thresholds grow
    /// geometrically from this base.
    pub experience_base: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of inventory slots per entity.
    pub const MAX_INVENTORY_SLOTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FLEE_SUCCESS_PERCENT: u32 = 50;
    pub const DEFAULT_HEALTH_PER_LEVEL: u32 = 8;
    pub const DEFAULT_ATTACK_PER_LEVEL: u32 = 2;
    pub const DEFAULT_DEFENSE_PER_LEVEL: u32 = 1;
    pub const DEFAULT_EXPERIENCE_BASE: u32 = 30;

    /// Numerator and denominator of the per-level threshold growth factor.
    /// 7/5 gives a 1.4x curve in integer math.
    pub const EXPERIENCE_GROWTH_NUM: u64 = 7;
    pub const EXPERIENCE_GROWTH_DEN: u64 = 5;

    pub fn new() -> Self {
        Self {
            flee_success_percent: Self::DEFAULT_FLEE_SUCCESS_PERCENT,
            health_per_level: Self::DEFAULT_HEALTH_PER_LEVEL,
            attack_per_level: Self::DEFAULT_ATTACK_PER_LEVEL,
            defense_per_level: Self::DEFAULT_DEFENSE_PER_LEVEL,
            experience_base: Self::DEFAULT_EXPERIENCE_BASE,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
