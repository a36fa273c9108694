//! The encounter state machine.
//!
//! One [`Encounter`] instance governs one fight between the player and a
//! single enemy. The caller submits player intents; the enemy turn is fully
//! automated and resolves inside the same call, so every submission either
//! ends the fight or returns control at the next `PlayerTurn`.
//!
//! ```text
//! Idle -> InCombat -> PlayerTurn <-> EnemyTurn
//!                          |              |
//!                          v              v
//!                   Victory / Fled      Defeat
//! ```
//!
//! `Victory`, `Defeat` and `Fled` are terminal; the resolver is then
//! discarded and control returns to the world layer.

use thiserror::Error;

use crate::config::GameConfig;
use crate::entity::{Enemy, Player, UseError};
use crate::error::{ErrorSeverity, GameError};
use crate::item::{ItemHandle, ItemOracle};
use crate::progression::award_experience;
use crate::rng::RngSource;

use super::attack_damage;
use super::event::{CombatEvent, Combatant};

/// Resolver states. `Idle` exists only between construction and the first
/// transition inside [`Encounter::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatState {
    Idle,
    InCombat,
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
    Fled,
}

impl CombatState {
    /// True for states that end the encounter.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Fled)
    }
}

/// Player intent for one combat round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    UseItem(ItemHandle),
    Flee,
}

/// Result of one submission: the state reached and everything that
/// happened on the way, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatOutcome {
    pub state: CombatState,
    pub events: Vec<CombatEvent>,
}

/// Errors raised by [`Encounter::submit`]. A rejected action mutates
/// nothing; the encounter stays where it was.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CombatError {
    /// The action is not permitted in the current state (e.g. the
    /// encounter already ended).
    #[error("no action is possible in the {0:?} state")]
    InvalidAction(CombatState),

    /// Using the item failed; the turn is not consumed.
    #[error(transparent)]
    Item(#[from] UseError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidAction(_) => ErrorSeverity::Validation,
            Self::Item(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAction(_) => "COMBAT_INVALID_ACTION",
            Self::Item(inner) => inner.error_code(),
        }
    }
}

/// One combat session between the player and a single enemy.
///
/// The encounter owns the enemy for its duration. On `Fled` the caller
/// takes it back via [`Encounter::into_enemy`] so the world keeps the
/// enemy; on `Victory` the enemy is consumed with the resolver.
#[derive(Clone, Debug)]
pub struct Encounter {
    enemy: Enemy,
    state: CombatState,
}

impl Encounter {
    /// Begin combat against a present enemy: `Idle -> InCombat ->
    /// PlayerTurn`, awaiting the first player action.
    pub fn start(enemy: Enemy) -> Self {
        let mut encounter = Self {
            enemy,
            state: CombatState::Idle,
        };
        encounter.state = CombatState::InCombat;
        encounter.state = CombatState::PlayerTurn;
        encounter
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Reclaim the enemy after the encounter ends without a kill.
    pub fn into_enemy(self) -> Enemy {
        self.enemy
    }

    /// Submit one player action and resolve the full round.
    ///
    /// If the player action does not end the fight, the enemy turn runs
    /// immediately and the encounter returns to `PlayerTurn` (or enters
    /// `Defeat`).
    pub fn submit(
        &mut self,
        player: &mut Player,
        action: CombatAction,
        items: &impl ItemOracle,
        rng: &mut impl RngSource,
        config: &GameConfig,
    ) -> Result<CombatOutcome, CombatError> {
        if self.state != CombatState::PlayerTurn {
            return Err(CombatError::InvalidAction(self.state));
        }

        let mut events = Vec::new();
        match action {
            CombatAction::Attack => {
                let damage = attack_damage(
                    player.entity.effective_attack(items),
                    self.enemy.entity.effective_defense(items),
                );
                self.enemy.entity.stats.apply_damage(damage);
                events.push(CombatEvent::AttackLanded {
                    attacker: Combatant::Player,
                    damage,
                    target_health: self.enemy.entity.stats.current_health,
                });
                if self.enemy.entity.is_defeated() {
                    self.resolve_victory(player, items, config, &mut events);
                } else {
                    self.enemy_turn(player, items, &mut events);
                }
            }
            CombatAction::UseItem(handle) => {
                // A failed use is rejected before any state changes and
                // does not consume the turn.
                let outcome = player.entity.use_consumable(handle, items)?;
                events.push(CombatEvent::ItemUsed { handle, outcome });
                self.enemy_turn(player, items, &mut events);
            }
            CombatAction::Flee => {
                let success = rng.chance_percent(config.flee_success_percent);
                events.push(CombatEvent::FleeAttempt { success });
                if success {
                    self.state = CombatState::Fled;
                } else {
                    self.enemy_turn(player, items, &mut events);
                }
            }
        }

        Ok(CombatOutcome {
            state: self.state,
            events,
        })
    }

    /// Automated enemy turn: the enemy always attacks.
    fn enemy_turn(
        &mut self,
        player: &mut Player,
        items: &impl ItemOracle,
        events: &mut Vec<CombatEvent>,
    ) {
        self.state = CombatState::EnemyTurn;
        let damage = attack_damage(
            self.enemy.entity.effective_attack(items),
            player.entity.effective_defense(items),
        );
        player.entity.stats.apply_damage(damage);
        events.push(CombatEvent::AttackLanded {
            attacker: Combatant::Enemy,
            damage,
            target_health: player.entity.stats.current_health,
        });
        self.state = if player.entity.is_defeated() {
            CombatState::Defeat
        } else {
            CombatState::PlayerTurn
        };
    }

    /// Grant loot and experience, then enter the terminal `Victory` state.
    fn resolve_victory(
        &mut self,
        player: &mut Player,
        items: &impl ItemOracle,
        config: &GameConfig,
        events: &mut Vec<CombatEvent>,
    ) {
        self.state = CombatState::Victory;

        if self.enemy.loot.gold > 0 {
            player.gold = player.gold.saturating_add(self.enemy.loot.gold);
            events.push(CombatEvent::GoldLooted {
                amount: self.enemy.loot.gold,
            });
        }
        for entry in &self.enemy.loot.items {
            let granted = items
                .definition(entry.handle)
                .map(|def| player.entity.inventory.add(def, entry.quantity).is_ok())
                .unwrap_or(false);
            events.push(if granted {
                CombatEvent::ItemLooted {
                    handle: entry.handle,
                    quantity: entry.quantity,
                }
            } else {
                CombatEvent::LootLost {
                    handle: entry.handle,
                    quantity: entry.quantity,
                }
            });
        }

        let progression =
            award_experience(&mut player.entity.stats, self.enemy.experience_reward, config);
        events.push(CombatEvent::ExperienceGained {
            amount: progression.experience_gained,
        });
        for level in progression.levels_reached {
            events.push(CombatEvent::LevelUp { level });
        }
    }
}
