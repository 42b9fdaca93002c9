//! Status module: health, stamina, poise в ECS
//!
//! ECS ответственность:
//! - Game state: CharacterStatus (stamina costs, regen gate, flinch)
//! - Rules: damage/poise, stamina tick, смерть как терминальный переход
//! - Events: DamageRequest → CharacterDefeated / FlinchStarted
//!
//! Host ответственность:
//! - Hit detection (кто кого ударил) → DamageRequest
//! - Physics: забирает PendingImpulse
//! - Реакция на CharacterDefeated (анимация, respawn)

use bevy::prelude::*;

pub mod events;
pub mod systems;

pub use events::{CharacterDefeated, DamageRequest, FlinchStarted, Push};

use crate::scheduler::fire_delay_timers;
use crate::CharacterSet;

/// Status Plugin
///
/// Порядок выполнения (Update, через CharacterSet):
/// 1. fire_delay_timers — отложенные переходы (regen delay, flinch, sprint stop, dodge)
/// 2. apply_damage_requests — DamageRequest → CharacterStatus
/// 3. mark_defeated — Defeated marker, обнуление movement
/// 4. tick_stamina — stamina tick по StaminaTickTimer
pub struct StatusPlugin;

impl Plugin for StatusPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageRequest>()
            .add_event::<CharacterDefeated>()
            .add_event::<FlinchStarted>();

        app.add_systems(Update, fire_delay_timers.in_set(CharacterSet::Timers))
            .add_systems(
                Update,
                (systems::apply_damage_requests, systems::mark_defeated)
                    .chain()
                    .in_set(CharacterSet::Damage),
            )
            .add_systems(Update, systems::tick_stamina.in_set(CharacterSet::Stamina));
    }
}
