//! Character marker и ECS-обвязка вокруг CharacterStatus / PlayerLocomotion

use bevy::prelude::*;

use crate::components::locomotion::{LookInput, PlayerLocomotion};
use crate::components::status::{CharacterStatus, PendingImpulse};
use crate::config::{SimulationConfig, StatusConfig};
use crate::scheduler::DelayTimers;

/// Персонаж под управлением игрока
///
/// Автоматически добавляет всё остальное через Required Components
/// (с default config). Для своей конфигурации — `character_from_config`.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(CharacterStatus, PlayerLocomotion, DelayTimers, StaminaTickTimer, PendingImpulse, MovementIntent)]
pub struct Character;

/// Маркер: персонаж побеждён (health дошёл до 0)
///
/// Input и stamina для него больше не обрабатываются.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Defeated;

/// Интервал stamina tick (repeating)
#[derive(Component, Debug, Clone)]
pub struct StaminaTickTimer(pub Timer);

impl Default for StaminaTickTimer {
    fn default() -> Self {
        Self::from_config(&StatusConfig::default())
    }
}

impl StaminaTickTimer {
    pub fn from_config(config: &StatusConfig) -> Self {
        Self(Timer::from_seconds(config.stamina_tick_interval, TimerMode::Repeating))
    }
}

/// Итог input за кадр: направление (оси input), текущая скорость, поворот камеры
///
/// Host movement/physics применяет его к телу. Во время Dodge/Flinch
/// direction = 0.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementIntent {
    pub direction: Vec2,
    pub speed: f32,
    pub look: LookInput,
}

/// Набор компонентов персонажа с заданной конфигурацией
pub fn character_from_config(
    config: &SimulationConfig,
) -> (Character, CharacterStatus, PlayerLocomotion, StaminaTickTimer) {
    (
        Character,
        CharacterStatus::from_config(&config.status),
        PlayerLocomotion::from_config(&config.locomotion),
        StaminaTickTimer::from_config(&config.status),
    )
}
