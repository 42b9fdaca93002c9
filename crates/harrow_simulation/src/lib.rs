//! Harrow Simulation Core
//!
//! Персонаж third-person action: CharacterStatus (health/stamina/poise) и
//! PlayerLocomotion (скорость, sprint, dodge, flinch) на Bevy ECS.
//!
//! Движок/host отвечает за физику, анимации, камеру и чтение input;
//! здесь — только state machines и их ECS-обвязка.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod locomotion;
pub mod logger;
pub mod scheduler;
pub mod status;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{ConfigError, LocomotionConfig, SimulationConfig, StatusConfig};
pub use locomotion::{DodgePerformed, InputKind, LocomotionInput, LocomotionPlugin};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use scheduler::{DelayTimers, DelayedAction, Scheduler, TimerToken};
pub use status::{CharacterDefeated, DamageRequest, FlinchStarted, Push, StatusPlugin};

/// Порядок фаз персонажа внутри Update
///
/// Locomotion всегда после Status, чтобы читать flinch state этого кадра.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    Timers,
    Damage,
    Stamina,
    Locomotion,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .configure_sets(
                Update,
                (
                    CharacterSet::Timers,
                    CharacterSet::Damage,
                    CharacterSet::Stamina,
                    CharacterSet::Locomotion,
                )
                    .chain(),
            )
            .add_plugins((StatusPlugin, LocomotionPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Шаг симуляции по умолчанию (60 Hz)
pub const DEFAULT_STEP: Duration = Duration::from_nanos(16_666_667);

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время не real-time: каждый `app.update()` двигает часы ровно на шаг
/// (`step_simulation` позволяет задать свой). Один пустой кадр прогоняется
/// сразу — первый кадр Bevy всегда с нулевым delta.
pub fn create_headless_app(seed: u64, config: SimulationConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(DEFAULT_STEP))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app.update();
    app
}

/// Один кадр симуляции длиной `delta`
///
/// Virtual time режет delta больше 250ms — длинные интервалы дробить на шаги.
pub fn step_simulation(app: &mut App, delta: Duration) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(delta));
    app.update();
}

/// Спавнит персонажа с конфигурацией из SimulationConfig resource
pub fn spawn_character(world: &mut World) -> Entity {
    let config = *world.resource::<SimulationConfig>();
    world.spawn(character_from_config(&config)).id()
}

/// Snapshot всех CharacterStatus для сравнения детерминизма
pub fn status_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &CharacterStatus)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, status) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", status).as_bytes());
    }

    snapshot
}
