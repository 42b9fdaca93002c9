//! Конфигурация персонажа (TOML)
//!
//! Все поля имеют defaults — пустой файл валиден.
//!
//! ```toml
//! [status]
//! max_health = 120.0
//! regen_delay = 1.5
//!
//! [locomotion]
//! base_move_speed = 450.0
//! sprint_modifier = 1.75
//! ```

use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Параметры CharacterStatus
///
/// Время — в секундах, стоимости stamina — в единицах за stamina tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub max_health: f32,
    pub max_stamina: f32,
    /// Сколько stamina восстанавливается за один stamina tick
    pub stamina_regen_rate: f32,
    pub max_poise: f32,
    /// Интервал между stamina ticks
    pub stamina_tick_interval: f32,
    /// Пауза без трат перед началом регенерации
    pub regen_delay: f32,
    pub flinch_duration: f32,
    pub sprint_cost: f32,
    pub dodge_cost: f32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_stamina: 100.0,
            stamina_regen_rate: 2.0,
            max_poise: 50.0,
            stamina_tick_interval: 0.1,
            regen_delay: 2.0,
            flinch_duration: 0.2,
            sprint_cost: 1.0,
            dodge_cost: 15.0,
        }
    }
}

/// Параметры PlayerLocomotion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub base_move_speed: f32,
    pub sprint_modifier: f32,
    /// Скорость во время flinch
    pub flinch_move_speed: f32,
    /// Сколько держать кнопку dodge, чтобы вместо dodge начался sprint
    pub sprint_hold_threshold: f32,
    pub sprint_stop_delay: f32,
    pub dodge_duration: f32,
    pub horizontal_look_sensitivity: f32,
    pub vertical_look_sensitivity: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            base_move_speed: 600.0,
            sprint_modifier: 1.5,
            flinch_move_speed: 100.0,
            sprint_hold_threshold: 0.5,
            sprint_stop_delay: 0.3,
            dodge_duration: 0.4,
            horizontal_look_sensitivity: 1.0,
            vertical_look_sensitivity: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct SimulationConfig {
    pub status: StatusConfig,
    pub locomotion: LocomotionConfig,
}

impl SimulationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        crate::logger::log_info(&format!("Loaded config from {}", path.display()));
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.status;
        positive("status.max_health", s.max_health)?;
        positive("status.max_stamina", s.max_stamina)?;
        positive("status.max_poise", s.max_poise)?;
        positive("status.stamina_tick_interval", s.stamina_tick_interval)?;
        non_negative("status.stamina_regen_rate", s.stamina_regen_rate)?;
        non_negative("status.regen_delay", s.regen_delay)?;
        non_negative("status.flinch_duration", s.flinch_duration)?;
        non_negative("status.sprint_cost", s.sprint_cost)?;
        non_negative("status.dodge_cost", s.dodge_cost)?;

        let l = &self.locomotion;
        positive("locomotion.base_move_speed", l.base_move_speed)?;
        non_negative("locomotion.flinch_move_speed", l.flinch_move_speed)?;
        non_negative("locomotion.sprint_hold_threshold", l.sprint_hold_threshold)?;
        non_negative("locomotion.sprint_stop_delay", l.sprint_stop_delay)?;
        non_negative("locomotion.dodge_duration", l.dodge_duration)?;

        if l.sprint_modifier.is_nan() || l.sprint_modifier < 1.0 {
            return Err(ConfigError::Invalid {
                field: "locomotion.sprint_modifier",
                reason: format!("must be >= 1.0, got {}", l.sprint_modifier),
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be > 0, got {}", value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be >= 0, got {}", value),
        })
    }
}
