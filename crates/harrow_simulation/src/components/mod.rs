//! ECS Components персонажа
//!
//! Организация по доменам:
//! - stats: базовые характеристики (Health, Stamina, Poise)
//! - status: CharacterStatus (stamina costs, regen gate, flinch, damage)
//! - locomotion: PlayerLocomotion (скорость, action list, sprint/dodge)
//! - character: Character marker + ECS-обвязка (stamina tick timer, movement intent)

pub mod character;
pub mod locomotion;
pub mod stats;
pub mod status;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod locomotion_tests;

// Re-exports для удобного импорта
pub use character::*;
pub use locomotion::*;
pub use stats::*;
pub use status::*;
