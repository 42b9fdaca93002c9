//! Locomotion module: player input → PlayerLocomotion → MovementIntent
//!
//! Flow:
//! 1. Host читает input и шлёт LocomotionInput события
//! 2. sync_flinch_state — PlayerLocomotion догоняет CharacterStatus::flinching
//! 3. process_locomotion_input — move/look/dodge/sprint → MovementIntent
//! 4. Host применяет MovementIntent к телу, на DodgePerformed играет анимацию

use bevy::prelude::*;

pub mod events;
pub mod systems;


pub use events::{DodgePerformed, InputKind, LocomotionInput};

use crate::CharacterSet;

/// Locomotion Plugin
///
/// Запускается после StatusPlugin (CharacterSet::Locomotion), чтобы
/// видеть свежий flinch state этого кадра.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LocomotionInput>().add_event::<DodgePerformed>();

        app.add_systems(
            Update,
            (systems::sync_flinch_state, systems::process_locomotion_input)
                .chain()
                .in_set(CharacterSet::Locomotion),
        );
    }
}
