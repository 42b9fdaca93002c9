//! Locomotion systems.

use bevy::prelude::*;

use crate::components::{CharacterStatus, Defeated, FlinchEdge, MovementIntent, PlayerLocomotion};
use crate::locomotion::events::{DodgePerformed, InputKind, LocomotionInput};
use crate::logger;
use crate::scheduler::DelayTimers;

/// Система: синхронизация flinch flag CharacterStatus → PlayerLocomotion
pub fn sync_flinch_state(mut query: Query<(Entity, &CharacterStatus, &mut PlayerLocomotion)>) {
    for (entity, status, mut locomotion) in query.iter_mut() {
        match locomotion.sync_flinch(status) {
            Some(FlinchEdge::Started) => logger::log(&format!("{:?}: movement locked (flinch)", entity)),
            Some(FlinchEdge::Ended) => logger::log(&format!("{:?}: movement unlocked", entity)),
            None => {}
        }
    }
}

/// Система: LocomotionInput → PlayerLocomotion / MovementIntent
///
/// MovementIntent пересобирается каждый кадр: без Move input персонаж стоит.
pub fn process_locomotion_input(
    mut inputs: EventReader<LocomotionInput>,
    mut characters: Query<
        (&mut PlayerLocomotion, &mut CharacterStatus, &mut DelayTimers, &mut MovementIntent),
        Without<Defeated>,
    >,
    mut dodge_events: EventWriter<DodgePerformed>,
) {
    for (_, _, _, mut intent) in characters.iter_mut() {
        intent.direction = Vec2::ZERO;
        intent.look = Default::default();
    }

    for input in inputs.read() {
        let Ok((mut locomotion, mut status, mut timers, mut intent)) = characters.get_mut(input.entity) else {
            continue;
        };

        match input.kind {
            InputKind::Move { x, y } => {
                // Dodge/Flinch блокируют обе оси целиком
                intent.direction = locomotion.movement_input(x, y).unwrap_or(Vec2::ZERO);
            }
            InputKind::Look { x, y } => {
                let look = locomotion.look_input(x, y);
                intent.look.yaw += look.yaw;
                intent.look.pitch += look.pitch;
            }
            InputKind::DodgeHeld { elapsed } => {
                locomotion.dodge_held(elapsed, &mut status, &mut *timers);
            }
            InputKind::DodgeReleased { elapsed } => {
                if locomotion.dodge_released(elapsed, &mut status, &mut *timers)
                    && locomotion.begin_dodge(&mut status, &mut *timers)
                {
                    intent.direction = Vec2::ZERO;
                    dodge_events.write(DodgePerformed { entity: input.entity });
                    logger::log(&format!("{:?}: dodge granted", input.entity));
                }
            }
        }
    }

    for (locomotion, _, _, mut intent) in characters.iter_mut() {
        intent.speed = locomotion.move_speed.current;
    }
}
