//! Dispatch сработавших DelayTimers обратно в status/locomotion.

use bevy::prelude::*;

use crate::components::{CharacterStatus, PlayerLocomotion};
use crate::scheduler::{DelayTimers, DelayedAction};

/// Система: двигаем часы DelayTimers и применяем сработавшие переходы
///
/// Запускается первой в кадре, чтобы damage/stamina/locomotion видели
/// уже закончившиеся flinch и dodge.
pub fn fire_delay_timers(
    time: Res<Time>,
    mut query: Query<(&mut DelayTimers, &mut CharacterStatus, Option<&mut PlayerLocomotion>)>,
) {
    let delta = time.delta_secs();

    for (mut timers, mut status, mut locomotion) in query.iter_mut() {
        for fired in timers.advance(delta) {
            match fired.action {
                DelayedAction::RegenDelayElapsed => status.trigger_stamina_regen(fired.token),
                DelayedAction::FlinchFinished => status.stop_flinching(),
                DelayedAction::SprintStopElapsed => {
                    if let Some(locomotion) = locomotion.as_deref_mut() {
                        locomotion.finish_sprint_stop(fired.token, &mut status);
                    }
                }
                DelayedAction::DodgeFinished => {
                    if let Some(locomotion) = locomotion.as_deref_mut() {
                        locomotion.finish_dodge(fired.token, &mut status);
                    }
                }
            }
        }
    }
}
