//! Stamina tick system.

use bevy::prelude::*;

use crate::components::{CharacterStatus, Defeated, StaminaTickTimer};
use crate::scheduler::DelayTimers;

/// Система: stamina tick по интервалу StaminaTickTimer
///
/// Если кадр длиннее интервала — несколько ticks подряд, чтобы трата
/// Sprint не зависела от frame rate.
pub fn tick_stamina(
    time: Res<Time>,
    mut query: Query<(&mut StaminaTickTimer, &mut CharacterStatus, &mut DelayTimers), Without<Defeated>>,
) {
    for (mut tick_timer, mut status, mut timers) in query.iter_mut() {
        tick_timer.0.tick(time.delta());

        for _ in 0..tick_timer.0.times_finished_this_tick() {
            status.stamina_tick(&mut *timers);
        }
    }
}
