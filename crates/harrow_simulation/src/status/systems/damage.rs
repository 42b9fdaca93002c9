//! Damage and defeat systems.

use bevy::prelude::*;

use crate::components::{CharacterStatus, DamageOutcome, Defeated, MovementIntent, PendingImpulse};
use crate::logger;
use crate::scheduler::DelayTimers;
use crate::status::events::{CharacterDefeated, DamageRequest, FlinchStarted};

/// Система: DamageRequest → CharacterStatus
///
/// Урон во время dodge и по побеждённым молча игнорируется (см. DamageOutcome).
pub fn apply_damage_requests(
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(&mut CharacterStatus, &mut DelayTimers, Option<&mut PendingImpulse>)>,
    mut defeated_events: EventWriter<CharacterDefeated>,
    mut flinch_events: EventWriter<FlinchStarted>,
) {
    for request in requests.read() {
        let Ok((mut status, mut timers, impulse)) = targets.get_mut(request.target) else {
            logger::log_warning(&format!(
                "DamageRequest: target {:?} has no CharacterStatus",
                request.target
            ));
            continue;
        };

        let outcome = match (request.push, impulse) {
            (Some(push), Some(mut impulse)) => status.apply_damage_with_force(
                request.amount,
                request.poise_damage,
                push.direction,
                push.force,
                &mut *timers,
                &mut *impulse,
            ),
            _ => status.apply_damage(request.amount, request.poise_damage, &mut *timers),
        };

        match outcome {
            DamageOutcome::Defeated => {
                defeated_events.write(CharacterDefeated { entity: request.target });
            }
            DamageOutcome::Applied { flinch_started: true } => {
                flinch_events.write(FlinchStarted { entity: request.target });
            }
            _ => {}
        }
    }
}

/// Система: CharacterDefeated → Defeated marker
///
/// Обнуляем movement сразу, marker вешаем через Commands.
pub fn mark_defeated(
    mut commands: Commands,
    mut defeated_events: EventReader<CharacterDefeated>,
    mut intents: Query<&mut MovementIntent>,
) {
    for event in defeated_events.read() {
        if let Ok(mut intent) = intents.get_mut(event.entity) {
            *intent = MovementIntent::default();
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Defeated);
            logger::log_info(&format!("Entity {:?} marked as defeated", event.entity));
        }
    }
}
