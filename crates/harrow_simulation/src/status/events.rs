//! Status events

use bevy::prelude::*;

/// Толчок, который сопровождает урон
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Push {
    pub direction: Vec3,
    pub force: f32,
}

/// Запрос на урон от host (hitbox, скрипт, окружение)
#[derive(Event, Debug, Clone)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
    pub poise_damage: f32,
    pub push: Option<Push>,
}

impl DamageRequest {
    pub fn new(target: Entity, amount: f32, poise_damage: f32) -> Self {
        Self {
            target,
            amount,
            poise_damage,
            push: None,
        }
    }

    pub fn with_push(mut self, direction: Vec3, force: f32) -> Self {
        self.push = Some(Push { direction, force });
        self
    }
}

/// Событие: персонаж побеждён (терминальное)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterDefeated {
    pub entity: Entity,
}

/// Событие: poise сломан, начался flinch
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlinchStarted {
    pub entity: Entity,
}
