//! Locomotion events

use bevy::prelude::*;

/// Тип player input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    /// Оси движения (x — вправо, y — вперёд)
    Move { x: f32, y: f32 },
    /// Оси камеры
    Look { x: f32, y: f32 },
    /// Кнопка dodge удерживается `elapsed` секунд (шлётся каждый кадр)
    DodgeHeld { elapsed: f32 },
    /// Кнопка dodge отпущена после `elapsed` секунд
    DodgeReleased { elapsed: f32 },
}

/// Player input для конкретного персонажа
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LocomotionInput {
    pub entity: Entity,
    pub kind: InputKind,
}

/// Событие: dodge разрешён и начат (host играет анимацию уклонения)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DodgePerformed {
    pub entity: Entity,
}
