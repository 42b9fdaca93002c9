//! Базовые характеристики персонажа: Health, Stamina, Poise

use bevy::prelude::*;

/// `value` в [0, max]; NaN → 0
fn clamp_or_zero(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// Здоровье
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Урон, которого хватит чтобы убить
    pub fn is_lethal(&self, amount: f32) -> bool {
        self.current - amount <= 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = clamp_or_zero(self.current - amount, self.max);
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn clamp(&mut self) {
        self.current = clamp_or_zero(self.current, self.max);
    }
}

/// Выносливость
///
/// Инвариант (после clamp): 0.0 ≤ current ≤ max.
/// `regen_rate` — единиц за stamina tick, не за секунду.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    pub regen_rate: f32,
}

impl Default for Stamina {
    fn default() -> Self {
        Self::new(100.0, 2.0)
    }
}

impl Stamina {
    pub fn new(max: f32, regen_rate: f32) -> Self {
        Self {
            current: max,
            max,
            regen_rate,
        }
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Вычесть без проверки — может уйти ниже 0 до следующего clamp
    pub fn drain(&mut self, amount: f32) {
        self.current -= amount;
    }

    pub fn regenerate(&mut self) {
        self.current = (self.current + self.regen_rate).min(self.max);
    }

    pub fn clamp(&mut self) {
        self.current = clamp_or_zero(self.current, self.max);
    }
}

/// Накопленный stagger
///
/// Верхнего clamp нет: при current ≥ max запускается flinch,
/// сброс в 0 — только по окончании flinch.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Poise {
    pub current: f32,
    pub max: f32,
}

impl Default for Poise {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl Poise {
    pub fn new(max: f32) -> Self {
        Self { current: 0.0, max }
    }

    pub fn accumulate(&mut self, amount: f32) {
        self.current = (self.current + amount).max(0.0);
    }

    pub fn is_broken(&self) -> bool {
        self.current >= self.max
    }

    pub fn reset(&mut self) {
        self.current = 0.0;
    }
}
