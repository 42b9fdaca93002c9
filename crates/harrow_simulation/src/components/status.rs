//! CharacterStatus — health, stamina, poise и активные траты stamina
//!
//! Два независимых state machine:
//! - Regen gate: Draining → PendingRegenDelay → Regenerating
//! - Flinch: Idle → Flinching → Idle (poise сбрасывается на выходе)
//!
//! Отложенные переходы идут через `Scheduler`, срабатывания приходят обратно
//! через `trigger_stamina_regen` / `stop_flinching`.

use bevy::prelude::*;

use crate::components::stats::{Health, Poise, Stamina};
use crate::config::StatusConfig;
use crate::logger;
use crate::scheduler::{DelayedAction, Scheduler, TimerToken};

/// Действие, которое тратит stamina каждый stamina tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum StaminaCost {
    /// Постоянная трата, пока запись в списке
    Sprint,
    /// Разовая трата: запись снимается в том же tick
    Dodge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum RegenGate {
    #[default]
    Draining,
    /// Ждём regen delay; token — единственный валидный timer
    PendingRegenDelay(TimerToken),
    Regenerating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Полная неуязвимость во время dodge
    Dodging,
    /// Персонаж уже побеждён
    Defeated,
    /// NaN или бесконечность в amount / poise_damage
    InvalidInput,
}

/// Результат `apply_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored(IgnoreReason),
    Applied { flinch_started: bool },
    /// Терминальный переход: health = 0, дальнейший урон игнорируется.
    /// Что делать дальше (анимация, respawn) — решает интегратор.
    Defeated,
}

/// Физическое тело, которое умеет принимать мгновенный импульс
///
/// Status ничего не знает о конкретном physics backend.
pub trait ImpulseSink {
    fn apply_impulse(&mut self, direction: Vec3, force: f32);
}

/// Накопленный за кадр импульс для host physics
///
/// Host (rapier, движок) забирает значение через `take()`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PendingImpulse {
    pub impulse: Vec3,
}

impl PendingImpulse {
    pub fn take(&mut self) -> Vec3 {
        std::mem::replace(&mut self.impulse, Vec3::ZERO)
    }
}

impl ImpulseSink for PendingImpulse {
    fn apply_impulse(&mut self, direction: Vec3, force: f32) {
        self.impulse += direction * force;
    }
}

/// Состояние персонажа
///
/// Все stat поля публичные — host может читать и редактировать их напрямую.
#[derive(Component, Debug, Clone)]
pub struct CharacterStatus {
    pub health: Health,
    pub stamina: Stamina,
    pub poise: Poise,
    /// Порядок важен: costs обрабатываются в порядке добавления
    pub stamina_costs: Vec<StaminaCost>,
    /// true пока идёт flinch
    pub flinching: bool,
    /// Выставляется на время уклонения (полная неуязвимость)
    pub dodging: bool,
    pub defeated: bool,
    pub config: StatusConfig,
    regen: RegenGate,
    can_flinch: bool,
}

impl Default for CharacterStatus {
    fn default() -> Self {
        Self::from_config(&StatusConfig::default())
    }
}

impl CharacterStatus {
    pub fn from_config(config: &StatusConfig) -> Self {
        Self {
            health: Health::new(config.max_health),
            stamina: Stamina::new(config.max_stamina, config.stamina_regen_rate),
            poise: Poise::new(config.max_poise),
            stamina_costs: Vec::new(),
            flinching: false,
            dodging: false,
            defeated: false,
            config: *config,
            regen: RegenGate::Draining,
            can_flinch: true,
        }
    }

    pub fn regen_gate(&self) -> RegenGate {
        self.regen
    }

    pub fn can_flinch(&self) -> bool {
        self.can_flinch
    }

    pub fn cost_of(&self, cost: StaminaCost) -> f32 {
        match cost {
            StaminaCost::Sprint => self.config.sprint_cost,
            StaminaCost::Dodge => self.config.dodge_cost,
        }
    }

    pub fn has_stamina_cost(&self, cost: StaminaCost) -> bool {
        self.stamina_costs.contains(&cost)
    }

    /// Добавить трату. Любая трата отменяет ожидание регенерации вместе с её timer.
    pub fn add_stamina_cost(&mut self, cost: StaminaCost, scheduler: &mut impl Scheduler) {
        self.stamina_costs.push(cost);
        if let RegenGate::PendingRegenDelay(token) = self.regen {
            scheduler.cancel(token);
        }
        self.regen = RegenGate::Draining;
    }

    /// Убрать все записи данного типа, вернуть сколько убрано
    pub fn remove_stamina_cost(&mut self, cost: StaminaCost) -> usize {
        let before = self.stamina_costs.len();
        self.stamina_costs.retain(|entry| *entry != cost);
        before - self.stamina_costs.len()
    }

    /// Один stamina tick
    ///
    /// Пустой список → двигаем regen gate. Иначе списываем costs по порядку:
    /// Sprint остаётся в списке, первый Dodge списывается и снимается, после
    /// чего tick заканчивается. Списание прекращается, как только stamina
    /// дошла до 0.
    pub fn stamina_tick(&mut self, scheduler: &mut impl Scheduler) {
        self.stamina.clamp();

        if self.stamina_costs.is_empty() {
            self.drive_regen_gate(scheduler);
        } else {
            // Host мог записать costs напрямую в обход add_stamina_cost
            if let RegenGate::PendingRegenDelay(token) = self.regen {
                scheduler.cancel(token);
            }
            self.regen = RegenGate::Draining;
            self.consume_stamina_costs();
        }

        self.stamina.clamp();
    }

    fn drive_regen_gate(&mut self, scheduler: &mut impl Scheduler) {
        if self.stamina.is_full() {
            return;
        }

        match self.regen {
            RegenGate::Draining => {
                let token = scheduler.schedule_once(self.config.regen_delay, DelayedAction::RegenDelayElapsed);
                self.regen = RegenGate::PendingRegenDelay(token);
            }
            RegenGate::PendingRegenDelay(_) => {}
            RegenGate::Regenerating => self.stamina.regenerate(),
        }
    }

    fn consume_stamina_costs(&mut self) {
        let mut index = 0;
        while index < self.stamina_costs.len() {
            if self.stamina.is_empty() {
                return;
            }

            match self.stamina_costs[index] {
                StaminaCost::Sprint => {
                    self.stamina.drain(self.config.sprint_cost);
                    index += 1;
                }
                StaminaCost::Dodge => {
                    self.stamina.drain(self.config.dodge_cost);
                    self.stamina_costs.remove(index);
                    break;
                }
            }
        }
    }

    /// Срабатывание regen delay
    ///
    /// Устаревший token (трата была добавлена во время ожидания) игнорируется.
    pub fn trigger_stamina_regen(&mut self, token: TimerToken) {
        if self.regen != RegenGate::PendingRegenDelay(token) {
            return;
        }

        if self.stamina_costs.is_empty() {
            self.regen = RegenGate::Regenerating;
            logger::log(&format!(
                "Stamina regen started ({:.1}/{:.1})",
                self.stamina.current, self.stamina.max
            ));
        } else {
            self.regen = RegenGate::Draining;
        }
    }

    pub fn apply_damage(
        &mut self,
        amount: f32,
        poise_damage: f32,
        scheduler: &mut impl Scheduler,
    ) -> DamageOutcome {
        if self.defeated {
            return DamageOutcome::Ignored(IgnoreReason::Defeated);
        }
        if self.dodging {
            return DamageOutcome::Ignored(IgnoreReason::Dodging);
        }
        if !amount.is_finite() || !poise_damage.is_finite() {
            logger::log_warning(&format!("Damage ignored: invalid input ({}, {})", amount, poise_damage));
            return DamageOutcome::Ignored(IgnoreReason::InvalidInput);
        }

        if self.health.is_lethal(amount) {
            self.health.current = 0.0;
            self.defeated = true;
            logger::log_info(&format!("Character defeated ({:.1} damage)", amount));
            return DamageOutcome::Defeated;
        }

        self.health.take_damage(amount);
        self.poise.accumulate(poise_damage);

        let flinch_started = self.poise.is_broken() && self.start_flinching(scheduler);
        DamageOutcome::Applied { flinch_started }
    }

    /// Урон с толчком. Импульс применяется только если урон прошёл и не был летальным.
    pub fn apply_damage_with_force(
        &mut self,
        amount: f32,
        poise_damage: f32,
        push_direction: Vec3,
        push_force: f32,
        scheduler: &mut impl Scheduler,
        body: &mut impl ImpulseSink,
    ) -> DamageOutcome {
        let outcome = self.apply_damage(amount, poise_damage, scheduler);
        if let DamageOutcome::Applied { .. } = outcome {
            body.apply_impulse(push_direction, push_force);
        }
        outcome
    }

    /// Начать flinch. `false` если flinch уже идёт.
    pub fn start_flinching(&mut self, scheduler: &mut impl Scheduler) -> bool {
        if !self.can_flinch {
            return false;
        }

        self.can_flinch = false;
        self.flinching = true;
        scheduler.schedule_once(self.config.flinch_duration, DelayedAction::FlinchFinished);

        logger::log(&format!("Flinch started (poise {:.1}/{:.1})", self.poise.current, self.poise.max));
        true
    }

    pub fn stop_flinching(&mut self) {
        self.flinching = false;
        self.can_flinch = true;
        self.poise.reset();
        logger::log("Flinch finished");
    }
}
