//! One-shot отложенные переходы (regen delay, flinch, sprint stop, dodge)
//!
//! Вместо timer handles движка — injected `Scheduler`. `DelayTimers` —
//! детерминированная реализация с локальными часами: её же используют тесты
//! (fake clock) и ECS (компонент на entity персонажа).
//!
//! Отмена: `cancel(token)` или просто игнорирование устаревшего token
//! владельцем при срабатывании.

use bevy::prelude::*;

pub mod systems;


pub use systems::fire_delay_timers;

/// Идентификатор запланированного срабатывания
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Все отложенные переходы персонажа (закрытый набор)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DelayedAction {
    /// Пауза без трат stamina истекла → можно начинать регенерацию
    RegenDelayElapsed,
    /// Flinch закончился → poise сбрасывается
    FlinchFinished,
    /// Отложенное снятие Sprint cost после отпускания кнопки
    SprintStopElapsed,
    /// Окно уклонения закончилось
    DodgeFinished,
}

/// Сработавший timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiredTimer {
    pub token: TimerToken,
    pub action: DelayedAction,
}

pub trait Scheduler {
    /// Запланировать `action` через `delay` единиц времени
    fn schedule_once(&mut self, delay: f32, action: DelayedAction) -> TimerToken;

    /// Отменить срабатывание. `false` если token уже сработал или неизвестен.
    fn cancel(&mut self, token: TimerToken) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    token: TimerToken,
    due: f64,
    action: DelayedAction,
}

/// Очередь one-shot timers с локальными часами
///
/// Часы двигаются только через `advance()` — никакого real time.
/// Часы в f64: за долгую сессию f32 теряет точность до размера кадра.
#[derive(Component, Debug, Clone, Default)]
pub struct DelayTimers {
    now: f64,
    next_token: u64,
    pending: Vec<PendingTimer>,
}

impl DelayTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|timer| timer.token == token)
    }

    /// Сколько запланировано срабатываний данного типа
    pub fn pending_of(&self, action: DelayedAction) -> usize {
        self.pending.iter().filter(|timer| timer.action == action).count()
    }

    /// Сдвинуть часы на `delta` и забрать всё, что успело истечь
    ///
    /// Порядок: по deadline, при равенстве — по порядку планирования.
    pub fn advance(&mut self, delta: f32) -> Vec<FiredTimer> {
        self.now += f64::from(delta.max(0.0));

        let now = self.now;
        let mut fired: Vec<PendingTimer> = Vec::new();
        self.pending.retain(|timer| {
            if timer.due <= now {
                fired.push(*timer);
                false
            } else {
                true
            }
        });

        fired.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.token.cmp(&b.token)));
        fired
            .into_iter()
            .map(|timer| FiredTimer {
                token: timer.token,
                action: timer.action,
            })
            .collect()
    }
}

impl Scheduler for DelayTimers {
    fn schedule_once(&mut self, delay: f32, action: DelayedAction) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;

        self.pending.push(PendingTimer {
            token,
            due: self.now + f64::from(delay.max(0.0)),
            action,
        });

        token
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.token != token);
        self.pending.len() != before
    }
}
