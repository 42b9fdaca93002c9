//! PlayerLocomotion — скорость, action list, sprint/dodge протокол
//!
//! Locomotion не владеет CharacterStatus: оба компонента живут на одном
//! entity, status передаётся в методы явно.
//!
//! Кнопка dodge двойная:
//! - удержание ≥ `sprint_hold_threshold` → sprint
//! - короткое нажатие → dodge (если хватает stamina и dodge разрешён)

use bevy::prelude::*;

use crate::components::status::{CharacterStatus, StaminaCost};
use crate::config::LocomotionConfig;
use crate::logger;
use crate::scheduler::{DelayedAction, Scheduler, TimerToken};

/// Действия, которые гейтят input игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PlayerAction {
    Sprint,
    /// Блокирует movement input
    Dodge,
    /// Блокирует movement input
    Flinch,
}

impl PlayerAction {
    pub fn locks_movement(&self) -> bool {
        matches!(self, PlayerAction::Dodge | PlayerAction::Flinch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct MoveSpeed {
    pub current: f32,
    pub base: f32,
    pub sprint_modifier: f32,
}

impl MoveSpeed {
    pub fn new(base: f32, sprint_modifier: f32) -> Self {
        Self {
            current: base,
            base,
            sprint_modifier,
        }
    }

    pub fn sprint_speed(&self) -> f32 {
        self.base * self.sprint_modifier
    }

    pub fn restore_base(&mut self) {
        self.current = self.base;
    }
}

/// Переход флага flinch, замеченный `sync_flinch`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlinchEdge {
    Started,
    Ended,
}

/// Camera input после sensitivity (yaw, pitch)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct LookInput {
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerLocomotion {
    pub move_speed: MoveSpeed,
    pub actions: Vec<PlayerAction>,
    /// Внешний запрет на dodge (кат-сцены, скрипты)
    pub can_dodge: bool,
    pub config: LocomotionConfig,
    is_sprinting: bool,
    /// Последнее увиденное значение CharacterStatus::flinching
    flinch_observed: bool,
    pending_sprint_stop: Option<TimerToken>,
    pending_dodge: Option<TimerToken>,
}

impl Default for PlayerLocomotion {
    fn default() -> Self {
        Self::from_config(&LocomotionConfig::default())
    }
}

impl PlayerLocomotion {
    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self {
            move_speed: MoveSpeed::new(config.base_move_speed, config.sprint_modifier),
            actions: Vec::new(),
            can_dodge: true,
            config: *config,
            is_sprinting: false,
            flinch_observed: false,
            pending_sprint_stop: None,
            pending_dodge: None,
        }
    }

    pub fn is_sprinting(&self) -> bool {
        self.is_sprinting
    }

    pub fn flinch_observed(&self) -> bool {
        self.flinch_observed
    }

    pub fn has_action(&self, action: PlayerAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn remove_action(&mut self, action: PlayerAction) {
        self.actions.retain(|entry| *entry != action);
    }

    /// Синхронизация с `CharacterStatus::flinching` (вызывается каждый tick)
    ///
    /// Rising edge: Flinch в action list + замедление.
    /// Falling edge: Flinch убирается, скорость возвращается к base из config
    /// (или к sprint speed, если sprint пережил flinch).
    pub fn sync_flinch(&mut self, status: &CharacterStatus) -> Option<FlinchEdge> {
        match (status.flinching, self.flinch_observed) {
            (true, false) => {
                self.flinch_observed = true;
                self.actions.push(PlayerAction::Flinch);
                self.move_speed.current = self.config.flinch_move_speed;
                Some(FlinchEdge::Started)
            }
            (false, true) => {
                self.flinch_observed = false;
                if self.is_sprinting {
                    self.move_speed.current = self.move_speed.sprint_speed();
                } else {
                    self.move_speed.restore_base();
                }
                self.remove_action(PlayerAction::Flinch);
                Some(FlinchEdge::Ended)
            }
            _ => None,
        }
    }

    pub fn accepts_movement(&self) -> bool {
        !self.actions.iter().any(PlayerAction::locks_movement)
    }

    /// Movement input: `None` пока Dodge или Flinch в action list (обе оси)
    pub fn movement_input(&self, x: f32, y: f32) -> Option<Vec2> {
        if self.accepts_movement() {
            Some(Vec2::new(x, y))
        } else {
            None
        }
    }

    pub fn look_input(&self, x: f32, y: f32) -> LookInput {
        LookInput {
            yaw: x * self.config.horizontal_look_sensitivity,
            pitch: y * self.config.vertical_look_sensitivity,
        }
    }

    /// Кнопка dodge удерживается `elapsed` секунд
    pub fn dodge_held(&mut self, elapsed: f32, status: &mut CharacterStatus, scheduler: &mut impl Scheduler) {
        if elapsed < self.config.sprint_hold_threshold {
            return;
        }

        if status.stamina.current > 0.0 {
            self.start_sprinting(status, scheduler);
        } else {
            self.stop_sprinting(scheduler);
        }
    }

    /// Кнопка dodge отпущена. Возвращает решение "выполнить dodge".
    pub fn dodge_released(
        &mut self,
        elapsed: f32,
        status: &mut CharacterStatus,
        scheduler: &mut impl Scheduler,
    ) -> bool {
        self.stop_sprinting(scheduler);

        if self.has_action(PlayerAction::Flinch) {
            return false;
        }

        elapsed < self.config.sprint_hold_threshold
            && status.stamina.can_afford(status.config.dodge_cost)
            && self.can_dodge
    }

    pub fn start_sprinting(&mut self, status: &mut CharacterStatus, scheduler: &mut impl Scheduler) {
        // Во время flinch sprint отменяется, а не начинается
        if self.has_action(PlayerAction::Flinch) {
            self.is_sprinting = false;
            self.remove_action(PlayerAction::Sprint);
            status.remove_stamina_cost(StaminaCost::Sprint);
            return;
        }

        if self.is_sprinting {
            return;
        }

        // Незавершённый stop от прошлого sprint не должен снять новый cost
        if let Some(token) = self.pending_sprint_stop.take() {
            scheduler.cancel(token);
            status.remove_stamina_cost(StaminaCost::Sprint);
        }

        self.is_sprinting = true;
        self.move_speed.current = self.move_speed.sprint_speed();
        self.actions.push(PlayerAction::Sprint);
        status.add_stamina_cost(StaminaCost::Sprint, scheduler);
    }

    /// Скорость восстанавливается сразу, Sprint cost снимается через `sprint_stop_delay`
    pub fn stop_sprinting(&mut self, scheduler: &mut impl Scheduler) {
        if !self.is_sprinting {
            return;
        }

        self.is_sprinting = false;
        self.remove_action(PlayerAction::Sprint);
        if !self.has_action(PlayerAction::Flinch) {
            self.move_speed.restore_base();
        }

        let token = scheduler.schedule_once(self.config.sprint_stop_delay, DelayedAction::SprintStopElapsed);
        self.pending_sprint_stop = Some(token);
    }

    pub fn finish_sprint_stop(&mut self, token: TimerToken, status: &mut CharacterStatus) {
        if self.pending_sprint_stop != Some(token) {
            return;
        }

        self.pending_sprint_stop = None;
        status.remove_stamina_cost(StaminaCost::Sprint);
    }

    /// Выполнить разрешённый dodge: блок движения, неуязвимость, списание stamina
    pub fn begin_dodge(&mut self, status: &mut CharacterStatus, scheduler: &mut impl Scheduler) -> bool {
        if self.has_action(PlayerAction::Dodge) {
            return false;
        }

        self.actions.push(PlayerAction::Dodge);
        status.dodging = true;
        status.add_stamina_cost(StaminaCost::Dodge, scheduler);

        let token = scheduler.schedule_once(self.config.dodge_duration, DelayedAction::DodgeFinished);
        self.pending_dodge = Some(token);

        logger::log(&format!("Dodge started (stamina {:.1})", status.stamina.current));
        true
    }

    pub fn finish_dodge(&mut self, token: TimerToken, status: &mut CharacterStatus) {
        if self.pending_dodge != Some(token) {
            return;
        }

        self.pending_dodge = None;
        self.remove_action(PlayerAction::Dodge);
        status.dodging = false;
    }
}
