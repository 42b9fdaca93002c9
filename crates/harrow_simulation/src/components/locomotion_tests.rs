//! Tests for PlayerLocomotion (flinch sync, movement lock, sprint/dodge).

use bevy::prelude::Vec2;

use super::locomotion::{FlinchEdge, PlayerAction, PlayerLocomotion};
use super::status::{CharacterStatus, StaminaCost};
use crate::config::LocomotionConfig;
use crate::scheduler::{DelayTimers, DelayedAction};

struct Rig {
    locomotion: PlayerLocomotion,
    status: CharacterStatus,
    timers: DelayTimers,
}

impl Rig {
    fn new() -> Self {
        Self {
            locomotion: PlayerLocomotion::default(),
            status: CharacterStatus::default(),
            timers: DelayTimers::new(),
        }
    }

    fn advance(&mut self, delta: f32) {
        for fired in self.timers.advance(delta) {
            match fired.action {
                DelayedAction::RegenDelayElapsed => self.status.trigger_stamina_regen(fired.token),
                DelayedAction::FlinchFinished => self.status.stop_flinching(),
                DelayedAction::SprintStopElapsed => self.locomotion.finish_sprint_stop(fired.token, &mut self.status),
                DelayedAction::DodgeFinished => self.locomotion.finish_dodge(fired.token, &mut self.status),
            }
        }
    }

    fn held(&mut self, elapsed: f32) {
        self.locomotion.dodge_held(elapsed, &mut self.status, &mut self.timers);
    }

    fn released(&mut self, elapsed: f32) -> bool {
        self.locomotion.dodge_released(elapsed, &mut self.status, &mut self.timers)
    }

    fn sprint_costs(&self) -> usize {
        self.status
            .stamina_costs
            .iter()
            .filter(|cost| **cost == StaminaCost::Sprint)
            .count()
    }
}

#[test]
fn test_short_release_grants_dodge() {
    let mut rig = Rig::new();
    rig.status.stamina.current = 20.0;

    assert!(rig.released(0.3));
}

#[test]
fn test_short_release_without_stamina_denied() {
    let mut rig = Rig::new();
    rig.status.stamina.current = 10.0;

    assert!(!rig.released(0.3));
}

#[test]
fn test_dodge_denied_when_not_permitted_or_held_long() {
    let mut rig = Rig::new();
    rig.locomotion.can_dodge = false;
    assert!(!rig.released(0.1));

    rig.locomotion.can_dodge = true;
    assert!(!rig.released(0.5));
}

#[test]
fn test_dodge_denied_while_flinching() {
    let mut rig = Rig::new();
    rig.status.flinching = true;
    rig.locomotion.sync_flinch(&rig.status);

    assert!(!rig.released(0.1));
}

#[test]
fn test_hold_enters_sprint_once() {
    let mut rig = Rig::new();

    rig.held(0.2);
    assert!(!rig.locomotion.is_sprinting());

    rig.held(0.5);
    rig.held(0.6);
    rig.held(0.7);

    assert!(rig.locomotion.is_sprinting());
    assert_eq!(rig.locomotion.move_speed.current, 900.0);
    assert_eq!(rig.sprint_costs(), 1);
    assert!(rig.locomotion.has_action(PlayerAction::Sprint));
    assert!(rig.locomotion.accepts_movement());
}

#[test]
fn test_hold_without_stamina_stops_sprint() {
    let mut rig = Rig::new();
    rig.held(0.5);
    assert!(rig.locomotion.is_sprinting());

    rig.status.stamina.current = 0.0;
    rig.held(0.6);

    assert!(!rig.locomotion.is_sprinting());
    assert_eq!(rig.locomotion.move_speed.current, 600.0);
}

#[test]
fn test_release_restores_speed_now_and_cost_later() {
    let mut rig = Rig::new();
    rig.held(0.8);

    assert!(!rig.released(0.9));
    assert!(!rig.locomotion.is_sprinting());
    assert_eq!(rig.locomotion.move_speed.current, 600.0);
    assert_eq!(rig.sprint_costs(), 1);

    rig.advance(0.2);
    assert_eq!(rig.sprint_costs(), 1);

    rig.advance(0.15);
    assert_eq!(rig.sprint_costs(), 0);
}

#[test]
fn test_restart_sprint_within_stop_delay_keeps_single_cost() {
    let mut rig = Rig::new();
    rig.held(0.6);
    rig.released(0.7);
    rig.advance(0.1);

    rig.held(0.6);
    assert_eq!(rig.sprint_costs(), 1);
    assert_eq!(rig.timers.pending_of(DelayedAction::SprintStopElapsed), 0);

    // Старый stop не снимает новый sprint
    rig.advance(1.0);
    assert!(rig.locomotion.is_sprinting());
    assert_eq!(rig.sprint_costs(), 1);
}

#[test]
fn test_restore_uses_configured_base_speed() {
    let config = LocomotionConfig {
        base_move_speed: 450.0,
        sprint_modifier: 2.0,
        ..Default::default()
    };
    let mut rig = Rig::new();
    rig.locomotion = PlayerLocomotion::from_config(&config);

    rig.held(0.5);
    assert_eq!(rig.locomotion.move_speed.current, 900.0);
    rig.released(0.6);
    assert_eq!(rig.locomotion.move_speed.current, 450.0);

    rig.status.flinching = true;
    rig.locomotion.sync_flinch(&rig.status);
    rig.status.flinching = false;
    rig.locomotion.sync_flinch(&rig.status);
    assert_eq!(rig.locomotion.move_speed.current, 450.0);
}

#[test]
fn test_flinch_edges() {
    let mut rig = Rig::new();

    assert_eq!(rig.locomotion.sync_flinch(&rig.status), None);

    rig.status.flinching = true;
    assert_eq!(rig.locomotion.sync_flinch(&rig.status), Some(FlinchEdge::Started));
    assert_eq!(rig.locomotion.sync_flinch(&rig.status), None);
    assert!(rig.locomotion.has_action(PlayerAction::Flinch));
    assert_eq!(rig.locomotion.move_speed.current, 100.0);
    assert!(!rig.locomotion.accepts_movement());
    assert_eq!(rig.locomotion.movement_input(1.0, 0.0), None);

    rig.status.flinching = false;
    assert_eq!(rig.locomotion.sync_flinch(&rig.status), Some(FlinchEdge::Ended));
    assert!(!rig.locomotion.has_action(PlayerAction::Flinch));
    assert_eq!(rig.locomotion.move_speed.current, 600.0);
    assert_eq!(rig.locomotion.movement_input(1.0, -0.5), Some(Vec2::new(1.0, -0.5)));
}

#[test]
fn test_sprint_cancelled_while_flinching() {
    let mut rig = Rig::new();
    rig.held(0.5);
    assert_eq!(rig.sprint_costs(), 1);

    rig.status.flinching = true;
    rig.locomotion.sync_flinch(&rig.status);
    rig.held(0.6);

    assert!(!rig.locomotion.is_sprinting());
    assert_eq!(rig.sprint_costs(), 0);
    assert_eq!(rig.locomotion.move_speed.current, 100.0);

    // После flinch удержание снова запускает sprint
    rig.status.flinching = false;
    rig.locomotion.sync_flinch(&rig.status);
    rig.held(0.7);
    assert!(rig.locomotion.is_sprinting());
    assert_eq!(rig.locomotion.move_speed.current, 900.0);
}

#[test]
fn test_sprint_surviving_flinch_resumes_sprint_speed() {
    let mut rig = Rig::new();
    rig.held(0.5);

    // Flinch без DodgeHeld между фронтами
    rig.status.flinching = true;
    rig.locomotion.sync_flinch(&rig.status);
    assert_eq!(rig.locomotion.move_speed.current, 100.0);

    rig.status.flinching = false;
    rig.locomotion.sync_flinch(&rig.status);

    assert!(rig.locomotion.is_sprinting());
    assert_eq!(rig.sprint_costs(), 1);
    assert_eq!(rig.locomotion.move_speed.current, 900.0);
}

#[test]
fn test_dodge_locks_movement_and_grants_immunity() {
    let mut rig = Rig::new();
    assert!(rig.released(0.2));
    assert!(rig.locomotion.begin_dodge(&mut rig.status, &mut rig.timers));
    assert!(!rig.locomotion.begin_dodge(&mut rig.status, &mut rig.timers));

    assert!(rig.status.dodging);
    assert!(rig.locomotion.has_action(PlayerAction::Dodge));
    assert_eq!(rig.locomotion.movement_input(0.0, 1.0), None);
    assert_eq!(rig.status.stamina_costs, vec![StaminaCost::Dodge]);

    rig.status.stamina_tick(&mut rig.timers);
    assert_eq!(rig.status.stamina.current, 85.0);

    rig.advance(0.5);
    assert!(!rig.status.dodging);
    assert!(rig.locomotion.accepts_movement());
}

#[test]
fn test_look_input_scaled_by_sensitivity() {
    let rig = Rig::new();
    let look = rig.locomotion.look_input(2.0, 2.0);

    assert_eq!(look.yaw, 2.0);
    assert_eq!(look.pitch, 1.0);
}
