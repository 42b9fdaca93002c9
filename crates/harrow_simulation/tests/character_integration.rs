//! Character integration test
//!
//! Полный SimulationPlugin в headless App: damage → flinch → locomotion,
//! stamina ticks по таймеру, defeat как терминальное событие.

use std::time::Duration;

use bevy::prelude::*;
use harrow_simulation::*;

const STEP: Duration = Duration::from_millis(50);

fn setup() -> (App, Entity) {
    let mut app = create_headless_app(42, SimulationConfig::default());
    let player = spawn_character(app.world_mut());
    (app, player)
}

/// Прогнать `seconds` симуляции шагами по 50ms
fn run_for(app: &mut App, seconds: f32) {
    let steps = (seconds / STEP.as_secs_f32()).round() as u32;
    for _ in 0..steps {
        step_simulation(app, STEP);
    }
}

fn status(app: &App, entity: Entity) -> CharacterStatus {
    app.world().get::<CharacterStatus>(entity).unwrap().clone()
}

fn locomotion(app: &App, entity: Entity) -> PlayerLocomotion {
    app.world().get::<PlayerLocomotion>(entity).unwrap().clone()
}

fn input(app: &mut App, entity: Entity, kind: InputKind) {
    app.world_mut().send_event(LocomotionInput { entity, kind });
}

#[test]
fn test_poise_break_flinches_and_locks_movement() {
    let (mut app, player) = setup();

    app.world_mut().send_event(DamageRequest::new(player, 10.0, 60.0));
    input(&mut app, player, InputKind::Move { x: 0.0, y: 1.0 });
    step_simulation(&mut app, STEP);

    let s = status(&app, player);
    assert_eq!(s.health.current, 90.0);
    assert!(s.flinching);

    let l = locomotion(&app, player);
    assert!(l.has_action(PlayerAction::Flinch));
    assert_eq!(l.move_speed.current, 100.0);

    let intent = *app.world().get::<MovementIntent>(player).unwrap();
    assert_eq!(intent.direction, Vec2::ZERO);

    // Flinch длится 0.2s, после — poise сброшен и движение разблокировано
    run_for(&mut app, 0.3);
    input(&mut app, player, InputKind::Move { x: 0.0, y: 1.0 });
    step_simulation(&mut app, STEP);

    let s = status(&app, player);
    assert!(!s.flinching);
    assert_eq!(s.poise.current, 0.0);

    let intent = *app.world().get::<MovementIntent>(player).unwrap();
    assert_eq!(intent.direction, Vec2::new(0.0, 1.0));
    assert_eq!(intent.speed, 600.0);
}

#[test]
fn test_sprint_drains_then_regen_after_delay() {
    let (mut app, player) = setup();

    // Держим кнопку 1 секунду: sprint с 0.5s
    for i in 0..20 {
        input(&mut app, player, InputKind::DodgeHeld { elapsed: i as f32 * 0.05 });
        step_simulation(&mut app, STEP);
    }
    assert!(locomotion(&app, player).is_sprinting());
    let drained = status(&app, player).stamina.current;
    assert!(drained < 100.0);

    input(&mut app, player, InputKind::DodgeReleased { elapsed: 1.0 });
    step_simulation(&mut app, STEP);
    assert_eq!(locomotion(&app, player).move_speed.current, 600.0);

    // Sprint cost ещё висит 0.3s, потом 2s regen delay — stamina не растёт
    run_for(&mut app, 1.5);
    let waiting = status(&app, player);
    assert!(waiting.stamina_costs.is_empty());
    assert!(waiting.stamina.current <= drained);
    assert_ne!(waiting.regen_gate(), RegenGate::Regenerating);

    run_for(&mut app, 2.0);
    let regenerating = status(&app, player);
    assert_eq!(regenerating.regen_gate(), RegenGate::Regenerating);
    assert!(regenerating.stamina.current > waiting.stamina.current);
    assert!(regenerating.stamina.current <= regenerating.stamina.max);
}

#[test]
fn test_dodge_grants_immunity_window() {
    let (mut app, player) = setup();

    input(&mut app, player, InputKind::DodgeReleased { elapsed: 0.1 });
    step_simulation(&mut app, STEP);
    assert!(status(&app, player).dodging);

    app.world_mut().send_event(DamageRequest::new(player, 30.0, 80.0));
    step_simulation(&mut app, STEP);

    let s = status(&app, player);
    assert!(s.dodging);
    assert_eq!(s.health.current, 100.0);
    assert_eq!(s.poise.current, 0.0);

    // Dodge cost списывается ближайшим stamina tick
    run_for(&mut app, 0.1);
    assert_eq!(status(&app, player).stamina.current, 85.0);

    // Окно dodge 0.4s
    run_for(&mut app, 0.5);
    assert!(!status(&app, player).dodging);

    app.world_mut().send_event(DamageRequest::new(player, 30.0, 0.0));
    step_simulation(&mut app, STEP);
    assert_eq!(status(&app, player).health.current, 70.0);
}

#[test]
fn test_push_accumulates_impulse() {
    let (mut app, player) = setup();

    app.world_mut()
        .send_event(DamageRequest::new(player, 5.0, 0.0).with_push(Vec3::X, 200.0));
    step_simulation(&mut app, STEP);

    let mut impulse = app.world_mut().get_mut::<PendingImpulse>(player).unwrap();
    assert_eq!(impulse.take(), Vec3::new(200.0, 0.0, 0.0));
}

#[test]
fn test_lethal_damage_defeats_character() {
    let (mut app, player) = setup();

    app.world_mut().send_event(DamageRequest::new(player, 150.0, 0.0));
    step_simulation(&mut app, STEP);

    let defeated: Vec<_> = app
        .world_mut()
        .resource_mut::<Events<CharacterDefeated>>()
        .drain()
        .collect();
    assert_eq!(defeated, vec![CharacterDefeated { entity: player }]);
    assert!(app.world().get::<Defeated>(player).is_some());

    let s = status(&app, player);
    assert!(s.defeated);
    assert_eq!(s.health.current, 0.0);

    // Побеждённый персонаж больше не двигается
    input(&mut app, player, InputKind::Move { x: 1.0, y: 0.0 });
    step_simulation(&mut app, STEP);
    let intent = *app.world().get::<MovementIntent>(player).unwrap();
    assert_eq!(intent.direction, Vec2::ZERO);
}

#[test]
fn test_stamina_invariant_under_mixed_input() {
    let (mut app, player) = setup();

    for tick in 0..400u32 {
        match tick % 40 {
            0..=19 => input(&mut app, player, InputKind::DodgeHeld { elapsed: tick as f32 * 0.05 % 1.0 }),
            20 => input(&mut app, player, InputKind::DodgeReleased { elapsed: 0.1 }),
            _ => {}
        }
        if tick % 25 == 0 {
            app.world_mut().send_event(DamageRequest::new(player, 1.0, 20.0));
        }
        step_simulation(&mut app, STEP);

        let s = status(&app, player);
        assert!(s.stamina.current >= 0.0 && s.stamina.current <= s.stamina.max, "tick {}", tick);
        assert!(s.health.current >= 0.0 && s.health.current <= s.health.max, "tick {}", tick);
        assert!(s.poise.current >= 0.0, "tick {}", tick);
    }
}
