//! Headless симуляция Harrow
//!
//! Игрок спринтит, уворачивается и получает удары от scripted атакующего
//! (seeded RNG). Первый аргумент — необязательный путь к TOML config.

use bevy::prelude::*;
use rand::Rng;

use harrow_simulation::{
    create_headless_app, log_info, spawn_character, CharacterDefeated, CharacterStatus, ConfigError, DamageRequest,
    DeterministicRng, InputKind, LocomotionInput, PlayerLocomotion, SimulationConfig, DEFAULT_STEP,
};

const TICKS: u32 = 1200;

fn main() -> Result<(), ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    let seed = 42;
    println!("Starting Harrow headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed, config);
    let player = spawn_character(app.world_mut());
    let step = DEFAULT_STEP.as_secs_f32();

    for tick in 0..TICKS {
        script_player_input(&mut app, player, tick, step);
        script_attacker(&mut app, player);

        app.update();

        let defeated = !app.world().resource::<Events<CharacterDefeated>>().is_empty();
        if tick % 60 == 0 || defeated {
            print_status(&app, player, tick);
        }
        if defeated {
            log_info("Player defeated, stopping simulation");
            break;
        }
    }

    println!("Simulation complete!");
    Ok(())
}

/// Цикл 4 секунды: бег, sprint (удержание 2с), пауза, короткий dodge
fn script_player_input(app: &mut App, player: Entity, tick: u32, step: f32) {
    let phase = tick % 240;
    let mut send = |kind| {
        app.world_mut().send_event(LocomotionInput { entity: player, kind });
    };

    send(InputKind::Move { x: 0.0, y: 1.0 });

    match phase {
        60..=179 => send(InputKind::DodgeHeld { elapsed: (phase - 60) as f32 * step }),
        180 => send(InputKind::DodgeReleased { elapsed: 120.0 * step }),
        220 => send(InputKind::DodgeReleased { elapsed: 0.1 }),
        _ => {}
    }
}

/// Атакующий бьёт примерно раз в секунду, иногда с толчком
fn script_attacker(app: &mut App, player: Entity) {
    let request = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        if rng.rng.gen_range(0..60) != 0 {
            return;
        }

        let amount = rng.rng.gen_range(4.0..12.0);
        let poise = rng.rng.gen_range(10.0..30.0);
        let request = DamageRequest::new(player, amount, poise);
        if rng.rng.gen_bool(0.3) {
            request.with_push(Vec3::new(0.0, 0.0, -1.0), 250.0)
        } else {
            request
        }
    };

    app.world_mut().send_event(request);
}

fn print_status(app: &App, player: Entity, tick: u32) {
    let world = app.world();
    let (Some(status), Some(locomotion)) = (
        world.get::<CharacterStatus>(player),
        world.get::<PlayerLocomotion>(player),
    ) else {
        return;
    };

    println!(
        "Tick {}: health {:.1}/{:.1}, stamina {:.1}/{:.1}, poise {:.1}, speed {:.0}, actions {:?}",
        tick,
        status.health.current,
        status.health.max,
        status.stamina.current,
        status.stamina.max,
        status.poise.current,
        locomotion.move_speed.current,
        locomotion.actions,
    );
}
