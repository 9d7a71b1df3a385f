//! catwalk headless runner.
//!
//! Loads the configuration and the room, spawns one cat per player and runs
//! the fixed-step tick schedule with input replayed from `--hold` spans,
//! logging every cat's state as it goes.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --hold D@0..30 --hold W@40 --hold Left@10..50
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) for animation and contact details.

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};

use catwalk::components::animation::Animation;
use catwalk::components::character::CharacterState;
use catwalk::components::mapposition::MapPosition;
use catwalk::components::rigidbody::RigidBody;
use catwalk::components::sprite::Sprite;
use catwalk::level::{reference_room, setup_level};
use catwalk::resources::gameconfig::GameConfig;
use catwalk::resources::inputscript::{HoldSpan, InputScript};
use catwalk::resources::tilemapstore::Tilemap;
use catwalk::schedule::{build_tick_schedule, register_observers, run_tick};

/// catwalk: platformer gameplay core, run headless.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// INI configuration file. Defaults are used if it does not exist.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Tilemap JSON to use as the room instead of the built-in one.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Number of ticks to run. Defaults to one second past the last held key.
    #[arg(long)]
    ticks: Option<u64>,

    /// Hold a key for a tick range, `KEY@START..END` (end exclusive) or
    /// `KEY@TICK`. Repeatable.
    #[arg(long = "hold", value_name = "SPAN")]
    holds: Vec<HoldSpan>,

    /// Number of cats, overriding the configuration.
    #[arg(long)]
    players: Option<usize>,

    /// Log every cat's state each N ticks (0 logs only the final state).
    #[arg(long, value_name = "N", default_value_t = 10)]
    report_every: u64,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    save_config: bool,
}

fn fail(message: String) -> ! {
    error!("{message}");
    std::process::exit(1);
}

fn report(world: &World, tick: u64, cats: &[Entity]) {
    for (index, cat) in cats.iter().enumerate() {
        let (Some(position), Some(body), Some(state), Some(anim), Some(sprite)) = (
            world.get::<MapPosition>(*cat),
            world.get::<RigidBody>(*cat),
            world.get::<CharacterState>(*cat),
            world.get::<Animation>(*cat),
            world.get::<Sprite>(*cat),
        ) else {
            continue;
        };
        info!(
            "tick {tick:>4} cat {}: pos=({:.1}, {:.1}) vel=({:.1}, {:.1}) busy={} facing={:?} anim={} frame={}",
            index + 1,
            position.pos.x,
            position.pos.y,
            body.velocity.x,
            body.velocity.y,
            state.busy,
            state.facing,
            anim.animation_key,
            sprite.frame
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if config.config_path.exists() {
        if let Err(e) = config.load_from_file() {
            fail(e);
        }
    } else {
        info!(
            "{} not found, using default configuration",
            config.config_path.display()
        );
    }
    if let Some(players) = cli.players {
        config.players = players;
    }
    if let Err(e) = config.validate() {
        fail(e);
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            fail(e);
        }
        return;
    }

    let room = match &cli.level {
        Some(path) => Tilemap::load_json_file(path),
        None => reference_room(),
    }
    .unwrap_or_else(|e| fail(e));

    let mut world = World::new();
    register_observers(&mut world);
    let cats = setup_level(&mut world, &config, room).unwrap_or_else(|e| fail(e));

    let script = InputScript::new(cli.holds);
    let ticks = cli
        .ticks
        .unwrap_or(script.last_tick().saturating_add(u64::from(config.tick_rate)));
    world.insert_resource(script);

    let mut tick_schedule = build_tick_schedule();
    if let Err(e) = tick_schedule.initialize(&mut world) {
        fail(format!("Failed to initialize schedule: {e}"));
    }

    info!(
        "running {ticks} ticks at {} Hz with {} cats",
        config.tick_rate,
        cats.len()
    );
    let dt = config.tick_seconds();
    for tick in 0..ticks {
        run_tick(&mut world, &mut tick_schedule, dt);
        if cli.report_every > 0 && tick % cli.report_every == 0 {
            report(&world, tick, &cats);
        }
    }
    report(&world, ticks.saturating_sub(1), &cats);
}
