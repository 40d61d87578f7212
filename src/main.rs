//! Headless runner: loads a level and ticks it at a fixed frame rate.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bevy::prelude::{App, MinimalPlugins};
use clap::Parser;
use frontier::level::{ObstaclePlacement, SpawnPoint};
use frontier::{
    init_logging, AssetCatalog, DrawList, LevelDescription, Simulation, SimulationClock,
    SimulationPlugin, TickInput,
};
use glam::Vec2;
use log::info;

/// Run a level without a window
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level description in JSON; a small built-in arena when omitted
    #[arg(short, long)]
    level: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,
    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,
    /// Hold the fire button on every frame
    #[arg(long)]
    autofire: bool,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn arena() -> LevelDescription {
    let spawn = |tag: &str, x, y| SpawnPoint {
        tag: tag.to_owned(),
        x,
        y,
    };
    let fence = |x, y| ObstaclePlacement {
        x,
        y,
        sprite: None,
        width: 64,
        height: 64,
    };
    LevelDescription {
        obstacles: (0..8).map(|i| fence(i * 64, -200)).collect(),
        spawns: vec![
            spawn("Player", 256, 0),
            spawn("Coffin", 256, 350),
            spawn("Cactus", 700, 0),
        ],
        ..LevelDescription::default()
    }
}

fn load_level(path: Option<&PathBuf>) -> Result<LevelDescription> {
    let Some(path) = path else {
        return Ok(arena());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading level {}", path.display()))?;
    LevelDescription::from_json(&text).with_context(|| format!("parsing level {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let level = load_level(args.level.as_ref())?;
    let simulation = Simulation::from_level(&level, AssetCatalog::placeholder((48, 64), 8))
        .context("building simulation")?;
    let frame = Duration::from_secs(1) / args.fps;

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, SimulationPlugin))
        .insert_resource(SimulationClock::fixed(frame))
        .insert_resource(TickInput {
            direction: Vec2::ZERO,
            fire: args.autofire,
        })
        .insert_resource(simulation);

    info!("running {} frames at {} fps", args.frames, args.fps);
    for _ in 0..args.frames {
        let started = Instant::now();
        app.update();
        if !app.world().resource::<Simulation>().outcome().is_running() {
            break;
        }
        thread::sleep(frame.saturating_sub(started.elapsed()));
    }

    let world = app.world();
    let simulation = world.resource::<Simulation>();
    info!(
        "finished after {} ticks: {:?}, player health {}, {} enemies left, {} draw commands",
        simulation.ticks(),
        simulation.outcome(),
        simulation.player().vitality().health(),
        simulation.enemies().count(),
        world.resource::<DrawList>().commands.len()
    );
    Ok(())
}
