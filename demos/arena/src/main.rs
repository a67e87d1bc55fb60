//! arena: a small corridor arena for the wob navigation core.
//!
//! Spawns a handful of agents on a waypoint lattice, lets them wander
//! between sampled targets, and records every decision, tick summary and
//! near-plane clip to CSV.
//!
//! ```text
//! arena [--config arena.toml] [--seed N] [--ticks N | --secs S] [--out DIR]
//!       [--behaviour NAME] [--bug NAME]... [--teleport x,y,z] [-v]
//! ```

mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use wob_agent::AgentStoreBuilder;
use wob_core::{AgentId, Vec3};
use wob_nav::NavSurface;
use wob_output::{CsvWriter, SimOutputObserver};
use wob_sim::{BugKind, ConfigCommand, SimBuilder};

use config::ArenaConfig;

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Run agents over a corridor navigation mesh", version)]
struct Cli {
    /// Arena description (TOML).  Built-in arena if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of ticks
    #[arg(long, conflicts_with = "secs")]
    ticks: Option<u64>,

    /// Run for this many simulated seconds instead of a tick count
    #[arg(long)]
    secs: Option<f32>,

    /// Output directory for CSV files
    #[arg(short, long, default_value = "output/arena")]
    out: PathBuf,

    /// Behaviour to select over the config channel
    #[arg(short, long)]
    behaviour: Option<String>,

    /// Enable a bug (repeatable)
    #[arg(long = "bug")]
    bugs: Vec<BugKind>,

    /// Teleport agent 0 to "x,y,z" before the first tick
    #[arg(long)]
    teleport: Option<Vec3>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    fmt().with_env_filter(filter).with_target(false).init();

    // 1. Arena description, with CLI overrides.
    let mut arena = match &cli.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    if let Some(seed) = cli.seed {
        arena.sim.seed = seed;
    }
    if let Some(ticks) = cli.ticks {
        arena.sim.total_ticks = ticks;
    }
    if let Some(secs) = cli.secs {
        arena.sim.total_ticks = arena.sim.make_clock().ticks_for_secs(secs);
    }
    if let Some(name) = &cli.behaviour {
        arena.behaviour = name.clone();
    }
    arena.bugs.extend(cli.bugs.iter().copied());

    // 2. Mesh, agents, clip watcher.
    let mesh = NavSurface::new(arena.mesh_builder()?);
    let (store, rngs) = AgentStoreBuilder::new(arena.sim.seed)
        .spawn_all(arena.agents.iter().map(|a| a.spec()))
        .build();
    info!(
        nodes = mesh.baked().node_count(),
        links = mesh.baked().link_count(),
        agents = store.count,
        "arena ready"
    );

    // 3. Sim.  Behaviour and bugs go through the config channel like any
    //    other environment message.
    let mut sim = SimBuilder::new(arena.sim.clone(), store, rngs, mesh)
        .nav_config(arena.nav.clone())
        .watcher(arena.watcher())
        .build()?;
    sim.queue_command(ConfigCommand::SelectBehavior(arena.behaviour.clone()))?;
    for &bug in &arena.bugs {
        sim.queue_command(ConfigCommand::SetBug { bug, enabled: true })?;
    }
    if let Some(position) = cli.teleport {
        let forward = sim.agents.forward.first().copied().unwrap_or(Vec3::FORWARD);
        sim.teleport(AgentId(0), position, forward).context("teleporting agent 0")?;
    }

    // 4. Output.
    let writer = CsvWriter::new(&cli.out)?;
    let mut obs = SimOutputObserver::new(writer, &arena.sim);

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!();
    println!(
        "Simulated {:.1} s ({} ticks) in {:.3} s; output in {}",
        sim.now_secs(),
        sim.clock.current_tick.0,
        elapsed.as_secs_f64(),
        cli.out.display()
    );
    println!();
    println!(
        "{:<6} {:>8} {:>8} {:>8} {:>7} {:>9} {:>9} {:>9}",
        "Agent", "x", "z", "yaw", "goals", "failures", "overrides", "clipping"
    );
    println!("{}", "-".repeat(72));
    for agent in sim.agents.agent_ids() {
        let i = agent.index();
        let pose = sim.agents.pose(agent);
        let tracker = sim.trackers.get(agent);
        println!(
            "{:<6} {:>8.2} {:>8.2} {:>8.1} {:>7} {:>9} {:>9} {:>9}",
            i,
            pose.position.x,
            pose.position.z,
            pose.yaw_deg(),
            tracker.resamples,
            tracker.sampling_failures,
            sim.gates[i].overrides,
            if sim.watcher.colliding.get(i).copied().unwrap_or(false) { "yes" } else { "no" },
        );
    }

    Ok(())
}
