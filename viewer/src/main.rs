//! Simulates a scenario and prints what it looked like, one frame per render step.

mod state;
use state::State;

use anyhow::{Context, Result};
use clap::Parser;
use simulator::projection::Plane;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "viewer", about = "Gravity simulator with a console view")]
struct Args {
    /// JSON5 scenario file. Runs the Earth and Moon if left out.
    system: Option<PathBuf>,

    /// Which axes to look along: xy, yz or xz
    #[arg(long)]
    plane: Option<Plane>,

    #[arg(long)]
    zoom: Option<f64>,

    /// Seconds to simulate, instead of the scenario's own duration
    #[arg(long)]
    duration: Option<f64>,

    /// Simulated seconds between printed frames
    #[arg(long)]
    render_step: Option<f64>,

    /// Mark where bodies have been
    #[arg(long)]
    trajectory: bool,

    /// Print final positions after the frames
    #[arg(long)]
    positions: bool,

    /// Ask for another duration after each run
    #[arg(short, long)]
    interactive: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so the frames on stdout stay readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut scenario = match &args.system {
        Some(path) => loader::load_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => loader::prefabs::solar_systems::earth_moon_scenario()?,
    };

    // Command line settings win over the file's
    let mut render = scenario.render;
    if let Some(plane) = args.plane {
        render = render.with_plane(plane);
    }
    if let Some(zoom) = args.zoom {
        render = render.with_zoom(zoom)?;
    }
    if let Some(step) = args.render_step {
        render = render.with_render_step(step)?;
    }
    if args.trajectory {
        render = render.with_trajectory(true);
    }
    scenario.render = render;
    if let Some(duration) = args.duration {
        scenario.simulation = scenario.simulation.with_duration(duration)?;
    }

    let mut state = State::new(scenario, args.positions)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut duration = state.duration();
    let mut running = true;
    while running {
        state.run(duration, &mut out)?;
        running = false;
        if args.interactive {
            if let Some(next) = state::prompt_duration(&mut input, &mut out)? {
                duration = next;
                running = true;
            }
        }
    }
    out.flush()?;

    Ok(())
}
