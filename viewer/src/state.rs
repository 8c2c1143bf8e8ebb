//! Handles the state for the viewer.

use loader::Scenario;
use simulator::bodies::Orbiter;
use simulator::projection::RenderConfig;
use simulator::render::{frame_times, render_frame};
use simulator::time::format_elapsed;
use simulator::SolarSystem;

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// The solar system and how to draw it.
pub struct State {
    solar_system: SolarSystem,
    render: RenderConfig,
    /// Print where everything ended up after the frames
    show_positions: bool,
}

impl State {
    pub fn new(scenario: Scenario, show_positions: bool) -> Result<Self> {
        let solar_system = SolarSystem::new(scenario.orbiters, scenario.simulation)
            .context("couldn't set up the solar system")?;
        Ok(State {
            solar_system,
            render: scenario.render,
            show_positions,
        })
    }

    pub fn duration(&self) -> f64 {
        self.solar_system.config().duration()
    }

    /// Simulate `duration` seconds from the start and print a frame every render step.
    pub fn run(&mut self, duration: f64, out: &mut impl Write) -> Result<()> {
        let config = *self.solar_system.config();
        if config.log_capacity(duration) > self.solar_system.log().capacity() {
            // The log is sized up front, so a longer run needs a bigger one
            tracing::debug!(duration, "growing history log");
            self.solar_system.reconfigure(config.with_duration(duration)?);
        }

        let log = self.solar_system.simulate(duration)?;
        for t in frame_times(log, self.render.render_step()) {
            writeln!(out, "\n{}", format_elapsed(t))?;
            match render_frame(log, t, &self.render) {
                Some(frame) => write!(out, "{}", frame)?,
                None => tracing::warn!(time = t, "no sample to draw"),
            }
        }

        if self.show_positions {
            writeln!(out)?;
            for oer in self.solar_system.orbiters() {
                write_position(out, oer)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn write_position(out: &mut impl Write, oer: &Orbiter) -> Result<()> {
    let pos = oer.pos();
    writeln!(out, "{}: x = {:e} m, y = {:e} m, z = {:e} m", oer.symbol(), pos.x, pos.y, pos.z)?;
    Ok(())
}

/// Ask for another duration. `None` means stop.
pub fn prompt_duration(input: &mut impl BufRead, out: &mut impl Write) -> Result<Option<f64>> {
    loop {
        write!(out, "\nSeconds to simulate (blank or q to quit): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => return Ok(Some(seconds)),
            _ => writeln!(out, "{:?} isn't a number of seconds", line)?,
        }
    }
}
