//! Handles the simulation of the solar system

pub mod bodies;
pub mod config;
pub mod error;
pub mod forces;
pub mod history;
pub mod projection;
pub mod render;
pub mod time;

use crate::bodies::{Orbiter, Vec3};
use crate::config::{check_duration, SimulationConfig};
pub use crate::error::{Result, SimulationError};
pub use crate::forces::GRAV_CONSTANT;
use crate::history::HistoryLog;

pub struct SolarSystem {
    /// Where everything starts. Every run begins from a fresh copy of this.
    initial: Vec<Orbiter>,
    /// Where everything is now.
    orbiters: Vec<Orbiter>,
    /// Net force on each orbiter from the last step. Rebuilt from zero every step.
    forces: Vec<Vec3>,
    /// Saved states, every `log_step` seconds of simulated time.
    log: HistoryLog,
    config: SimulationConfig,
    steps_elapsed: u64,
}

impl SolarSystem {
    /// Set up a solar system whose log is big enough for `config.duration()`.
    pub fn new(orbiters: Vec<Orbiter>, config: SimulationConfig) -> Result<Self> {
        for (index, oer) in orbiters.iter().enumerate() {
            if let Some(reason) = oer.defect() {
                return Err(SimulationError::InvalidBody { index, reason });
            }
        }
        let log = HistoryLog::with_capacity(
            config.log_capacity(config.duration()),
            orbiters.len(),
            config.log_step(),
        );
        Ok(SolarSystem {
            forces: vec![Vec3::zero(); orbiters.len()],
            initial: orbiters.clone(),
            orbiters,
            log,
            config,
            steps_elapsed: 0,
        })
    }

    /// Swap in a new config and size a fresh, empty log for it.
    /// Bodies go back to where they started.
    pub fn reconfigure(&mut self, config: SimulationConfig) {
        self.config = config;
        self.log = HistoryLog::with_capacity(
            config.log_capacity(config.duration()),
            self.initial.len(),
            config.log_step(),
        );
        self.reset();
    }

    /// Put every orbiter back at its starting state and forget the log.
    pub fn reset(&mut self) {
        self.orbiters.copy_from_slice(&self.initial);
        for f in self.forces.iter_mut() {
            *f = Vec3::zero();
        }
        self.log.clear();
        self.steps_elapsed = 0;
    }

    /// Run from t = 0 for `duration` seconds and return the filled log.
    ///
    /// The log isn't grown to fit: asking for more time than it was sized for
    /// is a `LogCapacityExceeded` error before any stepping happens.
    #[tracing::instrument(skip(self), fields(bodies = self.orbiters.len()))]
    pub fn simulate(&mut self, duration: f64) -> Result<&HistoryLog> {
        check_duration(duration)?;
        self.reset();

        let required = self.config.log_capacity(duration);
        if required > self.log.capacity() {
            return Err(SimulationError::LogCapacityExceeded {
                required,
                capacity: self.log.capacity(),
            });
        }

        let steps = self.config.step_count(duration);
        tracing::info!(steps, samples = required, "simulating");
        for _ in 0..steps {
            self.step()?;
        }
        tracing::info!(samples = self.log.len(), "simulation finished");

        Ok(&self.log)
    }

    /// Advance one `delta_time`: save if it's time to, then apply gravity and integrate.
    pub fn step(&mut self) -> Result<()> {
        if let Some(index) = self.config.sample_index(self.steps_elapsed) {
            tracing::debug!(index, elapsed = self.elapsed(), "saving sample");
            self.log.write_sample(index, &self.orbiters)?;
        }

        forces::accumulate_forces(&self.orbiters, &mut self.forces)?;
        let dt = self.config.delta_time();
        for (oer, &force) in self.orbiters.iter_mut().zip(self.forces.iter()) {
            oer.integrate(force, dt);
        }

        self.steps_elapsed += 1;
        Ok(())
    }

    /// Seconds of simulated time so far.
    pub fn elapsed(&self) -> f64 {
        self.steps_elapsed as f64 * self.config.delta_time()
    }

    pub fn orbiters(&self) -> &[Orbiter] {
        &self.orbiters
    }

    pub fn initial(&self) -> &[Orbiter] {
        &self.initial
    }

    /// Net forces applied on the last step.
    pub fn forces(&self) -> &[Vec3] {
        &self.forces
    }

    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Hand the log over, dropping the system.
    pub fn into_parts(self) -> (Vec<Orbiter>, HistoryLog) {
        (self.orbiters, self.log)
    }
}

/// Simulate `orbiters` for `config.duration()` seconds in one go.
/// Returns the final states and the log.
pub fn simulate(orbiters: Vec<Orbiter>, config: SimulationConfig) -> Result<(Vec<Orbiter>, HistoryLog)> {
    let mut system = SolarSystem::new(orbiters, config)?;
    system.simulate(config.duration())?;
    Ok(system.into_parts())
}
