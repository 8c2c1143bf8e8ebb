//! Immutable simulation settings.
//! Change them with the `with_*` functions, which hand back a new config.

use crate::error::{Result, SimulationError};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Seconds advanced per integration step.
    delta_time: f64,
    /// Seconds between samples written to the history log.
    log_step: f64,
    /// Seconds to simulate.
    duration: f64,
}

impl SimulationConfig {
    /// Validate and build a config.
    /// A `log_step` shorter than `delta_time` is clamped up to `delta_time`.
    pub fn new(delta_time: f64, log_step: f64, duration: f64) -> Result<Self> {
        if !delta_time.is_finite() || delta_time <= 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "delta_time must be positive, got {}",
                delta_time
            )));
        }
        check_duration(duration)?;
        if log_step.is_nan() || log_step.is_infinite() {
            return Err(SimulationError::InvalidConfig(format!(
                "log_step must be finite, got {}",
                log_step
            )));
        }
        let log_step = if log_step < delta_time {
            tracing::warn!(log_step, delta_time, "log_step shorter than delta_time, clamping");
            delta_time
        } else {
            log_step
        };

        Ok(Self {
            delta_time,
            log_step,
            duration,
        })
    }

    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    pub fn log_step(&self) -> f64 {
        self.log_step
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn with_duration(self, duration: f64) -> Result<Self> {
        Self::new(self.delta_time, self.log_step, duration)
    }

    pub fn with_delta_time(self, delta_time: f64) -> Result<Self> {
        Self::new(delta_time, self.log_step, self.duration)
    }

    pub fn with_log_step(self, log_step: f64) -> Result<Self> {
        Self::new(self.delta_time, log_step, self.duration)
    }

    /// Number of integration steps needed to cover `duration`, counting t = 0.
    pub fn step_count(&self, duration: f64) -> u64 {
        (duration / self.delta_time).floor() as u64 + 1
    }

    /// How many samples a log needs to hold `duration` seconds.
    pub fn log_capacity(&self, duration: f64) -> usize {
        (duration / self.log_step).ceil() as usize + 1
    }

    /// Which log sample, if any, step number `step` lands on.
    ///
    /// Sample `k` is taken on the step nearest to `k * log_step`, so a `log_step`
    /// that isn't a whole number of `delta_time`s still gets one sample per multiple.
    pub fn sample_index(&self, step: u64) -> Option<usize> {
        let k = (step as f64 * self.delta_time / self.log_step).round();
        let aligned = (k * self.log_step / self.delta_time).round();
        if aligned as u64 == step {
            Some(k as usize)
        } else {
            None
        }
    }
}

/// Durations must be non-negative and finite.
pub(crate) fn check_duration(duration: f64) -> Result<()> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(SimulationError::InvalidConfig(format!(
            "duration must be zero or positive, got {}",
            duration
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_delta_time() {
        assert!(SimulationConfig::new(0.0, 1.0, 10.0).is_err());
        assert!(SimulationConfig::new(-1.0, 1.0, 10.0).is_err());
        assert!(SimulationConfig::new(f64::NAN, 1.0, 10.0).is_err());
    }

    #[test]
    fn rejects_negative_duration() {
        assert!(SimulationConfig::new(1.0, 1.0, -0.5).is_err());
        let ok = SimulationConfig::new(1.0, 1.0, 0.0).unwrap();
        assert!(ok.with_duration(-1.0).is_err());
    }

    #[test]
    fn clamps_short_log_step() {
        let cfg = SimulationConfig::new(60.0, 10.0, 600.0).unwrap();
        assert_eq!(cfg.log_step(), 60.0);
    }

    #[test]
    fn settings_updates_return_new_config() {
        let cfg = SimulationConfig::new(60.0, 3600.0, 86400.0).unwrap();
        let longer = cfg.with_duration(2.0 * 86400.0).unwrap();
        assert_eq!(cfg.duration(), 86400.0);
        assert_eq!(longer.duration(), 172800.0);
        assert_eq!(longer.delta_time(), 60.0);
    }

    #[test]
    fn counts() {
        let cfg = SimulationConfig::new(60.0, 3600.0, 86400.0).unwrap();
        assert_eq!(cfg.step_count(86400.0), 1441);
        assert_eq!(cfg.log_capacity(86400.0), 25);
        assert_eq!(cfg.log_capacity(86401.0), 26);
        assert_eq!(cfg.log_capacity(0.0), 1);
    }

    #[test]
    fn whole_multiple_sampling() {
        let cfg = SimulationConfig::new(60.0, 3600.0, 86400.0).unwrap();
        assert_eq!(cfg.sample_index(0), Some(0));
        assert_eq!(cfg.sample_index(59), None);
        assert_eq!(cfg.sample_index(60), Some(1));
        assert_eq!(cfg.sample_index(1440), Some(24));
    }

    #[test]
    fn fractional_multiple_sampling() {
        // 2.5 steps per sample: samples land on steps 0, 3 (2.5 rounds up), 5, 8, 10
        let cfg = SimulationConfig::new(1.0, 2.5, 10.0).unwrap();
        let hits: Vec<_> = (0..=10).filter_map(|s| cfg.sample_index(s)).collect();
        assert_eq!(hits, vec![0, 1, 2, 3, 4]);
        assert_eq!(cfg.sample_index(3), Some(1));
        assert_eq!(cfg.sample_index(8), Some(3));
    }
}
