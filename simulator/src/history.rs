//! The history log: snapshots of every orbiter, taken every `log_step` seconds.
//!
//! Samples are stored back to back in one flat buffer, `body_count` orbiters per
//! sample, so sample `k` lives at `k * body_count .. (k + 1) * body_count`.

use crate::bodies::Orbiter;
use crate::error::{Result, SimulationError};

/// How far off a multiple of `log_step` a time may be and still count as on it,
/// relative to `log_step`.
const ALIGNMENT_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryLog {
    entries: Vec<Orbiter>,
    body_count: usize,
    /// Samples written so far. Kept apart from `entries` so a log of zero bodies still counts.
    written: usize,
    /// Maximum number of samples this log may ever hold.
    capacity: usize,
    log_step: f64,
}

impl HistoryLog {
    pub fn with_capacity(capacity: usize, body_count: usize, log_step: f64) -> Self {
        Self {
            entries: Vec::with_capacity(capacity * body_count),
            body_count,
            written: 0,
            capacity,
            log_step,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn body_count(&self) -> usize {
        self.body_count
    }

    pub fn log_step(&self) -> f64 {
        self.log_step
    }

    /// Number of samples written so far.
    pub fn len(&self) -> usize {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Forget every sample. Capacity is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.written = 0;
    }

    /// Elapsed time of the newest sample.
    pub fn latest_time(&self) -> Option<f64> {
        self.len().checked_sub(1).map(|k| self.time_of(k))
    }

    /// Elapsed time sample `index` represents.
    pub fn time_of(&self, index: usize) -> f64 {
        index as f64 * self.log_step
    }

    /// Store `bodies` as the sample for elapsed `time`, if `time` is a multiple of `log_step`.
    /// Returns whether anything was stored. Off-cadence times are ignored, not errors.
    pub fn write(&mut self, time: f64, bodies: &[Orbiter]) -> Result<bool> {
        if !time.is_finite() || time < 0.0 {
            return Ok(false);
        }
        let ratio = time / self.log_step;
        let index = ratio.round();
        if (ratio - index).abs() > ALIGNMENT_TOLERANCE {
            return Ok(false);
        }
        self.write_sample(index as usize, bodies)?;
        Ok(true)
    }

    /// Store `bodies` as sample `index`.
    ///
    /// Samples go in order: `index` must be the next unwritten sample,
    /// or the newest one again (which overwrites it).
    pub fn write_sample(&mut self, index: usize, bodies: &[Orbiter]) -> Result<()> {
        if bodies.len() != self.body_count {
            return Err(SimulationError::BodyCountMismatch {
                expected: self.body_count,
                got: bodies.len(),
            });
        }
        if index >= self.capacity {
            return Err(SimulationError::LogCapacityExceeded {
                required: index + 1,
                capacity: self.capacity,
            });
        }

        let next = self.len();
        if index == next {
            self.entries.extend_from_slice(bodies);
            self.written += 1;
        } else if index + 1 == next {
            let start = index * self.body_count;
            self.entries[start..].copy_from_slice(bodies);
        } else {
            return Err(SimulationError::OutOfOrderSample {
                index,
                expected: next,
            });
        }
        Ok(())
    }

    /// The sample at or just before elapsed `time`.
    /// `None` if that sample was never written.
    pub fn sample(&self, time: f64) -> Option<&[Orbiter]> {
        self.index_of(time).and_then(|index| self.sample_at(index))
    }

    /// Index of the sample at or just before elapsed `time`, written or not.
    pub fn index_of(&self, time: f64) -> Option<usize> {
        if !time.is_finite() || time < 0.0 {
            return None;
        }
        // Nudge up so a time that is a multiple in all but rounding doesn't fall to the previous sample
        Some((time / self.log_step + ALIGNMENT_TOLERANCE).floor() as usize)
    }

    pub fn sample_at(&self, index: usize) -> Option<&[Orbiter]> {
        if index >= self.len() {
            return None;
        }
        let start = index * self.body_count;
        Some(&self.entries[start..start + self.body_count])
    }

    /// Every written sample in time order, with its elapsed time.
    pub fn samples(&self) -> impl Iterator<Item = (f64, &[Orbiter])> + '_ {
        (0..self.len()).filter_map(move |k| self.sample_at(k).map(|block| (self.time_of(k), block)))
    }

    /// Written samples with `from <= time <= to`.
    pub fn samples_between(&self, from: f64, to: f64) -> impl Iterator<Item = (f64, &[Orbiter])> + '_ {
        self.samples()
            .skip_while(move |(t, _)| *t < from)
            .take_while(move |(t, _)| *t <= to)
    }

    /// One orbiter's state in every written sample.
    pub fn body_track(&self, body: usize) -> impl Iterator<Item = (f64, &Orbiter)> + '_ {
        self.samples().filter_map(move |(t, block)| block.get(body).map(|o| (t, o)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Vec3;

    fn block(x: f64) -> Vec<Orbiter> {
        vec![
            Orbiter::new(1.0, 'A', Vec3::new(x, 0.0, 0.0), Vec3::zero()),
            Orbiter::new(2.0, 'B', Vec3::new(-x, 0.0, 0.0), Vec3::zero()),
        ]
    }

    #[test]
    fn writes_only_on_cadence() {
        let mut log = HistoryLog::with_capacity(4, 2, 10.0);
        assert!(log.write(0.0, &block(0.0)).unwrap());
        assert!(!log.write(5.0, &block(0.5)).unwrap());
        assert!(log.write(10.0, &block(1.0)).unwrap());
        assert_eq!(log.len(), 2);
        assert_eq!(log.latest_time(), Some(10.0));
    }

    #[test]
    fn reads_nearest_lower_sample() {
        let mut log = HistoryLog::with_capacity(4, 2, 10.0);
        log.write(0.0, &block(0.0)).unwrap();
        log.write(10.0, &block(1.0)).unwrap();
        assert_eq!(log.sample(15.0).unwrap()[0].pos().x, 1.0);
        assert_eq!(log.sample(9.99).unwrap()[0].pos().x, 0.0);
        assert_eq!(log.sample(10.0).unwrap()[1].pos().x, -1.0);
    }

    #[test]
    fn unwritten_samples_are_absent() {
        let mut log = HistoryLog::with_capacity(4, 2, 10.0);
        assert!(log.sample(0.0).is_none());
        log.write(0.0, &block(0.0)).unwrap();
        assert!(log.sample(20.0).is_none());
        assert!(log.sample(-1.0).is_none());
        assert!(log.sample(f64::NAN).is_none());
    }

    #[test]
    fn full_log_is_an_error() {
        let mut log = HistoryLog::with_capacity(1, 2, 10.0);
        log.write_sample(0, &block(0.0)).unwrap();
        let err = log.write_sample(1, &block(1.0)).unwrap_err();
        assert_eq!(
            err,
            SimulationError::LogCapacityExceeded {
                required: 2,
                capacity: 1
            }
        );
    }

    #[test]
    fn samples_stay_in_order() {
        let mut log = HistoryLog::with_capacity(4, 2, 10.0);
        assert!(matches!(
            log.write_sample(1, &block(0.0)),
            Err(SimulationError::OutOfOrderSample { index: 1, expected: 0 })
        ));
        log.write_sample(0, &block(0.0)).unwrap();
        log.write_sample(1, &block(1.0)).unwrap();
        // Rewriting the newest sample is allowed
        log.write_sample(1, &block(2.0)).unwrap();
        assert_eq!(log.sample_at(1).unwrap()[0].pos().x, 2.0);
        assert!(log.write_sample(0, &block(3.0)).is_err());
    }

    #[test]
    fn wrong_block_size() {
        let mut log = HistoryLog::with_capacity(4, 3, 10.0);
        assert_eq!(
            log.write_sample(0, &block(0.0)),
            Err(SimulationError::BodyCountMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn logs_of_no_bodies_still_count_samples() {
        let mut log = HistoryLog::with_capacity(3, 0, 10.0);
        for k in 0..3 {
            log.write_sample(k, &[]).unwrap();
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.sample(20.0), Some(&[][..]));
        assert_eq!(log.latest_time(), Some(20.0));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn ranges_and_tracks() {
        let mut log = HistoryLog::with_capacity(5, 2, 10.0);
        for k in 0..5 {
            log.write_sample(k, &block(k as f64)).unwrap();
        }
        let times: Vec<f64> = log.samples_between(10.0, 30.0).map(|(t, _)| t).collect();
        assert_eq!(times, vec![10.0, 20.0, 30.0]);
        let xs: Vec<f64> = log.body_track(1).map(|(_, o)| o.pos().x).collect();
        assert_eq!(xs, vec![0.0, -1.0, -2.0, -3.0, -4.0]);

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.capacity(), 5);
    }
}
