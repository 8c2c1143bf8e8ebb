//! Newtonian gravity between every pair of orbiters.

use crate::bodies::{separation, Orbiter, Vec3};
use crate::error::{Result, SimulationError};

pub const GRAV_CONSTANT: f64 = 6.67430e-11;

/// Force that `b` exerts on `a`, pointing from `a` towards `b`.
/// The reaction on `b` is the exact negation.
///
/// `None` when the pair is too close for the force to be a finite number,
/// including when they share a position.
pub fn pair_force(a: &Orbiter, b: &Orbiter) -> Option<Vec3> {
    let r = separation(a.pos(), b.pos());
    let dist = r.length();
    if dist == 0.0 {
        return None;
    }
    let force = GRAV_CONSTANT * a.mass() * b.mass() / (dist * dist);
    let f = r / dist * force;
    if f.x.is_finite() && f.y.is_finite() && f.z.is_finite() {
        Some(f)
    } else {
        None
    }
}

/// Reset `out` and sum the net force on each orbiter into it.
/// `out[i]` belongs to `orbiters[i]`.
pub fn accumulate_forces(orbiters: &[Orbiter], out: &mut [Vec3]) -> Result<()> {
    debug_assert_eq!(orbiters.len(), out.len());
    for f in out.iter_mut() {
        *f = Vec3::zero();
    }

    let n = orbiters.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let force = pair_force(&orbiters[i], &orbiters[j]).ok_or(
                SimulationError::DegenerateConfiguration {
                    first: i,
                    second: j,
                },
            )?;
            out[i] += force;
            out[j] -= force;
        }
    }
    Ok(())
}
