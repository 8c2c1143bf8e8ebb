//! Handles bodies and such

use euclid::default::Vector3D;

/// Every position, velocity and force in the simulation.
pub type Vec3 = Vector3D<f64>;

/// Vector from `from` to `to`.
pub fn separation(from: Vec3, to: Vec3) -> Vec3 {
    to - from
}

/// The representation of a body, like a planet or a moon.
/// Doesn't store its position or velocity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    /// In kg. Always positive.
    pub mass: f64,
    /// Single glyph the body is drawn with.
    pub symbol: char,
}

impl Body {
    pub fn new(mass: f64, symbol: char) -> Self {
        Self { mass, symbol }
    }
}

/// A Kinemat holds all the kinematic information about something.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Kinemat {
    pub pos: Vec3,
    pub vel: Vec3,
}

impl Kinemat {
    pub fn new(pos: Vec3, vel: Vec3) -> Self {
        Self { pos, vel }
    }

    pub fn zero() -> Self {
        Self {
            pos: Vec3::zero(),
            vel: Vec3::zero(),
        }
    }

    /// Semi-implicit Euler: the position moves with the velocity that was just updated.
    pub fn update(&mut self, dt: f64, acc: Vec3) {
        self.vel += acc * dt;
        self.pos += self.vel * dt;
    }
}

/// An Orbiter is a combination of a Body and a Kinemat.
/// In other words, a thing and where it is (and how fast it's going.)
/// This is also exactly what the history log stores per body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orbiter(pub Body, pub Kinemat);

impl Orbiter {
    pub fn new(mass: f64, symbol: char, pos: Vec3, vel: Vec3) -> Self {
        Orbiter(Body::new(mass, symbol), Kinemat::new(pos, vel))
    }

    pub fn mass(&self) -> f64 {
        self.0.mass
    }

    pub fn symbol(&self) -> char {
        self.0.symbol
    }

    pub fn pos(&self) -> Vec3 {
        self.1.pos
    }

    pub fn vel(&self) -> Vec3 {
        self.1.vel
    }

    /// Advance this orbiter by one step under `force`.
    pub fn integrate(&mut self, force: Vec3, dt: f64) {
        let acc = force / self.0.mass;
        self.1.update(dt, acc);
    }

    /// Why this orbiter can't be simulated, if anything.
    pub(crate) fn defect(&self) -> Option<&'static str> {
        if self.0.mass <= 0.0 || !self.0.mass.is_finite() {
            Some("mass must be positive and finite")
        } else if !is_finite(self.1.pos) {
            Some("position must be finite")
        } else if !is_finite(self.1.vel) {
            Some("velocity must be finite")
        } else {
            None
        }
    }
}

fn is_finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
