//! Lets you construct solar systems with nested orbiting more easily.

use simulator::bodies::*;

/// Use this struct to construct a solar system easily
#[derive(Default)]
pub struct SolarSystemBuilder {
    /// The stuff in the solar system
    entries: Vec<SolarSystemBuilderEntry>,
}

impl SolarSystemBuilder {
    /// Make a new empty Builder.
    pub fn new() -> Self {
        SolarSystemBuilder {
            entries: Vec::new(),
        }
    }

    /// Add an entry to the Builder.
    pub fn add(&mut self, ssbe: SolarSystemBuilderEntry) -> &mut Self {
        self.entries.push(ssbe);
        self
    }

    /// Calculates the absolute positions and velocities of all entries, and returns them
    /// in depth-first order, ready for `SolarSystem::new()`.
    pub fn construct(&mut self) -> Vec<Orbiter> {
        let mut out: Vec<Orbiter> = Vec::new();
        // Drain will remove the stuff from the entries, so the builder can be reused
        for base_entry in self.entries.drain(..) {
            // Always base it on the origin, at rest
            construct_one_level(base_entry, Vec3::zero(), Vec3::zero(), &mut out);
        }
        out
    }
}

/// Inner function for construct()'s recursion.
fn construct_one_level(
    entry: SolarSystemBuilderEntry,
    parent_pos: Vec3,
    parent_vel: Vec3,
    out: &mut Vec<Orbiter>,
) {
    use SolarSystemBuilderEntry as SSBE;

    match entry {
        SSBE::Orbit(Orbiter(body, kmat), children) => {
            let pos = parent_pos + kmat.pos;
            let vel = parent_vel + kmat.vel;
            out.push(Orbiter(body, Kinemat::new(pos, vel)));
            for child in children {
                construct_one_level(child, pos, vel, out);
            }
        }
        SSBE::Locus(point, children) => {
            let pos = parent_pos + point;
            for child in children {
                construct_one_level(child, pos, parent_vel, out);
            }
        }
    }
}

/// One entry in a SolarSystemBuilder
pub enum SolarSystemBuilderEntry {
    /// Orbiters have an orbiter associated with them, and have children.
    /// The orbiter's kinemat is relative to its parent.
    Orbit(Orbiter, Vec<SolarSystemBuilderEntry>),
    /// Loci only consider the position, and no Orbiter is added to the SolarSystem because of it.
    /// Still has children.
    Locus(Vec3, Vec<SolarSystemBuilderEntry>),
}

impl SolarSystemBuilderEntry {
    /// Create a new SolarSystemBuilderEntry::Orbit
    pub fn new(orbiter: Orbiter) -> Self {
        SolarSystemBuilderEntry::Orbit(orbiter, Vec::new())
    }

    /// Create a new SolarSystemBuilderEntry::Orbit from a Body and a Kinemat
    pub fn new_parts(body: Body, kmat: Kinemat) -> SolarSystemBuilderEntry {
        SolarSystemBuilderEntry::Orbit(Orbiter(body, kmat), Vec::new())
    }

    /// Create a new SolarSystemBuilderEntry::Locus
    /// This can be useful if you want to center things around a locus
    /// without attaching a body.
    pub fn new_locus(pos: Vec3) -> SolarSystemBuilderEntry {
        SolarSystemBuilderEntry::Locus(pos, Vec::new())
    }

    /// Add another SolarSystemBuilderEntry as a child of this one.
    /// Returns itself so you can keep chaining it.
    pub fn add(mut self, child: Self) -> Self {
        self.children_mut().push(child);
        self
    }

    /// Add a whole bunch of SolarSystemBuilderEntries as children of this one.
    /// Consumes the children.
    pub fn add_bulk<T: Iterator<Item = Self>>(mut self, new_children: T) -> Self {
        self.children_mut().extend(new_children);
        self
    }

    fn children_mut(&mut self) -> &mut Vec<SolarSystemBuilderEntry> {
        match self {
            SolarSystemBuilderEntry::Orbit(_, kids) | SolarSystemBuilderEntry::Locus(_, kids) => kids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SolarSystemBuilderEntry as SSBE;

    fn kmat(x: f64, vy: f64) -> Kinemat {
        Kinemat::new(Vec3::new(x, 0.0, 0.0), Vec3::new(0.0, vy, 0.0))
    }

    #[test]
    fn children_are_relative_to_parents() {
        let out = SolarSystemBuilder::new()
            .add(
                SSBE::new_parts(Body::new(10.0, 'P'), kmat(100.0, 5.0))
                    .add(SSBE::new_parts(Body::new(1.0, 'c'), kmat(10.0, 1.0))),
            )
            .construct();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pos(), Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(out[1].pos(), Vec3::new(110.0, 0.0, 0.0));
        assert_eq!(out[1].vel(), Vec3::new(0.0, 6.0, 0.0));
    }

    #[test]
    fn loci_move_children_but_add_nothing() {
        let out = SolarSystemBuilder::new()
            .add(
                SSBE::new_locus(Vec3::new(0.0, 0.0, 50.0))
                    .add_bulk((1..=3).map(|n| SSBE::new_parts(Body::new(1.0, 'x'), kmat(n as f64, 0.0)))),
            )
            .construct();

        assert_eq!(out.len(), 3);
        assert_eq!(out[2].pos(), Vec3::new(3.0, 0.0, 50.0));
        assert!(out.iter().all(|o| o.vel() == Vec3::zero()));
    }

    #[test]
    fn construct_drains_the_builder() {
        let mut builder = SolarSystemBuilder::new();
        builder.add(SSBE::new(Orbiter::new(1.0, 'a', Vec3::zero(), Vec3::zero())));
        assert_eq!(builder.construct().len(), 1);
        assert!(builder.construct().is_empty());
    }
}
