//! Prefabricated bodies and solar systems.

use crate::LoadError;
use simulator::bodies::Body;
use std::collections::HashMap;

pub mod bodies {
    use simulator::bodies::Body;

    // REAL BODIES

    /// Returns our Sun.
    pub fn sol() -> Body {
        Body::new(1.9884e30, 'S')
    }

    /// Returns Mercury.
    /// Apparently Mercury's orbit is going to be a little off. But I'm no Einstein.
    pub fn mercury() -> Body {
        Body::new(3.3011e23, 'm')
    }

    pub fn venus() -> Body {
        Body::new(4.8675e24, 'V')
    }

    /// Returns the Earth.
    pub fn earth() -> Body {
        Body::new(5.972e24, 'E')
    }

    /// Returns our Moon.
    pub fn luna() -> Body {
        Body::new(7.348e22, 'M')
    }

    pub fn mars() -> Body {
        Body::new(6.4171e23, 'R')
    }

    pub fn phobos() -> Body {
        Body::new(1.08e16, 'p')
    }

    pub fn deimos() -> Body {
        Body::new(1.5e15, 'd')
    }

    pub fn jupiter() -> Body {
        Body::new(1.8982e27, 'J')
    }

    pub fn saturn() -> Body {
        Body::new(5.6834e26, 'N')
    }

    pub fn uranus() -> Body {
        Body::new(8.6810e25, 'U')
    }

    pub fn neptune() -> Body {
        Body::new(1.024_13e26, 'P')
    }
}

/// Gets a premade Body from its name.
pub fn get_body_from_id(id: &str) -> Result<Body, LoadError> {
    macro_rules! maker {
        (
            $($name:ident),*
        ) => {
            {
                let mut h: HashMap<&'static str, fn() -> Body> = HashMap::new();
                $( h.insert(stringify!($name), bodies::$name); )*
                h
            }
        };
    }

    lazy_static! {
        static ref BODIES: HashMap<&'static str, fn() -> Body> = maker![
            sol, mercury, venus, earth, luna, mars, phobos, deimos, jupiter, saturn, uranus, neptune
        ];
    }

    BODIES
        .get(id)
        .map(|make| make())
        .ok_or_else(|| LoadError::UnknownPrefab(id.to_string()))
}

pub mod solar_systems {
    use crate::builder::{SolarSystemBuilder, SolarSystemBuilderEntry as SSBE};
    use crate::deserialize::Scenario;
    use crate::prefabs::bodies;
    use simulator::bodies::*;
    use simulator::config::SimulationConfig;
    use simulator::projection::RenderConfig;
    use simulator::time::{HOUR, MINUTE, WEEK};
    use simulator::Result;

    /// Earth sitting still with the Moon going round it.
    pub fn earth_moon() -> Vec<Orbiter> {
        SolarSystemBuilder::new()
            .add(
                SSBE::new_parts(bodies::earth(), Kinemat::zero()).add(SSBE::new_parts(
                    bodies::luna(),
                    Kinemat::new(Vec3::new(384_400_000.0, 0.0, 0.0), Vec3::new(0.0, 1_022.0, 0.0)),
                )),
            )
            .construct()
    }

    /// Earth and Moon plus a heavy body on the far side, orbiting the other way.
    pub fn counter_orbit() -> Vec<Orbiter> {
        let mut out = earth_moon();
        out.push(Orbiter::new(
            7.348e25,
            'T',
            Vec3::new(-384_400_000.0, 0.0, 0.0),
            Vec3::new(0.0, -1_022.0, 0.0),
        ));
        out
    }

    /// Minute steps, hourly samples, four weeks.
    pub fn default_config() -> Result<SimulationConfig> {
        SimulationConfig::new(MINUTE, HOUR, 4.0 * WEEK)
    }

    /// The Earth-Moon system with its default settings.
    pub fn earth_moon_scenario() -> Result<Scenario> {
        Ok(Scenario {
            orbiters: earth_moon(),
            simulation: default_config()?,
            render: RenderConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefabs_by_name() {
        assert_eq!(get_body_from_id("luna").unwrap(), bodies::luna());
        assert_eq!(get_body_from_id("earth").unwrap().symbol, 'E');
        assert!(matches!(get_body_from_id("pluto"), Err(LoadError::UnknownPrefab(_))));
    }

    #[test]
    fn earth_moon_layout() {
        let system = solar_systems::earth_moon();
        assert_eq!(system.len(), 2);
        assert_eq!(system[1].pos().x, 3.844e8);
        assert_eq!(solar_systems::counter_orbit().len(), 3);

        let scenario = solar_systems::earth_moon_scenario().unwrap();
        assert_eq!(scenario.simulation.delta_time(), 60.0);
        assert_eq!(scenario.simulation.duration(), 2_419_200.0);
    }
}
