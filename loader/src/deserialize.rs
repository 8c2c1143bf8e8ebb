//! Lets you load a scenario from a JSON5 file.

use crate::builder::{SolarSystemBuilder, SolarSystemBuilderEntry as SSBE};
use crate::prefabs;
use crate::LoadError;

use serde::Deserialize;
use simulator::bodies::{self, Vec3};
use simulator::config::SimulationConfig;
use simulator::projection::{Plane, RenderConfig};

use std::path::Path;

/// Everything needed to run and draw a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub orbiters: Vec<bodies::Orbiter>,
    pub simulation: SimulationConfig,
    pub render: RenderConfig,
}

/// A 3-D vector, written `[x, y, z]`.
#[derive(Deserialize)]
struct RawVec3(f64, f64, f64);

impl From<RawVec3> for Vec3 {
    fn from(v: RawVec3) -> Self {
        Vec3::new(v.0, v.1, v.2)
    }
}

/// A point in space with children in relation to it.
#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Locus {
        pos: RawVec3,
        #[serde(default)]
        children: Vec<Entry>,
    },
    Orbiter {
        body: Body,
        kinemat: Kinemat,
        #[serde(default)]
        children: Vec<Entry>,
    },
}

/// A Body in space
#[derive(Deserialize)]
#[serde(untagged)]
enum Body {
    Prefab(String), // A pre-made pre-defined Body
    Custom { mass: f64, symbol: String },
}

#[derive(Deserialize)]
struct Kinemat {
    pos: RawVec3,
    vel: RawVec3,
}

#[derive(Deserialize)]
struct RawSimulation {
    delta_time: f64,
    /// Defaults to sampling every step
    #[serde(default)]
    log_step: Option<f64>,
    duration: f64,
}

/// Anything left out falls back to `RenderConfig::default()`
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawRender {
    plane: Option<Plane>,
    zoom: Option<f64>,
    columns: Option<u32>,
    rows: Option<u32>,
    render_size: Option<f64>,
    render_step: Option<f64>,
    trajectory: Option<bool>,
}

#[derive(Deserialize)]
struct RawScenario {
    simulation: RawSimulation,
    #[serde(default)]
    render: RawRender,
    bodies: Vec<Entry>,
}

/// Parses a scenario file's contents.
#[tracing::instrument(skip_all, fields(source_len = contents.len()))]
pub fn load(contents: &str) -> Result<Scenario, LoadError> {
    let raw: RawScenario = json5::from_str(contents)?;

    let builder = &mut SolarSystemBuilder::new();
    for root in raw.bodies {
        builder.add(do_one_level(root)?);
    }
    let orbiters = builder.construct();

    let sim = raw.simulation;
    let simulation =
        SimulationConfig::new(sim.delta_time, sim.log_step.unwrap_or(sim.delta_time), sim.duration)?;

    let defaults = RenderConfig::default();
    let r = raw.render;
    let render = RenderConfig::new(
        r.plane.unwrap_or(defaults.plane()),
        r.zoom.unwrap_or(defaults.zoom()),
        r.columns.unwrap_or(defaults.columns()),
        r.rows.unwrap_or(defaults.rows()),
        r.render_size.unwrap_or(defaults.render_size()),
        r.render_step.unwrap_or(defaults.render_step()),
        r.trajectory.unwrap_or(defaults.trajectory()),
    )?;

    tracing::info!(bodies = orbiters.len(), "loaded scenario");
    Ok(Scenario {
        orbiters,
        simulation,
        render,
    })
}

/// Reads and parses a scenario file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Scenario, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load(&contents)
}

/// Helper function to DFS convert from serde to real
fn do_one_level(entry: Entry) -> Result<SSBE, LoadError> {
    let (node, children) = match entry {
        Entry::Locus { pos, children } => (SSBE::new_locus(pos.into()), children),
        Entry::Orbiter {
            body,
            kinemat,
            children,
        } => {
            let body = match body {
                Body::Prefab(id) => prefabs::get_body_from_id(&id)?,
                Body::Custom { mass, symbol } => bodies::Body::new(mass, single_char(&symbol)?),
            };
            let kmat = bodies::Kinemat::new(kinemat.pos.into(), kinemat.vel.into());
            (SSBE::new_parts(body, kmat), children)
        }
    };

    let children = children
        .into_iter()
        .map(do_one_level)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(node.add_bulk(children.into_iter()))
}

fn single_char(symbol: &str) -> Result<char, LoadError> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LoadError::InvalidSymbol(symbol.to_string())),
    }
}
