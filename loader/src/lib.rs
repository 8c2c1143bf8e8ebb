//! The root of this crate doesn't do much.
//! It re-exports its contents and says what can go wrong.

pub mod builder;
pub use builder::{SolarSystemBuilder, SolarSystemBuilderEntry}; // SolarSystemBuilder directly
pub mod deserialize;
pub mod prefabs; // prefabs::bodies::whatever
pub use deserialize::*;

use simulator::SimulationError;
use thiserror::Error;

#[macro_use]
extern crate lazy_static;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("couldn't parse scenario: {0}")]
    Parse(#[from] json5::Error),

    #[error("no prefab body named {0}")]
    UnknownPrefab(String),

    #[error("symbol {0:?} must be exactly one character")]
    InvalidSymbol(String),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
