//! Everything that can stop a simulation.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// Two bodies ended up at the same point, so the force between them is infinite.
    #[error("bodies {first} and {second} are at the same position")]
    DegenerateConfiguration { first: usize, second: usize },

    #[error("history log needs {required} samples but only has room for {capacity}")]
    LogCapacityExceeded { required: usize, capacity: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("body {index} is invalid: {reason}")]
    InvalidBody { index: usize, reason: &'static str },

    #[error("sample {index} written out of order (next sample is {expected})")]
    OutOfOrderSample { index: usize, expected: usize },

    #[error("expected a block of {expected} bodies, got {got}")]
    BodyCountMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
