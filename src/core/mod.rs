// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod register;
pub mod state;

// Re-export public types for convenient access via `qudim::core::TypeName`
pub use error::{QuditError, QuditResult};
pub use register::{RegisterModel, RegisterSpec};
pub use state::StateVector;

pub mod constants;
pub use constants::qudim_constants::{AMPLITUDE_EPSILON, DEFAULT_TOLERANCE, TAU};
