//! Numerical constants shared by the gate algebra and the execution engine.

/// Constants used when building and checking operators.
pub mod qudim_constants {
    /// Default absolute tolerance for unitarity and normalisation checks.
    pub const DEFAULT_TOLERANCE: f64 = 1e-9;
    /// Amplitudes with a squared magnitude below this are treated as zero.
    pub const AMPLITUDE_EPSILON: f64 = 1e-12;
    /// Used for root-of-unity phases (`e^(2πi k/d)`).
    pub const TAU: f64 = std::f64::consts::TAU;
}
