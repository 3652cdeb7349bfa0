//! Global constants for rk-model

/// Tolerance used when checking that a placement is a rigid transform
pub const RIGID_TOLERANCE: f64 = 1e-9;

/// Default mass for a newly created joint or body (kg)
pub const DEFAULT_MASS: f64 = 0.0;

/// Indentation used by the tree dump, per depth level
pub const DUMP_INDENT: &str = "  ";
