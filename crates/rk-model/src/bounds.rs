//! Position and velocity bounds of a joint's degrees of freedom

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Bounds of a single degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DofBound {
    /// Whether the position bounds are enforced
    pub bounded: bool,
    /// Lower position bound (rad or m)
    pub lower: f64,
    /// Upper position bound (rad or m)
    pub upper: f64,
    /// Lower velocity bound (rad/s or m/s)
    pub velocity_lower: f64,
    /// Upper velocity bound (rad/s or m/s)
    pub velocity_upper: f64,
}

impl Default for DofBound {
    fn default() -> Self {
        Self::unbounded(f64::INFINITY)
    }
}

impl DofBound {
    /// Unbounded position, symmetric velocity bounds of the given magnitude
    pub fn unbounded(velocity_bound: f64) -> Self {
        Self {
            bounded: false,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            velocity_lower: -velocity_bound.abs(),
            velocity_upper: velocity_bound.abs(),
        }
    }
}

/// Bound table of a joint, indexed by DOF rank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DofBounds {
    dofs: Vec<DofBound>,
}

impl DofBounds {
    /// Create a table of `dof_count` unbounded DOFs
    pub fn new(dof_count: usize, velocity_bound: f64) -> Self {
        Self {
            dofs: vec![DofBound::unbounded(velocity_bound); dof_count],
        }
    }

    /// Number of degrees of freedom
    pub fn len(&self) -> usize {
        self.dofs.len()
    }

    /// Check if the table has no DOF (anchor joints)
    pub fn is_empty(&self) -> bool {
        self.dofs.is_empty()
    }

    /// Iterate over the bound records in rank order
    pub fn iter(&self) -> impl Iterator<Item = &DofBound> {
        self.dofs.iter()
    }

    /// Get the bound record at `rank`
    pub fn get(&self, rank: usize) -> Option<&DofBound> {
        self.dofs.get(rank)
    }

    pub(crate) fn get_mut(&mut self, rank: usize) -> Option<&mut DofBound> {
        self.dofs.get_mut(rank)
    }
}

/// Check a bound pair, refusing NaN and `lower > upper`
pub(crate) fn check_range(lower: f64, upper: f64) -> Result<(), ModelError> {
    if lower.is_nan() || upper.is_nan() {
        return Err(ModelError::NotANumber);
    }
    if lower > upper {
        return Err(ModelError::InvertedBounds { lower, upper });
    }
    Ok(())
}
