//! Inertial parameters: mass, center of mass and inertia tensor

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MASS;

/// Inertia tensor (symmetric 3x3 matrix)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaMatrix {
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
    pub ixy: f64,
    pub ixz: f64,
    pub iyz: f64,
}

impl Default for InertiaMatrix {
    fn default() -> Self {
        Self::diagonal(0.0, 0.0, 0.0)
    }
}

impl InertiaMatrix {
    /// Create a diagonal inertia tensor
    pub fn diagonal(ixx: f64, iyy: f64, izz: f64) -> Self {
        Self {
            ixx,
            iyy,
            izz,
            ixy: 0.0,
            ixz: 0.0,
            iyz: 0.0,
        }
    }

    /// Create an inertia matrix for a solid box
    pub fn box_inertia(mass: f64, width: f64, height: f64, depth: f64) -> Self {
        let k = mass / 12.0;
        Self::diagonal(
            k * (height * height + depth * depth),
            k * (width * width + depth * depth),
            k * (width * width + height * height),
        )
    }

    /// Create an inertia matrix for a solid sphere
    pub fn sphere_inertia(mass: f64, radius: f64) -> Self {
        let i = 2.0 * mass * radius * radius / 5.0;
        Self::diagonal(i, i, i)
    }

    /// Full symmetric 3x3 matrix
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_cols(
            DVec3::new(self.ixx, self.ixy, self.ixz),
            DVec3::new(self.ixy, self.iyy, self.iyz),
            DVec3::new(self.ixz, self.iyz, self.izz),
        )
    }

    /// Convert to the dynamics-layer matrix type
    pub fn to_matrix3(&self) -> nalgebra::Matrix3<f64> {
        nalgebra::Matrix3::new(
            self.ixx, self.ixy, self.ixz, //
            self.ixy, self.iyy, self.iyz, //
            self.ixz, self.iyz, self.izz,
        )
    }

    /// Check if the inertia matrix is physically valid
    pub fn is_valid(&self) -> bool {
        if self.ixx <= 0.0 || self.iyy <= 0.0 || self.izz <= 0.0 {
            return false;
        }
        // Triangle inequality on the principal moments
        self.ixx <= self.iyy + self.izz
            && self.iyy <= self.ixx + self.izz
            && self.izz <= self.ixx + self.iyy
    }
}

/// Mass, local center of mass and inertia tensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inertial {
    pub mass: f64,
    pub com: DVec3,
    pub inertia: InertiaMatrix,
}

impl Default for Inertial {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            com: DVec3::ZERO,
            inertia: InertiaMatrix::default(),
        }
    }
}

impl Inertial {
    pub fn new(mass: f64, com: DVec3, inertia: InertiaMatrix) -> Self {
        Self { mass, com, inertia }
    }
}
