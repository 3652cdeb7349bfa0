//! Rigid body attached to a joint

use glam::DVec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::inertia::{InertiaMatrix, Inertial};

/// A rigid body, fixed to at most one joint at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: Uuid,
    pub name: String,
    /// Inertial parameters in the joint frame
    pub inertial: Inertial,
    /// Joint this body is attached to (maintained by the tree)
    pub(crate) joint: Option<Uuid>,
}

impl Body {
    /// Create a massless body
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_inertial(name, Inertial::default())
    }

    /// Create a body with the given inertial parameters
    pub fn with_inertial(name: impl Into<String>, inertial: Inertial) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            inertial,
            joint: None,
        }
    }

    /// Create a solid box body centered on its frame
    pub fn solid_box(name: impl Into<String>, mass: f64, size: DVec3) -> Self {
        Self::with_inertial(
            name,
            Inertial::new(
                mass,
                DVec3::ZERO,
                InertiaMatrix::box_inertia(mass, size.x, size.y, size.z),
            ),
        )
    }

    /// Joint the body is currently attached to
    pub fn joint(&self) -> Option<Uuid> {
        self.joint
    }

    pub fn mass(&self) -> f64 {
        self.inertial.mass
    }

    pub fn com(&self) -> DVec3 {
        self.inertial.com
    }

    pub fn inertia(&self) -> InertiaMatrix {
        self.inertial.inertia
    }
}
