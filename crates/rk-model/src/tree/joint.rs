//! Joint types and builder for the kinematic tree

use std::fmt;

use glam::{DMat4, DVec3};
use nalgebra::Matrix4;
use uuid::Uuid;

use crate::bounds::{DofBound, DofBounds, check_range};
use crate::error::ModelError;
use crate::inertia::{InertiaMatrix, Inertial};
use crate::transform::to_dynamics_format;

/// Joint variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JointKind {
    /// Joint with any number of degrees of freedom
    #[default]
    Generic,
    /// Zero-DOF joint rigidly fixing its frame to the parent's
    Anchor,
}

impl JointKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            JointKind::Generic => "Generic",
            JointKind::Anchor => "Anchor",
        }
    }

    /// Whether editors may duplicate joints of this kind
    pub fn is_clonable(&self) -> bool {
        matches!(self, JointKind::Generic)
    }
}

/// A joint of the kinematic tree
///
/// Joints are created through [`Joint::generic`], [`Joint::anchor`] or
/// [`Joint::builder`] and wired together by
/// [`KinematicTree`](super::KinematicTree). Parent, children and attached
/// body are handles into the tree that owns the joint.
#[derive(Debug)]
pub struct Joint {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    kind: JointKind,
    /// Placement relative to the parent, geometric convention
    placement: DMat4,
    /// Same placement, dynamics convention
    dynamics_placement: Matrix4<f64>,
    bounds: DofBounds,
    /// Inertial parameters mirrored from the attached body
    inertial: Inertial,
    pub(crate) parent: Option<Uuid>,
    pub(crate) children: Vec<Uuid>,
    pub(crate) body: Option<Uuid>,
}

impl Joint {
    /// Create a joint with `dof_count` unbounded degrees of freedom
    pub fn generic(name: impl Into<String>, dof_count: usize) -> Self {
        Self::builder(name).dof(dof_count).build()
    }

    /// Create an anchor joint (no degree of freedom)
    pub fn anchor(name: impl Into<String>) -> Self {
        Self::builder(name).anchor().build()
    }

    /// Create a builder for constructing joints with fluent API
    pub fn builder(name: impl Into<String>) -> JointBuilder {
        JointBuilder::new(name)
    }

    /// Copy this joint's definition into a new, unwired joint
    ///
    /// Returns `None` for anchor joints, which may not be duplicated.
    pub fn duplicate(&self, name: impl Into<String>) -> Option<Joint> {
        if !self.kind.is_clonable() {
            return None;
        }
        Some(Joint {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: self.kind,
            placement: self.placement,
            dynamics_placement: self.dynamics_placement,
            bounds: self.bounds.clone(),
            inertial: self.inertial,
            parent: None,
            children: Vec::new(),
            body: None,
        })
    }

    /// Handle of this joint
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> JointKind {
        self.kind
    }

    pub fn is_anchor(&self) -> bool {
        self.kind == JointKind::Anchor
    }

    /// Number of degrees of freedom
    pub fn dof_count(&self) -> usize {
        self.bounds.len()
    }

    // ============== Placement ==============

    /// Placement relative to the parent joint (geometric convention)
    pub fn placement(&self) -> DMat4 {
        self.placement
    }

    /// Placement relative to the parent joint (dynamics convention)
    pub fn dynamics_placement(&self) -> &Matrix4<f64> {
        &self.dynamics_placement
    }

    pub(crate) fn set_placement(&mut self, placement: DMat4) {
        self.placement = placement;
        self.dynamics_placement = to_dynamics_format(&placement);
    }

    // ============== Kinematic chain ==============

    /// Parent joint handle (`None` for a root)
    pub fn parent_joint(&self) -> Option<Uuid> {
        self.parent
    }

    /// Child joint handle at `rank`, in insertion order
    pub fn child_joint(&self, rank: usize) -> Result<Uuid, ModelError> {
        self.children
            .get(rank)
            .copied()
            .ok_or_else(|| ModelError::ChildOutOfRange {
                joint: self.name.clone(),
                rank,
                count: self.children.len(),
            })
    }

    /// Number of child joints
    pub fn count_child_joints(&self) -> usize {
        self.children.len()
    }

    /// All child joint handles in rank order
    pub fn children(&self) -> &[Uuid] {
        &self.children
    }

    /// Handle of the attached body
    pub fn attached_body(&self) -> Option<Uuid> {
        self.body
    }

    // ============== DOF bounds ==============

    /// Bound table of this joint
    pub fn bounds(&self) -> &DofBounds {
        &self.bounds
    }

    fn dof(&self, rank: usize) -> Result<&DofBound, ModelError> {
        self.bounds.get(rank).ok_or_else(|| self.dof_out_of_range(rank))
    }

    fn dof_mut(&mut self, rank: usize) -> Result<&mut DofBound, ModelError> {
        let dof_count = self.bounds.len();
        match self.bounds.get_mut(rank) {
            Some(dof) => Ok(dof),
            None => Err(ModelError::DofOutOfRange {
                joint: self.name.clone(),
                rank,
                dof_count,
            }),
        }
    }

    fn dof_out_of_range(&self, rank: usize) -> ModelError {
        ModelError::DofOutOfRange {
            joint: self.name.clone(),
            rank,
            dof_count: self.bounds.len(),
        }
    }

    /// Whether the position of the DOF at `rank` is bounded
    pub fn is_bounded(&self, rank: usize) -> Result<bool, ModelError> {
        Ok(self.dof(rank)?.bounded)
    }

    /// Enable or disable the position bounds of a DOF
    ///
    /// Stored bound values are kept when disabling.
    pub fn set_bounded(&mut self, rank: usize, bounded: bool) -> Result<(), ModelError> {
        self.dof_mut(rank)?.bounded = bounded;
        Ok(())
    }

    /// Lower position bound of the DOF at `rank`
    pub fn lower_bound(&self, rank: usize) -> Result<f64, ModelError> {
        Ok(self.dof(rank)?.lower)
    }

    /// Upper position bound of the DOF at `rank`
    pub fn upper_bound(&self, rank: usize) -> Result<f64, ModelError> {
        Ok(self.dof(rank)?.upper)
    }

    /// Set the lower position bound; refused if it exceeds the upper bound
    pub fn set_lower_bound(&mut self, rank: usize, lower: f64) -> Result<(), ModelError> {
        let dof = self.dof_mut(rank)?;
        check_range(lower, dof.upper)?;
        dof.lower = lower;
        Ok(())
    }

    /// Set the upper position bound; refused if it is below the lower bound
    pub fn set_upper_bound(&mut self, rank: usize, upper: f64) -> Result<(), ModelError> {
        let dof = self.dof_mut(rank)?;
        check_range(dof.lower, upper)?;
        dof.upper = upper;
        Ok(())
    }

    /// Set both position bounds and mark the DOF as bounded
    pub fn set_bounds(&mut self, rank: usize, lower: f64, upper: f64) -> Result<(), ModelError> {
        let dof = self.dof_mut(rank)?;
        check_range(lower, upper)?;
        dof.lower = lower;
        dof.upper = upper;
        dof.bounded = true;
        Ok(())
    }

    /// Velocity bounds `(lower, upper)` of the DOF at `rank`
    pub fn velocity_bounds(&self, rank: usize) -> Result<(f64, f64), ModelError> {
        let dof = self.dof(rank)?;
        Ok((dof.velocity_lower, dof.velocity_upper))
    }

    /// Set the velocity bounds of a DOF (always active)
    pub fn set_velocity_bounds(
        &mut self,
        rank: usize,
        lower: f64,
        upper: f64,
    ) -> Result<(), ModelError> {
        let dof = self.dof_mut(rank)?;
        check_range(lower, upper)?;
        dof.velocity_lower = lower;
        dof.velocity_upper = upper;
        Ok(())
    }

    // ============== Inertial properties ==============

    pub fn inertial(&self) -> &Inertial {
        &self.inertial
    }

    pub fn mass(&self) -> f64 {
        self.inertial.mass
    }

    /// Local center of mass
    pub fn com(&self) -> DVec3 {
        self.inertial.com
    }

    pub fn inertia(&self) -> InertiaMatrix {
        self.inertial.inertia
    }

    pub(crate) fn set_inertial(&mut self, inertial: Inertial) {
        self.inertial = inertial;
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.placement.w_axis;
        write!(
            f,
            "{} ({}, {} dof) at [{:.4}, {:.4}, {:.4}], {} children",
            self.name,
            self.kind.display_name(),
            self.dof_count(),
            t.x,
            t.y,
            t.z,
            self.children.len()
        )?;
        if self.body.is_some() {
            write!(f, ", body attached")?;
        }
        Ok(())
    }
}

/// Builder for creating joints with fluent API
#[derive(Debug, Clone)]
pub struct JointBuilder {
    name: String,
    kind: JointKind,
    dof_count: usize,
    placement: DMat4,
    inertial: Inertial,
    velocity_bound: Option<f64>,
}

impl JointBuilder {
    /// Create a new joint builder (generic, 1 DOF)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: JointKind::Generic,
            dof_count: 1,
            placement: DMat4::IDENTITY,
            inertial: Inertial::default(),
            velocity_bound: None,
        }
    }

    /// Set the number of degrees of freedom of a generic joint
    pub fn dof(mut self, dof_count: usize) -> Self {
        self.kind = JointKind::Generic;
        self.dof_count = dof_count;
        self
    }

    /// Make this an anchor joint
    pub fn anchor(mut self) -> Self {
        self.kind = JointKind::Anchor;
        self.dof_count = 0;
        self
    }

    /// Set the placement relative to the parent
    pub fn placement(mut self, placement: DMat4) -> Self {
        self.placement = placement;
        self
    }

    /// Set the placement translation, keeping the rotation
    pub fn xyz(mut self, x: f64, y: f64, z: f64) -> Self {
        self.placement.w_axis = glam::DVec4::new(x, y, z, 1.0);
        self
    }

    /// Set the inertial parameters
    pub fn inertial(mut self, inertial: Inertial) -> Self {
        self.inertial = inertial;
        self
    }

    /// Set the symmetric velocity bound given to every DOF
    pub fn velocity_bound(mut self, bound: f64) -> Self {
        self.velocity_bound = Some(bound);
        self
    }

    pub(crate) fn has_velocity_bound(&self) -> bool {
        self.velocity_bound.is_some()
    }

    /// Build the joint
    pub fn build(self) -> Joint {
        let dof_count = match self.kind {
            JointKind::Generic => self.dof_count,
            JointKind::Anchor => 0,
        };
        Joint {
            id: Uuid::new_v4(),
            name: self.name,
            kind: self.kind,
            placement: self.placement,
            dynamics_placement: to_dynamics_format(&self.placement),
            bounds: DofBounds::new(dof_count, self.velocity_bound.unwrap_or(f64::INFINITY)),
            inertial: self.inertial,
            parent: None,
            children: Vec::new(),
            body: None,
        }
    }
}
