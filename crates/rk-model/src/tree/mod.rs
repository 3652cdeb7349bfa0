//! Kinematic tree of joints and attached bodies

mod joint;
mod queries;

use std::collections::HashMap;

use glam::{DMat4, DVec3};
use nalgebra::Matrix4;
use uuid::Uuid;

pub use joint::{Joint, JointBuilder, JointKind};

use crate::body::Body;
use crate::bounds::check_range;
use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::inertia::{InertiaMatrix, Inertial};
use crate::transform::{is_homogeneous, is_rigid_transform, to_geometric_format};

/// Arena owning every joint and body of a mechanism
///
/// Joints and bodies are addressed by their `Uuid` handle. A joint owns its
/// children and its attached body through these handles; the parent handle
/// is a back-reference kept consistent by [`KinematicTree::add_child_joint`].
#[derive(Debug, Default)]
pub struct KinematicTree {
    config: ModelConfig,
    joints: HashMap<Uuid, Joint>,
    bodies: HashMap<Uuid, Body>,
    /// Name to ID index for joints (O(1) lookup)
    pub(crate) joint_name_index: HashMap<String, Uuid>,
}

impl KinematicTree {
    /// Create an empty tree with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with the given configuration
    pub fn with_config(config: ModelConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    // ============== Joints ==============

    /// Register a joint; it stays unparented until added as a child
    ///
    /// Refused if a joint with the same handle is already registered.
    pub fn add_joint(&mut self, joint: Joint) -> Result<Uuid, ModelError> {
        let id = joint.id;
        if self.joints.contains_key(&id) {
            tracing::warn!("Refused to register joint '{}': handle in use", joint.name);
            return Err(ModelError::DuplicateHandle(id));
        }
        self.check_placement(id, &joint.placement())?;

        tracing::debug!("Registered joint '{}' ({} dof)", joint.name, joint.dof_count());
        self.joint_name_index.insert(joint.name.clone(), id);
        self.joints.insert(id, joint);
        Ok(id)
    }

    /// Build and register a joint, filling unset defaults from the config
    pub fn create_joint(&mut self, builder: JointBuilder) -> Result<Uuid, ModelError> {
        let builder = if builder.has_velocity_bound() {
            builder
        } else {
            builder.velocity_bound(self.config.default_velocity_bound)
        };
        self.add_joint(builder.build())
    }

    /// Get a joint, failing if the handle is unknown
    pub fn joint(&self, id: Uuid) -> Result<&Joint, ModelError> {
        self.joints.get(&id).ok_or(ModelError::JointNotFound(id))
    }

    /// Get a mutable joint (bounds editing), failing if the handle is unknown
    pub fn joint_mut(&mut self, id: Uuid) -> Result<&mut Joint, ModelError> {
        self.joints.get_mut(&id).ok_or(ModelError::JointNotFound(id))
    }

    pub fn get_joint(&self, id: Uuid) -> Option<&Joint> {
        self.joints.get(&id)
    }

    /// Iterate over all joints (arbitrary order)
    pub fn joints(&self) -> impl Iterator<Item = &Joint> {
        self.joints.values()
    }

    /// Rename a joint and update the name index
    pub fn rename_joint(&mut self, id: Uuid, name: impl Into<String>) -> Result<(), ModelError> {
        let name = name.into();
        let joint = self.joints.get_mut(&id).ok_or(ModelError::JointNotFound(id))?;
        if self.joint_name_index.get(&joint.name) == Some(&id) {
            self.joint_name_index.remove(&joint.name);
        }
        joint.name = name.clone();
        self.joint_name_index.insert(name, id);
        Ok(())
    }

    // ============== Kinematic chain ==============

    /// Parent of a joint (`None` for a root)
    pub fn parent_joint(&self, id: Uuid) -> Result<Option<Uuid>, ModelError> {
        Ok(self.joint(id)?.parent_joint())
    }

    /// Child of a joint at `rank`
    pub fn child_joint(&self, id: Uuid, rank: usize) -> Result<Uuid, ModelError> {
        self.joint(id)?.child_joint(rank)
    }

    /// Number of children of a joint
    pub fn count_child_joints(&self, id: Uuid) -> Result<usize, ModelError> {
        Ok(self.joint(id)?.count_child_joints())
    }

    /// Append `child_id` to the children of `parent_id`
    ///
    /// Refused, leaving the tree unchanged, if the child already has a parent
    /// (`DuplicateChild` when that parent is `parent_id`) or if the child is
    /// `parent_id` itself or one of its ancestors.
    pub fn add_child_joint(&mut self, parent_id: Uuid, child_id: Uuid) -> Result<(), ModelError> {
        self.joint(parent_id)?;
        let child = self.joint(child_id)?;

        if let Some(existing) = child.parent {
            let error = if existing == parent_id {
                ModelError::DuplicateChild {
                    parent: parent_id,
                    child: child_id,
                }
            } else {
                ModelError::AlreadyHasParent(child_id)
            };
            tracing::warn!("Refused to add child joint: {}", error);
            return Err(error);
        }

        if self.would_create_cycle(parent_id, child_id) {
            tracing::warn!("Refused to add child joint {}: cycle", child_id);
            return Err(ModelError::WouldCreateCycle);
        }

        self.joint_mut(parent_id)?.children.push(child_id);
        self.joint_mut(child_id)?.parent = Some(parent_id);
        tracing::debug!("Added child joint {} to {}", child_id, parent_id);
        Ok(())
    }

    /// Check if making `child_id` a child of `parent_id` would create a cycle
    fn would_create_cycle(&self, parent_id: Uuid, child_id: Uuid) -> bool {
        // Check if child is the parent or one of its ancestors
        let mut current = Some(parent_id);
        while let Some(id) = current {
            if id == child_id {
                return true;
            }
            current = self.joints.get(&id).and_then(|j| j.parent);
        }
        false
    }

    // ============== Placement ==============

    /// The homogeneous form is always required; rigidity only when
    /// `validate_placements` is set
    fn check_placement(&self, id: Uuid, placement: &DMat4) -> Result<(), ModelError> {
        let tolerance = self.config.rigid_tolerance;
        let valid = if self.config.validate_placements {
            is_rigid_transform(placement, tolerance)
        } else {
            is_homogeneous(placement, tolerance)
        };
        if !valid {
            tracing::warn!("Refused non-rigid placement for joint {}", id);
            return Err(ModelError::NonRigidPlacement(id));
        }
        Ok(())
    }

    /// Set a joint's placement relative to its parent (geometric convention)
    pub fn set_placement(&mut self, id: Uuid, placement: DMat4) -> Result<(), ModelError> {
        self.joint(id)?;
        self.check_placement(id, &placement)?;
        self.joint_mut(id)?.set_placement(placement);
        Ok(())
    }

    /// Set a joint's placement relative to its parent (dynamics convention)
    pub fn set_dynamics_placement(
        &mut self,
        id: Uuid,
        placement: &Matrix4<f64>,
    ) -> Result<(), ModelError> {
        self.set_placement(id, to_geometric_format(placement))
    }

    pub fn placement(&self, id: Uuid) -> Result<DMat4, ModelError> {
        Ok(self.joint(id)?.placement())
    }

    pub fn dynamics_placement(&self, id: Uuid) -> Result<Matrix4<f64>, ModelError> {
        Ok(*self.joint(id)?.dynamics_placement())
    }

    // ============== Inertial properties ==============

    pub fn inertial(&self, id: Uuid) -> Result<Inertial, ModelError> {
        Ok(*self.joint(id)?.inertial())
    }

    /// Set a joint's inertial parameters and re-derive its attached body
    ///
    /// NaN in any component is refused and nothing changes.
    pub fn set_inertial(&mut self, id: Uuid, inertial: Inertial) -> Result<(), ModelError> {
        let joint = self.joint_mut(id)?;
        check_inertial(&inertial)?;
        joint.set_inertial(inertial);
        if let Some(body_id) = joint.body
            && let Some(body) = self.bodies.get_mut(&body_id)
        {
            body.inertial = inertial;
        }
        Ok(())
    }

    pub fn set_mass(&mut self, id: Uuid, mass: f64) -> Result<(), ModelError> {
        let inertial = Inertial {
            mass,
            ..self.inertial(id)?
        };
        self.set_inertial(id, inertial)
    }

    /// Set the local center of mass
    pub fn set_com(&mut self, id: Uuid, com: DVec3) -> Result<(), ModelError> {
        let inertial = Inertial {
            com,
            ..self.inertial(id)?
        };
        self.set_inertial(id, inertial)
    }

    pub fn set_inertia(&mut self, id: Uuid, inertia: InertiaMatrix) -> Result<(), ModelError> {
        let inertial = Inertial {
            inertia,
            ..self.inertial(id)?
        };
        self.set_inertial(id, inertial)
    }

    // ============== Bodies ==============

    /// Register a body; it is not attached to any joint yet
    ///
    /// Refused if a body with the same handle is already registered, so a
    /// clone of an attached body cannot replace it.
    pub fn add_body(&mut self, mut body: Body) -> Result<Uuid, ModelError> {
        let id = body.id;
        if self.bodies.contains_key(&id) {
            tracing::warn!("Refused to register body '{}': handle in use", body.name);
            return Err(ModelError::DuplicateHandle(id));
        }
        body.joint = None;
        self.bodies.insert(id, body);
        Ok(id)
    }

    pub fn get_body(&self, id: Uuid) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Iterate over all bodies (arbitrary order)
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    /// Attach a body to a joint, or clear the attachment with `None`
    ///
    /// The joint's previous body is released, and the new body is detached
    /// from any other joint first. The joint's inertial parameters are
    /// replaced by the body's. Returns the previously attached body.
    pub fn set_attached_body(
        &mut self,
        joint_id: Uuid,
        body_id: Option<Uuid>,
    ) -> Result<Option<Uuid>, ModelError> {
        let previous = self.joint(joint_id)?.body;
        let new_body = match body_id {
            Some(id) => Some(self.bodies.get(&id).ok_or(ModelError::BodyNotFound(id))?),
            None => None,
        };
        if previous.is_some() && previous == body_id {
            return Ok(previous);
        }

        if let Some(owner) = new_body.and_then(|b| b.joint)
            && let Some(owner_joint) = self.joints.get_mut(&owner)
        {
            tracing::debug!("Detached body from joint '{}'", owner_joint.name);
            owner_joint.body = None;
        }
        if let Some(old) = previous
            && let Some(old_body) = self.bodies.get_mut(&old)
        {
            tracing::debug!("Released body '{}'", old_body.name);
            old_body.joint = None;
        }

        let inertial = match body_id.and_then(|id| self.bodies.get_mut(&id)) {
            Some(body) => {
                body.joint = Some(joint_id);
                Some(body.inertial)
            }
            None => None,
        };
        let joint = self.joint_mut(joint_id)?;
        joint.body = body_id;
        if let Some(inertial) = inertial {
            joint.set_inertial(inertial);
            tracing::debug!("Attached body to joint '{}'", joint.name);
        }
        Ok(previous)
    }

    /// Body attached to a joint
    pub fn attached_body(&self, joint_id: Uuid) -> Result<Option<&Body>, ModelError> {
        Ok(self
            .joint(joint_id)?
            .body
            .and_then(|body_id| self.bodies.get(&body_id)))
    }

    /// Set a body's inertial parameters and mirror them on its joint
    pub fn set_body_inertial(&mut self, body_id: Uuid, inertial: Inertial) -> Result<(), ModelError> {
        let body = self
            .bodies
            .get_mut(&body_id)
            .ok_or(ModelError::BodyNotFound(body_id))?;
        check_inertial(&inertial)?;
        body.inertial = inertial;
        if let Some(joint_id) = body.joint
            && let Some(joint) = self.joints.get_mut(&joint_id)
        {
            joint.set_inertial(inertial);
        }
        Ok(())
    }

    /// Remove a body from the tree, detaching it from its joint
    pub fn remove_body(&mut self, body_id: Uuid) -> Result<Body, ModelError> {
        let mut body = self
            .bodies
            .remove(&body_id)
            .ok_or(ModelError::BodyNotFound(body_id))?;
        if let Some(joint_id) = body.joint.take()
            && let Some(joint) = self.joints.get_mut(&joint_id)
        {
            joint.body = None;
        }
        Ok(body)
    }

    // ============== Validation ==============

    /// Validate the tree
    pub fn validate(&self) -> Result<(), Vec<ModelError>> {
        let mut errors = Vec::new();

        for (id, joint) in &self.joints {
            if let Some(parent_id) = joint.parent {
                match self.joints.get(&parent_id) {
                    Some(parent) => {
                        let occurrences = parent.children.iter().filter(|c| *c == id).count();
                        if occurrences != 1 {
                            errors.push(ModelError::InconsistentLink(*id));
                        }
                    }
                    None => errors.push(ModelError::JointNotFound(parent_id)),
                }
            }

            for child_id in &joint.children {
                match self.joints.get(child_id) {
                    Some(child) if child.parent == Some(*id) => {}
                    Some(_) => errors.push(ModelError::InconsistentLink(*child_id)),
                    None => errors.push(ModelError::JointNotFound(*child_id)),
                }
            }

            if let Some(body_id) = joint.body {
                match self.bodies.get(&body_id) {
                    Some(body) if body.joint == Some(*id) => {}
                    Some(_) => errors.push(ModelError::InconsistentLink(*id)),
                    None => errors.push(ModelError::BodyNotFound(body_id)),
                }
            }

            for dof in joint.bounds().iter() {
                if let Err(e) = check_range(dof.lower, dof.upper) {
                    errors.push(e);
                }
            }
        }

        for body in self.bodies.values() {
            if let Some(joint_id) = body.joint
                && self.joints.get(&joint_id).and_then(|j| j.body) != Some(body.id)
            {
                errors.push(ModelError::InconsistentLink(joint_id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_inertial(inertial: &Inertial) -> Result<(), ModelError> {
    let i = &inertial.inertia;
    let values = [
        inertial.mass,
        inertial.com.x,
        inertial.com.y,
        inertial.com.z,
        i.ixx,
        i.iyy,
        i.izz,
        i.ixy,
        i.ixz,
        i.iyz,
    ];
    if values.iter().any(|v| v.is_nan()) {
        tracing::warn!("Refused inertial parameters containing NaN");
        return Err(ModelError::NotANumber);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// root -> j1 -> j2
    fn chain() -> (KinematicTree, Uuid, Uuid, Uuid) {
        let mut tree = KinematicTree::new();
        let root = tree.add_joint(Joint::anchor("root")).unwrap();
        let j1 = tree.add_joint(Joint::generic("j1", 1)).unwrap();
        let j2 = tree.add_joint(Joint::generic("j2", 1)).unwrap();
        tree.add_child_joint(root, j1).unwrap();
        tree.add_child_joint(j1, j2).unwrap();
        (tree, root, j1, j2)
    }

    #[test]
    fn test_add_child_joint() {
        let mut tree = KinematicTree::new();
        let parent = tree.add_joint(Joint::anchor("base")).unwrap();
        let a = tree.add_joint(Joint::generic("a", 1)).unwrap();
        let b = tree.add_joint(Joint::generic("b", 2)).unwrap();

        assert_eq!(tree.parent_joint(a).unwrap(), None);
        tree.add_child_joint(parent, a).unwrap();
        assert_eq!(tree.count_child_joints(parent).unwrap(), 1);
        tree.add_child_joint(parent, b).unwrap();
        assert_eq!(tree.count_child_joints(parent).unwrap(), 2);

        assert_eq!(tree.parent_joint(a).unwrap(), Some(parent));
        assert_eq!(tree.parent_joint(b).unwrap(), Some(parent));
        assert_eq!(tree.child_joint(parent, 0).unwrap(), a);
        assert_eq!(tree.child_joint(parent, 1).unwrap(), b);
        assert!(tree.child_joint(parent, 2).unwrap_err().is_range());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_already_parented_refused() {
        let (mut tree, root, j1, j2) = chain();
        let other = tree.add_joint(Joint::anchor("other")).unwrap();

        let err = tree.add_child_joint(other, j2).unwrap_err();
        assert_eq!(err, ModelError::AlreadyHasParent(j2));
        assert!(err.is_invariant());

        assert_eq!(tree.count_child_joints(other).unwrap(), 0);
        assert_eq!(tree.parent_joint(j2).unwrap(), Some(j1));
        assert_eq!(tree.joint(j1).unwrap().children(), &[j2]);
        assert_eq!(tree.count_child_joints(root).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_child_refused() {
        let (mut tree, root, j1, _) = chain();
        let err = tree.add_child_joint(root, j1).unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateChild {
                parent: root,
                child: j1
            }
        );
        assert_eq!(tree.count_child_joints(root).unwrap(), 1);
    }

    #[test]
    fn test_cycle_refused() {
        let (mut tree, root, j1, j2) = chain();

        let err = tree.add_child_joint(j2, root).unwrap_err();
        assert_eq!(err, ModelError::WouldCreateCycle);
        assert!(err.is_invariant());

        assert_eq!(tree.parent_joint(root).unwrap(), None);
        assert_eq!(tree.count_child_joints(j2).unwrap(), 0);
        assert_eq!(tree.child_joint(root, 0).unwrap(), j1);
        assert_eq!(tree.child_joint(j1, 0).unwrap(), j2);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_self_parent_refused() {
        let mut tree = KinematicTree::new();
        let j = tree.add_joint(Joint::generic("j", 1)).unwrap();
        assert_eq!(
            tree.add_child_joint(j, j),
            Err(ModelError::WouldCreateCycle)
        );
    }

    #[test]
    fn test_unknown_joint() {
        let mut tree = KinematicTree::new();
        let j = tree.add_joint(Joint::generic("j", 1)).unwrap();
        let missing = Uuid::new_v4();
        assert_eq!(
            tree.add_child_joint(j, missing),
            Err(ModelError::JointNotFound(missing))
        );
        assert!(tree.parent_joint(missing).is_err());
    }

    #[test]
    fn test_bounds_through_tree() {
        let (mut tree, root, j1, _) = chain();
        tree.joint_mut(j1).unwrap().set_bounds(0, -1.0, 1.0).unwrap();
        let joint = tree.joint(j1).unwrap();
        assert!(joint.is_bounded(0).unwrap());
        assert_eq!(joint.lower_bound(0).unwrap(), -1.0);
        assert_eq!(joint.upper_bound(0).unwrap(), 1.0);

        let anchor = tree.joint_mut(root).unwrap();
        assert!(anchor.set_bounded(0, true).unwrap_err().is_range());
    }

    #[test]
    fn test_config_velocity_default() {
        let config = ModelConfig {
            default_velocity_bound: 3.0,
            ..ModelConfig::default()
        };
        let mut tree = KinematicTree::with_config(config);
        let a = tree.create_joint(Joint::builder("a").dof(2)).unwrap();
        let b = tree
            .create_joint(Joint::builder("b").velocity_bound(1.0))
            .unwrap();
        assert_eq!(tree.joint(a).unwrap().velocity_bounds(1).unwrap(), (-3.0, 3.0));
        assert_eq!(tree.joint(b).unwrap().velocity_bounds(0).unwrap(), (-1.0, 1.0));
    }

    #[test]
    fn test_attach_body() {
        let (mut tree, _, j1, _) = chain();
        let b1 = tree.add_body(Body::new("b1")).unwrap();
        let b2 = tree.add_body(Body::new("b2")).unwrap();

        assert_eq!(tree.set_attached_body(j1, Some(b1)).unwrap(), None);
        assert_eq!(tree.attached_body(j1).unwrap().map(|b| b.id), Some(b1));

        assert_eq!(tree.set_attached_body(j1, Some(b2)).unwrap(), Some(b1));
        assert_eq!(tree.attached_body(j1).unwrap().map(|b| b.id), Some(b2));
        // Released, not destroyed
        assert_eq!(tree.get_body(b1).unwrap().joint(), None);
        assert_eq!(tree.get_body(b2).unwrap().joint(), Some(j1));

        assert_eq!(tree.set_attached_body(j1, None).unwrap(), Some(b2));
        assert!(tree.attached_body(j1).unwrap().is_none());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_reattach_body_moves_ownership() {
        let (mut tree, _, j1, j2) = chain();
        let body = tree.add_body(Body::new("link")).unwrap();
        tree.set_attached_body(j1, Some(body)).unwrap();
        tree.set_attached_body(j2, Some(body)).unwrap();

        assert!(tree.attached_body(j1).unwrap().is_none());
        assert_eq!(tree.joint(j2).unwrap().attached_body(), Some(body));
        assert_eq!(tree.get_body(body).unwrap().joint(), Some(j2));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_readd_attached_body_refused() {
        let (mut tree, _, j1, j2) = chain();
        let original = Body::solid_box("link", 4.0, DVec3::ONE);
        let body = tree.add_body(original.clone()).unwrap();
        tree.set_attached_body(j1, Some(body)).unwrap();

        let err = tree.add_body(original).unwrap_err();
        assert_eq!(err, ModelError::DuplicateHandle(body));
        assert!(err.is_invariant());
        assert_eq!(tree.body_count(), 1);
        assert_eq!(tree.get_body(body).unwrap().joint(), Some(j1));

        // Ownership still moves as a whole
        tree.set_attached_body(j2, Some(body)).unwrap();
        assert!(tree.joint(j1).unwrap().attached_body().is_none());
        assert_eq!(tree.joint(j2).unwrap().attached_body(), Some(body));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_readd_joint_refused() {
        let (mut tree, root, j1, j2) = chain();
        let mut copy = Joint::anchor("copy");
        copy.id = j1;

        assert_eq!(tree.add_joint(copy), Err(ModelError::DuplicateHandle(j1)));
        assert_eq!(tree.joint_count(), 3);
        let joint = tree.get_joint(j1).unwrap();
        assert_eq!(joint.name(), "j1");
        assert_eq!(joint.parent_joint(), Some(root));
        assert_eq!(joint.children(), &[j2]);
        assert!(tree.find_joint_by_name("copy").is_none());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_broken_body_link() {
        let (mut tree, _, j1, _) = chain();
        let body = tree.add_body(Body::new("link")).unwrap();
        tree.set_attached_body(j1, Some(body)).unwrap();
        assert!(tree.validate().is_ok());

        // Joint still points at the body, body no longer points back
        if let Some(b) = tree.bodies.get_mut(&body) {
            b.joint = None;
        }
        assert_eq!(tree.validate(), Err(vec![ModelError::InconsistentLink(j1)]));

        let stray = Body::new("stray");
        let stray_id = stray.id;
        tree.bodies.insert(stray_id, Body { joint: Some(j1), ..stray });
        if let Some(b) = tree.bodies.get_mut(&body) {
            b.joint = Some(j1);
        }
        assert_eq!(tree.validate(), Err(vec![ModelError::InconsistentLink(j1)]));
    }

    #[test]
    fn test_attach_unknown_body() {
        let (mut tree, _, j1, _) = chain();
        let missing = Uuid::new_v4();
        assert_eq!(
            tree.set_attached_body(j1, Some(missing)),
            Err(ModelError::BodyNotFound(missing))
        );
    }

    #[test]
    fn test_remove_body() {
        let (mut tree, _, j1, _) = chain();
        let body = tree.add_body(Body::new("link")).unwrap();
        tree.set_attached_body(j1, Some(body)).unwrap();

        let removed = tree.remove_body(body).unwrap();
        assert_eq!(removed.name, "link");
        assert_eq!(removed.joint(), None);
        assert!(tree.joint(j1).unwrap().attached_body().is_none());
        assert!(tree.remove_body(body).is_err());
    }

    #[test]
    fn test_inertial_sync_with_body() {
        let (mut tree, _, j1, _) = chain();
        let body = tree
            .add_body(Body::solid_box("box", 12.0, DVec3::new(1.0, 2.0, 3.0)))
            .unwrap();

        tree.set_attached_body(j1, Some(body)).unwrap();
        assert_eq!(tree.joint(j1).unwrap().mass(), 12.0);
        assert_relative_eq!(tree.joint(j1).unwrap().inertia().ixx, 13.0);

        tree.set_mass(j1, 2.0).unwrap();
        tree.set_com(j1, DVec3::new(0.0, 0.0, 0.1)).unwrap();
        let body_ref = tree.get_body(body).unwrap();
        assert_eq!(body_ref.mass(), 2.0);
        assert_eq!(body_ref.com(), DVec3::new(0.0, 0.0, 0.1));

        tree.set_body_inertial(body, Inertial::default()).unwrap();
        assert_eq!(tree.joint(j1).unwrap().mass(), 0.0);
    }

    #[test]
    fn test_nan_inertial_refused() {
        let (mut tree, _, j1, _) = chain();
        let body = tree.add_body(Body::solid_box("box", 5.0, DVec3::ONE)).unwrap();
        tree.set_attached_body(j1, Some(body)).unwrap();

        assert_eq!(tree.set_mass(j1, f64::NAN), Err(ModelError::NotANumber));
        assert_eq!(
            tree.set_com(j1, DVec3::new(0.0, f64::NAN, 0.0)),
            Err(ModelError::NotANumber)
        );
        let mut inertia = tree.joint(j1).unwrap().inertia();
        inertia.ixz = f64::NAN;
        assert_eq!(tree.set_inertia(j1, inertia), Err(ModelError::NotANumber));
        let nan_mass = Inertial {
            mass: f64::NAN,
            ..Inertial::default()
        };
        assert_eq!(
            tree.set_body_inertial(body, nan_mass),
            Err(ModelError::NotANumber)
        );

        let joint = tree.joint(j1).unwrap();
        assert_eq!(joint.mass(), 5.0);
        assert_eq!(joint.com(), DVec3::ZERO);
        assert_eq!(joint.inertia().ixz, 0.0);
        assert_eq!(tree.get_body(body).unwrap().mass(), 5.0);
    }

    #[test]
    fn test_non_rigid_placement_refused() {
        let (mut tree, _, j1, _) = chain();
        let scaled = DMat4::from_scale(DVec3::splat(2.0));
        assert_eq!(
            tree.set_placement(j1, scaled),
            Err(ModelError::NonRigidPlacement(j1))
        );
        assert_eq!(tree.placement(j1).unwrap(), DMat4::IDENTITY);

        let err = tree
            .add_joint(Joint::builder("bad").placement(scaled).build())
            .unwrap_err();
        assert!(matches!(err, ModelError::NonRigidPlacement(_)));

        let mut lenient = KinematicTree::with_config(ModelConfig {
            validate_placements: false,
            ..ModelConfig::default()
        });
        assert!(
            lenient
                .add_joint(Joint::builder("scaled").placement(scaled).build())
                .is_ok()
        );
    }

    #[test]
    fn test_non_homogeneous_placement_refused_when_lenient() {
        let mut lenient = KinematicTree::with_config(ModelConfig {
            validate_placements: false,
            ..ModelConfig::default()
        });
        let j = lenient.add_joint(Joint::generic("j", 1)).unwrap();
        let mut projective = DMat4::IDENTITY;
        projective.x_axis.w = 0.5;

        assert_eq!(
            lenient.set_placement(j, projective),
            Err(ModelError::NonRigidPlacement(j))
        );
        assert_eq!(lenient.placement(j).unwrap(), DMat4::IDENTITY);
        assert_eq!(
            lenient.dynamics_placement(j).unwrap(),
            Matrix4::identity()
        );

        let err = lenient
            .add_joint(Joint::builder("bad").placement(projective).build())
            .unwrap_err();
        assert!(matches!(err, ModelError::NonRigidPlacement(_)));
        assert_eq!(lenient.joint_count(), 1);

        let mut dynamics = Matrix4::identity();
        dynamics[(3, 0)] = 0.5;
        assert_eq!(
            lenient.set_dynamics_placement(j, &dynamics),
            Err(ModelError::NonRigidPlacement(j))
        );
    }

    #[test]
    fn test_dynamics_placement_mirror() {
        let (mut tree, _, j1, _) = chain();
        let placement = DMat4::from_rotation_translation(
            glam::DQuat::from_rotation_z(0.7),
            DVec3::new(0.0, 0.2, 0.4),
        );
        tree.set_placement(j1, placement).unwrap();
        let dynamics = tree.dynamics_placement(j1).unwrap();
        assert_relative_eq!(dynamics[(1, 3)], 0.2);
        assert_relative_eq!(dynamics[(2, 3)], 0.4);

        let (mut other, _, _, j2) = chain();
        other.set_dynamics_placement(j2, &dynamics).unwrap();
        assert!(other.placement(j2).unwrap().abs_diff_eq(placement, 1e-9));
    }

    #[test]
    fn test_rename_joint() {
        let (mut tree, _, j1, _) = chain();
        tree.rename_joint(j1, "shoulder").unwrap();
        assert_eq!(tree.joint(j1).unwrap().name(), "shoulder");
        assert_eq!(tree.find_joint_id_by_name("shoulder"), Some(j1));
        assert!(tree.find_joint_by_name("j1").is_none());
    }
}
