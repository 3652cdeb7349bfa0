//! Property sheet binding a joint's attributes to an editor

use rk_model::{Joint, KinematicTree};
use uuid::Uuid;

use crate::error::PropertyError;
use crate::id::JointPropertyId;

/// One attribute of a joint, as handed to a property editor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyBinding {
    /// Attribute
    pub id: JointPropertyId,
    /// Current value
    pub value: f64,
}

impl PropertyBinding {
    /// Bind an attribute to a value
    pub fn new(id: JointPropertyId, value: f64) -> Self {
        Self { id, value }
    }

    /// Stable numeric identifier of the attribute
    pub fn numeric_id(&self) -> u32 {
        self.id.numeric_id()
    }

    /// Stable string identifier of the attribute
    pub fn string_id(&self) -> &'static str {
        self.id.string_id()
    }
}

/// Observer notified after a property change has been applied
pub trait PropertyListener {
    /// Called once per applied change
    fn property_changed(&mut self, joint: Uuid, binding: &PropertyBinding);
}

/// Full property list of a joint, in table order
pub fn fill_property_list(
    tree: &KinematicTree,
    joint_id: Uuid,
) -> Result<Vec<PropertyBinding>, PropertyError> {
    let inertial = tree.joint(joint_id)?.inertial();
    Ok(JointPropertyId::all()
        .into_iter()
        .map(|id| PropertyBinding::new(id, id.read(inertial)))
        .collect())
}

/// Whether editors may duplicate this joint
pub fn is_component_clonable(joint: &Joint) -> bool {
    joint.kind().is_clonable()
}

/// Editable view of one joint's properties
pub struct PropertySheet<'a> {
    tree: &'a mut KinematicTree,
    joint_id: Uuid,
    listeners: Vec<Box<dyn PropertyListener + 'a>>,
}

impl<'a> PropertySheet<'a> {
    /// Open the sheet of a joint
    pub fn new(tree: &'a mut KinematicTree, joint_id: Uuid) -> Result<Self, PropertyError> {
        tree.joint(joint_id)?;
        Ok(Self {
            tree,
            joint_id,
            listeners: Vec::new(),
        })
    }

    /// Joint this sheet edits
    pub fn joint_id(&self) -> Uuid {
        self.joint_id
    }

    /// Register an observer of applied changes
    pub fn add_listener(&mut self, listener: impl PropertyListener + 'a) {
        self.listeners.push(Box::new(listener));
    }

    /// Full property list of the joint, in table order
    pub fn fill_property_list(&self) -> Result<Vec<PropertyBinding>, PropertyError> {
        fill_property_list(self.tree, self.joint_id)
    }

    /// Current value of an attribute
    pub fn get(&self, id: JointPropertyId) -> Result<f64, PropertyError> {
        Ok(id.read(self.tree.joint(self.joint_id)?.inertial()))
    }

    /// Current value of an attribute, by string identifier
    pub fn get_by_name(&self, name: &str) -> Result<f64, PropertyError> {
        let id = JointPropertyId::from_string_id(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
        self.get(id)
    }

    /// Set an attribute and apply it to the joint
    pub fn set(&mut self, id: JointPropertyId, value: f64) -> Result<(), PropertyError> {
        self.modified_property(&PropertyBinding::new(id, value))
    }

    /// Set an attribute by string identifier
    pub fn set_by_name(&mut self, name: &str, value: f64) -> Result<(), PropertyError> {
        let id = JointPropertyId::from_string_id(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
        self.set(id, value)
    }

    /// Set an attribute by numeric identifier
    pub fn set_by_numeric_id(&mut self, numeric_id: u32, value: f64) -> Result<(), PropertyError> {
        let id = JointPropertyId::from_numeric_id(numeric_id)
            .ok_or(PropertyError::UnknownPropertyId(numeric_id))?;
        self.set(id, value)
    }

    /// Apply a binding edited by the editor
    ///
    /// The joint's inertial parameters, and through them its attached
    /// body, are re-derived from the new value; listeners are notified.
    pub fn modified_property(&mut self, binding: &PropertyBinding) -> Result<(), PropertyError> {
        if binding.value.is_nan() {
            return Err(PropertyError::not_a_number(binding.id));
        }

        let mut inertial = self.tree.inertial(self.joint_id)?;
        binding.id.write(&mut inertial, binding.value);
        self.tree.set_inertial(self.joint_id, inertial)?;
        tracing::debug!(
            "Property {} of joint {} set to {}",
            binding.string_id(),
            self.joint_id,
            binding.value
        );

        for listener in &mut self.listeners {
            listener.property_changed(self.joint_id, binding);
        }
        Ok(())
    }

    /// Apply a full property list, stopping at the first failure
    pub fn apply_property_list(&mut self, bindings: &[PropertyBinding]) -> Result<(), PropertyError> {
        for binding in bindings {
            self.modified_property(binding)?;
        }
        Ok(())
    }

    /// Whether editors may duplicate the joint
    pub fn is_component_clonable(&self) -> Result<bool, PropertyError> {
        Ok(is_component_clonable(self.tree.joint(self.joint_id)?))
    }
}
