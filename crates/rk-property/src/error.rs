//! Property adapter errors

use rk_model::ModelError;

use crate::id::JointPropertyId;

/// Property-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    /// No attribute has this string id
    #[error("Unknown property: {0}")]
    UnknownProperty(String),
    /// No attribute has this numeric id
    #[error("Unknown property id: {0}")]
    UnknownPropertyId(u32),
    /// NaN written to an attribute
    #[error("Property {0} cannot be set to NaN")]
    NotANumber(&'static str),
    /// The underlying model refused the operation
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PropertyError {
    pub(crate) fn not_a_number(id: JointPropertyId) -> Self {
        PropertyError::NotANumber(id.string_id())
    }
}
