//! Error types for the kinematic model

use uuid::Uuid;

/// Broad classification of a [`ModelError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An index (DOF rank or child rank) outside its valid range
    Range,
    /// The operation would break a tree or bound invariant
    Invariant,
    /// A handle that does not name anything in the tree
    NotFound,
}

/// Kinematic model errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("DOF index out of range: rank {rank} on joint '{joint}' with {dof_count} DOF")]
    DofOutOfRange {
        joint: String,
        rank: usize,
        dof_count: usize,
    },
    #[error("Child index out of range: rank {rank} on joint '{joint}' with {count} children")]
    ChildOutOfRange {
        joint: String,
        rank: usize,
        count: usize,
    },
    #[error("Joint not found: {0}")]
    JointNotFound(Uuid),
    #[error("Body not found: {0}")]
    BodyNotFound(Uuid),
    #[error("Joint already has a parent: {0}")]
    AlreadyHasParent(Uuid),
    #[error("Joint {child} is already a child of {parent}")]
    DuplicateChild { parent: Uuid, child: Uuid },
    #[error("Connection would create a cycle")]
    WouldCreateCycle,
    #[error("Inverted bounds: lower {lower} is greater than upper {upper}")]
    InvertedBounds { lower: f64, upper: f64 },
    #[error("Bound value is not a number")]
    NotANumber,
    #[error("Placement of joint {0} is not a rigid transform")]
    NonRigidPlacement(Uuid),
    #[error("Parent and child links disagree for joint {0}")]
    InconsistentLink(Uuid),
    #[error("Handle already registered: {0}")]
    DuplicateHandle(Uuid),
}

impl ModelError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::DofOutOfRange { .. } | ModelError::ChildOutOfRange { .. } => {
                ErrorKind::Range
            }
            ModelError::JointNotFound(_) | ModelError::BodyNotFound(_) => ErrorKind::NotFound,
            ModelError::AlreadyHasParent(_)
            | ModelError::DuplicateChild { .. }
            | ModelError::WouldCreateCycle
            | ModelError::InvertedBounds { .. }
            | ModelError::NotANumber
            | ModelError::NonRigidPlacement(_)
            | ModelError::InconsistentLink(_)
            | ModelError::DuplicateHandle(_) => ErrorKind::Invariant,
        }
    }

    /// Whether this is an index range error
    pub fn is_range(&self) -> bool {
        self.kind() == ErrorKind::Range
    }

    /// Whether this is an invariant violation
    pub fn is_invariant(&self) -> bool {
        self.kind() == ErrorKind::Invariant
    }
}
