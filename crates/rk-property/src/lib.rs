//! RK Joint Properties
//!
//! Adapter exposing the inertial attributes of a joint to property-based
//! editors:
//! - JointPropertyId: attribute enum with its stable `(id, string id)` pair
//! - PropertyBinding: one attribute bound to a joint, with its current value
//! - PropertySheet: fill, edit and change notification for one joint

pub mod error;
pub mod id;
pub mod sheet;

pub use error::*;
pub use id::*;
pub use sheet::*;
