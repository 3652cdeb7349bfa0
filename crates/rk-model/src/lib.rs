//! RK Kinematic Model
//!
//! This crate contains the kinematic structure of an articulated robot:
//! - Joint: named frame with degrees of freedom and inertial data
//! - DofBounds: per-DOF position and velocity bounds
//! - Body: rigid body attached to a joint
//! - KinematicTree: arena owning joints and bodies, wired by handles
//! - transform: conversion between geometric and dynamics matrices

pub mod body;
pub mod bounds;
pub mod config;
pub mod constants;
pub mod error;
pub mod inertia;
pub mod transform;
pub mod tree;

pub use body::*;
pub use bounds::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use inertia::*;
pub use transform::*;
pub use tree::*;
