//! Conversion between geometric and dynamics homogeneous matrices
//!
//! The geometric layer (placement editing, visualization) stores transforms
//! as column-major [`DMat4`]. The dynamics layer works with nalgebra's
//! [`Matrix4`]. Both describe the same 4x4 homogeneous matrix, element
//! `(row, col)` maps to `(row, col)`.
//!
//! The conversions copy elements and never inspect them. Callers that need
//! a homogeneous transform check it with [`is_homogeneous`] first; the
//! kinematic tree does so for every placement it stores.

use glam::DMat4;
use nalgebra::Matrix4;

/// Convert a geometric-layer transform to the dynamics-layer convention
pub fn to_dynamics_format(matrix: &DMat4) -> Matrix4<f64> {
    Matrix4::from_column_slice(&matrix.to_cols_array())
}

/// Convert a dynamics-layer transform to the geometric-layer convention
pub fn to_geometric_format(matrix: &Matrix4<f64>) -> DMat4 {
    let mut cols = [0.0; 16];
    cols.copy_from_slice(matrix.as_slice());
    DMat4::from_cols_array(&cols)
}

/// Build a dynamics-layer transform from 16 values in row-major order
///
/// # Panics
///
/// Panics if `values` does not hold exactly 16 elements.
pub fn dynamics_from_row_slice(values: &[f64]) -> Matrix4<f64> {
    assert_eq!(
        values.len(),
        16,
        "homogeneous matrix needs 16 values, got {}",
        values.len()
    );
    Matrix4::from_row_slice(values)
}

/// Flatten a dynamics-layer transform into row-major order
pub fn dynamics_to_row_array(matrix: &Matrix4<f64>) -> [f64; 16] {
    let mut rows = [0.0; 16];
    for (i, value) in matrix.transpose().iter().enumerate() {
        rows[i] = *value;
    }
    rows
}

/// Check that `matrix` is a rigid transform: orthonormal rotation with
/// determinant +1, finite translation, bottom row `[0, 0, 0, 1]`
pub fn is_rigid_transform(matrix: &DMat4, tolerance: f64) -> bool {
    if !is_homogeneous(matrix, tolerance) {
        return false;
    }
    let rotation = glam::DMat3::from_mat4(*matrix);
    let should_be_identity = rotation.transpose() * rotation;
    if !should_be_identity.abs_diff_eq(glam::DMat3::IDENTITY, tolerance) {
        return false;
    }
    (rotation.determinant() - 1.0).abs() <= tolerance
}

/// Check that `matrix` is finite with bottom row `[0, 0, 0, 1]`
pub fn is_homogeneous(matrix: &DMat4, tolerance: f64) -> bool {
    matrix.is_finite() && has_homogeneous_row_within(matrix, tolerance)
}

fn has_homogeneous_row_within(matrix: &DMat4, tolerance: f64) -> bool {
    let row = matrix.row(3);
    row.abs_diff_eq(glam::DVec4::new(0.0, 0.0, 0.0, 1.0), tolerance)
}
