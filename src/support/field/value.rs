use std::ops::{Add, Mul, Sub};

use nalgebra::{Matrix3, Vector3};

/// Three-component vector value of a vector field.
pub type Vector = Vector3<f64>;

/// Symmetric second-rank tensor value.
///
/// Stored as a full 3×3 matrix; constructors in this crate only ever produce
/// symmetric values (see [`symm_outer`]).
pub type SymmTensor = Matrix3<f64>;

/// Values that can be stored in a [`VolField`](super::VolField) or
/// [`SurfaceField`](super::SurfaceField) and interpolated between cells.
pub trait FieldValue:
    Copy + Send + Sync + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> + 'static
{
    /// The additive identity.
    fn zero() -> Self;
}

impl FieldValue for f64 {
    fn zero() -> Self {
        0.0
    }
}

impl FieldValue for Vector {
    fn zero() -> Self {
        Vector::zeros()
    }
}

impl FieldValue for SymmTensor {
    fn zero() -> Self {
        SymmTensor::zeros()
    }
}

/// Returns the symmetric outer product `symm(a ⊗ a)`.
#[must_use]
pub fn symm_outer(a: &Vector) -> SymmTensor {
    let outer = a * a.transpose();
    (outer + outer.transpose()) * 0.5
}
