//! Per-cell and per-face fields over an unstructured mesh.
//!
//! The surrounding solver owns the real field and mesh runtime. The closure
//! models only need to read cell values, write patch values and move values
//! to faces, so this module provides exactly that:
//!
//! - [`Mesh`]: cell volumes and centres, internal faces, boundary patches and
//!   wall geometry.
//! - [`VolField`]: one value per cell plus one value per boundary face.
//! - [`SurfaceField`]: one value per internal face plus one per boundary face.
//! - [`interpolate`], [`flux`], [`curl`] and [`zero_gradient_walls`] operators.
//!
//! Elementwise kernels run in parallel over cells with [`rayon`]. Each cell is
//! computed independently, so results do not depend on scheduling.

mod fvc;
mod mesh;
mod value;

#[cfg(test)]
pub(crate) mod test_support;

pub use fvc::{curl, flux, interpolate, zero_gradient_walls};
pub use mesh::{InternalFace, Mesh, MeshError, NO_WALL_DISTANCE, Patch, PatchKind, WallGeometry};
pub use value::{FieldValue, SymmTensor, Vector, symm_outer};

use std::ops::Index;

use rayon::prelude::*;

/// Where a field value lives: in a cell or on a boundary face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Cell(usize),
    Boundary { patch: usize, face: usize },
}

/// A cell-centred field with boundary values on every patch.
#[derive(Debug, Clone, PartialEq)]
pub struct VolField<T> {
    internal: Vec<T>,
    boundary: Vec<Vec<T>>,
}

impl<T: FieldValue> VolField<T> {
    /// Creates a field with the same value in every cell and on every boundary face.
    #[must_use]
    pub fn uniform(mesh: &Mesh, value: T) -> Self {
        Self {
            internal: vec![value; mesh.n_cells()],
            boundary: mesh.patches().iter().map(|p| vec![value; p.len()]).collect(),
        }
    }

    /// Creates a field with all values zero.
    #[must_use]
    pub fn zeros(mesh: &Mesh) -> Self {
        Self::uniform(mesh, T::zero())
    }

    /// Creates a field from cell values, copying each owner cell value onto
    /// its boundary faces.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if `internal` does not have one value per cell.
    pub fn from_internal(mesh: &Mesh, internal: Vec<T>) -> Result<Self, MeshError> {
        if internal.len() != mesh.n_cells() {
            return Err(MeshError::FieldSize {
                what: "cell values",
                found: internal.len(),
                expected: mesh.n_cells(),
            });
        }
        let boundary = mesh
            .patches()
            .iter()
            .map(|p| p.face_cells.iter().map(|&c| internal[c]).collect())
            .collect();
        Ok(Self { internal, boundary })
    }

    /// Creates a field from cell values and explicit boundary values.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if the value counts do not match the mesh.
    pub fn from_parts(mesh: &Mesh, internal: Vec<T>, boundary: Vec<Vec<T>>) -> Result<Self, MeshError> {
        let mut field = Self::from_internal(mesh, internal)?;
        if boundary.len() != mesh.patches().len() {
            return Err(MeshError::FieldSize {
                what: "boundary patches",
                found: boundary.len(),
                expected: mesh.patches().len(),
            });
        }
        for (patch, values) in mesh.patches().iter().zip(&boundary) {
            if values.len() != patch.len() {
                return Err(MeshError::PatchSize {
                    patch: patch.name.clone(),
                    what: "boundary values",
                    found: values.len(),
                    expected: patch.len(),
                });
            }
        }
        field.boundary = boundary;
        Ok(field)
    }

    /// Builds a field with the layout of `shape` by evaluating `f` at every location.
    ///
    /// Used for kernels that read several fields at once.
    #[must_use]
    pub fn tabulate<S, F>(shape: &VolField<S>, f: F) -> Self
    where
        F: Fn(Location) -> T + Send + Sync,
    {
        Self {
            internal: (0..shape.internal.len())
                .into_par_iter()
                .map(|cell| f(Location::Cell(cell)))
                .collect(),
            boundary: shape
                .boundary
                .iter()
                .enumerate()
                .map(|(patch, values)| {
                    (0..values.len())
                        .map(|face| f(Location::Boundary { patch, face }))
                        .collect()
                })
                .collect(),
        }
    }

    /// Applies `f` to every cell and boundary value.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> VolField<U>
    where
        U: FieldValue,
        F: Fn(T) -> U + Send + Sync,
    {
        VolField {
            internal: self.internal.par_iter().map(|&a| f(a)).collect(),
            boundary: self
                .boundary
                .iter()
                .map(|patch| patch.iter().map(|&a| f(a)).collect())
                .collect(),
        }
    }

    /// Combines two fields value by value.
    #[must_use]
    pub fn zip_map<U, V, F>(&self, other: &VolField<U>, f: F) -> VolField<V>
    where
        U: FieldValue,
        V: FieldValue,
        F: Fn(T, U) -> V + Send + Sync,
    {
        debug_assert_eq!(self.internal.len(), other.internal.len());
        VolField {
            internal: self
                .internal
                .par_iter()
                .zip(other.internal.par_iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            boundary: self
                .boundary
                .iter()
                .zip(&other.boundary)
                .map(|(pa, pb)| pa.iter().zip(pb).map(|(&a, &b)| f(a, b)).collect())
                .collect(),
        }
    }

    /// Combines three fields value by value.
    #[must_use]
    pub fn zip3_map<U, V, W, F>(&self, second: &VolField<U>, third: &VolField<V>, f: F) -> VolField<W>
    where
        U: FieldValue,
        V: FieldValue,
        W: FieldValue,
        F: Fn(T, U, V) -> W + Send + Sync,
    {
        debug_assert_eq!(self.internal.len(), second.internal.len());
        debug_assert_eq!(self.internal.len(), third.internal.len());
        VolField {
            internal: self
                .internal
                .par_iter()
                .zip(second.internal.par_iter())
                .zip(third.internal.par_iter())
                .map(|((&a, &b), &c)| f(a, b, c))
                .collect(),
            boundary: self
                .boundary
                .iter()
                .zip(&second.boundary)
                .zip(&third.boundary)
                .map(|((pa, pb), pc)| {
                    pa.iter()
                        .zip(pb)
                        .zip(pc)
                        .map(|((&a, &b), &c)| f(a, b, c))
                        .collect()
                })
                .collect(),
        }
    }

    /// Values in cells.
    #[must_use]
    pub fn internal(&self) -> &[T] {
        &self.internal
    }

    /// Values on the faces of every patch, in patch order.
    #[must_use]
    pub fn boundary(&self) -> &[Vec<T>] {
        &self.boundary
    }

    /// Values on the faces of one patch.
    #[must_use]
    pub fn patch(&self, patch: usize) -> &[T] {
        &self.boundary[patch]
    }

    pub(crate) fn patch_mut(&mut self, patch: usize) -> &mut [T] {
        &mut self.boundary[patch]
    }
}

impl<T> Index<Location> for VolField<T> {
    type Output = T;

    fn index(&self, at: Location) -> &T {
        match at {
            Location::Cell(cell) => &self.internal[cell],
            Location::Boundary { patch, face } => &self.boundary[patch][face],
        }
    }
}

impl VolField<f64> {
    /// Returns `max(self, floor)` everywhere.
    #[must_use]
    pub fn floored(&self, floor: f64) -> Self {
        self.map(|a| a.max(floor))
    }

    /// Returns `self` clamped to `[lo, hi]` everywhere.
    #[must_use]
    pub fn clamped(&self, lo: f64, hi: f64) -> Self {
        self.map(|a| a.clamp(lo, hi))
    }
}

impl<T: FieldValue> std::ops::Add for &VolField<T> {
    type Output = VolField<T>;

    fn add(self, rhs: Self) -> VolField<T> {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl<T: FieldValue> std::ops::Mul<&VolField<f64>> for &VolField<T> {
    type Output = VolField<T>;

    fn mul(self, rhs: &VolField<f64>) -> VolField<T> {
        self.zip_map(rhs, |a, s| a * s)
    }
}

/// A face field: one value per internal face plus one per boundary face.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceField<T> {
    internal: Vec<T>,
    boundary: Vec<Vec<T>>,
}

impl<T: FieldValue> SurfaceField<T> {
    /// Creates a face field with the same value everywhere.
    #[must_use]
    pub fn uniform(mesh: &Mesh, value: T) -> Self {
        Self {
            internal: vec![value; mesh.n_internal_faces()],
            boundary: mesh.patches().iter().map(|p| vec![value; p.len()]).collect(),
        }
    }

    /// Applies `f` to every face value.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> SurfaceField<U>
    where
        U: FieldValue,
        F: Fn(T) -> U + Send + Sync,
    {
        SurfaceField {
            internal: self.internal.par_iter().map(|&a| f(a)).collect(),
            boundary: self
                .boundary
                .iter()
                .map(|patch| patch.iter().map(|&a| f(a)).collect())
                .collect(),
        }
    }

    /// Combines two face fields value by value.
    #[must_use]
    pub fn zip_map<U, V, F>(&self, other: &SurfaceField<U>, f: F) -> SurfaceField<V>
    where
        U: FieldValue,
        V: FieldValue,
        F: Fn(T, U) -> V + Send + Sync,
    {
        debug_assert_eq!(self.internal.len(), other.internal.len());
        SurfaceField {
            internal: self
                .internal
                .par_iter()
                .zip(other.internal.par_iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            boundary: self
                .boundary
                .iter()
                .zip(&other.boundary)
                .map(|(pa, pb)| pa.iter().zip(pb).map(|(&a, &b)| f(a, b)).collect())
                .collect(),
        }
    }

    /// Values on internal faces.
    #[must_use]
    pub fn internal(&self) -> &[T] {
        &self.internal
    }

    /// Values on the faces of one patch.
    #[must_use]
    pub fn patch(&self, patch: usize) -> &[T] {
        &self.boundary[patch]
    }
}

impl<T: FieldValue> std::ops::Add for &SurfaceField<T> {
    type Output = SurfaceField<T>;

    fn add(self, rhs: Self) -> SurfaceField<T> {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl<T: FieldValue> std::ops::Mul<&SurfaceField<f64>> for &SurfaceField<T> {
    type Output = SurfaceField<T>;

    fn mul(self, rhs: &SurfaceField<f64>) -> SurfaceField<T> {
        self.zip_map(rhs, |a, s| a * s)
    }
}
