use rayon::prelude::*;

use super::{FieldValue, Mesh, SurfaceField, Vector, VolField};

/// Linearly interpolates a cell field to faces.
///
/// Internal faces use the mesh weights, boundary faces take the field's
/// boundary values unchanged.
#[must_use]
pub fn interpolate<T: FieldValue>(mesh: &Mesh, field: &VolField<T>) -> SurfaceField<T> {
    let cells = field.internal();
    let internal = mesh
        .faces()
        .par_iter()
        .map(|face| cells[face.owner] * face.weight + cells[face.neighbour] * (1.0 - face.weight))
        .collect();

    SurfaceField {
        internal,
        boundary: field.boundary().to_vec(),
    }
}

/// Returns the face flux `interpolate(field) · Sf`.
#[must_use]
pub fn flux(mesh: &Mesh, field: &VolField<Vector>) -> SurfaceField<f64> {
    let faces = interpolate(mesh, field);
    let internal = faces
        .internal
        .par_iter()
        .zip(mesh.faces().par_iter())
        .map(|(u, face)| u.dot(&face.area))
        .collect();
    let boundary = faces
        .boundary
        .iter()
        .zip(mesh.patches())
        .map(|(values, patch)| {
            values
                .iter()
                .zip(&patch.face_areas)
                .map(|(u, sf)| u.dot(sf))
                .collect()
        })
        .collect();

    SurfaceField { internal, boundary }
}

/// Gauss curl of a cell vector field, `(1/V) Σ Sf × interpolate(field)`.
///
/// Boundary values are copied from the owner cells.
#[must_use]
pub fn curl(mesh: &Mesh, field: &VolField<Vector>) -> VolField<Vector> {
    let faces = interpolate(mesh, field);
    let mut sum = vec![Vector::zeros(); mesh.n_cells()];

    for (face, u) in mesh.faces().iter().zip(&faces.internal) {
        let sf_x_u = face.area.cross(u);
        sum[face.owner] += sf_x_u;
        sum[face.neighbour] -= sf_x_u;
    }
    for (patch, values) in mesh.patches().iter().zip(&faces.boundary) {
        for ((&cell, sf), u) in patch.face_cells.iter().zip(&patch.face_areas).zip(values) {
            sum[cell] += sf.cross(u);
        }
    }

    let internal: Vec<Vector> = sum
        .par_iter()
        .zip(mesh.cell_volumes().par_iter())
        .map(|(s, &volume)| s / volume)
        .collect();
    let boundary = mesh
        .patches()
        .iter()
        .map(|patch| patch.face_cells.iter().map(|&c| internal[c]).collect())
        .collect();

    VolField { internal, boundary }
}

/// Copies the owner cell value onto every face of every wall patch.
///
/// Closure formulas that are singular at a wall are evaluated in cells only;
/// this replaces whatever the formula produced on wall faces.
#[must_use]
pub fn zero_gradient_walls<T: FieldValue>(mesh: &Mesh, mut field: VolField<T>) -> VolField<T> {
    for (i, patch) in mesh.patches().iter().enumerate() {
        if !patch.is_wall() {
            continue;
        }
        let owner_values: Vec<T> = patch.face_cells.iter().map(|&c| field.internal()[c]).collect();
        field.patch_mut(i).copy_from_slice(&owner_values);
    }
    field
}
