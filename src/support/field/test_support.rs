//! Small meshes shared by unit tests.

use super::{InternalFace, Mesh, Patch, PatchKind, Vector};

/// A unit-square channel split into `n` layers stacked in `y`.
///
/// Patches, in order: `lowerWall` (wall at `y = 0`), `upperWall`
/// (wall at `y = 1`), `inlet` (plain patch at `x = 0`, one face per cell).
pub(crate) fn channel(n: usize) -> Mesh {
    let h = 1.0 / n as f64;
    let centre = |i: usize| Vector::new(0.5, (i as f64 + 0.5) * h, 0.5);

    let faces = (0..n.saturating_sub(1))
        .map(|i| InternalFace {
            owner: i,
            neighbour: i + 1,
            area: Vector::y(),
            weight: 0.5,
        })
        .collect();

    let patches = vec![
        Patch {
            name: "lowerWall".into(),
            kind: PatchKind::Wall,
            face_cells: vec![0],
            face_areas: vec![-Vector::y()],
            face_centres: vec![Vector::new(0.5, 0.0, 0.5)],
        },
        Patch {
            name: "upperWall".into(),
            kind: PatchKind::Wall,
            face_cells: vec![n - 1],
            face_areas: vec![Vector::y()],
            face_centres: vec![Vector::new(0.5, 1.0, 0.5)],
        },
        Patch {
            name: "inlet".into(),
            kind: PatchKind::Patch,
            face_cells: (0..n).collect(),
            face_areas: vec![Vector::new(-h, 0.0, 0.0); n],
            face_centres: (0..n).map(|i| Vector::new(0.0, centre(i).y, 0.5)).collect(),
        },
    ];

    Mesh::new(vec![h; n], (0..n).map(centre).collect(), faces, patches)
        .expect("channel mesh is consistent")
}
