use thiserror::Error;

use super::{Location, Vector};

/// Distance assigned to every cell when a mesh has no wall patches.
pub const NO_WALL_DISTANCE: f64 = 1.0e15;

/// Floor applied to computed wall distances.
const MIN_WALL_DISTANCE: f64 = 1.0e-15;

/// Errors raised when mesh connectivity or geometry is inconsistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("face {face} references cell {cell} but the mesh has {n_cells} cells")]
    CellOutOfRange {
        face: usize,
        cell: usize,
        n_cells: usize,
    },

    #[error("face {face} has interpolation weight {weight} outside [0, 1]")]
    InvalidWeight { face: usize, weight: f64 },

    #[error("patch \"{patch}\": {what} has {found} entries, expected {expected}")]
    PatchSize {
        patch: String,
        what: &'static str,
        found: usize,
        expected: usize,
    },

    #[error("{what} has {found} entries, expected {expected}")]
    FieldSize {
        what: &'static str,
        found: usize,
        expected: usize,
    },

    #[error("cell {cell} has non-positive volume {volume}")]
    NonPositiveVolume { cell: usize, volume: f64 },
}

/// Boundary condition family of a patch, as far as the closure models care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKind {
    /// Solid wall: closure fields are zero-gradient extrapolated here.
    Wall,
    /// Any other physical boundary (inlet, outlet, ...).
    Patch,
    Symmetry,
    Empty,
}

/// A face shared by two cells.
///
/// `area` is the face area vector pointing from `owner` to `neighbour`.
/// `weight` is the linear interpolation weight of the owner value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternalFace {
    pub owner: usize,
    pub neighbour: usize,
    pub area: Vector,
    pub weight: f64,
}

/// A named group of boundary faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub name: String,
    pub kind: PatchKind,
    /// Owner cell of each face.
    pub face_cells: Vec<usize>,
    /// Outward area vector of each face.
    pub face_areas: Vec<Vector>,
    pub face_centres: Vec<Vector>,
}

impl Patch {
    /// Number of faces on this patch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.face_cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.face_cells.is_empty()
    }

    #[must_use]
    pub fn is_wall(&self) -> bool {
        self.kind == PatchKind::Wall
    }
}

/// Per-cell distance to the nearest wall face and the unit normal of that
/// face pointing into the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct WallGeometry {
    distance: Vec<f64>,
    normal: Vec<Vector>,
}

impl WallGeometry {
    #[must_use]
    pub fn distance(&self) -> &[f64] {
        &self.distance
    }

    #[must_use]
    pub fn normal(&self) -> &[Vector] {
        &self.normal
    }
}

/// Geometry and connectivity of an unstructured finite-volume mesh.
///
/// This is the minimal view the closure models need: cell volumes and
/// centres, internal faces, boundary patches and wall geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    cell_volumes: Vec<f64>,
    cell_centres: Vec<Vector>,
    faces: Vec<InternalFace>,
    patches: Vec<Patch>,
    wall: WallGeometry,
}

impl Mesh {
    /// Creates a mesh and computes its wall geometry.
    ///
    /// The wall distance of a cell is the normal distance to the wall face
    /// whose centre is closest to the cell centre.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if any face references a missing cell, an
    /// interpolation weight lies outside `[0, 1]`, a patch has inconsistent
    /// per-face arrays, or a cell volume is not positive.
    pub fn new(
        cell_volumes: Vec<f64>,
        cell_centres: Vec<Vector>,
        faces: Vec<InternalFace>,
        patches: Vec<Patch>,
    ) -> Result<Self, MeshError> {
        let n_cells = cell_volumes.len();
        if cell_centres.len() != n_cells {
            return Err(MeshError::FieldSize {
                what: "cell centres",
                found: cell_centres.len(),
                expected: n_cells,
            });
        }
        if let Some((cell, &volume)) = cell_volumes.iter().enumerate().find(|(_, v)| **v <= 0.0) {
            return Err(MeshError::NonPositiveVolume { cell, volume });
        }

        let check_cell = |face: usize, cell: usize| {
            if cell < n_cells {
                Ok(())
            } else {
                Err(MeshError::CellOutOfRange {
                    face,
                    cell,
                    n_cells,
                })
            }
        };

        for (i, face) in faces.iter().enumerate() {
            check_cell(i, face.owner)?;
            check_cell(i, face.neighbour)?;
            if !(0.0..=1.0).contains(&face.weight) {
                return Err(MeshError::InvalidWeight {
                    face: i,
                    weight: face.weight,
                });
            }
        }

        let mut patch_start = faces.len();
        for patch in &patches {
            for (what, found) in [
                ("face areas", patch.face_areas.len()),
                ("face centres", patch.face_centres.len()),
            ] {
                if found != patch.len() {
                    return Err(MeshError::PatchSize {
                        patch: patch.name.clone(),
                        what,
                        found,
                        expected: patch.len(),
                    });
                }
            }
            for (i, &cell) in patch.face_cells.iter().enumerate() {
                check_cell(patch_start + i, cell)?;
            }
            patch_start += patch.len();
        }

        let wall = nearest_wall(&cell_centres, &patches);

        Ok(Self {
            cell_volumes,
            cell_centres,
            faces,
            patches,
            wall,
        })
    }

    /// Replaces the computed wall geometry with externally supplied values.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if either array does not have one entry per cell.
    pub fn with_wall_geometry(
        mut self,
        distance: Vec<f64>,
        normal: Vec<Vector>,
    ) -> Result<Self, MeshError> {
        for (what, found) in [("wall distance", distance.len()), ("wall normal", normal.len())] {
            if found != self.n_cells() {
                return Err(MeshError::FieldSize {
                    what,
                    found,
                    expected: self.n_cells(),
                });
            }
        }
        let distance = distance.into_iter().map(|y| y.max(MIN_WALL_DISTANCE)).collect();
        self.wall = WallGeometry { distance, normal };
        Ok(self)
    }

    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.cell_volumes.len()
    }

    #[must_use]
    pub fn n_internal_faces(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volumes
    }

    #[must_use]
    pub fn cell_centres(&self) -> &[Vector] {
        &self.cell_centres
    }

    #[must_use]
    pub fn faces(&self) -> &[InternalFace] {
        &self.faces
    }

    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    #[must_use]
    pub fn wall(&self) -> &WallGeometry {
        &self.wall
    }

    /// Cell that holds a value, or the owner cell of a boundary face.
    #[must_use]
    pub fn cell_of(&self, at: Location) -> usize {
        match at {
            Location::Cell(cell) => cell,
            Location::Boundary { patch, face } => self.patches[patch].face_cells[face],
        }
    }
}

fn nearest_wall(cell_centres: &[Vector], patches: &[Patch]) -> WallGeometry {
    let wall_faces: Vec<(Vector, Vector)> = patches
        .iter()
        .filter(|p| p.is_wall())
        .flat_map(|p| {
            p.face_centres
                .iter()
                .zip(&p.face_areas)
                .map(|(c, sf)| (*c, -sf.normalize()))
        })
        .collect();

    let (distance, normal) = cell_centres
        .iter()
        .map(|centre| {
            wall_faces
                .iter()
                .min_by(|(a, _), (b, _)| {
                    (centre - a)
                        .norm_squared()
                        .total_cmp(&(centre - b).norm_squared())
                })
                .map_or((NO_WALL_DISTANCE, Vector::zeros()), |(face_centre, n)| {
                    let y = (centre - face_centre).dot(n).abs();
                    (y.max(MIN_WALL_DISTANCE), *n)
                })
        })
        .unzip();

    WallGeometry { distance, normal }
}
