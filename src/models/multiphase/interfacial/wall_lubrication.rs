//! Wall lubrication forces.
//!
//! Every law produces a force per unit dispersed volume fraction of the form
//! `Fi = c ρ_c |U_eff|² n`, where `n` is the unit wall normal pointing into
//! the domain, `U_eff = U_r − (U_r·n) n` is the wall-parallel slip and `c` is
//! a law-specific coefficient of the wall distance `y`.
//!
//! The laws are singular at the wall, so `Fi` is replaced on wall patches by
//! the value in the adjacent cell.

mod antal;
mod frank;
mod tomiyama;

pub use antal::Antal;
pub use frank::Frank;
pub use tomiyama::TomiyamaWallLubrication;

use crate::support::{
    dictionary::{ConfigError, Dictionary},
    field::{SurfaceField, Vector, VolField, flux, interpolate, zero_gradient_walls},
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

/// A wall lubrication law.
pub trait WallLubricationModel: Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &'static str;

    /// Raw force per unit dispersed fraction, before wall extrapolation.
    fn wall_force(&self, pair: &OrderedPhasePair<'_>) -> VolField<Vector>;

    /// Re-reads the coefficients from `dict`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid.
    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError>;

    /// Force per unit dispersed fraction with zero-gradient wall values.
    fn fi(&self, pair: &OrderedPhasePair<'_>) -> VolField<Vector> {
        zero_gradient_walls(pair.mesh(), self.wall_force(pair))
    }

    /// Force density on the dispersed phase, `α_d Fi`.
    fn f(&self, pair: &OrderedPhasePair<'_>) -> VolField<Vector> {
        &self.fi(pair) * &pair.dispersed().alpha
    }

    /// Face flux of the force, `interp(α_d) (interp(Fi)·Sf)`.
    fn ff(&self, pair: &OrderedPhasePair<'_>) -> SurfaceField<f64> {
        let mesh = pair.mesh();
        &interpolate(mesh, &pair.dispersed().alpha) * &flux(mesh, &self.fi(pair))
    }
}

/// Local state seen by a wall lubrication coefficient.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NearWall {
    /// Wall distance.
    pub y: f64,
    /// Dispersed diameter.
    pub d: f64,
    /// Eötvös number.
    pub eo: f64,
}

/// Evaluates `c(state) ρ_c |U_eff|² n` everywhere.
pub(crate) fn wall_force<C>(pair: &OrderedPhasePair<'_>, coefficient: C) -> VolField<Vector>
where
    C: Fn(NearWall) -> f64 + Send + Sync,
{
    let mesh = pair.mesh();
    let (distance, normal) = (mesh.wall().distance(), mesh.wall().normal());
    let (rho_c, d) = (&pair.continuous().rho, &pair.dispersed().d);
    let ur = pair.ur();
    let eo = pair.eo();

    VolField::tabulate(&ur, |at| {
        let cell = mesh.cell_of(at);
        let n = normal[cell];
        let u_eff = ur[at] - n * ur[at].dot(&n);
        let c = coefficient(NearWall {
            y: distance[cell],
            d: d[at],
            eo: eo[at],
        });
        n * (c * rho_c[at] * u_eff.norm_squared())
    })
}

/// Tomiyama's wall coefficient as a function of the Eötvös number.
pub(crate) fn tomiyama_cw(eo: f64) -> f64 {
    if eo < 1.0 {
        0.0
    } else if eo < 5.0 {
        (-0.933 * eo + 0.179).exp()
    } else if eo < 33.0 {
        0.00599 * eo - 0.0187
    } else {
        0.179
    }
}

/// No wall lubrication.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoWallLubrication;

impl NoWallLubrication {
    pub const TYPE_NAME: &'static str = "noWallLubrication";

    pub(crate) fn boxed(
        _dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn WallLubricationModel>, ConfigError> {
        Ok(Box::new(Self))
    }
}

impl WallLubricationModel for NoWallLubrication {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn wall_force(&self, pair: &OrderedPhasePair<'_>) -> VolField<Vector> {
        VolField::zeros(pair.mesh())
    }

    fn read(&mut self, _dict: &Dictionary) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::support::{
        field::{Mesh, Vector, VolField},
        phase::{Phase, test_support::air_water},
    };

    /// Air in water sliding along the channel walls at 0.2 m/s.
    pub(crate) fn sliding_air_water(mesh: &Mesh) -> (Phase, Phase) {
        let (mut air, water) = air_water(mesh);
        air.u = VolField::uniform(mesh, Vector::new(0.2, 0.0, 0.0));
        (air, water)
    }
}
