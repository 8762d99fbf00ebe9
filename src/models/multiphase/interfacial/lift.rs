//! Lift forces.
//!
//! A lift law provides the coefficient `Cl` of the shear-induced force on
//! the dispersed phase,
//!
//! ```text
//! Fi = Cl ρ_c (U_r × ∇×U_c)
//! ```
//!
//! per unit dispersed volume fraction, where `U_r = U_d − U_c`.

use crate::support::{
    dictionary::{ConfigError, Dictionary},
    field::{SurfaceField, Vector, VolField, curl, flux, interpolate},
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

/// A lift law.
pub trait LiftModel: Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &'static str;

    /// Lift coefficient `Cl`.
    fn cl(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64>;

    /// Re-reads the coefficients from `dict`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid.
    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError>;

    /// Force per unit dispersed fraction.
    fn fi(&self, pair: &OrderedPhasePair<'_>) -> VolField<Vector> {
        let vorticity = curl(pair.mesh(), &pair.continuous().u);
        let (cl, rho_c, ur) = (self.cl(pair), &pair.continuous().rho, pair.ur());
        VolField::tabulate(&ur, |at| ur[at].cross(&vorticity[at]) * (cl[at] * rho_c[at]))
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

/// Constant lift coefficient `Cl`. Negative values push towards the
/// low-velocity side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantLift {
    cl: f64,
}

impl ConstantLift {
    pub const TYPE_NAME: &'static str = "constantCoefficient";

    /// Reads `Cl`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `Cl` is missing.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            cl: dict.lookup("Cl")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn LiftModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl LiftModel for ConstantLift {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cl(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        VolField::uniform(pair.mesh(), self.cl)
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}

/// No lift.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoLift;

impl NoLift {
    pub const TYPE_NAME: &'static str = "noLift";

    pub(crate) fn boxed(
        _dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn LiftModel>, ConfigError> {
        Ok(Box::new(Self))
    }
}

impl LiftModel for NoLift {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cl(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        VolField::zeros(pair.mesh())
    }

    fn fi(&self, pair: &OrderedPhasePair<'_>) -> VolField<Vector> {
        VolField::zeros(pair.mesh())
    }

    fn read(&mut self, _dict: &Dictionary) -> Result<(), ConfigError> {
        Ok(())
    }
}
