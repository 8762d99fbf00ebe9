//! Algebraic slip of drift-flux mixtures.
//!
//! A [`RelativeVelocityModel`] gives the drift velocity `Udm` of the dispersed
//! phase relative to the mixture. [`RelativeVelocity`] carries the current
//! `Udm`, updates it on [`correct`](RelativeVelocity::correct) and derives
//! the drift stress
//!
//! ```text
//! τ = β symm(Udm ⊗ Udm),   β = α_d (1 − α_d) ρ_d ρ_c / ρ_mix
//! ```
//!
//! with `α_d` limited to `[0, 1]` and `ρ_mix = α_d ρ_d + (1 − α_d) ρ_c`.

mod general;
mod simple;

pub use general::General;
pub use simple::Simple;

use crate::{
    models::registry::ModelRegistry,
    support::{
        dictionary::{ConfigError, Dictionary},
        field::{Location, Mesh, SymmTensor, Vector, VolField, symm_outer},
        phase::OrderedPhasePair,
        selection::{ObjectRegistry, SelectionContext},
    },
};

/// A drift velocity law.
pub trait RelativeVelocityModel: Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &'static str;

    /// Drift velocity of the dispersed phase.
    fn udm(&self, mixture: &OrderedPhasePair<'_>) -> VolField<Vector>;

    /// Re-reads the coefficients from `dict`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid.
    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError>;
}

/// A relative velocity law and the drift velocity it last produced.
pub struct RelativeVelocity {
    model: Box<dyn RelativeVelocityModel>,
    udm: VolField<Vector>,
}

impl RelativeVelocity {
    /// Wraps `model` with a zero drift velocity.
    #[must_use]
    pub fn new(mesh: &Mesh, model: Box<dyn RelativeVelocityModel>) -> Self {
        Self {
            model,
            udm: VolField::zeros(mesh),
        }
    }

    /// Selects the law named by `dict["type"]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the law cannot be selected.
    pub fn select(
        dict: &Dictionary,
        mesh: &Mesh,
        registry: &ModelRegistry,
    ) -> Result<Self, ConfigError> {
        let objects = ObjectRegistry::default();
        let model = registry
            .relative_velocity
            .select(dict, &SelectionContext::new(&objects))?;
        Ok(Self::new(mesh, model))
    }

    #[must_use]
    pub fn model(&self) -> &dyn RelativeVelocityModel {
        self.model.as_ref()
    }

    /// The drift velocity as of the last [`correct`](Self::correct).
    #[must_use]
    pub fn udm(&self) -> &VolField<Vector> {
        &self.udm
    }

    /// Recomputes the drift velocity for the current phase fields.
    pub fn correct(&mut self, mixture: &OrderedPhasePair<'_>) {
        self.udm = self.model.udm(mixture);
    }

    /// Drift stress of the current drift velocity.
    #[must_use]
    pub fn tau_dm(&self, mixture: &OrderedPhasePair<'_>) -> VolField<SymmTensor> {
        let (d, c) = (mixture.dispersed(), mixture.continuous());
        let udm = &self.udm;
        VolField::tabulate(udm, |at| {
            let alpha = limited(d.alpha[at]);
            let beta = alpha * (1.0 - alpha) * d.rho[at] * c.rho[at]
                / mixture_density(alpha, d.rho[at], c.rho[at]);
            symm_outer(&udm[at]) * beta
        })
    }

    /// Re-reads the law's coefficients.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid.
    pub fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        self.model.read(&dict.coeffs(self.model.type_name()))
    }
}

impl std::fmt::Debug for RelativeVelocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelativeVelocity")
            .field("model", &self.model.type_name())
            .finish_non_exhaustive()
    }
}

fn limited(alpha: f64) -> f64 {
    alpha.clamp(0.0, 1.0)
}

fn mixture_density(alpha: f64, rho_d: f64, rho_c: f64) -> f64 {
    alpha * rho_d + (1.0 - alpha) * rho_c
}

/// `V0 ρ_c/ρ_mix · hindrance(α_d)` at every location of the mixture.
fn settling<H>(mixture: &OrderedPhasePair<'_>, v0: Vector, hindrance: H) -> VolField<Vector>
where
    H: Fn(f64) -> f64 + Send + Sync,
{
    let (d, c) = (mixture.dispersed(), mixture.continuous());
    VolField::tabulate(&d.alpha, |at: Location| {
        let alpha = d.alpha[at];
        let rho = mixture_density(limited(alpha), d.rho[at], c.rho[at]);
        v0 * (c.rho[at] / rho * hindrance(alpha))
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::support::{
        constraint::Constrained,
        field::{Mesh, Vector},
        phase::{Phase, PhaseState},
    };

    /// Activated sludge settling in water at dispersed fraction `alpha`.
    pub(crate) fn sludge(mesh: &Mesh, alpha: f64) -> (Phase, Phase) {
        let residual = Constrained::new(1e-8).unwrap();
        let state = |alpha, rho| PhaseState {
            alpha,
            rho,
            nu: 1e-6,
            u: Vector::zeros(),
            d: 1e-4,
        };
        (
            Phase::uniform(mesh, "sludge", residual, state(alpha, 1996.0)),
            Phase::uniform(mesh, "water", residual, state(1.0 - alpha, 996.0)),
        )
    }
}
