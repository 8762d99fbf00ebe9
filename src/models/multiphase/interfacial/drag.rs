//! Interphase drag.
//!
//! A drag law ([`DragModel`]) provides `CdRe`, the drag coefficient times the
//! particle Reynolds number. [`Drag`] composes a law with a
//! [`SwarmCorrection`] and derives the momentum exchange coefficients:
//!
//! - `Ki = 0.75 CdRe Cs ρ_c ν_c / d²`
//! - `K  = max(α_d, residual_d) Ki`
//! - `Kf = max(interp(α_d), residual_d) interp(Ki)`

mod ergun;
mod gidaspow_ergun_wen_yu;
mod schiller_naumann;
mod tenneti;
mod wen_yu;

pub use ergun::Ergun;
pub use gidaspow_ergun_wen_yu::GidaspowErgunWenYu;
pub use schiller_naumann::SchillerNaumann;
pub use tenneti::Tenneti;
pub use wen_yu::WenYu;

use crate::{
    models::{
        multiphase::interfacial::swarm_correction::{NoSwarm, SwarmCorrection},
        registry::ModelRegistry,
    },
    support::{
        dictionary::{ConfigError, Dictionary},
        field::{SurfaceField, VolField, interpolate},
        phase::OrderedPhasePair,
        selection::SelectionContext,
    },
};

/// A drag correlation.
pub trait DragModel: Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &'static str;

    /// Drag coefficient times Reynolds number.
    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64>;

    /// Re-reads the coefficients from `dict`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid; the
    /// model is left unchanged in that case.
    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError>;
}

/// Name under which the drag model of `pair` is stored in the object registry.
#[must_use]
pub fn object_name(pair: &impl std::fmt::Display) -> String {
    format!("dragModel.{pair}")
}

/// A drag law together with its swarm correction.
pub struct Drag {
    law: Box<dyn DragModel>,
    swarm: Box<dyn SwarmCorrection>,
}

impl Drag {
    #[must_use]
    pub fn new(law: Box<dyn DragModel>, swarm: Box<dyn SwarmCorrection>) -> Self {
        Self { law, swarm }
    }

    /// Selects the drag law named by `dict["type"]` and the swarm correction
    /// in the optional `swarmCorrection` sub-dictionary.
    ///
    /// Without a `swarmCorrection` entry no correction is applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either model cannot be selected.
    pub fn select(
        dict: &Dictionary,
        ctx: &SelectionContext<'_>,
        registry: &ModelRegistry,
    ) -> Result<Self, ConfigError> {
        let law = registry.drag.select(dict, ctx)?;
        let swarm = if dict.found("swarmCorrection") {
            registry
                .swarm_correction
                .select(&dict.sub_dict("swarmCorrection")?, ctx)?
        } else {
            log::debug!("no swarm correction in {}", dict.path());
            Box::new(NoSwarm)
        };
        Ok(Self { law, swarm })
    }

    #[must_use]
    pub fn law(&self) -> &dyn DragModel {
        self.law.as_ref()
    }

    #[must_use]
    pub fn swarm(&self) -> &dyn SwarmCorrection {
        self.swarm.as_ref()
    }

    /// Drag coefficient times Reynolds number of the underlying law.
    #[must_use]
    pub fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        self.law.cd_re(pair)
    }

    /// Drag coefficient per unit dispersed volume fraction.
    #[must_use]
    pub fn ki(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        let cd_re = self.law.cd_re(pair);
        let cs = self.swarm.cs(pair);
        let (rho_c, nu_c, d) = (
            &pair.continuous().rho,
            &pair.continuous().nu,
            &pair.dispersed().d,
        );
        VolField::tabulate(&cd_re, |at| {
            0.75 * cd_re[at] * cs[at] * rho_c[at] * nu_c[at] / (d[at] * d[at])
        })
    }

    /// Momentum exchange coefficient in cells.
    #[must_use]
    pub fn k(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        let residual = pair.dispersed().residual_alpha();
        &pair.dispersed().alpha.floored(residual) * &self.ki(pair)
    }

    /// Momentum exchange coefficient on faces.
    #[must_use]
    pub fn kf(&self, pair: &OrderedPhasePair<'_>) -> SurfaceField<f64> {
        let mesh = pair.mesh();
        let residual = pair.dispersed().residual_alpha();
        let alpha_f = interpolate(mesh, &pair.dispersed().alpha).map(|a| a.max(residual));
        &alpha_f * &interpolate(mesh, &self.ki(pair))
    }

    /// Re-reads the law's coefficients and the swarm correction's.
    ///
    /// `dict` is the same entry the drag was selected from.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid.
    pub fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        self.law.read(&dict.coeffs(self.law.type_name()))?;
        if dict.found("swarmCorrection") {
            let swarm = dict.sub_dict("swarmCorrection")?;
            self.swarm.read(&swarm.coeffs(self.swarm.type_name()))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Drag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drag")
            .field("law", &self.law.type_name())
            .field("swarm", &self.swarm.type_name())
            .finish()
    }
}

/// Schiller–Naumann `CdRe` at a Reynolds number that is already floored.
pub(crate) fn schiller_naumann_cd_re(re: f64) -> f64 {
    if re < 1000.0 {
        24.0 * (1.0 + 0.15 * re.powf(0.687))
    } else {
        0.44 * re
    }
}
