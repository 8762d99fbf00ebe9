use std::sync::Arc;

use crate::{
    models::multiphase::interfacial::drag::Drag,
    support::{
        constraint::{Constrained, StrictlyPositive, UnitInterval},
        dictionary::{ConfigError, Dictionary},
        field::VolField,
        phase::{ContinuousTurbulence, OrderedPhasePair},
        selection::SelectionContext,
    },
};

use super::{TurbulentDispersionModel, linked_drag};

/// Burns et al. Favre-averaged drag dispersion.
///
/// ```text
/// D = 0.75 CdRe ν_c ν_t / (σ d²) ρ_c (1 + α_d / max(α_c, residualAlpha))
/// ```
///
/// `CdRe` comes from the drag model of the same pair. `residualAlpha`
/// defaults to the continuous phase's residual fraction.
#[derive(Debug, Clone)]
pub struct Burns {
    sigma: Constrained<f64, StrictlyPositive>,
    residual_alpha: Option<Constrained<f64, UnitInterval>>,
    drag: Arc<Drag>,
}

impl Burns {
    pub const TYPE_NAME: &'static str = "Burns";

    /// Reads `sigma` and the optional `residualAlpha` and links to `drag`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `sigma` is missing or not positive.
    pub fn new(dict: &Dictionary, drag: Arc<Drag>) -> Result<Self, ConfigError> {
        let residual_alpha = if dict.found("residualAlpha") {
            Some(dict.lookup_constrained("residualAlpha")?)
        } else {
            None
        };
        Ok(Self {
            sigma: dict.lookup_constrained("sigma")?,
            residual_alpha,
            drag,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn TurbulentDispersionModel>, ConfigError> {
        let drag = linked_drag(Self::TYPE_NAME, ctx)?;
        Ok(Box::new(Self::new(dict, drag)?))
    }
}

impl TurbulentDispersionModel for Burns {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn d(&self, pair: &OrderedPhasePair<'_>, turbulence: &ContinuousTurbulence) -> VolField<f64> {
        let sigma = self.sigma.get();
        let residual = self
            .residual_alpha
            .map_or(pair.continuous().residual_alpha(), |r| r.get());
        let cd_re = self.drag.cd_re(pair);
        let (dispersed, continuous) = (pair.dispersed(), pair.continuous());
        let nut = &turbulence.nut;

        VolField::tabulate(&cd_re, |at| {
            let d = dispersed.d[at];
            0.75 * cd_re[at] * continuous.nu[at] * nut[at] / (sigma * d * d)
                * continuous.rho[at]
                * (1.0 + dispersed.alpha[at] / continuous.alpha[at].max(residual))
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict, Arc::clone(&self.drag))?;
        Ok(())
    }
}
