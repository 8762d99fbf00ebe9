use crate::support::{
    constraint::{Constrained, NonNegative},
    dictionary::{ConfigError, Dictionary},
    field::VolField,
    phase::{ContinuousTurbulence, OrderedPhasePair},
    selection::SelectionContext,
};

use super::TurbulentDispersionModel;

/// Constant-coefficient dispersion: `D = Ctd α_d ρ_c k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCoefficient {
    ctd: Constrained<f64, NonNegative>,
}

impl ConstantCoefficient {
    pub const TYPE_NAME: &'static str = "constantCoefficient";

    /// Reads `Ctd`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `Ctd` is missing or negative.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            ctd: dict.lookup_constrained("Ctd")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn TurbulentDispersionModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl TurbulentDispersionModel for ConstantCoefficient {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn d(&self, pair: &OrderedPhasePair<'_>, turbulence: &ContinuousTurbulence) -> VolField<f64> {
        let (alpha_d, rho_c, k) = (&pair.dispersed().alpha, &pair.continuous().rho, &turbulence.k);
        let ctd = self.ctd.get();
        VolField::tabulate(k, |at| ctd * alpha_d[at] * rho_c[at] * k[at])
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}
