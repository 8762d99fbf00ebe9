use crate::support::{
    constraint::{Constrained, NonNegative},
    dictionary::{ConfigError, Dictionary},
    field::VolField,
    phase::{ContinuousTurbulence, OrderedPhasePair},
    selection::SelectionContext,
};

use super::TurbulentDispersionModel;

/// Lopez de Bertodano dispersion: `D = Ctd ρ_c k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LopezDeBertodano {
    ctd: Constrained<f64, NonNegative>,
}

impl LopezDeBertodano {
    pub const TYPE_NAME: &'static str = "LopezDeBertodano";

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

impl TurbulentDispersionModel for LopezDeBertodano {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn d(&self, pair: &OrderedPhasePair<'_>, turbulence: &ContinuousTurbulence) -> VolField<f64> {
        let ctd = self.ctd.get();
        pair.continuous().rho.zip_map(&turbulence.k, move |rho, k| ctd * rho * k)
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}
