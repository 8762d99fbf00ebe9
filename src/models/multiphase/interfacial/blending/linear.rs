use crate::{
    models::multiphase::interfacial::blending::{BlendingMethod, PhaseFractions, Transition},
    support::{
        dictionary::{ConfigError, Dictionary},
        selection::SelectionContext,
    },
};

/// Piecewise-linear blending.
///
/// Phase 1 counts as continuous from `minFullyContinuousAlpha_1` upwards, as
/// dispersed below `minPartlyContinuousAlpha_1`, and the weight ramps
/// linearly in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    phases: Vec<String>,
    min_fully_continuous_alpha: PhaseFractions,
    min_partly_continuous_alpha: PhaseFractions,
}

impl Linear {
    pub const TYPE_NAME: &'static str = "linear";

    /// Reads both per-phase limits for every phase in `phases`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a phase has no limits or its partly
    /// continuous limit exceeds its fully continuous limit.
    pub fn new(dict: &Dictionary, phases: &[String]) -> Result<Self, ConfigError> {
        let fully = PhaseFractions::read(dict, "minFullyContinuousAlpha", phases)?;
        let partly = PhaseFractions::read(dict, "minPartlyContinuousAlpha", phases)?;
        for phase in phases {
            if partly.get(phase)? > fully.get(phase)? {
                return Err(ConfigError::InvalidEntry {
                    key: "minPartlyContinuousAlpha".into(),
                    dictionary: dict.path().to_string(),
                    reason: format!("exceeds minFullyContinuousAlpha for phase {phase}"),
                });
            }
        }
        Ok(Self {
            phases: phases.to_vec(),
            min_fully_continuous_alpha: fully,
            min_partly_continuous_alpha: partly,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn BlendingMethod>, ConfigError> {
        Ok(Box::new(Self::new(dict, ctx.phase_names)?))
    }
}

impl BlendingMethod for Linear {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn transition(&self, continuous: &str, _other: &str) -> Result<Transition, ConfigError> {
        Ok(Transition::Linear {
            partly: self.min_partly_continuous_alpha.get(continuous)?,
            fully: self.min_fully_continuous_alpha.get(continuous)?,
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict, &self.phases)?;
        Ok(())
    }
}
