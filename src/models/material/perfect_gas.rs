use crate::support::{
    dictionary::{ConfigError, Dictionary},
    material::{
        Dependencies, MaterialModel, MaterialState, Property, PropertyError, Requirement,
    },
    selection::SelectionContext,
};

/// Standard pressure at which entropies are quoted, Pa.
pub const P_STD: f64 = 1.0e5;

/// Perfect-gas equation of state: `ρ = p/(R T)`, `ψ = 1/(R T)`.
///
/// Also provides the entropy pressure contribution `sp = −R ln(p/Pstd)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerfectGas;

impl PerfectGas {
    pub const TYPE_NAME: &'static str = "perfectGas";

    pub(crate) fn boxed(
        _dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn MaterialModel>, ConfigError> {
        Ok(Box::new(Self))
    }
}

impl MaterialModel for PerfectGas {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn provides(&self) -> &[Property] {
        &[Property::Rho, Property::Psi, Property::Sp]
    }

    fn requires(&self, _property: Property) -> Vec<Requirement> {
        vec![Requirement::compulsory(Property::R)]
    }

    fn evaluate(
        &self,
        property: Property,
        state: &MaterialState,
        deps: &Dependencies<'_>,
    ) -> Result<f64, PropertyError> {
        if state.temperature <= 0.0 || state.pressure <= 0.0 {
            return Err(PropertyError::OutOfDomain {
                model: Self::TYPE_NAME.to_string(),
                context: format!(
                    "T = {} K and p = {} Pa must both be positive",
                    state.temperature, state.pressure
                ),
            });
        }
        let r = deps.get(Property::R, state)?;
        let rt = r * state.temperature;
        Ok(match property {
            Property::Psi => 1.0 / rt,
            Property::Sp => -r * (state.pressure / P_STD).ln(),
            _ => state.pressure / rt,
        })
    }

    fn read(&mut self, _dict: &Dictionary) -> Result<(), ConfigError> {
        Ok(())
    }
}
