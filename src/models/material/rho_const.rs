use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    dictionary::{ConfigError, Dictionary},
    material::{Dependencies, MaterialModel, MaterialState, Property, PropertyError},
    selection::SelectionContext,
};

/// Incompressible equation of state: constant `ρ`, `ψ = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhoConst {
    rho: Constrained<f64, StrictlyPositive>,
}

impl RhoConst {
    pub const TYPE_NAME: &'static str = "rhoConst";

    /// Reads `rho` in kg/m³.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `rho` is missing or not positive.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            rho: dict.lookup_constrained("rho")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn MaterialModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl MaterialModel for RhoConst {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn provides(&self) -> &[Property] {
        &[Property::Rho, Property::Psi]
    }

    fn evaluate(
        &self,
        property: Property,
        _state: &MaterialState,
        _deps: &Dependencies<'_>,
    ) -> Result<f64, PropertyError> {
        Ok(match property {
            Property::Psi => 0.0,
            _ => self.rho.get(),
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}
