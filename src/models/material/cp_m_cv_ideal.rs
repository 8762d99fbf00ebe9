use crate::support::{
    dictionary::{ConfigError, Dictionary},
    material::{
        Dependencies, MaterialModel, MaterialState, Property, PropertyError, Requirement,
    },
    selection::SelectionContext,
};

/// Ideal-gas heat capacity difference: `Cp − Cv = R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpMCvIdeal;

impl CpMCvIdeal {
    pub const TYPE_NAME: &'static str = "CpMCvIdeal";

    pub(crate) fn boxed(
        _dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn MaterialModel>, ConfigError> {
        Ok(Box::new(Self))
    }
}

impl MaterialModel for CpMCvIdeal {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn provides(&self) -> &[Property] {
        &[Property::CpMCv]
    }

    fn requires(&self, _property: Property) -> Vec<Requirement> {
        vec![Requirement::compulsory(Property::R)]
    }

    fn evaluate(
        &self,
        _property: Property,
        state: &MaterialState,
        deps: &Dependencies<'_>,
    ) -> Result<f64, PropertyError> {
        deps.get(Property::R, state)
    }

    fn read(&mut self, _dict: &Dictionary) -> Result<(), ConfigError> {
        Ok(())
    }
}
