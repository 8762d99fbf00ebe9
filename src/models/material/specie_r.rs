use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    dictionary::{ConfigError, Dictionary},
    material::{Dependencies, MaterialModel, MaterialState, Property, PropertyError},
    selection::SelectionContext,
};

/// Universal gas constant, J/kmol·K.
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8314.47;

/// Specific gas constant from molecular weight: `R = 8314.47 / W`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecieR {
    mol_weight: Constrained<f64, StrictlyPositive>,
}

impl SpecieR {
    pub const TYPE_NAME: &'static str = "specieR";

    /// Reads `molWeight` in kg/kmol.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `molWeight` is missing or not positive.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            mol_weight: dict.lookup_constrained("molWeight")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn MaterialModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl MaterialModel for SpecieR {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn provides(&self) -> &[Property] {
        &[Property::R]
    }

    fn evaluate(
        &self,
        _property: Property,
        _state: &MaterialState,
        _deps: &Dependencies<'_>,
    ) -> Result<f64, PropertyError> {
        Ok(UNIVERSAL_GAS_CONSTANT / self.mol_weight.get())
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;

    use crate::models::material::test_support::{at, material};

    #[test]
    fn air_gas_constant() {
        let table = material(r#"{ "models": [{ "type": "specieR", "molWeight": 28.96 }] }"#);
        let r = table.gas_constant(&at(300.0)).unwrap();
        assert_relative_eq!(r.get::<joule_per_kilogram_kelvin>(), 287.1, epsilon = 0.01);
    }

    #[test]
    fn rejects_zero_weight() {
        let dict = Dictionary::from_json_str("specie", r#"{ "molWeight": 0.0 }"#).unwrap();
        assert!(matches!(
            SpecieR::new(&dict),
            Err(ConfigError::OutOfRange { ref key, .. }) if key == "molWeight"
        ));
    }
}
