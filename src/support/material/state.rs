use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::SpecificEnthalpy;

/// The point at which material properties are evaluated.
///
/// Values are held in SI units. `enthalpy` is only needed when temperature
/// is computed from enthalpy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialState {
    /// Temperature, K.
    pub temperature: f64,
    /// Pressure, Pa.
    pub pressure: f64,
    /// Absolute enthalpy, J/kg.
    pub enthalpy: Option<f64>,
}

impl MaterialState {
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature, pressure: Pressure) -> Self {
        Self {
            temperature: temperature.get::<kelvin>(),
            pressure: pressure.get::<pascal>(),
            enthalpy: None,
        }
    }

    /// Returns a state with the given absolute enthalpy.
    #[must_use]
    pub fn with_enthalpy(self, enthalpy: SpecificEnthalpy) -> Self {
        Self {
            enthalpy: Some(enthalpy.value),
            ..self
        }
    }

    /// Returns a state with pressure `pressure` in pascal.
    #[must_use]
    pub fn with_pressure(self, pressure: f64) -> Self {
        Self { pressure, ..self }
    }

    /// Returns a state with temperature `temperature` in kelvin.
    #[must_use]
    pub fn at_temperature(self, temperature: f64) -> Self {
        Self {
            temperature,
            ..self
        }
    }
}
