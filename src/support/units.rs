//! Extensions to [`uom`] used by the material-property models.
//!
//! Material models compute in SI `f64` internally and hand [`uom`] quantities
//! across their public boundary. This module adds the quantities [`uom`] does
//! not name directly, plus [`TemperatureDifference`] for subtracting absolute
//! temperatures.

mod quantities;
mod temperature_difference;

pub use quantities::{
    SpecificEnthalpy, SpecificEntropy, SpecificGasConstant, SpecificInternalEnergy,
};
pub use temperature_difference::TemperatureDifference;
