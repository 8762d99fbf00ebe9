use uom::si::{
    f64::ThermodynamicTemperature, temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    dictionary::{ConfigError, Dictionary},
    material::{
        Dependencies, MaterialModel, MaterialState, Property, PropertyError, Requirement,
    },
    selection::SelectionContext,
    units::TemperatureDifference,
};

use super::{internal_energy, internal_energy_requirements, pressure_entropy};

/// Standard temperature at which formation enthalpies are quoted, K.
pub const T_STD: f64 = 298.15;

/// Constant heat capacity thermodynamics.
///
/// `hs = Cp (T − Tstd)`, `ha = hs + hf` and `s = Cp ln(T/Tstd) + sp` with
/// constant `Cp` and `hf`. Internal energies are `h − p/ρ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HConst {
    cp: Constrained<f64, StrictlyPositive>,
    hf: f64,
    t_std: ThermodynamicTemperature,
}

impl HConst {
    pub const TYPE_NAME: &'static str = "hConst";

    /// Reads `Cp`, `Hf` and the optional `Tstd`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `Cp` or `Hf` is missing or `Cp` or
    /// `Tstd` is not positive.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        let t_std: Constrained<f64, StrictlyPositive> = dict.lookup_constrained_or("Tstd", T_STD)?;
        Ok(Self {
            cp: dict.lookup_constrained("Cp")?,
            hf: dict.lookup("Hf")?,
            t_std: ThermodynamicTemperature::new::<kelvin>(t_std.get()),
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn MaterialModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }

    fn hs(&self, state: &MaterialState) -> f64 {
        let t = ThermodynamicTemperature::new::<kelvin>(state.temperature);
        self.cp.get() * t.minus(self.t_std).get::<delta_kelvin>()
    }
}

impl MaterialModel for HConst {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn provides(&self) -> &[Property] {
        &[
            Property::Cp,
            Property::Ha,
            Property::Hs,
            Property::Hf,
            Property::S,
            Property::DCpdT,
            Property::Es,
            Property::Ea,
        ]
    }

    fn requires(&self, property: Property) -> Vec<Requirement> {
        match property {
            Property::Es => internal_energy_requirements(Property::Hs),
            Property::Ea => internal_energy_requirements(Property::Ha),
            Property::S => vec![Requirement::optional(Property::Sp)],
            _ => Vec::new(),
        }
    }

    fn evaluate(
        &self,
        property: Property,
        state: &MaterialState,
        deps: &Dependencies<'_>,
    ) -> Result<f64, PropertyError> {
        Ok(match property {
            Property::Ha => self.hs(state) + self.hf,
            Property::Hs => self.hs(state),
            Property::Hf => self.hf,
            Property::S => {
                let t_std = self.t_std.get::<kelvin>();
                self.cp.get() * (state.temperature / t_std).ln() + pressure_entropy(state, deps)?
            }
            Property::DCpdT => 0.0,
            Property::Es => internal_energy(Property::Hs, state, deps)?,
            Property::Ea => internal_energy(Property::Ha, state, deps)?,
            _ => self.cp.get(),
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}
