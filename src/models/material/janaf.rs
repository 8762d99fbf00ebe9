use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    dictionary::{ConfigError, Dictionary},
    material::{
        Dependencies, MaterialModel, MaterialState, Property, PropertyError, Requirement,
    },
    selection::SelectionContext,
};

use super::{
    h_const::T_STD, internal_energy, internal_energy_requirements, pressure_entropy,
};

/// NASA seven-coefficient polynomial, in units of the gas constant.
type Coeffs = [f64; 7];

/// JANAF polynomial thermodynamics.
///
/// ```text
/// Cp/R = a0 + a1 T + a2 T² + a3 T³ + a4 T⁴
/// ha/R = a0 T + a1 T²/2 + a2 T³/3 + a3 T⁴/4 + a4 T⁵/5 + a5
/// s/R  = a0 ln T + a1 T + a2 T²/2 + a3 T³/3 + a4 T⁴/4 + a6 + sp/R
/// ```
///
/// The high-temperature set applies above `Tcommon`. `T` is clamped to
/// `[Tlow, Thigh]` and `hf` is `ha(Tstd)`. The pressure contribution `sp`
/// comes from the equation of state when one provides it. Internal energies
/// are `h − p/ρ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Janaf {
    t_low: f64,
    t_high: f64,
    t_common: f64,
    high: Coeffs,
    low: Coeffs,
}

impl Janaf {
    pub const TYPE_NAME: &'static str = "janaf";

    /// Reads the temperature limits and both coefficient sets.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an entry is missing, `Tlow` is not
    /// positive, or the limits violate `Tlow < Tcommon ≤ Thigh`.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        let t_low: Constrained<f64, StrictlyPositive> = dict.lookup_constrained("Tlow")?;
        let model = Self {
            t_low: t_low.get(),
            t_high: dict.lookup("Thigh")?,
            t_common: dict.lookup("Tcommon")?,
            high: dict.lookup("highCpCoeffs")?,
            low: dict.lookup("lowCpCoeffs")?,
        };
        if !(model.t_low < model.t_common && model.t_common <= model.t_high) {
            return Err(ConfigError::InvalidEntry {
                key: "Tcommon".into(),
                dictionary: dict.path().to_string(),
                reason: format!(
                    "limits must satisfy Tlow < Tcommon <= Thigh, got {} < {} <= {}",
                    model.t_low, model.t_common, model.t_high
                ),
            });
        }
        Ok(model)
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn MaterialModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }

    /// `t` clamped to the valid range `[Tlow, Thigh]`.
    #[must_use]
    pub fn limit(&self, t: f64) -> f64 {
        t.clamp(self.t_low, self.t_high)
    }

    fn coeffs(&self, t: f64) -> &Coeffs {
        if t < self.t_common { &self.low } else { &self.high }
    }

    /// `Cp/R` at `t`.
    fn cp_r(&self, t: f64) -> f64 {
        let t = self.limit(t);
        let a = self.coeffs(t);
        (((a[4] * t + a[3]) * t + a[2]) * t + a[1]) * t + a[0]
    }

    /// `ha/R` at `t`.
    fn ha_r(&self, t: f64) -> f64 {
        let t = self.limit(t);
        let a = self.coeffs(t);
        ((((a[4] / 5.0 * t + a[3] / 4.0) * t + a[2] / 3.0) * t + a[1] / 2.0) * t + a[0]) * t + a[5]
    }

    /// Temperature part of `s/R` at `t`.
    fn s_r(&self, t: f64) -> f64 {
        let t = self.limit(t);
        let a = self.coeffs(t);
        (((a[4] / 4.0 * t + a[3] / 3.0) * t + a[2] / 2.0) * t + a[1]) * t + a[0] * t.ln() + a[6]
    }

    /// `(dCp/dT)/R` at `t`.
    fn dcpdt_r(&self, t: f64) -> f64 {
        let t = self.limit(t);
        let a = self.coeffs(t);
        ((4.0 * a[4] * t + 3.0 * a[3]) * t + 2.0 * a[2]) * t + a[1]
    }
}

impl MaterialModel for Janaf {
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
            Property::Cv,
            Property::Es,
            Property::Ea,
        ]
    }

    fn requires(&self, property: Property) -> Vec<Requirement> {
        match property {
            Property::Cv => vec![
                Requirement::compulsory(Property::Cp),
                Requirement::compulsory(Property::CpMCv),
            ],
            Property::Es => internal_energy_requirements(Property::Hs),
            Property::Ea => internal_energy_requirements(Property::Ha),
            Property::S => vec![
                Requirement::compulsory(Property::R),
                Requirement::optional(Property::Sp),
            ],
            _ => vec![Requirement::compulsory(Property::R)],
        }
    }

    fn evaluate(
        &self,
        property: Property,
        state: &MaterialState,
        deps: &Dependencies<'_>,
    ) -> Result<f64, PropertyError> {
        let t = state.temperature;
        match property {
            Property::Cv => {
                return Ok(deps.get(Property::Cp, state)? - deps.get(Property::CpMCv, state)?);
            }
            Property::Es => return internal_energy(Property::Hs, state, deps),
            Property::Ea => return internal_energy(Property::Ha, state, deps),
            _ => {}
        }

        let r = deps.get(Property::R, state)?;
        Ok(match property {
            Property::Ha => r * self.ha_r(t),
            Property::Hs => r * (self.ha_r(t) - self.ha_r(T_STD)),
            Property::Hf => r * self.ha_r(T_STD),
            Property::S => r * self.s_r(t) + pressure_entropy(state, deps)?,
            Property::DCpdT => r * self.dcpdt_r(t),
            _ => r * self.cp_r(t),
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}
