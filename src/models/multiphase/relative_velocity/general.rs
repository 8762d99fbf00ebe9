use crate::support::{
    constraint::{Constrained, UnitInterval},
    dictionary::{ConfigError, Dictionary},
    field::{Vector, VolField},
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::{RelativeVelocityModel, settling};

/// Takács double-exponential settling.
///
/// ```text
/// Udm = (ρ_c/ρ_mix) V0 (exp(−a x) − exp(−a1 x)),   x = max(α_d − residualAlpha, 0)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct General {
    v0: Vector,
    a: f64,
    a1: f64,
    residual_alpha: Constrained<f64, UnitInterval>,
}

impl General {
    pub const TYPE_NAME: &'static str = "general";

    /// Reads `V0`, `a`, `a1` and `residualAlpha`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an entry is missing or `residualAlpha` is
    /// outside `[0, 1]`.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            v0: dict.lookup_vector("V0")?,
            a: dict.lookup("a")?,
            a1: dict.lookup("a1")?,
            residual_alpha: dict.lookup_constrained("residualAlpha")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn RelativeVelocityModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl RelativeVelocityModel for General {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn udm(&self, mixture: &OrderedPhasePair<'_>) -> VolField<Vector> {
        let (a, a1, residual) = (self.a, self.a1, self.residual_alpha.get());
        settling(mixture, self.v0, move |alpha| {
            let x = (alpha - residual).max(0.0);
            (-a * x).exp() - (-a1 * x).exp()
        })
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

    use crate::{
        models::multiphase::relative_velocity::test_support::sludge,
        support::{field::test_support::channel, phase::PairProperties},
    };

    fn takacs() -> General {
        let dict = Dictionary::from_json_str(
            "generalCoeffs",
            r#"{ "V0": [0, -0.002198, 0], "a": 285.84, "a1": 0.1, "residualAlpha": 0.001 }"#,
        )
        .unwrap();
        General::new(&dict).unwrap()
    }

    #[test]
    fn no_slip_below_residual_fraction() {
        let mesh = channel(2);
        let (sludge, water) = sludge(&mesh, 5e-4);
        let props = PairProperties::none();
        let mixture = OrderedPhasePair::new(&mesh, &sludge, &water, &props);

        assert_eq!(takacs().udm(&mixture), VolField::zeros(&mesh));
    }

    #[test]
    fn double_exponential_above_residual_fraction() {
        let mesh = channel(2);
        let (sludge, water) = sludge(&mesh, 0.003);
        let props = PairProperties::none();
        let mixture = OrderedPhasePair::new(&mesh, &sludge, &water, &props);

        let x: f64 = 0.002;
        let rho_mix = 0.003 * 1996.0 + 0.997 * 996.0;
        let expected =
            -0.002198 * 996.0 / rho_mix * ((-285.84 * x).exp() - (-0.1 * x).exp());
        let udm = takacs().udm(&mixture);
        for u in udm.internal() {
            assert_relative_eq!(u.y, expected, max_relative = 1e-9);
        }
    }
}
