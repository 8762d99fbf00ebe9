use crate::support::{
    dictionary::{ConfigError, Dictionary},
    field::{Vector, VolField},
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::{RelativeVelocityModel, settling};

/// Vesilind settling: `Udm = (ρ_c/ρ_mix) V0 10^(−a max(α_d, 0))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simple {
    v0: Vector,
    a: f64,
}

impl Simple {
    pub const TYPE_NAME: &'static str = "simple";

    /// Reads the settling velocity `V0` and the hindrance exponent `a`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either entry is missing.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(dict.lookup_vector("V0")?, dict.lookup("a")?))
    }

    #[must_use]
    pub fn from_parts(v0: Vector, a: f64) -> Self {
        Self { v0, a }
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn RelativeVelocityModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl RelativeVelocityModel for Simple {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn udm(&self, mixture: &OrderedPhasePair<'_>) -> VolField<Vector> {
        let a = self.a;
        settling(mixture, self.v0, move |alpha| 10_f64.powf(-a * alpha.max(0.0)))
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

    #[test]
    fn hindered_settling() {
        let mesh = channel(2);
        let (sludge, water) = sludge(&mesh, 0.01);
        let props = PairProperties::none();
        let mixture = OrderedPhasePair::new(&mesh, &sludge, &water, &props);

        let model = Simple::from_parts(Vector::new(0.0, -0.002, 0.0), 100.0);
        let rho_mix = 0.01 * 1996.0 + 0.99 * 996.0;
        let expected = -0.002 * 996.0 / rho_mix * 0.1;
        for u in model.udm(&mixture).internal() {
            assert_relative_eq!(u.y, expected, max_relative = 1e-12);
            assert_eq!(u.x, 0.0);
        }
    }

    #[test]
    fn read_replaces_coefficients() {
        let mut model = Simple::from_parts(Vector::zeros(), 1.0);
        let dict = Dictionary::from_json_str("simpleCoeffs", r#"{ "V0": [0, -1, 0], "a": 2 }"#)
            .unwrap();
        model.read(&dict).unwrap();
        assert_eq!(model, Simple::from_parts(Vector::new(0.0, -1.0, 0.0), 2.0));

        let broken = Dictionary::from_json_str("simpleCoeffs", r#"{ "V0": [0, -1, 0] }"#).unwrap();
        assert!(model.read(&broken).is_err());
        assert_eq!(model, Simple::from_parts(Vector::new(0.0, -1.0, 0.0), 2.0));
    }
}
