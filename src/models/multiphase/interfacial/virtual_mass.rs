//! Virtual mass.
//!
//! A virtual mass law provides the coefficient `Cvm` of the fluid the
//! dispersed phase drags along when it accelerates. The exchange
//! coefficient per unit dispersed fraction is `Ki = Cvm ρ_c`, and the
//! momentum equations use `K = α_d Ki`.

use crate::support::{
    constraint::{Constrained, NonNegative},
    dictionary::{ConfigError, Dictionary},
    field::{SurfaceField, VolField, interpolate},
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

/// A virtual mass law.
pub trait VirtualMassModel: Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &'static str;

    /// Virtual mass coefficient `Cvm`.
    fn cvm(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64>;

    /// Re-reads the coefficients from `dict`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid.
    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError>;

    /// `Ki = Cvm ρ_c`.
    fn ki(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        self.cvm(pair).zip_map(&pair.continuous().rho, |cvm, rho| cvm * rho)
    }

    /// `K = α_d Ki`.
    fn k(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        &self.ki(pair) * &pair.dispersed().alpha
    }

    /// `Kf = interp(α_d) interp(Ki)`.
    fn kf(&self, pair: &OrderedPhasePair<'_>) -> SurfaceField<f64> {
        let mesh = pair.mesh();
        &interpolate(mesh, &pair.dispersed().alpha) * &interpolate(mesh, &self.ki(pair))
    }
}

/// Constant virtual mass coefficient; 0.5 for spheres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantVirtualMass {
    cvm: Constrained<f64, NonNegative>,
}

impl ConstantVirtualMass {
    pub const TYPE_NAME: &'static str = "constantCoefficient";

    /// Reads `Cvm`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `Cvm` is missing or negative.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            cvm: dict.lookup_constrained("Cvm")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn VirtualMassModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl VirtualMassModel for ConstantVirtualMass {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cvm(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        VolField::uniform(pair.mesh(), self.cvm.get())
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}

/// No virtual mass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoVirtualMass;

impl NoVirtualMass {
    pub const TYPE_NAME: &'static str = "noVirtualMass";

    pub(crate) fn boxed(
        _dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn VirtualMassModel>, ConfigError> {
        Ok(Box::new(Self))
    }
}

impl VirtualMassModel for NoVirtualMass {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cvm(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        VolField::zeros(pair.mesh())
    }

    fn read(&mut self, _dict: &Dictionary) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{
        field::test_support::channel,
        phase::{PairProperties, test_support::air_water},
    };

    fn spheres() -> ConstantVirtualMass {
        let dict = Dictionary::from_json_str("virtualMass", r#"{ "Cvm": 0.5 }"#).unwrap();
        ConstantVirtualMass::new(&dict).unwrap()
    }

    #[test]
    fn coefficient_scales_with_continuous_density_and_dispersed_fraction() {
        let mesh = channel(3);
        let (air, water) = air_water(&mesh);
        let props = PairProperties::none();
        let pair = OrderedPhasePair::new(&mesh, &air, &water, &props);

        let model = spheres();
        assert_relative_eq!(model.ki(&pair).internal()[0], 500.0);
        assert_relative_eq!(model.k(&pair).internal()[1], 0.1 * 500.0);
        assert_relative_eq!(model.k(&pair).patch(0)[0], 0.1 * 500.0);

        let kf = model.kf(&pair);
        assert_relative_eq!(kf.internal()[0], 0.1 * 500.0);
        assert_relative_eq!(kf.patch(2)[1], 0.1 * 500.0);
    }

    #[test]
    fn reversed_pair_uses_air_as_carrier() {
        let mesh = channel(2);
        let (air, water) = air_water(&mesh);
        let props = PairProperties::none();
        let pair = OrderedPhasePair::new(&mesh, &water, &air, &props);

        assert_relative_eq!(spheres().k(&pair).internal()[0], 0.9 * 0.5 * 1.2);
        assert_eq!(NoVirtualMass.k(&pair), VolField::zeros(&mesh));
    }

    #[test]
    fn rejects_negative_coefficient() {
        let dict = Dictionary::from_json_str("virtualMass", r#"{ "Cvm": -0.5 }"#).unwrap();
        assert!(matches!(
            ConstantVirtualMass::new(&dict),
            Err(ConfigError::OutOfRange { ref key, .. }) if key == "Cvm"
        ));
    }
}
