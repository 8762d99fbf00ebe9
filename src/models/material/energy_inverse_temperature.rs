use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{
    available_energy::joule_per_kilogram, f64::ThermodynamicTemperature,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    dictionary::{ConfigError, Dictionary},
    material::{
        Dependencies, MaterialModel, MaterialState, Property, PropertyError, Requirement,
    },
    selection::SelectionContext,
    units::SpecificEnthalpy,
};

/// Temperature from absolute enthalpy.
///
/// Solves `ha(T, p) = h` for `T` in `[Tlow, Thigh]` by bisection, with `ha`
/// taken from whichever aggregate provides it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyInverseTemperature {
    t_low: f64,
    t_high: f64,
    tolerance: Constrained<f64, StrictlyPositive>,
    max_iter: usize,
}

impl EnergyInverseTemperature {
    pub const TYPE_NAME: &'static str = "energyInverseTemperature";

    /// Reads `Tlow`, `Thigh` and the optional `tolerance` (K) and `maxIter`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a limit is missing, `Tlow` is not
    /// positive or `Thigh` is not above `Tlow`.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        let t_low: Constrained<f64, StrictlyPositive> = dict.lookup_constrained("Tlow")?;
        let t_high: f64 = dict.lookup("Thigh")?;
        if t_high <= t_low.get() {
            return Err(ConfigError::InvalidEntry {
                key: "Thigh".into(),
                dictionary: dict.path().to_string(),
                reason: format!("must exceed Tlow = {}", t_low.get()),
            });
        }
        Ok(Self {
            t_low: t_low.get(),
            t_high,
            tolerance: dict.lookup_constrained_or("tolerance", 1e-6)?,
            max_iter: dict.lookup_or("maxIter", 100)?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn MaterialModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }

    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iter,
            x_abs_tol: self.tolerance.get(),
            x_rel_tol: 0.0,
            residual_tol: 0.0,
        }
    }

    fn out_of_domain(&self, context: String) -> PropertyError {
        PropertyError::OutOfDomain {
            model: Self::TYPE_NAME.to_string(),
            context,
        }
    }
}

impl MaterialModel for EnergyInverseTemperature {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn provides(&self) -> &[Property] {
        &[Property::T]
    }

    fn requires(&self, _property: Property) -> Vec<Requirement> {
        vec![Requirement::compulsory(Property::Ha)]
    }

    fn evaluate(
        &self,
        _property: Property,
        state: &MaterialState,
        deps: &Dependencies<'_>,
    ) -> Result<f64, PropertyError> {
        let target = state
            .enthalpy
            .ok_or_else(|| self.out_of_domain("state carries no enthalpy to invert".into()))?;

        let model = EnthalpyModel { deps, state };
        let low = model.call(&ThermodynamicTemperature::new::<kelvin>(self.t_low))?;
        let high = model.call(&ThermodynamicTemperature::new::<kelvin>(self.t_high))?;
        let (h_low, h_high) = (low.enthalpy.value, high.enthalpy.value);
        if target < h_low.min(h_high) || target > h_low.max(h_high) {
            return Err(self.out_of_domain(format!(
                "h = {target} J/kg is outside [{h_low}, {h_high}] J/kg for T in [{}, {}] K",
                self.t_low, self.t_high
            )));
        }

        let problem = TargetEnthalpy {
            target: SpecificEnthalpy::new::<joule_per_kilogram>(target),
        };
        let solution = bisection::solve(
            &model,
            &problem,
            [self.t_low, self.t_high],
            &self.bisection(),
            |event: &bisection::Event<'_, _, _>| {
                if event.result().is_err() {
                    return Some(bisection::Action::assume_positive());
                }
                None
            },
        )?;

        if solution.status != bisection::Status::Converged {
            return Err(PropertyError::MaxIters {
                residual: solution.residual,
                iters: solution.iters,
            });
        }

        Ok(solution.snapshot.output.temperature.get::<kelvin>())
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}

/// Absolute enthalpy at a trial temperature.
#[derive(Clone)]
struct EnthalpyAt {
    temperature: ThermodynamicTemperature,
    enthalpy: SpecificEnthalpy,
}

/// Evaluates the linked `ha` at the state's pressure and a trial temperature.
struct EnthalpyModel<'a, 'd> {
    deps: &'a Dependencies<'d>,
    state: &'a MaterialState,
}

impl Model for EnthalpyModel<'_, '_> {
    type Input = ThermodynamicTemperature;
    type Output = EnthalpyAt;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let trial = self.state.at_temperature(input.get::<kelvin>());
        let ha = self.deps.get(Property::Ha, &trial)?;
        Ok(EnthalpyAt {
            temperature: *input,
            enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(ha),
        })
    }
}

/// Residual `ha(T) − h`.
struct TargetEnthalpy {
    target: SpecificEnthalpy,
}

impl EquationProblem<1> for TargetEnthalpy {
    type Input = ThermodynamicTemperature;
    type Output = EnthalpyAt;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let h = output.enthalpy.get::<joule_per_kilogram>();
        Ok([h - self.target.get::<joule_per_kilogram>()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::{
            material::test_support::{at, material},
            registry::ModelRegistry,
        },
        support::material::{MaterialError, MaterialTableBuilder},
    };

    const AIR: &str = r#"{
        "models": [
            { "type": "specieR", "molWeight": 28.96 },
            {
                "type": "janaf",
                "Tlow": 200.0, "Thigh": 3500.0, "Tcommon": 1000.0,
                "highCpCoeffs": [3.3, 5e-4, -1e-7, 0.0, 0.0, -1000.0, 0.0],
                "lowCpCoeffs": [3.3, 5e-4, -1e-7, 0.0, 0.0, -1000.0, 0.0]
            },
            { "type": "CpMCvIdeal" },
            { "type": "energyInverseTemperature", "Tlow": 200.0, "Thigh": 3000.0, "tolerance": 1e-8 }
        ]
    }"#;

    fn with_enthalpy(state: MaterialState, h: f64) -> MaterialState {
        state.with_enthalpy(SpecificEnthalpy::new::<joule_per_kilogram>(h))
    }

    #[test]
    fn inverts_janaf_enthalpy() {
        let table = material(AIR);
        for t in [300.0, 742.5, 1800.0] {
            let h = table.evaluate(Property::Ha, &at(t)).unwrap();
            let guess = with_enthalpy(at(1000.0), h);
            let solved = table.temperature(&guess).unwrap();
            assert_relative_eq!(solved.get::<kelvin>(), t, epsilon = 1e-6);
        }
    }

    #[test]
    fn inverts_constant_heat_capacity_exactly() {
        let table = material(
            r#"{ "models": [
                { "type": "hConst", "Cp": 4195.0, "Hf": 0.0 },
                { "type": "energyInverseTemperature", "Tlow": 273.16, "Thigh": 647.0 }
            ] }"#,
        );
        let state = with_enthalpy(at(300.0), 4195.0 * 25.0);
        let t = table.evaluate(Property::T, &state).unwrap();
        assert_relative_eq!(t, 298.15 + 25.0, epsilon = 1e-5);
    }

    #[test]
    fn enthalpy_outside_limits_is_out_of_domain() {
        let table = material(AIR);
        let h = table.evaluate(Property::Ha, &at(3200.0)).unwrap();
        assert!(matches!(
            table.temperature(&with_enthalpy(at(300.0), h)),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn needs_an_enthalpy() {
        let table = material(AIR);
        assert!(matches!(
            table.temperature(&at(300.0)),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn requires_an_enthalpy_provider() {
        let dict = Dictionary::from_json_str(
            "material",
            r#"{ "models": [{ "type": "energyInverseTemperature", "Tlow": 200, "Thigh": 3000 }] }"#,
        )
        .unwrap();
        let err = MaterialTableBuilder::from_config(&dict, ModelRegistry::builtin())
            .unwrap()
            .link()
            .err()
            .unwrap();
        assert_eq!(
            err,
            MaterialError::MissingDependency {
                model: EnergyInverseTemperature::TYPE_NAME.into(),
                property: Property::T,
                requirement: Property::Ha,
            }
        );
    }

    #[test]
    fn read_updates_limits() {
        let mut table = material(AIR);
        let dict = Dictionary::from_json_str(
            "material",
            &AIR.replace(r#""Thigh": 3000.0"#, r#""Thigh": 3400.0"#),
        )
        .unwrap();
        table.read(&dict).unwrap();

        let h = table.evaluate(Property::Ha, &at(3200.0)).unwrap();
        let t = table.temperature(&with_enthalpy(at(300.0), h)).unwrap();
        assert_relative_eq!(t.get::<kelvin>(), 3200.0, epsilon = 1e-6);
    }
}
