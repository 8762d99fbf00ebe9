use std::sync::Arc;

use crate::{
    models::multiphase::interfacial::drag::Drag,
    support::{
        constraint::{Constrained, StrictlyPositive},
        dictionary::{ConfigError, Dictionary},
        field::VolField,
        phase::{ContinuousTurbulence, OrderedPhasePair},
        selection::SelectionContext,
    },
};

use super::{TurbulentDispersionModel, linked_drag};

/// Gosman et al. dispersion: `D = 0.75 CdRe α_d ν_c ν_t / (σ d²) ρ_c`.
#[derive(Debug, Clone)]
pub struct Gosman {
    sigma: Constrained<f64, StrictlyPositive>,
    drag: Arc<Drag>,
}

impl Gosman {
    pub const TYPE_NAME: &'static str = "Gosman";

    /// Reads `sigma` and links to `drag`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `sigma` is missing or not positive.
    pub fn new(dict: &Dictionary, drag: Arc<Drag>) -> Result<Self, ConfigError> {
        Ok(Self {
            sigma: dict.lookup_constrained("sigma")?,
            drag,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn TurbulentDispersionModel>, ConfigError> {
        let drag = linked_drag(Self::TYPE_NAME, ctx)?;
        Ok(Box::new(Self::new(dict, drag)?))
    }
}

impl TurbulentDispersionModel for Gosman {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn d(&self, pair: &OrderedPhasePair<'_>, turbulence: &ContinuousTurbulence) -> VolField<f64> {
        let sigma = self.sigma.get();
        let cd_re = self.drag.cd_re(pair);
        let (dispersed, continuous) = (pair.dispersed(), pair.continuous());
        let nut = &turbulence.nut;

        VolField::tabulate(&cd_re, |at| {
            let d = dispersed.d[at];
            0.75 * cd_re[at] * dispersed.alpha[at] * continuous.nu[at] * nut[at] / (sigma * d * d)
                * continuous.rho[at]
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        self.sigma = dict.lookup_constrained("sigma")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::multiphase::interfacial::turbulent_dispersion::test_support::{
            schiller_naumann, turbulence,
        },
        support::{
            field::test_support::channel,
            phase::{PairProperties, test_support::air_water},
        },
    };

    #[test]
    fn proportional_to_dispersed_fraction() {
        let mesh = channel(2);
        let (air, water) = air_water(&mesh);
        let props = PairProperties::none();
        let pair = OrderedPhasePair::new(&mesh, &air, &water, &props);

        let drag = schiller_naumann();
        let dict = Dictionary::from_json_str("turbulentDispersion", r#"{ "sigma": 0.9 }"#).unwrap();
        let gosman = Gosman::new(&dict, Arc::clone(&drag)).unwrap();

        let cd_re = drag.cd_re(&pair).internal()[0];
        let expected = 0.75 * cd_re * 0.1 * 1e-6 * 1e-4 / (0.9 * 9e-6) * 1000.0;
        assert_relative_eq!(
            gosman.d(&pair, &turbulence(&mesh)).internal()[1],
            expected,
            max_relative = 1e-12
        );
    }
}
