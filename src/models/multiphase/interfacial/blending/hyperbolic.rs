use crate::{
    models::multiphase::interfacial::blending::{BlendingMethod, PhaseFractions, Transition},
    support::{
        constraint::{Constrained, StrictlyPositive},
        dictionary::{ConfigError, Dictionary},
        selection::SelectionContext,
    },
};

/// Smooth `tanh` blending.
///
/// `f1 = (1 + tanh((4/s)(maxDispersedAlpha_2 − α_2)))/2`: phase 1 is
/// continuous while phase 2 stays below its maximum dispersed fraction.
/// `s` is `transitionAlphaScale`, the width of the transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperbolic {
    phases: Vec<String>,
    max_dispersed_alpha: PhaseFractions,
    transition_alpha_scale: Constrained<f64, StrictlyPositive>,
}

impl Hyperbolic {
    pub const TYPE_NAME: &'static str = "hyperbolic";

    /// Reads `transitionAlphaScale` and `maxDispersedAlpha` for every phase in `phases`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the scale is missing or not positive, or
    /// a phase has no `maxDispersedAlpha`.
    pub fn new(dict: &Dictionary, phases: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            phases: phases.to_vec(),
            max_dispersed_alpha: PhaseFractions::read(dict, "maxDispersedAlpha", phases)?,
            transition_alpha_scale: dict.lookup_constrained("transitionAlphaScale")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn BlendingMethod>, ConfigError> {
        Ok(Box::new(Self::new(dict, ctx.phase_names)?))
    }
}

impl BlendingMethod for Hyperbolic {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn transition(&self, _continuous: &str, other: &str) -> Result<Transition, ConfigError> {
        Ok(Transition::Hyperbolic {
            threshold: self.max_dispersed_alpha.get(other)?,
            scale: self.transition_alpha_scale.get(),
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict, &self.phases)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{
        field::{VolField, test_support::channel},
        phase::test_support::air_water,
    };

    fn phases() -> Vec<String> {
        vec!["air".into(), "water".into()]
    }

    fn hyperbolic() -> Hyperbolic {
        let dict = Dictionary::from_json_str(
            "blending/default",
            r#"{
                "type": "hyperbolic",
                "transitionAlphaScale": 0.4,
                "maxDispersedAlpha": { "air": 0.3, "water": 0.5 }
            }"#,
        )
        .unwrap();
        Hyperbolic::new(&dict, &phases()).unwrap()
    }

    #[test]
    fn half_weight_at_threshold() {
        let mesh = channel(2);
        let (mut air, mut water) = air_water(&mesh);
        let model = hyperbolic();

        water.alpha = VolField::uniform(&mesh, 0.5);
        air.alpha = VolField::uniform(&mesh, 0.5);
        // f1(air, water) is driven by water against water's threshold.
        assert_eq!(model.f1(&air, &water).unwrap().internal(), &[0.5, 0.5]);

        air.alpha = VolField::uniform(&mesh, 0.3);
        assert_eq!(model.f2(&air, &water).unwrap().internal(), &[0.5, 0.5]);
    }

    #[test]
    fn bubbly_flow_favours_water_continuous_regime() {
        let mesh = channel(2);
        let (air, water) = air_water(&mesh);
        let model = hyperbolic();

        // air 0.1 is well below its threshold 0.3, water 0.9 well above 0.5.
        let water_continuous = model.f1(&water, &air).unwrap();
        let air_continuous = model.f1(&air, &water).unwrap();
        assert!(water_continuous.internal()[0] > 0.95);
        assert!(air_continuous.internal()[0] < 0.05);
        assert_eq!(model.f2(&air, &water).unwrap(), water_continuous);

        let faces = model.f1_face(&mesh, &water, &air).unwrap();
        assert_relative_eq!(
            faces.internal()[0],
            water_continuous.internal()[0],
            max_relative = 1e-12
        );
    }

    #[test]
    fn missing_threshold_is_fatal() {
        let dict = Dictionary::from_json_str(
            "blending/default",
            r#"{ "transitionAlphaScale": 0.4, "maxDispersedAlpha": { "air": 0.3 } }"#,
        )
        .unwrap();
        let err = Hyperbolic::new(&dict, &phases()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "entry \"maxDispersedAlpha\" for phase \"water\" is undefined in dictionary \"blending/default\""
        );
    }

    #[test]
    fn read_is_idempotent() {
        let dict = Dictionary::from_json_str(
            "blending/default",
            r#"{ "transitionAlphaScale": 0.2, "maxDispersedAlpha": { "air": 0.25, "water": 0.4 } }"#,
        )
        .unwrap();
        let mut model = hyperbolic();
        model.read(&dict).unwrap();
        let once = model.clone();
        model.read(&dict).unwrap();
        assert_eq!(model, once);
        assert_eq!(model, Hyperbolic::new(&dict, &phases()).unwrap());
    }
}
