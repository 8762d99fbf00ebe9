use crate::{
    models::multiphase::interfacial::blending::{BlendingMethod, Transition},
    support::{
        dictionary::{ConfigError, Dictionary},
        selection::SelectionContext,
    },
};

/// No blending: one named phase is always continuous.
#[derive(Debug, Clone, PartialEq)]
pub struct NoBlending {
    phases: Vec<String>,
    continuous_phase: String,
}

impl NoBlending {
    pub const TYPE_NAME: &'static str = "none";

    /// Reads `continuousPhase`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `continuousPhase` is missing or, when
    /// `phases` is not empty, is not one of them.
    pub fn new(dict: &Dictionary, phases: &[String]) -> Result<Self, ConfigError> {
        let continuous_phase = dict.word("continuousPhase")?;
        if !phases.is_empty() && !phases.contains(&continuous_phase) {
            return Err(ConfigError::InvalidEntry {
                key: "continuousPhase".into(),
                dictionary: dict.path().to_string(),
                reason: format!("{continuous_phase} is not a phase of the system"),
            });
        }
        Ok(Self {
            phases: phases.to_vec(),
            continuous_phase,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn BlendingMethod>, ConfigError> {
        Ok(Box::new(Self::new(dict, ctx.phase_names)?))
    }
}

impl BlendingMethod for NoBlending {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn transition(&self, continuous: &str, _other: &str) -> Result<Transition, ConfigError> {
        let weight = if continuous == self.continuous_phase { 1.0 } else { 0.0 };
        Ok(Transition::Constant(weight))
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict, &self.phases)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::{field::test_support::channel, phase::test_support::air_water};

    #[test]
    fn selects_one_regime() {
        let phases = vec!["air".to_string(), "water".to_string()];
        let dict =
            Dictionary::from_json_str("blending", r#"{ "continuousPhase": "water" }"#).unwrap();
        let model = NoBlending::new(&dict, &phases).unwrap();

        let mesh = channel(2);
        let (air, water) = air_water(&mesh);
        assert!(model.f1(&air, &water).unwrap().internal().iter().all(|&f| f == 0.0));
        assert!(model.f2(&air, &water).unwrap().internal().iter().all(|&f| f == 1.0));

        let dict = Dictionary::from_json_str("blending", r#"{ "continuousPhase": "oil" }"#).unwrap();
        assert!(NoBlending::new(&dict, &phases).is_err());
    }
}
