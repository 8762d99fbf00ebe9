use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    dictionary::{ConfigError, Dictionary},
    field::VolField,
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::DragModel;

/// Wen and Yu drag for dilute fluidised suspensions.
///
/// With `α_c' = max(1 − α_d, residual_c)` and `Res = α_c' Re`:
///
/// ```text
/// CdsRes = 24 (1 + 0.15 Res^0.687)   Res < 1000
///        = 0.44 max(Res, residualRe) otherwise
/// CdRe   = CdsRes α_c'^-3.65 max(α_c, residual_c)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WenYu {
    residual_re: Constrained<f64, StrictlyPositive>,
}

impl WenYu {
    pub const TYPE_NAME: &'static str = "WenYu";

    /// Reads `residualRe`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `residualRe` is missing or not positive.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            residual_re: dict.lookup_constrained("residualRe")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn DragModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }

    pub(super) fn kernel(&self, alpha_d: f64, alpha_c: f64, residual_c: f64, re: f64) -> f64 {
        let alpha_c_star = (1.0 - alpha_d).max(residual_c);
        let res = alpha_c_star * re;
        let cds_res = if res < 1000.0 {
            24.0 * (1.0 + 0.15 * res.powf(0.687))
        } else {
            0.44 * res.max(self.residual_re.get())
        };
        cds_res * alpha_c_star.powf(-3.65) * alpha_c.max(residual_c)
    }
}

impl DragModel for WenYu {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        let residual_c = pair.continuous().residual_alpha();
        let (alpha_d, alpha_c) = (&pair.dispersed().alpha, &pair.continuous().alpha);
        let re = pair.re();
        VolField::tabulate(&re, |at| {
            self.kernel(alpha_d[at], alpha_c[at], residual_c, re[at])
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
        models::multiphase::interfacial::drag::test_support::phases,
        support::{field::test_support::channel, phase::PairProperties},
    };

    fn wen_yu() -> WenYu {
        let dict = Dictionary::from_json_str("drag", r#"{ "residualRe": 1e-3 }"#).unwrap();
        WenYu::new(&dict).unwrap()
    }

    fn cd_re(alpha_d: f64, alpha_c: f64, re: f64) -> f64 {
        let mesh = channel(1);
        let (a, b) = phases(&mesh, alpha_d, alpha_c, re);
        let props = PairProperties::none();
        wen_yu().cd_re(&OrderedPhasePair::new(&mesh, &a, &b, &props)).internal()[0]
    }

    #[test]
    fn dilute_suspension_formula() {
        let re = 10.0;
        let res = 0.9 * re;
        let cds_res = 24.0 * (1.0 + 0.15 * f64::powf(res, 0.687));
        assert_relative_eq!(
            cd_re(0.1, 0.9, re),
            cds_res * f64::powf(0.9, -3.65) * 0.9,
            max_relative = 1e-10
        );
    }

    #[test]
    fn newton_regime_is_linear_in_reynolds_number() {
        let re = 5000.0;
        let res = 0.9 * re;
        assert_relative_eq!(
            cd_re(0.1, 0.9, re),
            0.44 * res * f64::powf(0.9, -3.65) * 0.9,
            max_relative = 1e-10
        );
    }

    #[test]
    fn rejects_non_positive_residual_reynolds_number() {
        let dict = Dictionary::from_json_str("drag", r#"{ "residualRe": 0.0 }"#).unwrap();
        assert!(matches!(
            WenYu::new(&dict),
            Err(ConfigError::OutOfRange { ref key, .. }) if key == "residualRe"
        ));
    }
}
