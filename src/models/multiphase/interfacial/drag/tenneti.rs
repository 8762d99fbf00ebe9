use crate::support::{
    dictionary::{ConfigError, Dictionary},
    field::VolField,
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::{DragModel, SchillerNaumann, schiller_naumann_cd_re};

/// Tenneti, Garg and Subramaniam drag for fixed particle assemblies.
///
/// With `α_d`, `α_c` floored at their phase residuals and `Re` at `residualRe`:
///
/// ```text
/// F0   = 5.81 α_d / α_c³ + 0.48 α_d^(1/3) / α_c⁴
/// F1   = α_d³ Re (0.95 + 0.61 α_d³ / α_c²)
/// CdRe = CdRe_SN / (α_c Re) + 24 α_c² (F0 + F1)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tenneti {
    isolated: SchillerNaumann,
}

impl Tenneti {
    pub const TYPE_NAME: &'static str = "Tenneti";

    /// Reads `residualRe`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `residualRe` is missing or not positive.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            isolated: SchillerNaumann::new(dict)?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn DragModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl DragModel for Tenneti {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        let residual_re = self.isolated.residual_re();
        let residual_d = pair.dispersed().residual_alpha();
        let residual_c = pair.continuous().residual_alpha();
        let (alpha_d, alpha_c) = (&pair.dispersed().alpha, &pair.continuous().alpha);
        let re = pair.re();

        VolField::tabulate(&re, |at| {
            let ad = alpha_d[at].max(residual_d);
            let ac = alpha_c[at].max(residual_c);
            let re = re[at].max(residual_re);

            let f0 = 5.81 * ad / ac.powi(3) + 0.48 * ad.cbrt() / ac.powi(4);
            let f1 = ad.powi(3) * re * (0.95 + 0.61 * ad.powi(3) / ac.powi(2));

            schiller_naumann_cd_re(re) / (ac * re) + 24.0 * ac.powi(2) * (f0 + f1)
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        self.isolated.read(dict)
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

    fn tenneti() -> Tenneti {
        let dict = Dictionary::from_json_str("drag", r#"{ "residualRe": 1e-3 }"#).unwrap();
        Tenneti::new(&dict).unwrap()
    }

    fn cd_re(alpha_d: f64, alpha_c: f64, re: f64) -> f64 {
        let mesh = channel(1);
        let (a, b) = phases(&mesh, alpha_d, alpha_c, re);
        let props = PairProperties::none();
        tenneti().cd_re(&OrderedPhasePair::new(&mesh, &a, &b, &props)).internal()[0]
    }

    #[test]
    fn matches_correlation() {
        let (ad, ac, re) = (0.3_f64, 0.7_f64, 20.0_f64);
        let f0 = 5.81 * ad / ac.powi(3) + 0.48 * ad.cbrt() / ac.powi(4);
        let f1 = ad.powi(3) * re * (0.95 + 0.61 * ad.powi(3) / ac.powi(2));
        let expected = schiller_naumann_cd_re(re) / (ac * re) + 24.0 * ac * ac * (f0 + f1);

        assert_relative_eq!(cd_re(ad, ac, re), expected, max_relative = 1e-10);
    }

    #[test]
    fn residual_floors_are_applied_before_division() {
        let (res, res_re) = (1e-6, 1e-3);
        for (ad, ac, re) in [(0.0, 0.0, 0.0), (1e-9, 0.5, 1e-7), (0.4, 1e-12, 5.0)] {
            let raw = cd_re(ad, ac, re);
            assert!(raw.is_finite(), "({ad}, {ac}, {re})");
            assert_relative_eq!(
                raw,
                cd_re(f64::max(ad, res), f64::max(ac, res), f64::max(re, res_re)),
                max_relative = 1e-9
            );
        }
    }
}
