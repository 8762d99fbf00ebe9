use crate::support::{
    dictionary::{ConfigError, Dictionary},
    field::VolField,
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::{DragModel, Ergun, WenYu};

/// Continuous-phase fraction at and above which Wen–Yu replaces Ergun.
const DILUTE_LIMIT: f64 = 0.8;

/// Gidaspow's switch between Ergun (dense) and Wen–Yu (dilute) drag.
#[derive(Debug, Clone, PartialEq)]
pub struct GidaspowErgunWenYu {
    wen_yu: WenYu,
}

impl GidaspowErgunWenYu {
    pub const TYPE_NAME: &'static str = "GidaspowErgunWenYu";

    /// Reads `residualRe` for the Wen–Yu branch.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `residualRe` is missing or not positive.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            wen_yu: WenYu::new(dict)?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn DragModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl DragModel for GidaspowErgunWenYu {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        let residual_c = pair.continuous().residual_alpha();
        let (alpha_d, alpha_c) = (&pair.dispersed().alpha, &pair.continuous().alpha);
        let re = pair.re();
        VolField::tabulate(&re, |at| {
            if alpha_c[at] >= DILUTE_LIMIT {
                self.wen_yu.kernel(alpha_d[at], alpha_c[at], residual_c, re[at])
            } else {
                Ergun::kernel(alpha_c[at].max(residual_c), re[at])
            }
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        self.wen_yu.read(dict)
    }
}
