use crate::support::{
    dictionary::{ConfigError, Dictionary},
    field::VolField,
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::DragModel;

/// Ergun packed-bed drag.
///
/// `CdRe = (4/3) (150 (1 − α_c) / α_c + 1.75 Re)` with `α_c` floored at the
/// continuous phase residual.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ergun;

impl Ergun {
    pub const TYPE_NAME: &'static str = "Ergun";

    pub(crate) fn boxed(
        _dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn DragModel>, ConfigError> {
        Ok(Box::new(Self))
    }

    pub(super) fn kernel(alpha_c: f64, re: f64) -> f64 {
        (4.0 / 3.0) * (150.0 * (1.0 - alpha_c) / alpha_c + 1.75 * re)
    }
}

impl DragModel for Ergun {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        let residual_c = pair.continuous().residual_alpha();
        let alpha_c = &pair.continuous().alpha;
        let re = pair.re();
        VolField::tabulate(&re, |at| Self::kernel(alpha_c[at].max(residual_c), re[at]))
    }

    fn read(&mut self, _dict: &Dictionary) -> Result<(), ConfigError> {
        Ok(())
    }
}
