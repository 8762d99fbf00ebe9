use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    dictionary::{ConfigError, Dictionary},
    field::VolField,
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::{DragModel, schiller_naumann_cd_re};

/// Schiller–Naumann drag for isolated spheres.
///
/// `CdRe = 24 (1 + 0.15 Re^0.687)` below `Re = 1000` and `0.44 Re` above,
/// with `Re` floored at `residualRe`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchillerNaumann {
    residual_re: Constrained<f64, StrictlyPositive>,
}

impl SchillerNaumann {
    pub const TYPE_NAME: &'static str = "SchillerNaumann";

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

    #[must_use]
    pub fn residual_re(&self) -> f64 {
        self.residual_re.get()
    }
}

impl DragModel for SchillerNaumann {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        let residual_re = self.residual_re();
        pair.re().map(|re| schiller_naumann_cd_re(re.max(residual_re)))
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}
