use crate::support::{
    dictionary::{ConfigError, Dictionary},
    field::{Vector, VolField},
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::{WallLubricationModel, wall_force};

/// Antal et al. wall lubrication: `c = max(0, Cw1/d + Cw2/y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antal {
    cw1: f64,
    cw2: f64,
}

impl Antal {
    pub const TYPE_NAME: &'static str = "Antal";

    /// Reads `Cw1` and `Cw2`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            cw1: dict.lookup("Cw1")?,
            cw2: dict.lookup("Cw2")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn WallLubricationModel>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl WallLubricationModel for Antal {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn wall_force(&self, pair: &OrderedPhasePair<'_>) -> VolField<Vector> {
        let Self { cw1, cw2 } = *self;
        wall_force(pair, move |s| (cw1 / s.d + cw2 / s.y).max(0.0))
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}
