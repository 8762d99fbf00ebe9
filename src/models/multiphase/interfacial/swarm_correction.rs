//! Swarm corrections to drag.
//!
//! A swarm correction `Cs` multiplies the drag of an isolated inclusion to
//! account for its neighbours.

use crate::support::{
    dictionary::{ConfigError, Dictionary},
    field::VolField,
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

/// A drag swarm correction factor.
pub trait SwarmCorrection: Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &'static str;

    /// Correction factor `Cs`.
    fn cs(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64>;

    /// Re-reads the coefficients from `dict`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid.
    fn read(&mut self, _dict: &Dictionary) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// No correction: `Cs = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoSwarm;

impl NoSwarm {
    pub const TYPE_NAME: &'static str = "noSwarm";

    pub(crate) fn boxed(
        _dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn SwarmCorrection>, ConfigError> {
        Ok(Box::new(Self))
    }
}

impl SwarmCorrection for NoSwarm {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cs(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        VolField::uniform(pair.mesh(), 1.0)
    }
}

/// Tomiyama's correction for bubble swarms: `Cs = max(1 − α_d, residual_c)^(3 − 2l)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TomiyamaSwarm {
    l: f64,
}

impl TomiyamaSwarm {
    pub const TYPE_NAME: &'static str = "TomiyamaSwarm";

    /// Reads the exponent coefficient `l`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `l` is missing or not a number.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            l: dict.lookup("l")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn SwarmCorrection>, ConfigError> {
        Ok(Box::new(Self::new(dict)?))
    }
}

impl SwarmCorrection for TomiyamaSwarm {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn cs(&self, pair: &OrderedPhasePair<'_>) -> VolField<f64> {
        let residual_c = pair.continuous().residual_alpha();
        let exponent = 3.0 - 2.0 * self.l;
        pair.dispersed()
            .alpha
            .map(|alpha_d| (1.0 - alpha_d).max(residual_c).powf(exponent))
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}
