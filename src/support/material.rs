//! Material property models and their dependency table.
//!
//! A material is described by an ordered list of aggregates, each a
//! [`MaterialModel`] that provides some [`Property`] values and may require
//! others to compute them. Perfect-gas density, for example, provides `rho`
//! and requires the gas constant `R` from whichever aggregate provides it.
//!
//! [`MaterialTableBuilder::link`] resolves every requirement to the first
//! aggregate in table order that provides it and rejects missing compulsory
//! requirements and dependency cycles. Only the linked [`MaterialTable`] can
//! evaluate properties.

mod error;
mod property;
mod state;
mod table;

pub use error::{MaterialError, PropertyError};
pub use property::{Property, Requirement};
pub use state::MaterialState;
pub use table::{Dependencies, MaterialTable, MaterialTableBuilder};

use crate::support::dictionary::{ConfigError, Dictionary};

/// One aggregate of a material.
pub trait MaterialModel: Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &'static str;

    /// Properties this aggregate can evaluate.
    fn provides(&self) -> &[Property];

    /// What evaluating `property` needs from other aggregates.
    fn requires(&self, _property: Property) -> Vec<Requirement> {
        Vec::new()
    }

    /// Evaluates `property`, which must be one of [`provides`](Self::provides).
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the state is outside the model's domain
    /// or a dependency fails.
    fn evaluate(
        &self,
        property: Property,
        state: &MaterialState,
        deps: &Dependencies<'_>,
    ) -> Result<f64, PropertyError>;

    /// Re-reads the coefficients from `dict`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid.
    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError>;
}
