//! # Twine Multiphase
//!
//! Runtime-selectable closure models for Eulerian multiphase flow and
//! material property tables, for use with
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Drag, wall lubrication, turbulent dispersion, blending,
//!   relative velocity and material property models, plus the registry
//!   they are selected from.
//! - [`support`]: Fields and meshes, configuration dictionaries, phases,
//!   selection tables and the material dependency table.
//!
//! ## Usage
//!
//! Models are selected by name from a configuration dictionary:
//!
//! ```
//! use twine_multiphase::{
//!     models::registry::ModelRegistry,
//!     support::{
//!         dictionary::Dictionary,
//!         material::{MaterialState, MaterialTableBuilder},
//!     },
//! };
//! use uom::si::{
//!     f64::{Pressure, ThermodynamicTemperature},
//!     mass_density::kilogram_per_cubic_meter,
//!     pressure::pascal,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let air = Dictionary::from_json_str(
//!     "air",
//!     r#"{ "models": [
//!         { "type": "specieR", "molWeight": 28.96 },
//!         { "type": "perfectGas" }
//!     ] }"#,
//! )?;
//! let table = MaterialTableBuilder::from_config(&air, ModelRegistry::builtin())?.link()?;
//!
//! let state = MaterialState::new(
//!     ThermodynamicTemperature::new::<kelvin>(288.15),
//!     Pressure::new::<pascal>(101_325.0),
//! );
//! let rho = table.density(&state)?;
//! assert!((rho.get::<kilogram_per_cubic_meter>() - 1.225).abs() < 1e-3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Errors
//!
//! Configuration mistakes are reported when models are constructed or a
//! material table is linked, as [`ConfigError`](support::dictionary::ConfigError)
//! or [`MaterialError`](support::material::MaterialError) values naming the
//! offending key, model and dictionary. Closure-law evaluation does not fail.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: model selection and table
//! linking at `info`, per-entry detail at `debug`. It never installs a logger.

pub mod models;
pub mod support;
