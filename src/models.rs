//! Runtime-selectable models.
//!
//! # Organization
//!
//! - [`multiphase`]: interfacial closure laws for Euler–Euler phase systems
//!   and algebraic slip for drift-flux mixtures.
//! - [`material`]: material property aggregates linked into a
//!   [`MaterialTable`](crate::support::material::MaterialTable).
//! - [`registry`]: the name → constructor tables all models are selected
//!   through.
//!
//! # Model structure
//!
//! Each model type exposes a `TYPE_NAME`, a constructor reading its
//! coefficients from a [`Dictionary`](crate::support::dictionary::Dictionary),
//! and an implementation of its family's trait. Family traits are object
//! safe so that selected models can be stored as `Box<dyn Trait>`.

pub mod material;
pub mod multiphase;
pub mod registry;
