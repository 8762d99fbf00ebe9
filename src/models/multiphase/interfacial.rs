//! Interfacial closure laws of a phase pair.
//!
//! Every law is built through a [`ModelRegistry`](crate::models::registry::ModelRegistry)
//! selection table from its configuration dictionary, evaluates per cell
//! (and where meaningful per face) for an ordered pair of phases, and
//! re-reads its coefficients on `read`.

pub mod blended;
pub mod blending;
pub mod drag;
pub mod lift;
pub mod swarm_correction;
pub mod turbulent_dispersion;
pub mod virtual_mass;
pub mod wall_lubrication;
