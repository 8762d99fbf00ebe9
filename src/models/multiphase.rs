//! Eulerian multiphase models.

pub mod interfacial;
pub mod momentum_transfer;
pub mod relative_velocity;
