//! Material property aggregates.
//!
//! Each aggregate implements [`MaterialModel`] for one piece of a material
//! description: an equation of state, a thermodynamic law, or the inversion
//! of enthalpy to temperature. A material is an ordered list of aggregates
//! linked into a [`MaterialTable`](crate::support::material::MaterialTable).
//!
//! [`MaterialModel`]: crate::support::material::MaterialModel

mod cp_m_cv_ideal;
mod energy_inverse_temperature;
mod h_const;
mod janaf;
mod perfect_gas;
mod rho_const;
mod specie_r;

pub use cp_m_cv_ideal::CpMCvIdeal;
pub use energy_inverse_temperature::EnergyInverseTemperature;
pub use h_const::{HConst, T_STD};
pub use janaf::Janaf;
pub use perfect_gas::{P_STD, PerfectGas};
pub use rho_const::RhoConst;
pub use specie_r::SpecieR;

use crate::support::material::{
    Dependencies, MaterialState, Property, PropertyError, Requirement,
};

/// Requirements of the internal energy that belongs to `enthalpy`.
fn internal_energy_requirements(enthalpy: Property) -> Vec<Requirement> {
    vec![
        Requirement::compulsory(enthalpy),
        Requirement::optional(Property::Rho),
        Requirement::optional(Property::R),
    ]
}

/// `e = h − p/ρ`, falling back to `h − R T` when no density is linked.
fn internal_energy(
    enthalpy: Property,
    state: &MaterialState,
    deps: &Dependencies<'_>,
) -> Result<f64, PropertyError> {
    let h = deps.get(enthalpy, state)?;
    let flow_work = if deps.has(Property::Rho) {
        state.pressure / deps.get(Property::Rho, state)?
    } else {
        deps.get(Property::R, state)? * state.temperature
    };
    Ok(h - flow_work)
}

/// Pressure contribution to entropy, zero when no equation of state provides it.
fn pressure_entropy(state: &MaterialState, deps: &Dependencies<'_>) -> Result<f64, PropertyError> {
    if deps.has(Property::Sp) {
        deps.get(Property::Sp, state)
    } else {
        Ok(0.0)
    }
}
