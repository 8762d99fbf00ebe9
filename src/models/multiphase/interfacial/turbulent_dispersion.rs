//! Turbulent dispersion.
//!
//! A turbulent dispersion law provides the diffusivity `D` with which
//! continuous-phase turbulence spreads the dispersed phase down its fraction
//! gradient. Drag-based laws fetch the drag model of the same pair from the
//! object registry when they are constructed.

mod burns;
mod constant_coefficient;
mod gosman;
mod lopez_de_bertodano;

pub use burns::Burns;
pub use constant_coefficient::ConstantCoefficient;
pub use gosman::Gosman;
pub use lopez_de_bertodano::LopezDeBertodano;

use std::sync::Arc;

use crate::{
    models::multiphase::interfacial::drag::{self, Drag},
    support::{
        dictionary::{ConfigError, Dictionary},
        field::VolField,
        phase::{ContinuousTurbulence, OrderedPhasePair},
        selection::SelectionContext,
    },
};

/// A turbulent dispersion law.
pub trait TurbulentDispersionModel: Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &'static str;

    /// Turbulent diffusivity of the dispersed phase.
    fn d(&self, pair: &OrderedPhasePair<'_>, turbulence: &ContinuousTurbulence) -> VolField<f64>;

    /// Re-reads the coefficients from `dict`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing or invalid.
    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError>;
}

/// Fetches the drag model of the context's pair, which `model` depends on.
fn linked_drag(model: &str, ctx: &SelectionContext<'_>) -> Result<Arc<Drag>, ConfigError> {
    let pair = ctx.require_pair(model)?;
    let drag = ctx.objects.lookup::<Drag>(&drag::object_name(pair))?;
    log::debug!("{model} for {pair} uses {} drag", drag.law().type_name());
    Ok(drag)
}

/// No turbulent dispersion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoTurbulentDispersion;

impl NoTurbulentDispersion {
    pub const TYPE_NAME: &'static str = "noTurbulentDispersion";

    pub(crate) fn boxed(
        _dict: &Dictionary,
        _ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn TurbulentDispersionModel>, ConfigError> {
        Ok(Box::new(Self))
    }
}

impl TurbulentDispersionModel for NoTurbulentDispersion {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn d(&self, pair: &OrderedPhasePair<'_>, _turbulence: &ContinuousTurbulence) -> VolField<f64> {
        VolField::zeros(pair.mesh())
    }

    fn read(&mut self, _dict: &Dictionary) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::{
        models::multiphase::interfacial::{
            drag::{Drag, SchillerNaumann},
            swarm_correction::NoSwarm,
        },
        support::{
            dictionary::Dictionary,
            field::{Mesh, VolField},
            phase::{ContinuousTurbulence, PairKey},
            selection::ObjectRegistry,
        },
    };

    /// Schiller–Naumann drag with `residualRe = 1e-3`.
    pub(crate) fn schiller_naumann() -> Arc<Drag> {
        let dict = Dictionary::from_json_str("drag", r#"{ "residualRe": 1e-3 }"#).unwrap();
        Arc::new(Drag::new(
            Box::new(SchillerNaumann::new(&dict).unwrap()),
            Box::new(NoSwarm),
        ))
    }

    /// An object registry holding `drag` for `pair`.
    pub(crate) fn objects_with_drag(pair: &PairKey, drag: Arc<Drag>) -> ObjectRegistry {
        let mut objects = ObjectRegistry::default();
        objects.insert(format!("dragModel.{pair}"), drag);
        objects
    }

    /// `k = 0.01`, `nut = 1e-4` everywhere.
    pub(crate) fn turbulence(mesh: &Mesh) -> ContinuousTurbulence {
        ContinuousTurbulence {
            k: VolField::uniform(mesh, 0.01),
            nut: VolField::uniform(mesh, 1e-4),
        }
    }
}
