//! Blending between dispersed-flow regimes.
//!
//! For phases 1 and 2 a blending method yields two weights:
//!
//! - `f1`: weight of the regime where phase 1 is continuous (phase 2 dispersed in phase 1),
//! - `f2`: weight of the regime where phase 2 is continuous.
//!
//! Both lie in `[0, 1]`; they need not sum to one, the remainder being the
//! weight of the fully mixed regime. `f2(phase1, phase2)` is always
//! `f1(phase2, phase1)`.

mod hyperbolic;
mod linear;
mod none;

pub use hyperbolic::Hyperbolic;
pub use linear::Linear;
pub use none::NoBlending;

use std::collections::BTreeMap;

use crate::support::{
    constraint::{Constrained, UnitInterval},
    dictionary::{ConfigError, Dictionary},
    field::{Mesh, SurfaceField, VolField, interpolate},
    phase::Phase,
};

/// Shape of one blending weight as a function of the phase fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// `(1 + tanh((4/scale)(threshold − α_other)))/2`.
    Hyperbolic { threshold: f64, scale: f64 },
    /// `clamp((α_self − partly)/(fully − partly), 0, 1)`.
    Linear { partly: f64, fully: f64 },
    /// A fixed weight.
    Constant(f64),
}

impl Transition {
    /// Weight for the regime where the phase with fraction `alpha_self` is continuous.
    #[must_use]
    pub fn weight(self, alpha_self: f64, alpha_other: f64) -> f64 {
        match self {
            Self::Hyperbolic { threshold, scale } => {
                0.5 * (1.0 + ((4.0 / scale) * (threshold - alpha_other)).tanh())
            }
            Self::Linear { partly, fully } => {
                ((alpha_self - partly) / (fully - partly + f64::EPSILON)).clamp(0.0, 1.0)
            }
            Self::Constant(weight) => weight,
        }
    }
}

/// A blending method.
pub trait BlendingMethod: Send + Sync {
    /// Registered type name.
    fn type_name(&self) -> &'static str;

    /// Transition of the weight of the regime where `continuous` surrounds `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingPhaseEntry`] if a phase has no configured
    /// parameters.
    fn transition(&self, continuous: &str, other: &str) -> Result<Transition, ConfigError>;

    /// Re-reads the parameters from `dict`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a parameter is missing or invalid.
    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError>;

    /// Weight of the phase-1-continuous regime in cells.
    ///
    /// # Errors
    ///
    /// See [`BlendingMethod::transition`].
    fn f1(&self, phase1: &Phase, phase2: &Phase) -> Result<VolField<f64>, ConfigError> {
        let t = self.transition(phase1.name(), phase2.name())?;
        Ok(phase1.alpha.zip_map(&phase2.alpha, move |a1, a2| t.weight(a1, a2)))
    }

    /// Weight of the phase-2-continuous regime in cells.
    ///
    /// # Errors
    ///
    /// See [`BlendingMethod::transition`].
    fn f2(&self, phase1: &Phase, phase2: &Phase) -> Result<VolField<f64>, ConfigError> {
        self.f1(phase2, phase1)
    }

    /// Weight of the phase-1-continuous regime on faces.
    ///
    /// # Errors
    ///
    /// See [`BlendingMethod::transition`].
    fn f1_face(
        &self,
        mesh: &Mesh,
        phase1: &Phase,
        phase2: &Phase,
    ) -> Result<SurfaceField<f64>, ConfigError> {
        let t = self.transition(phase1.name(), phase2.name())?;
        let (a1, a2) = (interpolate(mesh, &phase1.alpha), interpolate(mesh, &phase2.alpha));
        Ok(a1.zip_map(&a2, move |a1, a2| t.weight(a1, a2)))
    }

    /// Weight of the phase-2-continuous regime on faces.
    ///
    /// # Errors
    ///
    /// See [`BlendingMethod::transition`].
    fn f2_face(
        &self,
        mesh: &Mesh,
        phase1: &Phase,
        phase2: &Phase,
    ) -> Result<SurfaceField<f64>, ConfigError> {
        self.f1_face(mesh, phase2, phase1)
    }
}

/// Per-phase fractions read from the sub-dictionary `key` of `dict`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PhaseFractions {
    key: &'static str,
    dictionary: String,
    values: BTreeMap<String, Constrained<f64, UnitInterval>>,
}

impl PhaseFractions {
    /// Reads `dict[key]` and checks that every phase in `phases` has an entry.
    pub(crate) fn read(
        dict: &Dictionary,
        key: &'static str,
        phases: &[String],
    ) -> Result<Self, ConfigError> {
        let sub = dict.sub_dict(key)?;
        let values = sub
            .toc()
            .into_iter()
            .map(|phase| Ok((phase.to_string(), sub.lookup_constrained::<UnitInterval>(phase)?)))
            .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;
        let fractions = Self {
            key,
            dictionary: dict.path().to_string(),
            values,
        };
        for phase in phases {
            fractions.get(phase)?;
        }
        Ok(fractions)
    }

    pub(crate) fn get(&self, phase: &str) -> Result<f64, ConfigError> {
        self.values
            .get(phase)
            .map(|v| v.get())
            .ok_or_else(|| ConfigError::MissingPhaseEntry {
                key: self.key.to_string(),
                phase: phase.to_string(),
                dictionary: self.dictionary.clone(),
            })
    }
}
