//! Blending of the per-orientation models of one phase pair.
//!
//! A pair of phases 1 and 2 can carry up to three models of one family: a
//! general model for the fully mixed regime, `1In2` (phase 1 dispersed in
//! phase 2) and `2In1`. The blended value is
//!
//! ```text
//! X = general (1 − f1 − f2) + 2In1 f1 + 1In2 f2
//! ```
//!
//! where `f1` and `f2` come from a [`BlendingMethod`]. Missing models
//! contribute nothing.

use std::sync::Arc;

use crate::{
    models::multiphase::interfacial::blending::BlendingMethod,
    support::{
        dictionary::ConfigError,
        field::{FieldValue, SurfaceField, VolField},
        phase::{OrderedPhasePair, PairKey, PhasePair},
    },
};

/// How a model's result transforms when the phases swap roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Exchange coefficients and diffusivities: the same for either phase.
    Even,
    /// Forces on the dispersed phase: the `2In1` result acts on phase 2 and
    /// is negated so that the blended value acts on phase 1.
    Odd,
}

impl Parity {
    fn two_in_one_sign(self) -> f64 {
        match self {
            Self::Even => 1.0,
            Self::Odd => -1.0,
        }
    }
}

/// Which of the three slots a configured model fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    General,
    OneInTwo,
    TwoInOne,
}

impl Orientation {
    pub const ALL: [Self; 3] = [Self::General, Self::OneInTwo, Self::TwoInOne];

    /// Slot of `key` relative to the pair `(phase1, phase2)`.
    ///
    /// `key` is expected to name the same two phases.
    #[must_use]
    pub fn of(key: &PairKey, phase1: &str) -> Self {
        match key {
            PairKey::Unordered { .. } => Self::General,
            PairKey::Ordered { dispersed, .. } if dispersed == phase1 => Self::OneInTwo,
            PairKey::Ordered { .. } => Self::TwoInOne,
        }
    }
}

/// The models of one family configured for one phase pair.
pub struct BlendedModel<M: ?Sized> {
    phase1: String,
    phase2: String,
    general: Option<Arc<M>>,
    one_in_two: Option<Arc<M>>,
    two_in_one: Option<Arc<M>>,
}

impl<M: ?Sized> BlendedModel<M> {
    /// An empty set of models for the pair `(phase1, phase2)`.
    #[must_use]
    pub fn new(phase1: impl Into<String>, phase2: impl Into<String>) -> Self {
        Self {
            phase1: phase1.into(),
            phase2: phase2.into(),
            general: None,
            one_in_two: None,
            two_in_one: None,
        }
    }

    #[must_use]
    pub fn phase1(&self) -> &str {
        &self.phase1
    }

    #[must_use]
    pub fn phase2(&self) -> &str {
        &self.phase2
    }

    /// The model in slot `orientation`, if any.
    #[must_use]
    pub fn get(&self, orientation: Orientation) -> Option<&Arc<M>> {
        self.slot(orientation).as_ref()
    }

    /// Stores `model` in slot `orientation` and returns the model it replaces.
    pub fn set(&mut self, orientation: Orientation, model: Arc<M>) -> Option<Arc<M>> {
        self.slot_mut(orientation).replace(model)
    }

    /// Configuration key of slot `orientation`.
    #[must_use]
    pub fn key(&self, orientation: Orientation) -> PairKey {
        let (phase1, phase2) = (self.phase1.as_str(), self.phase2.as_str());
        match orientation {
            Orientation::General => PairKey::unordered(phase1, phase2),
            Orientation::OneInTwo => PairKey::ordered(phase1, phase2),
            Orientation::TwoInOne => PairKey::ordered(phase2, phase1),
        }
    }

    /// Returns `true` if no slot is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.general.is_none() && self.one_in_two.is_none() && self.two_in_one.is_none()
    }

    fn slot(&self, orientation: Orientation) -> &Option<Arc<M>> {
        match orientation {
            Orientation::General => &self.general,
            Orientation::OneInTwo => &self.one_in_two,
            Orientation::TwoInOne => &self.two_in_one,
        }
    }

    fn slot_mut(&mut self, orientation: Orientation) -> &mut Option<Arc<M>> {
        match orientation {
            Orientation::General => &mut self.general,
            Orientation::OneInTwo => &mut self.one_in_two,
            Orientation::TwoInOne => &mut self.two_in_one,
        }
    }

    /// Blends a cell quantity.
    ///
    /// `eval` evaluates one model for an ordered pair; the general model is
    /// evaluated for phase 1 dispersed in phase 2. `pair` must hold
    /// [`phase1`](Self::phase1) first.
    ///
    /// # Errors
    ///
    /// Returns the blending method's error or the first error of `eval`.
    pub fn cells<T, E>(
        &self,
        blending: &dyn BlendingMethod,
        pair: &PhasePair<'_>,
        parity: Parity,
        eval: E,
    ) -> Result<VolField<T>, ConfigError>
    where
        T: FieldValue,
        E: Fn(&M, &OrderedPhasePair<'_>) -> Result<VolField<T>, ConfigError>,
    {
        let (phase1, phase2) = (pair.phase1(), pair.phase2());
        let f1 = blending.f1(phase1, phase2)?;
        let f2 = blending.f2(phase1, phase2)?;
        let mixed = f1.zip_map(&f2, |f1, f2| 1.0 - f1 - f2);
        self.combine(pair, parity, VolField::zeros(pair.mesh()), [mixed, f1, f2], eval)
    }

    /// Blends a face quantity.
    ///
    /// # Errors
    ///
    /// See [`BlendedModel::cells`].
    pub fn faces<T, E>(
        &self,
        blending: &dyn BlendingMethod,
        pair: &PhasePair<'_>,
        parity: Parity,
        eval: E,
    ) -> Result<SurfaceField<T>, ConfigError>
    where
        T: FieldValue,
        E: Fn(&M, &OrderedPhasePair<'_>) -> Result<SurfaceField<T>, ConfigError>,
    {
        let (mesh, phase1, phase2) = (pair.mesh(), pair.phase1(), pair.phase2());
        let f1 = blending.f1_face(mesh, phase1, phase2)?;
        let f2 = blending.f2_face(mesh, phase1, phase2)?;
        let mixed = f1.zip_map(&f2, |f1, f2| 1.0 - f1 - f2);
        self.combine(pair, parity, SurfaceField::uniform(mesh, T::zero()), [mixed, f1, f2], eval)
    }

    fn combine<F, E>(
        &self,
        pair: &PhasePair<'_>,
        parity: Parity,
        zero: F,
        [mixed, f1, f2]: [F::Weight; 3],
        eval: E,
    ) -> Result<F, ConfigError>
    where
        F: Blend,
        E: Fn(&M, &OrderedPhasePair<'_>) -> Result<F, ConfigError>,
    {
        debug_assert_eq!(pair.phase1().name(), self.phase1);
        let terms = [
            (&self.general, pair.one_in_two(), mixed, 1.0),
            (&self.two_in_one, pair.two_in_one(), f1, parity.two_in_one_sign()),
            (&self.one_in_two, pair.one_in_two(), f2, 1.0),
        ];
        terms
            .into_iter()
            .try_fold(zero, |sum, (model, ordered, weight, sign)| match model {
                Some(model) => Ok(sum.plus(&eval(model, &ordered)?.weighted(&weight, sign))),
                None => Ok(sum),
            })
    }
}

impl<M: ?Sized> std::fmt::Debug for BlendedModel<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlendedModel")
            .field("phase1", &self.phase1)
            .field("phase2", &self.phase2)
            .field("general", &self.general.is_some())
            .field("one_in_two", &self.one_in_two.is_some())
            .field("two_in_one", &self.two_in_one.is_some())
            .finish()
    }
}

/// Field types that can be weighted and summed.
trait Blend: Sized {
    type Weight;

    fn weighted(&self, weight: &Self::Weight, sign: f64) -> Self;

    fn plus(&self, other: &Self) -> Self;
}

impl<T: FieldValue> Blend for VolField<T> {
    type Weight = VolField<f64>;

    fn weighted(&self, weight: &VolField<f64>, sign: f64) -> Self {
        self.zip_map(weight, move |x, w| x * (sign * w))
    }

    fn plus(&self, other: &Self) -> Self {
        self + other
    }
}

impl<T: FieldValue> Blend for SurfaceField<T> {
    type Weight = SurfaceField<f64>;

    fn weighted(&self, weight: &SurfaceField<f64>, sign: f64) -> Self {
        self.zip_map(weight, move |x, w| x * (sign * w))
    }

    fn plus(&self, other: &Self) -> Self {
        self + other
    }
}
