//! Numeric constraints checked once, when a coefficient is read.
//!
//! Closure coefficients such as a residual volume fraction or a residual
//! Reynolds number have a physical domain. Wrapping them in
//! [`Constrained<T, C>`] moves the domain check to configuration time so the
//! per-cell kernels can use the value without re-validating it.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: `>= 0` (model constants like `Ctd`)
//! - [`StrictlyPositive`]: `> 0` (`residualRe`, `sigma`, densities)
//! - [`UnitInterval`]: `0 <= x <= 1` (volume fractions)

mod markers;

use std::marker::PhantomData;

use thiserror::Error;

pub use markers::{NonNegative, StrictlyPositive, UnitInterval};

/// A numeric domain enforced at construction time.
pub trait Constraint<T> {
    /// The domain as written in error messages, e.g. `"> 0"`.
    const DOMAIN: &'static str;

    /// Checks that `value` lies in the domain.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if it does not.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// A value outside its constraint's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("value must be {domain}")]
    OutOfDomain { domain: &'static str },
    #[error("value is not a number")]
    NotANumber,
}

/// A value that is known to satisfy the constraint `C`.
///
/// ```
/// use twine_multiphase::support::constraint::{Constrained, UnitInterval};
///
/// let residual_alpha = Constrained::<f64, UnitInterval>::new(1e-6).unwrap();
/// assert_eq!(residual_alpha.get(), 1e-6);
/// assert!(Constrained::<f64, UnitInterval>::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` against `C`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] of `C` if the value is outside its domain.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }
}

impl<T: Copy, C: Constraint<T>> Constrained<T, C> {
    /// Returns the checked value.
    pub fn get(&self) -> T {
        self.value
    }
}
