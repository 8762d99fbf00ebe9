use std::cmp::Ordering;

use num_traits::{One, Zero};

use super::{Constraint, ConstraintError};

/// Greater than zero.
///
/// Used for every coefficient that ends up in a denominator: residual
/// Reynolds numbers, turbulent Schmidt numbers, transition scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

/// Zero or greater.
///
/// Constants that scale a force or a diffusivity may be zero to switch a
/// contribution off, but never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

/// The closed unit interval `[0, 1]`.
///
/// Volume fractions and the thresholds compared against them live here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    const DOMAIN: &'static str = "> 0";

    fn check(value: &T) -> Result<(), ConstraintError> {
        admit::<Self, T>(sign(value)?.is_gt())
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    const DOMAIN: &'static str = ">= 0";

    fn check(value: &T) -> Result<(), ConstraintError> {
        admit::<Self, T>(sign(value)?.is_ge())
    }
}

impl<T: PartialOrd + Zero + One> Constraint<T> for UnitInterval {
    const DOMAIN: &'static str = "in [0, 1]";

    fn check(value: &T) -> Result<(), ConstraintError> {
        admit::<Self, T>(sign(value)?.is_ge() && *value <= T::one())
    }
}

/// Orders `value` against zero; NaN has no order.
fn sign<T: PartialOrd + Zero>(value: &T) -> Result<Ordering, ConstraintError> {
    value
        .partial_cmp(&T::zero())
        .ok_or(ConstraintError::NotANumber)
}

fn admit<C: Constraint<T>, T>(inside: bool) -> Result<(), ConstraintError> {
    if inside {
        Ok(())
    } else {
        Err(ConstraintError::OutOfDomain { domain: C::DOMAIN })
    }
}
