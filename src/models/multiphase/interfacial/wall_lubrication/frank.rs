use crate::support::{
    dictionary::{ConfigError, Dictionary},
    field::{Vector, VolField},
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::{WallLubricationModel, tomiyama_cw, wall_force};

/// Frank et al. wall lubrication.
///
/// ```text
/// ỹ = y / (Cwc d)
/// c = Cw(Eo) max(0, (1 − ỹ) / (Cwd y ỹ^(p−1)))
/// ```
///
/// Requires the surface tension of the pair for the Eötvös number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frank {
    cwc: f64,
    cwd: f64,
    p: f64,
}

impl Frank {
    pub const TYPE_NAME: &'static str = "Frank";

    /// Reads `Cwc`, `Cwd` and `p`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a coefficient is missing.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            cwc: dict.lookup("Cwc")?,
            cwd: dict.lookup("Cwd")?,
            p: dict.lookup("p")?,
        })
    }

    pub(crate) fn boxed(
        dict: &Dictionary,
        ctx: &SelectionContext<'_>,
    ) -> Result<Box<dyn WallLubricationModel>, ConfigError> {
        ctx.require_surface_tension(Self::TYPE_NAME)?;
        Ok(Box::new(Self::new(dict)?))
    }
}

impl WallLubricationModel for Frank {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn wall_force(&self, pair: &OrderedPhasePair<'_>) -> VolField<Vector> {
        let Self { cwc, cwd, p } = *self;
        wall_force(pair, move |s| {
            let y_tilde = s.y / (cwc * s.d);
            tomiyama_cw(s.eo) * ((1.0 - y_tilde) / (cwd * s.y * y_tilde.powf(p - 1.0))).max(0.0)
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}
