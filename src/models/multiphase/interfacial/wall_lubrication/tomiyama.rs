use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    dictionary::{ConfigError, Dictionary},
    field::{Vector, VolField},
    phase::OrderedPhasePair,
    selection::SelectionContext,
};

use super::{WallLubricationModel, tomiyama_cw, wall_force};

/// Tomiyama wall lubrication for a pipe of diameter `D`:
/// `c = Cw(Eo) d/2 (1/y² − 1/(D − y)²)`.
///
/// Requires the surface tension of the pair for the Eötvös number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TomiyamaWallLubrication {
    pipe_diameter: Constrained<f64, StrictlyPositive>,
}

impl TomiyamaWallLubrication {
    pub const TYPE_NAME: &'static str = "TomiyamaWallLubrication";

    /// Reads the pipe diameter `D`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `D` is missing or not positive.
    pub fn new(dict: &Dictionary) -> Result<Self, ConfigError> {
        Ok(Self {
            pipe_diameter: dict.lookup_constrained("D")?,
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

impl WallLubricationModel for TomiyamaWallLubrication {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn wall_force(&self, pair: &OrderedPhasePair<'_>) -> VolField<Vector> {
        let pipe = self.pipe_diameter.get();
        wall_force(pair, move |s| {
            tomiyama_cw(s.eo) * 0.5 * s.d * (1.0 / (s.y * s.y) - 1.0 / (pipe - s.y).powi(2))
        })
    }

    fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(dict)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::multiphase::interfacial::wall_lubrication::test_support::sliding_air_water,
        support::{field::test_support::channel, phase::test_support::air_water_properties},
    };

    #[test]
    fn symmetric_in_a_pipe_of_channel_height() {
        let mesh = channel(4);
        let (air, water) = sliding_air_water(&mesh);
        let props = air_water_properties();
        let pair = OrderedPhasePair::new(&mesh, &air, &water, &props);

        let dict = Dictionary::from_json_str("wallLubrication", r#"{ "D": 1.0 }"#).unwrap();
        let fi = TomiyamaWallLubrication::new(&dict).unwrap().fi(&pair);

        let cw = tomiyama_cw(pair.eo().internal()[0]);
        let expected = cw * 0.5 * 3e-3 * (1.0 / 0.125_f64.powi(2) - 1.0 / 0.875_f64.powi(2)) * 1000.0 * 0.04;
        assert_relative_eq!(fi.internal()[0].y, expected, max_relative = 1e-12);
        assert_relative_eq!(fi.internal()[3].y, -expected, max_relative = 1e-12);
        assert_eq!(fi.patch(0)[0], fi.internal()[0]);
    }
}
