//! Phases and phase pairs.
//!
//! A [`Phase`] holds the current-iteration fields of one constituent. Closure
//! models never own phases; they receive a [`PhasePair`] or an
//! [`OrderedPhasePair`] that borrows two phases and derives the pair
//! quantities (relative velocity, Reynolds number, ...) on demand.

mod key;

pub use key::PairKey;

use crate::support::{
    constraint::{Constrained, StrictlyPositive, UnitInterval},
    field::{Mesh, MeshError, Vector, VolField},
};

/// One continuum constituent and its current fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    name: String,
    residual_alpha: Constrained<f64, UnitInterval>,
    /// Volume fraction.
    pub alpha: VolField<f64>,
    /// Density.
    pub rho: VolField<f64>,
    /// Kinematic viscosity.
    pub nu: VolField<f64>,
    /// Velocity.
    pub u: VolField<Vector>,
    /// Diameter of the inclusions when this phase is dispersed.
    pub d: VolField<f64>,
}

impl Phase {
    /// Creates a phase with uniform fields.
    ///
    /// The fields are expected to be overwritten by the solver every
    /// iteration; the uniform values are a starting point.
    #[must_use]
    pub fn uniform(
        mesh: &Mesh,
        name: impl Into<String>,
        residual_alpha: Constrained<f64, UnitInterval>,
        state: PhaseState,
    ) -> Self {
        Self {
            name: name.into(),
            residual_alpha,
            alpha: VolField::uniform(mesh, state.alpha),
            rho: VolField::uniform(mesh, state.rho),
            nu: VolField::uniform(mesh, state.nu),
            u: VolField::uniform(mesh, state.u),
            d: VolField::uniform(mesh, state.d),
        }
    }

    /// Creates a phase from per-cell values; boundary values copy the owner cell.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if any field does not have one value per cell.
    pub fn from_cells(
        mesh: &Mesh,
        name: impl Into<String>,
        residual_alpha: Constrained<f64, UnitInterval>,
        cells: &[PhaseState],
    ) -> Result<Self, MeshError> {
        let column = |f: fn(&PhaseState) -> f64| cells.iter().map(f).collect::<Vec<_>>();
        Ok(Self {
            name: name.into(),
            residual_alpha,
            alpha: VolField::from_internal(mesh, column(|s| s.alpha))?,
            rho: VolField::from_internal(mesh, column(|s| s.rho))?,
            nu: VolField::from_internal(mesh, column(|s| s.nu))?,
            u: VolField::from_internal(mesh, cells.iter().map(|s| s.u).collect())?,
            d: VolField::from_internal(mesh, column(|s| s.d))?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Volume fraction floor used wherever this phase's fraction divides.
    #[must_use]
    pub fn residual_alpha(&self) -> f64 {
        self.residual_alpha.get()
    }
}

/// Point values of one phase, used to build fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseState {
    pub alpha: f64,
    pub rho: f64,
    pub nu: f64,
    pub u: Vector,
    pub d: f64,
}

/// Constant properties attached to a pair of phases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairProperties {
    pub surface_tension: Option<Constrained<f64, StrictlyPositive>>,
    pub gravity: Option<Vector>,
}

impl PairProperties {
    /// A pair with neither surface tension nor gravity.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            surface_tension: None,
            gravity: None,
        }
    }
}

/// Turbulence of the continuous phase, supplied by the turbulence model.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousTurbulence {
    /// Turbulent kinetic energy.
    pub k: VolField<f64>,
    /// Turbulent kinematic viscosity.
    pub nut: VolField<f64>,
}

/// Two phases without a dispersed/continuous role.
#[derive(Debug, Clone, Copy)]
pub struct PhasePair<'a> {
    mesh: &'a Mesh,
    phase1: &'a Phase,
    phase2: &'a Phase,
    properties: &'a PairProperties,
}

impl<'a> PhasePair<'a> {
    #[must_use]
    pub fn new(
        mesh: &'a Mesh,
        phase1: &'a Phase,
        phase2: &'a Phase,
        properties: &'a PairProperties,
    ) -> Self {
        Self {
            mesh,
            phase1,
            phase2,
            properties,
        }
    }

    /// `(phase1 and phase2)`.
    #[must_use]
    pub fn name(&self) -> String {
        PairKey::unordered(self.phase1.name(), self.phase2.name()).to_string()
    }

    #[must_use]
    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    #[must_use]
    pub fn phase1(&self) -> &'a Phase {
        self.phase1
    }

    #[must_use]
    pub fn phase2(&self) -> &'a Phase {
        self.phase2
    }

    #[must_use]
    pub fn properties(&self) -> &'a PairProperties {
        self.properties
    }

    /// Phase 1 dispersed in phase 2.
    #[must_use]
    pub fn one_in_two(&self) -> OrderedPhasePair<'a> {
        OrderedPhasePair::new(self.mesh, self.phase1, self.phase2, self.properties)
    }

    /// Phase 2 dispersed in phase 1.
    #[must_use]
    pub fn two_in_one(&self) -> OrderedPhasePair<'a> {
        OrderedPhasePair::new(self.mesh, self.phase2, self.phase1, self.properties)
    }

    /// Mixture density `α1 ρ1 + α2 ρ2`.
    #[must_use]
    pub fn rho(&self) -> VolField<f64> {
        mixture_density(self.phase1, self.phase2)
    }

    /// Magnitude of the velocity difference between the phases.
    #[must_use]
    pub fn mag_ur(&self) -> VolField<f64> {
        self.phase1.u.zip_map(&self.phase2.u, |a, b| (a - b).norm())
    }
}

/// A dispersed phase inside a continuous phase.
#[derive(Debug, Clone, Copy)]
pub struct OrderedPhasePair<'a> {
    mesh: &'a Mesh,
    dispersed: &'a Phase,
    continuous: &'a Phase,
    properties: &'a PairProperties,
}

impl<'a> OrderedPhasePair<'a> {
    #[must_use]
    pub fn new(
        mesh: &'a Mesh,
        dispersed: &'a Phase,
        continuous: &'a Phase,
        properties: &'a PairProperties,
    ) -> Self {
        Self {
            mesh,
            dispersed,
            continuous,
            properties,
        }
    }

    /// `(dispersed in continuous)`.
    #[must_use]
    pub fn name(&self) -> String {
        self.key().to_string()
    }

    #[must_use]
    pub fn key(&self) -> PairKey {
        PairKey::ordered(self.dispersed.name(), self.continuous.name())
    }

    #[must_use]
    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    #[must_use]
    pub fn dispersed(&self) -> &'a Phase {
        self.dispersed
    }

    #[must_use]
    pub fn continuous(&self) -> &'a Phase {
        self.continuous
    }

    #[must_use]
    pub fn properties(&self) -> &'a PairProperties {
        self.properties
    }

    /// Mixture density `α_d ρ_d + α_c ρ_c`.
    #[must_use]
    pub fn rho(&self) -> VolField<f64> {
        mixture_density(self.dispersed, self.continuous)
    }

    /// Relative velocity `U_d − U_c`.
    #[must_use]
    pub fn ur(&self) -> VolField<Vector> {
        self.dispersed.u.zip_map(&self.continuous.u, |d, c| d - c)
    }

    #[must_use]
    pub fn mag_ur(&self) -> VolField<f64> {
        self.dispersed.u.zip_map(&self.continuous.u, |d, c| (d - c).norm())
    }

    /// Particle Reynolds number `|U_r| d / ν_c`.
    #[must_use]
    pub fn re(&self) -> VolField<f64> {
        let mag_ur = self.mag_ur();
        let (d, nu) = (&self.dispersed.d, &self.continuous.nu);
        VolField::tabulate(&mag_ur, |at| mag_ur[at] * d[at] / nu[at])
    }

    /// Eötvös number `|Δρ| |g| d² / σ`; zero without gravity or surface tension.
    #[must_use]
    pub fn eo(&self) -> VolField<f64> {
        let (Some(g), Some(sigma)) = (self.properties.gravity, self.properties.surface_tension)
        else {
            return VolField::zeros(self.mesh);
        };
        let (g, sigma) = (g.norm(), sigma.get());
        let (rho_d, rho_c, d) = (&self.dispersed.rho, &self.continuous.rho, &self.dispersed.d);
        VolField::tabulate(d, |at| (rho_d[at] - rho_c[at]).abs() * g * d[at] * d[at] / sigma)
    }

    /// Morton number `|g| ν_c (ν_c ρ_c / σ)³`; zero without gravity or surface tension.
    #[must_use]
    pub fn mo(&self) -> VolField<f64> {
        let (Some(g), Some(sigma)) = (self.properties.gravity, self.properties.surface_tension)
        else {
            return VolField::zeros(self.mesh);
        };
        let (g, sigma) = (g.norm(), sigma.get());
        self.continuous
            .nu
            .zip_map(&self.continuous.rho, |nu, rho| g * nu * (nu * rho / sigma).powi(3))
    }

    /// Tadaki number `Re Mo^0.23`.
    #[must_use]
    pub fn ta(&self) -> VolField<f64> {
        self.re().zip_map(&self.mo(), |re, mo| re * mo.powf(0.23))
    }
}

fn mixture_density(a: &Phase, b: &Phase) -> VolField<f64> {
    VolField::tabulate(&a.alpha, |at| {
        a.alpha[at] * a.rho[at] + b.alpha[at] * b.rho[at]
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Air dispersed in water, `α = 0.1` and `0.9`, uniform over `mesh`.
    ///
    /// The air rises at 0.2 m/s relative to still water; `d = 3 mm`.
    pub(crate) fn air_water(mesh: &Mesh) -> (Phase, Phase) {
        let residual = Constrained::new(1e-6).unwrap();
        let air = Phase::uniform(
            mesh,
            "air",
            residual,
            PhaseState {
                alpha: 0.1,
                rho: 1.2,
                nu: 1.5e-5,
                u: Vector::new(0.0, 0.2, 0.0),
                d: 3e-3,
            },
        );
        let water = Phase::uniform(
            mesh,
            "water",
            residual,
            PhaseState {
                alpha: 0.9,
                rho: 1000.0,
                nu: 1e-6,
                u: Vector::zeros(),
                d: 1e-4,
            },
        );
        (air, water)
    }

    /// Surface tension of an air/water interface and standard gravity.
    pub(crate) fn air_water_properties() -> PairProperties {
        PairProperties {
            surface_tension: Some(Constrained::new(0.07).unwrap()),
            gravity: Some(Vector::new(0.0, -9.81, 0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use super::test_support::{air_water, air_water_properties};
    use crate::support::field::test_support::channel;

    #[test]
    fn ordered_pair_quantities() {
        let mesh = channel(2);
        let (air, water) = air_water(&mesh);
        let props = air_water_properties();
        let pair = OrderedPhasePair::new(&mesh, &air, &water, &props);

        assert_eq!(pair.name(), "(air in water)");
        assert_relative_eq!(pair.mag_ur().internal()[0], 0.2);
        assert_relative_eq!(pair.ur().internal()[1].y, 0.2);
        // 0.2 * 3e-3 / 1e-6
        assert_relative_eq!(pair.re().internal()[0], 600.0, max_relative = 1e-12);
        assert_relative_eq!(pair.rho().internal()[0], 0.1 * 1.2 + 0.9 * 1000.0);

        let eo = 998.8 * 9.81 * 9e-6 / 0.07;
        assert_relative_eq!(pair.eo().internal()[0], eo, max_relative = 1e-12);
        assert_relative_eq!(pair.eo().patch(0)[0], eo, max_relative = 1e-12);

        let mo = 9.81 * 1e-6 * (1e-6 * 1000.0 / 0.07_f64).powi(3);
        assert_relative_eq!(pair.mo().internal()[0], mo, max_relative = 1e-12);
        assert_relative_eq!(
            pair.ta().internal()[0],
            600.0 * mo.powf(0.23),
            max_relative = 1e-12
        );
    }

    #[test]
    fn eotvos_is_zero_without_surface_tension() {
        let mesh = channel(2);
        let (air, water) = air_water(&mesh);
        let props = PairProperties {
            gravity: Some(Vector::new(0.0, -9.81, 0.0)),
            ..PairProperties::none()
        };
        let pair = OrderedPhasePair::new(&mesh, &air, &water, &props);
        assert!(pair.eo().internal().iter().all(|&eo| eo == 0.0));
        assert!(pair.mo().internal().iter().all(|&mo| mo == 0.0));
    }

    #[test]
    fn unordered_pair_orientations() {
        let mesh = channel(2);
        let (air, water) = air_water(&mesh);
        let props = PairProperties::none();
        let pair = PhasePair::new(&mesh, &air, &water, &props);

        assert_eq!(pair.name(), "(air and water)");
        assert_eq!(pair.one_in_two().name(), "(air in water)");
        assert_eq!(pair.two_in_one().name(), "(water in air)");
        assert_eq!(pair.rho(), pair.one_in_two().rho());
        assert_relative_eq!(pair.mag_ur().internal()[0], 0.2);
    }

    #[test]
    fn from_cells_checks_length() {
        let mesh = channel(2);
        let state = PhaseState {
            alpha: 0.5,
            rho: 1.0,
            nu: 1.0,
            u: Vector::zeros(),
            d: 1.0,
        };
        let residual = Constrained::new(1e-6).unwrap();
        assert!(Phase::from_cells(&mesh, "a", residual, &[state; 2]).is_ok());
        assert!(Phase::from_cells(&mesh, "a", residual, &[state; 3]).is_err());
    }
}
