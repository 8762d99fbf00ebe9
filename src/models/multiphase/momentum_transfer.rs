//! Interfacial momentum transfer of a phase system.
//!
//! [`MomentumTransfer`] builds every interfacial model of a phase system
//! from one configuration dictionary:
//!
//! ```json
//! {
//!     "g": [0, -9.81, 0],
//!     "surfaceTension": { "(air and water)": 0.07 },
//!     "blending": { "default": { "type": "hyperbolic", ... }, "drag": { ... } },
//!     "drag": { "(air in water)": { "type": "SchillerNaumann", ... } },
//!     "virtualMass": { "(air in water)": { "type": "constantCoefficient", "Cvm": 0.5 } },
//!     "lift": { "(air in water)": { "type": "constantCoefficient", "Cl": 0.25 } },
//!     "wallLubrication": { "(air in water)": { "type": "Antal", ... } },
//!     "turbulentDispersion": { "(air in water)": { "type": "Burns", ... } }
//! }
//! ```
//!
//! Models are built blending first, then drag, virtual mass, lift, wall
//! lubrication and turbulent dispersion. Every drag model is stored in the
//! object registry under `dragModel.<pair>` before any dispersion model is
//! built.
//!
//! The two phases of a pair are ordered as they appear in the system's phase
//! list. Queries accept either order; forces are returned for the first
//! phase named in the query.

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    models::{
        multiphase::interfacial::{
            blended::{BlendedModel, Orientation, Parity},
            blending::BlendingMethod,
            drag::{self, Drag},
            lift::LiftModel,
            turbulent_dispersion::TurbulentDispersionModel,
            virtual_mass::VirtualMassModel,
            wall_lubrication::WallLubricationModel,
        },
        registry::ModelRegistry,
    },
    support::{
        constraint::StrictlyPositive,
        dictionary::{ConfigError, Dictionary},
        field::{Mesh, SurfaceField, Vector, VolField},
        phase::{ContinuousTurbulence, OrderedPhasePair, PairKey, PairProperties, Phase, PhasePair},
        selection::{ObjectRegistry, SelectionContext},
    },
};

const DRAG: &str = "drag";
const VIRTUAL_MASS: &str = "virtualMass";
const LIFT: &str = "lift";
const WALL_LUBRICATION: &str = "wallLubrication";
const TURBULENT_DISPERSION: &str = "turbulentDispersion";

/// Names of the two phases of a pair, in phase-list order.
type Names = (String, String);

/// The interfacial models of a phase system.
pub struct MomentumTransfer<'r> {
    registry: &'r ModelRegistry,
    pairs: Pairs,
    objects: ObjectRegistry,
    drag: Family<Drag>,
    virtual_mass: Family<dyn VirtualMassModel>,
    lift: Family<dyn LiftModel>,
    wall_lubrication: Family<dyn WallLubricationModel>,
    turbulent_dispersion: Family<dyn TurbulentDispersionModel>,
}

impl<'r> MomentumTransfer<'r> {
    /// Builds the models configured in `config` for the phases `phase_names`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a section is malformed, a pair key names
    /// an unknown phase, two entries configure the same model, or any model
    /// cannot be selected.
    pub fn new(
        config: &Dictionary,
        phase_names: &[String],
        registry: &'r ModelRegistry,
    ) -> Result<Self, ConfigError> {
        log::info!("building interfacial models for phases {}", phase_names.join(", "));

        let pairs = Pairs::new(config, phase_names)?;
        let mut objects = ObjectRegistry::default();

        let blending = config.sub_dict("blending")?;
        let [drag_blending, vm_blending, lift_blending, wall_blending, dispersion_blending] =
            [DRAG, VIRTUAL_MASS, LIFT, WALL_LUBRICATION, TURBULENT_DISPERSION]
                .map(|family| select_blending(&blending, family, &pairs, &objects, registry));

        let drag = Family::build(config, DRAG, &pairs, &objects, drag_blending?, |dict, ctx| {
            Drag::select(dict, ctx, registry).map(Arc::new)
        })?;
        for blended in drag.models.values() {
            for orientation in Orientation::ALL {
                if let Some(model) = blended.get(orientation) {
                    objects.insert(drag::object_name(&blended.key(orientation)), Arc::clone(model));
                }
            }
        }

        let virtual_mass: Family<dyn VirtualMassModel> = Family::build(
            config,
            VIRTUAL_MASS,
            &pairs,
            &objects,
            vm_blending?,
            |dict, ctx| registry.virtual_mass.select(dict, ctx).map(Arc::from),
        )?;

        let lift: Family<dyn LiftModel> = Family::build(
            config,
            LIFT,
            &pairs,
            &objects,
            lift_blending?,
            |dict, ctx| registry.lift.select(dict, ctx).map(Arc::from),
        )?;

        let wall_lubrication: Family<dyn WallLubricationModel> = Family::build(
            config,
            WALL_LUBRICATION,
            &pairs,
            &objects,
            wall_blending?,
            |dict, ctx| registry.wall_lubrication.select(dict, ctx).map(Arc::from),
        )?;

        let turbulent_dispersion: Family<dyn TurbulentDispersionModel> = Family::build(
            config,
            TURBULENT_DISPERSION,
            &pairs,
            &objects,
            dispersion_blending?,
            |dict, ctx| registry.turbulent_dispersion.select(dict, ctx).map(Arc::from),
        )?;

        let non_drag = virtual_mass.models.keys().chain(lift.models.keys());
        let non_drag = non_drag
            .chain(wall_lubrication.models.keys())
            .chain(turbulent_dispersion.models.keys());
        for names in non_drag {
            if !drag.models.contains_key(names) {
                log::warn!("no drag model for phase pair ({} and {})", names.0, names.1);
            }
        }

        Ok(Self {
            registry,
            pairs,
            objects,
            drag,
            virtual_mass,
            lift,
            wall_lubrication,
            turbulent_dispersion,
        })
    }

    /// Rebuilds every model from `config`.
    ///
    /// On error the current models are kept.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::new`].
    pub fn read(&mut self, config: &Dictionary) -> Result<(), ConfigError> {
        *self = Self::new(config, &self.pairs.phase_names, self.registry)?;
        Ok(())
    }

    #[must_use]
    pub fn phase_names(&self) -> &[String] {
        &self.pairs.phase_names
    }

    /// Constructed models available for cross-model lookup.
    #[must_use]
    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    /// Constant properties of the pair `(phase1, phase2)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPhase`] if either phase is not in the system.
    pub fn properties(&self, phase1: &str, phase2: &str) -> Result<&PairProperties, ConfigError> {
        let (names, _) = self.pairs.canonical(&PairKey::unordered(phase1, phase2))?;
        Ok(self.pairs.properties(&names))
    }

    /// Blended drag coefficient `Kd` of a pair in cells.
    ///
    /// Pairs without drag have `Kd = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPhase`] if either phase is not in
    /// `phases` or not in the system.
    pub fn kd(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<VolField<f64>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        let Some(model) = self.drag.models.get(&at.names) else {
            return Ok(VolField::zeros(mesh));
        };
        model.cells(self.drag.blending.as_ref(), &at.pair, Parity::Even, |drag, ordered| {
            Ok(drag.k(ordered))
        })
    }

    /// Blended drag coefficient `Kdf` of a pair on faces.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn kdf(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<SurfaceField<f64>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        let Some(model) = self.drag.models.get(&at.names) else {
            return Ok(SurfaceField::uniform(mesh, 0.0));
        };
        model.faces(self.drag.blending.as_ref(), &at.pair, Parity::Even, |drag, ordered| {
            Ok(drag.kf(ordered))
        })
    }

    /// Sum of `Kd` over every pair with drag that contains `phase`.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn kd_phase(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase: &str,
    ) -> Result<VolField<f64>, ConfigError> {
        let mut sum = VolField::zeros(mesh);
        for (phase1, phase2) in self.drag.models.keys() {
            if phase1 == phase || phase2 == phase {
                sum = &sum + &self.kd(mesh, phases, phase1, phase2)?;
            }
        }
        Ok(sum)
    }

    /// Blended virtual mass coefficient `Vm` of a pair in cells.
    ///
    /// Pairs without virtual mass have `Vm = 0`.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn vm(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<VolField<f64>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        let Some(model) = self.virtual_mass.models.get(&at.names) else {
            return Ok(VolField::zeros(mesh));
        };
        model.cells(self.virtual_mass.blending.as_ref(), &at.pair, Parity::Even, |vm, ordered| {
            Ok(vm.k(ordered))
        })
    }

    /// Blended virtual mass coefficient `Vmf` of a pair on faces.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn vmf(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<SurfaceField<f64>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        let Some(model) = self.virtual_mass.models.get(&at.names) else {
            return Ok(SurfaceField::uniform(mesh, 0.0));
        };
        model.faces(self.virtual_mass.blending.as_ref(), &at.pair, Parity::Even, |vm, ordered| {
            Ok(vm.kf(ordered))
        })
    }

    /// Blended lift force on `phase1` from its pair with `phase2`.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn lift_force(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<VolField<Vector>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        self.lift.force(&at, |lift, ordered| lift.f(ordered))
    }

    /// Blended wall-lubrication force on `phase1` from its pair with `phase2`.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn wall_lubrication_force(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<VolField<Vector>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        self.wall_lubrication.force(&at, |wall, ordered| wall.f(ordered))
    }

    /// Face flux of the blended wall-lubrication force on `phase1`.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn wall_lubrication_flux(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<SurfaceField<f64>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        self.wall_lubrication.flux(&at, |wall, ordered| wall.ff(ordered))
    }

    /// Lift plus wall-lubrication force on `phase1` from its pair with `phase2`.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn interfacial_force(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<VolField<Vector>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        let lift = self.lift.force(&at, |lift, ordered| lift.f(ordered))?;
        let wall = self.wall_lubrication.force(&at, |wall, ordered| wall.f(ordered))?;
        Ok(&lift + &wall)
    }

    /// Face flux of the lift plus wall-lubrication force on `phase1`.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn interfacial_flux(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<SurfaceField<f64>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        let lift = self.lift.flux(&at, |lift, ordered| lift.ff(ordered))?;
        let wall = self.wall_lubrication.flux(&at, |wall, ordered| wall.ff(ordered))?;
        Ok(&lift + &wall)
    }

    /// Total wall-lubrication force on every phase of the system.
    ///
    /// Each pair adds its force to its first phase and subtracts it from its
    /// second.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn wall_lubrication_forces(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
    ) -> Result<BTreeMap<String, VolField<Vector>>, ConfigError> {
        self.phase_totals(mesh, self.wall_lubrication.models.keys(), |phase1, phase2| {
            self.wall_lubrication_force(mesh, phases, phase1, phase2)
        })
    }

    /// Total lift plus wall-lubrication force on every phase of the system.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`].
    pub fn interfacial_forces(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
    ) -> Result<BTreeMap<String, VolField<Vector>>, ConfigError> {
        let mut pairs: Vec<&Names> = self.lift.models.keys().collect();
        pairs.extend(self.wall_lubrication.models.keys());
        pairs.sort();
        pairs.dedup();
        self.phase_totals(mesh, pairs, |phase1, phase2| {
            self.interfacial_force(mesh, phases, phase1, phase2)
        })
    }

    /// Blended turbulent diffusivity `D` of a pair.
    ///
    /// `turbulence` maps phase names to the turbulence of that phase when it
    /// is continuous.
    ///
    /// # Errors
    ///
    /// See [`MomentumTransfer::kd`]. Also returns
    /// [`ConfigError::MissingPairProperty`] if a model needs the turbulence of
    /// a continuous phase absent from `turbulence`.
    pub fn turbulent_diffusivity(
        &self,
        mesh: &Mesh,
        phases: &[Phase],
        turbulence: &BTreeMap<String, ContinuousTurbulence>,
        phase1: &str,
        phase2: &str,
    ) -> Result<VolField<f64>, ConfigError> {
        let at = self.resolve(mesh, phases, phase1, phase2)?;
        let Some(model) = self.turbulent_dispersion.models.get(&at.names) else {
            return Ok(VolField::zeros(mesh));
        };
        model.cells(
            self.turbulent_dispersion.blending.as_ref(),
            &at.pair,
            Parity::Even,
            |dispersion, ordered| {
                let continuous = turbulence.get(ordered.continuous().name()).ok_or_else(|| {
                    ConfigError::MissingPairProperty {
                        model: dispersion.type_name().to_string(),
                        what: "continuous-phase turbulence",
                        pair: ordered.name(),
                    }
                })?;
                Ok(dispersion.d(ordered, continuous))
            },
        )
    }

    /// Adds the force of every pair in `pairs` to its first phase and
    /// subtracts it from its second.
    fn phase_totals<'n, F>(
        &self,
        mesh: &Mesh,
        pairs: impl IntoIterator<Item = &'n Names>,
        force: F,
    ) -> Result<BTreeMap<String, VolField<Vector>>, ConfigError>
    where
        F: Fn(&str, &str) -> Result<VolField<Vector>, ConfigError>,
    {
        let mut totals: BTreeMap<String, VolField<Vector>> = self
            .pairs
            .phase_names
            .iter()
            .map(|name| (name.clone(), VolField::zeros(mesh)))
            .collect();

        for (phase1, phase2) in pairs {
            let pair_force = force(phase1, phase2)?;
            if let Some(sum) = totals.get_mut(phase1) {
                *sum = &*sum + &pair_force;
            }
            if let Some(sum) = totals.get_mut(phase2) {
                *sum = sum.zip_map(&pair_force, |a, b| a - b);
            }
        }
        Ok(totals)
    }

    fn resolve<'p>(
        &'p self,
        mesh: &'p Mesh,
        phases: &'p [Phase],
        phase1: &str,
        phase2: &str,
    ) -> Result<Resolved<'p>, ConfigError> {
        let key = PairKey::unordered(phase1, phase2);
        let (names, swapped) = self.pairs.canonical(&key)?;
        let find = |name: &str| {
            phases
                .iter()
                .find(|phase| phase.name() == name)
                .ok_or_else(|| ConfigError::UnknownPhase {
                    phase: name.to_string(),
                    pair: key.to_string(),
                })
        };
        let pair = PhasePair::new(mesh, find(&names.0)?, find(&names.1)?, self.pairs.properties(&names));
        Ok(Resolved {
            names,
            pair,
            swapped,
        })
    }
}

impl std::fmt::Debug for MomentumTransfer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MomentumTransfer")
            .field("phase_names", &self.pairs.phase_names)
            .field("drag", &self.drag.models)
            .field("virtual_mass", &self.virtual_mass.models)
            .field("lift", &self.lift.models)
            .field("wall_lubrication", &self.wall_lubrication.models)
            .field("turbulent_dispersion", &self.turbulent_dispersion.models)
            .field("objects", &self.objects)
            .finish_non_exhaustive()
    }
}

struct Resolved<'p> {
    names: Names,
    pair: PhasePair<'p>,
    swapped: bool,
}

/// Phase list and per-pair constant properties.
struct Pairs {
    phase_names: Vec<String>,
    properties: BTreeMap<Names, PairProperties>,
}

impl Pairs {
    /// Reads `g` and `surfaceTension` and sets up the properties of every pair.
    fn new(config: &Dictionary, phase_names: &[String]) -> Result<Self, ConfigError> {
        let gravity = if config.found("g") {
            Some(config.lookup_vector("g")?)
        } else {
            None
        };

        let mut pairs = Self {
            phase_names: phase_names.to_vec(),
            properties: BTreeMap::new(),
        };
        for (i, phase1) in phase_names.iter().enumerate() {
            for phase2 in &phase_names[i + 1..] {
                pairs.properties.insert(
                    (phase1.clone(), phase2.clone()),
                    PairProperties {
                        surface_tension: None,
                        gravity,
                    },
                );
            }
        }

        let sigma = config.optional_sub_dict("surfaceTension");
        for name in sigma.toc() {
            let key: PairKey = name.parse()?;
            let (names, _) = pairs.canonical(&key)?;
            let value = sigma.lookup_constrained::<StrictlyPositive>(name)?;
            log::debug!("surface tension of {key}: {} N/m", value.get());
            if let Some(properties) = pairs.properties.get_mut(&names) {
                properties.surface_tension = Some(value);
            }
        }
        Ok(pairs)
    }

    /// The pair's phase names in phase-list order, and whether `key` lists
    /// them the other way round.
    fn canonical(&self, key: &PairKey) -> Result<(Names, bool), ConfigError> {
        let index = |phase: &str| {
            self.phase_names
                .iter()
                .position(|name| name == phase)
                .ok_or_else(|| ConfigError::UnknownPhase {
                    phase: phase.to_string(),
                    pair: key.to_string(),
                })
        };
        let (a, b) = key.phases();
        let (i, j) = (index(a)?, index(b)?);
        if i == j {
            return Err(ConfigError::RepeatedPhase {
                phase: a.to_string(),
                pair: key.to_string(),
            });
        }
        let names = |first: usize, second: usize| {
            (self.phase_names[first].clone(), self.phase_names[second].clone())
        };
        Ok(if i < j { (names(i, j), false) } else { (names(j, i), true) })
    }

    fn properties(&self, names: &Names) -> &PairProperties {
        static NONE: PairProperties = PairProperties::none();
        self.properties.get(names).unwrap_or(&NONE)
    }
}

/// The models of one family and the blending method they share.
struct Family<M: ?Sized> {
    blending: Arc<dyn BlendingMethod>,
    models: BTreeMap<Names, BlendedModel<M>>,
}

impl<M: ?Sized> Family<M> {
    /// Selects a model for every pair entry of `config[section]`.
    fn build<S>(
        config: &Dictionary,
        section: &str,
        pairs: &Pairs,
        objects: &ObjectRegistry,
        blending: Arc<dyn BlendingMethod>,
        select: S,
    ) -> Result<Self, ConfigError>
    where
        S: Fn(&Dictionary, &SelectionContext<'_>) -> Result<Arc<M>, ConfigError>,
    {
        let section = config.optional_sub_dict(section);
        let mut models = BTreeMap::new();

        for name in section.toc() {
            let key: PairKey = name.parse()?;
            let (names, _) = pairs.canonical(&key)?;
            let orientation = Orientation::of(&key, &names.0);
            let blended = models
                .entry(names.clone())
                .or_insert_with(|| BlendedModel::new(names.0.clone(), names.1.clone()));

            let key = blended.key(orientation);
            let ctx = SelectionContext::new(objects)
                .with_phases(&pairs.phase_names)
                .with_pair(&key, pairs.properties(&names));
            let model = select(&section.sub_dict(name)?, &ctx)?;

            if blended.set(orientation, model).is_some() {
                return Err(ConfigError::InvalidEntry {
                    key: name.to_string(),
                    dictionary: section.path().to_string(),
                    reason: format!("a model for {key} is already configured"),
                });
            }
        }

        Ok(Self { blending, models })
    }
}

impl<M: ?Sized> Family<M> {
    /// Blended force on the first phase named in the query.
    fn force<E>(&self, at: &Resolved<'_>, eval: E) -> Result<VolField<Vector>, ConfigError>
    where
        E: Fn(&M, &OrderedPhasePair<'_>) -> VolField<Vector>,
    {
        let Some(model) = self.models.get(&at.names) else {
            return Ok(VolField::zeros(at.pair.mesh()));
        };
        let force = model.cells(self.blending.as_ref(), &at.pair, Parity::Odd, |m, ordered| {
            Ok(eval(m, ordered))
        })?;
        Ok(if at.swapped { force.map(|f| -f) } else { force })
    }

    /// Face flux of the blended force on the first phase named in the query.
    fn flux<E>(&self, at: &Resolved<'_>, eval: E) -> Result<SurfaceField<f64>, ConfigError>
    where
        E: Fn(&M, &OrderedPhasePair<'_>) -> SurfaceField<f64>,
    {
        let Some(model) = self.models.get(&at.names) else {
            return Ok(SurfaceField::uniform(at.pair.mesh(), 0.0));
        };
        let flux = model.faces(self.blending.as_ref(), &at.pair, Parity::Odd, |m, ordered| {
            Ok(eval(m, ordered))
        })?;
        Ok(if at.swapped { flux.map(|f| -f) } else { flux })
    }
}

/// Selects the blending method of `family`, falling back to `default`.
fn select_blending(
    blending: &Dictionary,
    family: &str,
    pairs: &Pairs,
    objects: &ObjectRegistry,
    registry: &ModelRegistry,
) -> Result<Arc<dyn BlendingMethod>, ConfigError> {
    let dict = if blending.found(family) {
        blending.sub_dict(family)?
    } else {
        blending.sub_dict("default")?
    };
    let ctx = SelectionContext::new(objects).with_phases(&pairs.phase_names);
    registry.blending.select(&dict, &ctx).map(Arc::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        models::multiphase::interfacial::{
            lift::test_support::sheared_air_water,
            turbulent_dispersion::test_support::turbulence,
            wall_lubrication::test_support::sliding_air_water,
        },
        support::{field::test_support::channel, phase::OrderedPhasePair},
    };

    fn phase_names() -> Vec<String> {
        vec!["air".into(), "water".into()]
    }

    fn config(text: &str) -> Dictionary {
        Dictionary::from_json_str("phaseProperties", text).unwrap()
    }

    fn bubbly() -> Dictionary {
        config(
            r#"{
                "g": [0, -9.81, 0],
                "surfaceTension": { "(water and air)": 0.07 },
                "blending": {
                    "default": { "type": "none", "continuousPhase": "water" }
                },
                "drag": {
                    "(air in water)": {
                        "type": "SchillerNaumann",
                        "residualRe": 1e-3,
                        "swarmCorrection": { "type": "noSwarm" }
                    }
                },
                "wallLubrication": {
                    "(air in water)": { "type": "Antal", "Cw1": -1e-4, "Cw2": 0.05 }
                },
                "turbulentDispersion": {
                    "(air in water)": { "type": "Burns", "sigma": 0.9 }
                }
            }"#,
        )
    }

    #[test]
    fn builds_and_registers_drag() {
        let system = MomentumTransfer::new(&bubbly(), &phase_names(), ModelRegistry::builtin()).unwrap();

        assert!(system.objects().contains("dragModel.(air in water)"));
        let props = system.properties("water", "air").unwrap();
        assert_eq!(props.surface_tension.map(|s| s.get()), Some(0.07));
        assert_eq!(props.gravity, Some(Vector::new(0.0, -9.81, 0.0)));
    }

    #[test]
    fn drag_of_the_continuous_regime_is_used_unchanged() {
        let mesh = channel(4);
        let (air, water) = sliding_air_water(&mesh);
        let system = MomentumTransfer::new(&bubbly(), &phase_names(), ModelRegistry::builtin()).unwrap();
        let phases = [air, water];

        let drag = system.objects().lookup::<Drag>("dragModel.(air in water)").unwrap();
        let props = system.properties("air", "water").unwrap();
        let ordered = OrderedPhasePair::new(&mesh, &phases[0], &phases[1], props);

        let kd = system.kd(&mesh, &phases, "air", "water").unwrap();
        assert_eq!(kd, drag.k(&ordered));
        assert_eq!(system.kd(&mesh, &phases, "water", "air").unwrap(), kd);
        assert_eq!(system.kd_phase(&mesh, &phases, "water").unwrap(), kd);

        let kdf = system.kdf(&mesh, &phases, "air", "water").unwrap();
        assert_eq!(kdf, drag.kf(&ordered));
    }

    #[test]
    fn wall_forces_balance_between_phases() {
        let mesh = channel(4);
        let (air, water) = sliding_air_water(&mesh);
        let system = MomentumTransfer::new(&bubbly(), &phase_names(), ModelRegistry::builtin()).unwrap();
        let phases = [air, water];

        let forces = system.wall_lubrication_forces(&mesh, &phases).unwrap();
        let on_air = &forces["air"];
        let on_water = &forces["water"];
        assert!(on_air.internal()[0].norm() > 0.0);
        for (a, w) in on_air.internal().iter().zip(on_water.internal()) {
            assert_eq!(*a, -*w);
        }

        let swapped = system.wall_lubrication_force(&mesh, &phases, "water", "air").unwrap();
        assert_eq!(&swapped, on_water);

        let flux = system.wall_lubrication_flux(&mesh, &phases, "air", "water").unwrap();
        let reversed = system.wall_lubrication_flux(&mesh, &phases, "water", "air").unwrap();
        assert_eq!(flux.map(|f| -f), reversed);
    }

    fn bubbly_with_lift_and_virtual_mass() -> Dictionary {
        config(
            r#"{
                "g": [0, -9.81, 0],
                "surfaceTension": { "(air and water)": 0.07 },
                "blending": {
                    "default": { "type": "none", "continuousPhase": "water" }
                },
                "drag": {
                    "(air in water)": { "type": "SchillerNaumann", "residualRe": 1e-3 }
                },
                "virtualMass": {
                    "(air in water)": { "type": "constantCoefficient", "Cvm": 0.5 }
                },
                "lift": {
                    "(air in water)": { "type": "constantCoefficient", "Cl": 0.25 }
                },
                "wallLubrication": {
                    "(air in water)": { "type": "Antal", "Cw1": -1e-4, "Cw2": 0.05 }
                }
            }"#,
        )
    }

    #[test]
    fn virtual_mass_of_the_continuous_regime() {
        let mesh = channel(4);
        let (air, water) = sheared_air_water(&mesh);
        let config = bubbly_with_lift_and_virtual_mass();
        let system = MomentumTransfer::new(&config, &phase_names(), ModelRegistry::builtin()).unwrap();
        let phases = [air, water];

        let vm = system.vm(&mesh, &phases, "water", "air").unwrap();
        assert!(vm.internal().iter().all(|&vm| (vm - 0.1 * 0.5 * 1000.0).abs() < 1e-9));
        let vmf = system.vmf(&mesh, &phases, "air", "water").unwrap();
        assert!(vmf.internal().iter().all(|&vm| (vm - 50.0).abs() < 1e-9));

        let none = MomentumTransfer::new(&bubbly(), &phase_names(), ModelRegistry::builtin()).unwrap();
        assert_eq!(none.vm(&mesh, &phases, "air", "water").unwrap(), VolField::zeros(&mesh));
    }

    #[test]
    fn interfacial_force_adds_lift_to_wall_lubrication() {
        let mesh = channel(4);
        let (air, water) = sheared_air_water(&mesh);
        let config = bubbly_with_lift_and_virtual_mass();
        let system = MomentumTransfer::new(&config, &phase_names(), ModelRegistry::builtin()).unwrap();
        let phases = [air, water];

        let lift = system.lift_force(&mesh, &phases, "air", "water").unwrap();
        let wall = system.wall_lubrication_force(&mesh, &phases, "air", "water").unwrap();
        assert!(lift.internal()[0].norm() > 0.0);

        let total = system.interfacial_force(&mesh, &phases, "air", "water").unwrap();
        assert_eq!(total, &lift + &wall);
        let on_water = system.interfacial_force(&mesh, &phases, "water", "air").unwrap();
        assert_eq!(on_water, total.map(|f| -f));

        let flux = system.interfacial_flux(&mesh, &phases, "air", "water").unwrap();
        let wall_flux = system.wall_lubrication_flux(&mesh, &phases, "air", "water").unwrap();
        assert_ne!(flux, wall_flux);

        let forces = system.interfacial_forces(&mesh, &phases).unwrap();
        assert_eq!(forces["air"], total);
        assert_eq!(forces["water"], on_water);
    }

    #[test]
    fn turbulent_diffusivity_needs_continuous_turbulence() {
        let mesh = channel(4);
        let (air, water) = sliding_air_water(&mesh);
        let system = MomentumTransfer::new(&bubbly(), &phase_names(), ModelRegistry::builtin()).unwrap();
        let phases = [air, water];

        let missing = system.turbulent_diffusivity(&mesh, &phases, &BTreeMap::new(), "air", "water");
        assert!(matches!(
            missing,
            Err(ConfigError::MissingPairProperty { ref model, .. }) if model == "Burns"
        ));

        let turbulence = BTreeMap::from([("water".to_string(), turbulence(&mesh))]);
        let d = system
            .turbulent_diffusivity(&mesh, &phases, &turbulence, "air", "water")
            .unwrap();
        assert!(d.internal().iter().all(|&d| d > 0.0 && d.is_finite()));
    }

    #[test]
    fn dispersion_without_matching_drag_is_fatal() {
        let text = bubbly_with(r#""drag": { "(water in air)": { "type": "SchillerNaumann", "residualRe": 1e-3 } }"#);
        let err = MomentumTransfer::new(&config(&text), &phase_names(), ModelRegistry::builtin())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ConfigError::ObjectNotFound { ref name, .. } if name == "dragModel.(air in water)"
        ));
    }

    #[test]
    fn pair_keys_must_name_system_phases() {
        let text = bubbly_with(r#""drag": { "(oil in water)": { "type": "Ergun" } }"#);
        let err = MomentumTransfer::new(&config(&text), &phase_names(), ModelRegistry::builtin())
            .err()
            .unwrap();
        assert_eq!(
            err,
            ConfigError::UnknownPhase {
                phase: "oil".into(),
                pair: "(oil in water)".into(),
            }
        );
    }

    #[test]
    fn pair_keys_must_name_two_phases() {
        let text = bubbly_with(r#""drag": { "(air in air)": { "type": "Ergun" } }"#);
        let err = MomentumTransfer::new(&config(&text), &phase_names(), ModelRegistry::builtin())
            .err()
            .unwrap();
        assert_eq!(
            err,
            ConfigError::RepeatedPhase {
                phase: "air".into(),
                pair: "(air in air)".into(),
            }
        );

        let system = MomentumTransfer::new(&bubbly(), &phase_names(), ModelRegistry::builtin()).unwrap();
        assert!(matches!(
            system.properties("water", "water"),
            Err(ConfigError::RepeatedPhase { .. })
        ));
    }

    #[test]
    fn one_model_per_slot() {
        let text = bubbly_with(
            r#""drag": {
                "(air and water)": { "type": "SchillerNaumann", "residualRe": 1e-3 },
                "(water and air)": { "type": "Ergun" }
            }"#,
        );
        assert!(matches!(
            MomentumTransfer::new(&config(&text), &phase_names(), ModelRegistry::builtin()),
            Err(ConfigError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn read_keeps_models_on_error() {
        let mut system =
            MomentumTransfer::new(&bubbly(), &phase_names(), ModelRegistry::builtin()).unwrap();

        let broken = bubbly_with(r#""drag": { "(air in water)": { "type": "Stokes" } }"#);
        assert!(system.read(&config(&broken)).is_err());
        assert!(system.objects().contains("dragModel.(air in water)"));

        let no_drag = config(
            r#"{ "blending": { "default": { "type": "none", "continuousPhase": "water" } } }"#,
        );
        system.read(&no_drag).unwrap();
        assert!(system.objects().names().is_empty());

        let mesh = channel(2);
        let (air, water) = sliding_air_water(&mesh);
        let kd = system.kd(&mesh, &[air, water], "air", "water").unwrap();
        assert_eq!(kd, VolField::zeros(&mesh));
    }

    /// The bubbly configuration with its `drag` section replaced by `drag`.
    fn bubbly_with(drag: &str) -> String {
        format!(
            r#"{{
                "blending": {{
                    "default": {{ "type": "none", "continuousPhase": "water" }}
                }},
                {drag},
                "turbulentDispersion": {{
                    "(air in water)": {{ "type": "Burns", "sigma": 0.9 }}
                }}
            }}"#
        )
    }
}
