//! Runtime selection tables for every model family.
//!
//! A [`ModelRegistry`] holds one [`SelectionTable`] per family. Tables start
//! empty; [`register_all_models`] adds the built-in models. The process-wide
//! [`ModelRegistry::builtin`] registry is filled on first use and never
//! changes afterwards.

use std::sync::OnceLock;

use crate::{
    models::{
        material::{
            CpMCvIdeal, EnergyInverseTemperature, HConst, Janaf, PerfectGas, RhoConst, SpecieR,
        },
        multiphase::{
            interfacial::{
                blending::{BlendingMethod, Hyperbolic, Linear, NoBlending},
                drag::{DragModel, Ergun, GidaspowErgunWenYu, SchillerNaumann, Tenneti, WenYu},
                lift::{ConstantLift, LiftModel, NoLift},
                swarm_correction::{NoSwarm, SwarmCorrection, TomiyamaSwarm},
                turbulent_dispersion::{
                    Burns, ConstantCoefficient, Gosman, LopezDeBertodano, NoTurbulentDispersion,
                    TurbulentDispersionModel,
                },
                virtual_mass::{ConstantVirtualMass, NoVirtualMass, VirtualMassModel},
                wall_lubrication::{
                    Antal, Frank, NoWallLubrication, TomiyamaWallLubrication, WallLubricationModel,
                },
            },
            relative_velocity::{General, RelativeVelocityModel, Simple},
        },
    },
    support::{material::MaterialModel, selection::SelectionTable},
};

/// Name → constructor tables for all model families.
#[derive(Debug)]
pub struct ModelRegistry {
    pub drag: SelectionTable<dyn DragModel>,
    pub swarm_correction: SelectionTable<dyn SwarmCorrection>,
    pub virtual_mass: SelectionTable<dyn VirtualMassModel>,
    pub lift: SelectionTable<dyn LiftModel>,
    pub wall_lubrication: SelectionTable<dyn WallLubricationModel>,
    pub turbulent_dispersion: SelectionTable<dyn TurbulentDispersionModel>,
    pub blending: SelectionTable<dyn BlendingMethod>,
    pub relative_velocity: SelectionTable<dyn RelativeVelocityModel>,
    pub material: SelectionTable<dyn MaterialModel>,
}

impl ModelRegistry {
    /// Creates a registry with every table empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drag: SelectionTable::new("drag"),
            swarm_correction: SelectionTable::new("swarmCorrection"),
            virtual_mass: SelectionTable::new("virtualMass"),
            lift: SelectionTable::new("lift"),
            wall_lubrication: SelectionTable::new("wallLubrication"),
            turbulent_dispersion: SelectionTable::new("turbulentDispersion"),
            blending: SelectionTable::new("blending"),
            relative_velocity: SelectionTable::new("relativeVelocity"),
            material: SelectionTable::new("material"),
        }
    }

    /// The registry of built-in models, created on first use.
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<ModelRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut registry = Self::new();
            register_all_models(&mut registry);
            registry
        })
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers every built-in model with `registry`.
pub fn register_all_models(registry: &mut ModelRegistry) {
    registry
        .drag
        .register(SchillerNaumann::TYPE_NAME, SchillerNaumann::boxed)
        .register(Ergun::TYPE_NAME, Ergun::boxed)
        .register(WenYu::TYPE_NAME, WenYu::boxed)
        .register(GidaspowErgunWenYu::TYPE_NAME, GidaspowErgunWenYu::boxed)
        .register(Tenneti::TYPE_NAME, Tenneti::boxed);

    registry
        .swarm_correction
        .register(NoSwarm::TYPE_NAME, NoSwarm::boxed)
        .register(TomiyamaSwarm::TYPE_NAME, TomiyamaSwarm::boxed);

    registry
        .virtual_mass
        .register(ConstantVirtualMass::TYPE_NAME, ConstantVirtualMass::boxed)
        .register(NoVirtualMass::TYPE_NAME, NoVirtualMass::boxed);

    registry
        .lift
        .register(ConstantLift::TYPE_NAME, ConstantLift::boxed)
        .register(NoLift::TYPE_NAME, NoLift::boxed);

    registry
        .wall_lubrication
        .register(Antal::TYPE_NAME, Antal::boxed)
        .register(Frank::TYPE_NAME, Frank::boxed)
        .register(TomiyamaWallLubrication::TYPE_NAME, TomiyamaWallLubrication::boxed)
        .register(NoWallLubrication::TYPE_NAME, NoWallLubrication::boxed);

    registry
        .turbulent_dispersion
        .register(Burns::TYPE_NAME, Burns::boxed)
        .register(Gosman::TYPE_NAME, Gosman::boxed)
        .register(ConstantCoefficient::TYPE_NAME, ConstantCoefficient::boxed)
        .register(LopezDeBertodano::TYPE_NAME, LopezDeBertodano::boxed)
        .register(NoTurbulentDispersion::TYPE_NAME, NoTurbulentDispersion::boxed);

    registry
        .blending
        .register(Hyperbolic::TYPE_NAME, Hyperbolic::boxed)
        .register(Linear::TYPE_NAME, Linear::boxed)
        .register(NoBlending::TYPE_NAME, NoBlending::boxed);

    registry
        .relative_velocity
        .register(Simple::TYPE_NAME, Simple::boxed)
        .register(General::TYPE_NAME, General::boxed);

    registry
        .material
        .register(SpecieR::TYPE_NAME, SpecieR::boxed)
        .register(PerfectGas::TYPE_NAME, PerfectGas::boxed)
        .register(RhoConst::TYPE_NAME, RhoConst::boxed)
        .register(HConst::TYPE_NAME, HConst::boxed)
        .register(Janaf::TYPE_NAME, Janaf::boxed)
        .register(CpMCvIdeal::TYPE_NAME, CpMCvIdeal::boxed)
        .register(EnergyInverseTemperature::TYPE_NAME, EnergyInverseTemperature::boxed);

    log::debug!("registered built-in models");
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::{
        dictionary::{ConfigError, Dictionary},
        selection::{ObjectRegistry, SelectionContext},
    };

    #[test]
    fn builtin_names_match_table() {
        let registry = ModelRegistry::builtin();
        assert_eq!(
            registry.drag.names(),
            ["Ergun", "GidaspowErgunWenYu", "SchillerNaumann", "Tenneti", "WenYu"]
        );
        assert_eq!(registry.swarm_correction.names(), ["TomiyamaSwarm", "noSwarm"]);
        assert_eq!(registry.virtual_mass.names(), ["constantCoefficient", "noVirtualMass"]);
        assert_eq!(registry.lift.names(), ["constantCoefficient", "noLift"]);
        assert_eq!(
            registry.wall_lubrication.names(),
            ["Antal", "Frank", "TomiyamaWallLubrication", "noWallLubrication"]
        );
        assert_eq!(
            registry.turbulent_dispersion.names(),
            ["Burns", "Gosman", "LopezDeBertodano", "constantCoefficient", "noTurbulentDispersion"]
        );
        assert_eq!(registry.blending.names(), ["hyperbolic", "linear", "none"]);
        assert_eq!(registry.relative_velocity.names(), ["general", "simple"]);
        assert_eq!(
            registry.material.names(),
            [
                "CpMCvIdeal",
                "energyInverseTemperature",
                "hConst",
                "janaf",
                "perfectGas",
                "rhoConst",
                "specieR"
            ]
        );
    }

    #[test]
    fn selected_model_reports_registered_name() {
        let registry = ModelRegistry::builtin();
        let objects = ObjectRegistry::default();
        let ctx = SelectionContext::new(&objects);

        for name in registry.wall_lubrication.names() {
            if name == Frank::TYPE_NAME || name == TomiyamaWallLubrication::TYPE_NAME {
                continue;
            }
            let dict = Dictionary::from_json_str(
                "wallLubrication",
                &format!(r#"{{ "type": "{name}", "Cw1": -0.01, "Cw2": 0.05 }}"#),
            )
            .unwrap();
            let model = registry.wall_lubrication.select(&dict, &ctx).unwrap();
            assert_eq!(model.type_name(), name);
        }

        let dict = Dictionary::from_json_str("relativeVelocity", r#"{ "type": "simple", "V0": [0, -0.002, 0], "a": 285.84 }"#)
            .unwrap();
        let model = registry.relative_velocity.select(&dict, &ctx).unwrap();
        assert_eq!(model.type_name(), Simple::TYPE_NAME);
    }

    #[test]
    fn unknown_name_lists_valid_types() {
        let registry = ModelRegistry::builtin();
        let objects = ObjectRegistry::default();
        let dict = Dictionary::from_json_str("drag", r#"{ "type": "Stokes" }"#).unwrap();

        let err = registry.drag.select(&dict, &SelectionContext::new(&objects)).err().unwrap();
        assert_eq!(
            err,
            ConfigError::UnknownModelType {
                family: "drag",
                name: "Stokes".into(),
                dictionary: "drag".into(),
                valid: registry.drag.names().into_iter().map(String::from).collect(),
            }
        );
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = ModelRegistry::new();
        assert!(registry.material.names().is_empty());
        assert!(!registry.blending.contains("linear"));
        assert!(ModelRegistry::builtin().blending.contains("linear"));
    }
}
