use std::collections::BTreeMap;

use serde_json::Value;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::registry::ModelRegistry,
    support::{
        dictionary::{ConfigError, Dictionary},
        material::{MaterialError, MaterialModel, MaterialState, Property, PropertyError},
        selection::{ObjectRegistry, SelectionContext},
        units::{SpecificEnthalpy, SpecificEntropy, SpecificGasConstant, SpecificInternalEnergy},
    },
};

/// A provided property of one aggregate: `(aggregate index, property)`.
type Node = (usize, Property);

/// The aggregates of a material, not yet linked.
#[derive(Default)]
pub struct MaterialTableBuilder {
    models: Vec<Box<dyn MaterialModel>>,
}

impl MaterialTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an aggregate; earlier aggregates take precedence as providers.
    #[must_use]
    pub fn with(mut self, model: Box<dyn MaterialModel>) -> Self {
        self.models.push(model);
        self
    }

    /// Selects every aggregate listed in `dict["models"]`, in order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `models` is missing or not a list of
    /// dictionaries, or an aggregate cannot be selected.
    pub fn from_config(dict: &Dictionary, registry: &ModelRegistry) -> Result<Self, ConfigError> {
        let objects = ObjectRegistry::default();
        let ctx = SelectionContext::new(&objects);
        let models = entries(dict)?
            .iter()
            .map(|entry| registry.material.select(entry, &ctx))
            .collect::<Result<_, _>>()?;
        Ok(Self { models })
    }

    /// Resolves every requirement and checks the dependencies for cycles.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::MissingDependency`] if a compulsory
    /// requirement has no provider and [`MaterialError::Cycle`] if a property
    /// depends on itself, directly or through other aggregates.
    pub fn link(self) -> Result<MaterialTable, MaterialError> {
        let models = self.models;

        let mut providers = BTreeMap::new();
        for (i, model) in models.iter().enumerate() {
            for &property in model.provides() {
                providers.entry(property).or_insert(i);
            }
        }

        let mut links: BTreeMap<Node, BTreeMap<Property, usize>> = BTreeMap::new();
        for (i, model) in models.iter().enumerate() {
            for &property in model.provides() {
                let mut resolved = BTreeMap::new();
                for requirement in model.requires(property) {
                    match providers.get(&requirement.property) {
                        Some(&j) => {
                            log::debug!(
                                "{}.{property} uses {} from {}",
                                model.type_name(),
                                requirement.property,
                                models[j].type_name()
                            );
                            resolved.insert(requirement.property, j);
                        }
                        None if requirement.compulsory => {
                            return Err(MaterialError::MissingDependency {
                                model: model.type_name().to_string(),
                                property,
                                requirement: requirement.property,
                            });
                        }
                        None => log::debug!(
                            "{}.{property}: optional {} not provided",
                            model.type_name(),
                            requirement.property
                        ),
                    }
                }
                links.insert((i, property), resolved);
            }
        }

        let table = MaterialTable {
            models,
            providers,
            links,
        };
        table.check_cycles()?;

        log::info!(
            "linked material table: {}",
            table
                .models
                .iter()
                .map(|model| model.type_name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(table)
    }
}

impl std::fmt::Debug for MaterialTableBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.models.iter().map(|model| model.type_name()))
            .finish()
    }
}

/// A linked material: every property it provides can be evaluated.
pub struct MaterialTable {
    models: Vec<Box<dyn MaterialModel>>,
    providers: BTreeMap<Property, usize>,
    links: BTreeMap<Node, BTreeMap<Property, usize>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Active,
    Done,
}

impl MaterialTable {
    /// Returns `true` if some aggregate provides `property`.
    #[must_use]
    pub fn provides(&self, property: Property) -> bool {
        self.providers.contains_key(&property)
    }

    /// Type names of the aggregates in table order.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        self.models.iter().map(|model| model.type_name()).collect()
    }

    /// Evaluates `property` at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotProvided`] if no aggregate provides the
    /// property, or the providing model's error.
    pub fn evaluate(&self, property: Property, state: &MaterialState) -> Result<f64, PropertyError> {
        let &provider = self
            .providers
            .get(&property)
            .ok_or(PropertyError::NotProvided { property })?;
        self.evaluate_node((provider, property), state)
    }

    /// Specific gas constant.
    ///
    /// # Errors
    ///
    /// See [`MaterialTable::evaluate`].
    pub fn gas_constant(&self, state: &MaterialState) -> Result<SpecificGasConstant, PropertyError> {
        let r = self.evaluate(Property::R, state)?;
        Ok(SpecificGasConstant::new::<joule_per_kilogram_kelvin>(r))
    }

    /// Density.
    ///
    /// # Errors
    ///
    /// See [`MaterialTable::evaluate`].
    pub fn density(&self, state: &MaterialState) -> Result<MassDensity, PropertyError> {
        let rho = self.evaluate(Property::Rho, state)?;
        Ok(MassDensity::new::<kilogram_per_cubic_meter>(rho))
    }

    /// Heat capacity at constant pressure.
    ///
    /// # Errors
    ///
    /// See [`MaterialTable::evaluate`].
    pub fn cp(&self, state: &MaterialState) -> Result<SpecificHeatCapacity, PropertyError> {
        let cp = self.evaluate(Property::Cp, state)?;
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp))
    }

    /// Heat capacity at constant volume.
    ///
    /// # Errors
    ///
    /// See [`MaterialTable::evaluate`].
    pub fn cv(&self, state: &MaterialState) -> Result<SpecificHeatCapacity, PropertyError> {
        let cv = self.evaluate(Property::Cv, state)?;
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cv))
    }

    /// Absolute, sensible or formation enthalpy.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotProvided`] if `property` is not one of
    /// [`Property::Ha`], [`Property::Hs`] or [`Property::Hf`], in addition to
    /// the errors of [`MaterialTable::evaluate`].
    pub fn enthalpy(
        &self,
        property: Property,
        state: &MaterialState,
    ) -> Result<SpecificEnthalpy, PropertyError> {
        if !matches!(property, Property::Ha | Property::Hs | Property::Hf) {
            return Err(PropertyError::NotProvided { property });
        }
        let h = self.evaluate(property, state)?;
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(h))
    }

    /// Sensible or absolute internal energy.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotProvided`] if `property` is not
    /// [`Property::Es`] or [`Property::Ea`], in addition to the errors of
    /// [`MaterialTable::evaluate`].
    pub fn internal_energy(
        &self,
        property: Property,
        state: &MaterialState,
    ) -> Result<SpecificInternalEnergy, PropertyError> {
        if !matches!(property, Property::Es | Property::Ea) {
            return Err(PropertyError::NotProvided { property });
        }
        let e = self.evaluate(property, state)?;
        Ok(SpecificInternalEnergy::new::<joule_per_kilogram>(e))
    }

    /// Entropy.
    ///
    /// # Errors
    ///
    /// See [`MaterialTable::evaluate`].
    pub fn entropy(&self, state: &MaterialState) -> Result<SpecificEntropy, PropertyError> {
        let s = self.evaluate(Property::S, state)?;
        Ok(SpecificEntropy::new::<joule_per_kilogram_kelvin>(s))
    }

    /// Temperature, typically computed from `state.enthalpy`.
    ///
    /// # Errors
    ///
    /// See [`MaterialTable::evaluate`].
    pub fn temperature(&self, state: &MaterialState) -> Result<ThermodynamicTemperature, PropertyError> {
        let t = self.evaluate(Property::T, state)?;
        Ok(ThermodynamicTemperature::new::<kelvin>(t))
    }

    /// Re-reads every aggregate's coefficients from `dict["models"]`.
    ///
    /// The list must name the same types in the same order as the table.
    /// Aggregates before a failing one keep their new coefficients.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the list does not match the table or a
    /// coefficient is missing or invalid.
    pub fn read(&mut self, dict: &Dictionary) -> Result<(), ConfigError> {
        let entries = entries(dict)?;
        if entries.len() != self.models.len() {
            return Err(ConfigError::InvalidEntry {
                key: "models".into(),
                dictionary: dict.path().to_string(),
                reason: format!("expected {} models, found {}", self.models.len(), entries.len()),
            });
        }
        for (model, entry) in self.models.iter().zip(&entries) {
            let name = entry.word("type")?;
            if name != model.type_name() {
                return Err(ConfigError::InvalidEntry {
                    key: "type".into(),
                    dictionary: entry.path().to_string(),
                    reason: format!("linked table has {} here, not {name}", model.type_name()),
                });
            }
        }
        for (model, entry) in self.models.iter_mut().zip(&entries) {
            model.read(&entry.coeffs(model.type_name()))?;
        }
        Ok(())
    }

    fn evaluate_node(&self, (model, property): Node, state: &MaterialState) -> Result<f64, PropertyError> {
        let deps = Dependencies {
            table: self,
            model,
            links: self.links.get(&(model, property)),
        };
        self.models[model].evaluate(property, state, &deps)
    }

    fn check_cycles(&self) -> Result<(), MaterialError> {
        let mut marks = BTreeMap::new();
        let mut path = Vec::new();
        for &node in self.links.keys() {
            self.visit(node, &mut marks, &mut path)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        node: Node,
        marks: &mut BTreeMap<Node, Mark>,
        path: &mut Vec<Node>,
    ) -> Result<(), MaterialError> {
        match marks.get(&node) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Active) => {
                let start = path.iter().position(|&n| n == node).unwrap_or(0);
                let chain = path[start..]
                    .iter()
                    .chain(std::iter::once(&node))
                    .map(|&n| self.node_name(n))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(MaterialError::Cycle { chain });
            }
            None => {}
        }

        marks.insert(node, Mark::Active);
        path.push(node);
        for (&property, &provider) in self.links.get(&node).into_iter().flatten() {
            self.visit((provider, property), marks, path)?;
        }
        path.pop();
        marks.insert(node, Mark::Done);
        Ok(())
    }

    fn node_name(&self, (model, property): Node) -> String {
        format!("{}.{property}", self.models[model].type_name())
    }
}

impl std::fmt::Debug for MaterialTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialTable")
            .field("models", &self.type_names())
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}

/// The resolved requirements of one provided property.
pub struct Dependencies<'a> {
    table: &'a MaterialTable,
    model: usize,
    links: Option<&'a BTreeMap<Property, usize>>,
}

impl Dependencies<'_> {
    /// Returns `true` if `property` was resolved to a provider.
    #[must_use]
    pub fn has(&self, property: Property) -> bool {
        self.links.is_some_and(|links| links.contains_key(&property))
    }

    /// Evaluates the required `property` at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Unresolved`] if `property` has no provider,
    /// or the provider's error.
    pub fn get(&self, property: Property, state: &MaterialState) -> Result<f64, PropertyError> {
        match self.links.and_then(|links| links.get(&property)) {
            Some(&provider) => self.table.evaluate_node((provider, property), state),
            None => Err(PropertyError::Unresolved {
                model: self.table.models[self.model].type_name().to_string(),
                property,
            }),
        }
    }
}

/// The aggregate dictionaries listed in `dict["models"]`.
fn entries(dict: &Dictionary) -> Result<Vec<Dictionary>, ConfigError> {
    let values: Vec<Value> = dict.lookup("models")?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| Dictionary::new(format!("{}/models/{i}", dict.path()), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::material::Requirement;

    /// Provides fixed properties, each requiring the listed properties.
    struct Stub {
        name: &'static str,
        provides: Vec<Property>,
        requires: Vec<Requirement>,
        value: f64,
    }

    impl Stub {
        fn boxed(
            name: &'static str,
            provides: &[Property],
            requires: &[Requirement],
            value: f64,
        ) -> Box<dyn MaterialModel> {
            Box::new(Self {
                name,
                provides: provides.to_vec(),
                requires: requires.to_vec(),
                value,
            })
        }
    }

    impl MaterialModel for Stub {
        fn type_name(&self) -> &'static str {
            self.name
        }

        fn provides(&self) -> &[Property] {
            &self.provides
        }

        fn requires(&self, _property: Property) -> Vec<Requirement> {
            self.requires.clone()
        }

        fn evaluate(
            &self,
            _property: Property,
            state: &MaterialState,
            deps: &Dependencies<'_>,
        ) -> Result<f64, PropertyError> {
            let mut sum = self.value;
            for requirement in &self.requires {
                if deps.has(requirement.property) {
                    sum += deps.get(requirement.property, state)?;
                }
            }
            Ok(sum)
        }

        fn read(&mut self, _dict: &Dictionary) -> Result<(), ConfigError> {
            Ok(())
        }
    }

    fn state() -> MaterialState {
        MaterialState {
            temperature: 300.0,
            pressure: 1e5,
            enthalpy: None,
        }
    }

    #[test]
    fn first_provider_wins_and_dependencies_chain() {
        let table = MaterialTableBuilder::new()
            .with(Stub::boxed("a", &[Property::Cp], &[Requirement::compulsory(Property::R)], 1.0))
            .with(Stub::boxed("b", &[Property::R], &[], 10.0))
            .with(Stub::boxed("c", &[Property::R, Property::Cp], &[], 100.0))
            .link()
            .unwrap();

        assert_relative_eq!(table.evaluate(Property::R, &state()).unwrap(), 10.0);
        assert_relative_eq!(table.evaluate(Property::Cp, &state()).unwrap(), 11.0);
        assert!(matches!(
            table.evaluate(Property::Rho, &state()),
            Err(PropertyError::NotProvided { property: Property::Rho })
        ));
    }

    #[test]
    fn missing_compulsory_dependency_is_fatal() {
        let err = MaterialTableBuilder::new()
            .with(Stub::boxed("perfectGas", &[Property::Rho], &[Requirement::compulsory(Property::R)], 0.0))
            .link()
            .err()
            .unwrap();
        assert_eq!(
            err,
            MaterialError::MissingDependency {
                model: "perfectGas".into(),
                property: Property::Rho,
                requirement: Property::R,
            }
        );
        assert_eq!(err.to_string(), "perfectGas needs R to evaluate rho, but no model provides it");
    }

    #[test]
    fn missing_optional_dependency_is_skipped() {
        let table = MaterialTableBuilder::new()
            .with(Stub::boxed("a", &[Property::Cp], &[Requirement::optional(Property::R)], 1.0))
            .link()
            .unwrap();
        assert_relative_eq!(table.evaluate(Property::Cp, &state()).unwrap(), 1.0);
    }

    #[test]
    fn two_model_cycle_is_rejected() {
        let err = MaterialTableBuilder::new()
            .with(Stub::boxed("a", &[Property::Cp], &[Requirement::compulsory(Property::Cv)], 0.0))
            .with(Stub::boxed("b", &[Property::Cv], &[Requirement::compulsory(Property::Cp)], 0.0))
            .link()
            .err()
            .unwrap();
        assert_eq!(
            err,
            MaterialError::Cycle {
                chain: "a.Cp -> b.Cv -> a.Cp".into()
            }
        );
    }

    #[test]
    fn longer_and_self_cycles_are_rejected() {
        let three = MaterialTableBuilder::new()
            .with(Stub::boxed("a", &[Property::Ha], &[Requirement::compulsory(Property::Hs)], 0.0))
            .with(Stub::boxed("b", &[Property::Hs], &[Requirement::optional(Property::Hf)], 0.0))
            .with(Stub::boxed("c", &[Property::Hf], &[Requirement::compulsory(Property::Ha)], 0.0))
            .link();
        assert!(matches!(three, Err(MaterialError::Cycle { .. })));

        let own = MaterialTableBuilder::new()
            .with(Stub::boxed("a", &[Property::T], &[Requirement::compulsory(Property::T)], 0.0))
            .link();
        assert_eq!(
            own.err(),
            Some(MaterialError::Cycle {
                chain: "a.T -> a.T".into()
            })
        );
    }

    #[test]
    fn unresolved_dependency_reports_model() {
        let table = MaterialTableBuilder::new()
            .with(Stub::boxed("a", &[Property::Cp], &[], 1.0))
            .link()
            .unwrap();
        let deps = Dependencies {
            table: &table,
            model: 0,
            links: None,
        };
        assert!(!deps.has(Property::R));
        assert!(matches!(
            deps.get(Property::R, &state()),
            Err(PropertyError::Unresolved { ref model, property: Property::R }) if model == "a"
        ));
    }
}
