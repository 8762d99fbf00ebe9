//! Runtime model selection.
//!
//! A [`SelectionTable`] maps model type names to constructors for one model
//! family. Tables are filled by an explicit registration step and are
//! read-only afterwards. Constructors receive their coefficients and a
//! [`SelectionContext`] describing what the model is being built for.

mod objects;

pub use objects::ObjectRegistry;

use std::collections::BTreeMap;

use crate::support::{
    dictionary::{ConfigError, Dictionary},
    phase::{PairKey, PairProperties},
};

/// Builds one model from its coefficient dictionary.
pub type Constructor<M> = fn(&Dictionary, &SelectionContext<'_>) -> Result<Box<M>, ConfigError>;

/// Name → constructor table for one model family.
///
/// `M` is usually a trait object such as `dyn DragModel`.
pub struct SelectionTable<M: ?Sized> {
    family: &'static str,
    constructors: BTreeMap<&'static str, Constructor<M>>,
}

impl<M: ?Sized> SelectionTable<M> {
    /// Creates an empty table for the family `family` (used in error messages).
    #[must_use]
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            constructors: BTreeMap::new(),
        }
    }

    /// Registers `constructor` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, constructor: Constructor<M>) -> &mut Self {
        if self.constructors.insert(name, constructor).is_some() {
            log::debug!("{} type {name} re-registered", self.family);
        }
        self
    }

    #[must_use]
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Registered type names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.constructors.keys().copied().collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Constructs the model named by the `type` entry of `dict`.
    ///
    /// Coefficients are read from the `<type>Coeffs` sub-dictionary when
    /// present and from `dict` itself otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if `dict` has no `type` entry,
    /// [`ConfigError::UnknownModelType`] if the type is not registered, and
    /// any error raised by the model's constructor.
    pub fn select(&self, dict: &Dictionary, ctx: &SelectionContext<'_>) -> Result<Box<M>, ConfigError> {
        let name = dict.word("type")?;
        self.construct(&name, dict, ctx)
    }

    /// Constructs the model `name` with coefficients from `dict`.
    ///
    /// # Errors
    ///
    /// See [`SelectionTable::select`].
    pub fn construct(
        &self,
        name: &str,
        dict: &Dictionary,
        ctx: &SelectionContext<'_>,
    ) -> Result<Box<M>, ConfigError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ConfigError::UnknownModelType {
                family: self.family,
                name: name.to_string(),
                dictionary: dict.path().to_string(),
                valid: self.names().into_iter().map(String::from).collect(),
            })?;

        match ctx.pair {
            Some(pair) => log::info!("selecting {} model {name} for {pair}", self.family),
            None => log::info!("selecting {} model {name}", self.family),
        }

        constructor(&dict.coeffs(name), ctx)
    }
}

impl<M: ?Sized> std::fmt::Debug for SelectionTable<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionTable")
            .field("family", &self.family)
            .field("names", &self.names())
            .finish()
    }
}

static NO_PAIR_PROPERTIES: PairProperties = PairProperties::none();

/// What a model is being constructed for.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// The phase pair the model acts on, if any.
    pub pair: Option<&'a PairKey>,
    /// Names of every phase in the system.
    pub phase_names: &'a [String],
    /// Constant properties of `pair`.
    pub properties: &'a PairProperties,
    /// Previously constructed models available for cross-model lookup.
    pub objects: &'a ObjectRegistry,
}

impl<'a> SelectionContext<'a> {
    /// A context with no pair and no phases.
    #[must_use]
    pub fn new(objects: &'a ObjectRegistry) -> Self {
        Self {
            pair: None,
            phase_names: &[],
            properties: &NO_PAIR_PROPERTIES,
            objects,
        }
    }

    #[must_use]
    pub fn with_pair(self, pair: &'a PairKey, properties: &'a PairProperties) -> Self {
        Self {
            pair: Some(pair),
            properties,
            ..self
        }
    }

    #[must_use]
    pub fn with_phases(self, phase_names: &'a [String]) -> Self {
        Self {
            phase_names,
            ..self
        }
    }

    /// Returns the pair, which `model` requires.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingPair`] if no pair is set.
    pub fn require_pair(&self, model: &str) -> Result<&'a PairKey, ConfigError> {
        self.pair.ok_or_else(|| ConfigError::MissingPair {
            model: model.to_string(),
        })
    }

    /// Returns the pair's surface tension, which `model` requires.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingPair`] if no pair is set and
    /// [`ConfigError::MissingPairProperty`] if no surface tension is configured.
    pub fn require_surface_tension(&self, model: &str) -> Result<f64, ConfigError> {
        let pair = self.require_pair(model)?;
        self.properties
            .surface_tension
            .map(|sigma| sigma.get())
            .ok_or_else(|| ConfigError::MissingPairProperty {
                model: model.to_string(),
                what: "surface tension",
                pair: pair.to_string(),
            })
    }
}
