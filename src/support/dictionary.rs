//! Nested key/value configuration dictionaries.
//!
//! The text format is parsed outside this crate; what arrives here is a tree
//! of [`serde_json::Value`]s. A [`Dictionary`] wraps one object of that tree
//! together with its location (`phaseProperties/drag/(air in water)`), so
//! every lookup failure can name both the missing key and where it was
//! expected.

mod error;

pub use error::ConfigError;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::support::{
    constraint::{Constrained, Constraint},
    field::Vector,
};

/// One level of a nested configuration dictionary.
///
/// ```
/// use twine_multiphase::support::dictionary::Dictionary;
///
/// let dict = Dictionary::from_json_str(
///     "drag",
///     r#"{ "type": "SchillerNaumann", "residualRe": 1e-3 }"#,
/// )
/// .unwrap();
///
/// assert_eq!(dict.word("type").unwrap(), "SchillerNaumann");
/// assert_eq!(dict.lookup::<f64>("residualRe").unwrap(), 1e-3);
/// assert!(dict.lookup::<f64>("sigma").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    path: String,
    entries: Map<String, Value>,
}

impl Dictionary {
    /// Wraps a JSON object located at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `value` is not an object.
    pub fn new(path: impl Into<String>, value: Value) -> Result<Self, ConfigError> {
        let path = path.into();
        match value {
            Value::Object(entries) => Ok(Self { path, entries }),
            other => Err(ConfigError::Parse {
                dictionary: path,
                reason: format!("expected a dictionary, found {other}"),
            }),
        }
    }

    /// Parses JSON text into a dictionary located at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a JSON object.
    pub fn from_json_str(path: impl Into<String>, text: &str) -> Result<Self, ConfigError> {
        let path = path.into();
        let value = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            dictionary: path.clone(),
            reason: e.to_string(),
        })?;
        Self::new(path, value)
    }

    /// Location of this dictionary in the configuration tree.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn found(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys of this dictionary in sorted order.
    #[must_use]
    pub fn toc(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Reads a required entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if the key is absent and
    /// [`ConfigError::InvalidEntry`] if the value cannot be read as `T`.
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.entries.get(key).ok_or_else(|| self.missing(key))?;
        self.parse(key, value)
    }

    /// Reads an optional entry, falling back to `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEntry`] if the key is present but the
    /// value cannot be read as `T`.
    pub fn lookup_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.entries.get(key) {
            Some(value) => self.parse(key, value),
            None => Ok(default),
        }
    }

    /// Reads a required scalar and checks it against the constraint `C`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] if the value violates `C`, in
    /// addition to the errors of [`Dictionary::lookup`].
    pub fn lookup_constrained<C: Constraint<f64>>(
        &self,
        key: &str,
    ) -> Result<Constrained<f64, C>, ConfigError> {
        let value = self.lookup::<f64>(key)?;
        self.constrain(key, value)
    }

    /// Reads an optional scalar, defaulting when absent, and checks it against `C`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] if the value (or the default)
    /// violates `C`, in addition to the errors of [`Dictionary::lookup_or`].
    pub fn lookup_constrained_or<C: Constraint<f64>>(
        &self,
        key: &str,
        default: f64,
    ) -> Result<Constrained<f64, C>, ConfigError> {
        let value = self.lookup_or(key, default)?;
        self.constrain(key, value)
    }

    /// Reads a word (a string entry).
    ///
    /// # Errors
    ///
    /// See [`Dictionary::lookup`].
    pub fn word(&self, key: &str) -> Result<String, ConfigError> {
        self.lookup(key)
    }

    /// Reads a three-component vector written as `[x, y, z]`.
    ///
    /// # Errors
    ///
    /// See [`Dictionary::lookup`].
    pub fn lookup_vector(&self, key: &str) -> Result<Vector, ConfigError> {
        let [x, y, z] = self.lookup::<[f64; 3]>(key)?;
        Ok(Vector::new(x, y, z))
    }

    /// Returns the required sub-dictionary `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if absent and
    /// [`ConfigError::InvalidEntry`] if the entry is not a dictionary.
    pub fn sub_dict(&self, key: &str) -> Result<Dictionary, ConfigError> {
        match self.entries.get(key) {
            Some(Value::Object(entries)) => Ok(Dictionary {
                path: self.child_path(key),
                entries: entries.clone(),
            }),
            Some(_) => Err(ConfigError::InvalidEntry {
                key: key.to_string(),
                dictionary: self.path.clone(),
                reason: "expected a sub-dictionary".into(),
            }),
            None => Err(self.missing(key)),
        }
    }

    /// Returns the sub-dictionary `key` if it exists, otherwise this dictionary.
    #[must_use]
    pub fn optional_sub_dict(&self, key: &str) -> Dictionary {
        self.sub_dict(key).unwrap_or_else(|_| self.clone())
    }

    /// Returns the `<type_name>Coeffs` sub-dictionary, or this dictionary if
    /// the coefficients are written inline.
    #[must_use]
    pub fn coeffs(&self, type_name: &str) -> Dictionary {
        self.optional_sub_dict(&format!("{type_name}Coeffs"))
    }

    /// Builds the error for a missing key in this dictionary.
    #[must_use]
    pub fn missing(&self, key: &str) -> ConfigError {
        ConfigError::MissingKey {
            key: key.to_string(),
            dictionary: self.path.clone(),
        }
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}/{key}", self.path)
        }
    }

    fn parse<T: DeserializeOwned>(&self, key: &str, value: &Value) -> Result<T, ConfigError> {
        T::deserialize(value).map_err(|e| ConfigError::InvalidEntry {
            key: key.to_string(),
            dictionary: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn constrain<C: Constraint<f64>>(
        &self,
        key: &str,
        value: f64,
    ) -> Result<Constrained<f64, C>, ConfigError> {
        Constrained::new(value).map_err(|source| ConfigError::OutOfRange {
            key: key.to_string(),
            dictionary: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::{ConstraintError, StrictlyPositive, UnitInterval};

    fn blending() -> Dictionary {
        Dictionary::from_json_str(
            "phaseProperties/blending",
            r#"{
                "type": "hyperbolic",
                "hyperbolicCoeffs": {
                    "transitionAlphaScale": 0.4,
                    "maxDispersedAlpha": { "air": 0.3 }
                },
                "g": [0.0, -9.81, 0.0]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn missing_key_names_the_dictionary() {
        let dict = blending();
        let err = dict.lookup::<f64>("residualRe").unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingKey {
                key: "residualRe".into(),
                dictionary: "phaseProperties/blending".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "keyword \"residualRe\" is undefined in dictionary \"phaseProperties/blending\""
        );
    }

    #[test]
    fn coeffs_sub_dictionary_is_optional() {
        let dict = blending();

        let coeffs = dict.coeffs("hyperbolic");
        assert_eq!(coeffs.path(), "phaseProperties/blending/hyperbolicCoeffs");
        assert_eq!(coeffs.lookup::<f64>("transitionAlphaScale").unwrap(), 0.4);

        let inline = dict.coeffs("linear");
        assert_eq!(inline.path(), "phaseProperties/blending");
        assert_eq!(inline.word("type").unwrap(), "hyperbolic");
    }

    #[test]
    fn nested_paths() {
        let alphas = blending().coeffs("hyperbolic").sub_dict("maxDispersedAlpha").unwrap();
        assert_eq!(
            alphas.path(),
            "phaseProperties/blending/hyperbolicCoeffs/maxDispersedAlpha"
        );
        assert_eq!(alphas.toc(), vec!["air"]);
    }

    #[test]
    fn constrained_lookups() {
        let coeffs = blending().coeffs("hyperbolic");
        let scale = coeffs
            .lookup_constrained::<StrictlyPositive>("transitionAlphaScale")
            .unwrap();
        assert_eq!(scale.get(), 0.4);

        let residual = coeffs
            .lookup_constrained_or::<UnitInterval>("residualAlpha", 1e-6)
            .unwrap();
        assert_eq!(residual.get(), 1e-6);

        let err = coeffs
            .lookup_constrained_or::<StrictlyPositive>("residualRe", -1.0)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                source: ConstraintError::OutOfDomain { domain: "> 0" },
                ..
            }
        ));
    }

    #[test]
    fn invalid_entries() {
        let dict = blending();
        assert!(matches!(
            dict.lookup::<f64>("type"),
            Err(ConfigError::InvalidEntry { .. })
        ));
        assert!(matches!(
            dict.sub_dict("type"),
            Err(ConfigError::InvalidEntry { .. })
        ));
        assert!(Dictionary::from_json_str("x", "[1, 2]").is_err());
        assert!(Dictionary::from_json_str("x", "{ not json").is_err());
    }

    #[test]
    fn vectors() {
        let g = blending().lookup_vector("g").unwrap();
        assert_eq!(g, Vector::new(0.0, -9.81, 0.0));
    }
}
