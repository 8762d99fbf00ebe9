use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Fatal case-setup errors.
///
/// Every variant names the offending key, model or dictionary so that the
/// run can be stopped with a message pointing at the configuration mistake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("cannot parse dictionary \"{dictionary}\": {reason}")]
    Parse { dictionary: String, reason: String },

    /// A required keyword is absent.
    #[error("keyword \"{key}\" is undefined in dictionary \"{dictionary}\"")]
    MissingKey { key: String, dictionary: String },

    /// A keyword is present but its value has the wrong shape.
    #[error("entry \"{key}\" in dictionary \"{dictionary}\" is invalid: {reason}")]
    InvalidEntry {
        key: String,
        dictionary: String,
        reason: String,
    },

    /// A numeric coefficient is outside its physical domain.
    #[error("entry \"{key}\" in dictionary \"{dictionary}\" is out of range: {source}")]
    OutOfRange {
        key: String,
        dictionary: String,
        #[source]
        source: ConstraintError,
    },

    /// A per-phase entry is missing for a phase that takes part in the model.
    #[error("entry \"{key}\" for phase \"{phase}\" is undefined in dictionary \"{dictionary}\"")]
    MissingPhaseEntry {
        key: String,
        phase: String,
        dictionary: String,
    },

    /// The requested model type is not in the selection table.
    #[error(
        "unknown {family} type \"{name}\" in dictionary \"{dictionary}\"; valid {family} types are: {}",
        .valid.join(", ")
    )]
    UnknownModelType {
        family: &'static str,
        name: String,
        dictionary: String,
        valid: Vec<String>,
    },

    /// A cross-model lookup did not find the named object.
    #[error(
        "cannot find {expected} \"{name}\" in the object registry; available objects are: {}",
        .available.join(", ")
    )]
    ObjectNotFound {
        name: String,
        expected: &'static str,
        available: Vec<String>,
    },

    /// A model needs a pair property (surface tension, ...) that is not configured.
    #[error("{model} requires {what} for phase pair \"{pair}\"")]
    MissingPairProperty {
        model: String,
        what: &'static str,
        pair: String,
    },

    /// A model was selected without the phase pair it acts on.
    #[error("{model} must be selected for a phase pair")]
    MissingPair { model: String },

    /// A phase pair name does not follow `(a in b)` or `(a and b)`.
    #[error("invalid phase pair \"{key}\": expected \"(a in b)\" or \"(a and b)\"")]
    InvalidPairKey { key: String },

    /// A phase pair names a phase that the system does not have.
    #[error("phase \"{phase}\" named by pair \"{pair}\" is not part of the phase system")]
    UnknownPhase { phase: String, pair: String },

    /// A phase pair names the same phase twice.
    #[error("phase pair \"{pair}\" names phase \"{phase}\" twice")]
    RepeatedPhase { phase: String, pair: String },
}
