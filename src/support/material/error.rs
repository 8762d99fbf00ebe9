use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::support::{dictionary::ConfigError, material::Property};

/// Errors raised while building or linking a material table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaterialError {
    /// An aggregate could not be constructed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No aggregate provides a compulsory requirement.
    #[error("{model} needs {requirement} to evaluate {property}, but no model provides it")]
    MissingDependency {
        model: String,
        property: Property,
        requirement: Property,
    },

    /// Evaluating a property would need its own value.
    #[error("circular material property dependency: {chain}")]
    Cycle { chain: String },
}

/// Errors raised while evaluating a material property.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// No aggregate of the table provides the property.
    #[error("no material model provides {property}")]
    NotProvided { property: Property },

    /// An optional dependency was needed but has no provider.
    #[error("{model} needs {property}, which no material model provides")]
    Unresolved { model: String, property: Property },

    /// The state is outside the model's valid domain.
    #[error("{model}: out of domain: {context}")]
    OutOfDomain { model: String, context: String },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual} J/kg")]
    MaxIters {
        /// Smallest enthalpy residual encountered.
        residual: f64,
        /// Iteration count performed by the solver.
        iters: usize,
    },
}
