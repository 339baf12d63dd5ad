//! Error types for population construction.
//!
//! Nothing mid-run is fallible: out-of-range quantities are clamped or
//! skipped where they occur. Only malformed construction input is rejected,
//! through [`ConfigError`].

use thiserror::Error;

/// Errors raised while validating a population specification.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Production and procurement divide by the labor coefficient.
    #[error("firm {name:?}: labor coefficient must be positive, got {value}")]
    NonPositiveLaborCoefficient {
        /// Name from the offending firm spec.
        name: String,
        /// The rejected coefficient.
        value: f64,
    },

    /// Posted prices divide buyer budgets; zero or negative is meaningless.
    #[error("firm {name:?}: initial price must be positive, got {value}")]
    NonPositiveInitialPrice {
        /// Name from the offending firm spec.
        name: String,
        /// The rejected price.
        value: f64,
    },

    /// Firms are reported by name; an empty one is almost certainly a bug
    /// in the driver's configuration.
    #[error("firm spec at index {index} has an empty name")]
    EmptyFirmName {
        /// Position in the spec sequence.
        index: usize,
    },
}
