//! Error types for lead intake.

use crate::quiz::catalog::StepKind;
use crate::quiz::validate::StepInvalid;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid step catalog in {key}: {source}")]
    Catalog {
        key: String,
        #[source]
        source: CatalogError,
    },
}

/// Step catalog construction errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Step catalog is empty")]
    Empty,

    #[error("Step {0} appears more than once")]
    Duplicate(StepKind),

    #[error("Last step must be contact, found {0}")]
    ContactNotLast(StepKind),

    #[error("Unknown step kind: {0}")]
    UnknownStep(String),
}

/// Errors from the transactional-email collaborator.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    /// The provider answered with an error payload. Displays the provider's own message.
    #[error("{message}")]
    Rejected {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("SMTP send failed: {0}")]
    Transport(String),
}

/// Quiz wizard errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Invalid(#[from] StepInvalid),

    #[error("Submission could not be delivered: {0}")]
    Dispatch(#[from] MailError),

    #[error("No submission is in flight")]
    NotSubmitting,

    #[error("Answers are locked while submitting or after completion")]
    Locked,
}
