//! Error types for velocity-field generation.

use thiserror::Error;

pub type VelocityResult<T> = Result<T, VelocityError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum VelocityError {
    /// No generator is registered under this name.
    #[error("Unknown velocity generator: {name}")]
    UnknownGenerator { name: String },

    /// Generator settings could not be parsed or are out of range.
    #[error("Invalid settings for {generator}: {what}")]
    InvalidSettings {
        generator: &'static str,
        what: String,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl VelocityError {
    pub(crate) fn settings(generator: &'static str, err: impl std::fmt::Display) -> Self {
        VelocityError::InvalidSettings {
            generator,
            what: err.to_string(),
        }
    }
}
