use thiserror::Error;

/// Errors produced while loading an output configuration.
///
/// Everything that goes wrong inside the parser is reported as
/// [`Error::InvalidArgument`] (or [`Error::Format`] for version strings).
/// [`Config::parse`](crate::Config::parse) folds all of them into a single
/// [`Error::Configuration`] before handing the result to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An element or value violates the schema or a semantic constraint.
    #[error("{0}")]
    InvalidArgument(String),

    /// A string does not follow the expected textual format.
    #[error("{0}")]
    Format(String),

    /// The configuration as a whole cannot be accepted.
    #[error("Failed to parse the configuration: {0}")]
    Configuration(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Wrap any error into the uniform configuration failure.
    ///
    /// An error that already is a configuration failure is returned as is so
    /// the prefix never repeats.
    pub(crate) fn into_configuration(self) -> Self {
        match self {
            Error::Configuration(_) => self,
            Error::InvalidArgument(msg) | Error::Format(msg) => Error::Configuration(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
