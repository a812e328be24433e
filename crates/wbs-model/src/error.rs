use thiserror::Error;

/// Errors raised when constructing model values from raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid schema path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
    #[error("invalid property id '{0}': expected 'P' followed by a positive integer")]
    InvalidPropertyId(String),
    #[error("invalid language code '{0}'")]
    InvalidLanguageCode(String),
    #[error("unknown semantic type '{0}'")]
    UnknownSemanticType(String),
    #[error("unknown target kind '{0}'")]
    UnknownTargetKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
