//! Error types for envspec.
//!
//! A binding call stops at the first failing field and returns a single
//! [`BindError`]. Preflight checks collect every problem instead and return
//! [`BindErrors`], a non-empty list built on stillwater's `NonEmptyVec`.

use std::collections::BTreeMap;
use std::fmt;

use stillwater::{NonEmptyVec, Semigroup, Validation};
use thiserror::Error;

use crate::coerce::Kind;

/// Where a raw value was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Origin {
    /// An environment variable, by name.
    Env(String),
    /// A command-line flag, by long name (without dashes).
    Flag(String),
}

impl Origin {
    /// Create an origin for an environment variable.
    pub fn env(key: impl Into<String>) -> Self {
        Origin::Env(key.into())
    }

    /// Create an origin for a command-line flag.
    pub fn flag(name: impl Into<String>) -> Self {
        Origin::Flag(name.into())
    }

    /// The lookup key, without the source prefix.
    pub fn key(&self) -> &str {
        match self {
            Origin::Env(key) | Origin::Flag(key) => key,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Env(key) => write!(f, "env:{}", key),
            Origin::Flag(name) => write!(f, "flag:--{}", name),
        }
    }
}

/// Errors that abort a binding call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// Environment mode: the field declares no `key`.
    #[error("'key' attribute not found for field {field}")]
    MissingKey { field: &'static str },

    /// Environment mode: a required field has no value and no default.
    #[error("environment variable {key} is required by field {field}")]
    RequiredValueMissing { key: String, field: &'static str },

    /// Raw text could not be converted to the field's kind.
    #[error("unable to convert value found in {origin} ('{raw}') to {expected} for field {field}: {message}")]
    Coercion {
        field: &'static str,
        origin: Origin,
        raw: String,
        expected: &'static str,
        message: String,
    },

    /// A custom field type rejected its raw text.
    #[error("[{origin}] field {field} rejected its value: {message}")]
    Hook {
        field: &'static str,
        origin: Origin,
        message: String,
    },

    /// Flag mode: the field's kind has no flag registration rule.
    #[error("the type '{kind}' of the field '{field}' is not supported as a flag")]
    UnsupportedKind { field: &'static str, kind: Kind },

    /// Flag mode: two fields resolve to the same flag name.
    #[error("flag --{flag} of field {field} is already registered by another field")]
    DuplicateFlag { field: &'static str, flag: String },

    /// Command-line arguments could not be parsed, or help/version was requested.
    #[error("{message}")]
    Flags {
        kind: clap::error::ErrorKind,
        message: String,
    },
}

impl BindError {
    /// Name of the field this error relates to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            BindError::MissingKey { field }
            | BindError::RequiredValueMissing { field, .. }
            | BindError::Coercion { field, .. }
            | BindError::Hook { field, .. }
            | BindError::UnsupportedKind { field, .. }
            | BindError::DuplicateFlag { field, .. } => Some(field),
            BindError::Flags { .. } => None,
        }
    }

    /// Source the failing value came from, if any.
    pub fn origin(&self) -> Option<Origin> {
        match self {
            BindError::Coercion { origin, .. } | BindError::Hook { origin, .. } => {
                Some(origin.clone())
            }
            BindError::RequiredValueMissing { key, .. } => Some(Origin::env(key.clone())),
            _ => None,
        }
    }

    /// Whether this error carries help or version output rather than a failure.
    pub fn is_help(&self) -> bool {
        matches!(
            self,
            BindError::Flags {
                kind: clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion,
                ..
            }
        )
    }

    /// A suggestion for fixing this error, if one is obvious.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            BindError::MissingKey { field } => {
                Some(format!("Add #[spec(key = \"...\")] to field '{}'", field))
            }
            BindError::RequiredValueMissing { key, field } => Some(format!(
                "Set {} or give field '{}' a default",
                key, field
            )),
            BindError::UnsupportedKind { field, .. } => Some(format!(
                "Use i64, u64, f64, String or bool for flag field '{}'",
                field
            )),
            BindError::DuplicateFlag { field, .. } => Some(format!(
                "Give field '{}' a distinct #[spec(flagname = \"...\")]",
                field
            )),
            _ => None,
        }
    }
}

impl From<clap::Error> for BindError {
    fn from(err: clap::Error) -> Self {
        BindError::Flags {
            kind: err.kind(),
            message: err.to_string().trim_end().to_string(),
        }
    }
}

/// A non-empty collection of binding errors.
#[derive(Debug, Clone)]
pub struct BindErrors(pub NonEmptyVec<BindError>);

impl BindErrors {
    /// Create from a single error.
    pub fn single(error: BindError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Try to create from a vec, returning None if empty.
    pub fn from_vec(errors: Vec<BindError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Get the first error (always exists).
    pub fn first(&self) -> &BindError {
        self.0.head()
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over errors.
    pub fn iter(&self) -> impl Iterator<Item = &BindError> {
        self.0.iter()
    }
}

impl Semigroup for BindErrors {
    fn combine(self, other: Self) -> Self {
        Self(self.0.combine(other.0))
    }
}

impl From<BindError> for BindErrors {
    fn from(error: BindError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for BindErrors {
    type Item = BindError;
    type IntoIter = std::vec::IntoIter<BindError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl fmt::Display for BindErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Binding errors ({}):", self.len())?;
        for error in self.iter() {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for BindErrors {}

/// Result type of a preflight check.
pub type BindValidation<T> = Validation<T, BindErrors>;

/// Group errors by their origin for organized reporting.
pub fn group_by_origin(errors: &BindErrors) -> BTreeMap<String, Vec<&BindError>> {
    let mut groups: BTreeMap<String, Vec<&BindError>> = BTreeMap::new();

    for error in errors.iter() {
        let origin = error
            .origin()
            .map(|o| o.to_string())
            .unwrap_or_else(|| "(declaration)".to_string());

        groups.entry(origin).or_default().push(error);
    }

    groups
}
