//! Field metadata and its resolution per binding mode.
//!
//! [`Tags`] is what a field declares (usually emitted by `#[derive(Spec)]`
//! from `#[spec(...)]` attributes). [`FieldDescriptor`] is what one binding
//! call derives from it: the lookup key, default text and required flag that
//! apply to the active [`Mode`]. Descriptors are recomputed on every call.

use crate::coerce::Kind;
use crate::error::BindError;

/// Source a binding call reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Process environment variables.
    Env,
    /// Command-line flags.
    Flags,
}

/// Metadata declared on a single field.
///
/// All builder methods are `const`, so a hand-written [`crate::Spec`] impl
/// can keep its tags in a `const`:
///
/// ```
/// use envspec::Tags;
///
/// const PORT: Tags = Tags::new("port").key("APP_PORT").default("8080");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tags {
    /// Field name as written in the struct.
    pub name: &'static str,
    /// Environment variable name.
    pub key: Option<&'static str>,
    /// Literal default text.
    pub default: Option<&'static str>,
    /// Presence-only required marker.
    pub required: bool,
    /// Flag name override.
    pub flagname: Option<&'static str>,
    /// Flag help text.
    pub usage: Option<&'static str>,
}

impl Tags {
    /// Tags for a field with no attributes.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            key: None,
            default: None,
            required: false,
            flagname: None,
            usage: None,
        }
    }

    pub const fn key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    pub const fn default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn flagname(mut self, name: &'static str) -> Self {
        self.flagname = Some(name);
        self
    }

    pub const fn usage(mut self, usage: &'static str) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Metadata of one field as resolved for one binding call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as written in the struct.
    pub field: &'static str,
    /// Environment variable name, or flag name in flag mode.
    pub key: String,
    /// Default text; an empty default is treated as none.
    pub default: Option<&'static str>,
    /// Whether a missing value is an error. Always false in flag mode.
    pub required: bool,
    /// Native kind of the field.
    pub kind: Kind,
    /// Flag help text, empty outside flag mode.
    pub usage: &'static str,
}

impl FieldDescriptor {
    /// Resolve `tags` for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::MissingKey`] in environment mode when the field
    /// declares no `key`. Environment variables have no implicit naming.
    pub fn resolve(tags: &Tags, kind: Kind, mode: Mode) -> Result<Self, BindError> {
        let default = tags.default.filter(|d| !d.is_empty());

        match mode {
            Mode::Env => {
                let key = tags
                    .key
                    .ok_or(BindError::MissingKey { field: tags.name })?;
                Ok(Self {
                    field: tags.name,
                    key: key.to_string(),
                    default,
                    required: tags.required,
                    kind,
                    usage: "",
                })
            }
            Mode::Flags => {
                let key = match tags.flagname {
                    Some(name) => name.to_string(),
                    None => tags.name.to_lowercase(),
                };
                Ok(Self {
                    field: tags.name,
                    key,
                    default,
                    required: false,
                    kind,
                    usage: tags.usage.unwrap_or(""),
                })
            }
        }
    }
}
