//! envspec: bind struct fields from environment variables and command-line flags.
//!
//! Declare where each field comes from once, then fill the struct in place
//! from either source. The binder coerces text into the field's type,
//! substitutes defaults, and enforces required fields.
//!
//! # Quick Start
//!
//! ```ignore
//! use envspec::prelude::*;
//!
//! #[derive(Debug, Default, DeriveSpec)]
//! struct AppConfig {
//!     #[spec(key = "APP_PORT", default = "8080")]
//!     port: u16,
//!
//!     #[spec(key = "APP_DATABASE_URL", required)]
//!     database_url: String,
//!
//!     #[spec(key = "APP_DEBUG")]
//!     debug: bool,
//! }
//!
//! fn main() -> Result<(), BindError> {
//!     let mut config = AppConfig::default();
//!     envspec::bind(&mut config, true)?;
//!     println!("listening on {}", config.port);
//!     Ok(())
//! }
//! ```
//!
//! # Attributes
//!
//! | Attribute | Meaning |
//! |-----------|---------|
//! | `key = "NAME"` | environment variable; required for environment binding |
//! | `default = "text"` | used when the variable is unset or empty |
//! | `required` | fail when there is no value and no default (environment only) |
//! | `flagname = "name"` | flag name; defaults to the lower-cased field name |
//! | `usage = "text"` | flag help text |
//! | `custom` | the field type implements [`Value`] and parses its own text |
//!
//! # Semantics worth knowing
//!
//! - An unset variable and a variable set to `""` look the same. Both trigger
//!   the default / required fallback. A value that is not valid unicode is
//!   still set; it is converted lossily and logged.
//! - Environment booleans default to [`BoolStyle::Presence`]: any non-empty
//!   text, including `"0"`, is `true`. Use [`BoolStyle::Strict`] for `1`/`0`.
//! - The first failing field ends the call. Fields before it keep their new
//!   values.
//! - Flags support `i64`, `u64`, `f32`, `f64`, `String` and `bool` fields only,
//!   and the process command line should be bound at most once. A repeated
//!   flag keeps its last value and parsing stops at the first positional
//!   argument.
//! - Targets are always `&mut T` with `T: Spec`. Passing a value, or a type
//!   that is not a record, does not compile:
//!
//! ```compile_fail
//! let mut port = 8080u16;
//! envspec::bind(&mut port, false).unwrap();
//! ```
//!
//! # Module Structure
//!
//! - [`prelude`]: convenient re-exports
//! - [`bind`](mod@bind): the [`Binder`] engine
//! - [`coerce`]: the type coercion switchboard
//! - [`tags`]: field metadata and its resolution per mode
//! - [`spec`]: the [`Spec`] trait implemented by bindable records
//! - [`value`]: the [`Value`] extensibility hook
//! - [`mod@env`]: `ConfigEnv` trait and `MockEnv` for testing
//! - [`error`]: [`BindError`] and [`BindErrors`]
//! - [`report`]: stderr echo and pretty printing

pub mod bind;
pub mod coerce;
pub mod env;
pub mod error;
mod flags;
pub mod prelude;
pub mod report;
pub mod spec;
pub mod tags;
pub mod value;

pub use bind::Binder;
pub use coerce::{BoolStyle, Coerce, CoerceError, Kind};
pub use env::{ConfigEnv, MockEnv, RealEnv};
pub use error::{group_by_origin, BindError, BindErrors, BindValidation, Origin};
pub use report::{ColorOption, ReportOptions, ValidationExt};
pub use spec::{Field, Slot, Spec};
pub use tags::{FieldDescriptor, Mode, Tags};
pub use value::{BoxError, Value};

pub use stillwater::{NonEmptyVec, Semigroup, Validation};

#[cfg(feature = "derive")]
pub use envspec_derive::Spec as DeriveSpec;

/// Bind `spec` from the process environment.
///
/// With `show_errors`, a failure is also written to stderr as one line.
pub fn bind<T: Spec + ?Sized>(spec: &mut T, show_errors: bool) -> Result<(), BindError> {
    Binder::new().show_errors(show_errors).bind(spec)
}

/// Bind `spec` from the process command line.
///
/// Call at most once per process.
pub fn bind_flags<T: Spec + ?Sized>(spec: &mut T) -> Result<(), BindError> {
    Binder::new().bind_flags(spec)
}

/// Bind `spec` from the process environment and hand it back with the result.
///
/// On failure the returned record may be partially bound.
pub fn load_config<T: Spec + ?Sized>(
    spec: &mut T,
    show_errors: bool,
) -> (&mut T, Result<(), BindError>) {
    let result = bind(spec, show_errors);
    (spec, result)
}
