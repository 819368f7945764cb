//! Convenient re-exports for common envspec usage.
//!
//! ```ignore
//! use envspec::prelude::*;
//!
//! #[derive(Default, DeriveSpec)]
//! struct AppConfig {
//!     #[spec(key = "APP_HOST", default = "localhost")]
//!     host: String,
//! }
//!
//! let mut config = AppConfig::default();
//! Binder::new().show_errors(true).bind(&mut config)?;
//! ```

pub use crate::bind::Binder;
pub use crate::coerce::BoolStyle;
pub use crate::env::{ConfigEnv, MockEnv, RealEnv};
pub use crate::error::{BindError, BindErrors, BindValidation, Origin};
pub use crate::report::{ReportOptions, ValidationExt};
pub use crate::spec::{Field, Slot, Spec};
pub use crate::tags::Tags;
pub use crate::value::{BoxError, Value};

pub use stillwater::Validation;

#[cfg(feature = "derive")]
pub use envspec_derive::Spec as DeriveSpec;
