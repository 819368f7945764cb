//! The binding engine.
//!
//! [`Binder`] walks every field of a [`Spec`] once, in declaration order:
//!
//! 1. resolve the field's [`FieldDescriptor`] for the active mode,
//! 2. read the raw text from the source,
//! 3. apply default / required fallback,
//! 4. coerce (or hand the text to a custom [`crate::Value`]) and assign.
//!
//! The first error ends the call. Fields bound before the failure keep their
//! new values; nothing is rolled back.

use std::sync::atomic::{AtomicBool, Ordering};

use stillwater::Validation;
use tracing::{debug, warn};

use crate::coerce::{BoolStyle, CoerceError};
use crate::env::{ConfigEnv, RealEnv};
use crate::error::{BindError, BindErrors, BindValidation, Origin};
use crate::flags;
use crate::report;
use crate::spec::{Field, Slot, Spec};
use crate::tags::{FieldDescriptor, Mode};

static PROCESS_FLAGS_BOUND: AtomicBool = AtomicBool::new(false);

/// Configurable entry point for binding a [`Spec`].
///
/// # Example
///
/// ```
/// use envspec::env::MockEnv;
/// use envspec::{Binder, BoolStyle, Field, Slot, Spec, Tags};
///
/// #[derive(Default)]
/// struct App {
///     debug: bool,
/// }
///
/// impl Spec for App {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::new(Tags::new("debug").key("APP_DEBUG"), Slot::Native(&mut self.debug))]
///     }
/// }
///
/// let env = MockEnv::new().with_env("APP_DEBUG", "1");
/// let mut app = App::default();
/// Binder::new()
///     .booleans(BoolStyle::Strict)
///     .bind_with_env(&mut app, &env)
///     .unwrap();
/// assert!(app.debug);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Binder {
    show_errors: bool,
    booleans: BoolStyle,
    program_name: Option<String>,
}

impl Binder {
    /// Binder with errors kept silent and presence-style booleans.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also write each failure to stderr as a single line.
    ///
    /// The error is returned either way.
    pub fn show_errors(mut self, show: bool) -> Self {
        self.show_errors = show;
        self
    }

    /// How boolean environment values are read. Flags are always strict.
    pub fn booleans(mut self, style: BoolStyle) -> Self {
        self.booleans = style;
        self
    }

    /// Program name shown in flag usage output.
    ///
    /// Defaults to the file name of the first argument.
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    /// Bind `spec` from the process environment.
    pub fn bind<T: Spec + ?Sized>(&self, spec: &mut T) -> Result<(), BindError> {
        self.bind_with_env(spec, &RealEnv::new())
    }

    /// Bind `spec` from the environment variables of `env`.
    pub fn bind_with_env<T: Spec + ?Sized>(
        &self,
        spec: &mut T,
        env: &dyn ConfigEnv,
    ) -> Result<(), BindError> {
        let result = self.bind_env_fields(spec, env);
        self.finish(result)
    }

    /// Bind `spec` from the process command line.
    ///
    /// The process argument vector is one shared resource: call this at most
    /// once per process. A second call is logged, not rejected.
    pub fn bind_flags<T: Spec + ?Sized>(&self, spec: &mut T) -> Result<(), BindError> {
        if PROCESS_FLAGS_BOUND.swap(true, Ordering::SeqCst) {
            warn!("process command line bound more than once");
        }
        self.bind_flags_with_env(spec, &RealEnv::new())
    }

    /// Bind `spec` from the argument vector of `env`.
    pub fn bind_flags_with_env<T: Spec + ?Sized>(
        &self,
        spec: &mut T,
        env: &dyn ConfigEnv,
    ) -> Result<(), BindError> {
        let result = flags::bind(spec.fields(), env, self.program_name.as_deref());
        self.finish(result)
    }

    /// Report every problem binding `spec` from the process environment would hit.
    ///
    /// Fields are never written.
    pub fn check<T: Spec + ?Sized>(&self, spec: &mut T) -> BindValidation<()> {
        self.check_with_env(spec, &RealEnv::new())
    }

    /// Like [`Binder::check`], reading from `env`.
    pub fn check_with_env<T: Spec + ?Sized>(
        &self,
        spec: &mut T,
        env: &dyn ConfigEnv,
    ) -> BindValidation<()> {
        let errors: Vec<BindError> = spec
            .fields()
            .iter()
            .filter_map(|field| self.check_env_field(field, env).err())
            .collect();
        into_validation(errors)
    }

    /// Report every problem binding `spec` from the argument vector of `env` would hit.
    pub fn check_flags_with_env<T: Spec + ?Sized>(
        &self,
        spec: &mut T,
        env: &dyn ConfigEnv,
    ) -> BindValidation<()> {
        let errors = flags::check(&spec.fields(), env, self.program_name.as_deref());
        into_validation(errors)
    }

    fn bind_env_fields<T: Spec + ?Sized>(
        &self,
        spec: &mut T,
        env: &dyn ConfigEnv,
    ) -> Result<(), BindError> {
        for field in spec.fields() {
            let desc = FieldDescriptor::resolve(&field.tags, field.slot.kind(), Mode::Env)?;
            let raw = env_raw_value(&desc, env)?;
            assign(field.slot, &desc, Origin::env(desc.key.as_str()), &raw, self.booleans)?;
            debug!(field = desc.field, key = %desc.key, "bound field from environment");
        }
        Ok(())
    }

    fn check_env_field(&self, field: &Field<'_>, env: &dyn ConfigEnv) -> Result<(), BindError> {
        let desc = FieldDescriptor::resolve(&field.tags, field.slot.kind(), Mode::Env)?;
        let raw = env_raw_value(&desc, env)?;
        desc.kind
            .check(&raw, self.booleans)
            .map_err(|err| coercion_error(&desc, Origin::env(desc.key.as_str()), &raw, err))
    }

    fn finish(&self, result: Result<(), BindError>) -> Result<(), BindError> {
        if let Err(err) = &result {
            if self.show_errors {
                report::echo(err);
            }
        }
        result
    }
}

/// Read the raw value for `desc` and apply the default / required fallback.
///
/// An unset variable and a variable set to `""` are treated the same.
fn env_raw_value(desc: &FieldDescriptor, env: &dyn ConfigEnv) -> Result<String, BindError> {
    let raw = env.get_env(&desc.key).unwrap_or_default();
    if !raw.is_empty() {
        return Ok(raw);
    }

    if let Some(default) = desc.default {
        debug!(field = desc.field, key = %desc.key, default, "using default value");
        return Ok(default.to_string());
    }

    if desc.required {
        return Err(BindError::RequiredValueMissing {
            key: desc.key.clone(),
            field: desc.field,
        });
    }

    Ok(raw)
}

/// Convert `raw` into the field behind `slot`.
pub(crate) fn assign(
    slot: Slot<'_>,
    desc: &FieldDescriptor,
    origin: Origin,
    raw: &str,
    booleans: BoolStyle,
) -> Result<(), BindError> {
    match slot {
        Slot::Native(target) => target
            .coerce(raw, booleans)
            .map_err(|err| coercion_error(desc, origin, raw, err)),
        Slot::Custom(target) => target.set(raw).map_err(|err| BindError::Hook {
            field: desc.field,
            origin,
            message: err.to_string(),
        }),
    }
}

pub(crate) fn coercion_error(
    desc: &FieldDescriptor,
    origin: Origin,
    raw: &str,
    err: CoerceError,
) -> BindError {
    BindError::Coercion {
        field: desc.field,
        origin,
        raw: raw.to_string(),
        expected: err.expected,
        message: err.message,
    }
}

fn into_validation(errors: Vec<BindError>) -> BindValidation<()> {
    match BindErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}
