//! ConfigEnv trait for testable I/O.
//!
//! The binder never touches `std::env` directly. Environment lookups and the
//! argument vector go through [`ConfigEnv`], so tests can inject both with
//! [`MockEnv`].

use std::collections::HashMap;
use std::ffi::OsString;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

/// Source of environment variables and command-line arguments.
///
/// # Example
///
/// ```
/// use envspec::env::{ConfigEnv, MockEnv};
///
/// let env = MockEnv::new()
///     .with_env("APP_PORT", "8080")
///     .with_args(["server", "--verbose"]);
///
/// assert_eq!(env.get_env("APP_PORT"), Some("8080".to_string()));
/// assert_eq!(env.args().len(), 2);
/// ```
pub trait ConfigEnv: Send + Sync {
    /// Get an environment variable by name.
    ///
    /// Returns `None` if the variable is not set.
    fn get_env(&self, name: &str) -> Option<String>;

    /// The full argument vector, program name first.
    fn args(&self) -> Vec<OsString>;
}

/// Production environment backed by the standard library.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealEnv;

impl RealEnv {
    /// Create a new real environment.
    pub fn new() -> Self {
        Self
    }
}

impl ConfigEnv for RealEnv {
    /// A value that is not valid unicode is converted lossily, so it is
    /// still seen as set.
    fn get_env(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| {
            value.into_string().unwrap_or_else(|raw| {
                warn!(key = name, "environment variable is not valid unicode");
                raw.to_string_lossy().into_owned()
            })
        })
    }

    fn args(&self) -> Vec<OsString> {
        std::env::args_os().collect()
    }
}

/// In-memory environment and argument vector for tests.
///
/// # Example
///
/// ```
/// use envspec::env::MockEnv;
///
/// let env = MockEnv::new()
///     .with_env("FOO", "42")
///     .with_envs([("BAR", "hello"), ("BAZ", "1")]);
/// ```
#[derive(Debug, Default)]
pub struct MockEnv {
    env_vars: RwLock<HashMap<String, String>>,
    args: RwLock<Vec<OsString>>,
}

impl MockEnv {
    /// Create a new empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable.
    pub fn with_env(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_env(name, value);
        self
    }

    /// Set multiple environment variables from an iterator.
    pub fn with_envs<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        write(&self.env_vars).extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replace the argument vector, program name first.
    pub fn with_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        *write(&self.args) = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set or overwrite a variable through a shared reference.
    pub fn set_env(&self, name: impl Into<String>, value: impl Into<String>) {
        write(&self.env_vars).insert(name.into(), value.into());
    }

    /// Unset a variable.
    pub fn remove_env(&self, name: &str) {
        write(&self.env_vars).remove(name);
    }
}

impl ConfigEnv for MockEnv {
    fn get_env(&self, name: &str) -> Option<String> {
        read(&self.env_vars).get(name).cloned()
    }

    fn args(&self) -> Vec<OsString> {
        read(&self.args).clone()
    }
}

// Poisoned locks are recovered, not propagated.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
