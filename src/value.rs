//! Extensibility hook for custom field types.
//!
//! A field marked `#[spec(custom)]` is not handed to the coercion
//! switchboard. Its type implements [`Value`] instead and receives the raw
//! text exactly as read from the source (after default substitution), with
//! no validation applied first.
//!
//! # Example
//!
//! ```
//! use envspec::{BoxError, Value};
//!
//! #[derive(Debug, Default)]
//! struct Hosts(Vec<String>);
//!
//! impl Value for Hosts {
//!     fn set(&mut self, raw: &str) -> Result<(), BoxError> {
//!         self.0 = raw.split(',').map(str::to_string).collect();
//!         Ok(())
//!     }
//! }
//! ```

/// Boxed error returned by [`Value::set`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A field type that parses its own raw text.
pub trait Value {
    /// Replace the current value with one parsed from `raw`.
    fn set(&mut self, raw: &str) -> Result<(), BoxError>;
}

impl<V: Value + ?Sized> Value for Box<V> {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        (**self).set(raw)
    }
}
