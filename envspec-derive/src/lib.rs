//! Derive macro for the envspec binding library.
//!
//! `#[derive(Spec)]` registers every named field of a struct with its
//! `#[spec(...)]` metadata, in declaration order, so the struct can be bound
//! from environment variables or command-line flags.
//!
//! # Basic Usage
//!
//! ```ignore
//! use envspec::DeriveSpec;
//!
//! #[derive(Default, DeriveSpec)]
//! struct ServerConfig {
//!     #[spec(key = "HOST", default = "localhost")]
//!     host: String,
//!
//!     #[spec(key = "PORT", required, flagname = "listen", usage = "port to listen on")]
//!     port: i64,
//! }
//! ```
//!
//! # Attributes
//!
//! - `key = "NAME"` - environment variable name
//! - `default = "text"` - default text
//! - `required` - missing value is an error (environment binding only)
//! - `flagname = "name"` - flag name override
//! - `usage = "text"` - flag help text
//! - `custom` - the field type implements `envspec::Value`
//!
//! Fields without any attribute are still registered. Environment binding
//! rejects them at runtime because they have no `key`; flag binding uses the
//! lower-cased field name.

extern crate proc_macro;

mod codegen;
mod derive;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive the `Spec` trait for a struct with named fields.
#[proc_macro_derive(Spec, attributes(spec))]
pub fn derive_spec(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive::derive_spec(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
