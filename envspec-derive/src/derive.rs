//! Spec derive implementation.

use proc_macro2::TokenStream;
use syn::{Data, DeriveInput, Error, Fields, Result};

use crate::codegen::generate_spec_impl;
use crate::parse::{is_spec_attr, FieldAttrs};

const NAMED_FIELDS_ONLY: &str = "Spec can only be derived for structs with named fields";

/// Derive the `Spec` trait for a struct.
pub fn derive_spec(input: DeriveInput) -> Result<TokenStream> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new_spanned(&input.ident, NAMED_FIELDS_ONLY));
        }
    };

    let fields = match &data.fields {
        Fields::Named(fields) => parse_named_fields(fields)?,
        Fields::Unnamed(_) | Fields::Unit => {
            return Err(Error::new_spanned(&input.ident, NAMED_FIELDS_ONLY));
        }
    };

    Ok(generate_spec_impl(&input.ident, &input.generics, &fields))
}

/// Parse named struct fields and their `#[spec(...)]` attributes.
fn parse_named_fields(fields: &syn::FieldsNamed) -> Result<Vec<(syn::Ident, FieldAttrs)>> {
    let mut result = Vec::new();

    for field in &fields.named {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "field must have a name"))?;

        let mut attrs = FieldAttrs::default();
        for attr in field.attrs.iter().filter(|a| is_spec_attr(a)) {
            attrs.merge(attr)?;
        }

        if attrs.custom && attrs.flagname.is_some() {
            return Err(Error::new_spanned(
                &ident,
                "'custom' fields cannot be bound from flags; remove 'flagname'",
            ));
        }

        result.push((ident, attrs));
    }

    Ok(result)
}
