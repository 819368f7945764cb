//! Code generation for the Spec derive macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Ident};

use crate::parse::FieldAttrs;

/// Generate the complete `Spec` impl for a struct.
pub fn generate_spec_impl(
    struct_name: &Ident,
    generics: &Generics,
    fields: &[(Ident, FieldAttrs)],
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let entries: Vec<TokenStream> = fields
        .iter()
        .map(|(ident, attrs)| generate_field(ident, attrs))
        .collect();

    quote! {
        impl #impl_generics ::envspec::Spec for #struct_name #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::envspec::Field<'_>> {
                ::std::vec![
                    #(#entries),*
                ]
            }
        }
    }
}

/// Generate the `Field::new(tags, slot)` expression for one field.
fn generate_field(ident: &Ident, attrs: &FieldAttrs) -> TokenStream {
    let tags = generate_tags(ident, attrs);

    let slot = if attrs.custom {
        quote! { ::envspec::Slot::Custom(&mut self.#ident) }
    } else {
        quote! { ::envspec::Slot::Native(&mut self.#ident) }
    };

    quote! {
        ::envspec::Field::new(#tags, #slot)
    }
}

/// Generate a const `Tags` builder chain.
fn generate_tags(ident: &Ident, attrs: &FieldAttrs) -> TokenStream {
    let name = field_name(ident);
    let mut tags = quote! { ::envspec::Tags::new(#name) };

    if let Some(key) = &attrs.key {
        tags = quote! { #tags.key(#key) };
    }
    if let Some(default) = &attrs.default {
        tags = quote! { #tags.default(#default) };
    }
    if attrs.required {
        tags = quote! { #tags.required() };
    }
    if let Some(flagname) = &attrs.flagname {
        tags = quote! { #tags.flagname(#flagname) };
    }
    if let Some(usage) = &attrs.usage {
        tags = quote! { #tags.usage(#usage) };
    }

    tags
}

/// Field name without a raw identifier prefix (`r#type` -> `type`).
fn field_name(ident: &Ident) -> String {
    use syn::ext::IdentExt;
    ident.unraw().to_string()
}
