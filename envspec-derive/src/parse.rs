//! Attribute parsing for the Spec derive macro.
//!
//! Handles `#[spec(...)]` on struct fields.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Error, Ident, LitStr, Result, Token,
};

/// Everything one field declares through `#[spec(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAttrs {
    pub key: Option<String>,
    pub default: Option<String>,
    pub required: bool,
    pub flagname: Option<String>,
    pub usage: Option<String>,
    pub custom: bool,
}

/// A single item within `#[spec(...)]`: `name` or `name = "value"`.
struct SpecItem {
    name: Ident,
    value: Option<LitStr>,
}

impl Parse for SpecItem {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: Ident = input.parse()?;

        let value = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse::<LitStr>()?)
        } else {
            None
        };

        Ok(SpecItem { name, value })
    }
}

impl FieldAttrs {
    /// Merge one `#[spec(...)]` attribute into `self`.
    pub fn merge(&mut self, attr: &Attribute) -> Result<()> {
        let items = attr.parse_args_with(Punctuated::<SpecItem, Token![,]>::parse_terminated)?;

        for item in items {
            self.apply(item)?;
        }

        Ok(())
    }

    fn apply(&mut self, item: SpecItem) -> Result<()> {
        let name = item.name.to_string();

        match name.as_str() {
            "key" => set_once(&mut self.key, &item)?,
            "default" => set_once(&mut self.default, &item)?,
            "flagname" => set_once(&mut self.flagname, &item)?,
            "usage" => set_once(&mut self.usage, &item)?,
            "required" => set_flag(&mut self.required, &item)?,
            "custom" => set_flag(&mut self.custom, &item)?,

            // Suggestions for common slips
            "env" | "var" | "name" => {
                return Err(Error::new(
                    item.name.span(),
                    format!("unknown attribute '{}'; did you mean 'key'?", name),
                ))
            }
            "flag" | "long" => {
                return Err(Error::new(
                    item.name.span(),
                    format!("unknown attribute '{}'; did you mean 'flagname'?", name),
                ))
            }
            "require" | "mandatory" => {
                return Err(Error::new(
                    item.name.span(),
                    format!("unknown attribute '{}'; did you mean 'required'?", name),
                ))
            }
            "help" | "doc" => {
                return Err(Error::new(
                    item.name.span(),
                    format!("unknown attribute '{}'; did you mean 'usage'?", name),
                ))
            }

            _ => {
                return Err(Error::new(
                    item.name.span(),
                    format!("unknown attribute '{}'", name),
                ))
            }
        }

        Ok(())
    }
}

fn set_once(slot: &mut Option<String>, item: &SpecItem) -> Result<()> {
    let value = item.value.as_ref().ok_or_else(|| {
        Error::new(
            item.name.span(),
            format!("'{}' requires a value like {} = \"...\"", item.name, item.name),
        )
    })?;

    if slot.is_some() {
        return Err(Error::new(
            item.name.span(),
            format!("duplicate '{}' attribute", item.name),
        ));
    }

    *slot = Some(value.value());
    Ok(())
}

fn set_flag(flag: &mut bool, item: &SpecItem) -> Result<()> {
    if let Some(value) = &item.value {
        return Err(Error::new(
            value.span(),
            format!("'{}' takes no value", item.name),
        ));
    }

    *flag = true;
    Ok(())
}

/// Check if an attribute is a `#[spec(...)]` attribute.
pub fn is_spec_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("spec")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(attr: Attribute) -> Result<FieldAttrs> {
        let mut attrs = FieldAttrs::default();
        attrs.merge(&attr)?;
        Ok(attrs)
    }

    #[test]
    fn test_parse_all_attributes() {
        let attrs = parse(syn::parse_quote! {
            #[spec(key = "PORT", default = "80", required, flagname = "port", usage = "listen port")]
        })
        .unwrap();

        assert_eq!(attrs.key.as_deref(), Some("PORT"));
        assert_eq!(attrs.default.as_deref(), Some("80"));
        assert!(attrs.required);
        assert_eq!(attrs.flagname.as_deref(), Some("port"));
        assert_eq!(attrs.usage.as_deref(), Some("listen port"));
        assert!(!attrs.custom);
    }

    #[test]
    fn test_parse_custom() {
        let attrs = parse(syn::parse_quote! { #[spec(key = "HOSTS", custom)] }).unwrap();
        assert!(attrs.custom);
    }

    #[test]
    fn test_duplicate_key() {
        let err = parse(syn::parse_quote! { #[spec(key = "A", key = "B")] }).unwrap_err();
        assert!(err.to_string().contains("duplicate 'key'"));
    }

    #[test]
    fn test_value_required() {
        let err = parse(syn::parse_quote! { #[spec(key)] }).unwrap_err();
        assert!(err.to_string().contains("requires a value"));
    }

    #[test]
    fn test_flag_takes_no_value() {
        let err = parse(syn::parse_quote! { #[spec(required = "yes")] }).unwrap_err();
        assert!(err.to_string().contains("takes no value"));
    }

    #[test]
    fn test_typo_suggestion() {
        let err = parse(syn::parse_quote! { #[spec(env = "FOO")] }).unwrap_err();
        assert!(err.to_string().contains("did you mean 'key'?"));

        let err = parse(syn::parse_quote! { #[spec(flag = "foo")] }).unwrap_err();
        assert!(err.to_string().contains("did you mean 'flagname'?"));
    }

    #[test]
    fn test_is_spec_attr() {
        let attr: Attribute = syn::parse_quote! { #[spec(required)] };
        assert!(is_spec_attr(&attr));
        let attr: Attribute = syn::parse_quote! { #[serde(default)] };
        assert!(!is_spec_attr(&attr));
    }
}
