//! Attribute parsing for the FieldAccessor derive macro.
//!
//! Parses the `#[filter(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[filter(...)]`.
#[derive(Debug, Clone)]
pub struct FilterAttr {
    /// Hide this field from rules.
    pub skip: bool,
    /// Delegate dotted paths to the field's own `FieldAccessor`.
    pub nested: bool,
    /// Name used in rules (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FilterAttr {
    fn default() -> Self {
        FilterAttr {
            skip: false,
            nested: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for FilterAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FilterAttr {
            span: input.span(),
            ..FilterAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) if p.is_ident("nested") => attr.nested = true,

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        if s.value().is_empty() || s.value().contains('.') {
                            return Err(Error::new(
                                s.span(),
                                "rename must be a non-empty name without '.'",
                            ));
                        }
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown filter attribute. Expected: skip, nested, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && (attr.nested || attr.rename.is_some()) {
            return Err(Error::new(
                attr.span,
                "skip cannot be combined with other filter attributes",
            ));
        }

        Ok(attr)
    }
}

/// Extract the `#[filter(...)]` attribute from a field's attributes.
///
/// A field carries at most one; options go in a single list.
pub fn parse_filter_attrs(attrs: &[Attribute]) -> Result<FilterAttr> {
    let mut filters = attrs.iter().filter(|attr| attr.path().is_ident("filter"));

    let Some(first) = filters.next() else {
        return Ok(FilterAttr::default());
    };

    if let Some(repeated) = filters.next() {
        return Err(Error::new_spanned(
            repeated,
            "duplicate #[filter] attribute, combine the options as #[filter(a, b)]",
        ));
    }

    first.parse_args::<FilterAttr>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_filter(tokens: &str) -> Result<FilterAttr> {
        syn::parse_str::<FilterAttr>(tokens)
    }

    #[test]
    fn test_filter_skip() {
        let attr = parse_filter("skip").unwrap();
        assert!(attr.skip);
        assert!(!attr.nested);
        assert_eq!(attr.rename, None);
    }

    #[test]
    fn test_filter_nested() {
        let attr = parse_filter("nested").unwrap();
        assert!(attr.nested);
        assert!(!attr.skip);
    }

    #[test]
    fn test_filter_rename() {
        let attr = parse_filter(r#"rename = "createdAt""#).unwrap();
        assert_eq!(attr.rename, Some("createdAt".to_string()));
    }

    #[test]
    fn test_filter_nested_with_rename() {
        let attr = parse_filter(r#"nested, rename = "owner""#).unwrap();
        assert!(attr.nested);
        assert_eq!(attr.rename, Some("owner".to_string()));
    }

    #[test]
    fn test_filter_rename_rejects_dots() {
        let result = parse_filter(r#"rename = "a.b""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_rename_requires_string() {
        assert!(parse_filter("rename = 5").is_err());
    }

    #[test]
    fn test_filter_skip_is_exclusive() {
        assert!(parse_filter("skip, nested").is_err());
    }

    #[test]
    fn test_filter_attrs_single() {
        let attrs: Vec<Attribute> = vec![
            syn::parse_quote!(#[doc = "owner"]),
            syn::parse_quote!(#[filter(nested, rename = "boss")]),
        ];
        let attr = parse_filter_attrs(&attrs).unwrap();
        assert!(attr.nested);
        assert_eq!(attr.rename, Some("boss".to_string()));

        assert!(!parse_filter_attrs(&[]).unwrap().skip);
    }

    #[test]
    fn test_filter_attrs_repeated() {
        let attrs: Vec<Attribute> = vec![
            syn::parse_quote!(#[filter(nested)]),
            syn::parse_quote!(#[filter(rename = "boss")]),
        ];
        let err = parse_filter_attrs(&attrs).unwrap_err();
        assert!(err.to_string().contains("duplicate #[filter] attribute"));
    }

    #[test]
    fn test_filter_unknown_attribute() {
        let result = parse_filter("flatten");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown filter attribute"));
    }
}
