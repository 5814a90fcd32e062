//! Implementation of the `#[derive(FieldAccessor)]` macro.
//!
//! Generates an implementation of the `FieldAccessor` trait and field name
//! constants for every exposed field.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_filter_attrs;

/// Main implementation of the FieldAccessor derive macro.
pub fn field_accessor_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "FieldAccessor can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "FieldAccessor can only be derived for structs",
            ))
        }
    };

    let mut field_arms: Vec<TokenStream> = Vec::new();
    let mut known_arms: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut seen: Vec<(String, String)> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_filter_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let rule_name = attrs
            .rename
            .unwrap_or_else(|| field_name.unraw().to_string());
        let const_str = to_screaming_snake_case(&rule_name);

        for (name, constant) in &seen {
            if *name == rule_name {
                return Err(Error::new(
                    field.span(),
                    format!("duplicate filter field name '{}'", rule_name),
                ));
            }
            if *constant == const_str {
                return Err(Error::new(
                    field.span(),
                    format!(
                        "filter field name '{}' clashes with '{}' on constant {}",
                        rule_name, name, const_str
                    ),
                ));
            }
        }
        seen.push((rule_name.clone(), const_str.clone()));

        let const_name = format_ident!("{}", const_str);
        field_constants.push(quote! {
            /// Field name constant for rule building.
            pub const #const_name: &'static str = #rule_name;
        });

        if attrs.nested {
            field_arms.push(quote! {
                (#rule_name, ::core::option::Option::Some(rest)) => {
                    ::sieve::FieldAccessor::field_value(&self.#field_name, rest)
                }
                (#rule_name, ::core::option::Option::None) => {
                    ::core::result::Result::Ok(::core::option::Option::Some(
                        ::sieve::FieldAccessor::self_value(&self.#field_name),
                    ))
                }
            });

            let field_ty = &field.ty;
            known_arms.push(quote! {
                (#rule_name, ::core::option::Option::Some(rest)) => {
                    <#field_ty as ::sieve::FieldAccessor>::has_field(rest)
                }
                (#rule_name, ::core::option::Option::None) => {
                    ::core::result::Result::Ok(true)
                }
            });
        } else {
            field_arms.push(quote! {
                (#rule_name, ::core::option::Option::None) => {
                    ::core::result::Result::Ok(::core::option::Option::Some(
                        ::sieve::ToValue::to_value(&self.#field_name),
                    ))
                }
            });

            known_arms.push(quote! {
                (#rule_name, ::core::option::Option::None) => ::core::result::Result::Ok(true),
            });
        }
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::sieve::FieldAccessor for #struct_name #ty_generics #where_clause {
            fn field_value(
                &self,
                field: &str,
            ) -> ::sieve::Result<::core::option::Option<::sieve::Value<'_>>> {
                match ::sieve::split_path(field)? {
                    #(#field_arms)*
                    _ => ::core::result::Result::Ok(::core::option::Option::None),
                }
            }

            fn has_field(field: &str) -> ::sieve::Result<bool> {
                match ::sieve::split_path(field)? {
                    #(#known_arms)*
                    _ => ::core::result::Result::Ok(false),
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
