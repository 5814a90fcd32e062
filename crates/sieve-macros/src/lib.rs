//! Proc macros for Sieve.
//!
//! - [`FieldAccessor`] - Generate a `FieldAccessor` implementation and field
//!   name constants from a struct definition

mod accessor;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `FieldAccessor` trait for filterable structs.
///
/// Every named field is exposed under its own name and must implement
/// `sieve::ToValue`, unless annotated otherwise.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Hide this field from rules |
/// | `rename = "..."` | Use a custom name in rules |
/// | `nested` | Resolve dotted paths (`owner.name`) through the field's own `FieldAccessor` |
///
/// A nested field addressed without a remainder is reported as
/// `Value::Unsupported`: it exists but cannot be compared. An absent
/// `Option` record is `Value::Null` instead, as is every field below it.
///
/// Raw identifiers are exposed without their prefix (`r#type` is `"type"`).
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Task::NAME`, `Task::CREATED_AT`)
/// 2. Implementation of `FieldAccessor::field_value()` and `FieldAccessor::has_field()`
///
/// # Example
///
/// ```ignore
/// use sieve::{FieldAccessor, Processor, Rule, RuleKind, RuleSet};
///
/// #[derive(FieldAccessor)]
/// struct Owner {
///     name: String,
/// }
///
/// #[derive(FieldAccessor)]
/// struct Task {
///     name: String,
///     priority: u8,
///     #[filter(rename = "createdAt")]
///     created: u64,
///     #[filter(nested)]
///     owner: Owner,
///     #[filter(skip)]
///     internal_id: u64,
/// }
///
/// let rules = RuleSet::new()
///     .and([Rule::new(Task::PRIORITY, RuleKind::Gte, 3)?])
///     .and([Rule::new("owner.name", RuleKind::Eq, "ada")?]);
///
/// Processor::new().apply(&rules, &mut tasks)?;
/// ```
#[proc_macro_derive(FieldAccessor, attributes(filter))]
pub fn field_accessor_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    accessor::field_accessor_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
