//! Sieve - in-place, paginated filtering of record collections.
//!
//! Sieve takes a homogeneous `Vec` of records and a declarative rule set,
//! keeps the records that match, and compacts the vector in place. It
//! supports:
//!
//! - Two-level rule sets: AND of OR groups, parsed from JSON or a URL query
//! - Typed operators: equality, ordering, string matching, regex, membership, null checks
//! - Numeric coercion across integer and float kinds, length comparison for collections
//! - Field access through a trait, a derive macro, a closure, or `serde`
//! - Pagination with offset and length, reporting the total number of matches
//!
//! # Quick Start
//!
//! ```rust
//! use sieve::{FieldAccessor, Processor, Result, RuleSet, ToValue, Value};
//!
//! struct Task {
//!     name: String,
//!     priority: i32,
//! }
//!
//! impl FieldAccessor for Task {
//!     fn field_value(&self, field: &str) -> Result<Option<Value<'_>>> {
//!         Ok(match field {
//!             "name" => Some(self.name.to_value()),
//!             "priority" => Some(self.priority.to_value()),
//!             _ => None,
//!         })
//!     }
//! }
//!
//! let mut tasks = vec![
//!     Task { name: "Write docs".into(), priority: 3 },
//!     Task { name: "Fix bug".into(), priority: 5 },
//!     Task { name: "Old task".into(), priority: 1 },
//! ];
//!
//! let rules = RuleSet::parse(
//!     r#"[[{"field":"priority","type":"gte","value":3}],
//!         [{"field":"name","type":"hasPrefix","value":"Fix"},
//!          {"field":"name","type":"contains","value":"docs"}]]"#,
//! )
//! .unwrap();
//!
//! let matches = Processor::new().apply(&rules, &mut tasks).unwrap();
//! assert_eq!(matches.total, 2);
//! assert_eq!(tasks[0].name, "Write docs");
//! assert_eq!(tasks[1].name, "Fix bug");
//! ```
//!
//! # Rule Set Semantics
//!
//! ```text
//! [[a], [b, c], [d]]  ==  a AND (b OR c) AND d
//! ```
//!
//! - An empty rule set matches every record.
//! - A rule whose field does not exist on a record does not match it; this
//!   is not an error.
//! - Nil values never match, except with `isNull`.
//! - The processor rejects rule sets with more than `max_rules` rules
//!   (default 3) before touching the collection.
//!
//! # Operators
//!
//! | Type | Reference | Matches |
//! |------|-----------|---------|
//! | `eq`, `ne` | any non-null | deep equality, numbers compared as `f64` |
//! | `lt`, `lte`, `gt`, `gte` | number | numbers, or the length of strings, sequences and maps |
//! | `eqFold`, `hasPrefix`, `hasSuffix`, `contains`, `regexp` | string | strings only |
//! | `in` | array | equality with any element |
//! | `isNull`, `isNotNull` | ignored | presence of a value |

mod accessor;
mod config;
mod error;
pub mod eval;
mod kind;
mod processor;
mod rule;
mod value;

// Re-export public API
pub use accessor::{lookup, serialized, split_path, FieldAccessor};
pub use config::{ProcessorConfig, DEFAULT_MAX_RESULTS, DEFAULT_MAX_RULES, DEFAULT_QUERY_KEY};
pub use error::{Error, Result};
pub use eval::Evaluator;
pub use kind::RuleKind;
pub use processor::{Matches, Processor, ProcessorBuilder};
pub use rule::{parse_json, Rule, RuleSet};
pub use value::{Number, ToValue, Value};

#[cfg(feature = "derive")]
pub use sieve_macros::FieldAccessor;
