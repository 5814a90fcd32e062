//! String operators: `eqFold`, `hasPrefix`, `hasSuffix`, `contains`, `regexp`.
//!
//! All of them need a string reference at construction and only ever match
//! string input.

use regex::Regex;

use crate::error::Result;
use crate::kind::RuleKind;
use crate::value::Value;

use super::{string_reference, Evaluator};

macro_rules! string_evaluator {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $method:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            reference: String,
        }

        impl $name {
            /// Builds the evaluator; the reference must be a string.
            pub fn new(reference: &serde_json::Value) -> Result<Self> {
                Ok($name {
                    reference: string_reference($kind, reference)?,
                })
            }
        }

        impl Evaluator for $name {
            fn evaluate(&self, value: &Value<'_>) -> bool {
                value
                    .as_str()
                    .is_some_and(|s| s.$method(self.reference.as_str()))
            }
        }
    };
}

string_evaluator!(
    /// Input string starts with the reference.
    HasPrefix,
    RuleKind::HasPrefix,
    starts_with
);

string_evaluator!(
    /// Input string ends with the reference.
    HasSuffix,
    RuleKind::HasSuffix,
    ends_with
);

string_evaluator!(
    /// Input string contains the reference.
    Contains,
    RuleKind::Contains,
    contains
);

/// Input string equals the reference under Unicode case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualFold {
    reference: String,
}

impl EqualFold {
    /// Builds the evaluator; the reference must be a string.
    pub fn new(reference: &serde_json::Value) -> Result<Self> {
        Ok(EqualFold {
            reference: string_reference(RuleKind::EqFold, reference)?,
        })
    }
}

impl Evaluator for EqualFold {
    fn evaluate(&self, value: &Value<'_>) -> bool {
        value.as_str().is_some_and(|s| {
            s.chars()
                .flat_map(char::to_lowercase)
                .eq(self.reference.chars().flat_map(char::to_lowercase))
        })
    }
}

/// Input string matches the reference regular expression.
///
/// The pattern is compiled once, when the rule is built.
#[derive(Debug, Clone)]
pub struct Regexp {
    pattern: Regex,
}

impl Regexp {
    /// Builds the evaluator; the reference must be a valid pattern string.
    pub fn new(reference: &serde_json::Value) -> Result<Self> {
        let source = string_reference(RuleKind::Regexp, reference)?;
        Ok(Regexp {
            pattern: Regex::new(&source)?,
        })
    }
}

impl Evaluator for Regexp {
    fn evaluate(&self, value: &Value<'_>) -> bool {
        value.as_str().is_some_and(|s| self.pattern.is_match(s))
    }
}
