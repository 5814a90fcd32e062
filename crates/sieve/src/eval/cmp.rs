//! Ordering operators: `lt`, `lte`, `gt`, `gte`.
//!
//! Numbers are compared as `f64`. Strings, sequences and maps compare their
//! length against the reference truncated toward zero, so `4.5` behaves as
//! `4`. Anything else, nil included, is `false`.

use crate::error::Result;
use crate::kind::RuleKind;
use crate::value::Value;

use super::{number_reference, Evaluator};

macro_rules! ordering_evaluator {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $op:tt) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            reference: f64,
        }

        impl $name {
            /// Builds the evaluator; the reference must be a number.
            pub fn new(reference: &serde_json::Value) -> Result<Self> {
                Ok($name {
                    reference: number_reference($kind, reference)?,
                })
            }

            /// Returns the numeric reference.
            pub fn reference(&self) -> f64 {
                self.reference
            }
        }

        impl Evaluator for $name {
            fn evaluate(&self, value: &Value<'_>) -> bool {
                match value {
                    Value::Number(n) => n.to_f64() $op self.reference,
                    _ => value
                        .len()
                        .is_some_and(|len| (len as i64) $op (self.reference as i64)),
                }
            }
        }
    };
}

ordering_evaluator!(
    /// Value (or its length) is strictly less than the reference.
    LessThan,
    RuleKind::Lt,
    <
);

ordering_evaluator!(
    /// Value (or its length) is less than or equal to the reference.
    LessOrEqual,
    RuleKind::Lte,
    <=
);

ordering_evaluator!(
    /// Value (or its length) is strictly greater than the reference.
    GreaterThan,
    RuleKind::Gt,
    >
);

ordering_evaluator!(
    /// Value (or its length) is greater than or equal to the reference.
    GreaterOrEqual,
    RuleKind::Gte,
    >=
);
