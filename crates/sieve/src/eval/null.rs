//! Null checks. The rule's reference value is ignored.

use crate::value::Value;

use super::Evaluator;

/// Field is present and null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsNull;

impl Evaluator for IsNull {
    fn evaluate(&self, value: &Value<'_>) -> bool {
        value.is_nil()
    }
}

/// Field is present and holds a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsNotNull;

impl Evaluator for IsNotNull {
    fn evaluate(&self, value: &Value<'_>) -> bool {
        !value.is_nil()
    }
}
