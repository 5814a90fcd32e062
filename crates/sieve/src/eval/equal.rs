//! Equality operators: `eq`, `ne`, `in`.

use crate::error::Result;
use crate::kind::RuleKind;
use crate::value::Value;

use super::{invalid_reference, Evaluator};

fn owned_reference(kind: RuleKind, reference: &serde_json::Value) -> Result<Value<'static>> {
    if reference.is_null() {
        return Err(invalid_reference(kind, "non-null", reference));
    }
    Ok(Value::from(reference).into_owned())
}

/// Value deep-equals the reference; numbers of any kind compare as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equal {
    reference: Value<'static>,
}

impl Equal {
    /// Builds the evaluator; the reference may be any non-null value.
    pub fn new(reference: &serde_json::Value) -> Result<Self> {
        Ok(Equal {
            reference: owned_reference(RuleKind::Eq, reference)?,
        })
    }
}

impl Evaluator for Equal {
    fn evaluate(&self, value: &Value<'_>) -> bool {
        !value.is_nil() && value.loosely_eq(&self.reference)
    }
}

/// Value is present, comparable, and differs from the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct NotEqual {
    reference: Value<'static>,
}

impl NotEqual {
    /// Builds the evaluator; the reference may be any non-null value.
    pub fn new(reference: &serde_json::Value) -> Result<Self> {
        Ok(NotEqual {
            reference: owned_reference(RuleKind::Ne, reference)?,
        })
    }
}

impl Evaluator for NotEqual {
    fn evaluate(&self, value: &Value<'_>) -> bool {
        match value {
            Value::Null | Value::Unsupported => false,
            _ => !value.loosely_eq(&self.reference),
        }
    }
}

/// Value equals one of the reference array's elements.
#[derive(Debug, Clone, PartialEq)]
pub struct In {
    candidates: Vec<Value<'static>>,
}

impl In {
    /// Builds the evaluator; the reference must be an array.
    pub fn new(reference: &serde_json::Value) -> Result<Self> {
        let items = reference
            .as_array()
            .ok_or_else(|| invalid_reference(RuleKind::In, "array", reference))?;

        Ok(In {
            candidates: items.iter().map(|v| Value::from(v).into_owned()).collect(),
        })
    }
}

impl Evaluator for In {
    fn evaluate(&self, value: &Value<'_>) -> bool {
        !value.is_nil() && self.candidates.iter().any(|c| value.loosely_eq(c))
    }
}
