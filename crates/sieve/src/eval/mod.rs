//! Compiled comparison behavior for rules.
//!
//! Every [`RuleKind`] has one evaluator type. Constructors validate the
//! reference value once, when the rule is compiled; [`Evaluator::evaluate`]
//! is then a total function from a field value to `bool`. Nil, missing or
//! incomparable input is a soft non-match, never an error.
//!
//! [`compile`] is the single factory mapping a kind to its constructor.
//! Adding an operator means adding a kind, a type implementing
//! [`Evaluator`], and one arm here.

mod cmp;
mod equal;
mod null;
mod text;

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::kind::RuleKind;
use crate::value::Value;

pub use cmp::{GreaterOrEqual, GreaterThan, LessOrEqual, LessThan};
pub use equal::{Equal, In, NotEqual};
pub use null::{IsNotNull, IsNull};
pub use text::{Contains, EqualFold, HasPrefix, HasSuffix, Regexp};

/// Evaluates a field value against a fixed reference.
pub trait Evaluator: fmt::Debug + Send + Sync {
    /// Returns whether `value` satisfies the comparison.
    fn evaluate(&self, value: &Value<'_>) -> bool;
}

/// Builds the evaluator for `kind` from a raw reference value.
///
/// Fails when the reference has the wrong type for the operator, or when a
/// `regexp` pattern does not compile.
pub fn compile(kind: RuleKind, reference: &serde_json::Value) -> Result<Arc<dyn Evaluator>> {
    let evaluator: Arc<dyn Evaluator> = match kind {
        RuleKind::Eq => Arc::new(Equal::new(reference)?),
        RuleKind::Ne => Arc::new(NotEqual::new(reference)?),
        RuleKind::EqFold => Arc::new(EqualFold::new(reference)?),
        RuleKind::Lt => Arc::new(LessThan::new(reference)?),
        RuleKind::Lte => Arc::new(LessOrEqual::new(reference)?),
        RuleKind::Gt => Arc::new(GreaterThan::new(reference)?),
        RuleKind::Gte => Arc::new(GreaterOrEqual::new(reference)?),
        RuleKind::HasPrefix => Arc::new(HasPrefix::new(reference)?),
        RuleKind::HasSuffix => Arc::new(HasSuffix::new(reference)?),
        RuleKind::Contains => Arc::new(Contains::new(reference)?),
        RuleKind::Regexp => Arc::new(Regexp::new(reference)?),
        RuleKind::In => Arc::new(In::new(reference)?),
        RuleKind::IsNull => Arc::new(IsNull),
        RuleKind::IsNotNull => Arc::new(IsNotNull),
    };

    Ok(evaluator)
}

fn invalid_reference(
    kind: RuleKind,
    expected: &'static str,
    reference: &serde_json::Value,
) -> Error {
    Error::InvalidReference {
        kind,
        expected,
        value: reference.to_string(),
        actual: json_type_name(reference),
    }
}

fn number_reference(kind: RuleKind, reference: &serde_json::Value) -> Result<f64> {
    reference
        .as_f64()
        .ok_or_else(|| invalid_reference(kind, "numeric", reference))
}

fn string_reference(kind: RuleKind, reference: &serde_json::Value) -> Result<String> {
    reference
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid_reference(kind, "string", reference))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
