//! Rule operator kinds.
//!
//! [`RuleKind`] is the closed set of comparison operators a rule can use.
//! Each kind maps to one evaluator constructor in [`crate::eval`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Comparison operator of a rule, identified on the wire by its camelCase name.
///
/// Operators are grouped by the reference value they accept:
/// - **Any value**: `Eq`, `Ne`, `In` (array)
/// - **Number**: `Lt`, `Lte`, `Gt`, `Gte`
/// - **String**: `EqFold`, `HasPrefix`, `HasSuffix`, `Contains`, `Regexp`
/// - **No reference**: `IsNull`, `IsNotNull`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    /// Deep equality after numeric coercion.
    Eq,
    /// Negated deep equality. Absent data still never matches.
    Ne,
    /// Case-insensitive string equality.
    EqFold,
    /// Less than, or collection length less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// String starts with the reference.
    HasPrefix,
    /// String ends with the reference.
    HasSuffix,
    /// String contains the reference.
    Contains,
    /// String matches the reference regular expression.
    Regexp,
    /// Value equals one element of the reference array.
    In,
    /// Value is null.
    IsNull,
    /// Value is present and not null.
    IsNotNull,
}

impl RuleKind {
    /// Every kind, in declaration order.
    pub const ALL: [RuleKind; 14] = [
        RuleKind::Eq,
        RuleKind::Ne,
        RuleKind::EqFold,
        RuleKind::Lt,
        RuleKind::Lte,
        RuleKind::Gt,
        RuleKind::Gte,
        RuleKind::HasPrefix,
        RuleKind::HasSuffix,
        RuleKind::Contains,
        RuleKind::Regexp,
        RuleKind::In,
        RuleKind::IsNull,
        RuleKind::IsNotNull,
    ];

    /// Returns `true` for the ordering operators, which take a numeric reference.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            RuleKind::Lt | RuleKind::Lte | RuleKind::Gt | RuleKind::Gte
        )
    }

    /// Returns `true` for operators that take a string reference.
    pub fn is_string_op(self) -> bool {
        matches!(
            self,
            RuleKind::EqFold
                | RuleKind::HasPrefix
                | RuleKind::HasSuffix
                | RuleKind::Contains
                | RuleKind::Regexp
        )
    }

    /// Returns the wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Eq => "eq",
            RuleKind::Ne => "ne",
            RuleKind::EqFold => "eqFold",
            RuleKind::Lt => "lt",
            RuleKind::Lte => "lte",
            RuleKind::Gt => "gt",
            RuleKind::Gte => "gte",
            RuleKind::HasPrefix => "hasPrefix",
            RuleKind::HasSuffix => "hasSuffix",
            RuleKind::Contains => "contains",
            RuleKind::Regexp => "regexp",
            RuleKind::In => "in",
            RuleKind::IsNull => "isNull",
            RuleKind::IsNotNull => "isNotNull",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}
