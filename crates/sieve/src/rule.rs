//! Rules and rule sets.
//!
//! A [`Rule`] is one field/operator/reference comparison. A [`RuleSet`] holds
//! rules in two levels: the outer groups are combined with AND, the rules
//! inside a group with OR.
//!
//! ```text
//! [[a], [b, c], [d]]  ==  a AND (b OR c) AND d
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::accessor::FieldAccessor;
use crate::error::{Error, Result};
use crate::eval::{self, Evaluator};
use crate::kind::RuleKind;
use crate::value::Value;

/// A single compiled comparison.
///
/// The evaluator is built when the rule is created, so an invalid reference
/// is reported here and never while filtering. Cloning a rule shares the
/// compiled evaluator.
///
/// # Example
///
/// ```
/// use sieve::{Rule, RuleKind, Value};
///
/// let rule = Rule::new("name", RuleKind::HasSuffix, "issimo").unwrap();
/// assert!(rule.evaluate(&Value::from("buonissimo")));
///
/// assert!(Rule::new("name", RuleKind::HasSuffix, 5).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RuleDef", into = "RuleDef")]
pub struct Rule {
    field: String,
    kind: RuleKind,
    value: serde_json::Value,
    evaluator: Arc<dyn Evaluator>,
}

/// Wire form of a rule: `{"field": ..., "type": ..., "value": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleDef {
    field: String,
    #[serde(rename = "type")]
    kind: RuleKind,
    #[serde(default)]
    value: serde_json::Value,
}

impl TryFrom<RuleDef> for Rule {
    type Error = Error;

    fn try_from(def: RuleDef) -> Result<Self> {
        Rule::new(def.field, def.kind, def.value)
    }
}

impl From<Rule> for RuleDef {
    fn from(rule: Rule) -> Self {
        RuleDef {
            field: rule.field,
            kind: rule.kind,
            value: rule.value,
        }
    }
}

impl Rule {
    /// Compiles a rule.
    ///
    /// Fails if `value` is not a valid reference for `kind`.
    pub fn new(
        field: impl Into<String>,
        kind: RuleKind,
        value: impl Into<serde_json::Value>,
    ) -> Result<Self> {
        let value = value.into();
        let evaluator = eval::compile(kind, &value)?;

        Ok(Rule {
            field: field.into(),
            kind,
            value,
            evaluator,
        })
    }

    /// The field name (possibly dotted) this rule reads.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The comparison operator.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// The raw reference value.
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Evaluates an already extracted field value.
    pub fn evaluate(&self, value: &Value<'_>) -> bool {
        self.evaluator.evaluate(value)
    }

    /// Evaluates this rule against a record.
    ///
    /// A field the accessor does not know is a non-match, not an error.
    pub fn matches_with<T, F>(&self, item: &T, accessor: F) -> Result<bool>
    where
        T: ?Sized,
        F: for<'a> Fn(&'a T, &str) -> Result<Option<Value<'a>>>,
    {
        Ok(match accessor(item, &self.field)? {
            Some(value) => self.evaluator.evaluate(&value),
            None => false,
        })
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.kind == other.kind && self.value == other.value
    }
}

/// Two-level AND-of-ORs collection of rules.
///
/// An empty set matches every record. An empty group matches none.
///
/// # Example
///
/// ```
/// use sieve::{Rule, RuleKind, RuleSet};
///
/// let parsed = RuleSet::parse(
///     r#"[[{"field":"n","type":"gte","value":2}],
///         [{"field":"name","type":"hasPrefix","value":"a"},
///          {"field":"name","type":"hasPrefix","value":"b"}]]"#,
/// )
/// .unwrap();
///
/// let built = RuleSet::new()
///     .and([Rule::new("n", RuleKind::Gte, 2).unwrap()])
///     .and([
///         Rule::new("name", RuleKind::HasPrefix, "a").unwrap(),
///         Rule::new("name", RuleKind::HasPrefix, "b").unwrap(),
///     ]);
///
/// assert_eq!(parsed, built);
/// assert_eq!(parsed.rule_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    groups: Vec<Vec<Rule>>,
}

impl RuleSet {
    /// Creates an empty rule set, which matches everything.
    pub fn new() -> Self {
        RuleSet::default()
    }

    /// Parses a rule set from its JSON form.
    ///
    /// Malformed JSON, an unknown rule type, or an invalid reference value
    /// is an error.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Appends an OR group, ANDed with the existing groups.
    pub fn and(mut self, group: impl IntoIterator<Item = Rule>) -> Self {
        self.groups.push(group.into_iter().collect());
        self
    }

    /// Returns the groups.
    pub fn groups(&self) -> &[Vec<Rule>] {
        &self.groups
    }

    /// Total number of rules across all groups.
    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Returns `true` if this set has no groups (matches everything).
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Tests a record using an explicit accessor.
    ///
    /// Groups are checked in order and the first failing group stops the
    /// evaluation; inside a group the first matching rule does.
    pub fn evaluate_with<T, F>(&self, item: &T, accessor: F) -> Result<bool>
    where
        T: ?Sized,
        F: for<'a> Fn(&'a T, &str) -> Result<Option<Value<'a>>>,
    {
        for group in &self.groups {
            let mut matched = false;

            for rule in group {
                if rule.matches_with(item, &accessor)? {
                    matched = true;
                    break;
                }
            }

            if !matched {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Tests a record through its [`FieldAccessor`] implementation.
    pub fn evaluate<T: FieldAccessor + ?Sized>(&self, item: &T) -> Result<bool> {
        self.evaluate_with(item, T::field_value)
    }
}

impl From<Vec<Vec<Rule>>> for RuleSet {
    fn from(groups: Vec<Vec<Rule>>) -> Self {
        RuleSet { groups }
    }
}

/// Parses a rule set from its JSON form. Same as [`RuleSet::parse`].
pub fn parse_json(json: &str) -> Result<RuleSet> {
    RuleSet::parse(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_accessor<'a>(doc: &'a serde_json::Value, field: &str) -> Result<Option<Value<'a>>> {
        doc.field_value(field)
    }

    fn rule(field: &str, kind: RuleKind, value: serde_json::Value) -> Rule {
        Rule::new(field, kind, value).unwrap()
    }

    #[test]
    fn parse_wire_format() {
        let set = RuleSet::parse(r#"[[{"field":"n","type":"lt","value":5}]]"#).unwrap();
        assert_eq!(set.groups().len(), 1);
        let r = &set.groups()[0][0];
        assert_eq!(r.field(), "n");
        assert_eq!(r.kind(), RuleKind::Lt);
        assert_eq!(r.value(), &json!(5));
    }

    #[test]
    fn parse_without_value_for_null_checks() {
        let set = RuleSet::parse(r#"[[{"field":"n","type":"isNull"}]]"#).unwrap();
        assert_eq!(set.groups()[0][0].kind(), RuleKind::IsNull);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(RuleSet::parse("[[{"), Err(Error::Json(_))));
        assert!(matches!(
            RuleSet::parse(r#"[[{"field":"n","type":"between","value":5}]]"#),
            Err(Error::Json(_))
        ));

        let err = RuleSet::parse(r#"[[{"field":"n","type":"hasSuffix","value":5}]]"#)
            .unwrap_err();
        assert!(err.to_string().contains("should have string value"));

        assert!(parse_json(r#"[[{"field":"n","type":"regexp","value":"(["}]]"#).is_err());
    }

    #[test]
    fn serializes_to_wire_format() {
        let set = RuleSet::new().and([rule("n", RuleKind::Gte, json!(20))]);
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!([[{"field": "n", "type": "gte", "value": 20}]])
        );
    }

    #[test]
    fn rule_count_spans_groups() {
        let set = RuleSet::new()
            .and([rule("a", RuleKind::Eq, json!(1))])
            .and([rule("b", RuleKind::Eq, json!(1)), rule("c", RuleKind::Eq, json!(1))]);
        assert_eq!(set.rule_count(), 3);
        assert!(!set.is_empty());
        assert!(RuleSet::new().is_empty());
    }

    #[test]
    fn single_rule_equivalence() {
        let a = rule("n", RuleKind::Lt, json!(5));
        let set = RuleSet::new().and([a.clone()]);

        for n in [1, 5, 9] {
            let doc = json!({ "n": n });
            assert_eq!(
                set.evaluate_with(&doc, doc_accessor).unwrap(),
                a.matches_with(&doc, doc_accessor).unwrap()
            );
        }
    }

    #[test]
    fn and_of_groups_or_within_group() {
        let a = rule("n", RuleKind::Gt, json!(1));
        let b = rule("n", RuleKind::Lt, json!(10));

        let and = RuleSet::new().and([a.clone()]).and([b.clone()]);
        let or = RuleSet::new().and([a, b]);

        for (n, want_and, want_or) in [(0, false, true), (5, true, true), (20, false, true)] {
            let doc = json!({ "n": n });
            assert_eq!(and.evaluate(&doc).unwrap(), want_and, "and {n}");
            assert_eq!(or.evaluate(&doc).unwrap(), want_or, "or {n}");
        }
    }

    #[test]
    fn empty_set_matches_empty_group_does_not() {
        let doc = json!({"n": 1});
        assert!(RuleSet::new().evaluate(&doc).unwrap());
        assert!(!RuleSet::from(vec![vec![]]).evaluate(&doc).unwrap());
    }

    #[test]
    fn missing_field_is_soft_non_match() {
        let set = RuleSet::new().and([rule("missing", RuleKind::IsNull, json!(null))]);
        assert!(!set.evaluate(&json!({"n": 1})).unwrap());
        assert!(set.evaluate(&json!({"missing": null})).unwrap());
    }

    #[test]
    fn accessor_errors_propagate() {
        let set = RuleSet::new().and([rule("a..b", RuleKind::Eq, json!(1))]);
        assert!(matches!(
            set.evaluate(&json!({})),
            Err(Error::MalformedPath { .. })
        ));
    }

    #[test]
    fn or_short_circuits_before_failing_rule() {
        // the second rule would fail on its malformed path if it were reached
        let set = RuleSet::new().and([
            rule("n", RuleKind::Eq, json!(1)),
            rule("a..b", RuleKind::Eq, json!(1)),
        ]);
        assert!(set.evaluate(&json!({"n": 1})).unwrap());
        assert!(set.evaluate(&json!({"n": 2})).is_err());
    }

    #[test]
    fn and_short_circuits_after_failing_group() {
        let set = RuleSet::new()
            .and([rule("n", RuleKind::Eq, json!(1))])
            .and([rule("a..b", RuleKind::Eq, json!(1))]);
        assert!(!set.evaluate(&json!({"n": 2})).unwrap());
    }

    #[test]
    fn rules_compare_by_definition() {
        assert_eq!(
            rule("n", RuleKind::Eq, json!(1)),
            rule("n", RuleKind::Eq, json!(1))
        );
        assert_ne!(
            rule("n", RuleKind::Eq, json!(1)),
            rule("n", RuleKind::Ne, json!(1))
        );
    }
}
