//! Rule-set processor.
//!
//! [`Processor`] holds the filtering options and applies rule sets to
//! collections, compacting them in place.

use url::Url;

use crate::accessor::FieldAccessor;
use crate::config::ProcessorConfig;
use crate::error::{Error, Result};
use crate::rule::RuleSet;
use crate::value::Value;

/// Outcome of a filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Matches {
    /// Number of elements left in the collection.
    pub retained: usize,
    /// Number of elements that matched, including the ones skipped by the
    /// offset or dropped by the length.
    pub total: usize,
}

/// Applies rule sets to collections.
///
/// A processor only holds its options; every call works on its own rule set
/// and collection, so one instance can be shared freely.
///
/// # Example
///
/// ```
/// use sieve::{Processor, RuleSet};
/// use serde_json::json;
///
/// let processor = Processor::new();
/// let rules = RuleSet::parse(r#"[[{"field":"n","type":"lt","value":5}]]"#).unwrap();
///
/// let mut items = vec![json!({"n": 1}), json!({"n": 4}), json!({"n": 5}), json!({"n": 9})];
/// let matches = processor.apply(&rules, &mut items).unwrap();
///
/// assert_eq!(matches.retained, 2);
/// assert_eq!(matches.total, 2);
/// assert_eq!(items, vec![json!({"n": 1}), json!({"n": 4})]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processor {
    config: ProcessorConfig,
}

impl Default for Processor {
    fn default() -> Self {
        Processor::new()
    }
}

impl Processor {
    /// Creates a processor with the default options.
    pub fn new() -> Self {
        Processor {
            config: ProcessorConfig::default(),
        }
    }

    /// Starts building a processor with custom options.
    pub fn builder() -> ProcessorBuilder {
        ProcessorBuilder::default()
    }

    /// Creates a processor from a configuration, validating it.
    pub fn from_config(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Processor { config })
    }

    /// Returns the options.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Maximum number of rules accepted in a rule set.
    pub fn max_rules(&self) -> usize {
        self.config.max_rules
    }

    /// Page length used by [`apply`](Self::apply).
    pub fn max_results(&self) -> usize {
        self.config.max_results
    }

    /// URL query parameter read by the `parse_*` methods.
    pub fn query_key(&self) -> &str {
        &self.config.query_key
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    /// Parses the rule set from a raw URL query string (`a=1&filter=...`).
    ///
    /// A leading `?` is ignored. A missing or empty parameter yields an
    /// empty rule set.
    pub fn parse_query(&self, query: &str) -> Result<RuleSet> {
        let query = query.strip_prefix('?').unwrap_or(query);
        self.parse_query_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Parses the rule set from the query of a URL.
    pub fn parse_url(&self, url: &Url) -> Result<RuleSet> {
        self.parse_query_pairs(url.query_pairs())
    }

    /// Parses the rule set from decoded query pairs.
    ///
    /// Only the first occurrence of the parameter is considered.
    pub fn parse_query_pairs<I, K, V>(&self, pairs: I) -> Result<RuleSet>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let value = pairs
            .into_iter()
            .find(|(key, _)| key.as_ref() == self.config.query_key)
            .map(|(_, value)| value);

        match value {
            Some(value) if !value.as_ref().is_empty() => {
                let rules = RuleSet::parse(value.as_ref()).inspect_err(|err| {
                    tracing::debug!(
                        key = %self.config.query_key,
                        error = %err,
                        "rule set in query rejected"
                    );
                })?;
                tracing::debug!(
                    key = %self.config.query_key,
                    rules = rules.rule_count(),
                    "rule set parsed from query"
                );
                Ok(rules)
            }
            _ => Ok(RuleSet::new()),
        }
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Fails if the rule set holds more rules than allowed.
    pub fn check_rule_count(&self, rules: &RuleSet) -> Result<()> {
        let got = rules.rule_count();
        let max = self.config.max_rules;

        if got > max {
            tracing::debug!(got, max, "rule set rejected");
            return Err(Error::TooManyRules { got, max });
        }

        Ok(())
    }

    /// Tests a single record.
    pub fn matches<T: FieldAccessor>(&self, rules: &RuleSet, item: &T) -> Result<bool> {
        self.matches_with(rules, item, T::field_value)
    }

    /// Tests a single record using an explicit accessor.
    pub fn matches_with<T, F>(&self, rules: &RuleSet, item: &T, accessor: F) -> Result<bool>
    where
        F: for<'a> Fn(&'a T, &str) -> Result<Option<Value<'a>>>,
    {
        self.check_rule_count(rules)?;
        rules.evaluate_with(item, accessor)
    }

    /// Filters the collection in place, keeping every matching element up to
    /// [`max_results`](Self::max_results).
    pub fn apply<T: FieldAccessor>(&self, rules: &RuleSet, items: &mut Vec<T>) -> Result<Matches> {
        self.apply_subset(rules, items, 0, self.config.max_results)
    }

    /// Same as [`apply`](Self::apply) with an explicit accessor.
    pub fn apply_with<T, F>(&self, rules: &RuleSet, items: &mut Vec<T>, accessor: F) -> Result<Matches>
    where
        F: for<'a> Fn(&'a T, &str) -> Result<Option<Value<'a>>>,
    {
        self.apply_subset_with(rules, items, 0, self.config.max_results, accessor)
    }

    /// Filters the collection in place, keeping one page of the matches.
    ///
    /// The first `offset` matches are skipped and at most `length` of the
    /// following ones are kept, in their original order. Every match is
    /// counted in [`Matches::total`], which lets callers compute page counts.
    pub fn apply_subset<T: FieldAccessor>(
        &self,
        rules: &RuleSet,
        items: &mut Vec<T>,
        offset: usize,
        length: usize,
    ) -> Result<Matches> {
        self.apply_subset_with(rules, items, offset, length, T::field_value)
    }

    /// Same as [`apply_subset`](Self::apply_subset) with an explicit accessor.
    ///
    /// Validation errors leave the collection untouched. An accessor error
    /// aborts the pass midway: the collection then holds the same elements
    /// in an unspecified order and should be discarded.
    pub fn apply_subset_with<T, F>(
        &self,
        rules: &RuleSet,
        items: &mut Vec<T>,
        offset: usize,
        length: usize,
        accessor: F,
    ) -> Result<Matches>
    where
        F: for<'a> Fn(&'a T, &str) -> Result<Option<Value<'a>>>,
    {
        if length < 1 {
            return Err(Error::InvalidLength);
        }

        self.check_rule_count(rules)?;

        let mut skip = offset;
        let mut retained = 0;
        let mut total = 0;

        for i in 0..items.len() {
            let matched = match rules.evaluate_with(&items[i], &accessor) {
                Ok(matched) => matched,
                Err(err) => {
                    tracing::warn!(index = i, error = %err, "filter pass aborted");
                    return Err(err);
                }
            };

            if !matched {
                continue;
            }

            total += 1;

            if skip > 0 {
                skip -= 1;
                continue;
            }

            if retained < length {
                // slots before i hold only discarded elements
                items.swap(retained, i);
                retained += 1;
            }
        }

        items.truncate(retained);

        tracing::debug!(offset, length, retained, total, "filter applied");

        Ok(Matches { retained, total })
    }
}

/// Builder for [`Processor`].
///
/// ```
/// use sieve::Processor;
///
/// let processor = Processor::builder()
///     .max_rules(5)
///     .max_results(100)
///     .query_key("q")
///     .build()
///     .unwrap();
///
/// assert_eq!(processor.max_rules(), 5);
/// assert!(Processor::builder().max_rules(0).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProcessorBuilder {
    config: ProcessorConfig,
}

impl ProcessorBuilder {
    /// Sets the maximum total number of rules.
    pub fn max_rules(mut self, n: usize) -> Self {
        self.config.max_rules = n;
        self
    }

    /// Sets the page length used by [`Processor::apply`].
    pub fn max_results(mut self, n: usize) -> Self {
        self.config.max_results = n;
        self
    }

    /// Sets the URL query parameter carrying the rule set.
    pub fn query_key(mut self, key: impl Into<String>) -> Self {
        self.config.query_key = key.into();
        self
    }

    /// Validates the options and creates the processor.
    pub fn build(self) -> Result<Processor> {
        Processor::from_config(self.config)
    }
}
