//! Processor configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default maximum number of rules in a rule set.
pub const DEFAULT_MAX_RULES: usize = 3;

/// Default page length used by [`Processor::apply`](crate::Processor::apply).
pub const DEFAULT_MAX_RESULTS: usize = i32::MAX as usize;

/// Default URL query parameter holding an encoded rule set.
pub const DEFAULT_QUERY_KEY: &str = "filter";

/// Options of a [`Processor`](crate::Processor).
///
/// Deserializable with every field optional, so it can sit inside an
/// application's own configuration file:
///
/// ```
/// use sieve::ProcessorConfig;
///
/// let config: ProcessorConfig = serde_json::from_str(r#"{"max_rules": 5}"#).unwrap();
/// assert_eq!(config.max_rules, 5);
/// assert_eq!(config.query_key, "filter");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Maximum total number of rules a rule set may hold.
    pub max_rules: usize,
    /// Page length used when no explicit length is given.
    pub max_results: usize,
    /// URL query parameter carrying the JSON rule set.
    pub query_key: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            max_rules: DEFAULT_MAX_RULES,
            max_results: DEFAULT_MAX_RESULTS,
            query_key: DEFAULT_QUERY_KEY.to_string(),
        }
    }
}

impl ProcessorConfig {
    /// Checks that every option is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_rules < 1 {
            return Err(Error::InvalidConfig {
                option: "max_rules",
                reason: "must be at least 1",
            });
        }

        if self.max_results < 1 {
            return Err(Error::InvalidConfig {
                option: "max_results",
                reason: "must be at least 1",
            });
        }

        if self.query_key.is_empty() {
            return Err(Error::InvalidConfig {
                option: "query_key",
                reason: "must not be empty",
            });
        }

        Ok(())
    }
}
