//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::similarity::DEFAULT_EXPANSION_TERMS;

/// Input data locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON tag cache written by the classifier (supports `~`)
    pub tag_cache: String,

    /// Whitespace-delimited word embedding table (supports `~`)
    pub embeddings: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            tag_cache: "~/.glimpse/cache.json".to_string(),
            embeddings: "~/.glimpse/glove/glove.6B.300d.txt".to_string(),
        }
    }
}

/// Query expansion and ranking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Similar terms added to each query. 0 disables expansion.
    pub expansion_terms: usize,

    /// Images kept per term, best first
    pub max_matches: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            expansion_terms: DEFAULT_EXPANSION_TERMS,
            max_matches: 10,
        }
    }
}

/// Resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Deadline for a single query, in milliseconds
    pub query_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: 5000,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
