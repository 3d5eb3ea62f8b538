//! Process-wide grading configuration, with a reload lifecycle that swaps an immutable
//! snapshot rather than mutating values in place. See the module-level docs of
//! [crate::grader] for how a snapshot is threaded through a single `grade` call.
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Language-difference metric tuning. See [crate::metrics::lang_diff].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangDiffConfig {
    /// Base depth `N` for word enumeration before the asymmetric clamp is applied.
    pub max_depth: usize,
    /// Reserved; unused by [crate::metrics::lang_diff] (kept for forward-compatibility).
    pub min_depth: usize,
    /// Wall-clock budget for the metric.
    pub timeout: Duration,
}

impl Default for LangDiffConfig {
    fn default() -> Self {
        LangDiffConfig {
            max_depth: 14,
            min_depth: 4,
            timeout: Duration::from_secs(3),
        }
    }
}

/// Syntax-edit search tuning. See [crate::metrics::syntax_diff].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxDiffConfig {
    /// `D_max`, the maximum edit depth explored.
    pub max_depth: usize,
    /// Wall-clock budget for the search.
    pub timeout: Duration,
}

impl Default for SyntaxDiffConfig {
    fn default() -> Self {
        SyntaxDiffConfig {
            max_depth: 2,
            timeout: Duration::from_secs(3),
        }
    }
}

/// Process-wide configuration for a grading call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Upper bound of every score `grade` returns.
    pub max_score: f64,
    pub lang_diff: LangDiffConfig,
    pub dfa_syntax_diff: SyntaxDiffConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_score: 100.0,
            lang_diff: LangDiffConfig::default(),
            dfa_syntax_diff: SyntaxDiffConfig::default(),
        }
    }
}

/// Holds the live configuration behind a reload lifecycle: a `grade` call takes one
/// [`Config::default`]-shaped [`snapshot`](ConfigHandle::snapshot) at entry and uses it
/// throughout, even if [`reload`](ConfigHandle::reload) replaces the value mid-flight.
#[derive(Debug)]
pub struct ConfigHandle {
    current: RwLock<Arc<Config>>,
}

impl ConfigHandle {
    pub fn new(config: Config) -> Self {
        ConfigHandle {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Takes an immutable, independently-owned view of the current configuration.
    pub fn snapshot(&self) -> Arc<Config> {
        self.current.read().expect("config lock poisoned").clone()
    }

    /// Atomically replaces the configuration. In-flight `grade` calls keep whatever
    /// snapshot they already took; only calls starting after this returns observe it.
    pub fn reload(&self, config: Config) {
        tracing::info!("reloading grading configuration");
        *self.current.write().expect("config lock poisoned") = Arc::new(config);
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        ConfigHandle::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_table() {
        let config = Config::default();
        assert_eq!(config.max_score, 100.0);
        assert_eq!(config.lang_diff.max_depth, 14);
        assert_eq!(config.lang_diff.min_depth, 4);
        assert_eq!(config.lang_diff.timeout, Duration::from_secs(3));
        assert_eq!(config.dfa_syntax_diff.max_depth, 2);
        assert_eq!(config.dfa_syntax_diff.timeout, Duration::from_secs(3));
    }

    #[test]
    fn reload_is_observed_by_future_snapshots_only() {
        let handle = ConfigHandle::default();
        let before = handle.snapshot();
        let mut replacement = Config::default();
        replacement.max_score = 10.0;
        handle.reload(replacement);
        let after = handle.snapshot();
        assert_eq!(before.max_score, 100.0);
        assert_eq!(after.max_score, 10.0);
    }

    #[test]
    fn config_round_trips_through_json() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
