use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pacing configuration for the traversal engine
///
/// The step delay is driven by a user-adjustable speed control; the
/// bounds here mirror the UI's slider limits so a hostile or buggy
/// caller cannot request a zero-length or unbounded animation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Delay between visited-node steps when the caller does not pass one
    pub default_step_delay_ms: u64,

    /// Lower slider bound for the step delay
    pub min_step_delay_ms: u64,

    /// Upper slider bound for the step delay
    pub max_step_delay_ms: u64,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            default_step_delay_ms: 500,
            min_step_delay_ms: 50,
            max_step_delay_ms: 5000,
        }
    }
}

impl TraversalConfig {
    /// Resolve a requested step delay against the configured bounds
    ///
    /// Inverted bounds (min above max, e.g. from a hand-edited config
    /// file) are reordered rather than rejected; a bad config must
    /// never take down a running traversal.
    pub fn clamp_delay(&self, requested: Option<Duration>) -> Duration {
        let ms = requested
            .map(|d| d.as_millis() as u64)
            .unwrap_or(self.default_step_delay_ms);

        let lower = self.min_step_delay_ms.min(self.max_step_delay_ms);
        let upper = self.min_step_delay_ms.max(self.max_step_delay_ms);

        Duration::from_millis(ms.clamp(lower, upper))
    }
}
