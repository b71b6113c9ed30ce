//! # Scheduler Configuration
//!
//! Defaults applied by the scheduling engine when a caller leaves an
//! optional parameter out.

use calendar_core::rules::DEFAULT_DURATION_MINUTES;
use serde::Deserialize;

/// Configuration for the scheduling engine
///
/// # Example
///
/// ```
/// use calendar_scheduler::config::SchedulerConfig;
///
/// let config = SchedulerConfig::default();
/// assert_eq!(config.default_duration_minutes, 30);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Duration applied to `create` and `keep` when none is given
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: i64,
}

fn default_duration_minutes() -> i64 {
    DEFAULT_DURATION_MINUTES
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
        }
    }
}
