//! Sample application configuration

use std::time::Duration;

use commandqueue_core::AppConfig;
use serde::{Deserialize, Serialize};

/// Sample configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// How long the background worker "works" before producing commands
    pub work_duration_ms: u64,

    /// Main loop wait per iteration
    pub tick_ms: u64,

    /// Stop the screen while work is running and start it again once
    /// commands are waiting
    pub simulate_rotation: bool,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            work_duration_ms: 5000,
            tick_ms: 16,
            simulate_rotation: true,
        }
    }
}

impl AppConfig for SampleConfig {
    const APP_NAME: &'static str = "sample";
}

impl SampleConfig {
    pub fn work_duration(&self) -> Duration {
        Duration::from_millis(self.work_duration_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}
