//! Configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application settings (.coursesync/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// Course service connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL every request path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout enforced by the transport (0 = none)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Behavior settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Emit a notification when an action succeeds (failures are always reported)
    #[serde(default = "default_true")]
    pub notify_success: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            notify_success: true,
        }
    }
}

fn default_true() -> bool {
    true
}
