//! External user directory configuration.

use serde::{Deserialize, Serialize};

/// Where and how to ask whether a user exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDirectoryConfig {
    /// Base URL of the user service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deadline for one existence check, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for UserDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_timeout() -> u64 {
    5
}
