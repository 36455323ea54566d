use crate::config::default_auto_save_after_record;

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Whether to save a finished recording to the store automatically.
    #[serde(default = "default_auto_save_after_record")]
    pub auto_save_after_record: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            auto_save_after_record: default_auto_save_after_record(),
        }
    }
}
