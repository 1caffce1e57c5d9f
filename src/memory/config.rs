/*!
 * Memory Manager Configuration
 */

use super::types::{MemoryError, MemoryResult};
use crate::core::limits::{
    DEFAULT_FRAGMENT_THRESHOLD, DEFAULT_MEMORY_POOL, ENV_FRAGMENT_THRESHOLD, ENV_TOTAL_SIZE,
};
use crate::core::types::Size;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Construction parameters for a `MemoryManager`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Size of the simulated address space
    pub total_size: Size,
    /// Free blocks strictly smaller than this count towards fragmentation
    #[serde(default = "default_fragment_threshold")]
    pub fragment_threshold: Size,
}

fn default_fragment_threshold() -> Size {
    DEFAULT_FRAGMENT_THRESHOLD
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            total_size: DEFAULT_MEMORY_POOL,
            fragment_threshold: DEFAULT_FRAGMENT_THRESHOLD,
        }
    }
}

impl ManagerConfig {
    pub fn new(total_size: Size) -> Self {
        Self {
            total_size,
            ..Default::default()
        }
    }

    pub fn with_total_size(mut self, total_size: Size) -> Self {
        self.total_size = total_size;
        self
    }

    pub fn with_fragment_threshold(mut self, threshold: Size) -> Self {
        self.fragment_threshold = threshold;
        self
    }

    /// Defaults overridden by `MEMSIM_TOTAL_SIZE` / `MEMSIM_FRAGMENT_THRESHOLD`
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(total) = env_size(ENV_TOTAL_SIZE) {
            config.total_size = total;
        }
        if let Some(threshold) = env_size(ENV_FRAGMENT_THRESHOLD) {
            config.fragment_threshold = threshold;
        }
        config
    }

    pub fn validate(&self) -> MemoryResult<()> {
        if self.total_size == 0 {
            return Err(MemoryError::InvalidSize {
                requested: self.total_size,
            });
        }
        Ok(())
    }
}

fn env_size(key: &str) -> Option<Size> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<Size>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring invalid size in environment");
            None
        }
    }
}
