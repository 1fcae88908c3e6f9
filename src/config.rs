//! Runtime configuration
//!
//! Every threshold the classifiers and the forwarder depend on lives here so
//! it can be tuned from a JSON file and driven deterministically in tests.
//! Missing fields fall back to the crate-level defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::ConfigError;
use crate::{
    ALERT_ORIGIN, DEFAULT_ENDPOINT, DEFAULT_GEO_URL, DEFAULT_LOG_PATH, DELIVERY_TIMEOUT_SECS,
    DISPLAY_LINES, DISTRESS_COOLDOWN_SECS, DOUBLE_TAP_WINDOW_SECS, EYE_OPEN_RATIO,
    FORWARD_QUEUE_CAPACITY, GEO_TIMEOUT_SECS, MOUTH_OPEN_RATIO,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeMeshConfig {
    pub debounce: DebounceConfig,
    pub expression: ExpressionConfig,
    pub dispatch: DispatchConfig,
    pub forward: ForwardConfig,
}

/// Double-tap detection timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Two taps closer than this form a double tap
    pub double_tap_window_secs: f64,
    /// Quiet period after a confirmed distress signal
    pub cooldown_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionConfig {
    pub mouth_open_ratio: f64,
    pub eye_open_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub log_path: String,
    pub display_lines: usize,
    pub queue_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardConfig {
    pub endpoint: String,
    pub timeout_secs: f64,
    pub origin: String,
    pub geo_url: String,
    pub geo_timeout_secs: f64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            double_tap_window_secs: DOUBLE_TAP_WINDOW_SECS,
            cooldown_secs: DISTRESS_COOLDOWN_SECS,
        }
    }
}

impl DebounceConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs_f64(self.double_tap_window_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.cooldown_secs)
    }
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self {
            mouth_open_ratio: MOUTH_OPEN_RATIO,
            eye_open_ratio: EYE_OPEN_RATIO,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            log_path: DEFAULT_LOG_PATH.to_string(),
            display_lines: DISPLAY_LINES,
            queue_capacity: FORWARD_QUEUE_CAPACITY,
        }
    }
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DELIVERY_TIMEOUT_SECS,
            origin: ALERT_ORIGIN.to_string(),
            geo_url: DEFAULT_GEO_URL.to_string(),
            geo_timeout_secs: GEO_TIMEOUT_SECS,
        }
    }
}

impl ForwardConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }

    pub fn geo_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.geo_timeout_secs)
    }
}

impl SafeMeshConfig {
    /// Load from a JSON file; absent fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a component misbehave silently
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secs = [
            ("debounce.double_tap_window_secs", self.debounce.double_tap_window_secs),
            ("debounce.cooldown_secs", self.debounce.cooldown_secs),
            ("forward.timeout_secs", self.forward.timeout_secs),
            ("forward.geo_timeout_secs", self.forward.geo_timeout_secs),
        ];
        // The Duration accessors panic on anything try_from_secs_f64 rejects
        for (name, value) in secs {
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative duration, got {}",
                    name, value
                )));
            }
        }
        if self.dispatch.queue_capacity == 0 {
            return Err(ConfigError::Invalid("dispatch.queue_capacity must be > 0".into()));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
