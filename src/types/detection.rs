//! Classifier results

use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// Recognized hand gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gesture {
    /// Open palm
    NeedHelp,
    /// Thumbs up
    Ok,
    /// Thumb and pinky out ("hang loose")
    PowerRestored,
    /// Confirmed double tap of the index finger
    DistressSignal,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NeedHelp => "need-help",
            Self::Ok => "ok",
            Self::PowerRestored => "power-restored",
            Self::DistressSignal => "distress-signal-activated",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::NeedHelp => Severity::Risk,
            Self::Ok | Self::PowerRestored => Severity::Info,
            Self::DistressSignal => Severity::Distress,
        }
    }

    pub fn detection(&self) -> Detection {
        Detection::new(self.as_str(), self.severity())
    }
}

/// Recognized facial expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Expression {
    /// Mouth open with at least one eye wide open
    Panic,
}

impl Expression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Panic => "panic-expression",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Panic => Severity::Risk,
        }
    }

    pub fn detection(&self) -> Detection {
        Detection::new(self.as_str(), self.severity())
    }
}

/// A `(label, severity)` pair; `Detection::NONE` when nothing matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub label: Option<&'static str>,
    pub severity: Severity,
}

impl Detection {
    pub const NONE: Detection = Detection {
        label: None,
        severity: Severity::None,
    };

    pub fn new(label: &'static str, severity: Severity) -> Self {
        Self {
            label: Some(label),
            severity,
        }
    }

    pub fn is_none(&self) -> bool {
        self.label.is_none()
    }
}

impl Default for Detection {
    fn default() -> Self {
        Self::NONE
    }
}
