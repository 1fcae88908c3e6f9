//! Alert severity

use colored::Color;
use serde::{Deserialize, Serialize};

/// Outcome category of a classification; drives notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Status report, e.g. "I'm ok"
    Info,
    /// A risk situation was observed
    Risk,
    /// Explicit request for urgent help
    Distress,
    /// Nothing actionable
    None,
}

impl Severity {
    /// Does this severity trigger a notification?
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Severity::None)
    }

    /// `tipo_alerta` tag understood by the collector and its dashboard
    pub fn wire_tag(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Risk => "RISCO",
            Severity::Distress => "SOCORRO",
            Severity::None => "NONE",
        }
    }

    /// Terminal color for this severity
    pub fn color(&self) -> Color {
        match self {
            Severity::Info => Color::Cyan,
            Severity::Risk => Color::Yellow,
            Severity::Distress => Color::Red,
            Severity::None => Color::BrightBlack,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Info => "👍",
            Severity::Risk => "⚠",
            Severity::Distress => "🚨",
            Severity::None => "·",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Info => "INFO",
            Severity::Risk => "RISK",
            Severity::Distress => "DISTRESS",
            Severity::None => "NONE",
        };
        write!(f, "{}", name)
    }
}
