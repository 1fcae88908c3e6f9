//! Alert records: the local event and its outbound wire form

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// Display format of event timestamps (log lines, terminal)
pub const EVENT_TIME_FORMAT: &str = "%H:%M:%S // %d/%m/%Y";

/// Timestamp format of the outbound payload
pub const PAYLOAD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A recorded message; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Local>,
}

impl AlertEvent {
    /// Stamp a message with the current local time
    pub fn now(message: impl Into<String>, severity: Severity) -> Self {
        Self::at(message, severity, Local::now())
    }

    pub fn at(message: impl Into<String>, severity: Severity, timestamp: DateTime<Local>) -> Self {
        Self {
            message: message.into(),
            severity,
            timestamp,
        }
    }

    /// `HH:MM:SS // DD/MM/YYYY`
    pub fn stamp(&self) -> String {
        self.timestamp.format(EVENT_TIME_FORMAT).to_string()
    }

    /// One line of the persistent log (no trailing newline)
    pub fn log_line(&self) -> String {
        format!("[{}] {}", self.stamp(), self.message)
    }
}

/// Approximate location of the network egress point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// JSON body POSTed to the alert collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub cidade: String,
    pub estado: String,
    pub pais: String,
    pub tipo_alerta: String,
    pub timestamp: String,
    pub origem: String,
    pub motivo: String,
    pub nivel_confianca_localizacao: String,
}
