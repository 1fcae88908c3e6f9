//! Reason codes for forwarding outcomes

use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// Why a forward attempt ended the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ForwardReason {
    // =========================================================================
    // F001: Delivered
    // =========================================================================
    /// Collector accepted the alert (2xx)
    F001_DELIVERED,

    // =========================================================================
    // F002: Geolocation
    // =========================================================================
    /// Location lookup failed, nothing was sent
    F002_GEO_UNAVAILABLE,

    // =========================================================================
    // F003-F004: Delivery
    // =========================================================================
    /// Collector answered with a non-2xx status
    F003_REJECTED,
    /// Timeout or connection failure
    F004_TRANSPORT_FAILED,

    // =========================================================================
    // F005-F006: Queue
    // =========================================================================
    /// Forward queue full, alert dropped
    F005_QUEUE_FULL,
    /// Forward worker no longer running, alert dropped
    F006_WORKER_STOPPED,

    // =========================================================================
    // F007: Audit
    // =========================================================================
    /// Payload about to be POSTed; detail carries the JSON body
    F007_SENDING,
}

impl ForwardReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::F001_DELIVERED => "F001_DELIVERED",
            Self::F002_GEO_UNAVAILABLE => "F002_GEO_UNAVAILABLE",
            Self::F003_REJECTED => "F003_REJECTED",
            Self::F004_TRANSPORT_FAILED => "F004_TRANSPORT_FAILED",
            Self::F005_QUEUE_FULL => "F005_QUEUE_FULL",
            Self::F006_WORKER_STOPPED => "F006_WORKER_STOPPED",
            Self::F007_SENDING => "F007_SENDING",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::F001_DELIVERED => "alert delivered",
            Self::F002_GEO_UNAVAILABLE => "location unavailable, alert not sent",
            Self::F003_REJECTED => "collector rejected alert",
            Self::F004_TRANSPORT_FAILED => "alert delivery failed",
            Self::F005_QUEUE_FULL => "forward queue full, alert dropped",
            Self::F006_WORKER_STOPPED => "forwarder stopped, alert dropped",
            Self::F007_SENDING => "sending alert",
        }
    }
}

impl std::fmt::Display for ForwardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Result of one forward attempt, reported back to the dispatcher
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardOutcome {
    pub reason: ForwardReason,
    /// Severity of the alert this outcome belongs to
    pub severity: Severity,
    /// HTTP status, when the collector answered
    pub status: Option<u16>,
    pub detail: String,
}

impl ForwardOutcome {
    pub fn new(reason: ForwardReason, severity: Severity, detail: impl Into<String>) -> Self {
        Self {
            reason,
            severity,
            status: None,
            detail: detail.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Diagnostic line recorded in the alert history
    pub fn log_message(&self) -> String {
        let mut msg = format!("api: {} [{}]", self.reason.description(), self.severity.wire_tag());
        if let Some(status) = self.status {
            msg.push_str(&format!(" status={}", status));
        }
        if !self.detail.is_empty() {
            msg.push_str(&format!(" - {}", self.detail));
        }
        msg
    }
}
