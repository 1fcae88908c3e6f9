//! Alert dispatcher
//!
//! Every message is stamped, kept in the display history, written to the
//! append-only log and, when it carries a severity, handed to the forward
//! queue. The log line is always written before the hand-off. A log failure
//! is reported and counted but never stops the pipeline.

use tracing::{error, info};

use crate::config::DispatchConfig;
use crate::core::alert_log::AlertLog;
use crate::core::forwarder::{ForwardHandle, ForwardRequest};
use crate::types::{AlertEvent, ForwardOutcome, Severity};

/// Reason text sent to the collector for an alert message
pub fn notification_reason(severity: Severity, message: &str) -> String {
    match severity {
        Severity::Distress => format!("urgent help needed: {}", message),
        Severity::Risk => format!("risk situation detected: {}", message),
        _ => format!("status report: {}", message),
    }
}

#[derive(Debug)]
pub struct Dispatcher {
    /// Grows without bound; presentation truncates via `recent()`
    history: Vec<AlertEvent>,
    log: AlertLog,
    display_lines: usize,
    forwarder: Option<ForwardHandle>,
    log_failures: u64,
}

impl Dispatcher {
    /// Dispatcher that only records locally
    pub fn new(log: AlertLog, display_lines: usize) -> Self {
        Self {
            history: Vec::new(),
            log,
            display_lines,
            forwarder: None,
            log_failures: 0,
        }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(AlertLog::new(&config.log_path), config.display_lines)
    }

    /// Route actionable alerts to a forward worker
    pub fn with_forwarder(mut self, handle: ForwardHandle) -> Self {
        self.forwarder = Some(handle);
        self
    }

    /// Record a message and notify when `severity` is actionable
    pub fn dispatch(&mut self, message: impl Into<String>, severity: Severity) -> AlertEvent {
        let event = self.record(message.into(), severity);

        if let Some(request) = ForwardRequest::new(notification_reason(severity, &event.message), severity) {
            let dropped = match &self.forwarder {
                Some(handle) => handle.submit(request).err(),
                None => None,
            };
            if let Some(outcome) = dropped {
                self.record_outcome(&outcome);
            }
        }

        event
    }

    /// Record finished forward outcomes; returns how many were drained
    pub fn drain_outcomes(&mut self) -> usize {
        let mut outcomes = Vec::new();
        if let Some(handle) = self.forwarder.as_mut() {
            while let Some(outcome) = handle.try_outcome() {
                outcomes.push(outcome);
            }
        }
        for outcome in &outcomes {
            self.record_outcome(outcome);
        }
        outcomes.len()
    }

    /// Stop queueing new alerts; already queued ones still go out
    pub fn close_forwarding(&mut self) {
        if let Some(handle) = self.forwarder.as_mut() {
            handle.close();
        }
    }

    /// The most recent messages, oldest first, as shown on screen
    pub fn recent(&self) -> &[AlertEvent] {
        let start = self.history.len().saturating_sub(self.display_lines);
        &self.history[start..]
    }

    /// Everything recorded so far
    pub fn history(&self) -> &[AlertEvent] {
        &self.history
    }

    pub fn log(&self) -> &AlertLog {
        &self.log
    }

    /// Log writes that failed
    pub fn log_failures(&self) -> u64 {
        self.log_failures
    }

    fn record_outcome(&mut self, outcome: &ForwardOutcome) {
        self.record(outcome.log_message(), Severity::None);
    }

    fn record(&mut self, message: String, severity: Severity) -> AlertEvent {
        let event = AlertEvent::now(message, severity);
        info!(severity = %event.severity, "{}", event.log_line());

        self.history.push(event.clone());

        if let Err(e) = self.log.append(&event) {
            self.log_failures += 1;
            error!(error = %e, "alert log write failed, continuing");
        }

        event
    }
}
