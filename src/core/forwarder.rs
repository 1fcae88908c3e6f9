//! Notification forwarder: geolocation + one best-effort POST per alert
//!
//! Delivery is at-most-once. A failed lookup aborts the attempt before any
//! payload exists; a failed POST is reported, never retried. Nothing here
//! returns an error to the caller: every path ends in a `ForwardOutcome`.
//!
//! The frame loop never waits on the network. `spawn_forwarder` puts the
//! forwarder behind a bounded queue drained by one background task, and
//! outcomes travel back on a second channel for the dispatcher to record.

use std::future::Future;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::ForwardConfig;
use crate::core::geo::GeoLocator;
use crate::types::{
    AlertPayload, DeliveryError, ForwardOutcome, ForwardReason, GeoLocation, Severity,
    PAYLOAD_TIME_FORMAT,
};
use crate::LOCATION_CONFIDENCE;

/// Sends one payload to the collector, returning the 2xx status on success
pub trait AlertTransport: Send + Sync {
    fn deliver(
        &self,
        payload: &AlertPayload,
    ) -> impl Future<Output = Result<u16, DeliveryError>> + Send;
}

/// JSON POST to a fixed endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl AlertTransport for HttpTransport {
    async fn deliver(&self, payload: &AlertPayload) -> Result<u16, DeliveryError> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(DeliveryError::Rejected(status.as_u16()))
        }
    }
}

/// One alert waiting for delivery; never carries `Severity::None`
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRequest {
    reason: String,
    severity: Severity,
}

impl ForwardRequest {
    /// `None` for non-actionable severities
    pub fn new(reason: impl Into<String>, severity: Severity) -> Option<Self> {
        severity.is_actionable().then(|| Self {
            reason: reason.into(),
            severity,
        })
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Build the wire payload for one alert
pub fn build_payload(
    geo: GeoLocation,
    request: &ForwardRequest,
    origin: &str,
    timestamp: &str,
) -> AlertPayload {
    AlertPayload {
        latitude: geo.latitude,
        longitude: geo.longitude,
        cidade: geo.city,
        estado: geo.state,
        pais: geo.country,
        tipo_alerta: request.severity.wire_tag().to_string(),
        timestamp: timestamp.to_string(),
        origem: origin.to_string(),
        motivo: request.reason.clone(),
        nivel_confianca_localizacao: LOCATION_CONFIDENCE.to_string(),
    }
}

#[derive(Debug)]
pub struct Forwarder<G, T> {
    locator: G,
    transport: T,
    origin: String,
}

impl<G: GeoLocator, T: AlertTransport> Forwarder<G, T> {
    pub fn new(locator: G, transport: T, config: &ForwardConfig) -> Self {
        Self {
            locator,
            transport,
            origin: config.origin.clone(),
        }
    }

    /// Locate, build, POST once
    pub async fn forward(&self, request: &ForwardRequest) -> ForwardOutcome {
        self.forward_reporting(request, |_| {}).await
    }

    /// As `forward`, handing the outgoing payload to `report` right before the POST
    pub async fn forward_reporting<F>(&self, request: &ForwardRequest, mut report: F) -> ForwardOutcome
    where
        F: FnMut(ForwardOutcome),
    {
        let severity = request.severity;

        let geo = match self.locator.locate().await {
            Ok(geo) => geo,
            Err(e) => {
                warn!(error = %e, "geolocation failed, alert not forwarded");
                return ForwardOutcome::new(ForwardReason::F002_GEO_UNAVAILABLE, severity, e.to_string());
            }
        };

        let timestamp = Local::now().format(PAYLOAD_TIME_FORMAT).to_string();
        let payload = build_payload(geo, request, &self.origin, &timestamp);
        info!(
            tipo_alerta = %payload.tipo_alerta,
            cidade = %payload.cidade,
            motivo = %payload.motivo,
            "forwarding alert"
        );
        let body = serde_json::to_string(&payload).unwrap_or_default();
        report(ForwardOutcome::new(ForwardReason::F007_SENDING, severity, body));

        match self.transport.deliver(&payload).await {
            Ok(status) => ForwardOutcome::new(ForwardReason::F001_DELIVERED, severity, "").with_status(status),
            Err(DeliveryError::Rejected(status)) => {
                warn!(status, "collector rejected alert");
                ForwardOutcome::new(ForwardReason::F003_REJECTED, severity, "").with_status(status)
            }
            Err(e) => {
                warn!(error = %e, "alert delivery failed");
                ForwardOutcome::new(ForwardReason::F004_TRANSPORT_FAILED, severity, e.to_string())
            }
        }
    }
}

/// Dispatcher side of the forward queue
#[derive(Debug)]
pub struct ForwardHandle {
    requests: Option<mpsc::Sender<ForwardRequest>>,
    outcomes: mpsc::UnboundedReceiver<ForwardOutcome>,
}

impl ForwardHandle {
    /// Enqueue without waiting; a full or closed queue drops the request
    pub fn submit(&self, request: ForwardRequest) -> Result<(), ForwardOutcome> {
        let severity = request.severity;
        let Some(requests) = &self.requests else {
            return Err(ForwardOutcome::new(ForwardReason::F006_WORKER_STOPPED, severity, "queue closed"));
        };

        requests.try_send(request).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                ForwardOutcome::new(ForwardReason::F005_QUEUE_FULL, severity, "")
            }
            mpsc::error::TrySendError::Closed(_) => {
                ForwardOutcome::new(ForwardReason::F006_WORKER_STOPPED, severity, "")
            }
        })
    }

    /// Next finished outcome, if any
    pub fn try_outcome(&mut self) -> Option<ForwardOutcome> {
        self.outcomes.try_recv().ok()
    }

    /// Stop accepting requests; the worker drains what is queued and exits
    pub fn close(&mut self) {
        self.requests = None;
    }

    pub fn is_closed(&self) -> bool {
        self.requests.is_none()
    }
}

/// Start the background worker; must be called inside a tokio runtime.
/// The worker resolves to the number of requests it processed.
pub fn spawn_forwarder<G, T>(forwarder: Forwarder<G, T>, capacity: usize) -> (ForwardHandle, JoinHandle<u64>)
where
    G: GeoLocator + 'static,
    T: AlertTransport + 'static,
{
    let (request_tx, mut request_rx) = mpsc::channel::<ForwardRequest>(capacity.max(1));
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

    let worker = tokio::spawn(async move {
        let mut processed = 0u64;
        while let Some(request) = request_rx.recv().await {
            // Receiver gone means the dispatcher was dropped; keep draining
            let outcome = forwarder
                .forward_reporting(&request, |sending| {
                    let _ = outcome_tx.send(sending);
                })
                .await;
            processed += 1;
            let _ = outcome_tx.send(outcome);
        }
        processed
    });

    let handle = ForwardHandle {
        requests: Some(request_tx),
        outcomes: outcome_rx,
    };
    (handle, worker)
}
