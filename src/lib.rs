//! SafeMesh: emergency signalling from hand gestures and facial expressions
//!
//! Pipeline: landmark frame → gesture / expression classifiers → dispatcher
//! (display history + append-only log) → forwarder (geolocation + HTTP POST)

pub mod config;
pub mod core;
pub mod types;

// =============================================================================
// DEBOUNCE [C] - double-tap distress gesture
// =============================================================================

/// Maximum gap between two index-finger taps counted as a double tap (seconds)
pub const DOUBLE_TAP_WINDOW_SECS: f64 = 0.5;

/// Minimum time after a confirmed distress signal before another may fire (seconds)
pub const DISTRESS_COOLDOWN_SECS: f64 = 2.0;

// =============================================================================
// EXPRESSION THRESHOLDS [C] - ratios normalized by face width
// =============================================================================

/// Mouth opening / face width above which the mouth counts as open
pub const MOUTH_OPEN_RATIO: f64 = 0.07;

/// Eye opening / face width above which an eye counts as wide open
pub const EYE_OPEN_RATIO: f64 = 0.06;

// =============================================================================
// DISPATCH
// =============================================================================

/// Default append-only alert log
pub const DEFAULT_LOG_PATH: &str = "emergency_log.txt";

/// Number of most recent messages shown by presentation layers
pub const DISPLAY_LINES: usize = 4;

/// Pending deliveries buffered between the frame loop and the forward worker
pub const FORWARD_QUEUE_CAPACITY: usize = 32;

// =============================================================================
// FORWARDING
// =============================================================================

/// Collector route, shared by the forwarder default and the collector service
pub const COLLECTOR_PATH: &str = "/reportar_localizacao";

/// Default collector endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/reportar_localizacao";

/// Timeout for a single alert POST (seconds)
pub const DELIVERY_TIMEOUT_SECS: f64 = 10.0;

/// Default IP geolocation lookup
pub const DEFAULT_GEO_URL: &str = "https://ipinfo.io/json";

/// Timeout for the geolocation lookup (seconds)
pub const GEO_TIMEOUT_SECS: f64 = 5.0;

/// `origem` field of every outbound payload
pub const ALERT_ORIGIN: &str = "SafeMeshApp";

/// `nivel_confianca_localizacao` field of every outbound payload
pub const LOCATION_CONFIDENCE: &str = "IP-based (approximate)";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
