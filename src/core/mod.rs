//! Core modules for SafeMesh

pub mod alert_log;
pub mod clock;
pub mod collector;
pub mod debounce;
pub mod dispatcher;
pub mod expression;
pub mod forwarder;
pub mod geo;
pub mod gesture;
pub mod pipeline;

pub use alert_log::AlertLog;
pub use clock::{Clock, ManualClock, SystemClock};
pub use collector::{create_router, create_router_with_state, run_collector, CollectorState};
pub use debounce::{DebounceEngine, DebounceState, TapOutcome};
pub use dispatcher::{notification_reason, Dispatcher};
pub use expression::{ExpressionClassifier, FaceOpenings};
pub use forwarder::{
    build_payload, spawn_forwarder, AlertTransport, ForwardHandle, ForwardRequest, Forwarder,
    HttpTransport,
};
pub use geo::{parse_ipinfo, GeoLocator, IpInfoLocator, UNKNOWN_PLACE};
pub use gesture::{finger_state, GestureClassifier};
pub use pipeline::{FramePipeline, FrameReport, STARTED_MESSAGE, STOPPED_MESSAGE};
