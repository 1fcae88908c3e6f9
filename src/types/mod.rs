//! Core types for SafeMesh

mod alert;
mod detection;
mod error;
mod landmark;
mod reason;
mod severity;

pub use alert::{AlertEvent, AlertPayload, GeoLocation, EVENT_TIME_FORMAT, PAYLOAD_TIME_FORMAT};
pub use detection::{Detection, Expression, Gesture};
pub use error::{AlertLogError, ConfigError, DeliveryError, GeoError, LandmarkError};
pub use landmark::{
    FaceLandmarks, FingerState, Frame, HandLandmarks, Landmark, FACE_LANDMARK_COUNT,
    HAND_LANDMARK_COUNT,
};
pub use reason::{ForwardOutcome, ForwardReason};
pub use severity::Severity;
