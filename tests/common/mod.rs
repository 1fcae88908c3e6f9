//! Synthetic landmark fixtures and network stubs shared by the integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use safemesh::core::{AlertTransport, GeoLocator};
use safemesh::types::{
    AlertPayload, DeliveryError, FaceLandmarks, GeoError, GeoLocation, HandLandmarks, Landmark,
};

/// Which way the palm faces, as seen through lm[2].x - lm[17].x
#[derive(Debug, Clone, Copy)]
pub enum Palm {
    /// Positive: extended thumb tip sits left of its joint
    Positive,
    /// Negative: extended thumb tip sits right of its joint
    Negative,
}

/// A 21-point hand with the requested digits raised
pub fn hand(palm: Palm, thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> HandLandmarks {
    let mut points = vec![Landmark::new(0.5, 0.5); 21];
    let (mcp, pinky_mcp, thumb_out, thumb_in) = match palm {
        Palm::Positive => (0.6, 0.4, 0.3, 0.7),
        Palm::Negative => (0.4, 0.6, 0.7, 0.3),
    };
    points[2].x = mcp;
    points[17].x = pinky_mcp;
    points[4].x = if thumb { thumb_out } else { thumb_in };
    for (tip, up) in [(8, index), (12, middle), (16, ring), (20, pinky)] {
        points[tip].y = if up { 0.3 } else { 0.7 };
    }
    HandLandmarks::try_from(points).unwrap()
}

pub fn pointing_hand() -> HandLandmarks {
    hand(Palm::Positive, false, true, false, false, false)
}

/// A 468-point face, 0.4 wide, with openings given as ratios of the width
pub fn face(mouth: f64, right_eye: f64, left_eye: f64) -> FaceLandmarks {
    let mut points = vec![Landmark::new(0.5, 0.5); 468];
    points[234].x = 0.3;
    points[454].x = 0.7;
    points[13].y = 0.6;
    points[14].y = 0.6 + mouth * 0.4;
    points[159].y = 0.4;
    points[145].y = 0.4 + right_eye * 0.4;
    points[386].y = 0.4;
    points[374].y = 0.4 + left_eye * 0.4;
    FaceLandmarks::try_from(points).unwrap()
}

pub fn panic_face() -> FaceLandmarks {
    face(0.12, 0.09, 0.09)
}

/// Fresh log path under the temp dir, unique per test name and process
pub fn temp_log_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("safemesh_it_{}_{}.log", name, std::process::id()));
    std::fs::remove_file(&path).ok();
    path
}

pub fn sample_geo() -> GeoLocation {
    GeoLocation {
        latitude: -8.05,
        longitude: -34.88,
        city: "Recife".to_string(),
        state: "Pernambuco".to_string(),
        country: "BR".to_string(),
    }
}

/// Geolocation stub: fixed answer or failure
pub struct StubLocator {
    pub location: Option<GeoLocation>,
}

impl StubLocator {
    pub fn reachable() -> Self {
        Self { location: Some(sample_geo()) }
    }

    pub fn failing() -> Self {
        Self { location: None }
    }
}

impl GeoLocator for StubLocator {
    async fn locate(&self) -> Result<GeoLocation, GeoError> {
        self.location
            .clone()
            .ok_or_else(|| GeoError::Request("network unreachable".to_string()))
    }
}

/// Transport stub that records every payload and answers 200
#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub sent: Arc<Mutex<Vec<AlertPayload>>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<AlertPayload> {
        self.sent.lock().unwrap().clone()
    }
}

impl AlertTransport for RecordingTransport {
    async fn deliver(&self, payload: &AlertPayload) -> Result<u16, DeliveryError> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(200)
    }
}
