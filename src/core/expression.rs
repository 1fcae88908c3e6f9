//! Expression classifier: one face mesh → (label, severity)
//!
//! All distances are divided by the face width so the thresholds hold at
//! any distance from the camera.

use crate::config::ExpressionConfig;
use crate::types::{Detection, Expression, FaceLandmarks};

// Face mesh indices
const FACE_LEFT_EDGE: usize = 234;
const FACE_RIGHT_EDGE: usize = 454;
const UPPER_LIP_INNER: usize = 13;
const LOWER_LIP_INNER: usize = 14;
const RIGHT_EYE_UPPER: usize = 159;
const RIGHT_EYE_LOWER: usize = 145;
const LEFT_EYE_UPPER: usize = 386;
const LEFT_EYE_LOWER: usize = 374;

/// Openings normalized by face width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceOpenings {
    pub mouth: f64,
    pub right_eye: f64,
    pub left_eye: f64,
}

impl FaceOpenings {
    /// `None` when the face has no width (occluded or degenerate detection)
    pub fn measure(face: &FaceLandmarks) -> Option<Self> {
        let width = (face[FACE_RIGHT_EDGE].x - face[FACE_LEFT_EDGE].x).abs();
        if width == 0.0 {
            return None;
        }

        Some(Self {
            mouth: (face[LOWER_LIP_INNER].y - face[UPPER_LIP_INNER].y) / width,
            right_eye: (face[RIGHT_EYE_LOWER].y - face[RIGHT_EYE_UPPER].y).abs() / width,
            left_eye: (face[LEFT_EYE_LOWER].y - face[LEFT_EYE_UPPER].y).abs() / width,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpressionClassifier {
    config: ExpressionConfig,
}

impl ExpressionClassifier {
    pub fn new(config: &ExpressionConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn classify(&self, face: &FaceLandmarks) -> Detection {
        let Some(openings) = FaceOpenings::measure(face) else {
            return Detection::NONE;
        };

        let mouth_open = openings.mouth > self.config.mouth_open_ratio;
        let eyes_wide = openings.right_eye > self.config.eye_open_ratio
            || openings.left_eye > self.config.eye_open_ratio;

        if mouth_open && eyes_wide {
            Expression::Panic.detection()
        } else {
            Detection::NONE
        }
    }
}
