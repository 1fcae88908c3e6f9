//! Landmark sequences delivered by the perception feed
//!
//! A landmark has no identity beyond its index in the sequence, so the
//! sequence length is checked once at the frame boundary and the classifiers
//! index freely afterwards.

use serde::{Deserialize, Serialize};

use crate::types::LandmarkError;

/// Points in a hand skeleton
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Points in a face mesh (refined meshes append iris points after these)
pub const FACE_LANDMARK_COUNT: usize = 468;

/// One tracked point, coordinates normalized to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Depth, ignored by the classifiers
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// The 21 landmarks of a single hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct HandLandmarks(Vec<Landmark>);

impl HandLandmarks {
    pub fn points(&self) -> &[Landmark] {
        &self.0
    }
}

impl std::ops::Index<usize> for HandLandmarks {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.0[index]
    }
}

impl TryFrom<Vec<Landmark>> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        if points.len() != HAND_LANDMARK_COUNT {
            return Err(LandmarkError::HandLength(points.len()));
        }
        Ok(Self(points))
    }
}

impl From<HandLandmarks> for Vec<Landmark> {
    fn from(hand: HandLandmarks) -> Self {
        hand.0
    }
}

/// The landmarks of a single face mesh (at least 468)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct FaceLandmarks(Vec<Landmark>);

impl FaceLandmarks {
    pub fn points(&self) -> &[Landmark] {
        &self.0
    }
}

impl std::ops::Index<usize> for FaceLandmarks {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.0[index]
    }
}

impl TryFrom<Vec<Landmark>> for FaceLandmarks {
    type Error = LandmarkError;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        if points.len() < FACE_LANDMARK_COUNT {
            return Err(LandmarkError::FaceLength(points.len()));
        }
        Ok(Self(points))
    }
}

impl From<FaceLandmarks> for Vec<Landmark> {
    fn from(face: FaceLandmarks) -> Self {
        face.0
    }
}

/// Everything the perception feed reports for one video frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Detected hands in arrival order
    #[serde(default)]
    pub hands: Vec<HandLandmarks>,
    /// Detected faces in arrival order
    #[serde(default)]
    pub faces: Vec<FaceLandmarks>,
}

impl Frame {
    /// Parse one JSON line of the perception feed
    pub fn from_json_line(line: &str) -> Result<Self, LandmarkError> {
        serde_json::from_str(line).map_err(|e| LandmarkError::Malformed(e.to_string()))
    }

    /// Subject policy: only the first hand by arrival order is classified
    pub fn primary_hand(&self) -> Option<&HandLandmarks> {
        self.hands.first()
    }

    /// Subject policy: only the first face by arrival order is classified
    pub fn primary_face(&self) -> Option<&FaceLandmarks> {
        self.faces.first()
    }
}

/// Which digits are extended on one hand, recomputed every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    /// Index, middle, ring and pinky all extended
    pub fn fingers_all_extended(&self) -> bool {
        self.index && self.middle && self.ring && self.pinky
    }

    /// Index, middle, ring and pinky all folded
    pub fn fingers_all_folded(&self) -> bool {
        !(self.index || self.middle || self.ring || self.pinky)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Landmark> {
        vec![Landmark::new(0.5, 0.5); n]
    }

    #[test]
    fn test_hand_requires_21_points() {
        assert!(HandLandmarks::try_from(points(21)).is_ok());
        assert!(matches!(
            HandLandmarks::try_from(points(20)),
            Err(LandmarkError::HandLength(20))
        ));
    }

    #[test]
    fn test_face_accepts_refined_mesh() {
        assert!(FaceLandmarks::try_from(points(468)).is_ok());
        let refined = FaceLandmarks::try_from(points(478)).unwrap();
        assert_eq!(refined.points().len(), 478);
        assert!(FaceLandmarks::try_from(points(100)).is_err());
    }

    #[test]
    fn test_frame_z_is_optional() {
        let hand: Vec<String> = (0..21).map(|_| r#"{"x":0.1,"y":0.2}"#.to_string()).collect();
        let line = format!(r#"{{"hands":[[{}]]}}"#, hand.join(","));
        let frame = Frame::from_json_line(&line).unwrap();

        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].points().len(), HAND_LANDMARK_COUNT);
        assert!(frame.faces.is_empty());
        assert_eq!(frame.primary_hand().unwrap()[0].z, 0.0);
    }

    #[test]
    fn test_short_hand_rejects_frame() {
        let line = r#"{"hands":[[{"x":0.1,"y":0.2}]]}"#;
        assert!(matches!(Frame::from_json_line(line), Err(LandmarkError::Malformed(_))));
    }

    #[test]
    fn test_primary_subject_is_first_by_arrival() {
        let mut first = points(21);
        first[0] = Landmark::new(0.9, 0.9);
        let frame = Frame {
            hands: vec![
                HandLandmarks::try_from(first).unwrap(),
                HandLandmarks::try_from(points(21)).unwrap(),
            ],
            faces: vec![],
        };

        assert_eq!(frame.primary_hand().unwrap()[0].x, 0.9);
        assert!(frame.primary_face().is_none());
    }
}
