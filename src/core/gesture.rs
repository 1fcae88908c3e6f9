//! Gesture classifier: one hand's landmarks → (label, severity)
//!
//! Precedence (first match wins):
//! 1. index + middle + ring + pinky extended → need-help (RISK)
//! 2. only thumb extended                    → ok (INFO)
//! 3. only thumb + pinky extended            → power-restored (INFO)
//! 4. only index extended                    → debounce; double tap → distress (DISTRESS)
//! 5. anything else                          → NONE

use crate::config::DebounceConfig;
use crate::core::clock::Clock;
use crate::core::debounce::{DebounceEngine, DebounceState};
use crate::types::{Detection, FingerState, Gesture, HandLandmarks};

// Hand skeleton indices
const THUMB_MCP: usize = 2;
const THUMB_IP: usize = 3;
const THUMB_TIP: usize = 4;
const INDEX_PIP: usize = 6;
const INDEX_TIP: usize = 8;
const MIDDLE_PIP: usize = 10;
const MIDDLE_TIP: usize = 12;
const RING_PIP: usize = 14;
const RING_TIP: usize = 16;
const PINKY_MCP: usize = 17;
const PINKY_PIP: usize = 18;
const PINKY_TIP: usize = 20;

/// Extension test for every digit of one hand
pub fn finger_state(hand: &HandLandmarks) -> FingerState {
    // y grows downwards: a raised tip has the smaller y
    let raised = |tip: usize, joint: usize| hand[tip].y < hand[joint].y;

    // Palm orientation flips the thumb's horizontal direction
    let thumb = if hand[THUMB_MCP].x - hand[PINKY_MCP].x > 0.0 {
        hand[THUMB_TIP].x < hand[THUMB_IP].x
    } else {
        hand[THUMB_TIP].x > hand[THUMB_IP].x
    };

    FingerState {
        thumb,
        index: raised(INDEX_TIP, INDEX_PIP),
        middle: raised(MIDDLE_TIP, MIDDLE_PIP),
        ring: raised(RING_TIP, RING_PIP),
        pinky: raised(PINKY_TIP, PINKY_PIP),
    }
}

/// Stateless rules plus the debounce thresholds for rule 4
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    debounce: DebounceEngine,
}

impl GestureClassifier {
    pub fn new(config: &DebounceConfig) -> Self {
        Self {
            debounce: DebounceEngine::new(config),
        }
    }

    /// Classify one hand; `state` is touched only for index-only hands
    pub fn classify(
        &self,
        hand: &HandLandmarks,
        state: &mut DebounceState,
        clock: &impl Clock,
    ) -> Detection {
        let fingers = finger_state(hand);

        if fingers.fingers_all_extended() {
            return Gesture::NeedHelp.detection();
        }

        if fingers.thumb && fingers.fingers_all_folded() {
            return Gesture::Ok.detection();
        }

        if fingers.thumb && fingers.pinky && !(fingers.index || fingers.middle || fingers.ring) {
            return Gesture::PowerRestored.detection();
        }

        if fingers.index && !(fingers.middle || fingers.ring || fingers.pinky || fingers.thumb) {
            if self.debounce.register_tap(state, clock.now()).is_confirmed() {
                return Gesture::DistressSignal.detection();
            }
        }

        Detection::NONE
    }
}
