//! Per-frame processing: classify the primary hand and face, dispatch hits
//!
//! Frames are handled strictly one after another. The pipeline owns the
//! debounce state, so nothing outside it can observe or reset tap timing.

use tracing::debug;

use crate::config::SafeMeshConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::debounce::DebounceState;
use crate::core::dispatcher::Dispatcher;
use crate::core::expression::ExpressionClassifier;
use crate::core::gesture::GestureClassifier;
use crate::types::{Detection, Frame, Severity};

pub const STARTED_MESSAGE: &str = "SafeMesh started, monitoring gestures and expressions";
pub const STOPPED_MESSAGE: &str = "SafeMesh stopped";

/// What one frame produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub gesture: Detection,
    pub expression: Detection,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.gesture.is_none() && self.expression.is_none()
    }
}

#[derive(Debug)]
pub struct FramePipeline<C: Clock = SystemClock> {
    gestures: GestureClassifier,
    expressions: ExpressionClassifier,
    debounce: DebounceState,
    clock: C,
    dispatcher: Dispatcher,
    frames: u64,
}

impl FramePipeline<SystemClock> {
    pub fn new(config: &SafeMeshConfig, dispatcher: Dispatcher) -> Self {
        Self::with_clock(config, dispatcher, SystemClock::new())
    }
}

impl<C: Clock> FramePipeline<C> {
    pub fn with_clock(config: &SafeMeshConfig, dispatcher: Dispatcher, clock: C) -> Self {
        Self {
            gestures: GestureClassifier::new(&config.debounce),
            expressions: ExpressionClassifier::new(&config.expression),
            debounce: DebounceState::new(),
            clock,
            dispatcher,
            frames: 0,
        }
    }

    /// Record the session start marker
    pub fn start(&mut self) {
        self.dispatcher.dispatch(STARTED_MESSAGE, Severity::None);
    }

    /// Stop forwarding and record the session end marker
    pub fn stop(&mut self) {
        self.dispatcher.close_forwarding();
        self.dispatcher.dispatch(STOPPED_MESSAGE, Severity::None);
    }

    /// Classify and dispatch one frame; extra hands and faces are ignored
    pub fn process(&mut self, frame: &Frame) -> FrameReport {
        self.frames += 1;
        let mut report = FrameReport::default();

        if let Some(hand) = frame.primary_hand() {
            report.gesture = self.gestures.classify(hand, &mut self.debounce, &self.clock);
            if let Some(label) = report.gesture.label {
                self.dispatcher.dispatch(format!("gesture: {}", label), report.gesture.severity);
            }
        }

        if let Some(face) = frame.primary_face() {
            report.expression = self.expressions.classify(face);
            if let Some(label) = report.expression.label {
                self.dispatcher.dispatch(format!("expression: {}", label), report.expression.severity);
            }
        }

        if frame.hands.len() > 1 || frame.faces.len() > 1 {
            debug!(hands = frame.hands.len(), faces = frame.faces.len(), "extra subjects ignored");
        }

        self.dispatcher.drain_outcomes();
        report
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    pub fn debounce_state(&self) -> &DebounceState {
        &self.debounce
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }
}
