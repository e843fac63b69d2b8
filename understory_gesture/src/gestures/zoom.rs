// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom: pinch two hands together or spread them apart.

use alloc::string::String;

use kurbo::Point;
use tracing::trace;

use crate::detector::GestureDetector;
use crate::error::{ConfigError, validate_thresholds};
use crate::tracking::{DualHandFrame, DualHandTracker};
use crate::types::{DataKey, DataValue, GestureData, GestureState, HandSample};

/// Which change in hand distance a [`ZoomGesture`] accepts.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoomDirection {
    /// Hands move closer together (pinch).
    Inward,
    /// Hands move apart (spread).
    Outward,
    /// Either.
    #[default]
    Both,
}

impl ZoomDirection {
    /// Whether a distance change of `diff` goes this way.
    pub fn matches(self, diff: f64) -> bool {
        match self {
            Self::Inward => diff < 0.0,
            Self::Outward => diff > 0.0,
            Self::Both => true,
        }
    }
}

/// Configuration of a [`ZoomGesture`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomConfig {
    /// Accepted direction of the distance change.
    pub direction: ZoomDirection,
    /// Change in hand distance needed to recognize the zoom.
    pub detection_distance: f64,
    /// Change in hand distance needed to complete a non-live zoom.
    pub completion_distance: f64,
    /// Whether the zoom reports start and progress, completing when a hand lifts.
    pub live: bool,
}

impl ZoomConfig {
    /// Default detection distance, in real-world units.
    pub const DEFAULT_DETECTION_DISTANCE: f64 = 35.0;
    /// Default completion distance, in real-world units.
    pub const DEFAULT_COMPLETION_DISTANCE: f64 = 200.0;

    /// Check thresholds: detection must be positive and completion at least detection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_thresholds(self.detection_distance, self.completion_distance)
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            direction: ZoomDirection::Both,
            detection_distance: Self::DEFAULT_DETECTION_DISTANCE,
            completion_distance: Self::DEFAULT_COMPLETION_DISTANCE,
            live: true,
        }
    }
}

/// Two-hand, direction-filtered zoom detector.
///
/// Readouts: [`DataKey::StartPoint`] (midpoint of the hands when first acquired) and
/// [`DataKey::InitialDistance`] once recognized, plus [`DataKey::CurrentDistance`]
/// on every in-progress frame.
#[derive(Clone, Debug)]
pub struct ZoomGesture {
    name: String,
    config: ZoomConfig,
    state: GestureState,
    tracker: DualHandTracker,
    start_point: Option<Point>,
    initial_distance: Option<f64>,
    data: GestureData,
}

impl ZoomGesture {
    /// Create a zoom detector called `name`.
    pub fn new(name: impl Into<String>, config: ZoomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            name: name.into(),
            config,
            state: GestureState::NotDetected,
            tracker: DualHandTracker::new(),
            start_point: None,
            initial_distance: None,
            data: GestureData::new(),
        })
    }

    /// The configuration this detector was built with.
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Distance between the hands when the current zoom was acquired.
    pub fn initial_distance(&self) -> Option<f64> {
        self.initial_distance
    }

    fn both_touching(frame: &DualHandFrame) -> Option<[HandSample; 2]> {
        frame.hands.filter(|[a, b]| a.touching && b.touching)
    }

    fn step(&mut self, frame: DualHandFrame) -> GestureState {
        match self.state {
            GestureState::NotDetected => match Self::both_touching(&frame) {
                Some([a, b]) => {
                    self.initial_distance = Some(a.position.distance(b.position));
                    self.start_point = Some(a.position.midpoint(b.position));
                    GestureState::PossibleDetection
                }
                None => GestureState::NotDetected,
            },
            GestureState::PossibleDetection => {
                let (Some([a, b]), Some(initial)) =
                    (Self::both_touching(&frame), self.initial_distance)
                else {
                    return GestureState::NotDetected;
                };
                let diff = a.position.distance(b.position) - initial;
                if diff.abs() < self.config.detection_distance {
                    return GestureState::PossibleDetection;
                }
                if self.config.direction.matches(diff) {
                    self.data
                        .insert(DataKey::InitialDistance, DataValue::Distance(initial));
                    if let Some(p) = self.start_point {
                        self.data.insert(DataKey::StartPoint, DataValue::Point(p));
                    }
                    GestureState::InProgress
                } else {
                    trace!(name = %self.name, diff, "zoom rejected by direction filter");
                    GestureState::NotDetected
                }
            }
            GestureState::InProgress => {
                let (Some([a, b]), Some(initial)) =
                    (Self::both_touching(&frame), self.initial_distance)
                else {
                    return if self.config.live {
                        GestureState::Completed
                    } else {
                        GestureState::NotDetected
                    };
                };
                let current = a.position.distance(b.position);
                self.data
                    .insert(DataKey::CurrentDistance, DataValue::Distance(current));
                if self.config.live {
                    return GestureState::InProgress;
                }
                let diff = current - initial;
                if diff.abs() < self.config.completion_distance {
                    GestureState::InProgress
                } else if self.config.direction.matches(diff) {
                    GestureState::Completed
                } else {
                    GestureState::NotDetected
                }
            }
            GestureState::Completed => {
                if !self.config.live && Self::both_touching(&frame).is_some() {
                    GestureState::Completed
                } else {
                    GestureState::NotDetected
                }
            }
        }
    }

    fn clear(&mut self) {
        self.start_point = None;
        self.initial_distance = None;
        self.data.clear();
    }
}

impl GestureDetector for ZoomGesture {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_live(&self) -> bool {
        self.config.live
    }

    fn state(&self) -> GestureState {
        self.state
    }

    fn update(&mut self, hands: &[HandSample]) -> GestureState {
        let frame = self.tracker.observe(hands);
        let next = self.step(frame);
        self.tracker.commit(next);
        if next == GestureState::NotDetected {
            self.clear();
        }
        self.state = next;
        next
    }

    fn reset(&mut self) {
        self.tracker.reset();
        self.clear();
        self.state = GestureState::NotDetected;
    }

    fn data(&self) -> &GestureData {
        &self.data
    }

    fn hands(&self) -> &[HandSample] {
        self.tracker.hands()
    }
}
