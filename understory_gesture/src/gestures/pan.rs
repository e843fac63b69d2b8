// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan: drag or swipe one hand across the virtual screen in a given direction.
//!
//! ## Direction classification
//!
//! The displacement from the start point is classified into one of four directions
//! from `atan2(Δy, −Δx)`. The sensor faces the user, so its x axis runs opposite to
//! the user's own left/right.
//!
//! | angle | direction |
//! |---|---|
//! | `[−π/4, π/4]` | right |
//! | `(π/4, 3π/4)` | up |
//! | `[3π/4, π] ∪ [−π, −3π/4)` | left |
//! | `[−3π/4, −π/4)` | down |

use alloc::string::String;
use core::f64::consts::FRAC_PI_4;

use kurbo::{Point, Vec2};
use tracing::trace;

use crate::detector::GestureDetector;
use crate::error::{ConfigError, validate_thresholds};
use crate::tracking::{SingleHandFrame, SingleHandTracker};
use crate::types::{DataKey, DataValue, GestureData, GestureState, HandId, HandSample};

const FRAC_3PI_4: f64 = 3.0 * FRAC_PI_4;

/// A compass direction a pan can take.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PanDirection {
    /// Toward the user's left.
    Left,
    /// Toward the user's right.
    Right,
    /// Upward.
    Up,
    /// Downward.
    Down,
}

impl PanDirection {
    /// Classify a displacement on the virtual screen.
    pub fn classify(delta: Vec2) -> Self {
        let angle = Vec2::new(-delta.x, delta.y).atan2();
        if (-FRAC_PI_4..=FRAC_PI_4).contains(&angle) {
            Self::Right
        } else if angle > FRAC_PI_4 && angle < FRAC_3PI_4 {
            Self::Up
        } else if (-FRAC_3PI_4..-FRAC_PI_4).contains(&angle) {
            Self::Down
        } else {
            Self::Left
        }
    }
}

bitflags::bitflags! {
    /// Set of directions a [`PanGesture`] accepts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct PanDirections: u8 {
        /// Toward the user's left.
        const LEFT  = 0b0001;
        /// Toward the user's right.
        const RIGHT = 0b0010;
        /// Upward.
        const UP    = 0b0100;
        /// Downward.
        const DOWN  = 0b1000;
        /// Left or right.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Up or down.
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
    }
}

impl Default for PanDirections {
    fn default() -> Self {
        Self::all()
    }
}

impl From<PanDirection> for PanDirections {
    fn from(d: PanDirection) -> Self {
        match d {
            PanDirection::Left => Self::LEFT,
            PanDirection::Right => Self::RIGHT,
            PanDirection::Up => Self::UP,
            PanDirection::Down => Self::DOWN,
        }
    }
}

impl PanDirections {
    /// Whether `direction` is in the set.
    pub fn allows(self, direction: PanDirection) -> bool {
        self.contains(direction.into())
    }
}

/// Configuration of a [`PanGesture`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanConfig {
    /// Directions that may start the gesture.
    pub directions: PanDirections,
    /// Displacement from the start point needed to recognize the pan.
    pub detection_distance: f64,
    /// Displacement needed to complete a non-live pan.
    pub completion_distance: f64,
    /// Whether the pan reports start and progress, completing when the hand lifts.
    pub live: bool,
}

impl PanConfig {
    /// Default detection distance, in real-world units.
    pub const DEFAULT_DETECTION_DISTANCE: f64 = 50.0;

    /// Check thresholds: detection must be positive and completion at least detection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_thresholds(self.detection_distance, self.completion_distance)
    }
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            directions: PanDirections::all(),
            detection_distance: Self::DEFAULT_DETECTION_DISTANCE,
            completion_distance: Self::DEFAULT_DETECTION_DISTANCE,
            live: true,
        }
    }
}

/// Single-hand, direction-filtered pan detector.
///
/// - `NotDetected → PossibleDetection` when a hand touches; its position becomes the
///   start point.
/// - `PossibleDetection → InProgress` once the hand has moved at least the detection
///   distance in an allowed direction. Moving that far in any other direction
///   rejects the attempt (`NotDetected`); the hand must lift and touch again
///   before it can start another pan.
/// - Live pans stay `InProgress` while the hand touches and complete as soon as it
///   lifts or is lost.
/// - Non-live pans complete once the displacement reaches the completion distance
///   in the recognized direction, then hold `Completed` until the hand lifts.
#[derive(Clone, Debug)]
pub struct PanGesture {
    name: String,
    config: PanConfig,
    state: GestureState,
    tracker: SingleHandTracker,
    start_point: Option<Point>,
    direction: Option<PanDirection>,
    /// Hand whose current touch was rejected by the direction filter.
    rejected: Option<HandId>,
    data: GestureData,
}

impl PanGesture {
    /// Create a pan detector called `name`.
    pub fn new(name: impl Into<String>, config: PanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            name: name.into(),
            config,
            state: GestureState::NotDetected,
            tracker: SingleHandTracker::new(),
            start_point: None,
            direction: None,
            rejected: None,
            data: GestureData::new(),
        })
    }

    /// The configuration this detector was built with.
    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    /// Direction the current pan was recognized in.
    pub fn direction(&self) -> Option<PanDirection> {
        self.direction
    }

    /// Where the current pan started.
    pub fn start_point(&self) -> Option<Point> {
        self.start_point
    }

    fn touching(frame: &SingleHandFrame) -> Option<Point> {
        frame.hand.filter(|h| h.touching).map(|h| h.position)
    }

    fn step(&mut self, frame: SingleHandFrame) -> GestureState {
        match self.state {
            GestureState::NotDetected => match frame.hand.filter(|h| h.touching) {
                Some(hand) if self.rejected == Some(hand.id) => GestureState::NotDetected,
                Some(hand) => {
                    self.start_point = Some(hand.position);
                    GestureState::PossibleDetection
                }
                None => GestureState::NotDetected,
            },
            GestureState::PossibleDetection => {
                let (Some(p), Some(start)) = (Self::touching(&frame), self.start_point) else {
                    return GestureState::NotDetected;
                };
                let delta = p - start;
                if delta.hypot() < self.config.detection_distance {
                    return GestureState::PossibleDetection;
                }
                let direction = PanDirection::classify(delta);
                if self.config.directions.allows(direction) {
                    self.direction = Some(direction);
                    self.data
                        .insert(DataKey::InitialPosition, DataValue::Point(start));
                    GestureState::InProgress
                } else {
                    trace!(name = %self.name, ?direction, "pan rejected by direction filter");
                    self.rejected = frame.hand.map(|h| h.id);
                    GestureState::NotDetected
                }
            }
            GestureState::InProgress => {
                let touching = Self::touching(&frame);
                if self.config.live {
                    return match touching {
                        Some(_) => GestureState::InProgress,
                        None => GestureState::Completed,
                    };
                }
                let (Some(p), Some(start)) = (touching, self.start_point) else {
                    return GestureState::NotDetected;
                };
                let delta = p - start;
                if delta.hypot() < self.config.completion_distance {
                    GestureState::InProgress
                } else if Some(PanDirection::classify(delta)) == self.direction {
                    GestureState::Completed
                } else {
                    GestureState::NotDetected
                }
            }
            GestureState::Completed => {
                if !self.config.live && Self::touching(&frame).is_some() {
                    GestureState::Completed
                } else {
                    GestureState::NotDetected
                }
            }
        }
    }

    fn clear(&mut self) {
        self.start_point = None;
        self.direction = None;
        self.data.clear();
    }
}

impl GestureDetector for PanGesture {
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
        if let Some(id) = self.rejected
            && !hands.iter().any(|h| h.id == id && h.touching)
        {
            self.rejected = None;
        }
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
        self.rejected = None;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HandId;

    fn at(x: f64, y: f64, touching: bool) -> [HandSample; 1] {
        [HandSample::new(HandId(1), Point::new(x, y), touching)]
    }

    fn pan(directions: PanDirections, live: bool) -> PanGesture {
        PanGesture::new(
            "pan",
            PanConfig {
                directions,
                detection_distance: 50.0,
                completion_distance: 100.0,
                live,
            },
        )
        .unwrap()
    }

    #[test]
    fn classify_octants() {
        assert_eq!(PanDirection::classify(Vec2::new(-10.0, 0.0)), PanDirection::Right);
        assert_eq!(PanDirection::classify(Vec2::new(10.0, 0.0)), PanDirection::Left);
        assert_eq!(PanDirection::classify(Vec2::new(0.0, 10.0)), PanDirection::Up);
        assert_eq!(PanDirection::classify(Vec2::new(0.0, -10.0)), PanDirection::Down);
        // Both π/4 diagonals belong to right.
        assert_eq!(PanDirection::classify(Vec2::new(-10.0, 10.0)), PanDirection::Right);
        assert_eq!(PanDirection::classify(Vec2::new(-10.0, -10.0)), PanDirection::Right);
        assert_eq!(PanDirection::classify(Vec2::new(10.0, 5.0)), PanDirection::Left);
        assert_eq!(PanDirection::classify(Vec2::new(-3.0, -10.0)), PanDirection::Down);
        assert_eq!(PanDirection::classify(Vec2::new(3.0, 10.0)), PanDirection::Up);
    }

    #[test]
    fn config_validation() {
        let bad = PanConfig {
            detection_distance: 0.0,
            ..PanConfig::default()
        };
        assert_eq!(
            PanGesture::new("pan", bad).unwrap_err(),
            ConfigError::NonPositiveDetection(0.0)
        );
        let bad = PanConfig {
            detection_distance: 60.0,
            completion_distance: 40.0,
            ..PanConfig::default()
        };
        assert!(matches!(
            PanGesture::new("pan", bad),
            Err(ConfigError::CompletionBelowDetection { .. })
        ));
        assert!(PanGesture::new("pan", PanConfig::default()).is_ok());
    }

    #[test]
    fn detection_threshold_is_inclusive() {
        let mut p = pan(PanDirections::UP, true);
        assert_eq!(p.update(&at(0.0, 0.0, true)), GestureState::PossibleDetection);
        assert_eq!(p.update(&at(0.0, 49.0, true)), GestureState::PossibleDetection);
        assert_eq!(p.update(&at(0.0, 50.0, true)), GestureState::InProgress);
        assert_eq!(p.direction(), Some(PanDirection::Up));
        assert_eq!(
            p.data().point(DataKey::InitialPosition),
            Some(Point::new(0.0, 0.0))
        );
    }

    #[test]
    fn wrong_direction_is_rejected() {
        let mut p = pan(PanDirections::RIGHT, true);
        p.update(&at(0.0, 0.0, true));
        assert_eq!(p.update(&at(0.0, 80.0, true)), GestureState::NotDetected);
        assert!(p.data().is_empty());
        // Turning right without lifting stays rejected.
        for x in [0.0, -40.0, -80.0, -160.0] {
            assert_eq!(p.update(&at(x, 80.0, true)), GestureState::NotDetected);
        }
        assert_eq!(p.start_point(), None);

        // Lifting clears the rejection; the next touch starts over.
        assert_eq!(p.update(&at(-160.0, 80.0, false)), GestureState::NotDetected);
        assert_eq!(p.update(&at(-160.0, 80.0, true)), GestureState::PossibleDetection);
        assert_eq!(p.update(&at(-240.0, 80.0, true)), GestureState::InProgress);
    }

    #[test]
    fn rejection_ends_when_the_hand_is_lost() {
        let mut p = pan(PanDirections::RIGHT, true);
        p.update(&at(0.0, 0.0, true));
        p.update(&at(0.0, 80.0, true));
        assert_eq!(p.update(&[]), GestureState::NotDetected);
        assert_eq!(p.update(&at(0.0, 80.0, true)), GestureState::PossibleDetection);
    }

    #[test]
    fn reset_clears_a_rejection() {
        let mut p = pan(PanDirections::RIGHT, true);
        p.update(&at(0.0, 0.0, true));
        p.update(&at(0.0, 80.0, true));
        p.reset();
        assert_eq!(p.update(&at(0.0, 80.0, true)), GestureState::PossibleDetection);
    }

    #[test]
    fn live_pan_completes_on_release() {
        let mut p = pan(PanDirections::all(), true);
        p.update(&at(0.0, 0.0, true));
        assert_eq!(p.update(&at(-60.0, 0.0, true)), GestureState::InProgress);
        assert_eq!(p.direction(), Some(PanDirection::Right));
        assert_eq!(p.update(&at(-70.0, 0.0, true)), GestureState::InProgress);
        assert_eq!(p.update(&at(-70.0, 0.0, false)), GestureState::Completed);
        assert_eq!(p.hands()[0].position, Point::new(-70.0, 0.0));
        assert_eq!(p.update(&at(-70.0, 0.0, false)), GestureState::NotDetected);
    }

    #[test]
    fn non_live_pan_completes_at_threshold_and_holds() {
        let mut p = pan(PanDirections::all(), false);
        p.update(&at(0.0, 0.0, true));
        assert_eq!(p.update(&at(0.0, -50.0, true)), GestureState::InProgress);
        assert_eq!(p.update(&at(0.0, -99.0, true)), GestureState::InProgress);
        assert_eq!(p.update(&at(0.0, -100.0, true)), GestureState::Completed);
        assert_eq!(p.update(&at(0.0, -120.0, true)), GestureState::Completed);
        assert_eq!(p.update(&at(0.0, -120.0, false)), GestureState::NotDetected);
    }

    #[test]
    fn non_live_pan_abandoned_below_threshold() {
        let mut p = pan(PanDirections::all(), false);
        p.update(&at(0.0, 0.0, true));
        p.update(&at(0.0, 60.0, true));
        assert_eq!(p.update(&at(0.0, 60.0, false)), GestureState::NotDetected);
        assert!(p.data().is_empty());
    }

    #[test]
    fn non_live_pan_changing_direction_is_dropped() {
        let mut p = pan(PanDirections::all(), false);
        p.update(&at(0.0, 0.0, true));
        assert_eq!(p.update(&at(0.0, 60.0, true)), GestureState::InProgress);
        assert_eq!(p.update(&at(150.0, 60.0, true)), GestureState::NotDetected);
    }

    #[test]
    fn reset_clears_everything() {
        let mut p = pan(PanDirections::all(), true);
        p.update(&at(0.0, 0.0, true));
        p.update(&at(0.0, 60.0, true));
        p.reset();
        p.reset();
        assert_eq!(p.state(), GestureState::NotDetected);
        assert!(p.data().is_empty());
        assert_eq!(p.direction(), None);
        assert_eq!(p.start_point(), None);
        assert!(p.hands().is_empty());
    }
}
