// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame and result types: hand samples, gesture states, auxiliary data, and records.
//!
//! ## Overview
//!
//! [`HandSample`] is what the sensor side hands over each frame. [`GestureState`] is the
//! lifecycle shared by every detector, and [`GestureRecord`] is the read-only snapshot a
//! [`GestureListener`](crate::arbiter::GestureListener) receives.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::error::IllegalTransition;

/// Identifier of a tracked hand.
///
/// Stable across frames while the sensor keeps tracking the same physical hand,
/// and unique within a single frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HandId(pub u32);

/// One tracked hand in one frame.
///
/// Produced fresh by the sensor collaborator each frame. Whether the hand is
/// `touching` comes from the external virtual-screen projection; this crate never
/// computes 3D geometry itself.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandSample {
    /// Tracking handle of the hand.
    pub id: HandId,
    /// Position on the virtual screen, in real-world units.
    pub position: Point,
    /// Position of the same hand in depth-image coordinates, when the sensor provides it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub projected: Option<Point>,
    /// Whether the hand is currently touching the virtual screen.
    pub touching: bool,
}

impl HandSample {
    /// Create a sample without a projected position.
    pub const fn new(id: HandId, position: Point, touching: bool) -> Self {
        Self {
            id,
            position,
            projected: None,
            touching,
        }
    }

    /// Attach the depth-image position of this hand.
    #[must_use]
    pub const fn with_projection(mut self, projected: Point) -> Self {
        self.projected = Some(projected);
        self
    }
}

/// Lifecycle of a gesture within one detector.
///
/// The cycle is `NotDetected → PossibleDetection → InProgress → Completed → NotDetected`;
/// see [`GestureState::can_transition_to`] for the full graph.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureState {
    /// Nothing resembling the gesture is happening.
    #[default]
    NotDetected,
    /// The gesture may be starting but there is not enough evidence yet.
    PossibleDetection,
    /// The gesture has been recognized and is ongoing.
    InProgress,
    /// The gesture has finished.
    Completed,
}

impl GestureState {
    /// Whether a detector may move from `self` to `next` in a single update.
    ///
    /// Staying in the same state is always allowed. Otherwise:
    /// - `NotDetected` may only advance to `PossibleDetection`.
    /// - `PossibleDetection` may advance to `InProgress` or fall back to `NotDetected`.
    /// - `InProgress` may finish as `Completed` or be abandoned to `NotDetected`.
    /// - `Completed` may only return to `NotDetected`.
    pub const fn can_transition_to(self, next: Self) -> bool {
        use GestureState::*;
        matches!(
            (self, next),
            (NotDetected, NotDetected | PossibleDetection)
                | (PossibleDetection, PossibleDetection | InProgress | NotDetected)
                | (InProgress, InProgress | Completed | NotDetected)
                | (Completed, Completed | NotDetected)
        )
    }

    /// Validate a transition reported by the detector called `name`.
    pub fn check_transition(name: &str, from: Self, to: Self) -> Result<(), IllegalTransition> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(IllegalTransition {
                name: name.into(),
                from,
                to,
            })
        }
    }

    /// Lower-case label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotDetected => "not-detected",
            Self::PossibleDetection => "possible-detection",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl core::fmt::Display for GestureState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of an auxiliary readout published by a detector.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum DataKey {
    /// Where a single-hand gesture first touched.
    InitialPosition,
    /// Midpoint of the two hands when a zoom was first acquired.
    StartPoint,
    /// Distance between the two hands when a zoom was first acquired.
    InitialDistance,
    /// Distance between the two hands in the current frame.
    CurrentDistance,
}

impl DataKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::InitialPosition,
        Self::StartPoint,
        Self::InitialDistance,
        Self::CurrentDistance,
    ];

    /// External name consumers look the readout up by.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InitialPosition => "initialPosition",
            Self::StartPoint => "startPoint",
            Self::InitialDistance => "initialDistance",
            Self::CurrentDistance => "currentDistance",
        }
    }

    /// Resolve an external name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Value of an auxiliary readout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DataValue {
    /// A position on the virtual screen.
    Point(Point),
    /// A distance in real-world units.
    Distance(f64),
}

/// The auxiliary data bag of a detector.
///
/// A small ordered map from [`DataKey`] to [`DataValue`]. Reads of keys that were
/// never published return `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureData {
    entries: Vec<(DataKey, DataValue)>,
}

impl GestureData {
    /// Create an empty bag.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Publish `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: DataKey, value: DataValue) -> Option<DataValue> {
        match self.entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(i) => Some(core::mem::replace(&mut self.entries[i].1, value)),
            Err(i) => {
                self.entries.insert(i, (key, value));
                None
            }
        }
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: DataKey) -> Option<DataValue> {
        let i = self.entries.binary_search_by_key(&key, |(k, _)| *k).ok()?;
        Some(self.entries.remove(i).1)
    }

    /// Remove every readout.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read the value published under `key`.
    pub fn get(&self, key: DataKey) -> Option<DataValue> {
        self.entries
            .binary_search_by_key(&key, |(k, _)| *k)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Read a value by its external name; unknown names read as absent.
    pub fn get_by_name(&self, name: &str) -> Option<DataValue> {
        DataKey::from_name(name).and_then(|k| self.get(k))
    }

    /// Whether `key` has been published.
    pub fn contains(&self, key: DataKey) -> bool {
        self.get(key).is_some()
    }

    /// Read `key` as a point.
    pub fn point(&self, key: DataKey) -> Option<Point> {
        match self.get(key)? {
            DataValue::Point(p) => Some(p),
            DataValue::Distance(_) => None,
        }
    }

    /// Read `key` as a distance.
    pub fn distance(&self, key: DataKey) -> Option<f64> {
        match self.get(key)? {
            DataValue::Distance(d) => Some(d),
            DataValue::Point(_) => None,
        }
    }

    /// Iterate over readouts in key order.
    pub fn iter(&self) -> impl Iterator<Item = (DataKey, DataValue)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of readouts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no readout is published.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Snapshot of a detector handed to listeners.
///
/// Built fresh for each notification by the [`GestureArbiter`](crate::arbiter::GestureArbiter).
#[derive(Clone, Debug, PartialEq)]
pub struct GestureRecord {
    /// Name of the detector that produced the record.
    pub name: String,
    /// State the detector is in after this frame.
    pub state: GestureState,
    /// Hands the detector is tracking.
    pub hands: Vec<HandSample>,
    /// Auxiliary readouts published by the detector.
    pub data: GestureData,
    /// Whether the detector is live.
    pub live: bool,
}

impl GestureRecord {
    /// Whether the gesture is in progress.
    pub fn is_in_progress(&self) -> bool {
        self.state == GestureState::InProgress
    }

    /// Whether the gesture has completed.
    pub fn is_complete(&self) -> bool {
        self.state == GestureState::Completed
    }

    /// Whether the detector published `key`.
    pub fn has_data(&self, key: DataKey) -> bool {
        self.data.contains(key)
    }

    /// Read a readout by key.
    pub fn get(&self, key: DataKey) -> Option<DataValue> {
        self.data.get(key)
    }

    /// Read a readout by external name; unknown names read as absent.
    pub fn get_by_name(&self, name: &str) -> Option<DataValue> {
        self.data.get_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn transition_graph_allows_the_cycle() {
        use GestureState::*;
        assert!(NotDetected.can_transition_to(PossibleDetection));
        assert!(PossibleDetection.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(Completed.can_transition_to(NotDetected));
        for s in [NotDetected, PossibleDetection, InProgress, Completed] {
            assert!(s.can_transition_to(s), "{s} should be able to stay put");
        }
    }

    #[test]
    fn transition_graph_rejects_skips() {
        use GestureState::*;
        assert!(!NotDetected.can_transition_to(InProgress));
        assert!(!NotDetected.can_transition_to(Completed));
        assert!(!PossibleDetection.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(InProgress));
        assert!(!Completed.can_transition_to(PossibleDetection));
        assert!(!InProgress.can_transition_to(PossibleDetection));

        let err = GestureState::check_transition("tap", NotDetected, Completed).unwrap_err();
        assert_eq!(err.from, NotDetected);
        assert_eq!(err.to, Completed);
        assert_eq!(err.name, "tap");
    }

    #[test]
    fn data_bag_orders_and_replaces() {
        let mut data = GestureData::new();
        assert!(data.is_empty());
        data.insert(DataKey::CurrentDistance, DataValue::Distance(3.0));
        data.insert(DataKey::InitialPosition, DataValue::Point(Point::new(1.0, 2.0)));
        let prev = data.insert(DataKey::CurrentDistance, DataValue::Distance(4.0));
        assert_eq!(prev, Some(DataValue::Distance(3.0)));
        assert_eq!(data.len(), 2);
        let keys: Vec<DataKey> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![DataKey::InitialPosition, DataKey::CurrentDistance]);
        assert_eq!(data.distance(DataKey::CurrentDistance), Some(4.0));
        assert_eq!(data.point(DataKey::CurrentDistance), None);
        assert_eq!(data.remove(DataKey::InitialPosition), Some(DataValue::Point(Point::new(1.0, 2.0))));
        assert_eq!(data.remove(DataKey::InitialPosition), None);
    }

    #[test]
    fn unknown_names_read_as_absent() {
        let mut data = GestureData::new();
        data.insert(DataKey::StartPoint, DataValue::Point(Point::ORIGIN));
        assert_eq!(
            data.get_by_name("startPoint"),
            Some(DataValue::Point(Point::ORIGIN))
        );
        assert_eq!(data.get_by_name("velocity"), None);
        assert_eq!(DataKey::from_name("initialDistance"), Some(DataKey::InitialDistance));
        assert_eq!(DataKey::from_name(""), None);
    }

    #[test]
    fn record_helpers_follow_state() {
        let record = GestureRecord {
            name: "tap".into(),
            state: GestureState::Completed,
            hands: vec![HandSample::new(HandId(1), Point::new(3.0, 4.0), false)],
            data: GestureData::new(),
            live: false,
        };
        assert!(record.is_complete());
        assert!(!record.is_in_progress());
        assert!(!record.has_data(DataKey::InitialPosition));
        assert_eq!(record.get_by_name("initialPosition"), None);
    }

    #[test]
    fn projection_is_optional() {
        let s = HandSample::new(HandId(7), Point::new(1.0, 1.0), true);
        assert_eq!(s.projected, None);
        let s = s.with_projection(Point::new(320.0, 240.0));
        assert_eq!(s.projected, Some(Point::new(320.0, 240.0)));
    }
}
