// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! [`ConfigError`] is returned when a detector is built with unusable thresholds.
//! [`IllegalTransition`] describes a detector that reported a state not reachable from
//! its previous one; that is a bug in the detector, and the
//! [`GestureArbiter`](crate::arbiter::GestureArbiter) panics with it rather than
//! coercing the state.

use alloc::string::String;

use crate::types::GestureState;

/// Invalid detector configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The detection threshold must be strictly positive.
    #[error("detection distance must be > 0, got {0}")]
    NonPositiveDetection(f64),
    /// The completion threshold must not be below the detection threshold.
    #[error("completion distance {completion} is below detection distance {detection}")]
    CompletionBelowDetection {
        /// Configured detection threshold.
        detection: f64,
        /// Configured completion threshold.
        completion: f64,
    },
    /// Thresholds must be finite numbers.
    #[error("thresholds must be finite, got detection {detection} and completion {completion}")]
    NonFiniteThreshold {
        /// Configured detection threshold.
        detection: f64,
        /// Configured completion threshold.
        completion: f64,
    },
}

/// Check a detection/completion threshold pair.
pub(crate) fn validate_thresholds(detection: f64, completion: f64) -> Result<(), ConfigError> {
    if !detection.is_finite() || !completion.is_finite() {
        return Err(ConfigError::NonFiniteThreshold {
            detection,
            completion,
        });
    }
    if detection <= 0.0 {
        return Err(ConfigError::NonPositiveDetection(detection));
    }
    if completion < detection {
        return Err(ConfigError::CompletionBelowDetection {
            detection,
            completion,
        });
    }
    Ok(())
}

/// A detector moved between two states that are not adjacent in the transition graph.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("gesture `{name}` made an illegal transition from {from} to {to}")]
pub struct IllegalTransition {
    /// Name of the offending detector.
    pub name: String,
    /// State before the update.
    pub from: GestureState,
    /// State reported by the update.
    pub to: GestureState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn thresholds_accept_equal_pair() {
        assert_eq!(validate_thresholds(10.0, 10.0), Ok(()));
        assert_eq!(validate_thresholds(10.0, 25.0), Ok(()));
    }

    #[test]
    fn thresholds_reject_bad_pairs() {
        assert_eq!(
            validate_thresholds(0.0, 10.0),
            Err(ConfigError::NonPositiveDetection(0.0))
        );
        assert_eq!(
            validate_thresholds(-1.0, 10.0),
            Err(ConfigError::NonPositiveDetection(-1.0))
        );
        assert_eq!(
            validate_thresholds(20.0, 10.0),
            Err(ConfigError::CompletionBelowDetection {
                detection: 20.0,
                completion: 10.0
            })
        );
        assert!(matches!(
            validate_thresholds(f64::NAN, 10.0),
            Err(ConfigError::NonFiniteThreshold { .. })
        ));
        assert!(matches!(
            validate_thresholds(1.0, f64::INFINITY),
            Err(ConfigError::NonFiniteThreshold { .. })
        ));
    }

    #[test]
    fn illegal_transition_message_names_states() {
        let err = IllegalTransition {
            name: "zoom".into(),
            from: GestureState::NotDetected,
            to: GestureState::Completed,
        };
        assert_eq!(
            err.to_string(),
            "gesture `zoom` made an illegal transition from not-detected to completed"
        );
    }
}
