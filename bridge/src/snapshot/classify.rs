//! Update classification
//!
//! Maps a parsed update onto one of the three instrument kinds and
//! computes the value to publish. Pure function of the parsed fields.

use super::types::{ParsedUpdate, SnapshotPayload, UpdateKind};

/// Classify an update and compute its publishable value.
///
/// Returns `None` for a rate update whose interval is zero: dividing by
/// it would publish an infinity artifact instead of a rate, so the
/// sample is discarded and the next reporting interval tries again.
pub fn classify(update: &ParsedUpdate) -> Option<(UpdateKind, f64)> {
    match update.payload {
        SnapshotPayload::Rate {
            increment,
            interval_sec,
        } => {
            if interval_sec == 0.0 {
                return None;
            }
            Some((UpdateKind::RateGauge, round2(increment / interval_sec)))
        }
        SnapshotPayload::Delta { increment } => Some((UpdateKind::CumulativeCounter, increment)),
        SnapshotPayload::Mean { mean } => Some((UpdateKind::MeanGauge, mean)),
    }
}

/// Round to two decimal places, half away from zero
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(payload: SnapshotPayload) -> ParsedUpdate {
        ParsedUpdate {
            source: "src".to_string(),
            name: "x-per-second".to_string(),
            display_name: String::new(),
            display_unit: String::new(),
            counter_type: None,
            payload,
        }
    }

    #[test]
    fn test_rate_divides_and_rounds() {
        let result = classify(&update(SnapshotPayload::Rate {
            increment: 10.0,
            interval_sec: 5.0,
        }));
        assert_eq!(result, Some((UpdateKind::RateGauge, 2.0)));
    }

    #[test]
    fn test_zero_interval_discarded() {
        let result = classify(&update(SnapshotPayload::Rate {
            increment: 10.0,
            interval_sec: 0.0,
        }));
        assert_eq!(result, None);
    }

    #[test]
    fn test_increment_is_cumulative_delta() {
        let result = classify(&update(SnapshotPayload::Delta { increment: 7.0 }));
        assert_eq!(result, Some((UpdateKind::CumulativeCounter, 7.0)));
    }

    #[test]
    fn test_mean_is_absolute_gauge_value() {
        let result = classify(&update(SnapshotPayload::Mean { mean: 42.5 }));
        assert_eq!(result, Some((UpdateKind::MeanGauge, 42.5)));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 12.5 is exactly representable, so this pins the tie-break.
        let result = classify(&update(SnapshotPayload::Rate {
            increment: 0.125,
            interval_sec: 1.0,
        }));
        assert_eq!(result, Some((UpdateKind::RateGauge, 0.13)));

        let result = classify(&update(SnapshotPayload::Rate {
            increment: -0.125,
            interval_sec: 1.0,
        }));
        assert_eq!(result, Some((UpdateKind::RateGauge, -0.13)));
    }

    #[test]
    fn test_rounding_is_deterministic_for_inexact_inputs() {
        // 1.005 has no exact binary representation; the stored value is
        // slightly below the midpoint, so the result is 1.0, always.
        let result = classify(&update(SnapshotPayload::Rate {
            increment: 1.005,
            interval_sec: 1.0,
        }));
        assert_eq!(result, Some((UpdateKind::RateGauge, 1.0)));
    }

    #[test]
    fn test_rate_two_decimal_precision() {
        let result = classify(&update(SnapshotPayload::Rate {
            increment: 1.0,
            interval_sec: 3.0,
        }));
        assert_eq!(result, Some((UpdateKind::RateGauge, 0.33)));
    }
}
