//! Keyframed scalar curves.
//!
//! Piecewise cubic Hermite curves authored as `(time, value)` keys. Tangents
//! are derived from each key's [`TangentMode`] at evaluation time, so a curve
//! round-trips through TOML as nothing more than its key list.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a key derives the tangents of the segments touching it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TangentMode {
    /// Smooth tangent clamped so the curve never overshoots its keys.
    #[default]
    ClampedAuto,
    /// Straight line to the neighbouring key.
    Linear,
    /// Hold this key's value until the next key (step).
    Constant,
}

/// A single curve key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Keyframe {
    /// Position along the curve's domain.
    pub time: f32,
    /// Curve value at `time`.
    pub value: f32,
    /// Tangent derivation for this key.
    #[serde(default)]
    pub tangent: TangentMode,
}

impl Keyframe {
    /// Key with the default [`TangentMode::ClampedAuto`] tangent.
    #[must_use]
    pub const fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            tangent: TangentMode::ClampedAuto,
        }
    }

    /// Same key with a different tangent mode.
    #[must_use]
    pub const fn with_tangent(mut self, tangent: TangentMode) -> Self {
        self.tangent = tangent;
        self
    }
}

/// Piecewise cubic Hermite curve over sorted keys.
///
/// Evaluation outside the key range clamps to the first/last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct KeyframeCurve {
    keys: Vec<Keyframe>,
}

impl KeyframeCurve {
    /// Build a curve from keys, sorting them by time.
    #[must_use]
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// The curve's keys in time order.
    #[must_use]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Evaluate the curve at `x`.
    ///
    /// An empty curve evaluates to `1.0` everywhere.
    #[must_use]
    pub fn evaluate(&self, x: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last())
        else {
            return 1.0;
        };
        if x.is_nan() || x <= first.time {
            return first.value;
        }
        if x >= last.time {
            return last.value;
        }

        // Index of the first key strictly after x; x is inside the range so
        // this is in 1..len.
        let hi = self.keys.partition_point(|k| k.time <= x);
        let lo = hi - 1;
        let (k0, k1) = (self.keys[lo], self.keys[hi]);

        if k0.tangent == TangentMode::Constant {
            return k0.value;
        }

        let h = k1.time - k0.time;
        if h <= f32::EPSILON {
            return k1.value;
        }
        let s = (x - k0.time) / h;
        let m0 = self.slope(lo, hi);
        let m1 = self.slope(hi, lo);

        let s2 = s * s;
        let s3 = s2 * s;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        // h00 = 1 - h01; written as an offset so flat segments stay exact
        k0.value
            + h01 * (k1.value - k0.value)
            + h10 * h * m0
            + h11 * h * m1
    }

    /// Tangent of key `i` on the segment it shares with key `other`.
    fn slope(&self, i: usize, other: usize) -> f32 {
        let key = self.keys[i];
        let secant = self.secant(i.min(other));
        match key.tangent {
            TangentMode::Linear => secant,
            TangentMode::Constant => 0.0,
            TangentMode::ClampedAuto => {
                if i == 0 || i + 1 == self.keys.len() {
                    return secant;
                }
                let left = self.secant(i - 1);
                let right = self.secant(i);
                if left * right <= 0.0 {
                    // Local extremum or flat neighbour
                    return 0.0;
                }
                let prev = self.keys[i - 1];
                let next = self.keys[i + 1];
                let centered =
                    (next.value - prev.value) / (next.time - prev.time);
                // Fritsch-Carlson bound keeps each segment monotone
                let limit = 3.0 * left.abs().min(right.abs());
                centered.signum() * centered.abs().min(limit)
            }
        }
    }

    /// Slope of the straight line from key `i` to key `i + 1`.
    fn secant(&self, i: usize) -> f32 {
        let (a, b) = (self.keys[i], self.keys[i + 1]);
        let dt = b.time - a.time;
        if dt <= f32::EPSILON {
            0.0
        } else {
            (b.value - a.value) / dt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tent() -> KeyframeCurve {
        KeyframeCurve::new(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.5, 1.0),
            Keyframe::new(1.0, 0.0),
        ])
    }

    #[test]
    fn hits_keys_exactly() {
        let c = tent();
        assert_eq!(c.evaluate(0.0), 0.0);
        assert!((c.evaluate(0.5) - 1.0).abs() < 1e-6);
        assert!(c.evaluate(1.0).abs() < 1e-6);
    }

    #[test]
    fn clamps_outside_domain() {
        let c = tent();
        assert_eq!(c.evaluate(-3.0), 0.0);
        assert_eq!(c.evaluate(7.0), 0.0);
        assert_eq!(c.evaluate(f32::NAN), 0.0);
    }

    #[test]
    fn clamped_auto_does_not_overshoot_peak() {
        let c = tent();
        for i in 0..=100 {
            let v = c.evaluate(i as f32 / 100.0);
            assert!(v <= 1.0 + 1e-5, "overshoot {v} at {i}");
            assert!(v >= -1e-5, "undershoot {v} at {i}");
        }
    }

    #[test]
    fn flat_plateau_stays_flat() {
        let c = KeyframeCurve::new(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.2, 1.0),
            Keyframe::new(0.8, 1.0),
            Keyframe::new(1.0, 0.0),
        ]);
        for i in 20..=80 {
            let v = c.evaluate(i as f32 / 100.0);
            assert!((v - 1.0).abs() < 1e-5, "plateau dipped to {v}");
        }
    }

    #[test]
    fn linear_keys_interpolate_linearly() {
        let c = KeyframeCurve::new(vec![
            Keyframe::new(0.0, 0.0).with_tangent(TangentMode::Linear),
            Keyframe::new(2.0, 4.0).with_tangent(TangentMode::Linear),
        ]);
        assert!((c.evaluate(0.5) - 1.0).abs() < 1e-5);
        assert!((c.evaluate(1.5) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn constant_key_holds_value() {
        let c = KeyframeCurve::new(vec![
            Keyframe::new(0.0, 0.25).with_tangent(TangentMode::Constant),
            Keyframe::new(1.0, 1.0),
        ]);
        assert_eq!(c.evaluate(0.99), 0.25);
        assert_eq!(c.evaluate(1.0), 1.0);
    }

    #[test]
    fn keys_are_sorted_on_construction() {
        let c = KeyframeCurve::new(vec![
            Keyframe::new(1.0, 0.0),
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.5, 1.0),
        ]);
        let times: Vec<f32> = c.keys().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn empty_curve_is_neutral() {
        assert_eq!(KeyframeCurve::new(Vec::new()).evaluate(0.3), 1.0);
    }
}
