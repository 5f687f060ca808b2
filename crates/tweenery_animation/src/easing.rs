//! Easing functions for tweens
//!
//! Easings reshape linear progress in `0.0..=1.0`. Outputs are not bounded to
//! that range: `EaseOutElastic` and some bezier curves overshoot.

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tweenery_core::Error;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Easing {
    #[default]
    Linear,
    Squared,
    Cubic,
    Quart,
    Quint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseOutElastic,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f64, f64, f64, f64),
    /// Caller-supplied curve; not serializable
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Named easings, in table order
    pub const TABLE: [(&'static str, Easing); 8] = [
        ("LINEAR", Easing::Linear),
        ("SQUARED", Easing::Squared),
        ("CUBIC", Easing::Cubic),
        ("QUART", Easing::Quart),
        ("QUINT", Easing::Quint),
        ("EASE_OUT_QUINT", Easing::EaseOutQuint),
        ("EASE_IN_OUT_QUINT", Easing::EaseInOutQuint),
        ("EASE_OUT_ELASTIC", Easing::EaseOutElastic),
    ];

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::Squared => t.powi(2),
            Easing::Cubic => t.powi(3),
            Easing::Quart => t.powi(4),
            Easing::Quint => t.powi(5),
            Easing::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Easing::EaseOutElastic => {
                let c4 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
            Easing::Custom(f) => f(t),
        }
    }

    /// Table name of this easing, if it has one
    pub fn name(&self) -> Option<&'static str> {
        Self::TABLE
            .iter()
            .find(|(_, easing)| std::mem::discriminant(easing) == std::mem::discriminant(self))
            .map(|(name, _)| *name)
    }
}

impl FromStr for Easing {
    type Err = Error;

    /// Look up a table entry; case-insensitive, `-` and `_` are interchangeable
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, easing)| *easing)
            .ok_or_else(|| Error::UnknownEasing(s.to_string()))
    }
}

/// Cubic bezier easing calculation (matches CSS / browser implementations).
///
/// Newton-Raphson with a binary-search fallback when the slope is too flat.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut p = t;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - t;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2);
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = t;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - t).abs() < 1e-7 {
            break;
        }
        if val < t {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2)
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³, in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
