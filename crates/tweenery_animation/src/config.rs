//! Tween and frame-host configuration
//!
//! Both structs deserialize with defaults for every missing field, so a config
//! file only needs to name what it changes:
//!
//! ```rust
//! use tweenery_animation::{Easing, TweenConfig};
//!
//! let cfg: TweenConfig =
//!     serde_json::from_str(r#"{ "to": 100.0, "ease": "EASE_OUT_QUINT" }"#).unwrap();
//! assert_eq!(cfg.duration, 200.0);
//! assert!(matches!(cfg.ease, Easing::EaseOutQuint));
//! ```

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::easing::Easing;

/// Immutable parameters of a single tween
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Value at progress 0
    pub from: f64,
    /// Value at progress 1
    pub to: f64,
    /// Milliseconds before the tween starts counting
    pub delay: f64,
    /// Milliseconds per iteration
    pub duration: f64,
    /// Number of iterations (at least 1)
    pub iterations: u32,
    pub direction: Direction,
    pub ease: Easing,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            delay: 0.0,
            duration: 200.0,
            iterations: 1,
            direction: Direction::FORWARD,
            ease: Easing::Linear,
        }
    }
}

impl TweenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both interpolation bounds
    pub fn range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Set delay before the tween starts (ms)
    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.delay = delay_ms;
        self
    }

    /// Set duration of one iteration (ms)
    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.duration = duration_ms;
        self
    }

    pub fn iterations(mut self, count: u32) -> Self {
        self.iterations = count;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn ease(mut self, ease: Easing) -> Self {
        self.ease = ease;
        self
    }

    /// `to - from`
    pub fn delta(&self) -> f64 {
        self.to - self.from
    }
}

/// Frame timing for the bundled frame hosts
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Virtual time added per frame by `ManualFrameHost::step`
    pub frame_interval_ms: f64,
    /// Virtual clock value before the first step
    pub start_time_ms: f64,
    /// Frame rate targeted by `PacedFrameHost`
    pub target_fps: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 1000.0 / 60.0,
            start_time_ms: 0.0,
            target_fps: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = TweenConfig::default();
        assert_eq!((cfg.from, cfg.to), (0.0, 1.0));
        assert_eq!(cfg.duration, 200.0);
        assert_eq!(cfg.iterations, 1);
        assert_eq!(cfg.direction, Direction::FORWARD);
        assert!(matches!(cfg.ease, Easing::Linear));
    }

    #[test]
    fn test_builder() {
        let cfg = TweenConfig::new()
            .range(10.0, -10.0)
            .delay(50.0)
            .duration(100.0)
            .iterations(3)
            .direction(Direction::ALTERNATE);
        assert_eq!(cfg.delta(), -20.0);
        assert_eq!((cfg.delay, cfg.duration, cfg.iterations), (50.0, 100.0, 3));
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: TweenConfig = serde_json::from_str(
            r#"{ "iterations": 4, "direction": { "alternate": true }, "ease": "QUART" }"#,
        )
        .unwrap();
        assert_eq!(cfg.iterations, 4);
        assert_eq!(cfg.direction, Direction::ALTERNATE);
        assert!(matches!(cfg.ease, Easing::Quart));
        assert_eq!(cfg.to, 1.0);

        let host: HostConfig = serde_json::from_str(r#"{ "target_fps": 30 }"#).unwrap();
        assert_eq!(host.target_fps, 30);
        assert_eq!(host.frame_interval_ms, 1000.0 / 60.0);
    }
}
