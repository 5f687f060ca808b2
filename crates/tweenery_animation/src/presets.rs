//! Tween presets for common entry/exit animations
//!
//! Each preset is a plain [`TweenConfig`], so it can be tweaked further before
//! being handed to a builder.

use crate::config::TweenConfig;
use crate::direction::Direction;
use crate::easing::Easing;

/// Pre-built tween configurations
pub struct TweenPreset;

impl TweenPreset {
    /// Opacity 0 to 1
    pub fn fade_in(duration_ms: f64) -> TweenConfig {
        TweenConfig::new()
            .range(0.0, 1.0)
            .duration(duration_ms)
            .ease(Easing::EaseOutQuint)
    }

    /// Opacity 1 to 0
    pub fn fade_out(duration_ms: f64) -> TweenConfig {
        TweenConfig::new()
            .range(1.0, 0.0)
            .duration(duration_ms)
            .ease(Easing::Squared)
    }

    /// 0 to 1 and back to 0 over `duration_ms`.
    ///
    /// Stays on the unit range: the reversed mapping is `1 - eased * delta +
    /// from`, which only mirrors the forward leg when `from` is 0 and `to` is 1.
    pub fn pulse(duration_ms: f64) -> TweenConfig {
        TweenConfig::new()
            .range(0.0, 1.0)
            .duration(duration_ms / 2.0)
            .iterations(2)
            .direction(Direction::ALTERNATE)
            .ease(Easing::EaseInOutQuint)
    }

    /// Scale in with an elastic overshoot
    pub fn pop(duration_ms: f64) -> TweenConfig {
        TweenConfig::new()
            .range(0.0, 1.0)
            .duration(duration_ms)
            .ease(Easing::EaseOutElastic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tween;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_fade_directions() {
        assert_eq!(TweenPreset::fade_in(300.0).delta(), 1.0);
        assert_eq!(TweenPreset::fade_out(300.0).delta(), -1.0);
    }

    #[test]
    fn test_pulse_returns_to_start() {
        let ends = Rc::new(RefCell::new(Vec::new()));
        let (l, c) = (ends.clone(), ends.clone());
        let mut tween = Tween::builder()
            .config(TweenPreset::pulse(200.0))
            .on_loop(move |v, _| l.borrow_mut().push(v))
            .on_complete(move |v, _| c.borrow_mut().push(v))
            .build();
        tween.reset();
        tween.tick(100.0);
        tween.tick(200.0);

        assert!(tween.is_completed());
        assert_eq!(*ends.borrow(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_pop_lands_on_target() {
        let config = TweenPreset::pop(400.0);
        assert!((config.ease.apply(1.0) * config.delta() + config.from - 1.0).abs() < 1e-9);
        assert!(config.ease.apply(0.1) > 1.0);
    }
}
