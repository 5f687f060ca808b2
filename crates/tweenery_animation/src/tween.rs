//! Tweens
//!
//! A [`Tween`] is either a single timed transition ([`TweenUnit`]) or a
//! [`TweenPair`] running two tweens side by side. Both are driven the same
//! way: call [`Tween::reset`] once, then [`Tween::tick`] every frame with the
//! total time elapsed since the run started.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tweenery_animation::{Tween, TweenConfig};
//!
//! let values = Rc::new(RefCell::new(Vec::new()));
//! let sink = values.clone();
//!
//! let mut tween = Tween::builder()
//!     .config(TweenConfig::new().range(0.0, 100.0).duration(100.0))
//!     .on_change(move |value, _| sink.borrow_mut().push(value))
//!     .build();
//!
//! tween.reset();
//! tween.tick(50.0);
//! tween.tick(100.0);
//! assert_eq!(*values.borrow(), vec![50.0, 100.0]);
//! assert!(tween.is_completed());
//! ```

use tracing::trace;

use crate::compose::TweenPair;
use crate::config::TweenConfig;
use crate::direction::Direction;
use crate::easing::Easing;

/// Callback fired once when a tween becomes active
pub type BeginFn<M> = Box<dyn FnMut(&M)>;

/// Callback receiving the current value
pub type ValueFn<M> = Box<dyn FnMut(f64, &M)>;

/// Lifecycle callbacks of a tween. Unset callbacks are no-ops.
pub struct Callbacks<M> {
    begin: Option<BeginFn<M>>,
    update: Option<ValueFn<M>>,
    complete: Option<ValueFn<M>>,
    on_loop: Option<ValueFn<M>>,
    change: Option<ValueFn<M>>,
}

impl<M> Default for Callbacks<M> {
    fn default() -> Self {
        Self {
            begin: None,
            update: None,
            complete: None,
            on_loop: None,
            change: None,
        }
    }
}

impl<M> Callbacks<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// First tick at or after the delay
    pub fn on_begin<F: FnMut(&M) + 'static>(mut self, f: F) -> Self {
        self.begin = Some(Box::new(f));
        self
    }

    /// Every tick that does not end an iteration
    pub fn on_update<F: FnMut(f64, &M) + 'static>(mut self, f: F) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    /// Tick that ends the final iteration
    pub fn on_complete<F: FnMut(f64, &M) + 'static>(mut self, f: F) -> Self {
        self.complete = Some(Box::new(f));
        self
    }

    /// Tick that ends any earlier iteration
    pub fn on_loop<F: FnMut(f64, &M) + 'static>(mut self, f: F) -> Self {
        self.on_loop = Some(Box::new(f));
        self
    }

    /// Every tick that fires update, loop, or complete; runs after them
    pub fn on_change<F: FnMut(f64, &M) + 'static>(mut self, f: F) -> Self {
        self.change = Some(Box::new(f));
        self
    }

    fn fire_begin(&mut self, meta: &M) {
        if let Some(f) = self.begin.as_mut() {
            f(meta);
        }
    }

    fn fire(slot: &mut Option<ValueFn<M>>, value: f64, meta: &M) {
        if let Some(f) = slot.as_mut() {
            f(value, meta);
        }
    }
}

/// Mutable run state of a [`TweenUnit`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunState {
    /// Finished iterations
    pub count: u32,
    pub begun: bool,
    pub completed: bool,
    /// Current value mapping; toggled by alternating directions
    pub reversed: bool,
}

/// A single timed transition between two numbers
pub struct TweenUnit<M = ()> {
    config: TweenConfig,
    delta: f64,
    callbacks: Callbacks<M>,
    meta: M,
    state: RunState,
}

impl<M> TweenUnit<M> {
    pub fn new(config: TweenConfig, callbacks: Callbacks<M>, meta: M) -> Self {
        Self {
            delta: config.delta(),
            state: RunState {
                reversed: config.direction.is_reversed(),
                ..RunState::default()
            },
            config,
            callbacks,
            meta,
        }
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn meta(&self) -> &M {
        &self.meta
    }

    /// Value for a given iteration progress under the current direction
    pub fn value_at(&self, progress: f64) -> f64 {
        let eased = self.config.ease.apply(progress);
        if self.state.reversed {
            1.0 - eased * self.delta + self.config.from
        } else {
            eased * self.delta + self.config.from
        }
    }

    /// Advance to `elapsed` ms since the run started
    pub fn tick(&mut self, elapsed: f64) {
        let elapsed = elapsed - self.config.delay;
        if elapsed < 0.0 {
            return;
        }

        if !self.state.begun {
            self.state.begun = true;
            trace!(delay = self.config.delay, "tween begin");
            self.callbacks.fire_begin(&self.meta);
        }

        let duration = self.config.duration;
        let raw = (elapsed - duration * self.state.count as f64) / duration;
        // NaN from a zero duration passes through unclamped
        let progress = if raw >= 1.0 { 1.0 } else { raw };
        let value = self.value_at(progress);

        if progress == 1.0 {
            if self.config.direction.is_alternate() {
                self.state.reversed = !self.state.reversed;
            }
            self.state.count += 1;

            if self.config.iterations > self.state.count {
                trace!(count = self.state.count, value, "tween loop");
                Callbacks::fire(&mut self.callbacks.on_loop, value, &self.meta);
                Callbacks::fire(&mut self.callbacks.change, value, &self.meta);
            } else {
                trace!(count = self.state.count, value, "tween complete");
                Callbacks::fire(&mut self.callbacks.complete, value, &self.meta);
                Callbacks::fire(&mut self.callbacks.change, value, &self.meta);
                self.state.completed = true;
            }
        } else {
            Callbacks::fire(&mut self.callbacks.update, value, &self.meta);
            Callbacks::fire(&mut self.callbacks.change, value, &self.meta);
        }
    }

    /// Clear run progress. The current `reversed` bit is kept.
    pub fn reset(&mut self) {
        self.state.completed = false;
        self.state.count = 0;
        self.state.begun = false;
    }
}

/// A tween: one unit, or a pair of tweens running concurrently
pub enum Tween<M = ()> {
    Unit(TweenUnit<M>),
    Pair(Box<TweenPair<M>>),
}

impl Tween<()> {
    /// Builder for a tween without meta
    pub fn builder() -> TweenBuilder<()> {
        TweenBuilder::new(())
    }
}

impl<M> Tween<M> {
    /// Builder for a tween whose callbacks receive `meta`
    pub fn builder_with_meta(meta: M) -> TweenBuilder<M> {
        TweenBuilder::new(meta)
    }

    pub fn tick(&mut self, elapsed: f64) {
        match self {
            Tween::Unit(unit) => unit.tick(elapsed),
            Tween::Pair(pair) => pair.tick(elapsed),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Tween::Unit(unit) => unit.reset(),
            Tween::Pair(pair) => pair.reset(),
        }
    }

    pub fn is_completed(&self) -> bool {
        match self {
            Tween::Unit(unit) => unit.state.completed,
            Tween::Pair(pair) => pair.is_completed(),
        }
    }

    /// Delay before this node starts counting (ms)
    pub fn delay(&self) -> f64 {
        match self {
            Tween::Unit(unit) => unit.config.delay,
            Tween::Pair(pair) => pair.delay(),
        }
    }

    /// One iteration for a unit; the longest child span for a pair
    pub fn duration(&self) -> f64 {
        match self {
            Tween::Unit(unit) => unit.config.duration,
            Tween::Pair(pair) => pair.duration(),
        }
    }

    /// Push the start of this node back by `offset` ms
    pub fn shift_delay(&mut self, offset: f64) {
        match self {
            Tween::Unit(unit) => unit.config.delay += offset,
            Tween::Pair(pair) => pair.shift_delay(offset),
        }
    }

    pub fn as_unit(&self) -> Option<&TweenUnit<M>> {
        match self {
            Tween::Unit(unit) => Some(unit),
            Tween::Pair(_) => None,
        }
    }

    pub fn as_pair(&self) -> Option<&TweenPair<M>> {
        match self {
            Tween::Unit(_) => None,
            Tween::Pair(pair) => Some(pair),
        }
    }

    /// Number of units in this tree
    pub fn leaf_count(&self) -> usize {
        match self {
            Tween::Unit(_) => 1,
            Tween::Pair(pair) => pair.a().leaf_count() + pair.b().leaf_count(),
        }
    }
}

impl<M> From<TweenUnit<M>> for Tween<M> {
    fn from(unit: TweenUnit<M>) -> Self {
        Tween::Unit(unit)
    }
}

/// Build a single tween from its parts
pub fn unit<M>(config: TweenConfig, callbacks: Callbacks<M>, meta: M) -> Tween<M> {
    Tween::Unit(TweenUnit::new(config, callbacks, meta))
}

/// Fluent construction of a unit tween
///
/// ```ignore
/// let tween = Tween::builder()
///     .range(0.0, 1.0)
///     .duration(300.0)
///     .iterations(4)
///     .direction(Direction::ALTERNATE)
///     .on_loop(|value, _| println!("turn at {value}"))
///     .build();
/// ```
pub struct TweenBuilder<M = ()> {
    config: TweenConfig,
    callbacks: Callbacks<M>,
    meta: M,
}

impl<M> TweenBuilder<M> {
    pub fn new(meta: M) -> Self {
        Self {
            config: TweenConfig::default(),
            callbacks: Callbacks::default(),
            meta,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: TweenConfig) -> Self {
        self.config = config;
        self
    }

    pub fn range(mut self, from: f64, to: f64) -> Self {
        self.config = self.config.range(from, to);
        self
    }

    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.config = self.config.delay(delay_ms);
        self
    }

    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.config = self.config.duration(duration_ms);
        self
    }

    pub fn iterations(mut self, count: u32) -> Self {
        self.config = self.config.iterations(count);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.config = self.config.direction(direction);
        self
    }

    pub fn ease(mut self, ease: Easing) -> Self {
        self.config = self.config.ease(ease);
        self
    }

    pub fn on_begin<F: FnMut(&M) + 'static>(mut self, f: F) -> Self {
        self.callbacks = self.callbacks.on_begin(f);
        self
    }

    pub fn on_update<F: FnMut(f64, &M) + 'static>(mut self, f: F) -> Self {
        self.callbacks = self.callbacks.on_update(f);
        self
    }

    pub fn on_complete<F: FnMut(f64, &M) + 'static>(mut self, f: F) -> Self {
        self.callbacks = self.callbacks.on_complete(f);
        self
    }

    pub fn on_loop<F: FnMut(f64, &M) + 'static>(mut self, f: F) -> Self {
        self.callbacks = self.callbacks.on_loop(f);
        self
    }

    pub fn on_change<F: FnMut(f64, &M) + 'static>(mut self, f: F) -> Self {
        self.callbacks = self.callbacks.on_change(f);
        self
    }

    pub fn build(self) -> Tween<M> {
        unit(self.config, self.callbacks, self.meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn logged(config: TweenConfig) -> (Tween, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let (b, u, c, l, ch) = (
            log.clone(),
            log.clone(),
            log.clone(),
            log.clone(),
            log.clone(),
        );
        let tween = Tween::builder()
            .config(config)
            .on_begin(move |_| b.borrow_mut().push("begin".into()))
            .on_update(move |v, _| u.borrow_mut().push(format!("update {v}")))
            .on_complete(move |v, _| c.borrow_mut().push(format!("complete {v}")))
            .on_loop(move |v, _| l.borrow_mut().push(format!("loop {v}")))
            .on_change(move |v, _| ch.borrow_mut().push(format!("change {v}")))
            .build();
        (tween, log)
    }

    #[test]
    fn test_forward_run() {
        let (mut tween, log) = logged(TweenConfig::new().range(10.0, 20.0).duration(100.0));
        tween.reset();
        tween.tick(0.0);
        tween.tick(50.0);
        tween.tick(150.0);

        assert_eq!(
            *log.borrow(),
            vec![
                "begin",
                "update 10",
                "change 10",
                "update 15",
                "change 15",
                "complete 20",
                "change 20",
            ]
        );
        assert!(tween.is_completed());
    }

    #[test]
    fn test_delay_holds_everything_back() {
        let (mut tween, log) = logged(TweenConfig::new().delay(100.0));
        tween.reset();
        tween.tick(0.0);
        tween.tick(99.9);
        assert!(log.borrow().is_empty());
        assert_eq!(tween.as_unit().unwrap().state(), RunState::default());

        tween.tick(100.0);
        assert_eq!(log.borrow()[0], "begin");
        assert_eq!(log.borrow()[1], "update 0");
    }

    #[test]
    fn test_begin_fires_once() {
        let (mut tween, log) = logged(TweenConfig::new().iterations(3));
        tween.reset();
        for t in [0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0] {
            tween.tick(t);
        }
        let begins = log.borrow().iter().filter(|l| *l == "begin").count();
        assert_eq!(begins, 1);
    }

    #[test]
    fn test_forward_endpoints_follow_ease() {
        for (_, ease) in Easing::TABLE {
            let tween = TweenUnit::new(
                TweenConfig::new().range(3.0, 7.0).ease(ease),
                Callbacks::<()>::new(),
                (),
            );
            assert_eq!(tween.value_at(0.0), ease.apply(0.0) * 4.0 + 3.0);
            assert_eq!(tween.value_at(1.0), ease.apply(1.0) * 4.0 + 3.0);
        }
    }

    #[test]
    fn test_reversed_terminal_value() {
        let (mut tween, log) = logged(
            TweenConfig::new()
                .range(2.0, 5.0)
                .direction(Direction::BACKWARD)
                .ease(Easing::Cubic),
        );
        tween.reset();
        tween.tick(200.0);
        let expected = 1.0 - Easing::Cubic.apply(1.0) * 3.0 + 2.0;
        assert_eq!(log.borrow()[1], format!("complete {expected}"));
    }

    #[test]
    fn test_loop_then_complete() {
        let (mut tween, log) = logged(TweenConfig::new().iterations(2).duration(100.0));
        tween.reset();
        tween.tick(100.0);
        tween.tick(150.0);
        tween.tick(200.0);

        assert_eq!(
            *log.borrow(),
            vec![
                "begin",
                "loop 1",
                "change 1",
                "update 0.5",
                "change 0.5",
                "complete 1",
                "change 1",
            ]
        );
        assert_eq!(tween.as_unit().unwrap().state().count, 2);
    }

    #[test]
    fn test_iteration_rebased_on_count() {
        // A late frame finishes iteration one; the next iteration is measured
        // from count * duration, not from when the loop fired.
        let (mut tween, log) = logged(TweenConfig::new().iterations(2).duration(100.0));
        tween.reset();
        tween.tick(130.0);
        tween.tick(160.0);
        assert_eq!(log.borrow()[3], "update 0.6");
    }

    #[test]
    fn test_alternate_flips_each_iteration() {
        let (mut tween, log) = logged(
            TweenConfig::new()
                .iterations(4)
                .duration(10.0)
                .direction(Direction::ALTERNATE),
        );
        tween.reset();
        for t in [10.0, 20.0, 30.0, 40.0] {
            tween.tick(t);
        }
        let ends: Vec<_> = log
            .borrow()
            .iter()
            .filter(|l| l.starts_with("loop") || l.starts_with("complete"))
            .cloned()
            .collect();
        assert_eq!(ends, vec!["loop 1", "loop 0", "loop 1", "complete 0"]);
    }

    #[test]
    fn test_reset_keeps_direction_flip() {
        let mut tween = Tween::builder()
            .direction(Direction::ALTERNATE)
            .build();
        tween.reset();
        tween.tick(200.0);
        assert!(tween.is_completed());
        assert!(tween.as_unit().unwrap().state().reversed);

        tween.reset();
        let state = tween.as_unit().unwrap().state();
        assert!(!state.completed && !state.begun && state.count == 0);
        assert!(state.reversed);
    }

    #[test]
    fn test_reset_on_fresh_tween_is_noop() {
        let (mut fresh, fresh_log) = logged(TweenConfig::new());
        let (mut reset, reset_log) = logged(TweenConfig::new());
        reset.reset();
        reset.reset();
        assert_eq!(
            fresh.as_unit().unwrap().state(),
            reset.as_unit().unwrap().state()
        );

        fresh.tick(80.0);
        reset.tick(80.0);
        assert_eq!(*fresh_log.borrow(), *reset_log.borrow());
    }

    #[test]
    fn test_meta_is_passed_through() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut tween = Tween::builder_with_meta("opacity")
            .on_change(move |v, meta| sink.borrow_mut().push(format!("{meta}={v}")))
            .build();
        tween.reset();
        tween.tick(100.0);
        assert_eq!(*seen.borrow(), vec!["opacity=0.5"]);
        assert_eq!(*tween.as_unit().unwrap().meta(), "opacity");
    }

    #[test]
    fn test_zero_duration_is_not_validated() {
        let (mut tween, log) = logged(TweenConfig::new().duration(0.0));
        tween.reset();
        tween.tick(0.0);
        assert_eq!(log.borrow()[1], "update NaN");
        tween.tick(1.0);
        assert!(tween.is_completed());
    }
}
