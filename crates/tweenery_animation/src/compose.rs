//! Composition of tweens
//!
//! Tweens combine into a binary tree of [`TweenPair`]s. A pair forwards time
//! to both children and completes once both have. Sequencing is expressed
//! purely through delays: [`sequence`] pushes every tween back by the span of
//! everything before it and merges the result.

use tracing::debug;
use tweenery_core::{Error, Result};

use crate::tween::Tween;

/// Two tweens running concurrently
pub struct TweenPair<M = ()> {
    a: Tween<M>,
    b: Tween<M>,
    delay: f64,
    /// Longest `delay + duration` of the two children. Informational only;
    /// completion follows the children.
    duration: f64,
    completed: bool,
}

impl<M> TweenPair<M> {
    pub fn new(a: Tween<M>, b: Tween<M>) -> Self {
        let duration = (a.duration() + a.delay()).max(b.duration() + b.delay());
        Self {
            a,
            b,
            delay: 0.0,
            duration,
            completed: false,
        }
    }

    pub fn a(&self) -> &Tween<M> {
        &self.a
    }

    pub fn b(&self) -> &Tween<M> {
        &self.b
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn shift_delay(&mut self, offset: f64) {
        self.delay += offset;
    }

    /// Forward time to every child that has not completed yet
    pub fn tick(&mut self, elapsed: f64) {
        let elapsed = elapsed - self.delay;
        if elapsed < 0.0 {
            return;
        }

        if !self.a.is_completed() {
            self.a.tick(elapsed);
        }
        if !self.b.is_completed() {
            self.b.tick(elapsed);
        }

        self.completed = self.a.is_completed() && self.b.is_completed();
    }

    pub fn reset(&mut self) {
        self.a.reset();
        self.b.reset();
        self.completed = false;
    }
}

/// Run `a` and `b` concurrently
pub fn merge<M>(a: Tween<M>, b: Tween<M>) -> Tween<M> {
    Tween::Pair(Box::new(TweenPair::new(a, b)))
}

/// Left-fold a list of tweens into nested pairs.
///
/// One tween is returned unchanged; an empty list is an error.
pub fn merge_all<M>(tweens: impl IntoIterator<Item = Tween<M>>) -> Result<Tween<M>> {
    tweens
        .into_iter()
        .reduce(merge)
        .ok_or(Error::EmptyComposition)
}

/// Chain tweens one after another.
///
/// Each tween's delay grows by the `delay + duration` of its (already
/// shifted) predecessor, so it starts when the previous one ends.
pub fn sequence<M>(tweens: impl IntoIterator<Item = Tween<M>>) -> Result<Tween<M>> {
    let mut previous_end: Option<f64> = None;
    let shifted: Vec<Tween<M>> = tweens
        .into_iter()
        .map(|mut tween| {
            if let Some(end) = previous_end {
                tween.shift_delay(end);
            }
            previous_end = Some(tween.delay() + tween.duration());
            tween
        })
        .collect();

    debug!(
        len = shifted.len(),
        end = previous_end.unwrap_or(0.0),
        "sequenced tweens"
    );
    merge_all(shifted)
}
