//! Linear interpolation helpers
//!
//! `progress` is never clamped: values outside `0.0..=1.0` extrapolate past
//! the bounds, which is what overshooting easings (elastic, bezier) rely on.

/// Types that can be linearly interpolated towards another value
pub trait Interpolate: Sized {
    /// Value at `progress` between `self` (0.0) and `to` (1.0)
    fn interpolate(&self, to: &Self, progress: f64) -> Self;
}

/// Linear interpolation between two scalars
#[inline]
pub fn interpolate(progress: f64, from: f64, to: f64) -> f64 {
    from + (to - from) * progress
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, progress: f64) -> Self {
        interpolate(progress, *self, *to)
    }
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, progress: f64) -> Self {
        interpolate(progress, *self as f64, *to as f64) as f32
    }
}

impl<T: Interpolate + Copy, const N: usize> Interpolate for [T; N] {
    fn interpolate(&self, to: &Self, progress: f64) -> Self {
        let mut out = *self;
        for (slot, target) in out.iter_mut().zip(to) {
            *slot = slot.interpolate(target, progress);
        }
        out
    }
}

/// Element-wise interpolation of two numeric sequences.
///
/// The output always has the length of `from`. Elements of `from` without a
/// counterpart in `to` keep their starting value.
pub fn interpolate_array(progress: f64, from: &[f64], to: &[f64]) -> Vec<f64> {
    from.iter()
        .enumerate()
        .map(|(i, &a)| match to.get(i) {
            Some(&b) => interpolate(progress, a, b),
            None => a,
        })
        .collect()
}
