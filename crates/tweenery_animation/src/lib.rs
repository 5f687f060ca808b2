//! Tweenery Animation
//!
//! Time-based numeric tweens, their composition, and frame scheduling.
//!
//! # Features
//!
//! - **Tweens**: `from → to` over a duration, with delay, iterations, easing,
//!   and reversed/alternating directions
//! - **Composition**: run tweens concurrently (`merge`, `merge_all`) or one
//!   after another (`sequence`)
//! - **Scheduling**: drive a tween from any frame source through [`FrameHost`]
//! - **Hosts**: a deterministic virtual-clock host and a paced wall-clock host
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use tweenery_animation::{merge_all, run, sequence, Easing, ManualFrameHost, Tween};
//!
//! let fade = Tween::builder().duration(300.0).ease(Easing::EaseOutQuint).build();
//! let slide = sequence(vec![
//!     Tween::builder().range(0.0, 40.0).build(),
//!     Tween::builder().range(40.0, 0.0).build(),
//! ])
//! .unwrap();
//!
//! let host = Rc::new(ManualFrameHost::new());
//! let subscription = run(merge_all(vec![fade, slide]).unwrap(), host.clone());
//! host.run_until_idle(1_000);
//! assert!(subscription.is_completed());
//! ```

pub mod compose;
pub mod config;
pub mod direction;
pub mod easing;
pub mod host;
pub mod presets;
pub mod scheduler;
pub mod tween;

pub use compose::{merge, merge_all, sequence, TweenPair};
pub use config::{HostConfig, TweenConfig};
pub use direction::Direction;
pub use easing::Easing;
pub use host::{FrameHandle, ManualFrameHost, PacedFrameHost};
pub use presets::TweenPreset;
pub use scheduler::{
    run, run_with, Dependencies, FnFrameHost, FrameCallback, FrameHost, Subscription,
};
pub use tween::{unit, Callbacks, RunState, Tween, TweenBuilder, TweenUnit};

pub use tweenery_core::{
    compute_transform, interpolate, interpolate_array, interpolate_path, Error, Interpolate,
    Result,
};
