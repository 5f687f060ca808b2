//! Frame scheduling
//!
//! [`run`] binds a tween to a [`FrameHost`]: a monotonic clock plus a way to
//! request (and cancel) a callback on the next frame. Every frame the tween is
//! ticked with the time elapsed since the run started, and another frame is
//! requested until the tween completes or the run is unsubscribed.
//!
//! ```rust
//! use std::rc::Rc;
//! use tweenery_animation::{run, ManualFrameHost, Tween};
//!
//! let host = Rc::new(ManualFrameHost::new());
//! let subscription = run(Tween::builder().duration(100.0).build(), host.clone());
//!
//! host.run_until_idle(1_000);
//! assert!(subscription.is_completed());
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::debug;
use tweenery_core::{Error, Result};

use crate::tween::Tween;

/// Callback invoked with the frame timestamp (ms)
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Clock and frame-request capability supplied by the host environment
pub trait FrameHost {
    /// Token identifying a pending frame request
    type Handle: Copy + fmt::Debug;

    /// Monotonic, non-decreasing time in milliseconds
    fn now(&self) -> f64;

    /// Run `callback` once on the next frame boundary
    fn request_frame(&self, callback: FrameCallback) -> Self::Handle;

    /// Drop a pending request; unknown or fired handles are ignored
    fn cancel_frame(&self, handle: Self::Handle);
}

impl<H: FrameHost + ?Sized> FrameHost for Rc<H> {
    type Handle = H::Handle;

    fn now(&self) -> f64 {
        (**self).now()
    }

    fn request_frame(&self, callback: FrameCallback) -> Self::Handle {
        (**self).request_frame(callback)
    }

    fn cancel_frame(&self, handle: Self::Handle) {
        (**self).cancel_frame(handle)
    }
}

struct ActiveRun<M, H: FrameHost> {
    tween: RefCell<Tween<M>>,
    host: Rc<H>,
    start_time: f64,
    pending: Cell<Option<H::Handle>>,
    cancelled: Cell<bool>,
    frames: Cell<u64>,
}

/// Handle to one running tween
///
/// Dropping a subscription does not stop the run; call
/// [`Subscription::unsubscribe`] for that.
pub struct Subscription<M, H: FrameHost> {
    run: Rc<ActiveRun<M, H>>,
}

impl<M: 'static, H: FrameHost + 'static> Subscription<M, H> {
    /// Cancel the pending frame and stop requesting new ones.
    ///
    /// A frame that is already being dispatched still ticks the tween.
    pub fn unsubscribe(&self) {
        self.run.cancelled.set(true);
        if let Some(handle) = self.run.pending.take() {
            debug!(?handle, frames = self.run.frames.get(), "tween run unsubscribed");
            self.run.host.cancel_frame(handle);
        }
    }

    /// Whether the root tween has completed.
    ///
    /// Reports `false` while the tween is being ticked.
    pub fn is_completed(&self) -> bool {
        self.run
            .tween
            .try_borrow()
            .map(|tween| tween.is_completed())
            .unwrap_or(false)
    }

    /// Whether a frame is currently requested for this run
    pub fn is_active(&self) -> bool {
        self.run.pending.get().is_some()
    }

    /// Frames dispatched so far
    pub fn frames(&self) -> u64 {
        self.run.frames.get()
    }

    /// Host time at which the run started
    pub fn start_time(&self) -> f64 {
        self.run.start_time
    }

    /// Inspect the tween.
    ///
    /// # Panics
    /// Panics when called from inside one of the tween's own callbacks.
    pub fn with_tween<R>(&self, f: impl FnOnce(&Tween<M>) -> R) -> R {
        f(&self.run.tween.borrow())
    }
}

/// Drive `tween` from `host` until it completes.
///
/// The tween is reset first, so a finished tween can be run again.
pub fn run<M: 'static, H: FrameHost + 'static>(
    mut tween: Tween<M>,
    host: Rc<H>,
) -> Subscription<M, H> {
    tween.reset();
    let start_time = host.now();
    debug!(start_time, leaves = tween.leaf_count(), "tween run started");

    let active = Rc::new(ActiveRun {
        tween: RefCell::new(tween),
        host,
        start_time,
        pending: Cell::new(None),
        cancelled: Cell::new(false),
        frames: Cell::new(0),
    });
    request_next(&active);

    Subscription { run: active }
}

/// [`run`] on a host assembled from closures; fails if a capability is missing
pub fn run_with<M: 'static>(
    tween: Tween<M>,
    deps: Dependencies,
) -> Result<Subscription<M, FnFrameHost>> {
    let host = deps.into_host()?;
    Ok(run(tween, Rc::new(host)))
}

fn request_next<M: 'static, H: FrameHost + 'static>(active: &Rc<ActiveRun<M, H>>) {
    let next = Rc::clone(active);
    let handle = active
        .host
        .request_frame(Box::new(move |time| on_frame(&next, time)));
    active.pending.set(Some(handle));
}

fn on_frame<M: 'static, H: FrameHost + 'static>(active: &Rc<ActiveRun<M, H>>, time: f64) {
    active.pending.set(None);
    // Hosts without cancellation still deliver the frame requested before
    // unsubscribe
    if active.cancelled.get() {
        debug!(frames = active.frames.get(), "dropped frame after unsubscribe");
        return;
    }
    let elapsed = (time - active.start_time).max(0.0);

    let completed = {
        let mut tween = active.tween.borrow_mut();
        tween.tick(elapsed);
        tween.is_completed()
    };
    let frames = active.frames.get() + 1;
    active.frames.set(frames);

    if completed {
        debug!(frames, elapsed, "tween run completed");
    } else if active.cancelled.get() {
        debug!(frames, elapsed, "tween run cancelled during frame");
    } else {
        request_next(active);
    }
}

type NowFn = Box<dyn Fn() -> f64>;
type RequestFrameFn = Box<dyn Fn(FrameCallback) -> u64>;
type CancelFrameFn = Box<dyn Fn(u64)>;

/// Scheduling capabilities given as closures, for hosts that expose plain
/// functions (a browser's `requestAnimationFrame`, an engine's frame hook)
///
/// `now` and `request_frame` are required. `cancel_frame` is optional; without
/// it an unsubscribed run simply ignores the frame it had already requested.
#[derive(Default)]
pub struct Dependencies {
    now: Option<NowFn>,
    request_frame: Option<RequestFrameFn>,
    cancel_frame: Option<CancelFrameFn>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now<F: Fn() -> f64 + 'static>(mut self, f: F) -> Self {
        self.now = Some(Box::new(f));
        self
    }

    pub fn request_frame<F: Fn(FrameCallback) -> u64 + 'static>(mut self, f: F) -> Self {
        self.request_frame = Some(Box::new(f));
        self
    }

    pub fn cancel_frame<F: Fn(u64) + 'static>(mut self, f: F) -> Self {
        self.cancel_frame = Some(Box::new(f));
        self
    }

    /// Check that the required capabilities are present
    pub fn into_host(self) -> Result<FnFrameHost> {
        Ok(FnFrameHost {
            now: self.now.ok_or(Error::MissingCapability("now"))?,
            request_frame: self
                .request_frame
                .ok_or(Error::MissingCapability("request_frame"))?,
            cancel_frame: self.cancel_frame,
        })
    }
}

/// [`FrameHost`] backed by closures; built by [`Dependencies::into_host`]
pub struct FnFrameHost {
    now: NowFn,
    request_frame: RequestFrameFn,
    cancel_frame: Option<CancelFrameFn>,
}

impl FrameHost for FnFrameHost {
    type Handle = u64;

    fn now(&self) -> f64 {
        (self.now)()
    }

    fn request_frame(&self, callback: FrameCallback) -> u64 {
        (self.request_frame)(callback)
    }

    fn cancel_frame(&self, handle: u64) {
        if let Some(cancel) = &self.cancel_frame {
            cancel(handle);
        }
    }
}
