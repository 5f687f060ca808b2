//! Bundled frame hosts
//!
//! [`ManualFrameHost`] runs on a virtual clock that only moves when told to,
//! which makes runs fully deterministic. [`PacedFrameHost`] follows the wall
//! clock and paces frames to a target rate.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};
use tracing::{trace, warn};

use crate::config::HostConfig;
use crate::scheduler::{FrameCallback, FrameHost};

new_key_type! {
    pub struct FrameHandle;
}

/// Pending frame callbacks in request order
#[derive(Default)]
struct FrameQueue {
    callbacks: SlotMap<FrameHandle, FrameCallback>,
    order: VecDeque<FrameHandle>,
}

impl FrameQueue {
    fn push(&mut self, callback: FrameCallback) -> FrameHandle {
        let handle = self.callbacks.insert(callback);
        self.order.push_back(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) -> bool {
        // Stale entries in `order` are skipped on drain
        self.callbacks.remove(handle).is_some()
    }

    /// Take every queued callback, leaving the queue empty for re-requests
    fn drain(&mut self) -> Vec<FrameCallback> {
        let order = std::mem::take(&mut self.order);
        order
            .into_iter()
            .filter_map(|handle| self.callbacks.remove(handle))
            .collect()
    }

    fn len(&self) -> usize {
        self.callbacks.len()
    }
}

/// Fire everything queued so far with `time`; returns how many callbacks ran
fn dispatch(queue: &RefCell<FrameQueue>, time: f64) -> usize {
    let due = queue.borrow_mut().drain();
    let fired = due.len();
    for callback in due {
        callback(time);
    }
    trace!(time, fired, "frame dispatched");
    fired
}

/// Deterministic host driven by explicit steps
pub struct ManualFrameHost {
    now: Cell<f64>,
    frame_interval: f64,
    queue: RefCell<FrameQueue>,
}

impl ManualFrameHost {
    pub fn new() -> Self {
        Self::with_config(&HostConfig::default())
    }

    pub fn with_config(config: &HostConfig) -> Self {
        Self {
            now: Cell::new(config.start_time_ms),
            frame_interval: config.frame_interval_ms,
            queue: RefCell::new(FrameQueue::default()),
        }
    }

    /// Virtual time added by each [`step`](Self::step)
    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    /// Advance one frame interval, then fire the callbacks that were pending.
    ///
    /// Callbacks requested while firing wait for the next step.
    pub fn step(&self) -> usize {
        self.advance(self.frame_interval)
    }

    pub fn step_n(&self, count: usize) {
        for _ in 0..count {
            self.step();
        }
    }

    /// Advance the clock by `ms` and dispatch one frame
    pub fn advance(&self, ms: f64) -> usize {
        let time = self.now.get() + ms;
        self.now.set(time);
        dispatch(&self.queue, time)
    }

    /// Step until no frame is pending or `max_frames` steps were taken.
    ///
    /// Returns the number of steps taken.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.pending_frames() > 0 && frames < max_frames {
            self.step();
            frames += 1;
        }
        if self.pending_frames() > 0 {
            warn!(
                max_frames,
                pending = self.pending_frames(),
                "frame cap reached with callbacks still pending"
            );
        }
        frames
    }

    pub fn pending_frames(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Default for ManualFrameHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHost for ManualFrameHost {
    type Handle = FrameHandle;

    fn now(&self) -> f64 {
        self.now.get()
    }

    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        self.queue.borrow_mut().push(callback)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().cancel(handle);
    }
}

/// Wall-clock host that paces frames to a target rate
pub struct PacedFrameHost {
    epoch: Instant,
    last_frame: Cell<Instant>,
    target_fps: Cell<u32>,
    queue: RefCell<FrameQueue>,
}

impl PacedFrameHost {
    pub fn new() -> Self {
        Self::with_config(&HostConfig::default())
    }

    pub fn with_config(config: &HostConfig) -> Self {
        let now = Instant::now();
        Self {
            epoch: now,
            last_frame: Cell::new(now),
            target_fps: Cell::new(config.target_fps.max(1)),
            queue: RefCell::new(FrameQueue::default()),
        }
    }

    pub fn set_target_fps(&self, fps: u32) {
        self.target_fps.set(fps.max(1));
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps.get()
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.target_fps.get() as u64)
    }

    /// Dispatch one frame immediately
    pub fn tick(&self) -> usize {
        self.last_frame.set(Instant::now());
        dispatch(&self.queue, self.now())
    }

    /// Sleep to each frame boundary and dispatch until nothing is pending or
    /// `max_frames` frames ran. Returns the number of frames.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.pending_frames() > 0 && frames < max_frames {
            let next = self.last_frame.get() + self.frame_interval();
            let now = Instant::now();
            if next > now {
                std::thread::sleep(next - now);
            }
            self.tick();
            frames += 1;
        }
        if self.pending_frames() > 0 {
            warn!(
                max_frames,
                pending = self.pending_frames(),
                "frame cap reached with callbacks still pending"
            );
        }
        frames
    }

    pub fn pending_frames(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Default for PacedFrameHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHost for PacedFrameHost {
    type Handle = FrameHandle;

    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        self.queue.borrow_mut().push(callback)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().cancel(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder(host: &Rc<ManualFrameHost>, log: &Rc<RefCell<Vec<f64>>>) -> FrameHandle {
        let sink = log.clone();
        host.request_frame(Box::new(move |t| sink.borrow_mut().push(t)))
    }

    #[test]
    fn test_step_fires_with_advanced_time() {
        let host = Rc::new(ManualFrameHost::with_config(&HostConfig {
            frame_interval_ms: 10.0,
            start_time_ms: 100.0,
            ..HostConfig::default()
        }));
        let log = Rc::new(RefCell::new(Vec::new()));
        recorder(&host, &log);
        recorder(&host, &log);

        assert_eq!(host.now(), 100.0);
        assert_eq!(host.step(), 2);
        assert_eq!(*log.borrow(), vec![110.0, 110.0]);
        assert_eq!(host.step(), 0);
        assert_eq!(host.now(), 120.0);
    }

    #[test]
    fn test_cancelled_frame_never_fires() {
        let host = Rc::new(ManualFrameHost::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = recorder(&host, &log);
        host.cancel_frame(handle);
        host.cancel_frame(handle);

        assert_eq!(host.pending_frames(), 0);
        host.step();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_rerequest_waits_for_next_step() {
        let host = Rc::new(ManualFrameHost::new());
        let fired = Rc::new(Cell::new(0));
        let (inner_host, counter) = (host.clone(), fired.clone());
        host.request_frame(Box::new(move |_| {
            counter.set(counter.get() + 1);
            let counter = counter.clone();
            inner_host.request_frame(Box::new(move |_| counter.set(counter.get() + 1)));
        }));

        host.step();
        assert_eq!(fired.get(), 1);
        assert_eq!(host.pending_frames(), 1);
        host.step();
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_run_until_idle_respects_cap() {
        let host = Rc::new(ManualFrameHost::new());
        fn forever(host: Rc<ManualFrameHost>) {
            let next = host.clone();
            host.request_frame(Box::new(move |_| forever(next)));
        }
        forever(host.clone());

        assert_eq!(host.run_until_idle(25), 25);
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn test_paced_host_runs_to_idle() {
        let host = Rc::new(PacedFrameHost::new());
        host.set_target_fps(1_000);
        assert_eq!(host.frame_interval(), Duration::from_millis(1));

        let seen = Rc::new(Cell::new(-1.0));
        let sink = seen.clone();
        host.request_frame(Box::new(move |t| sink.set(t)));

        assert_eq!(host.run_until_idle(10), 1);
        assert!(seen.get() >= 0.0);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        let host = PacedFrameHost::new();
        assert_eq!(host.target_fps(), 120);
        host.set_target_fps(0);
        assert_eq!(host.target_fps(), 1);
    }
}
