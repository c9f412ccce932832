//! Self-rescheduling frame loop with explicit cancellation.
//!
//! The display refresh drives everything: each frame asks the
//! [`FrameScheduler`] for the next one at the end of its own run. The loop
//! keeps going until a [`CancelHandle`] stops it; the flag is checked before
//! every frame and again before every reschedule.
//!
//! ```ignore
//! let mut frames = FrameLoop::new();
//! let stop = frames.cancel_handle();
//! frames.start(&window);
//!
//! // on each redraw
//! frames.tick(&window, |_frame| renderer.render_frame(&mut field, theme, &mut canvas));
//!
//! // from anywhere, any thread
//! stop.cancel();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something that can call back once before the next repaint.
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl FrameScheduler for winit::window::Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Arc<S> {
    fn request_frame(&self) {
        (**self).request_frame();
    }
}

/// Shared stop switch for a [`FrameLoop`]. Cheap to clone, `Send + Sync`.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    running: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Stop the loop. Takes effect before the next frame or reschedule.
    pub fn cancel(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.running.load(Ordering::Acquire)
    }
}

/// Frame counter plus running flag.
#[derive(Debug)]
pub struct FrameLoop {
    running: Arc<AtomicBool>,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            frames: 0,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            running: Arc::clone(&self.running),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop from the owning side; same as [`CancelHandle::cancel`].
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Ask for the first frame. Returns `false` if already cancelled.
    pub fn start<S: FrameScheduler + ?Sized>(&self, scheduler: &S) -> bool {
        if !self.is_running() {
            return false;
        }
        scheduler.request_frame();
        true
    }

    /// Run one frame and schedule the next.
    ///
    /// `frame` receives the zero-based frame index. Returns whether another
    /// frame was scheduled; a cancelled loop runs nothing and returns `false`.
    pub fn tick<S, F>(&mut self, scheduler: &S, frame: F) -> bool
    where
        S: FrameScheduler + ?Sized,
        F: FnOnce(u64),
    {
        if !self.is_running() {
            return false;
        }
        frame(self.frames);
        self.frames += 1;

        if !self.is_running() {
            tracing::debug!(frames = self.frames, "frame loop stopped");
            return false;
        }
        scheduler.request_frame();
        true
    }
}
