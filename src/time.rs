//! Frame-rate measurement for display.
//!
//! Simulation never reads wall-clock time: particles move a fixed amount per
//! frame. [`FrameClock`] exists only to report frames per second (the
//! windowed runner shows it in the title bar).

use std::time::{Duration, Instant};

/// Counts frames and periodically recomputes FPS.
#[derive(Debug)]
pub struct FrameClock {
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Count a frame. Returns `true` when the FPS figure was refreshed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Count a frame that happened at `now`.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed < self.fps_update_interval {
            return false;
        }
        let frames_since = self.frame_count - self.fps_frame_count;
        self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
        self.fps_frame_count = self.frame_count;
        self.fps_update_time = now;
        true
    }

    /// Total frames counted.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent frames-per-second figure.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
