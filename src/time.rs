//! Time facilities.
//!
//! Two clocks live here:
//!
//! - [`SimClock`]: scaled simulation time. Advances by `dt * speed_multiplier`
//!   and stands still while frozen. This is the time renderers animate with.
//! - [`FrameClock`]: host wall-clock timing for a driver loop, with an optional
//!   fixed delta for deterministic runs.
//!
//! # Example
//!
//! ```ignore
//! use wordswarm::time::FrameClock;
//!
//! let mut clock = FrameClock::fixed(60.0);
//!
//! loop {
//!     let dt = clock.update();
//!     world.tick(dt);
//!     println!("Frame: {} FPS: {:.1}", clock.frame(), clock.fps());
//! }
//! ```

use std::time::{Duration, Instant};

use crate::params::SimulationParameters;

/// Scaled simulation time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimClock {
    elapsed: f32,
    ticks: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of host time `dt`.
    pub fn advance(&mut self, dt: f32, params: &SimulationParameters) {
        self.ticks += 1;
        if !params.frozen() {
            self.elapsed += dt * params.speed_multiplier();
        }
    }

    /// Simulation seconds elapsed.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ticks processed, frozen or not.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Host frame timing for driver loops.
#[derive(Debug)]
pub struct FrameClock {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in seconds.
    delta_secs: f32,
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
    /// Fixed delta time for deterministic updates (optional).
    fixed_delta: Option<f32>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a wall-clock timer starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            fixed_delta: None,
        }
    }

    /// A clock that always reports `1 / fps` as its delta.
    pub fn fixed(fps: f32) -> Self {
        let mut clock = Self::new();
        clock.fixed_delta = Some(1.0 / fps);
        clock
    }

    /// The fixed delta, if any.
    pub fn fixed_delta(&self) -> Option<f32> {
        self.fixed_delta
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns the delta time in seconds.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta);
        self.last_frame = now;

        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
