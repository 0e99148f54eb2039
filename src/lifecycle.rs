//! Letter lifecycle timing.
//!
//! A letter spends a random delay holding its place in the spoken word, then
//! breaks away and flocks for the rest of the session. This module collects
//! the knobs that shape that transition.
//!
//! # Quick Start
//!
//! ```ignore
//! let lifecycle = Lifecycle::new()
//!     .separation_delay(1.0..2.0)   // Break apart sooner
//!     .formation_pull(0.05)         // Snap into words faster
//!     .launch_speed(3.0);           // Burst out harder
//! ```

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lifecycle configuration builder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lifecycle {
    /// Seconds a letter holds formation, drawn once per letter from this
    /// half-open range.
    pub separation_delay: Range<f32>,
    /// Fraction of the remaining distance to its slot a forming letter covers
    /// per tick, before the speed multiplier. Not normalized by `dt`.
    pub formation_pull: f32,
    /// Half-range of each launch velocity component on separation.
    pub launch_speed: f32,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            separation_delay: 2.0..5.0,
            formation_pull: 0.02,
            launch_speed: 2.0,
        }
    }
}

impl Lifecycle {
    /// Create a lifecycle with the standard timing.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    /// Set the range the separation delay is drawn from.
    ///
    /// # Example
    ///
    /// ```ignore
    /// l.separation_delay(0.5..1.5)  // Words hold for about a second
    /// ```
    pub fn separation_delay(mut self, seconds: Range<f32>) -> Self {
        self.separation_delay = seconds;
        self
    }

    /// Set the per-tick formation approach fraction.
    pub fn formation_pull(mut self, fraction: f32) -> Self {
        self.formation_pull = fraction;
        self
    }

    /// Set the launch speed half-range.
    pub fn launch_speed(mut self, speed: f32) -> Self {
        self.launch_speed = speed;
        self
    }

    /// Draw a separation delay for a new letter.
    ///
    /// An empty range collapses to its start.
    pub fn sample_delay<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.separation_delay.is_empty() {
            return self.separation_delay.start;
        }
        rng.gen_range(self.separation_delay.clone())
    }
}
