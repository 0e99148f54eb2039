//! Shared simulation parameters mutated by spoken commands.
//!
//! The [`World`](crate::World) owns the only instance; commands reach it
//! through [`World::ingest`](crate::World::ingest) so there is a single
//! writer. Renderer-facing values (background, word height, letter opacity)
//! pass through untouched by the simulation itself.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Lowest allowed speed multiplier.
pub const MIN_SPEED_MULTIPLIER: f32 = 0.1;
/// Highest allowed speed multiplier.
pub const MAX_SPEED_MULTIPLIER: f32 = 5.0;
/// Gain applied by "faster".
pub const FASTER_GAIN: f32 = 1.5;
/// Gain applied by "slower".
pub const SLOWER_GAIN: f32 = 0.67;

/// A single keyword-driven parameter change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamUpdate {
    /// Renderer background color (RGB, 0.0-1.0).
    Background(Vec3),
    /// Glyph height used by the renderer.
    WordHeight(f32),
    /// Glyph alpha used by the renderer.
    LetterOpacity(f32),
    /// Cohesion search radius.
    GroupDistance(f32),
}

/// Process-wide knobs shared by every agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    speed_multiplier: f32,
    frozen: bool,
    group_distance: f32,
    letter_opacity: f32,
    word_height: f32,
    background: Vec3,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            frozen: false,
            group_distance: 8.0,
            letter_opacity: 1.0,
            word_height: 0.5,
            background: Vec3::ZERO,
        }
    }
}

impl SimulationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gain on timers, integration and steering.
    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Set the speed multiplier, clamped to
    /// `[MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER]`.
    pub fn set_speed_multiplier(&mut self, value: f32) {
        self.speed_multiplier = value.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
    }

    pub fn faster(&mut self) {
        self.set_speed_multiplier(self.speed_multiplier * FASTER_GAIN);
    }

    pub fn slower(&mut self) {
        self.set_speed_multiplier(self.speed_multiplier * SLOWER_GAIN);
    }

    pub fn reset_speed(&mut self) {
        self.speed_multiplier = 1.0;
    }

    /// While frozen no timer decrements and no agent moves.
    #[inline]
    pub fn frozen(&self) -> bool {
        self.frozen
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Cohesion search radius.
    #[inline]
    pub fn group_distance(&self) -> f32 {
        self.group_distance
    }

    pub fn set_group_distance(&mut self, distance: f32) {
        self.group_distance = distance;
    }

    #[inline]
    pub fn letter_opacity(&self) -> f32 {
        self.letter_opacity
    }

    pub fn set_letter_opacity(&mut self, opacity: f32) {
        self.letter_opacity = opacity;
    }

    #[inline]
    pub fn word_height(&self) -> f32 {
        self.word_height
    }

    pub fn set_word_height(&mut self, height: f32) {
        self.word_height = height;
    }

    #[inline]
    pub fn background(&self) -> Vec3 {
        self.background
    }

    pub fn set_background(&mut self, color: Vec3) {
        self.background = color;
    }

    /// Apply one keyword update.
    pub fn apply(&mut self, update: ParamUpdate) {
        match update {
            ParamUpdate::Background(color) => self.set_background(color),
            ParamUpdate::WordHeight(height) => self.set_word_height(height),
            ParamUpdate::LetterOpacity(opacity) => self.set_letter_opacity(opacity),
            ParamUpdate::GroupDistance(distance) => self.set_group_distance(distance),
        }
    }
}
