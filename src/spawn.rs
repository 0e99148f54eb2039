//! Word formation layout and agent spawning.
//!
//! Each word of an utterance gets its own row, stacked downward from
//! `start_y`. Every row is centered on x = 0 independently:
//!
//! ```text
//!   row 0 (y = 2.0)        c   a   t
//!   row 1 (y = 1.0)        d   o   g
//!                  x:   -0.9 -0.3 0.3
//! ```
//!
//! Rows are never wrapped or limited; long transcripts keep growing downward.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::lifecycle::Lifecycle;

/// Formation layout parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordLayout {
    /// Horizontal distance between letters.
    pub letter_spacing: f32,
    /// Y coordinate of the first row.
    pub start_y: f32,
    /// Vertical distance between rows.
    pub row_spacing: f32,
}

impl Default for WordLayout {
    fn default() -> Self {
        Self {
            letter_spacing: 0.6,
            start_y: 2.0,
            row_spacing: 1.0,
        }
    }
}

impl WordLayout {
    /// Position of letter `column` in a word of `len` letters on `row`.
    pub fn slot(&self, row: usize, column: usize, len: usize) -> Vec3 {
        let width = len as f32 * self.letter_spacing;
        let left = -width / 2.0;
        Vec3::new(
            left + column as f32 * self.letter_spacing,
            self.start_y - row as f32 * self.row_spacing,
            0.0,
        )
    }

    /// Every letter of `words` with its formation slot, in reading order.
    pub fn positions<S: AsRef<str>>(&self, words: &[S]) -> Vec<(char, Vec3)> {
        let mut slots = Vec::new();
        for (row, word) in words.iter().enumerate() {
            let word = word.as_ref();
            let len = word.chars().count();
            for (column, letter) in word.chars().enumerate() {
                slots.push((letter, self.slot(row, column, len)));
            }
        }
        slots
    }
}

/// Builds forming agents from words.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spawner {
    layout: WordLayout,
    lifecycle: Lifecycle,
}

impl Spawner {
    pub fn new(layout: WordLayout, lifecycle: Lifecycle) -> Self {
        Self { layout, lifecycle }
    }

    pub fn layout(&self) -> &WordLayout {
        &self.layout
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// One forming agent per letter, parked on its slot with a fresh
    /// separation delay.
    pub fn spawn<S: AsRef<str>, R: Rng>(&self, words: &[S], rng: &mut R) -> Vec<Agent> {
        self.layout
            .positions(words)
            .into_iter()
            .map(|(letter, slot)| Agent::new(letter, slot, self.lifecycle.sample_delay(rng)))
            .collect()
    }
}
