//! Read-only render view of the world.
//!
//! The simulation never draws anything. A renderer asks the
//! [`World`](crate::World) for a [`RenderView`] each frame and turns its
//! [`Glyph`]s into text meshes. Letters are drawn in a default color while
//! forming and in their identity color once separated.
//!
//! # Usage
//!
//! ```ignore
//! let view = world.view();
//! clear(view.background);
//! for glyph in view.glyphs() {
//!     draw_letter(glyph.identity, glyph.position, view.word_height, glyph.color);
//! }
//! ```

use glam::{Vec3, Vec4};

use crate::agent::Agent;

/// Color of forming letters and of separated letters outside `a..=z`.
pub const DEFAULT_LETTER_COLOR: Vec3 = Vec3::ONE;

/// Identity colors for `a` through `z`.
pub const LETTER_PALETTE: [Vec3; 26] = [
    Vec3::new(1.0, 0.0, 0.0), // a: red
    Vec3::new(0.0, 0.0, 1.0), // b: blue
    Vec3::new(0.0, 1.0, 0.0), // c: green
    Vec3::new(1.0, 1.0, 0.0), // d: yellow
    Vec3::new(1.0, 0.0, 1.0), // e: magenta
    Vec3::new(0.0, 1.0, 1.0), // f: cyan
    Vec3::new(1.0, 0.5, 0.0), // g: orange
    Vec3::new(0.5, 0.0, 1.0), // h: purple
    Vec3::new(1.0, 0.0, 0.5), // i: hot pink
    Vec3::new(0.5, 1.0, 0.0), // j: lime
    Vec3::new(0.0, 0.5, 1.0), // k: sky blue
    Vec3::new(1.0, 0.8, 0.0), // l: gold
    Vec3::new(0.8, 0.0, 0.8), // m: violet
    Vec3::new(0.0, 0.8, 0.8), // n: teal
    Vec3::new(1.0, 0.3, 0.3), // o: coral
    Vec3::new(0.3, 1.0, 0.3), // p: light green
    Vec3::new(0.3, 0.3, 1.0), // q: light blue
    Vec3::new(0.8, 0.4, 0.0), // r: brown
    Vec3::new(0.6, 0.0, 0.6), // s: dark purple
    Vec3::new(0.0, 0.6, 0.6), // t: dark teal
    Vec3::new(1.0, 0.6, 0.8), // u: pink
    Vec3::new(0.6, 1.0, 0.8), // v: mint
    Vec3::new(0.8, 0.6, 1.0), // w: lavender
    Vec3::new(1.0, 0.2, 0.8), // x: deep pink
    Vec3::new(0.8, 1.0, 0.2), // y: yellow green
    Vec3::new(0.2, 0.8, 1.0), // z: light cyan
];

/// Palette entry for a lowercase ASCII letter.
pub fn identity_color(identity: char) -> Option<Vec3> {
    if identity.is_ascii_lowercase() {
        LETTER_PALETTE.get((identity as u8 - b'a') as usize).copied()
    } else {
        None
    }
}

/// The color a renderer should draw `agent` in.
pub fn display_color(agent: &Agent) -> Vec3 {
    if agent.is_separated() {
        identity_color(agent.identity()).unwrap_or(DEFAULT_LETTER_COLOR)
    } else {
        DEFAULT_LETTER_COLOR
    }
}

/// One drawable letter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub identity: char,
    pub position: Vec3,
    pub separated: bool,
    /// RGB from [`display_color`], alpha from the letter opacity.
    pub color: Vec4,
}

/// Snapshot of everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderView<'a> {
    pub agents: &'a [Agent],
    pub background: Vec3,
    pub word_height: f32,
    pub letter_opacity: f32,
    /// Scaled simulation time in seconds.
    pub sim_time: f32,
}

impl<'a> RenderView<'a> {
    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + 'a {
        let opacity = self.letter_opacity;
        self.agents.iter().map(move |agent| Glyph {
            identity: agent.identity(),
            position: agent.position,
            separated: agent.is_separated(),
            color: display_color(agent).extend(opacity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_lookup() {
        assert_eq!(identity_color('a'), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(identity_color('r'), Some(Vec3::new(0.8, 0.4, 0.0)));
        assert_eq!(identity_color('z'), Some(Vec3::new(0.2, 0.8, 1.0)));
    }

    #[test]
    fn test_non_letters_have_no_palette_entry() {
        assert_eq!(identity_color('A'), None);
        assert_eq!(identity_color('7'), None);
        assert_eq!(identity_color('é'), None);
    }

    #[test]
    fn test_forming_letters_use_default() {
        let forming = Agent::new('a', Vec3::ZERO, 3.0);
        assert_eq!(display_color(&forming), DEFAULT_LETTER_COLOR);

        let loose = Agent::separated('a', Vec3::ZERO, Vec3::ZERO);
        assert_eq!(display_color(&loose), Vec3::new(1.0, 0.0, 0.0));

        let digit = Agent::separated('3', Vec3::ZERO, Vec3::ZERO);
        assert_eq!(display_color(&digit), DEFAULT_LETTER_COLOR);
    }

    #[test]
    fn test_glyph_alpha_from_opacity() {
        let agents = [
            Agent::separated('b', Vec3::new(1.0, 2.0, 0.0), Vec3::ZERO),
            Agent::new('q', Vec3::ZERO, 4.0),
        ];
        let view = RenderView {
            agents: &agents,
            background: Vec3::ZERO,
            word_height: 0.5,
            letter_opacity: 0.5,
            sim_time: 0.0,
        };

        let glyphs: Vec<Glyph> = view.glyphs().collect();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].color, Vec4::new(0.0, 0.0, 1.0, 0.5));
        assert!(glyphs[0].separated);
        assert_eq!(glyphs[1].color, Vec4::new(1.0, 1.0, 1.0, 0.5));
        assert_eq!(glyphs[1].position, Vec3::ZERO);
    }
}
