//! Fixed keyword tables for parameter commands.
//!
//! Each spoken token is looked up by exact equality in four category tables.
//! Tokens are scanned left to right and every hit emits a [`ParamUpdate`],
//! so when a category appears twice the later token is applied last and wins.
//!
//! | Category | Keywords                                     | Parameter        |
//! |----------|----------------------------------------------|------------------|
//! | color    | red, green, blue, yellow, purple, orange ... | background       |
//! | size     | tiny, regular, huge                          | word height      |
//! | distance | close, normal, spread                        | group distance   |
//! | opacity  | invisible, faint, normal                     | letter opacity   |
//!
//! "normal" lives in two tables, so it resets both distance and opacity.

use glam::Vec3;

use crate::params::ParamUpdate;

/// A keyword-to-value lookup table.
#[derive(Clone, Copy, Debug)]
pub struct KeywordTable<T: 'static> {
    entries: &'static [(&'static str, T)],
}

impl<T: Copy> KeywordTable<T> {
    pub const fn new(entries: &'static [(&'static str, T)]) -> Self {
        Self { entries }
    }

    /// Exact-match lookup.
    pub fn get(&self, token: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(keyword, _)| *keyword == token)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Background colors.
pub const COLORS: KeywordTable<Vec3> = KeywordTable::new(&[
    ("red", Vec3::new(1.0, 0.0, 0.0)),
    ("green", Vec3::new(0.0, 1.0, 0.0)),
    ("blue", Vec3::new(0.0, 0.0, 1.0)),
    ("yellow", Vec3::new(1.0, 1.0, 0.0)),
    ("purple", Vec3::new(0.5, 0.0, 0.5)),
    ("orange", Vec3::new(1.0, 0.5, 0.0)),
    ("pink", Vec3::new(1.0, 0.4, 0.7)),
    ("cyan", Vec3::new(0.0, 1.0, 1.0)),
    ("white", Vec3::new(1.0, 1.0, 1.0)),
    ("black", Vec3::new(0.0, 0.0, 0.0)),
    ("grey", Vec3::new(0.5, 0.5, 0.5)),
    ("brown", Vec3::new(0.6, 0.3, 0.1)),
]);

/// Glyph heights.
pub const SIZES: KeywordTable<f32> =
    KeywordTable::new(&[("tiny", 0.3), ("huge", 1.0), ("regular", 0.6)]);

/// Cohesion radii.
pub const DISTANCES: KeywordTable<f32> =
    KeywordTable::new(&[("close", 2.0), ("normal", 8.0), ("spread", 15.0)]);

/// Glyph alpha values.
pub const OPACITIES: KeywordTable<f32> =
    KeywordTable::new(&[("invisible", 0.1), ("faint", 0.5), ("normal", 1.0)]);

/// Updates for a single token, in category order color, size, distance, opacity.
pub fn token_updates(token: &str) -> impl Iterator<Item = ParamUpdate> {
    [
        COLORS.get(token).map(ParamUpdate::Background),
        SIZES.get(token).map(ParamUpdate::WordHeight),
        DISTANCES.get(token).map(ParamUpdate::GroupDistance),
        OPACITIES.get(token).map(ParamUpdate::LetterOpacity),
    ]
    .into_iter()
    .flatten()
}

/// Updates for a whole utterance, tokenized on whitespace.
pub fn scan(text: &str) -> Vec<ParamUpdate> {
    text.split_whitespace().flat_map(token_updates).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(COLORS.len(), 12);
        assert_eq!(SIZES.len(), 3);
        assert_eq!(DISTANCES.len(), 3);
        assert_eq!(OPACITIES.len(), 3);
    }

    #[test]
    fn test_exact_match_only() {
        assert_eq!(COLORS.get("red"), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(COLORS.get("reddish"), None);
        assert_eq!(COLORS.get("RED"), None);
        assert_eq!(SIZES.get("tiny"), Some(0.3));
    }

    #[test]
    fn test_scan_keeps_order() {
        let updates = scan("red and then blue");
        assert_eq!(
            updates,
            vec![
                ParamUpdate::Background(Vec3::new(1.0, 0.0, 0.0)),
                ParamUpdate::Background(Vec3::new(0.0, 0.0, 1.0)),
            ]
        );
    }

    #[test]
    fn test_normal_hits_two_tables() {
        let updates = scan("normal");
        assert_eq!(
            updates,
            vec![ParamUpdate::GroupDistance(8.0), ParamUpdate::LetterOpacity(1.0)]
        );
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        assert!(scan("the quick fox").is_empty());
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_mixed_categories() {
        let updates = scan("huge faint spread");
        assert_eq!(
            updates,
            vec![
                ParamUpdate::WordHeight(1.0),
                ParamUpdate::LetterOpacity(0.5),
                ParamUpdate::GroupDistance(15.0),
            ]
        );
    }
}
