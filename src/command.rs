//! Command interpreter.
//!
//! Turns one spoken utterance into everything it asks of the world:
//!
//! 1. **Keyword updates**: exact token matches against the category tables
//!    in [`keywords`](crate::keywords), left to right.
//! 2. **Controls**: substring matches against the whole utterance, checked in
//!    the fixed order freeze, unfreeze, faster, slower, normal, reset.
//! 3. **Sound cue**: the first matching rule in
//!    [`SOUND_RULES`](crate::sound::SOUND_RULES).
//! 4. **Spawn request**: the utterance's words, unless the world will be
//!    frozen or a sound is playing after this utterance.
//!
//! The interpreter is a pure function. It never mutates the world; the
//! [`World`](crate::World) applies an [`Interpretation`] atomically between
//! ticks.

use crate::keywords;
use crate::params::{ParamUpdate, SimulationParameters};
use crate::sound::{self, SoundCue};

/// Transcription marker for silence. Utterances containing it are dropped.
pub const BLANK_AUDIO_MARKER: &str = "[BLANK_AUDIO]";

/// Prepare raw transcription text for interpretation.
///
/// Returns `None` for blank-audio utterances. Otherwise the text is
/// lowercased and stripped of ASCII punctuation.
pub fn normalize_utterance(raw: &str) -> Option<String> {
    if raw.contains(BLANK_AUDIO_MARKER) {
        return None;
    }
    Some(
        raw.to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect(),
    )
}

/// A global control command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Freeze,
    Unfreeze,
    Faster,
    Slower,
    NormalSpeed,
    Reset,
}

impl Control {
    /// Every control with its trigger substring, in evaluation order.
    pub const ALL: [(&'static str, Control); 6] = [
        ("freeze", Control::Freeze),
        ("unfreeze", Control::Unfreeze),
        ("faster", Control::Faster),
        ("slower", Control::Slower),
        ("normal", Control::NormalSpeed),
        ("reset", Control::Reset),
    ];

    /// Apply this control to the parameters. `Reset` only touches the
    /// population, so it is a no-op here.
    pub fn apply(self, params: &mut SimulationParameters) {
        match self {
            Control::Freeze => params.freeze(),
            Control::Unfreeze => params.unfreeze(),
            Control::Faster => params.faster(),
            Control::Slower => params.slower(),
            Control::NormalSpeed => params.reset_speed(),
            Control::Reset => {}
        }
    }
}

/// Controls contained in `text`, in evaluation order.
///
/// "unfreeze" contains "freeze", so it always yields both, and the
/// unfreeze wins because it is applied second.
pub fn scan_controls(text: &str) -> Vec<Control> {
    Control::ALL
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, control)| *control)
        .collect()
}

/// World state the interpreter needs to decide gating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gate {
    /// A previously triggered sample is still playing.
    pub busy: bool,
    /// The world is currently frozen.
    pub frozen: bool,
}

/// Everything one utterance asks for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interpretation {
    /// Keyword updates, in token order.
    pub updates: Vec<ParamUpdate>,
    /// Controls, in evaluation order.
    pub controls: Vec<Control>,
    /// Sample to play.
    pub sound: Option<SoundCue>,
    /// Words to spawn as letter agents.
    pub spawn: Option<Vec<String>>,
}

impl Interpretation {
    /// Returns `true` if the utterance had no effect.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
            && self.controls.is_empty()
            && self.sound.is_none()
            && self.spawn.is_none()
    }

    /// Returns `true` if the population should be cleared.
    pub fn requests_reset(&self) -> bool {
        self.controls.contains(&Control::Reset)
    }

    /// Apply keyword updates and controls to `params`, in that order.
    pub fn apply_to(&self, params: &mut SimulationParameters) {
        for update in &self.updates {
            params.apply(*update);
        }
        for control in &self.controls {
            control.apply(params);
        }
    }
}

/// Interpret a normalized utterance.
///
/// While `gate.busy` is set the utterance is ignored entirely. A sound cue
/// raised by this utterance also suppresses its own spawn.
pub fn interpret(text: &str, gate: Gate) -> Interpretation {
    if gate.busy {
        return Interpretation::default();
    }

    let updates = keywords::scan(text);
    let controls = scan_controls(text);
    let sound = sound::match_cue(text);

    let frozen = controls.iter().fold(gate.frozen, |frozen, control| match control {
        Control::Freeze => true,
        Control::Unfreeze => false,
        _ => frozen,
    });

    let words: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
    let spawn = (!frozen && sound.is_none() && !words.is_empty()).then_some(words);

    Interpretation {
        updates,
        controls,
        sound,
        spawn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn open() -> Gate {
        Gate::default()
    }

    #[test]
    fn test_normalize_strips_and_lowercases() {
        assert_eq!(normalize_utterance("Hello, World!").as_deref(), Some("hello world"));
        assert_eq!(normalize_utterance("it's RED.").as_deref(), Some("its red"));
    }

    #[test]
    fn test_normalize_drops_blank_audio() {
        assert_eq!(normalize_utterance("[BLANK_AUDIO]"), None);
        assert_eq!(normalize_utterance("  [BLANK_AUDIO] hi"), None);
        // Lowercase marker is not the transcription marker.
        assert!(normalize_utterance("[blank_audio]").is_some());
    }

    #[test]
    fn test_last_color_wins() {
        let result = interpret("red blue", open());
        let mut params = SimulationParameters::new();
        result.apply_to(&mut params);
        assert_eq!(params.background(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_unfreeze_contains_freeze() {
        assert_eq!(scan_controls("unfreeze"), vec![Control::Freeze, Control::Unfreeze]);

        let mut params = SimulationParameters::new();
        params.freeze();
        interpret("unfreeze", Gate { busy: false, frozen: true }).apply_to(&mut params);
        assert!(!params.frozen());
    }

    #[test]
    fn test_controls_in_fixed_order() {
        // "normal" is checked after "faster", so the speed ends at 1.0.
        let result = interpret("normal then faster", open());
        assert_eq!(result.controls, vec![Control::Faster, Control::NormalSpeed]);

        let mut params = SimulationParameters::new();
        result.apply_to(&mut params);
        assert_eq!(params.speed_multiplier(), 1.0);
    }

    #[test]
    fn test_spawn_words() {
        let result = interpret("cat dog", open());
        assert_eq!(result.spawn, Some(vec!["cat".to_string(), "dog".to_string()]));
        assert!(result.sound.is_none());
    }

    #[test]
    fn test_frozen_blocks_spawn_but_not_updates() {
        let result = interpret("green cat", Gate { busy: false, frozen: true });
        assert!(result.spawn.is_none());
        assert_eq!(result.updates, vec![ParamUpdate::Background(Vec3::new(0.0, 1.0, 0.0))]);
    }

    #[test]
    fn test_freeze_utterance_does_not_spawn() {
        let result = interpret("freeze now", open());
        assert!(result.spawn.is_none());
        assert_eq!(result.controls, vec![Control::Freeze]);
    }

    #[test]
    fn test_busy_ignores_everything() {
        let result = interpret("red faster reset hungry cat", Gate { busy: true, frozen: false });
        assert!(result.is_empty());
    }

    #[test]
    fn test_sound_suppresses_own_spawn() {
        let result = interpret("i am hungry", open());
        assert_eq!(result.sound.map(|c| c.sample()), Some("hungry"));
        assert!(result.spawn.is_none());
    }

    #[test]
    fn test_reset_with_words() {
        let result = interpret("reset hello", open());
        assert!(result.requests_reset());
        assert_eq!(result.spawn, Some(vec!["reset".to_string(), "hello".to_string()]));
    }

    #[test]
    fn test_empty_utterance() {
        assert!(interpret("", open()).is_empty());
        assert!(interpret("   ", open()).is_empty());
    }
}
