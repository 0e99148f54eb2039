//! Sound triggers and the playback busy gate.
//!
//! Utterances are matched against [`SOUND_RULES`] by substring, first match
//! wins. A matched [`SoundCue`] is handed to the audio boundary, which reports
//! back through [`Playback::finish`] when the sample ends. Until then the
//! command interpreter ignores every incoming utterance.

use std::fmt;

/// Identifier of an audio sample, e.g. `"wave"` for `wave.wav`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundCue(&'static str);

impl SoundCue {
    /// Sample stem, without extension.
    pub fn sample(&self) -> &'static str {
        self.0
    }

    /// File name the audio boundary loads.
    pub fn file_name(&self) -> String {
        format!("{}.wav", self.0)
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Any of `phrases` appearing in an utterance selects `cue`.
#[derive(Clone, Copy, Debug)]
pub struct SoundRule {
    pub phrases: &'static [&'static str],
    pub cue: SoundCue,
}

impl SoundRule {
    const fn new(phrases: &'static [&'static str], sample: &'static str) -> Self {
        Self {
            phrases,
            cue: SoundCue(sample),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.phrases.iter().any(|phrase| text.contains(phrase))
    }
}

/// Priority-ordered trigger list. Earlier rules shadow later ones, so a
/// phrase listed twice (e.g. "playing", "storm") only ever reaches the first.
pub const SOUND_RULES: &[SoundRule] = &[
    SoundRule::new(&["bath", "water", "waves", "shore"], "wave"),
    SoundRule::new(&["park", "children", "kids", "playing"], "kids"),
    SoundRule::new(&["squirrels"], "squirrel"),
    SoundRule::new(&["public transportation", "train"], "train"),
    SoundRule::new(&["in the car", "driving", "cars"], "turnsignal"),
    SoundRule::new(&["called"], "vibrate"),
    SoundRule::new(&["calling"], "phonecall"),
    SoundRule::new(&["find"], "search"),
    SoundRule::new(&["typing", "keyboard", "computer"], "clicking-keyboard"),
    SoundRule::new(&["pen", "writing", "click"], "clicking-pen"),
    SoundRule::new(&["coffee", "brewing", "machine"], "coffee-machine"),
    SoundRule::new(&["cutting", "chopping", "vegetables", "fruit"], "cutfruitveg"),
    SoundRule::new(&["door", "keys", "unlocking"], "door-unlocking-with-keys"),
    SoundRule::new(&["drawer", "opening", "cabinet"], "drawer-opening"),
    SoundRule::new(&["drawing", "sketching", "art"], "drawing"),
    SoundRule::new(&["fire", "flames", "burning"], "fire"),
    SoundRule::new(&["fishing", "reel", "casting"], "fishing-reel"),
    SoundRule::new(&["stove", "gas", "cooking"], "gasstove"),
    SoundRule::new(&["cleaning", "glass", "window"], "glass-cleaning-squeak"),
    SoundRule::new(&["grocery", "freezer", "store"], "grocery-store-freezer-door"),
    SoundRule::new(&["guitar", "tuning", "strings"], "guitartuning"),
    SoundRule::new(&["heartbeat", "heart", "pulse"], "heartbeat"),
    SoundRule::new(&["horses", "riding"], "horses-kids"),
    SoundRule::new(&["laundry", "washing", "clothes"], "laundry"),
    SoundRule::new(&["market", "crowd", "busy"], "marketnoise"),
    SoundRule::new(&["microwave", "heating", "beeping"], "microwave"),
    SoundRule::new(&["soda", "can", "fizzy"], "opening-a-fizzy-can"),
    SoundRule::new(&["pills", "bottle", "medicine"], "opening-pill-bottle"),
    SoundRule::new(&["peeling", "wood", "scraping"], "peeling-wood"),
    SoundRule::new(&["cards", "playing", "shuffling"], "playingcards"),
    SoundRule::new(&["rain", "raining", "storm"], "rain-sounds"),
    SoundRule::new(&["rolling", "wheel", "ball"], "rolling"),
    SoundRule::new(&["running", "jogging", "exercise"], "running"),
    SoundRule::new(&["eggs", "scrambled", "cooking"], "scrambled-egg"),
    SoundRule::new(&["brushing", "teeth", "sink"], "sink-and-toothbrush"),
    SoundRule::new(&["skateboard", "skating", "wheels"], "skateboard"),
    SoundRule::new(&["spray", "paint", "graffiti"], "spray-paint-rattle-and-spray"),
    SoundRule::new(&["stairs", "jumping", "steps"], "stairs-jumping"),
    SoundRule::new(&["stapler", "stapling", "office"], "stapler-sound"),
    SoundRule::new(&["gravel", "stone", "road"], "stone-road"),
    SoundRule::new(&["tapping", "fingers", "drumming"], "tapping-fingers"),
    SoundRule::new(&["thunder", "lightning", "storm"], "thunder"),
    SoundRule::new(&["toaster", "toast", "bread"], "toaster"),
    SoundRule::new(&["toy", "guitar", "music"], "toy-guitar-playing"),
    SoundRule::new(&["city", "urban", "traffic"], "traffic-in-city"),
    SoundRule::new(&["walking", "footsteps", "steps"], "walking"),
    SoundRule::new(&["window", "opening", "fresh air"], "window-opening"),
    SoundRule::new(&["wine", "bottle", "cork"], "winebottle"),
    SoundRule::new(&["hungry"], "hungry"),
];

/// First cue whose rule matches `text`, if any.
pub fn match_cue(text: &str) -> Option<SoundCue> {
    SOUND_RULES
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.cue)
}

/// Tracks whether a triggered sample is still playing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Playback {
    current: Option<SoundCue>,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<SoundCue> {
        self.current
    }

    /// Mark `cue` as playing from the beginning.
    pub fn start(&mut self, cue: SoundCue) {
        self.current = Some(cue);
    }

    /// Clear the busy flag, returning the cue that finished.
    pub fn finish(&mut self) -> Option<SoundCue> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_count() {
        assert_eq!(SOUND_RULES.len(), 49);
    }

    #[test]
    fn test_first_rule_wins() {
        // "playing" appears under kids and playingcards; kids comes first.
        assert_eq!(match_cue("kids playing cards").map(|c| c.sample()), Some("kids"));
        assert_eq!(match_cue("shuffling cards").map(|c| c.sample()), Some("playingcards"));
    }

    #[test]
    fn test_substring_match() {
        // "water" inside "waterfall"
        assert_eq!(match_cue("a waterfall").map(|c| c.sample()), Some("wave"));
        // "can" inside "scan"
        assert_eq!(match_cue("scan").map(|c| c.sample()), Some("opening-a-fizzy-can"));
    }

    #[test]
    fn test_multi_word_phrases() {
        assert_eq!(match_cue("we sat in the car").map(|c| c.sample()), Some("turnsignal"));
        assert_eq!(match_cue("some fresh air").map(|c| c.sample()), Some("window-opening"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_cue("hello there"), None);
        assert_eq!(match_cue(""), None);
    }

    #[test]
    fn test_file_name() {
        let cue = match_cue("i am hungry").unwrap();
        assert_eq!(cue.file_name(), "hungry.wav");
        assert_eq!(cue.to_string(), "hungry");
    }

    #[test]
    fn test_playback_gate() {
        let mut playback = Playback::new();
        assert!(!playback.is_busy());

        let cue = match_cue("thunder").unwrap();
        playback.start(cue);
        assert!(playback.is_busy());
        assert_eq!(playback.current(), Some(cue));

        assert_eq!(playback.finish(), Some(cue));
        assert!(!playback.is_busy());
        assert_eq!(playback.finish(), None);
    }
}
