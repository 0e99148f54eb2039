//! The simulation world.
//!
//! [`World`] owns the letter population, the simulation parameters and the
//! playback gate. Commands change parameters immediately, but changes to the
//! population (spawn, reset) are queued and applied at the start of the next
//! [`World::tick`], before the force pass. The force pass reads a snapshot
//! of the population taken after the queue is drained, so no agent ever sees
//! a half-updated neighbor.
//!
//! # Example
//!
//! ```ignore
//! let mut world = World::with_seed(7);
//! world.ingest("hello world");
//!
//! loop {
//!     let report = world.tick(1.0 / 60.0);
//!     for cue in &report.cues {
//!         audio.play(cue.file_name());
//!     }
//!     renderer.draw(world.view());
//! }
//! ```
//!
//! # Threads
//!
//! The world itself is single-threaded. Hosts that receive transcriptions or
//! audio callbacks on other threads send them through an [`Inbox`]; the
//! world drains it at the start of each tick.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, trace, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::agent::{Agent, Step};
use crate::command::{self, Gate, Interpretation};
use crate::config::{SwarmConfig, DEFAULT_POPULATION_WATERMARK};
use crate::error::ConfigError;
use crate::lifecycle::Lifecycle;
use crate::params::SimulationParameters;
use crate::rules::{Flock, Neighborhood};
use crate::sound::{Playback, SoundCue};
use crate::spatial::{SpatialConfig, SpatialGrid};
use crate::spawn::{Spawner, WordLayout};
use crate::time::SimClock;
use crate::visuals::RenderView;

/// An event delivered to the world from another thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// Raw transcription text, normalized on arrival.
    Utterance(String),
    /// The audio boundary finished playing the current sample.
    PlaybackFinished,
}

/// Cloneable sending half of a world's command channel.
#[derive(Clone, Debug)]
pub struct Inbox {
    sender: Sender<InboundEvent>,
}

impl Inbox {
    /// Queue a raw utterance. Returns `false` if the world is gone.
    pub fn send_utterance(&self, text: impl Into<String>) -> bool {
        self.sender.send(InboundEvent::Utterance(text.into())).is_ok()
    }

    /// Report the end of playback. Returns `false` if the world is gone.
    pub fn send_playback_finished(&self) -> bool {
        self.sender.send(InboundEvent::PlaybackFinished).is_ok()
    }
}

/// A population change waiting for the next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingOp {
    Reset,
    Spawn(Vec<String>),
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Agents added by queued spawns.
    pub spawned: usize,
    /// The population was cleared.
    pub reset: bool,
    /// Agents that left formation this tick.
    pub launched: usize,
    /// Sound cues raised since the previous tick, in order.
    pub cues: Vec<SoundCue>,
    /// Population after the tick.
    pub population: usize,
    /// The world was frozen for this tick.
    pub frozen: bool,
}

/// Seed derived from the system clock, for unseeded worlds.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

/// The letter population and everything that drives it.
pub struct World {
    agents: Vec<Agent>,
    params: SimulationParameters,
    playback: Playback,
    pending: VecDeque<PendingOp>,
    fired_cues: Vec<SoundCue>,
    inbox: Option<(Sender<InboundEvent>, Receiver<InboundEvent>)>,
    flock: Flock,
    spawner: Spawner,
    spatial: Option<SpatialConfig>,
    clock: SimClock,
    rng: SmallRng,
    population_watermark: usize,
    watermark_warned: bool,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// An empty world with standard settings, seeded from the system clock.
    pub fn new() -> Self {
        Self::with_seed(clock_seed())
    }

    /// An empty world with standard settings and a fixed RNG seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            agents: Vec::new(),
            params: SimulationParameters::default(),
            playback: Playback::new(),
            pending: VecDeque::new(),
            fired_cues: Vec::new(),
            inbox: None,
            flock: Flock::default(),
            spawner: Spawner::default(),
            spatial: None,
            clock: SimClock::new(),
            rng: SmallRng::seed_from_u64(seed),
            population_watermark: DEFAULT_POPULATION_WATERMARK,
            watermark_warned: false,
        }
    }

    /// Build a world from a validated config.
    pub fn from_config(config: SwarmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        world.flock = config.flock;
        world.spawner = Spawner::new(config.layout, config.lifecycle);
        world.params = config.params;
        world.spatial = config.spatial;
        world.population_watermark = config.population_watermark;
        Ok(world)
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    /// Replace the steering model.
    pub fn with_flock(mut self, flock: Flock) -> Self {
        self.flock = flock;
        self
    }

    /// Replace the lifecycle timing used for new letters.
    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.spawner = Spawner::new(*self.spawner.layout(), lifecycle);
        self
    }

    /// Replace the formation layout used for new words.
    pub fn with_layout(mut self, layout: WordLayout) -> Self {
        self.spawner = Spawner::new(layout, self.spawner.lifecycle().clone());
        self
    }

    /// Use a spatial grid for neighbor queries.
    pub fn with_spatial(mut self, config: SpatialConfig) -> Self {
        self.spatial = Some(config);
        self
    }

    /// Start from the given parameters.
    pub fn with_params(mut self, params: SimulationParameters) -> Self {
        self.params = params;
        self
    }

    /// Log a warning once the population exceeds `watermark`.
    pub fn with_population_watermark(mut self, watermark: usize) -> Self {
        self.population_watermark = watermark;
        self
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    /// Interpret a normalized utterance and apply it.
    ///
    /// Parameter changes take effect immediately. Resets and spawns are
    /// queued for the next tick, reset first.
    pub fn ingest(&mut self, text: &str) -> Interpretation {
        let gate = Gate {
            busy: self.playback.is_busy(),
            frozen: self.params.frozen(),
        };
        if gate.busy {
            trace!("Ignoring utterance while playing: {text:?}");
            return Interpretation::default();
        }

        let interpretation = command::interpret(text, gate);
        interpretation.apply_to(&mut self.params);

        for update in &interpretation.updates {
            debug!("Parameter update: {update:?}");
        }
        for control in &interpretation.controls {
            debug!("Control: {control:?}");
        }

        if interpretation.requests_reset() {
            self.pending.push_back(PendingOp::Reset);
        }
        if let Some(cue) = interpretation.sound {
            debug!("Sound cue: {}", cue.file_name());
            self.playback.start(cue);
            self.fired_cues.push(cue);
        }
        if let Some(words) = &interpretation.spawn {
            self.pending.push_back(PendingOp::Spawn(words.clone()));
        }
        interpretation
    }

    /// Normalize raw transcription text, then [`ingest`](Self::ingest) it.
    ///
    /// Returns `None` for blank-audio utterances.
    pub fn ingest_raw(&mut self, raw: &str) -> Option<Interpretation> {
        match command::normalize_utterance(raw) {
            Some(text) => Some(self.ingest(&text)),
            None => {
                trace!("Dropping blank audio");
                None
            }
        }
    }

    /// The audio boundary finished the current sample.
    pub fn playback_finished(&mut self) {
        if let Some(cue) = self.playback.finish() {
            debug!("Playback finished: {cue}");
        }
    }

    /// Open the cross-thread command channel.
    ///
    /// Every call returns a handle to the same channel.
    pub fn open_inbox(&mut self) -> Inbox {
        let (sender, _) = self.inbox.get_or_insert_with(mpsc::channel);
        Inbox {
            sender: sender.clone(),
        }
    }

    /// Add pre-built agents directly, bypassing the interpreter and queue.
    pub fn extend(&mut self, agents: impl IntoIterator<Item = Agent>) {
        self.agents.extend(agents);
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Advance the world by `dt` seconds of host time.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        self.drain_inbox();

        let mut report = TickReport::default();
        self.apply_pending(&mut report);
        self.check_watermark();

        self.clock.advance(dt, &self.params);
        report.frozen = self.params.frozen();

        if !report.frozen && !self.agents.is_empty() {
            report.launched = self.advance_agents(dt);
        }

        report.cues = std::mem::take(&mut self.fired_cues);
        report.population = self.agents.len();
        trace!(
            "Tick {}: population {}, launched {}",
            self.clock.ticks(),
            report.population,
            report.launched
        );
        report
    }

    fn drain_inbox(&mut self) {
        let events: Vec<InboundEvent> = match &self.inbox {
            Some((_, receiver)) => receiver.try_iter().collect(),
            None => return,
        };
        for event in events {
            match event {
                InboundEvent::Utterance(raw) => {
                    self.ingest_raw(&raw);
                }
                InboundEvent::PlaybackFinished => self.playback_finished(),
            }
        }
    }

    fn apply_pending(&mut self, report: &mut TickReport) {
        while let Some(op) = self.pending.pop_front() {
            match op {
                PendingOp::Reset => {
                    debug!("Reset: clearing {} agents", self.agents.len());
                    self.agents.clear();
                    report.spawned = 0;
                    report.reset = true;
                }
                PendingOp::Spawn(words) => {
                    let spawned = self.spawner.spawn(words.as_slice(), &mut self.rng);
                    debug!("Spawned {} letters from {:?}", spawned.len(), words);
                    report.spawned += spawned.len();
                    self.agents.extend(spawned);
                }
            }
        }
    }

    fn check_watermark(&mut self) {
        let population = self.agents.len();
        if population > self.population_watermark {
            if !self.watermark_warned {
                warn!(
                    "Population {} exceeds watermark {}; neighbor queries grow quadratically",
                    population, self.population_watermark
                );
                self.watermark_warned = true;
            }
        } else {
            self.watermark_warned = false;
        }
    }

    fn advance_agents(&mut self, dt: f32) -> usize {
        let snapshot = self.agents.clone();
        let grid = match self.spatial {
            Some(config) if self.flock.requires_neighbors() => {
                let grid = SpatialGrid::build(&snapshot, config.cell_size);
                trace!("Grid: {} occupied cells", grid.occupied_cells());
                Some(grid)
            }
            _ => None,
        };
        let neighbors = match &grid {
            Some(grid) => Neighborhood::indexed(&snapshot, grid),
            None => Neighborhood::all(&snapshot),
        };

        let step = Step {
            dt,
            params: &self.params,
            flock: &self.flock,
            lifecycle: self.spawner.lifecycle(),
            neighbors: &neighbors,
        };

        let mut launched = 0;
        for agent in &mut self.agents {
            if agent.update(&step, &mut self.rng) {
                launched += 1;
            }
        }
        if launched > 0 {
            debug!("{launched} letters left formation");
        }
        launched
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// The letter population, in spawn order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Mutable parameters, for hosts that expose their own controls.
    pub fn params_mut(&mut self) -> &mut SimulationParameters {
        &mut self.params
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Scaled simulation time in seconds.
    pub fn sim_time(&self) -> f32 {
        self.clock.elapsed()
    }

    /// A triggered sample is still playing.
    pub fn is_busy(&self) -> bool {
        self.playback.is_busy()
    }

    /// The sample currently playing, if any.
    pub fn now_playing(&self) -> Option<SoundCue> {
        self.playback.current()
    }

    /// Spawns and resets waiting for the next tick.
    pub fn pending_ops(&self) -> usize {
        self.pending.len()
    }

    /// Everything a renderer needs for this frame.
    pub fn view(&self) -> RenderView<'_> {
        RenderView {
            agents: &self.agents,
            background: self.params.background(),
            word_height: self.params.word_height(),
            letter_opacity: self.params.letter_opacity(),
            sim_time: self.clock.elapsed(),
        }
    }
}
