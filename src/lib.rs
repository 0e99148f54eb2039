//! # Word Swarm
//!
//! Spoken words that form, hold, break apart and flock.
//!
//! Every transcribed utterance is interpreted as a set of commands. Plain
//! words spawn one letter agent per character, laid out as a centered row per
//! word. After a random delay each letter breaks formation and joins a
//! steering simulation where letters of the same character gather and orbit
//! together, while the whole swarm drifts inside a spherical boundary.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wordswarm::prelude::*;
//!
//! let mut world = World::with_seed(7);
//! world.ingest_raw("Hello, swarm!");
//!
//! for _ in 0..600 {
//!     let report = world.tick(1.0 / 60.0);
//!     for cue in &report.cues {
//!         println!("play {}", cue.file_name());
//!     }
//! }
//!
//! for glyph in world.view().glyphs() {
//!     println!("{} at {:?}", glyph.identity, glyph.position);
//! }
//! ```
//!
//! ## Commands
//!
//! Utterances are lowercased and stripped of punctuation, then scanned for:
//!
//! - **Keywords**, matched per token: colors set the background, `tiny` /
//!   `regular` / `huge` set the glyph height, `close` / `normal` / `spread`
//!   set the grouping distance, `invisible` / `faint` / `normal` set letter
//!   opacity. The last keyword of a category wins.
//! - **Controls**, matched anywhere in the text: `freeze`, `unfreeze`,
//!   `faster`, `slower`, `normal`, `reset`.
//! - **Sound triggers**: phrases like "rain" or "in the car" select a sample.
//!   While a sample plays, every utterance is ignored.
//!
//! Words spawn only when the world is not frozen and no sample is playing.
//!
//! ## Rules
//!
//! Separated letters steer with a weighted [`Flock`] of [`Rule`]s:
//!
//! ```ignore
//! let flock = Flock::new()
//!     .with_rule(Rule::Separate { radius: 1.0, strength: 2.0 }, 0.8)
//!     .with_rule(Rule::Cohere { strength: 1.5, orbit: 0.3 }, 0.6)
//!     .with_rule(Rule::Contain { center: Vec3::ZERO, radius: 8.0, push: 2.0 }, 1.0);
//!
//! let world = World::with_seed(1).with_flock(flock);
//! ```
//!
//! ## Spatial Hashing
//!
//! Neighbor rules scan the whole population by default, which is quadratic.
//! [`World::with_spatial`] buckets agents into a uniform grid each tick.
//! Both paths produce identical forces.

pub mod agent;
pub mod command;
pub mod config;
pub mod error;
pub mod keywords;
pub mod lifecycle;
pub mod params;
pub mod rules;
pub mod simulation;
pub mod sound;
pub mod spatial;
pub mod spawn;
pub mod time;
pub mod visuals;

pub use glam::{Vec3, Vec4};

pub use agent::{Agent, AgentState};
pub use command::{interpret, normalize_utterance, Control, Gate, Interpretation};
pub use config::SwarmConfig;
pub use error::{ConfigError, DriverError};
pub use lifecycle::Lifecycle;
pub use params::{ParamUpdate, SimulationParameters};
pub use rules::{Flock, Neighborhood, Rule, WeightedRule};
pub use simulation::{InboundEvent, Inbox, TickReport, World};
pub use sound::{Playback, SoundCue};
pub use spatial::{SpatialConfig, SpatialGrid};
pub use spawn::{Spawner, WordLayout};
pub use visuals::{Glyph, RenderView};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use wordswarm::prelude::*;
/// ```
///
/// This imports:
/// - [`World`] - the simulation world
/// - [`Flock`], [`Rule`] - the steering model
/// - [`Lifecycle`], [`WordLayout`] - formation timing and layout
/// - [`SwarmConfig`] - JSON configuration
/// - [`Vec3`], [`Vec4`] - glam vector types
pub mod prelude {
    pub use crate::agent::{Agent, AgentState};
    pub use crate::config::SwarmConfig;
    pub use crate::lifecycle::Lifecycle;
    pub use crate::params::SimulationParameters;
    pub use crate::rules::{Flock, Rule};
    pub use crate::simulation::{Inbox, TickReport, World};
    pub use crate::sound::SoundCue;
    pub use crate::spatial::SpatialConfig;
    pub use crate::spawn::WordLayout;
    pub use crate::time::FrameClock;
    pub use crate::visuals::{Glyph, RenderView};
    pub use crate::{Vec3, Vec4};
}
