//! Letter agents.
//!
//! Every character of a spoken word becomes one [`Agent`]. An agent starts in
//! [`AgentState::Forming`], easing toward its slot in the word layout. Once
//! its separation delay runs out it switches to [`AgentState::Separated`] and
//! joins the flocking simulation for the rest of the session.
//!
//! | State       | Per-tick update                                             |
//! |-------------|-------------------------------------------------------------|
//! | `Forming`   | `position = lerp(position, target, pull * speed)`           |
//! | `Separated` | steer, damp, clamp, integrate, random-walk the group heading |
//!
//! The transition is one-way. Freezing the world suspends both states
//! completely: no timer decrement and no motion.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::lifecycle::Lifecycle;
use crate::params::SimulationParameters;
use crate::rules::{planar_jitter, random_heading, Flock, Neighborhood};

/// The two lifecycle states of a letter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    /// Holding its place in the spoken word.
    #[default]
    Forming,
    /// Flocking freely. Terminal.
    Separated,
}

/// Everything an agent reads during one update.
pub struct Step<'a> {
    /// Host frame time in seconds, before the speed multiplier.
    pub dt: f32,
    pub params: &'a SimulationParameters,
    pub flock: &'a Flock,
    pub lifecycle: &'a Lifecycle,
    /// Snapshot of the population taken at the start of the tick.
    pub neighbors: &'a Neighborhood<'a>,
}

/// One character of a spoken word.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    identity: char,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Formation slot; equal to the spawn position.
    pub target: Vec3,
    /// Shared wander heading, unit length once separated.
    pub group_direction: Vec3,
    separation_timer: f32,
    state: AgentState,
}

impl Agent {
    /// A forming agent parked on its formation slot.
    pub fn new(identity: char, slot: Vec3, separation_delay: f32) -> Self {
        Self {
            identity,
            position: slot,
            velocity: Vec3::ZERO,
            target: slot,
            group_direction: Vec3::ZERO,
            separation_timer: separation_delay,
            state: AgentState::Forming,
        }
    }

    /// An agent that has already broken formation.
    ///
    /// Useful for seeding scenes and for exercising the steering rules.
    pub fn separated(identity: char, position: Vec3, velocity: Vec3) -> Self {
        Self {
            identity,
            position,
            velocity,
            target: position,
            group_direction: Vec3::X,
            separation_timer: 0.0,
            state: AgentState::Separated,
        }
    }

    /// The character this agent renders and groups by.
    #[inline]
    pub fn identity(&self) -> char {
        self.identity
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[inline]
    pub fn is_separated(&self) -> bool {
        self.state == AgentState::Separated
    }

    /// Seconds of formation left. Stops counting once separated.
    #[inline]
    pub fn separation_timer(&self) -> f32 {
        self.separation_timer
    }

    /// Advance this agent by one tick.
    ///
    /// Returns `true` on the tick the agent leaves formation.
    pub fn update<R: Rng>(&mut self, step: &Step<'_>, rng: &mut R) -> bool {
        if step.params.frozen() {
            return false;
        }

        let speed = step.params.speed_multiplier();
        let scaled_dt = step.dt * speed;

        let mut launched = false;
        if self.state == AgentState::Forming {
            self.separation_timer -= scaled_dt;
            if self.separation_timer <= 0.0 {
                self.launch(step.lifecycle, rng);
                launched = true;
            }
        }

        match self.state {
            AgentState::Forming => {
                self.position = self
                    .position
                    .lerp(self.target, step.lifecycle.formation_pull * speed);
            }
            AgentState::Separated => {
                let steer = step.flock.steer(
                    self,
                    step.neighbors,
                    step.params.group_distance(),
                    &mut *rng,
                );
                self.velocity += steer * speed;
                self.velocity *= step.flock.damping;
                self.velocity = self.velocity.clamp_length_max(step.flock.max_speed * speed);
                self.position += self.velocity * scaled_dt;

                let jitter = planar_jitter(rng, step.flock.heading_jitter);
                self.group_direction = (self.group_direction + jitter)
                    .try_normalize()
                    .unwrap_or(self.group_direction);
            }
        }

        launched
    }

    fn launch<R: Rng>(&mut self, lifecycle: &Lifecycle, rng: &mut R) {
        self.state = AgentState::Separated;
        self.velocity = planar_jitter(rng, lifecycle.launch_speed);
        self.group_direction = random_heading(rng);
    }
}
