//! Steering rules for separated letter agents.
//!
//! Every rule is a pure function of one agent and a read-only snapshot of the
//! whole population. A [`Flock`] holds an ordered list of weighted rules and
//! sums their forces into the steering vector applied each tick.
//!
//! # Rule Categories
//!
//! - **Personal space** (neighbor): Separate
//! - **Identity flocking** (neighbor): Cohere, Align
//! - **Drift**: GroupDrift, Wander
//! - **Boundaries**: Contain
//!
//! # Neighbor Rules
//!
//! Rules marked "(neighbor)" scan the population through a [`Neighborhood`].
//! A neighborhood either walks every agent or asks a [`SpatialGrid`] for the
//! candidates near the query point. Candidates are always visited in
//! population order, so both paths produce bit-identical forces.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::spatial::SpatialGrid;

/// Fraction of the containment radius where the soft push begins.
const CONTAIN_SOFT_EDGE: f32 = 0.9;
/// Fraction of the containment radius where the soft ramp is anchored.
const CONTAIN_RAMP_START: f32 = 0.8;
/// Width of the soft ramp as a fraction of the containment radius.
const CONTAIN_RAMP_WIDTH: f32 = 0.2;

/// Read-only view of the population used by neighbor rules.
///
/// The slice is the tick's snapshot: agents updated earlier in the same tick
/// are not visible through it.
#[derive(Clone, Copy)]
pub struct Neighborhood<'a> {
    agents: &'a [Agent],
    grid: Option<&'a SpatialGrid>,
}

impl<'a> Neighborhood<'a> {
    /// Brute-force neighborhood: every agent is a candidate.
    pub fn all(agents: &'a [Agent]) -> Self {
        Self { agents, grid: None }
    }

    /// Grid-accelerated neighborhood. `grid` must have been built from `agents`.
    pub fn indexed(agents: &'a [Agent], grid: &'a SpatialGrid) -> Self {
        Self {
            agents,
            grid: Some(grid),
        }
    }

    /// The snapshot this neighborhood reads from.
    pub fn agents(&self) -> &'a [Agent] {
        self.agents
    }

    /// Visit every agent that may lie within `radius` of `center`.
    ///
    /// This is a superset query; callers apply their own exact distance test.
    pub fn for_each_candidate(&self, center: Vec3, radius: f32, mut visit: impl FnMut(&Agent)) {
        match self.grid {
            None => self.agents.iter().for_each(visit),
            Some(grid) => {
                for index in grid.candidates(center, radius) {
                    if let Some(agent) = self.agents.get(index) {
                        visit(agent);
                    }
                }
            }
        }
    }
}

// ============================================================================
// Force functions
// ============================================================================

/// Push away from every agent closer than `radius`, weighted by `1/distance`.
///
/// The averaged push is rescaled to exactly `strength`. Coincident agents
/// (distance 0, including the agent itself) are ignored.
pub fn separation(agent: &Agent, neighbors: &Neighborhood<'_>, radius: f32, strength: f32) -> Vec3 {
    let mut steer = Vec3::ZERO;
    let mut count = 0u32;

    neighbors.for_each_candidate(agent.position, radius, |other| {
        let offset = agent.position - other.position;
        let distance = offset.length();
        if distance > 0.0 && distance < radius {
            steer += offset / distance / distance;
            count += 1;
        }
    });

    if count == 0 {
        return Vec3::ZERO;
    }
    steer /= count as f32;
    steer.normalize_or_zero() * strength
}

/// Steer toward the centroid of separated agents sharing this agent's identity.
///
/// The centroid counts the agent itself at its current position whenever it
/// is separated, even on the tick it leaves formation while its snapshot copy
/// is still forming. Snapshot entries sitting exactly on the agent are taken
/// to be that copy and skipped. A group needs more than one member before it
/// pulls. An in-plane perpendicular component of magnitude `orbit` makes
/// groups circle their center instead of collapsing onto it.
pub fn cohesion(
    agent: &Agent,
    neighbors: &Neighborhood<'_>,
    radius: f32,
    strength: f32,
    orbit: f32,
) -> Vec3 {
    let mut center = Vec3::ZERO;
    let mut count = 0u32;
    if agent.is_separated() && radius > 0.0 {
        center += agent.position;
        count += 1;
    }

    neighbors.for_each_candidate(agent.position, radius, |other| {
        if other.identity() == agent.identity() && other.is_separated() {
            let distance = (agent.position - other.position).length();
            if distance > 0.0 && distance < radius {
                center += other.position;
                count += 1;
            }
        }
    });

    if count <= 1 {
        return Vec3::ZERO;
    }
    center /= count as f32;

    let to_center = center - agent.position;
    let desired = to_center.normalize_or_zero() * strength;
    let perpendicular = Vec3::new(-to_center.y, to_center.x, 0.0).normalize_or_zero();
    desired + perpendicular * orbit
}

/// Match the average velocity of nearby separated agents of the same identity.
pub fn alignment(agent: &Agent, neighbors: &Neighborhood<'_>, radius: f32, strength: f32) -> Vec3 {
    let mut average = Vec3::ZERO;
    let mut count = 0u32;

    neighbors.for_each_candidate(agent.position, radius, |other| {
        if other.identity() == agent.identity() && other.is_separated() {
            let distance = (agent.position - other.position).length();
            if distance > 0.0 && distance < radius {
                average += other.velocity;
                count += 1;
            }
        }
    });

    if count == 0 {
        return Vec3::ZERO;
    }
    average /= count as f32;
    (average - agent.velocity) * strength
}

/// Slow drift along the agent's own wander heading.
pub fn group_drift(agent: &Agent, strength: f32) -> Vec3 {
    agent.group_direction * strength
}

/// Keep agents inside a sphere.
///
/// Outside the sphere the force is a hard push of magnitude `push` toward the
/// center. Beyond 90% of the radius it ramps as
/// `(distance - 0.8 * radius) / (0.2 * radius)`. Deeper inside it is zero.
pub fn containment(position: Vec3, center: Vec3, radius: f32, push: f32) -> Vec3 {
    let to_center = center - position;
    let distance = to_center.length();

    if distance > radius {
        return to_center.normalize_or_zero() * push;
    }
    if distance > radius * CONTAIN_SOFT_EDGE {
        let ramp = (distance - radius * CONTAIN_RAMP_START) / (radius * CONTAIN_RAMP_WIDTH);
        return to_center.normalize_or_zero() * ramp;
    }
    Vec3::ZERO
}

/// Fresh random nudge with x/y in `[-strength, strength]`.
pub fn wander<R: Rng>(rng: &mut R, strength: f32) -> Vec3 {
    planar_jitter(rng, strength)
}

/// Random in-plane vector with each of x/y uniform in `[-half, half]`, z = 0.
pub fn planar_jitter<R: Rng>(rng: &mut R, half: f32) -> Vec3 {
    let half = half.abs();
    Vec3::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half), 0.0)
}

/// Random in-plane unit vector.
pub fn random_heading<R: Rng>(rng: &mut R) -> Vec3 {
    planar_jitter(rng, 1.0).try_normalize().unwrap_or(Vec3::X)
}

// ============================================================================
// Rules
// ============================================================================

/// A single steering behavior and its parameters.
///
/// Serialized with a `kind` tag so flocks can be described in config files:
///
/// ```json
/// { "kind": "separate", "radius": 1.0, "strength": 2.0, "weight": 0.8 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Personal space: push away from any agent within `radius`.
    Separate {
        /// Detection radius.
        radius: f32,
        /// Magnitude of the resulting push.
        strength: f32,
    },

    /// Identity cohesion with orbit.
    ///
    /// The search radius is the live `group_distance` simulation parameter,
    /// so spoken distance keywords loosen or tighten the groups.
    Cohere {
        /// Magnitude of the pull toward the group centroid.
        strength: f32,
        /// Magnitude of the perpendicular orbit component.
        orbit: f32,
    },

    /// Identity alignment: match velocity with same-letter neighbors.
    Align {
        /// Detection radius.
        radius: f32,
        /// Gain applied to the velocity difference.
        strength: f32,
    },

    /// Drift along the agent's slowly wandering group heading.
    GroupDrift {
        /// Force magnitude.
        strength: f32,
    },

    /// Spherical containment.
    Contain {
        /// Sphere center.
        center: Vec3,
        /// Sphere radius.
        radius: f32,
        /// Hard push magnitude outside the sphere.
        push: f32,
    },

    /// Per-tick random nudge, no persistence between ticks.
    Wander {
        /// Half-range of each random component.
        strength: f32,
    },
}

impl Rule {
    /// Returns `true` if this rule scans other agents.
    pub fn requires_neighbors(&self) -> bool {
        matches!(
            self,
            Rule::Separate { .. } | Rule::Cohere { .. } | Rule::Align { .. }
        )
    }

    /// Interaction radius of a neighbor rule.
    pub fn radius(&self, group_distance: f32) -> Option<f32> {
        match self {
            Rule::Separate { radius, .. } | Rule::Align { radius, .. } => Some(*radius),
            Rule::Cohere { .. } => Some(group_distance),
            _ => None,
        }
    }

    /// Evaluate this rule for `agent`.
    pub fn force<R: Rng>(
        &self,
        agent: &Agent,
        neighbors: &Neighborhood<'_>,
        group_distance: f32,
        rng: &mut R,
    ) -> Vec3 {
        match *self {
            Rule::Separate { radius, strength } => separation(agent, neighbors, radius, strength),
            Rule::Cohere { strength, orbit } => {
                cohesion(agent, neighbors, group_distance, strength, orbit)
            }
            Rule::Align { radius, strength } => alignment(agent, neighbors, radius, strength),
            Rule::GroupDrift { strength } => group_drift(agent, strength),
            Rule::Contain {
                center,
                radius,
                push,
            } => containment(agent.position, center, radius, push),
            Rule::Wander { strength } => wander(rng, strength),
        }
    }
}

/// A rule and the weight its force carries in the steering sum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedRule {
    #[serde(flatten)]
    pub rule: Rule,
    pub weight: f32,
}

/// The full steering model for separated agents.
///
/// Each tick a separated agent computes
/// `velocity += sum(weight * force) * speed_multiplier`, then damps, clamps to
/// `max_speed * speed_multiplier` and integrates.
///
/// # Example
///
/// ```ignore
/// let flock = Flock::new()
///     .with_rule(Rule::Separate { radius: 1.0, strength: 2.0 }, 0.8)
///     .with_rule(Rule::Contain { center: Vec3::ZERO, radius: 8.0, push: 2.0 }, 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flock {
    /// Rules summed in order.
    pub rules: Vec<WeightedRule>,
    /// Velocity multiplier applied after steering.
    pub damping: f32,
    /// Speed cap before the speed multiplier is applied.
    pub max_speed: f32,
    /// Half-range of the per-axis random walk on the group heading.
    pub heading_jitter: f32,
}

impl Default for Flock {
    fn default() -> Self {
        Self::new()
            .with_rule(Rule::Separate { radius: 1.0, strength: 2.0 }, 0.8)
            .with_rule(Rule::Cohere { strength: 1.5, orbit: 0.3 }, 0.6)
            .with_rule(Rule::Align { radius: 1.0, strength: 0.5 }, 0.4)
            .with_rule(Rule::GroupDrift { strength: 0.8 }, 0.3)
            .with_rule(
                Rule::Contain {
                    center: Vec3::ZERO,
                    radius: 8.0,
                    push: 2.0,
                },
                1.0,
            )
            .with_rule(Rule::Wander { strength: 0.2 }, 0.1)
    }
}

impl Flock {
    /// An empty flock with the standard damping, speed cap and heading jitter.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            damping: 0.98,
            max_speed: 3.0,
            heading_jitter: 0.02,
        }
    }

    /// Append a weighted rule.
    pub fn with_rule(mut self, rule: Rule, weight: f32) -> Self {
        self.rules.push(WeightedRule { rule, weight });
        self
    }

    /// Weighted sum of every rule's force.
    pub fn steer<R: Rng>(
        &self,
        agent: &Agent,
        neighbors: &Neighborhood<'_>,
        group_distance: f32,
        rng: &mut R,
    ) -> Vec3 {
        let mut total = Vec3::ZERO;
        for weighted in &self.rules {
            total += weighted.rule.force(agent, neighbors, group_distance, &mut *rng) * weighted.weight;
        }
        total
    }

    /// Largest interaction radius of any neighbor rule.
    pub fn max_radius(&self, group_distance: f32) -> f32 {
        self.rules
            .iter()
            .filter_map(|w| w.rule.radius(group_distance))
            .fold(0.0, f32::max)
    }

    /// Returns `true` if any rule scans other agents.
    pub fn requires_neighbors(&self) -> bool {
        self.rules.iter().any(|w| w.rule.requires_neighbors())
    }
}
