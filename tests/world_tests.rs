//! Integration tests for the word swarm.
//!
//! These drive a [`World`] through its public API the way a host would:
//! utterances in, ticks forward, agents and render state out.

use glam::Vec3;
use wordswarm::rules::{cohesion, containment, Neighborhood};
use wordswarm::{Agent, Lifecycle, SpatialConfig, World};

const DT: f32 = 1.0 / 60.0;

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

fn letters(world: &World) -> String {
    world.agents().iter().map(|a| a.identity()).collect()
}

// ============================================================================
// Kinematics
// ============================================================================

#[test]
fn test_velocity_never_exceeds_cap() {
    let mut world = World::with_seed(42).with_lifecycle(Lifecycle::new().separation_delay(0.0..0.5));
    world.ingest("aaaa bbbb aaaa swarm");

    for frame in 0..600 {
        match frame {
            150 => {
                world.ingest("faster");
            }
            300 => {
                world.ingest("slower slower slower");
            }
            450 => {
                world.ingest("normal");
            }
            _ => {}
        }
        world.tick(DT);

        let cap = 3.0 * world.params().speed_multiplier();
        for agent in world.agents() {
            assert!(
                agent.velocity.length() <= cap + 1e-4,
                "frame {frame}: {} > {cap}",
                agent.velocity.length()
            );
        }
    }
}

#[test]
fn test_frozen_forming_agents_hold_still() {
    let mut world = World::with_seed(7);
    world.ingest("frozen words");
    world.tick(DT);
    world.tick(DT);

    world.ingest("freeze");
    world.tick(DT);
    let before: Vec<(Vec3, f32)> = world
        .agents()
        .iter()
        .map(|a| (a.position, a.separation_timer()))
        .collect();
    assert!(world.agents().iter().all(|a| !a.is_separated()));

    for _ in 0..600 {
        world.tick(DT);
    }

    let after: Vec<(Vec3, f32)> = world
        .agents()
        .iter()
        .map(|a| (a.position, a.separation_timer()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_every_letter_separates_eventually() {
    let mut world = World::with_seed(3);
    world.ingest("hello world");
    for _ in 0..360 {
        world.tick(DT);
    }
    assert_eq!(world.agents().len(), 10);
    assert!(world.agents().iter().all(|a| a.is_separated()));
}

// ============================================================================
// Forces
// ============================================================================

#[test]
fn test_same_letters_pull_toward_midpoint() {
    let agents = [
        Agent::separated('s', Vec3::new(-1.0, 1.0, 0.0), Vec3::ZERO),
        Agent::separated('s', Vec3::new(3.0, 1.0, 0.0), Vec3::ZERO),
    ];
    let hood = Neighborhood::all(&agents);
    let midpoint = (agents[0].position + agents[1].position) / 2.0;

    for agent in &agents {
        let force = cohesion(agent, &hood, 8.0, 1.5, 0.3);
        assert!(force.length() > 0.0);
        let toward = (midpoint - agent.position).normalize();
        // The orbit term is perpendicular, so the pull survives projection.
        assert!((force.dot(toward) - 1.5).abs() < 1e-5);
    }
}

#[test]
fn test_boundary_push_outside_sphere() {
    let force = containment(Vec3::new(6.0, 8.0, 0.0), Vec3::ZERO, 8.0, 2.0);
    assert!(close(force, Vec3::new(-0.6, -0.8, 0.0) * 2.0));
    assert!((force.length() - 2.0).abs() < 1e-6);
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_cat_dog_formation() {
    let mut world = World::with_seed(1);
    world.ingest("cat dog");
    world.tick(0.0);

    let expected = [
        ('c', Vec3::new(-0.9, 2.0, 0.0)),
        ('a', Vec3::new(-0.3, 2.0, 0.0)),
        ('t', Vec3::new(0.3, 2.0, 0.0)),
        ('d', Vec3::new(-0.9, 1.0, 0.0)),
        ('o', Vec3::new(-0.3, 1.0, 0.0)),
        ('g', Vec3::new(0.3, 1.0, 0.0)),
    ];
    assert_eq!(world.agents().len(), 6);
    for (agent, (letter, slot)) in world.agents().iter().zip(expected) {
        assert_eq!(agent.identity(), letter);
        assert!(close(agent.position, slot));
        assert!(close(agent.target, slot));
    }
}

#[test]
fn test_last_color_keyword_wins() {
    let mut world = World::with_seed(1);
    world.ingest("red blue");
    assert_eq!(world.params().background(), Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn test_reset_clears_population() {
    let mut world = World::with_seed(5);
    world.ingest("some words here");
    world.tick(DT);
    assert_eq!(world.agents().len(), 13);

    world.ingest("freeze and reset");
    let report = world.tick(DT);
    assert!(report.reset);
    assert!(world.agents().is_empty());

    world.ingest("unfreeze");
    world.tick(DT);
    assert_eq!(letters(&world), "unfreeze");
}

#[test]
fn test_reset_utterance_spawns_itself() {
    let mut world = World::with_seed(5);
    world.ingest("old letters");
    world.tick(DT);

    world.ingest("reset");
    world.tick(DT);
    assert_eq!(letters(&world), "reset");
}

#[test]
fn test_busy_gate_blocks_everything() {
    let mut world = World::with_seed(9);
    world.ingest("listen to the rain");
    let report = world.tick(DT);
    assert_eq!(report.cues.len(), 1);
    assert_eq!(report.cues[0].file_name(), "rain-sounds.wav");
    assert!(world.agents().is_empty());

    let speed = world.params().speed_multiplier();
    let interpretation = world.ingest("green huge close faster thunder cat");
    assert!(interpretation.is_empty());

    let report = world.tick(DT);
    assert!(report.cues.is_empty());
    assert_eq!(report.spawned, 0);
    assert_eq!(world.params().background(), Vec3::ZERO);
    assert_eq!(world.params().word_height(), 0.5);
    assert_eq!(world.params().group_distance(), 8.0);
    assert_eq!(world.params().speed_multiplier(), speed);

    world.playback_finished();
    world.ingest("cat");
    world.tick(DT);
    assert_eq!(letters(&world), "cat");
}

#[test]
fn test_params_apply_while_frozen() {
    let mut world = World::with_seed(2);
    world.ingest("freeze");
    world.ingest("yellow spread cat");
    world.tick(DT);

    assert_eq!(world.params().background(), Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(world.params().group_distance(), 15.0);
    assert!(world.agents().is_empty());
}

#[test]
fn test_grid_world_matches_brute_force_world() {
    let mut brute = World::with_seed(12).with_lifecycle(Lifecycle::new().separation_delay(0.0..1.0));
    let mut grid = World::with_seed(12)
        .with_lifecycle(Lifecycle::new().separation_delay(0.0..1.0))
        .with_spatial(SpatialConfig::new(1.0));

    for world in [&mut brute, &mut grid] {
        world.ingest("the quick brown fox jumps over the lazy dog");
    }
    for _ in 0..240 {
        brute.tick(DT);
        grid.tick(DT);
    }
    assert_eq!(brute.agents(), grid.agents());
}

#[test]
fn test_render_view_colors() {
    let mut world = World::with_seed(4).with_lifecycle(Lifecycle::new().separation_delay(0.0..0.0));
    world.ingest("ab");
    world.tick(DT);

    let view = world.view();
    let glyphs: Vec<_> = view.glyphs().collect();
    assert!(glyphs.iter().all(|g| g.separated));
    assert_eq!(glyphs[0].color.truncate(), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(glyphs[1].color.truncate(), Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(glyphs[0].color.w, 1.0);
}
