//! Uniform-grid spatial hashing for neighbor queries.
//!
//! Every force pass scans the population once per agent, which is O(n²).
//! Bucketing agents into cubic cells lets radius queries touch only the
//! cells that overlap the query sphere. Candidates come back sorted by
//! population index so force sums match a brute-force scan exactly.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;

/// Configuration for the spatial grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialConfig {
    /// Edge length of each cubic cell in world units.
    pub cell_size: f32,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self { cell_size: 2.0 }
    }
}

impl SpatialConfig {
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "Cell size must be positive");
        Self { cell_size }
    }
}

type CellKey = (i32, i32, i32);

/// Agents bucketed by cell, rebuilt from each tick's snapshot.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    /// Bucket every agent of `agents` by position.
    pub fn build(agents: &[Agent], cell_size: f32) -> Self {
        let mut grid = Self {
            cell_size,
            cells: HashMap::new(),
        };
        for (index, agent) in agents.iter().enumerate() {
            let key = grid.cell_of(agent.position);
            grid.cells.entry(key).or_default().push(index);
        }
        grid
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    fn cell_of(&self, position: Vec3) -> CellKey {
        let cell = (position / self.cell_size).floor();
        (cell.x as i32, cell.y as i32, cell.z as i32)
    }

    /// Indices of all agents in cells overlapping the cube around the query
    /// sphere, in ascending order.
    pub fn candidates(&self, center: Vec3, radius: f32) -> Vec<usize> {
        let lo = self.cell_of(center - Vec3::splat(radius));
        let hi = self.cell_of(center + Vec3::splat(radius));
        let in_range = |key: &CellKey| {
            (lo.0..=hi.0).contains(&key.0)
                && (lo.1..=hi.1).contains(&key.1)
                && (lo.2..=hi.2).contains(&key.2)
        };

        let span = |a: i32, b: i32| (b as i64 - a as i64 + 1).max(0) as u64;
        let volume = span(lo.0, hi.0)
            .saturating_mul(span(lo.1, hi.1))
            .saturating_mul(span(lo.2, hi.2));

        let mut found = Vec::new();
        if volume > self.cells.len() as u64 {
            // Query box larger than the occupied set: walk occupied cells instead.
            for (key, members) in &self.cells {
                if in_range(key) {
                    found.extend_from_slice(members);
                }
            }
        } else {
            for x in lo.0..=hi.0 {
                for y in lo.1..=hi.1 {
                    for z in lo.2..=hi.2 {
                        if let Some(members) = self.cells.get(&(x, y, z)) {
                            found.extend_from_slice(members);
                        }
                    }
                }
            }
        }
        found.sort_unstable();
        found
    }
}
