//! Spatial indexing for broad-phase collision queries.
//!
//! Each tick the arena indexes active foe positions in a KD-tree so every
//! projectile only runs the exact overlap test against nearby foes.

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use macroquad::math::Vec2;

use super::foe::Foe;

/// Type alias for 2D spatial KD-tree used for efficient neighbor queries.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

/// Result of a spatial radius query: `(distance_squared, index)` pairs.
pub type SpatialQueryResult = Vec<(f32, usize)>;

/// KD-tree over the active foes of one tick.
pub struct SpatialIndex {
    foes: Tree2D,
    /// Half-diagonal of the largest indexed foe, so queries can be padded to
    /// catch any box that might overlap.
    max_reach: f32,
}

impl SpatialIndex {
    /// Builds an index over the active foes in `foes`.
    ///
    /// Indices in query results refer to positions in the `foes` slice.
    pub fn build(foes: &[Foe]) -> Result<Self, KdTreeError> {
        let mut tree = KdTree::with_capacity(2, foes.len().max(1));
        let mut max_reach: f32 = 0.0;
        for (i, foe) in foes.iter().enumerate() {
            if !foe.is_active() {
                continue;
            }
            tree.add(vec![foe.pos.x, foe.pos.y], i)?;
            max_reach = max_reach.max(foe.size.length() / 2.0);
        }
        Ok(Self {
            foes: tree,
            max_reach,
        })
    }

    /// Half-diagonal of the largest indexed foe.
    pub fn max_reach(&self) -> f32 {
        self.max_reach
    }

    /// Query foes whose centre lies within `radius` of `pos`.
    ///
    /// # Returns
    ///
    /// Vector of (`distance_squared`, index) pairs, nearest first.
    pub fn query_foes(&self, pos: Vec2, radius: f32) -> SpatialQueryResult {
        self.foes
            .within(&[pos.x, pos.y], radius.powi(2), &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(dist, &idx)| (dist, idx))
            .collect()
    }
}
