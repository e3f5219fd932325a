//! Per-position normal accumulation.
//!
//! Vertices are grouped by exact position. Positions that differ only by
//! floating-point noise stay separate groups; no epsilon welding is done.

use std::collections::HashMap;

use glam::Vec3;

/// Hashable exact-equality key for a vertex position.
///
/// Stores the IEEE-754 bit pattern of each component, with `-0.0` folded
/// into `+0.0` so the key agrees with `==` on signed zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey([u32; 3]);

impl PositionKey {
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        // Adding +0.0 turns -0.0 into +0.0 and leaves every other value alone.
        Self(position.to_array().map(|c| (c + 0.0).to_bits()))
    }

    #[must_use]
    pub fn position(self) -> Vec3 {
        Vec3::from_array(self.0.map(f32::from_bits))
    }
}

impl From<Vec3> for PositionKey {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

/// Immutable table of summed normals, keyed by exact position.
///
/// Sums are raw vector sums: neither the individual normals nor the totals
/// are normalized, so a position shared by more (or longer) normals carries
/// more weight in its direction.
#[derive(Debug, Clone, Default)]
pub struct AccumulatedNormals {
    sums: HashMap<PositionKey, Vec3>,
}

impl AccumulatedNormals {
    /// Sum `normals` per unique position, in input order.
    #[must_use]
    pub fn build(positions: &[Vec3], normals: &[Vec3]) -> Self {
        debug_assert_eq!(
            positions.len(),
            normals.len(),
            "position and normal arrays must be index-aligned"
        );

        let mut sums = HashMap::with_capacity(positions.len());
        for (&position, &normal) in positions.iter().zip(normals) {
            sums.entry(PositionKey::new(position))
                .and_modify(|sum| *sum += normal)
                .or_insert(normal);
        }

        Self { sums }
    }

    /// Summed normal at `position`, if any vertex was recorded there.
    #[must_use]
    pub fn get(&self, position: Vec3) -> Option<Vec3> {
        self.sums.get(&PositionKey::new(position)).copied()
    }

    /// Number of unique positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Iterate `(position, summed normal)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.sums.iter().map(|(key, &sum)| (key.position(), sum))
    }
}
