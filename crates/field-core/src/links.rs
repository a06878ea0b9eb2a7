//! Proximity links between particles of the primary group.
//!
//! A rebuild clears the output edge set and refills it with every pair closer
//! than `max_distance`, stopping once `cap` edges have been emitted. Pairs
//! are visited in ascending `(i, j)` order by both builders, so they agree on
//! which edges survive the cap.

use crate::config::{LinkParams, LinkStrategy};
use fnv::FnvHashMap;
use glam::{IVec3, Vec3};
use smallvec::SmallVec;

/// Flat line-segment buffer, six floats (two endpoints) per edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeSet {
    data: Vec<f32>,
}

impl EdgeSet {
    pub const FLOATS_PER_EDGE: usize = 6;

    pub fn with_capacity(edges: usize) -> Self {
        Self {
            data: Vec::with_capacity(edges * Self::FLOATS_PER_EDGE),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / Self::FLOATS_PER_EDGE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn push(&mut self, a: Vec3, b: Vec3) {
        self.data.extend_from_slice(&[a.x, a.y, a.z, b.x, b.y, b.z]);
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.data
            .chunks_exact(Self::FLOATS_PER_EDGE)
            .map(|c| (Vec3::new(c[0], c[1], c[2]), Vec3::new(c[3], c[4], c[5])))
    }
}

pub trait LinkBuilder {
    fn rebuild(&mut self, positions: &[Vec3], params: &LinkParams, out: &mut EdgeSet);
}

/// All-pairs scan with early exit at the cap.
#[derive(Debug, Default)]
pub struct QuadraticLinks;

impl LinkBuilder for QuadraticLinks {
    fn rebuild(&mut self, positions: &[Vec3], params: &LinkParams, out: &mut EdgeSet) {
        out.clear();
        if params.cap == 0 {
            return;
        }
        let max_sq = params.max_distance_sq();
        for (i, &a) in positions.iter().enumerate() {
            for &b in &positions[i + 1..] {
                if a.distance_squared(b) < max_sq {
                    out.push(a, b);
                    if out.len() >= params.cap {
                        return;
                    }
                }
            }
        }
    }
}

const NEIGHBOR_OFFSETS: [IVec3; 27] = {
    let mut out = [IVec3::ZERO; 27];
    let mut n = 0;
    let mut z = -1;
    while z <= 1 {
        let mut y = -1;
        while y <= 1 {
            let mut x = -1;
            while x <= 1 {
                out[n] = IVec3::new(x, y, z);
                n += 1;
                x += 1;
            }
            y += 1;
        }
        z += 1;
    }
    out
};

const CELL_MIN: IVec3 = IVec3::splat(i32::MIN + 1);
const CELL_MAX: IVec3 = IVec3::splat(i32::MAX - 1);

/// Uniform spatial hash with cells as wide as the link distance.
///
/// Only the 27 cells around a particle can hold a partner, so each rebuild
/// is close to linear in the particle count for sparse fields.
#[derive(Debug, Default)]
pub struct GridLinks {
    cells: FnvHashMap<IVec3, SmallVec<[u32; 8]>>,
    candidates: Vec<u32>,
}

impl GridLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell coordinates stay one short of the i32 limits so a neighbour
    /// offset never overflows. Clamping is monotone, so pairs within the
    /// link distance still land in adjacent cells.
    #[inline]
    fn cell_of(p: Vec3, inv_cell: f32) -> IVec3 {
        (p * inv_cell)
            .floor()
            .as_ivec3()
            .clamp(CELL_MIN, CELL_MAX)
    }
}

impl LinkBuilder for GridLinks {
    fn rebuild(&mut self, positions: &[Vec3], params: &LinkParams, out: &mut EdgeSet) {
        out.clear();
        if params.cap == 0 || !(params.max_distance > 0.0) {
            return;
        }
        let inv_cell = params.max_distance.recip();
        let max_sq = params.max_distance_sq();

        // Keep bucket allocations between rebuilds.
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        for (i, &p) in positions.iter().enumerate() {
            self.cells
                .entry(Self::cell_of(p, inv_cell))
                .or_default()
                .push(i as u32);
        }
        self.cells.retain(|_, bucket| !bucket.is_empty());

        for (i, &a) in positions.iter().enumerate() {
            let home = Self::cell_of(a, inv_cell);
            self.candidates.clear();
            for offset in NEIGHBOR_OFFSETS {
                let Some(bucket) = self.cells.get(&(home + offset)) else {
                    continue;
                };
                self.candidates.extend(
                    bucket
                        .iter()
                        .copied()
                        .filter(|&j| {
                            j as usize > i && a.distance_squared(positions[j as usize]) < max_sq
                        }),
                );
            }
            self.candidates.sort_unstable();
            for &j in &self.candidates {
                out.push(a, positions[j as usize]);
                if out.len() >= params.cap {
                    return;
                }
            }
        }
    }
}

/// Builder chosen at runtime from [`LinkStrategy`].
#[derive(Debug)]
pub enum Links {
    Quadratic(QuadraticLinks),
    Grid(GridLinks),
}

impl Links {
    pub fn for_strategy(strategy: LinkStrategy) -> Self {
        match strategy {
            LinkStrategy::Quadratic => Self::Quadratic(QuadraticLinks),
            LinkStrategy::Grid => Self::Grid(GridLinks::new()),
        }
    }
}

impl LinkBuilder for Links {
    fn rebuild(&mut self, positions: &[Vec3], params: &LinkParams, out: &mut EdgeSet) {
        match self {
            Self::Quadratic(b) => b.rebuild(positions, params, out),
            Self::Grid(b) => b.rebuild(positions, params, out),
        }
        log::trace!("rebuilt {} proximity links", out.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_set_stores_six_floats_per_edge() {
        let mut e = EdgeSet::with_capacity(2);
        e.push(Vec3::ZERO, Vec3::X);
        assert_eq!(e.len(), 1);
        assert_eq!(e.as_slice(), &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(e.segments().next(), Some((Vec3::ZERO, Vec3::X)));
    }

    #[test]
    fn neighbor_offsets_cover_the_cube() {
        assert!(NEIGHBOR_OFFSETS.contains(&IVec3::ZERO));
        assert!(NEIGHBOR_OFFSETS.contains(&IVec3::new(-1, 1, -1)));
        assert_eq!(NEIGHBOR_OFFSETS.len(), 27);
    }
}
