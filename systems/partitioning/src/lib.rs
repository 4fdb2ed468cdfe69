#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Recursive zone partitioning that carves a plot into corridor-separated zones.

use floorplan_core::{Corridor, CorridorOrientation, GenerationTuning, Zone};
use rand::Rng;

/// Corridors and leaf zones produced by partitioning one rectangle.
///
/// The corridors' strips and the leaf zones together tile the input
/// rectangle exactly, with no overlaps and no gaps.
#[derive(Clone, Debug, Default)]
pub struct Partition {
    /// Corridor strips emitted by every split, in emission order.
    pub corridors: Vec<Corridor>,
    /// Leaf zones awaiting room placement; ordering is not significant.
    pub zones: Vec<Zone>,
}

impl Partition {
    fn leaf(zone: Zone) -> Self {
        Self {
            corridors: Vec::new(),
            zones: vec![zone],
        }
    }

    fn merged(corridor: Corridor, first: Self, second: Self) -> Self {
        let mut corridors =
            Vec::with_capacity(1 + first.corridors.len() + second.corridors.len());
        corridors.push(corridor);
        corridors.extend(first.corridors);
        corridors.extend(second.corridors);

        let mut zones = first.zones;
        zones.extend(second.zones);

        Self { corridors, zones }
    }
}

/// Pure system that recursively splits rectangles with corridor strips.
///
/// Splitting stops at the maximum depth, when neither axis can host a split
/// that leaves room for the smallest input room on both sides, or when the
/// depth-decaying random stop triggers. Degenerate split ranges fall back to
/// an unsplit leaf and are never an error.
#[derive(Clone, Copy, Debug)]
pub struct Partitioner {
    corridor_width: u32,
    min_room_dimension: u32,
    base_split_probability: f64,
    split_probability_decay: f64,
    even_depth_horizontal_bias: f64,
    odd_depth_horizontal_bias: f64,
}

impl Partitioner {
    /// Creates a partitioner from the tuning surface and the smallest side
    /// length found among the rooms to be placed.
    #[must_use]
    pub fn new(tuning: &GenerationTuning, min_room_dimension: u32) -> Self {
        Self {
            corridor_width: tuning.corridor_width,
            min_room_dimension,
            base_split_probability: tuning.base_split_probability,
            split_probability_decay: tuning.split_probability_decay,
            even_depth_horizontal_bias: tuning.even_depth_horizontal_bias,
            odd_depth_horizontal_bias: tuning.odd_depth_horizontal_bias,
        }
    }

    /// Recursively partitions `zone`, drawing all randomness from `rng`.
    pub fn partition<R: Rng>(&self, zone: Zone, max_depth: u32, rng: &mut R) -> Partition {
        self.split(zone, 0, max_depth, rng)
    }

    fn split<R: Rng>(&self, zone: Zone, depth: u32, max_depth: u32, rng: &mut R) -> Partition {
        if depth >= max_depth {
            return Partition::leaf(zone);
        }

        let can_split_horizontal = self.axis_splittable(zone.height());
        let can_split_vertical = self.axis_splittable(zone.width());
        if !can_split_horizontal && !can_split_vertical {
            return Partition::leaf(zone);
        }

        if !rng.gen_bool(self.split_probability(depth)) {
            return Partition::leaf(zone);
        }

        let horizontal = if can_split_horizontal && can_split_vertical {
            rng.gen_bool(self.horizontal_bias(depth))
        } else {
            can_split_horizontal
        };

        if horizontal {
            self.split_horizontal(zone, depth, max_depth, rng)
        } else {
            self.split_vertical(zone, depth, max_depth, rng)
        }
    }

    fn split_horizontal<R: Rng>(
        &self,
        zone: Zone,
        depth: u32,
        max_depth: u32,
        rng: &mut R,
    ) -> Partition {
        let offset = match self.split_offset(zone.height(), rng) {
            Some(offset) => offset,
            None => return Partition::leaf(zone),
        };

        let corridor = Corridor::new(
            CorridorOrientation::Horizontal,
            zone.y() + offset,
            zone.x(),
            zone.right(),
        );
        let top = Zone::new(zone.x(), zone.y(), zone.width(), offset);
        let bottom = Zone::new(
            zone.x(),
            zone.y() + offset + self.corridor_width,
            zone.width(),
            zone.height() - offset - self.corridor_width,
        );

        Partition::merged(
            corridor,
            self.split(top, depth + 1, max_depth, rng),
            self.split(bottom, depth + 1, max_depth, rng),
        )
    }

    fn split_vertical<R: Rng>(
        &self,
        zone: Zone,
        depth: u32,
        max_depth: u32,
        rng: &mut R,
    ) -> Partition {
        let offset = match self.split_offset(zone.width(), rng) {
            Some(offset) => offset,
            None => return Partition::leaf(zone),
        };

        let corridor = Corridor::new(
            CorridorOrientation::Vertical,
            zone.x() + offset,
            zone.y(),
            zone.bottom(),
        );
        let left = Zone::new(zone.x(), zone.y(), offset, zone.height());
        let right = Zone::new(
            zone.x() + offset + self.corridor_width,
            zone.y(),
            zone.width() - offset - self.corridor_width,
            zone.height(),
        );

        Partition::merged(
            corridor,
            self.split(left, depth + 1, max_depth, rng),
            self.split(right, depth + 1, max_depth, rng),
        )
    }

    /// A split along an axis must leave space for the smallest room on both
    /// sides of the reserved corridor strip.
    fn axis_splittable(&self, dimension: u32) -> bool {
        u64::from(dimension)
            > 2 * u64::from(self.min_room_dimension) + u64::from(self.corridor_width)
    }

    fn split_probability(&self, depth: u32) -> f64 {
        (self.base_split_probability - f64::from(depth) * self.split_probability_decay)
            .clamp(0.0, 1.0)
    }

    fn horizontal_bias(&self, depth: u32) -> f64 {
        let bias = if depth % 2 == 0 {
            self.even_depth_horizontal_bias
        } else {
            self.odd_depth_horizontal_bias
        };
        bias.clamp(0.0, 1.0)
    }

    fn split_offset<R: Rng>(&self, dimension: u32, rng: &mut R) -> Option<u32> {
        let min_offset = self.min_room_dimension;
        let max_offset = dimension
            .checked_sub(self.corridor_width)?
            .checked_sub(self.min_room_dimension)?;
        if max_offset <= min_offset {
            return None;
        }
        Some(rng.gen_range(min_offset..=max_offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn partitioner(min_room_dimension: u32) -> Partitioner {
        Partitioner::new(&GenerationTuning::default(), min_room_dimension)
    }

    #[test]
    fn split_probability_decays_and_clamps() {
        let partitioner = partitioner(5);
        assert!((partitioner.split_probability(0) - 0.8).abs() < f64::EPSILON);
        assert!((partitioner.split_probability(2) - 0.5).abs() < f64::EPSILON);
        assert_eq!(partitioner.split_probability(60), 0.0);
    }

    #[test]
    fn axis_needs_room_for_both_halves_and_corridor() {
        let partitioner = partitioner(5);
        // 2 * 5 + 3 = 13: the dimension must strictly exceed it.
        assert!(!partitioner.axis_splittable(13));
        assert!(partitioner.axis_splittable(14));
    }

    #[test]
    fn degenerate_offset_range_yields_none() {
        let partitioner = partitioner(9);
        let mut rng = StepRng::new(0, 1);
        assert_eq!(partitioner.split_offset(12, &mut rng), None);
        assert_eq!(partitioner.split_offset(2, &mut rng), None);
    }
}
