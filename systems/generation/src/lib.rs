#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic layout generation: seeded attempts, acceptance, dedup.
//!
//! One attempt partitions the plot into corridor-separated zones, shuffles
//! them, and shelf-packs the room list zone by zone. The attempt is accepted
//! when it placed at least one room without covering more than the tuned
//! fraction of the plot. The generation loop replays attempts with seeds
//! `0, 1, 2, …` and keeps the first occurrence of every structural
//! signature, so identical inputs always yield the identical ordered result.

use std::collections::HashSet;

use floorplan_core::{
    GenerationError, GenerationTuning, Layout, LayoutSignature, PlotSize, RoomSpec, Zone,
};
use floorplan_system_packing::pack;
use floorplan_system_partitioning::{Partition, Partitioner};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Records layout signatures and rejects structural repeats.
#[derive(Debug, Default)]
pub struct DeduplicationIndex {
    seen: HashSet<LayoutSignature>,
}

impl DeduplicationIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a signature, returning `false` when it was already present.
    pub fn insert(&mut self, signature: LayoutSignature) -> bool {
        self.seen.insert(signature)
    }

    /// Number of distinct signatures recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Reports whether no signature has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Runs one fully seeded generation attempt.
///
/// Returns `None` when the candidate fails the acceptance test: either no
/// room could be placed, or the placed rooms cover more of the plot than the
/// tuned coverage limit allows. Rejection is a normal outcome, not an error.
#[must_use]
pub fn build_attempt(
    rooms: &[RoomSpec],
    plot: PlotSize,
    tuning: &GenerationTuning,
    seed: u64,
) -> Option<Layout> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let max_depth = rng.gen_range(tuning.min_partition_depth..=tuning.max_partition_depth);
    let partitioner = Partitioner::new(tuning, min_room_dimension(rooms));
    let plot_zone = Zone::new(0, 0, plot.width(), plot.height());
    let Partition {
        corridors,
        mut zones,
    } = partitioner.partition(plot_zone, max_depth, &mut rng);

    // Zone visit order decides which rooms compete for which zone, so the
    // shuffle is part of the attempt's identity.
    zones.shuffle(&mut rng);

    let mut remaining: Vec<RoomSpec> = rooms.to_vec();
    let mut placed = Vec::new();
    for zone in zones {
        if remaining.is_empty() {
            break;
        }
        let packing = pack(remaining, zone, true, &mut rng);
        placed.extend(packing.placed);
        remaining = packing.remaining;
    }

    if placed.is_empty() {
        return None;
    }

    let layout = Layout::new(corridors, placed);
    if coverage_accepted(layout.room_area(), plot, tuning) {
        Some(layout)
    } else {
        None
    }
}

/// Generates up to `max_layouts` unique layouts using the default tuning.
///
/// Attempts are seeded with their ordinal index, so the returned sequence is
/// a pure function of the arguments. An exhausted attempt budget yields a
/// shorter (possibly empty) sequence, never an error.
pub fn generate_layouts(
    rooms: &[RoomSpec],
    plot: PlotSize,
    max_layouts: u32,
    max_attempts: u32,
) -> Result<Vec<Layout>, GenerationError> {
    generate_layouts_with(rooms, plot, max_layouts, max_attempts, &GenerationTuning::default())
}

/// Generates up to `max_layouts` unique layouts under an explicit tuning.
pub fn generate_layouts_with(
    rooms: &[RoomSpec],
    plot: PlotSize,
    max_layouts: u32,
    max_attempts: u32,
    tuning: &GenerationTuning,
) -> Result<Vec<Layout>, GenerationError> {
    validate(rooms, plot, max_layouts, max_attempts)?;

    let mut layouts = Vec::new();
    let mut index = DeduplicationIndex::new();

    for attempt in 0..max_attempts {
        if layouts.len() >= max_layouts as usize {
            break;
        }

        if let Some(layout) = build_attempt(rooms, plot, tuning, u64::from(attempt)) {
            if index.insert(layout.signature(tuning.signature_quantum)) {
                layouts.push(layout);
            }
        }
    }

    Ok(layouts)
}

fn validate(
    rooms: &[RoomSpec],
    plot: PlotSize,
    max_layouts: u32,
    max_attempts: u32,
) -> Result<(), GenerationError> {
    if rooms.is_empty() {
        return Err(GenerationError::NoRooms);
    }

    let mut ids = HashSet::with_capacity(rooms.len());
    for room in rooms {
        if room.width() == 0 || room.height() == 0 {
            return Err(GenerationError::InvalidRoomDimensions { id: room.id() });
        }
        if !ids.insert(room.id()) {
            return Err(GenerationError::DuplicateRoomId { id: room.id() });
        }
    }

    if plot.width() == 0 || plot.height() == 0 {
        return Err(GenerationError::InvalidPlotDimensions {
            width: plot.width(),
            height: plot.height(),
        });
    }

    if max_layouts == 0 || max_attempts == 0 {
        return Err(GenerationError::InvalidBudget);
    }

    Ok(())
}

fn coverage_accepted(room_area: u64, plot: PlotSize, tuning: &GenerationTuning) -> bool {
    room_area as f64 <= plot.area() as f64 * tuning.coverage_limit
}

fn min_room_dimension(rooms: &[RoomSpec]) -> u32 {
    rooms
        .iter()
        .map(RoomSpec::min_dimension)
        .min()
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::RoomId;

    fn room(id: u32, width: u32, height: u32) -> RoomSpec {
        RoomSpec::new(RoomId::new(id), width, height)
    }

    #[test]
    fn empty_room_list_is_rejected() {
        let result = generate_layouts(&[], PlotSize::new(20, 20), 5, 50);
        assert_eq!(result, Err(GenerationError::NoRooms));
    }

    #[test]
    fn zero_dimension_room_is_rejected() {
        let rooms = vec![room(1, 10, 0)];
        let result = generate_layouts(&rooms, PlotSize::new(20, 20), 5, 50);
        assert_eq!(
            result,
            Err(GenerationError::InvalidRoomDimensions { id: RoomId::new(1) })
        );
    }

    #[test]
    fn duplicate_room_id_is_rejected() {
        let rooms = vec![room(1, 10, 12), room(1, 7, 14)];
        let result = generate_layouts(&rooms, PlotSize::new(20, 20), 5, 50);
        assert_eq!(
            result,
            Err(GenerationError::DuplicateRoomId { id: RoomId::new(1) })
        );
    }

    #[test]
    fn degenerate_plot_is_rejected() {
        let rooms = vec![room(1, 10, 12)];
        let result = generate_layouts(&rooms, PlotSize::new(0, 20), 5, 50);
        assert_eq!(
            result,
            Err(GenerationError::InvalidPlotDimensions {
                width: 0,
                height: 20
            })
        );
    }

    #[test]
    fn zero_budgets_are_rejected() {
        let rooms = vec![room(1, 10, 12)];
        assert_eq!(
            generate_layouts(&rooms, PlotSize::new(20, 20), 0, 50),
            Err(GenerationError::InvalidBudget)
        );
        assert_eq!(
            generate_layouts(&rooms, PlotSize::new(20, 20), 5, 0),
            Err(GenerationError::InvalidBudget)
        );
    }

    #[test]
    fn smallest_room_side_feeds_the_partitioner() {
        let rooms = vec![room(1, 10, 12), room(2, 15, 8), room(3, 7, 14)];
        assert_eq!(min_room_dimension(&rooms), 7);
    }

    #[test]
    fn coverage_test_is_inclusive_below_the_limit() {
        let tuning = GenerationTuning::default();
        let plot = PlotSize::new(20, 20);
        assert!(coverage_accepted(279, plot, &tuning));
        assert!(!coverage_accepted(281, plot, &tuning));
    }

    #[test]
    fn repeated_signature_is_reported_as_duplicate() {
        let layout = Layout::new(Vec::new(), Vec::new());
        let mut index = DeduplicationIndex::new();
        assert!(index.insert(layout.signature(5)));
        assert!(!index.insert(layout.signature(5)));
        assert_eq!(index.len(), 1);
    }
}
