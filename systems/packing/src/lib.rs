#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy shelf packing of rooms into a single rectangular zone.

use floorplan_core::{PlacedRoom, RoomSpec, Zone};
use rand::{seq::SliceRandom, Rng};

/// Outcome of packing one zone.
///
/// Every input room appears in exactly one of the two collections: `placed`
/// in placement order, `remaining` preserving the relative order of rooms
/// that never fit.
#[derive(Clone, Debug, Default)]
pub struct Packing {
    /// Rooms fixed inside the zone, in placement order.
    pub placed: Vec<PlacedRoom>,
    /// Rooms that found no position in this zone.
    pub remaining: Vec<RoomSpec>,
}

/// Packs `rooms` into `zone` using left-to-right shelf rows.
///
/// Each room is tried in both orientations at the current cursor; when
/// `randomize` is set the processing order is shuffled and the orientation
/// attempted first is chosen at random. A row is closed once a full pass
/// over the pending rooms places nothing, at which point packing for the
/// zone stops, since another pass could not change the outcome.
pub fn pack<R: Rng>(rooms: Vec<RoomSpec>, zone: Zone, randomize: bool, rng: &mut R) -> Packing {
    let mut pending = rooms;
    if randomize {
        pending.shuffle(rng);
    }

    let mut placed = Vec::new();
    let mut cursor_y = zone.y();

    while !pending.is_empty() && cursor_y < zone.bottom() {
        let mut cursor_x = zone.x();
        let mut row_height = 0u32;
        let mut placed_in_row = false;
        let mut still_pending = Vec::with_capacity(pending.len());

        for spec in pending {
            let mut orientations = [
                (false, spec.width(), spec.height()),
                (true, spec.height(), spec.width()),
            ];
            if randomize && rng.gen_bool(0.5) {
                orientations.reverse();
            }

            let mut placement = None;
            for (rotated, width, height) in orientations {
                if fits(cursor_x, cursor_y, width, height, zone) {
                    placement = Some((rotated, width, height));
                    break;
                }
            }

            match placement {
                Some((rotated, width, height)) => {
                    placed.push(PlacedRoom::new(spec, cursor_x, cursor_y, rotated));
                    cursor_x += width;
                    row_height = row_height.max(height);
                    placed_in_row = true;
                }
                None => still_pending.push(spec),
            }
        }

        pending = still_pending;

        if !placed_in_row {
            break;
        }
        cursor_y += row_height;
    }

    Packing {
        placed,
        remaining: pending,
    }
}

/// Hard fit invariant: a placement must end inside the zone on both axes.
fn fits(cursor_x: u32, cursor_y: u32, width: u32, height: u32, zone: Zone) -> bool {
    u64::from(cursor_x) + u64::from(width) <= u64::from(zone.right())
        && u64::from(cursor_y) + u64::from(height) <= u64::from(zone.bottom())
}
