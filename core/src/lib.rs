#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core geometry records shared across the Floorplan engine.
//!
//! This crate defines the value types that flow between the partitioning,
//! packing, and generation systems and out to adapters: room descriptions,
//! placements, corridors, assembled layouts, and the coarse structural
//! signature used to detect duplicate layouts. Systems consume and produce
//! these records; nothing in this crate performs generation itself.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier assigned to a room by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(u32);

impl RoomId {
    /// Creates a new room identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Caller-supplied description of a rectangular room awaiting placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomSpec {
    id: RoomId,
    width: u32,
    height: u32,
}

impl RoomSpec {
    /// Creates a new room description from its identifier and dimensions.
    #[must_use]
    pub const fn new(id: RoomId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Identifier assigned to the room by the caller.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Width of the room in its original orientation.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the room in its original orientation.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Footprint area of the room, independent of orientation.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Length of the room's shortest side.
    #[must_use]
    pub fn min_dimension(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// A room fixed at a position inside the plot, possibly rotated by 90°.
///
/// Created by the packer and never mutated afterwards. The placed dimensions
/// are derived from the underlying [`RoomSpec`]: a rotated placement swaps
/// the spec's width and height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedRoom {
    spec: RoomSpec,
    x: u32,
    y: u32,
    rotated: bool,
}

impl PlacedRoom {
    /// Creates a placement of `spec` with its top-left corner at `(x, y)`.
    #[must_use]
    pub const fn new(spec: RoomSpec, x: u32, y: u32, rotated: bool) -> Self {
        Self {
            spec,
            x,
            y,
            rotated,
        }
    }

    /// Room description this placement originated from.
    #[must_use]
    pub const fn spec(&self) -> RoomSpec {
        self.spec
    }

    /// Identifier of the placed room.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.spec.id()
    }

    /// Horizontal coordinate of the placement's top-left corner.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical coordinate of the placement's top-left corner.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Reports whether the room was rotated by 90° when placed.
    #[must_use]
    pub const fn rotated(&self) -> bool {
        self.rotated
    }

    /// Width occupied by the room in its placed orientation.
    #[must_use]
    pub const fn placed_width(&self) -> u32 {
        if self.rotated {
            self.spec.height()
        } else {
            self.spec.width()
        }
    }

    /// Height occupied by the room in its placed orientation.
    #[must_use]
    pub const fn placed_height(&self) -> u32 {
        if self.rotated {
            self.spec.width()
        } else {
            self.spec.height()
        }
    }

    /// Footprint area of the placement; rotation never changes it.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.spec.area()
    }
}

/// Rectangular sub-region of the plot awaiting room placement.
///
/// Zones are produced by the partitioner, consumed by the packer, and never
/// retained in a finished [`Layout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Zone {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Zone {
    /// Creates a new zone from its top-left corner and dimensions.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal coordinate of the zone's left edge.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical coordinate of the zone's top edge.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Width of the zone.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the zone.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal coordinate of the zone's right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Vertical coordinate of the zone's bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Footprint area of the zone.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Axis along which a corridor separates two zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CorridorOrientation {
    /// The corridor runs top to bottom, splitting a zone along its width.
    Vertical,
    /// The corridor runs left to right, splitting a zone along its height.
    Horizontal,
}

/// Fixed-width strip separating two zones produced by one partition split.
///
/// `position` is the offset of the strip's near edge along the split axis;
/// the strip occupies `position .. position + corridor_width` there, and
/// `start .. end` along the perpendicular axis. The corridor width itself is
/// a policy constant carried by [`GenerationTuning`], reserved by the
/// partitioner when it emits the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corridor {
    orientation: CorridorOrientation,
    position: u32,
    start: u32,
    end: u32,
}

impl Corridor {
    /// Creates a new corridor record.
    #[must_use]
    pub const fn new(
        orientation: CorridorOrientation,
        position: u32,
        start: u32,
        end: u32,
    ) -> Self {
        Self {
            orientation,
            position,
            start,
            end,
        }
    }

    /// Axis along which the corridor separates its two zones.
    #[must_use]
    pub const fn orientation(&self) -> CorridorOrientation {
        self.orientation
    }

    /// Offset of the strip's near edge along the split axis.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Beginning of the corridor's span along the perpendicular axis.
    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// End of the corridor's span along the perpendicular axis (exclusive).
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Length of the corridor along its span.
    #[must_use]
    pub const fn span_length(&self) -> u32 {
        self.end - self.start
    }
}

/// One complete candidate placement of rooms and corridors inside a plot.
///
/// Immutable once assembled; corridors and rooms are stored in emission and
/// placement order respectively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    corridors: Vec<Corridor>,
    rooms: Vec<PlacedRoom>,
}

impl Layout {
    /// Assembles a layout from its corridors and placed rooms.
    #[must_use]
    pub fn new(corridors: Vec<Corridor>, rooms: Vec<PlacedRoom>) -> Self {
        Self { corridors, rooms }
    }

    /// Corridors separating the layout's zones, in emission order.
    #[must_use]
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Rooms placed in the layout, in placement order.
    #[must_use]
    pub fn rooms(&self) -> &[PlacedRoom] {
        &self.rooms
    }

    /// Total area covered by the layout's placed rooms.
    #[must_use]
    pub fn room_area(&self) -> u64 {
        self.rooms.iter().map(PlacedRoom::area).sum()
    }

    /// Derives the coarse structural signature used for deduplication.
    ///
    /// Positions are bucketed into `quantum`-sized bands before sorting, so
    /// two layouts whose rooms and corridors differ by less than one bucket
    /// share a signature. A zero quantum is treated as one (exact equality).
    #[must_use]
    pub fn signature(&self, quantum: u32) -> LayoutSignature {
        let quantum = if quantum == 0 { 1 } else { quantum };

        let mut rooms: Vec<RoomSignature> = self
            .rooms
            .iter()
            .map(|room| RoomSignature {
                id: room.id(),
                column_band: room.x() / quantum,
                row_band: room.y() / quantum,
                rotated: room.rotated(),
            })
            .collect();
        rooms.sort_unstable();

        let mut corridors: Vec<CorridorSignature> = self
            .corridors
            .iter()
            .map(|corridor| CorridorSignature {
                position_band: corridor.position() / quantum,
                orientation: corridor.orientation(),
            })
            .collect();
        corridors.sort_unstable();

        LayoutSignature { rooms, corridors }
    }
}

/// Order-independent digest of one layout used for duplicate detection.
///
/// Two layouts with equal signatures are treated as the same layout even if
/// their exact coordinates differ within a quantization band.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutSignature {
    rooms: Vec<RoomSignature>,
    corridors: Vec<CorridorSignature>,
}

/// Quantized placement of one room within a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct RoomSignature {
    id: RoomId,
    column_band: u32,
    row_band: u32,
    rotated: bool,
}

/// Quantized position of one corridor within a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct CorridorSignature {
    position_band: u32,
    orientation: CorridorOrientation,
}

/// Dimensions of the rectangular plot that layouts are generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlotSize {
    width: u32,
    height: u32,
}

impl PlotSize {
    /// Creates a new plot size descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the plot.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the plot.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total area of the plot.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Aggregated policy knobs controlling partitioning, acceptance, and
/// deduplication.
#[derive(Clone, Debug)]
pub struct GenerationTuning {
    /// Width of the strip reserved for every corridor emitted by a split.
    pub corridor_width: u32,
    /// Fraction of the plot area that placed rooms may cover; denser
    /// candidates are rejected so circulation space survives.
    pub coverage_limit: f64,
    /// Bucket size used when quantizing positions for signatures; larger
    /// values treat more near-identical layouts as duplicates.
    pub signature_quantum: u32,
    /// Smallest maximum recursion depth an attempt may draw.
    pub min_partition_depth: u32,
    /// Largest maximum recursion depth an attempt may draw.
    pub max_partition_depth: u32,
    /// Probability of splitting at depth zero; deeper levels subtract the
    /// decay so trees bias toward shallow splits and large zones.
    pub base_split_probability: f64,
    /// Amount removed from the split probability per recursion level.
    pub split_probability_decay: f64,
    /// Probability of preferring a horizontal split at even depths when
    /// both axes are feasible.
    pub even_depth_horizontal_bias: f64,
    /// Probability of preferring a horizontal split at odd depths when
    /// both axes are feasible.
    pub odd_depth_horizontal_bias: f64,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            corridor_width: 3,
            coverage_limit: 0.7,
            signature_quantum: 5,
            min_partition_depth: 3,
            max_partition_depth: 5,
            base_split_probability: 0.8,
            split_probability_decay: 0.15,
            even_depth_horizontal_bias: 0.6,
            odd_depth_horizontal_bias: 0.4,
        }
    }
}

/// Fatal input errors surfaced before any generation attempt runs.
///
/// These are caller mistakes, not generation outcomes: an exhausted attempt
/// budget yields an empty result collection, never an error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request contained no rooms at all.
    #[error("room list is empty")]
    NoRooms,
    /// A room was described with a zero width or height.
    #[error("room {} has a zero width or height", .id.get())]
    InvalidRoomDimensions {
        /// Identifier of the offending room.
        id: RoomId,
    },
    /// Two rooms in the request share an identifier.
    #[error("room id {} appears more than once", .id.get())]
    DuplicateRoomId {
        /// Identifier that appeared more than once.
        id: RoomId,
    },
    /// The plot was described with a zero width or height.
    #[error("plot dimensions {width}x{height} must both be positive")]
    InvalidPlotDimensions {
        /// Requested plot width.
        width: u32,
        /// Requested plot height.
        height: u32,
    },
    /// The layout or attempt budget was zero.
    #[error("layout and attempt budgets must both be positive")]
    InvalidBudget,
}
