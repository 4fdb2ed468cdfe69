#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Declarative scene composition for presenting generated layouts.
//!
//! Adapters hand a [`floorplan_core::Layout`] to [`LayoutScene::compose`]
//! and receive a flat list of colored rectangles and labels; backends such
//! as the bundled SVG writer turn that scene into an actual image. Scene
//! composition never mutates the layout and performs no geometry beyond
//! mapping integer world units onto floating-point drawing space.

use std::{error::Error, fmt};

use floorplan_core::{CorridorOrientation, Layout, PlotSize, RoomId};
use glam::Vec2;

pub mod svg;

/// RGBA color used when presenting scenes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: f32::from(red) / 255.0,
            green: f32::from(green) / 255.0,
            blue: f32::from(blue) / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            red: self.red,
            green: self.green,
            blue: self.blue,
            alpha,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors applied when composing a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneTheme {
    /// Fill behind the whole plot.
    pub background: Color,
    /// Stroke drawn around the plot boundary.
    pub boundary: Color,
    /// Fill applied to corridor strips.
    pub corridor_fill: Color,
    /// Stroke drawn around corridor strips.
    pub corridor_outline: Color,
    /// Stroke drawn around room rectangles.
    pub room_outline: Color,
    /// Color used for room labels.
    pub label: Color,
    /// Room fills, cycled by room identifier.
    pub room_palette: Vec<Color>,
}

impl Default for SceneTheme {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0xff, 0xff, 0xff),
            boundary: Color::from_rgb_u8(0x00, 0x00, 0x00),
            corridor_fill: Color::from_rgb_u8(0xd3, 0xd3, 0xd3).with_alpha(0.7),
            corridor_outline: Color::from_rgb_u8(0x80, 0x80, 0x80),
            room_outline: Color::from_rgb_u8(0x00, 0x00, 0x8b),
            label: Color::from_rgb_u8(0x1a, 0x1a, 0x1a),
            room_palette: default_room_palette(),
        }
    }
}

/// Pastel fills cycled across room identifiers.
fn default_room_palette() -> Vec<Color> {
    vec![
        Color::from_rgb_u8(0x8d, 0xd3, 0xc7),
        Color::from_rgb_u8(0xff, 0xff, 0xb3),
        Color::from_rgb_u8(0xbe, 0xba, 0xda),
        Color::from_rgb_u8(0xfb, 0x80, 0x72),
        Color::from_rgb_u8(0x80, 0xb1, 0xd3),
        Color::from_rgb_u8(0xfd, 0xb4, 0x62),
        Color::from_rgb_u8(0xb3, 0xde, 0x69),
        Color::from_rgb_u8(0xfc, 0xcd, 0xe5),
        Color::from_rgb_u8(0xd9, 0xd9, 0xd9),
        Color::from_rgb_u8(0xbc, 0x80, 0xbd),
        Color::from_rgb_u8(0xcc, 0xeb, 0xc5),
        Color::from_rgb_u8(0xff, 0xed, 0x6f),
    ]
}

/// Axis-aligned rectangle expressed in drawing space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneRect {
    /// Top-left corner of the rectangle.
    pub origin: Vec2,
    /// Width and height of the rectangle.
    pub size: Vec2,
}

impl SceneRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Center point of the rectangle, where labels are anchored.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// Corridor strip ready for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorridorStrip {
    /// Footprint of the strip.
    pub rect: SceneRect,
    /// Axis the corridor runs along.
    pub orientation: CorridorOrientation,
}

/// Room rectangle ready for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomBlock {
    /// Identifier of the presented room.
    pub id: RoomId,
    /// Footprint of the room in its placed orientation.
    pub rect: SceneRect,
    /// Fill assigned from the theme palette.
    pub fill: Color,
    /// Whether the placement was rotated by 90°.
    pub rotated: bool,
}

impl RoomBlock {
    /// Label drawn at the room's center; rotated placements carry a `*`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.rotated {
            format!("R{}*", self.id.get())
        } else {
            format!("R{}", self.id.get())
        }
    }
}

/// Complete drawable description of one layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutScene {
    /// Plot boundary rectangle anchored at the origin.
    pub bounds: SceneRect,
    /// Corridor strips in emission order.
    pub corridors: Vec<CorridorStrip>,
    /// Room blocks in placement order.
    pub rooms: Vec<RoomBlock>,
    /// Colors the scene was composed with.
    pub theme: SceneTheme,
}

impl LayoutScene {
    /// Composes the drawable scene for `layout` inside a plot of `plot` size.
    ///
    /// `corridor_width` must match the tuning the layout was generated with,
    /// since corridor records only store their centerline geometry. Returns
    /// an error when the plot has no area.
    pub fn compose(
        layout: &Layout,
        plot: PlotSize,
        corridor_width: u32,
        theme: SceneTheme,
    ) -> Result<Self, RenderingError> {
        if plot.width() == 0 || plot.height() == 0 {
            return Err(RenderingError::EmptyPlot {
                width: plot.width(),
                height: plot.height(),
            });
        }
        if theme.room_palette.is_empty() {
            return Err(RenderingError::EmptyPalette);
        }

        let bounds = SceneRect::new(
            Vec2::ZERO,
            Vec2::new(plot.width() as f32, plot.height() as f32),
        );

        let corridors = layout
            .corridors()
            .iter()
            .map(|corridor| {
                let rect = match corridor.orientation() {
                    CorridorOrientation::Horizontal => SceneRect::new(
                        Vec2::new(corridor.start() as f32, corridor.position() as f32),
                        Vec2::new(corridor.span_length() as f32, corridor_width as f32),
                    ),
                    CorridorOrientation::Vertical => SceneRect::new(
                        Vec2::new(corridor.position() as f32, corridor.start() as f32),
                        Vec2::new(corridor_width as f32, corridor.span_length() as f32),
                    ),
                };
                CorridorStrip {
                    rect,
                    orientation: corridor.orientation(),
                }
            })
            .collect();

        let palette = &theme.room_palette;
        let rooms = layout
            .rooms()
            .iter()
            .map(|placed| RoomBlock {
                id: placed.id(),
                rect: SceneRect::new(
                    Vec2::new(placed.x() as f32, placed.y() as f32),
                    Vec2::new(
                        placed.placed_width() as f32,
                        placed.placed_height() as f32,
                    ),
                ),
                fill: palette[placed.id().get() as usize % palette.len()].with_alpha(0.6),
                rotated: placed.rotated(),
            })
            .collect();

        Ok(Self {
            bounds,
            corridors,
            rooms,
            theme,
        })
    }
}

/// Backend that turns a composed scene into a concrete image.
///
/// Implementations receive the scene read-only and must not reach back into
/// the layout it was composed from.
pub trait SceneRenderer {
    /// Presents the provided scene.
    fn render(&mut self, scene: &LayoutScene) -> anyhow::Result<()>;
}

/// Errors that can occur while composing a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The plot has a zero width or height, so there is nothing to draw.
    EmptyPlot {
        /// Plot width passed to composition.
        width: u32,
        /// Plot height passed to composition.
        height: u32,
    },
    /// The theme carries no room fills to cycle through.
    EmptyPalette,
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPlot { width, height } => {
                write!(f, "cannot render a {width}x{height} plot")
            }
            Self::EmptyPalette => write!(f, "scene theme has an empty room palette"),
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::{Corridor, PlacedRoom, RoomSpec};

    fn sample_layout() -> Layout {
        let corridors = vec![
            Corridor::new(CorridorOrientation::Vertical, 8, 0, 20),
            Corridor::new(CorridorOrientation::Horizontal, 12, 11, 20),
        ];
        let rooms = vec![
            PlacedRoom::new(RoomSpec::new(RoomId::new(1), 6, 9), 0, 0, false),
            PlacedRoom::new(RoomSpec::new(RoomId::new(2), 7, 4), 11, 0, true),
        ];
        Layout::new(corridors, rooms)
    }

    #[test]
    fn compose_rejects_a_plot_without_area() {
        let result = LayoutScene::compose(
            &sample_layout(),
            PlotSize::new(0, 20),
            3,
            SceneTheme::default(),
        );
        assert_eq!(
            result,
            Err(RenderingError::EmptyPlot {
                width: 0,
                height: 20
            })
        );
    }

    #[test]
    fn corridor_strips_reserve_the_corridor_width() {
        let scene = LayoutScene::compose(
            &sample_layout(),
            PlotSize::new(20, 20),
            3,
            SceneTheme::default(),
        )
        .expect("plot has area");

        let vertical = &scene.corridors[0];
        assert_eq!(vertical.rect.origin, Vec2::new(8.0, 0.0));
        assert_eq!(vertical.rect.size, Vec2::new(3.0, 20.0));

        let horizontal = &scene.corridors[1];
        assert_eq!(horizontal.rect.origin, Vec2::new(11.0, 12.0));
        assert_eq!(horizontal.rect.size, Vec2::new(9.0, 3.0));
    }

    #[test]
    fn room_blocks_use_placed_dimensions() {
        let scene = LayoutScene::compose(
            &sample_layout(),
            PlotSize::new(20, 20),
            3,
            SceneTheme::default(),
        )
        .expect("plot has area");

        let rotated = &scene.rooms[1];
        assert_eq!(rotated.rect.origin, Vec2::new(11.0, 0.0));
        assert_eq!(rotated.rect.size, Vec2::new(4.0, 7.0));
        assert_eq!(rotated.label(), "R2*");

        let upright = &scene.rooms[0];
        assert_eq!(upright.rect.size, Vec2::new(6.0, 9.0));
        assert_eq!(upright.label(), "R1");
    }

    #[test]
    fn palette_cycles_by_room_id() {
        let theme = SceneTheme::default();
        let palette_len = theme.room_palette.len() as u32;
        let rooms = vec![
            PlacedRoom::new(RoomSpec::new(RoomId::new(1), 2, 2), 0, 0, false),
            PlacedRoom::new(RoomSpec::new(RoomId::new(1 + palette_len), 2, 2), 4, 0, false),
        ];
        let layout = Layout::new(Vec::new(), rooms);

        let scene = LayoutScene::compose(&layout, PlotSize::new(20, 20), 3, theme)
            .expect("plot has area");
        assert_eq!(scene.rooms[0].fill, scene.rooms[1].fill);
    }

    #[test]
    fn lighten_moves_channels_toward_white() {
        let color = Color::from_rgb_u8(0x40, 0x80, 0xc0).lighten(0.5);
        assert!(color.red > 0.25 && color.red < 1.0);
        assert!(color.green > 0.5 && color.green < 1.0);
        assert!(color.blue > 0.75 && color.blue < 1.0);
    }
}
