//! SVG backend that serialises a composed scene into a vector image.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result as AnyResult;

use crate::{Color, LayoutScene, SceneRenderer, SceneRect};

/// Pixels drawn per world unit when no explicit scale is requested.
pub const DEFAULT_SCALE: f32 = 24.0;

/// Serialises a scene into a standalone SVG document.
#[must_use]
pub fn scene_to_svg(scene: &LayoutScene, scale: f32) -> String {
    let scale = if scale > 0.0 { scale } else { DEFAULT_SCALE };
    let width = scene.bounds.size.x;
    let height = scene.bounds.size.y;
    let theme = &scene.theme;

    let mut out = String::new();
    write_line(
        &mut out,
        &format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" \
             viewBox=\"0 0 {width} {height}\">",
            width * scale,
            height * scale,
        ),
    );

    write_rect(&mut out, &scene.bounds, theme.background, theme.boundary, 0.3);

    for corridor in &scene.corridors {
        write_rect(
            &mut out,
            &corridor.rect,
            theme.corridor_fill,
            theme.corridor_outline,
            0.1,
        );
    }

    for room in &scene.rooms {
        write_rect(&mut out, &room.rect, room.fill, theme.room_outline, 0.2);
    }

    // Labels go last so no later rectangle can cover them.
    for room in &scene.rooms {
        let center = room.rect.center();
        let font_size = label_font_size(&room.rect);
        write_line(
            &mut out,
            &format!(
                "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{font_size:.2}\" \
                 text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"{}\">{}</text>",
                center.x,
                center.y,
                css_color(theme.label),
                room.label(),
            ),
        );
    }

    write_line(&mut out, "</svg>");
    out
}

/// Writer-backed renderer suitable for files or buffers.
#[derive(Debug)]
pub struct SvgRenderer<W: Write> {
    writer: W,
    scale: f32,
}

impl<W: Write> SvgRenderer<W> {
    /// Creates a renderer emitting documents at the default scale.
    pub fn new(writer: W) -> Self {
        Self::with_scale(writer, DEFAULT_SCALE)
    }

    /// Creates a renderer emitting `scale` pixels per world unit.
    pub fn with_scale(writer: W, scale: f32) -> Self {
        Self { writer, scale }
    }

    /// Consumes the renderer, yielding the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SceneRenderer for SvgRenderer<W> {
    fn render(&mut self, scene: &LayoutScene) -> AnyResult<()> {
        let document = scene_to_svg(scene, self.scale);
        self.writer.write_all(document.as_bytes())?;
        Ok(())
    }
}

fn write_rect(out: &mut String, rect: &SceneRect, fill: Color, stroke: Color, stroke_width: f32) {
    write_line(
        out,
        &format!(
            "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" \
             fill-opacity=\"{:.2}\" stroke=\"{}\" stroke-width=\"{stroke_width}\"/>",
            rect.origin.x,
            rect.origin.y,
            rect.size.x,
            rect.size.y,
            css_color(fill),
            fill.alpha,
            css_color(stroke),
        ),
    );
}

fn write_line(out: &mut String, line: &str) {
    writeln!(out, "{line}").expect("writing to a string never fails");
}

/// Labels shrink with the room so they stay inside small placements.
fn label_font_size(rect: &SceneRect) -> f32 {
    let shortest = rect.size.x.min(rect.size.y);
    (shortest * 0.35).clamp(0.8, 4.0)
}

fn css_color(color: Color) -> String {
    format!(
        "rgb({},{},{})",
        channel_to_u8(color.red),
        channel_to_u8(color.green),
        channel_to_u8(color.blue)
    )
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneTheme;
    use floorplan_core::{
        Corridor, CorridorOrientation, Layout, PlacedRoom, PlotSize, RoomId, RoomSpec,
    };

    fn sample_scene() -> LayoutScene {
        let layout = Layout::new(
            vec![Corridor::new(CorridorOrientation::Vertical, 8, 0, 20)],
            vec![
                PlacedRoom::new(RoomSpec::new(RoomId::new(1), 6, 9), 0, 0, false),
                PlacedRoom::new(RoomSpec::new(RoomId::new(2), 7, 4), 11, 0, true),
            ],
        );
        LayoutScene::compose(&layout, PlotSize::new(20, 20), 3, SceneTheme::default())
            .expect("plot has area")
    }

    #[test]
    fn document_contains_one_rect_per_element() {
        let svg = scene_to_svg(&sample_scene(), DEFAULT_SCALE);

        // Boundary + one corridor + two rooms.
        assert_eq!(svg.matches("<rect").count(), 4);
        assert_eq!(svg.matches("<text").count(), 2);
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn rotated_rooms_are_marked_in_their_label() {
        let svg = scene_to_svg(&sample_scene(), DEFAULT_SCALE);
        assert!(svg.contains(">R1<"));
        assert!(svg.contains(">R2*<"));
    }

    #[test]
    fn scale_controls_the_pixel_dimensions() {
        let svg = scene_to_svg(&sample_scene(), 10.0);
        assert!(svg.contains("width=\"200\""));
        assert!(svg.contains("height=\"200\""));
        assert!(svg.contains("viewBox=\"0 0 20 20\""));
    }

    #[test]
    fn renderer_writes_the_document_to_its_writer() {
        let mut renderer = SvgRenderer::new(Vec::new());
        renderer
            .render(&sample_scene())
            .expect("buffer writes never fail");

        let bytes = renderer.into_inner();
        let document = String::from_utf8(bytes).expect("svg is utf-8");
        assert!(document.contains("<svg "));
    }
}
