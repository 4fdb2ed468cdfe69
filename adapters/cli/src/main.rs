#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line front end that collects room dimensions and generates
//! floor plan layouts.

mod layout_transfer;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use floorplan_core::{GenerationTuning, Layout, PlotSize, RoomId, RoomSpec};
use floorplan_rendering::svg::{scene_to_svg, DEFAULT_SCALE};
use floorplan_rendering::{LayoutScene, SceneTheme};
use floorplan_system_generation::generate_layouts_with;

use crate::layout_transfer::{parse_dimensions, LayoutSetSnapshot};

/// Attempt budget granted per requested layout when none is given.
const ATTEMPTS_PER_LAYOUT: u32 = 50;

/// Generates diverse corridor-separated floor plans for a set of rooms.
#[derive(Debug, Parser)]
#[command(name = "floorplan", version, about)]
struct Args {
    /// Plot dimensions as WIDTHxHEIGHT.
    #[arg(long, default_value = "20x20", value_parser = parse_plot)]
    plot: PlotSize,

    /// Room dimensions as WIDTHxHEIGHT; repeat once per room.
    #[arg(long = "room", value_name = "WIDTHxHEIGHT", value_parser = parse_room)]
    rooms: Vec<RoomDimensions>,

    /// Maximum number of unique layouts to generate.
    #[arg(long, default_value_t = 10)]
    max_layouts: u32,

    /// Attempt budget; defaults to fifty attempts per requested layout.
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Print the portable encoded form of the generated set.
    #[arg(long)]
    export: bool,

    /// Re-open a previously exported snapshot instead of generating.
    #[arg(long, value_name = "SNAPSHOT", conflicts_with_all = ["rooms", "export"])]
    import: Option<String>,

    /// Write one SVG image per layout into the given directory.
    #[arg(long, value_name = "DIR")]
    svg_dir: Option<PathBuf>,
}

/// Validated width and height captured from one `--room` flag.
#[derive(Clone, Copy, Debug)]
struct RoomDimensions {
    width: u32,
    height: u32,
}

fn parse_plot(value: &str) -> Result<PlotSize, String> {
    let (width, height) = parse_dimensions(value).map_err(|error| error.to_string())?;
    Ok(PlotSize::new(width, height))
}

fn parse_room(value: &str) -> Result<RoomDimensions, String> {
    let (width, height) = parse_dimensions(value).map_err(|error| error.to_string())?;
    Ok(RoomDimensions { width, height })
}

/// Entry point for the Floorplan command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(encoded) = &args.import {
        let snapshot = LayoutSetSnapshot::decode(encoded)
            .context("could not decode the imported snapshot")?;
        print_summary(&snapshot.rooms, snapshot.plot, &snapshot.layouts);
        if let Some(directory) = &args.svg_dir {
            let tuning = GenerationTuning::default();
            write_svg_files(directory, &snapshot.layouts, snapshot.plot, &tuning)?;
        }
        return Ok(());
    }

    let rooms = collect_rooms(&args.rooms)?;
    let max_attempts = args
        .max_attempts
        .unwrap_or_else(|| args.max_layouts.saturating_mul(ATTEMPTS_PER_LAYOUT));
    let tuning = GenerationTuning::default();

    let layouts = generate_layouts_with(&rooms, args.plot, args.max_layouts, max_attempts, &tuning)
        .context("generation rejected the request")?;

    print_summary(&rooms, args.plot, &layouts);

    if layouts.is_empty() {
        // A normal outcome distinct from invalid input: the search space
        // simply held nothing acceptable within the attempt budget.
        println!("No layout satisfied the constraints within {max_attempts} attempts.");
        return Ok(());
    }

    if let Some(directory) = &args.svg_dir {
        write_svg_files(directory, &layouts, args.plot, &tuning)?;
    }

    if args.export {
        let snapshot = LayoutSetSnapshot {
            plot: args.plot,
            rooms,
            layouts,
        };
        println!("{}", snapshot.encode());
    }

    Ok(())
}

/// Assigns one-based identifiers in input order and rejects an empty
/// request before it ever reaches the generation core.
fn collect_rooms(dimensions: &[RoomDimensions]) -> Result<Vec<RoomSpec>> {
    if dimensions.is_empty() {
        bail!("no valid rooms were provided; add at least one --room WIDTHxHEIGHT");
    }

    Ok(dimensions
        .iter()
        .enumerate()
        .map(|(index, room)| {
            RoomSpec::new(RoomId::new(index as u32 + 1), room.width, room.height)
        })
        .collect())
}

fn print_summary(rooms: &[RoomSpec], plot: PlotSize, layouts: &[Layout]) {
    let total_room_area: u64 = rooms.iter().map(RoomSpec::area).sum();

    println!("Plot dimensions: {} x {}", plot.width(), plot.height());
    println!("Rooms: {}", rooms.len());
    for room in rooms {
        println!(
            "  - Room {}: {} x {} (area: {})",
            room.id().get(),
            room.width(),
            room.height(),
            room.area()
        );
    }
    println!("Total room area: {total_room_area}");
    println!("Plot area: {}", plot.area());
    println!("Generated {} unique layouts", layouts.len());
    for (index, layout) in layouts.iter().enumerate() {
        println!(
            "  Layout {:2}: {} rooms, area {:4}/{}, corridors: {:2}",
            index + 1,
            layout.rooms().len(),
            layout.room_area(),
            plot.area(),
            layout.corridors().len()
        );
    }
}

fn write_svg_files(
    directory: &Path,
    layouts: &[Layout],
    plot: PlotSize,
    tuning: &GenerationTuning,
) -> Result<()> {
    fs::create_dir_all(directory)
        .with_context(|| format!("could not create {}", directory.display()))?;

    for (index, layout) in layouts.iter().enumerate() {
        let scene = LayoutScene::compose(layout, plot, tuning.corridor_width, SceneTheme::default())
            .context("layout could not be composed into a scene")?;
        let path = directory.join(format!("layout-{:02}.svg", index + 1));
        fs::write(&path, scene_to_svg(&scene, DEFAULT_SCALE))
            .with_context(|| format!("could not write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_parser_accepts_lower_and_upper_separators() {
        assert_eq!(parse_plot("20x20"), Ok(PlotSize::new(20, 20)));
        assert_eq!(parse_plot("12X8"), Ok(PlotSize::new(12, 8)));
    }

    #[test]
    fn plot_parser_rejects_malformed_input() {
        assert!(parse_plot("20").is_err());
        assert!(parse_plot("x20").is_err());
        assert!(parse_plot("0x20").is_err());
        assert!(parse_plot("20x-3").is_err());
    }

    #[test]
    fn room_ids_are_assigned_in_input_order() {
        let dimensions = vec![
            RoomDimensions {
                width: 10,
                height: 12,
            },
            RoomDimensions {
                width: 15,
                height: 8,
            },
        ];

        let rooms = collect_rooms(&dimensions).expect("rooms are valid");
        assert_eq!(rooms[0].id(), RoomId::new(1));
        assert_eq!(rooms[1].id(), RoomId::new(2));
        assert_eq!(rooms[1].width(), 15);
    }

    #[test]
    fn an_empty_room_list_is_rejected_up_front() {
        assert!(collect_rooms(&[]).is_err());
    }
}
