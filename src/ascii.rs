//! ASCII rendering and export for hex maps
//!
//! One character per hex, odd rows shifted right by one column so the
//! offset layout of the grid stays visible in plain text.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;

use crate::biomes::decode_generation_seed;
use crate::generator::context::GenerationContext;
use crate::generator::location::{Location, LocationKind};
use crate::hex::{Hex, HexCoordinate};
use crate::hex_map::HexMap;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum AsciiMode {
    /// Terrain glyphs
    Terrain,
    /// Elevation gradient from each hex's generation seed
    Height,
    /// Terrain with location markers on top
    Locations,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Terrain => "Terrain",
            AsciiMode::Height => "Height",
            AsciiMode::Locations => "Locations",
        }
    }
}

/// Marker for a location; upper case for the larger kinds.
pub fn location_char(kind: LocationKind) -> char {
    match kind {
        LocationKind::City => 'C',
        LocationKind::Town => 't',
        LocationKind::Village => 'v',
        LocationKind::Outpost => 'o',
        LocationKind::Port => 'P',
        LocationKind::Fortress => 'F',
        LocationKind::Monastery => 'm',
        LocationKind::Mine => 'n',
        LocationKind::Watchtower => 'w',
        LocationKind::Bridge => 'b',
    }
}

/// Get ASCII character for a normalized height
pub fn height_char(height: f32) -> char {
    const GRADIENT: &[char] = &['~', '.', '-', '=', '+', '*', '#', '%', '^', 'A'];
    let idx = ((height.clamp(0.0, 1.0) * (GRADIENT.len() - 1) as f32).round()) as usize;
    GRADIENT[idx.min(GRADIENT.len() - 1)]
}

fn hex_char(hex: &Hex, marker: Option<LocationKind>, mode: AsciiMode) -> char {
    match mode {
        AsciiMode::Terrain => hex.terrain.glyph(),
        AsciiMode::Height => height_char(decode_generation_seed(hex.generation_seed).0),
        AsciiMode::Locations => marker.map_or(hex.terrain.glyph(), location_char),
    }
}

/// Render the map as text. Cells without a hex are blank.
pub fn render_hex_map(map: &HexMap, locations: &[Location], mode: AsciiMode) -> String {
    let width = map.width();
    let height = map.height();
    let markers: HashMap<HexCoordinate, LocationKind> =
        locations.iter().map(|l| (l.coordinates, l.kind)).collect();
    let mut result = String::with_capacity((width + 2) * height);

    for r in 0..height as i32 {
        if r & 1 == 1 {
            result.push(' ');
        }
        for q in 0..width as i32 {
            let coord = HexCoordinate::new(q, r);
            let ch = match map.get(coord) {
                Some(hex) => hex_char(hex, markers.get(&coord).copied(), mode),
                None => ' ',
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

/// Generate legend for terrain and location characters
pub fn terrain_legend() -> String {
    let mut legend = String::new();
    legend.push_str("=== TERRAIN LEGEND ===\n");
    legend.push_str("  ~ Ocean      , Coast      \" Plains     T Forest\n");
    legend.push_str("  ^ Mountains  d Desert     % Swamp\n");
    legend.push_str("=== LOCATION LEGEND ===\n");
    legend.push_str("  C City       t Town       v Village    o Outpost\n");
    legend.push_str("  P Port       F Fortress   m Monastery  n Mine\n");
    legend.push_str("  w Watchtower b Bridge\n");
    legend
}

/// Write map, legend, terrain statistics and the location list to a text file.
pub fn export_world_file(context: &GenerationContext, path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    let map = &context.hex_map;
    let total = map.len().max(1);

    // Header
    writeln!(file, "=== HEX WORLD FILE ===")?;
    writeln!(file, "Seed: {}", context.settings.world.seed)?;
    writeln!(file, "Size: {}x{}", map.width(), map.height())?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    writeln!(file, "=== MAP ===")?;
    write!(file, "{}", render_hex_map(map, &context.locations, AsciiMode::Locations))?;
    writeln!(file)?;
    write!(file, "{}", terrain_legend())?;
    writeln!(file)?;

    writeln!(file, "=== TERRAIN ===")?;
    for (terrain, count) in map.terrain_histogram() {
        writeln!(
            file,
            "  {:<10} {:>6} ({:>5.1}%)",
            terrain.label(),
            count,
            100.0 * count as f64 / total as f64
        )?;
    }
    writeln!(file)?;

    writeln!(file, "=== LOCATIONS ({}) ===", context.locations.len())?;
    for l in &context.locations {
        writeln!(file, "  {} {:<10} {:<24} at {}", l.id, l.kind.label(), l.name, l.coordinates)?;
    }

    Ok(())
}

/// Print ASCII map to stdout
pub fn print_hex_map(map: &HexMap, locations: &[Location], mode: AsciiMode) {
    print!("{}", render_hex_map(map, locations, mode));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::context::EntityId;
    use crate::hex::TerrainType;

    #[test]
    fn test_odd_rows_are_indented() {
        let mut map = HexMap::new(3, 2);
        map.fill_rectangle(0, 0, 3, 2, TerrainType::Forest);
        let text = render_hex_map(&map, &[], AsciiMode::Terrain);
        assert_eq!(text, "TTT\n TTT\n");
    }

    #[test]
    fn test_missing_hexes_render_blank() {
        let mut map = HexMap::new(3, 1);
        map.add(Hex::at(0, 0, TerrainType::Ocean));
        map.add(Hex::at(2, 0, TerrainType::Mountains));
        assert_eq!(render_hex_map(&map, &[], AsciiMode::Terrain), "~ ^\n");
    }

    #[test]
    fn test_location_markers_override_terrain() {
        let mut map = HexMap::new(2, 1);
        map.fill_rectangle(0, 0, 2, 1, TerrainType::Plains);
        let city = Location::new(EntityId(1), LocationKind::City, "Highmarch", HexCoordinate::new(1, 0));
        let text = render_hex_map(&map, &[city.clone()], AsciiMode::Locations);
        assert_eq!(text, "\"C\n");
        // Terrain mode ignores locations.
        assert_eq!(render_hex_map(&map, &[city], AsciiMode::Terrain), "\"\"\n");
    }

    #[test]
    fn test_height_gradient_ends() {
        assert_eq!(height_char(0.0), '~');
        assert_eq!(height_char(1.0), 'A');
        assert_eq!(height_char(7.0), 'A');
    }

    #[test]
    fn test_export_world_file() {
        let mut ctx = GenerationContext::default();
        ctx.hex_map.fill_rectangle(0, 0, 4, 3, TerrainType::Plains);
        ctx.set_locations(vec![Location::new(
            EntityId(1),
            LocationKind::Village,
            "Fernby",
            HexCoordinate::new(1, 1),
        )]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.txt");
        export_world_file(&ctx, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("=== HEX WORLD FILE ==="));
        assert!(text.contains("Fernby"));
        assert!(text.contains("=== LOCATIONS (1) ==="));
    }
}
