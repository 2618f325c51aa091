//! Export a generation summary to JSON

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generator::context::GenerationContext;
use crate::generator::location::LocationKind;
use crate::hex::{HexCoordinate, TerrainType};

/// Summary of one generation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub hex_count: usize,
    pub terrain: Vec<TerrainShare>,
    pub locations: Vec<LocationSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainShare {
    pub terrain: TerrainType,
    pub count: usize,
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub id: u64,
    pub kind: LocationKind,
    pub name: String,
    pub size: u8,
    pub coordinates: HexCoordinate,
    pub terrain: Option<TerrainType>,
}

impl GenerationReport {
    pub fn from_context(context: &GenerationContext) -> Self {
        let map = &context.hex_map;
        let total = map.len();

        let terrain = map
            .terrain_histogram()
            .into_iter()
            .map(|(terrain, count)| TerrainShare {
                terrain,
                count,
                percent: if total == 0 {
                    0.0
                } else {
                    100.0 * count as f64 / total as f64
                },
            })
            .collect();

        let locations = context
            .locations
            .iter()
            .map(|l| LocationSummary {
                id: l.id.0,
                kind: l.kind,
                name: l.name.clone(),
                size: l.size,
                coordinates: l.coordinates,
                terrain: map.get(l.coordinates).map(|h| h.terrain),
            })
            .collect();

        Self {
            seed: context.settings.world.seed,
            width: map.width(),
            height: map.height(),
            hex_count: total,
            terrain,
            locations,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "World {}x{} (seed {}), {} hexes", self.width, self.height, self.seed, self.hex_count)?;
        for share in self.terrain.iter().filter(|s| s.count > 0) {
            writeln!(f, "  {:<10} {:>6} ({:>5.1}%)", share.terrain.label(), share.count, share.percent)?;
        }
        writeln!(f, "{} locations", self.locations.len())?;
        for l in &self.locations {
            writeln!(f, "  {:<10} {:<24} {}", l.kind.label(), l.name, l.coordinates)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::context::EntityId;
    use crate::generator::location::Location;

    fn sample_context() -> GenerationContext {
        let mut ctx = GenerationContext::default();
        ctx.hex_map.fill_rectangle(0, 0, 4, 5, TerrainType::Forest);
        ctx.set_locations(vec![Location::new(
            EntityId(1),
            LocationKind::City,
            "Goldcrest",
            HexCoordinate::new(2, 2),
        )]);
        ctx
    }

    #[test]
    fn test_report_summarises_context() {
        let report = GenerationReport::from_context(&sample_context());
        assert_eq!(report.hex_count, 20);
        assert_eq!(report.seed, 42);
        let forest = report.terrain.iter().find(|s| s.terrain == TerrainType::Forest).unwrap();
        assert_eq!(forest.count, 20);
        assert!((forest.percent - 100.0).abs() < 1e-9);
        assert_eq!(report.locations[0].terrain, Some(TerrainType::Forest));
    }

    #[test]
    fn test_empty_map_has_zero_percentages() {
        let report = GenerationReport::from_context(&GenerationContext::default());
        assert!(report.terrain.iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn test_json_file_reads_back() {
        let report = GenerationReport::from_context(&sample_context());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: GenerationReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
        assert!(text.contains("\"city\""));
    }

    #[test]
    fn test_display_lists_locations() {
        let text = GenerationReport::from_context(&sample_context()).to_string();
        assert!(text.contains("Goldcrest"));
        assert!(text.starts_with("World 64x48 (seed 42), 20 hexes"));
    }
}
