//! Location placement on a generated world.
//!
//! `RandomLocationGenerator` spreads locations over the map in four passes:
//! major cities one per zone, settlements around those cities, special sites
//! (ports, fortresses, ...) on terrain that suits them, and finally plain
//! settlements on any free hex until the target count is reached. Every placed
//! location reserves a radius around itself that later passes must avoid.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::generator::context::{EntityId, GenerationContext};
use crate::generator::pipeline::GeneratorStep;
use crate::hex::geometry::{coordinates_in_range, distance, neighbor};
use crate::hex::{Hex, HexCoordinate, HexDirection, TerrainType};
use crate::hex_map::HexMap;
use crate::names::NameBank;

const CITY_RESERVE_RADIUS: i32 = 5;
const SETTLEMENT_RESERVE_RADIUS: i32 = 3;
const SPECIAL_RESERVE_RADIUS: i32 = 2;
const SETTLEMENTS_PER_CITY: usize = 2;
const CITY_SEARCH_RADIUS: i32 = 15;
const SETTLEMENT_RING: RangeInclusive<i32> = 3..=8;
const MAX_MAJOR_CITIES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    City,
    Village,
    Town,
    Outpost,
    Port,
    Fortress,
    Monastery,
    Mine,
    Watchtower,
    Bridge,
}

impl LocationKind {
    pub fn all() -> &'static [LocationKind] {
        &[
            LocationKind::City,
            LocationKind::Village,
            LocationKind::Town,
            LocationKind::Outpost,
            LocationKind::Port,
            LocationKind::Fortress,
            LocationKind::Monastery,
            LocationKind::Mine,
            LocationKind::Watchtower,
            LocationKind::Bridge,
        ]
    }

    pub const SETTLEMENTS: [LocationKind; 3] =
        [LocationKind::Village, LocationKind::Town, LocationKind::Outpost];

    /// Special sites in the order they are placed.
    pub const SPECIAL: [LocationKind; 6] = [
        LocationKind::Port,
        LocationKind::Fortress,
        LocationKind::Monastery,
        LocationKind::Mine,
        LocationKind::Watchtower,
        LocationKind::Bridge,
    ];

    /// Relative size: 3 for cities, 2 for ports and fortresses, 1 otherwise.
    pub fn size(&self) -> u8 {
        match self {
            LocationKind::City => 3,
            LocationKind::Port | LocationKind::Fortress => 2,
            _ => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationKind::City => "city",
            LocationKind::Village => "village",
            LocationKind::Town => "town",
            LocationKind::Outpost => "outpost",
            LocationKind::Port => "port",
            LocationKind::Fortress => "fortress",
            LocationKind::Monastery => "monastery",
            LocationKind::Mine => "mine",
            LocationKind::Watchtower => "watchtower",
            LocationKind::Bridge => "bridge",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    pub kind: LocationKind,
    pub name: String,
    pub size: u8,
    pub coordinates: HexCoordinate,
}

impl Location {
    pub fn new(id: EntityId, kind: LocationKind, name: impl Into<String>, coordinates: HexCoordinate) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            size: kind.size(),
            coordinates,
        }
    }
}

/// Places locations on an existing map.
pub trait LocationGenerator: Send {
    fn name(&self) -> &str;

    fn generate_locations(&mut self, map: &HexMap) -> Result<Vec<Location>>;
}

// =============================================================================
// RANDOM PLACEMENT
// =============================================================================

pub struct RandomLocationGenerator {
    count: usize,
    seed: u64,
}

impl RandomLocationGenerator {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed }
    }
}

impl LocationGenerator for RandomLocationGenerator {
    fn name(&self) -> &str {
        "random"
    }

    fn generate_locations(&mut self, map: &HexMap) -> Result<Vec<Location>> {
        if map.is_empty() {
            return Err(GenerationError::MissingHexMap);
        }
        let mut placement = Placement::new(map, self.count, self.seed);
        placement.major_cities();
        placement.settlements();
        placement.special_sites();
        placement.fill_remaining();
        Ok(placement.locations)
    }
}

/// Rectangular slice of the map used to spread locations evenly.
#[derive(Clone, Debug, PartialEq)]
struct Zone {
    q: Range<i32>,
    r: Range<i32>,
}

/// Split the map into `ceil(sqrt(n))` zones per side and keep the first `n`.
fn partition_zones(width: usize, height: usize, count: usize) -> Vec<Zone> {
    if count == 0 {
        return Vec::new();
    }
    let per_side = (count as f64).sqrt().ceil() as usize;
    let zone_w = width / per_side;
    let zone_h = height / per_side;
    let mut zones = Vec::with_capacity(count);
    'rows: for row in 0..per_side {
        for col in 0..per_side {
            if zones.len() >= count {
                break 'rows;
            }
            let q_end = if col == per_side - 1 { width } else { (col + 1) * zone_w };
            let r_end = if row == per_side - 1 { height } else { (row + 1) * zone_h };
            zones.push(Zone {
                q: (col * zone_w) as i32..q_end as i32,
                r: (row * zone_h) as i32..r_end as i32,
            });
        }
    }
    zones
}

/// Even split of `total` special sites; the remainder goes to bridges.
fn special_distribution(total: usize) -> Vec<(LocationKind, usize)> {
    let base = total / LocationKind::SPECIAL.len();
    LocationKind::SPECIAL
        .iter()
        .map(|&kind| {
            let n = if kind == LocationKind::Bridge { total - base * 5 } else { base };
            (kind, n)
        })
        .collect()
}

fn is_city_site(hex: &Hex) -> bool {
    matches!(hex.terrain, TerrainType::Plains | TerrainType::Coast | TerrainType::Forest)
}

fn is_settlement_site(hex: &Hex) -> bool {
    hex.terrain.is_settleable()
}

/// Mutable state of one placement run.
struct Placement<'a> {
    map: &'a HexMap,
    rng: ChaCha8Rng,
    target: usize,
    used: HashSet<HexCoordinate>,
    locations: Vec<Location>,
}

impl<'a> Placement<'a> {
    fn new(map: &'a HexMap, target: usize, seed: u64) -> Self {
        Self {
            map,
            rng: ChaCha8Rng::seed_from_u64(seed),
            target,
            used: HashSet::new(),
            locations: Vec::with_capacity(target),
        }
    }

    fn remaining(&self) -> usize {
        self.target.saturating_sub(self.locations.len())
    }

    fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    fn is_free(&self, hex: &Hex) -> bool {
        !self.used.contains(&hex.coordinates)
    }

    fn place(&mut self, coordinates: HexCoordinate, kind: LocationKind, reserve: i32) {
        let id = EntityId(self.locations.len() as u64 + 1);
        let name = NameBank::pick(kind, &mut self.rng);
        tracing::trace!(%kind, %coordinates, name = %name, "location placed");
        self.locations.push(Location::new(id, kind, name, coordinates));
        self.used.insert(coordinates);
        for c in coordinates_in_range(coordinates, reserve) {
            if self.map.contains(c) {
                self.used.insert(c);
            }
        }
    }

    fn place_settlement(&mut self, coordinates: HexCoordinate) {
        let kind = *LocationKind::SETTLEMENTS
            .choose(&mut self.rng)
            .unwrap_or(&LocationKind::Village);
        self.place(coordinates, kind, SETTLEMENT_RESERVE_RADIUS);
    }

    fn zones(&mut self, count: usize) -> Vec<Zone> {
        let mut zones = partition_zones(self.map.width(), self.map.height(), count);
        zones.shuffle(&mut self.rng);
        zones
    }

    /// Highest-rated free hex of a zone, scanned in shuffled order so ties
    /// break differently per seed.
    fn best_in_zone(
        &mut self,
        zone: &Zone,
        suitable: fn(&Hex) -> bool,
        rate: fn(&Self, &Hex) -> i32,
    ) -> Option<HexCoordinate> {
        let mut qs: Vec<i32> = zone.q.clone().collect();
        let mut rs: Vec<i32> = zone.r.clone().collect();
        qs.shuffle(&mut self.rng);
        rs.shuffle(&mut self.rng);

        let map = self.map;
        let mut best: Option<(i32, HexCoordinate)> = None;
        for &q in &qs {
            for &r in &rs {
                let Some(hex) = map.get_at(q, r) else { continue };
                if !self.is_free(hex) || !suitable(hex) {
                    continue;
                }
                let score = rate(self, hex);
                if best.map_or(true, |(s, _)| score > s) {
                    best = Some((score, hex.coordinates));
                }
            }
        }
        best.map(|(_, c)| c)
    }

    /// First hex with the highest rating among `candidates`.
    fn best_of<'h>(
        &self,
        candidates: impl Iterator<Item = &'h Hex>,
        rate: impl Fn(&Self, &Hex) -> i32,
    ) -> Option<HexCoordinate> {
        let mut best: Option<(i32, HexCoordinate)> = None;
        for hex in candidates {
            let score = rate(self, hex);
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, hex.coordinates));
            }
        }
        best.map(|(_, c)| c)
    }

    /// Free hexes in row-major order.
    fn free_hexes(&self) -> impl Iterator<Item = &'a Hex> + '_ {
        let map = self.map;
        (0..map.height() as i32)
            .flat_map(move |r| (0..map.width() as i32).map(move |q| (q, r)))
            .filter_map(move |(q, r)| map.get_at(q, r))
            .filter(move |hex| self.is_free(hex))
    }

    // -------------------------------------------------------------------------
    // Passes
    // -------------------------------------------------------------------------

    fn major_cities(&mut self) {
        let count = MAX_MAJOR_CITIES.min(self.target / 4);
        for zone in self.zones(count) {
            if let Some(c) = self.best_in_zone(&zone, is_city_site, Self::rate_city) {
                self.place(c, LocationKind::City, CITY_RESERVE_RADIUS);
            }
        }
    }

    fn settlements(&mut self) {
        let cities: Vec<HexCoordinate> = self
            .locations
            .iter()
            .filter(|l| l.kind == LocationKind::City)
            .map(|l| l.coordinates)
            .collect();

        if cities.is_empty() {
            self.distributed_settlements(self.target / 2);
            return;
        }

        for city in cities {
            for _ in 0..SETTLEMENTS_PER_CITY {
                if self.is_full() {
                    break;
                }
                if let Some(c) = self.settlement_near(city) {
                    self.place_settlement(c);
                }
            }
        }

        let remaining = self.remaining();
        if remaining > 0 {
            self.distributed_settlements(remaining);
        }
    }

    fn distributed_settlements(&mut self, count: usize) {
        for zone in self.zones(count) {
            if self.is_full() {
                break;
            }
            if let Some(c) = self.best_in_zone(&zone, is_settlement_site, Self::rate_settlement) {
                self.place_settlement(c);
            }
        }
    }

    fn settlement_near(&self, city: HexCoordinate) -> Option<HexCoordinate> {
        let map = self.map;
        let r_lo = (city.r() - CITY_SEARCH_RADIUS).max(0);
        let r_hi = (city.r() + CITY_SEARCH_RADIUS).min(map.height() as i32 - 1);
        let q_lo = (city.q() - CITY_SEARCH_RADIUS).max(0);
        let q_hi = (city.q() + CITY_SEARCH_RADIUS).min(map.width() as i32 - 1);

        let candidates = (r_lo..=r_hi)
            .flat_map(|r| (q_lo..=q_hi).map(move |q| (q, r)))
            .filter_map(|(q, r)| map.get_at(q, r))
            .filter(|hex| {
                self.is_free(hex)
                    && SETTLEMENT_RING.contains(&distance(city, hex.coordinates))
                    && is_settlement_site(hex)
            });
        self.best_of(candidates, Self::rate_settlement)
    }

    fn special_sites(&mut self) {
        let remaining = self.remaining();
        if remaining == 0 {
            return;
        }
        for (kind, count) in special_distribution(remaining) {
            for _ in 0..count {
                if self.is_full() {
                    break;
                }
                match self.special_site(kind) {
                    Some(c) => self.place(c, kind, SPECIAL_RESERVE_RADIUS),
                    None => break,
                }
            }
        }
    }

    fn special_site(&self, kind: LocationKind) -> Option<HexCoordinate> {
        let candidates = self
            .free_hexes()
            .filter(|hex| self.suits_special(hex, kind) && self.well_placed(hex, kind));
        self.best_of(candidates, |p, hex| p.rate_special(hex, kind))
    }

    fn fill_remaining(&mut self) {
        if self.is_full() {
            return;
        }
        let mut open: Vec<HexCoordinate> = self
            .free_hexes()
            .filter(|hex| is_settlement_site(hex))
            .map(|hex| hex.coordinates)
            .collect();
        open.shuffle(&mut self.rng);
        for c in open {
            if self.is_full() {
                break;
            }
            // An earlier fill may have reserved this hex.
            if self.used.contains(&c) {
                continue;
            }
            self.place_settlement(c);
        }
    }

    // -------------------------------------------------------------------------
    // Neighborhood queries
    // -------------------------------------------------------------------------

    fn count_neighbors(&self, hex: &Hex, pred: impl Fn(&Hex) -> bool) -> i32 {
        self.map.neighbors_of(hex.coordinates).filter(|&n| pred(n)).count() as i32
    }

    fn any_neighbor(&self, hex: &Hex, pred: impl Fn(&Hex) -> bool) -> bool {
        self.map.neighbors_of(hex.coordinates).any(|n| pred(n))
    }

    fn neighbors_of_type(&self, hex: &Hex, terrain: TerrainType) -> i32 {
        self.count_neighbors(hex, |n| n.terrain == terrain)
    }

    fn distinct_neighbor_terrains(&self, hex: &Hex) -> i32 {
        self.map
            .neighbors_of(hex.coordinates)
            .map(|n| n.terrain)
            .collect::<HashSet<_>>()
            .len() as i32
    }

    fn settleable_neighbors(&self, hex: &Hex) -> i32 {
        self.count_neighbors(hex, is_settlement_site)
    }

    fn passable_neighbors(&self, hex: &Hex) -> i32 {
        self.count_neighbors(hex, |n| n.terrain.is_passable())
    }

    fn has_water_access(&self, hex: &Hex) -> bool {
        self.any_neighbor(hex, |n| matches!(n.terrain, TerrainType::Ocean | TerrainType::Coast))
    }

    fn on_high_ground(&self, hex: &Hex) -> bool {
        hex.terrain == TerrainType::Mountains || self.settleable_neighbors(hex) <= 3
    }

    fn naturally_protected(&self, hex: &Hex) -> bool {
        self.count_neighbors(hex, |n| {
            matches!(n.terrain, TerrainType::Mountains | TerrainType::Ocean)
        }) >= 3
    }

    fn on_border(&self, hex: &Hex) -> bool {
        let (q, r) = (hex.q(), hex.r());
        let (w, h) = (self.map.width() as i32, self.map.height() as i32);
        q <= 5 || q >= w - 5 || r <= 5 || r >= h - 5
    }

    fn connects_terrains(&self, hex: &Hex) -> bool {
        self.distinct_neighbor_terrains(hex) >= 3
    }

    fn any_within(&self, hex: &Hex, radius: i32, pred: fn(&Hex) -> bool) -> bool {
        coordinates_in_range(hex.coordinates, radius)
            .into_iter()
            .filter_map(|c| self.map.get(c))
            .any(pred)
    }

    fn near_civilization(&self, hex: &Hex) -> bool {
        self.any_within(hex, 10, is_city_site)
    }

    /// Two opposite neighbors share a settleable terrain.
    fn straight_crossing(&self, hex: &Hex) -> bool {
        HexDirection::ALL[..3].iter().any(|&dir| {
            let a = self.map.get(neighbor(hex.coordinates, dir));
            let b = self.map.get(neighbor(hex.coordinates, dir.opposite()));
            matches!((a, b), (Some(a), Some(b)) if a.terrain == b.terrain && is_settlement_site(a))
        })
    }

    // -------------------------------------------------------------------------
    // Ratings
    // -------------------------------------------------------------------------

    fn rate_city(&self, hex: &Hex) -> i32 {
        let terrain = match hex.terrain {
            TerrainType::Plains => 10,
            TerrainType::Coast => 8,
            TerrainType::Forest => 5,
            _ => 0,
        };
        let center = HexCoordinate::new(self.map.width() as i32 / 2, self.map.height() as i32 / 2);
        let centrality = (10 - distance(hex.coordinates, center) / 5).max(0);
        let water = if self.has_water_access(hex) { 5 } else { 0 };
        terrain + self.settleable_neighbors(hex) * 3 + water + centrality
    }

    fn rate_settlement(&self, hex: &Hex) -> i32 {
        let terrain = match hex.terrain {
            TerrainType::Plains => 8,
            TerrainType::Forest => 6,
            TerrainType::Coast => 4,
            _ => 0,
        };
        let resources = self.any_neighbor(hex, |n| {
            matches!(n.terrain, TerrainType::Mountains | TerrainType::Forest)
        });
        terrain + self.settleable_neighbors(hex) * 2 + if resources { 3 } else { 0 }
    }

    fn suits_special(&self, hex: &Hex, kind: LocationKind) -> bool {
        match kind {
            LocationKind::Port => hex.terrain == TerrainType::Coast,
            LocationKind::Fortress => hex.terrain == TerrainType::Mountains,
            LocationKind::Monastery => hex.terrain == TerrainType::Forest,
            LocationKind::Mine => matches!(hex.terrain, TerrainType::Mountains | TerrainType::Plains),
            LocationKind::Bridge => self.connects_terrains(hex),
            _ => true,
        }
    }

    fn well_placed(&self, hex: &Hex, kind: LocationKind) -> bool {
        match kind {
            LocationKind::Port => self.neighbors_of_type(hex, TerrainType::Ocean) > 0,
            LocationKind::Fortress => self.on_high_ground(hex) && self.passable_neighbors(hex) >= 2,
            LocationKind::Bridge => self.connects_terrains(hex),
            LocationKind::Watchtower => self.on_border(hex) || self.passable_neighbors(hex) >= 3,
            _ => true,
        }
    }

    fn rate_special(&self, hex: &Hex, kind: LocationKind) -> i32 {
        let bonus = |cond: bool, points: i32| if cond { points } else { 0 };
        let passable = self.passable_neighbors(hex);
        let distinct = self.distinct_neighbor_terrains(hex);

        let score = match kind {
            LocationKind::Port => {
                let deep = self.neighbors_of_type(hex, TerrainType::Ocean) >= 2;
                let harbor = deep && self.neighbors_of_type(hex, TerrainType::Coast) >= 2;
                bonus(hex.terrain == TerrainType::Coast, 10) + bonus(deep, 5) + bonus(harbor, 8)
            }
            LocationKind::Fortress => {
                bonus(hex.terrain == TerrainType::Mountains, 10)
                    + bonus(self.on_high_ground(hex), 8)
                    + bonus(passable >= 2, 7)
            }
            LocationKind::Monastery => {
                let terrain = match hex.terrain {
                    TerrainType::Forest => 15,
                    TerrainType::Mountains => 12,
                    TerrainType::Plains => 8,
                    _ => 0,
                };
                let fresh_water = self.any_neighbor(hex, |n| {
                    matches!(n.terrain, TerrainType::Coast | TerrainType::Forest)
                });
                terrain + (10 - self.settleable_neighbors(hex) * 2).max(0)
                    + bonus(self.naturally_protected(hex), 8)
                    + bonus(fresh_water, 10)
                    + bonus(self.on_high_ground(hex), 5)
                    + bonus(distinct >= 4, 7)
                    - bonus(self.near_civilization(hex), 15)
            }
            LocationKind::Mine => {
                let terrain = match hex.terrain {
                    TerrainType::Mountains => 20,
                    TerrainType::Plains => 12,
                    TerrainType::Forest => 8,
                    _ => 0,
                };
                let shelter = hex.terrain == TerrainType::Mountains
                    || self.neighbors_of_type(hex, TerrainType::Mountains) > 0;
                terrain + self.neighbors_of_type(hex, TerrainType::Mountains) * 4
                    + bonus(self.has_water_access(hex), 8)
                    + bonus(passable >= 4, 10)
                    + bonus(self.any_within(hex, 6, is_settlement_site), 6)
                    + distinct * 2
                    - bonus(passable <= 2, 12)
                    + bonus(shelter, 5)
            }
            LocationKind::Watchtower => {
                let terrain = match hex.terrain {
                    TerrainType::Mountains => 18,
                    TerrainType::Plains => 10,
                    TerrainType::Forest => 3,
                    TerrainType::Swamp => 2,
                    _ => 0,
                };
                let high = self.on_high_ground(hex);
                let sight = if high { 8 } else { 5 };
                let visible = coordinates_in_range(hex.coordinates, sight)
                    .into_iter()
                    .filter(|c| self.map.contains(*c))
                    .count() as i32;
                terrain + bonus(high, 15) + passable * 6 + (visible / 10).min(20)
                    + bonus(self.on_border(hex), 12)
                    + bonus(self.near_civilization(hex), 8)
                    + bonus(self.naturally_protected(hex), 7)
                    - bonus(passable <= 1, 10)
            }
            LocationKind::Bridge => {
                let forest_to_plains = self.neighbors_of_type(hex, TerrainType::Forest) >= 1
                    && self.neighbors_of_type(hex, TerrainType::Plains) >= 1;
                let too_wide = self.neighbors_of_type(hex, TerrainType::Ocean) >= 4;
                bonus(self.connects_terrains(hex), 25) + distinct * 8
                    + bonus(self.straight_crossing(hex), 10)
                    + bonus(forest_to_plains, 15)
                    - bonus(too_wide, 15)
            }
            _ => self.rate_settlement(hex),
        };
        score.max(0)
    }
}

// =============================================================================
// SAVED
// =============================================================================

/// Reads locations from a save file. Loading is not implemented yet.
pub struct SavedLocationGenerator {
    path: PathBuf,
}

impl SavedLocationGenerator {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl LocationGenerator for SavedLocationGenerator {
    fn name(&self) -> &str {
        "saved"
    }

    fn generate_locations(&mut self, _map: &HexMap) -> Result<Vec<Location>> {
        Err(GenerationError::NotImplemented {
            feature: "loading saved locations",
            path: self.path.clone(),
        })
    }
}

// =============================================================================
// STEP
// =============================================================================

/// Runs a location generator against the context's map.
pub struct LocationGenerationStep {
    generator: Box<dyn LocationGenerator>,
}

impl LocationGenerationStep {
    pub fn new(generator: Box<dyn LocationGenerator>) -> Self {
        Self { generator }
    }
}

impl GeneratorStep for LocationGenerationStep {
    fn name(&self) -> &str {
        "locations"
    }

    fn execute(&mut self, context: &mut GenerationContext) -> Result<()> {
        let locations = self.generator.generate_locations(&context.hex_map)?;
        log_distribution(&locations);
        context.set_locations(locations);
        Ok(())
    }
}

fn log_distribution(locations: &[Location]) {
    let mut by_kind: BTreeMap<LocationKind, Vec<String>> = BTreeMap::new();
    for l in locations {
        by_kind
            .entry(l.kind)
            .or_default()
            .push(format!("{}-{}", l.coordinates, l.name));
    }
    tracing::info!(total = locations.len(), kinds = by_kind.len(), "location generation complete");
    for (kind, entries) in &by_kind {
        tracing::info!(%kind, count = entries.len(), "location share");
        tracing::debug!(%kind, details = ?entries, "placed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::world::{ProceduralWorldGenerator, RectangularWorldGenerator, WorldGenerator};

    fn plains(width: usize, height: usize) -> HexMap {
        let mut map = HexMap::new(width, height);
        map.fill_rectangle(0, 0, width, height, TerrainType::Plains);
        map
    }

    #[test]
    fn test_empty_map_is_an_error() {
        let err = RandomLocationGenerator::new(5, 1)
            .generate_locations(&HexMap::new(10, 10))
            .unwrap_err();
        assert!(matches!(err, GenerationError::MissingHexMap));
    }

    #[test]
    fn test_zero_count_places_nothing() {
        let locations = RandomLocationGenerator::new(0, 1).generate_locations(&plains(20, 20)).unwrap();
        assert!(locations.is_empty());
    }

    #[test]
    fn test_never_exceeds_target_and_coordinates_are_unique() {
        let map = plains(40, 30);
        let locations = RandomLocationGenerator::new(12, 7).generate_locations(&map).unwrap();
        assert!(!locations.is_empty() && locations.len() <= 12);

        let unique: HashSet<_> = locations.iter().map(|l| l.coordinates).collect();
        assert_eq!(unique.len(), locations.len());
        assert!(locations.iter().all(|l| map.contains(l.coordinates)));
    }

    #[test]
    fn test_cities_come_first_and_are_spaced() {
        let map = plains(60, 40);
        let locations = RandomLocationGenerator::new(12, 3).generate_locations(&map).unwrap();
        let cities: Vec<_> = locations.iter().filter(|l| l.kind == LocationKind::City).collect();
        assert_eq!(cities.len(), 3);
        assert!(locations[..3].iter().all(|l| l.kind == LocationKind::City));
        for a in &cities {
            for b in &cities {
                if a.id != b.id {
                    assert!(distance(a.coordinates, b.coordinates) > CITY_RESERVE_RADIUS);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_locations() {
        let map = ProceduralWorldGenerator::new(32, 24, 42).generate_world().unwrap();
        let a = RandomLocationGenerator::new(10, 9).generate_locations(&map).unwrap();
        let b = RandomLocationGenerator::new(10, 9).generate_locations(&map).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_locations_avoid_ocean_and_mountains_unless_special() {
        let map = ProceduralWorldGenerator::new(40, 30, 11).generate_world().unwrap();
        let locations = RandomLocationGenerator::new(15, 11).generate_locations(&map).unwrap();
        for l in locations.iter().filter(|l| !LocationKind::SPECIAL.contains(&l.kind)) {
            let terrain = map.get(l.coordinates).unwrap().terrain;
            assert!(terrain.is_settleable(), "{} on {terrain}", l.kind);
        }
    }

    #[test]
    fn test_ids_and_sizes() {
        let locations = RandomLocationGenerator::new(8, 2).generate_locations(&plains(30, 30)).unwrap();
        for (i, l) in locations.iter().enumerate() {
            assert_eq!(l.id, EntityId(i as u64 + 1));
            assert_eq!(l.size, l.kind.size());
            assert!(!l.name.is_empty());
        }
    }

    #[test]
    fn test_zone_partition_covers_the_map() {
        let zones = partition_zones(10, 9, 4);
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0], Zone { q: 0..5, r: 0..4 });
        assert_eq!(zones[3], Zone { q: 5..10, r: 4..9 });

        let three = partition_zones(10, 10, 3);
        assert_eq!(three.len(), 3);
        assert!(partition_zones(10, 10, 0).is_empty());
    }

    #[test]
    fn test_special_distribution_remainder_goes_to_bridges() {
        let dist = special_distribution(14);
        assert_eq!(dist.iter().map(|(_, n)| n).sum::<usize>(), 14);
        assert_eq!(dist[0], (LocationKind::Port, 2));
        assert_eq!(dist[5], (LocationKind::Bridge, 4));
        assert_eq!(special_distribution(4)[5], (LocationKind::Bridge, 4));
    }

    #[test]
    fn test_port_needs_coast_next_to_ocean() {
        let mut map = plains(12, 12);
        map.fill_rectangle(0, 0, 12, 3, TerrainType::Ocean);
        map.add(Hex::at(6, 3, TerrainType::Coast));
        map.add(Hex::at(9, 8, TerrainType::Coast));

        let placement = Placement::new(&map, 1, 0);
        assert_eq!(placement.special_site(LocationKind::Port), Some(HexCoordinate::new(6, 3)));
    }

    #[test]
    fn test_reservation_blocks_neighbors() {
        let map = plains(10, 10);
        let mut placement = Placement::new(&map, 5, 0);
        placement.place(HexCoordinate::new(5, 5), LocationKind::Village, 2);
        assert!(placement.used.contains(&HexCoordinate::new(6, 4)));
        assert!(placement.used.contains(&HexCoordinate::new(7, 5)));
        assert!(!placement.used.contains(&HexCoordinate::new(8, 5)));
    }

    #[test]
    fn test_saved_generator_fails_loudly() {
        let map = RectangularWorldGenerator::new(4, 4).generate_world().unwrap();
        let err = SavedLocationGenerator::new(Path::new("locations.sav"))
            .generate_locations(&map)
            .unwrap_err();
        assert!(err.is_not_implemented());
    }

    #[test]
    fn test_step_stamps_hexes() {
        let mut ctx = GenerationContext::default();
        ctx.hex_map = plains(30, 20);
        let mut step = LocationGenerationStep::new(Box::new(RandomLocationGenerator::new(6, 4)));
        step.execute(&mut ctx).unwrap();

        assert!(!ctx.locations.is_empty());
        for l in &ctx.locations {
            let hex = ctx.hex_map.get(l.coordinates).unwrap();
            assert_eq!(hex.location_id.as_deref(), Some(l.id.to_string().as_str()));
        }
        let stamped = ctx.hex_map.iter().filter(|h| h.has_location()).count();
        assert_eq!(stamped, ctx.locations.len());
    }

    #[test]
    fn test_step_without_world_fails() {
        let mut ctx = GenerationContext::default();
        let mut step = LocationGenerationStep::new(Box::new(RandomLocationGenerator::new(6, 4)));
        assert!(matches!(step.execute(&mut ctx), Err(GenerationError::MissingHexMap)));
    }
}
