//! Shared state threaded through a generation pipeline.

use std::fmt;
use std::sync::Arc;

use crate::generator::location::Location;
use crate::hex_map::HexMap;
use crate::settings::GameSettings;

/// Handle of a generated entity (location, NPC, item).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity-{:04}", self.0)
    }
}

/// Everything one generation run produces.
///
/// Created once per run, owned by the pipeline while it executes and handed
/// back to the caller afterwards.
#[derive(Clone, Debug)]
pub struct GenerationContext {
    pub settings: Arc<GameSettings>,
    pub hex_map: HexMap,
    pub locations: Vec<Location>,
    pub npcs: Vec<EntityId>,
    pub items: Vec<EntityId>,
}

impl GenerationContext {
    /// Fresh context with an empty map sized from the settings.
    pub fn new(settings: Arc<GameSettings>) -> Self {
        let hex_map = HexMap::new(settings.world.width, settings.world.height);
        Self {
            settings,
            hex_map,
            locations: Vec::new(),
            npcs: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.push(location);
    }

    pub fn add_npc(&mut self, npc: EntityId) {
        self.npcs.push(npc);
    }

    pub fn add_item(&mut self, item: EntityId) {
        self.items.push(item);
    }

    /// Replace the location list and stamp each location's id onto its hex.
    ///
    /// Stale ids from a previous location list are cleared first.
    pub fn set_locations(&mut self, locations: Vec<Location>) {
        for hex in self.hex_map.iter_mut() {
            hex.location_id = None;
        }
        for location in &locations {
            match self.hex_map.get_mut(location.coordinates) {
                Some(hex) => hex.location_id = Some(location.id.to_string()),
                None => tracing::warn!(
                    location = %location.name,
                    coordinate = %location.coordinates,
                    "location placed outside the hex map"
                ),
            }
        }
        self.locations = locations;
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new(Arc::new(GameSettings::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::location::LocationKind;
    use crate::hex::{HexCoordinate, TerrainType};

    #[test]
    fn test_new_context_is_empty_and_sized() {
        let mut settings = GameSettings::default();
        settings.world.width = 7;
        settings.world.height = 5;
        let ctx = GenerationContext::new(Arc::new(settings));
        assert!(ctx.hex_map.is_empty());
        assert_eq!((ctx.hex_map.width(), ctx.hex_map.height()), (7, 5));
        assert!(ctx.locations.is_empty() && ctx.npcs.is_empty() && ctx.items.is_empty());
    }

    #[test]
    fn test_set_locations_stamps_hexes() {
        let mut ctx = GenerationContext::default();
        ctx.hex_map.fill_rectangle(0, 0, 4, 4, TerrainType::Plains);
        let here = HexCoordinate::new(2, 3);
        ctx.set_locations(vec![Location::new(EntityId(1), LocationKind::Village, "Fernby", here)]);

        assert_eq!(ctx.locations.len(), 1);
        assert_eq!(
            ctx.hex_map.get(here).and_then(|h| h.location_id.clone()),
            Some("entity-0001".to_string())
        );

        ctx.set_locations(Vec::new());
        assert!(ctx.hex_map.iter().all(|h| h.location_id.is_none()));
    }

    #[test]
    fn test_entity_lists_keep_order() {
        let mut ctx = GenerationContext::default();
        ctx.add_npc(EntityId(3));
        ctx.add_npc(EntityId(1));
        ctx.add_item(EntityId(9));
        assert_eq!(ctx.npcs, vec![EntityId(3), EntityId(1)]);
        assert_eq!(ctx.items, vec![EntityId(9)]);
    }
}
