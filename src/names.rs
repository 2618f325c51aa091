//! Name banks for generated locations.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::generator::location::LocationKind;

const CITIES: &[&str] = &[
    "Highmarch", "Stonebridge", "Valdoria", "Kingsport", "Aldermere", "Ravenhold",
    "Brightwater", "Goldcrest", "Westmoor", "Thornwall",
];
const VILLAGES: &[&str] = &[
    "Millbrook", "Oakhollow", "Fernby", "Ashdale", "Willowmere", "Hayfield",
    "Briarwood", "Cobblestone", "Meadowend", "Larkspur",
];
const TOWNS: &[&str] = &[
    "Marketon", "Crossford", "Redhill", "Ironvale", "Saltmarsh", "Greywick",
    "Elmstead", "Copperton",
];
const OUTPOSTS: &[&str] = &[
    "Frontier Post", "Last Light", "Wolf's Watch", "Border Camp", "Far Reach",
    "Dust Station",
];
const PORTS: &[&str] = &[
    "Gullhaven", "Anchorage", "Tidewater", "Seagate", "Driftmouth", "Harbor's End",
];
const FORTRESSES: &[&str] = &[
    "Blackspire", "Grimhold", "Iron Bastion", "Eaglecrag", "Stormkeep", "Dragonwall",
];
const MONASTERIES: &[&str] = &[
    "Silent Cloister", "Abbey of Dawn", "Moonshadow Priory", "Stillwater Hermitage",
    "Cloud Temple",
];
const MINES: &[&str] = &[
    "Deepdelve", "Silverseam", "Old Shaft", "Copper Hollow", "Gemvault", "Coalpit",
];
const WATCHTOWERS: &[&str] = &[
    "Sentinel Tower", "Beacon Hill", "Hawk's Perch", "Lookout Rock", "Warden's Spire",
];
const BRIDGES: &[&str] = &[
    "Kingsbridge", "Old Crossing", "Stone Arch", "Ferryman's Span", "Twin Fords",
];

/// Variation prefixes applied to some village and town names.
const PREFIXES: &[&str] = &["Upper", "Lower", "New", "Old", "East", "West", "Little"];

/// Picks names for locations from built-in word lists.
pub struct NameBank;

impl NameBank {
    pub fn names_for(kind: LocationKind) -> &'static [&'static str] {
        match kind {
            LocationKind::City => CITIES,
            LocationKind::Village => VILLAGES,
            LocationKind::Town => TOWNS,
            LocationKind::Outpost => OUTPOSTS,
            LocationKind::Port => PORTS,
            LocationKind::Fortress => FORTRESSES,
            LocationKind::Monastery => MONASTERIES,
            LocationKind::Mine => MINES,
            LocationKind::Watchtower => WATCHTOWERS,
            LocationKind::Bridge => BRIDGES,
        }
    }

    /// A random name for `kind`. Villages and towns sometimes get a prefix.
    pub fn pick(kind: LocationKind, rng: &mut ChaCha8Rng) -> String {
        let base = Self::names_for(kind)
            .choose(rng)
            .copied()
            .unwrap_or("Nameless");

        let prefixable = matches!(kind, LocationKind::Village | LocationKind::Town);
        if prefixable && rng.gen_bool(0.5) {
            let prefix = PREFIXES.choose(rng).copied().unwrap_or("New");
            format!("{} {}", prefix, base)
        } else {
            base.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_every_kind_has_names() {
        for &kind in LocationKind::all() {
            assert!(!NameBank::names_for(kind).is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn test_pick_is_seeded() {
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        for &kind in LocationKind::all() {
            assert_eq!(NameBank::pick(kind, &mut a), NameBank::pick(kind, &mut b));
        }
    }

    #[test]
    fn test_outposts_never_prefixed() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let name = NameBank::pick(LocationKind::Outpost, &mut rng);
            assert!(OUTPOSTS.contains(&name.as_str()));
        }
    }
}
