//! Static side tables supplied externally, loaded once and immutable.
//!
//! Each table is read from its configured path via `serde_json`, failing
//! fast on I/O or parse errors. All tables are read-only for the duration
//! of a run and safe to share across threads.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::TableConfig;
use crate::core::error::Result;
use crate::core::naming::NameTable;
use crate::core::polygon::{FeatureCollection, RegionPolygon};

// ============================================================================
// Actor info
// ============================================================================

/// Per-actor-type metadata record from the actor info table.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActorRecord {
    /// Classification string used to decide enemy/NPC status.
    #[serde(default)]
    pub profile: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Actor metadata keyed by the CRC32 hash of the actor type name.
///
/// `hashes` is sorted ascending with no duplicates; `actors` holds the
/// matching record at the same index.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActorInfoTable {
    #[serde(rename = "Hashes")]
    pub hashes: Vec<u32>,
    #[serde(rename = "Actors")]
    pub actors: Vec<ActorRecord>,
}

impl ActorInfoTable {
    /// Build a table from unsorted (name hash, record) pairs. Mostly
    /// useful for synthetic tables in tests; production tables arrive
    /// pre-sorted from the data producer.
    pub fn from_pairs(mut pairs: Vec<(u32, ActorRecord)>) -> Self {
        pairs.sort_by_key(|(hash, _)| *hash);
        let (hashes, actors) = pairs.into_iter().unzip();
        Self { hashes, actors }
    }
}

// ============================================================================
// Remaining side tables
// ============================================================================

/// Traverse-bounding metadata for an actor type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorMeta {
    #[serde(rename = "boundingForTraverse", skip_serializing_if = "Option::is_none")]
    pub bounding_for_traverse: Option<Value>,
    #[serde(rename = "traverseDist", skip_serializing_if = "Option::is_none")]
    pub traverse_dist: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct KorokEntry {
    hash_id: u32,
    id: String,
}

/// Every static side table the enrichment pipeline consults.
///
/// Constructed once per run (via [`StaticTables::load`] or literally in
/// tests) and passed by reference into each component; no globals.
#[derive(Debug, Clone, Default)]
pub struct StaticTables {
    pub actor_info: ActorInfoTable,
    pub polygons: Vec<RegionPolygon>,
    /// Korok id by placement hash id.
    pub korok_ids: HashMap<u32, String>,
    /// Named location by placement hash id.
    pub locations: HashMap<u32, String>,
    /// Item tags by actor type name.
    pub item_tags: HashMap<String, Vec<String>>,
    /// Traverse metadata by actor type name.
    pub actor_meta: HashMap<String, ActorMeta>,
    /// Profile overrides by actor type name.
    pub actor_profiles: HashMap<String, String>,
    pub names: NameTable,
}

impl StaticTables {
    /// Load every table named by the config. Any missing file or parse
    /// failure aborts the load.
    pub fn load(config: &TableConfig) -> Result<Self> {
        log::info!("loading static side tables");
        let actor_info: ActorInfoTable = read_json(&config.actor_info)?;
        let feature_collection: FeatureCollection = read_json(&config.region_polygons)?;
        let polygons = feature_collection.features.into_iter().map(Into::into).collect();

        let korok_entries: Vec<KorokEntry> = read_json(&config.korok_ids)?;
        let korok_ids = korok_entries.into_iter().map(|k| (k.hash_id, k.id)).collect();

        let locations = hash_keyed(read_json(&config.locations)?);

        let tables = Self {
            actor_info,
            polygons,
            korok_ids,
            locations,
            item_tags: read_json(&config.item_tags)?,
            actor_meta: read_json(&config.actor_meta)?,
            actor_profiles: read_json(&config.actor_profiles)?,
            names: NameTable {
                names: read_json(&config.names)?,
                location_markers: read_json(&config.location_marker_texts)?,
                dungeons: read_json(&config.dungeon_texts)?,
            },
        };
        log::debug!(
            "loaded {} actors, {} polygons, {} korok ids, {} locations",
            tables.actor_info.hashes.len(),
            tables.polygons.len(),
            tables.korok_ids.len(),
            tables.locations.len()
        );
        Ok(tables)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// JSON objects key hash ids as strings; convert to the numeric key space,
/// warning on anything unparseable rather than failing the load.
fn hash_keyed(raw: HashMap<String, String>) -> HashMap<u32, String> {
    raw.into_iter()
        .filter_map(|(key, value)| match key.parse::<u32>() {
            Ok(hash) => Some((hash, value)),
            Err(_) => {
                log::warn!("skipping non-numeric hash key '{key}' in location table");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_actor_info_from_pairs_sorts() {
        let table = ActorInfoTable::from_pairs(vec![
            (30, ActorRecord { profile: "Weapon".into(), ..Default::default() }),
            (10, ActorRecord { profile: "Enemy".into(), ..Default::default() }),
            (20, ActorRecord { profile: "NPC".into(), ..Default::default() }),
        ]);
        assert_eq!(table.hashes, vec![10, 20, 30]);
        assert_eq!(table.actors[0].profile, "Enemy");
        assert_eq!(table.actors[2].profile, "Weapon");
    }

    #[test]
    fn test_hash_keyed_skips_bad_keys() {
        let mut raw = HashMap::new();
        raw.insert("123".to_string(), "Castle".to_string());
        raw.insert("not-a-hash".to_string(), "Nowhere".to_string());
        let converted = hash_keyed(raw);
        assert_eq!(converted.len(), 1);
        assert_eq!(converted.get(&123).map(String::as_str), Some("Castle"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        write(p, "ActorInfo.product.json", r#"{"Hashes": [10, 20], "Actors": [{"profile": "Enemy"}, {"profile": "System"}]}"#);
        write(
            p,
            "castle.json",
            r#"{"features": [{"properties": {"name": "Keep", "priority": 1, "xmin": -5.0, "xmax": 5.0, "zmin": -5.0, "zmax": 5.0}, "geometry": {"coordinates": [[[-5.0,-5.0],[5.0,-5.0],[5.0,5.0],[-5.0,5.0]]]}}]}"#,
        );
        write(p, "korok_ids.json", r#"[{"hash_id": 77, "id": "A01"}]"#);
        write(p, "locations.json", r#"{"88": "Hateno Village"}"#);
        write(p, "item_tags.json", r#"{"Item_Fruit_A": ["CookFruit"]}"#);
        write(p, "actor_meta.json", r#"{"Enemy_Lynel": {"boundingForTraverse": {"Min": 1.0}, "traverseDist": 10.0}}"#);
        write(p, "actor_profiles.json", r#"{"Enemy_Lynel": "Enemy"}"#);
        write(p, "names.json", r#"{"Enemy_Lynel": "Lynel"}"#);
        write(p, "LocationMarker.json", r#"{"Tower01": "Hebra Tower"}"#);
        write(p, "Dungeon.json", r#"{"Dungeon000": "Some Shrine"}"#);

        let config = TableConfig::default().rooted_at(p);
        let tables = StaticTables::load(&config).unwrap();
        assert_eq!(tables.actor_info.hashes, vec![10, 20]);
        assert_eq!(tables.polygons[0].name, "Keep");
        assert_eq!(tables.korok_ids.get(&77).map(String::as_str), Some("A01"));
        assert_eq!(tables.locations.get(&88).map(String::as_str), Some("Hateno Village"));
        assert_eq!(tables.names.display_name("Enemy_Lynel"), "Lynel");
        assert!(tables.actor_meta.contains_key("Enemy_Lynel"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = TableConfig::default().rooted_at(dir.path());
        assert!(StaticTables::load(&config).is_err());
    }
}
