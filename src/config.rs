use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level enrichment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    pub tables: TableConfig,
}

/// On-disk location of each static side table.
///
/// Defaults follow the conventional content layout; every path can be
/// overridden individually, or the whole set re-rooted with
/// [`TableConfig::rooted_at`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Sorted actor-hash-to-profile table.
    pub actor_info: PathBuf,
    /// Region polygon collection (GeoJSON-like).
    pub region_polygons: PathBuf,
    /// Korok id table keyed by placement hash.
    pub korok_ids: PathBuf,
    /// Named-location table keyed by placement hash.
    pub locations: PathBuf,
    /// Item tag table keyed by actor type name.
    pub item_tags: PathBuf,
    /// Traverse-bounding metadata keyed by actor type name.
    pub actor_meta: PathBuf,
    /// Profile override table keyed by actor type name.
    pub actor_profiles: PathBuf,
    /// Actor display names.
    pub names: PathBuf,
    /// Location-marker message texts keyed by message id.
    pub location_marker_texts: PathBuf,
    /// Dungeon message texts keyed by message id.
    pub dungeon_texts: PathBuf,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            tables: TableConfig::default(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            actor_info: PathBuf::from("ActorInfo.product.json"),
            region_polygons: PathBuf::from("castle.json"),
            korok_ids: PathBuf::from("korok_ids.json"),
            locations: PathBuf::from("locations.json"),
            item_tags: PathBuf::from("item_tags.json"),
            actor_meta: PathBuf::from("actor_meta.json"),
            actor_profiles: PathBuf::from("actor_profiles.json"),
            names: PathBuf::from("names.json"),
            location_marker_texts: PathBuf::from("LocationMarker.json"),
            dungeon_texts: PathBuf::from("Dungeon.json"),
        }
    }
}

impl EnrichConfig {
    /// Load configuration from a TOML file.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} - using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No config file at {} - using defaults", path.display());
                Self::default()
            }
        }
    }
}

impl TableConfig {
    /// Re-root every relative path onto a base directory. Absolute paths
    /// are left untouched.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        for path in [
            &mut self.actor_info,
            &mut self.region_polygons,
            &mut self.korok_ids,
            &mut self.locations,
            &mut self.item_tags,
            &mut self.actor_meta,
            &mut self.actor_profiles,
            &mut self.names,
            &mut self.location_marker_texts,
            &mut self.dungeon_texts,
        ] {
            if path.is_relative() {
                *path = base.join(&path);
            }
        }
        self
    }
}
