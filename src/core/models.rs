//! Core data models for placement maps and enriched output records.
//!
//! - [`PlacementObject`]: one spatially-placed object, as parsed by the
//!   external map reader, plus its generation-group id
//! - [`PlacementMap`]: a named, typed collection of objects and rails
//! - [`DropSpec`]: direct-drop vs drop-table summary
//! - [`EnrichedRecord`]: the pipeline's output row, one per object
//!
//! Serde renames follow the source JSON field names (`HashId`,
//! `UnitConfigName`, `Translate`, `!Parameters`, `LinksToRail`); anything
//! unrecognized is preserved in a flattened `extra` map so the serialized
//! `data` payload of an [`EnrichedRecord`] stays lossless.

use indexmap::IndexMap;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::classify::korok::KorokArchetype;

/// Map type whose objects get region and field-area resolution.
pub const MAIN_FIELD: &str = "MainField";

// ============================================================================
// Placement input
// ============================================================================

/// Raw fields of a placement object, immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectData {
    /// 32-bit identity hash; not unique across the static/dynamic layers.
    #[serde(rename = "HashId")]
    pub hash_id: u32,

    /// Actor type key, e.g. `Weapon_Sword_001`.
    #[serde(rename = "UnitConfigName")]
    pub unit_config_name: String,

    /// World position (x, y, z).
    #[serde(rename = "Translate")]
    pub translate: [f32; 3],

    /// Open-ended attribute mapping; order preserved for round-trips.
    #[serde(
        rename = "!Parameters",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parameters: Option<IndexMap<String, Value>>,

    /// Rail link reference; presence alone is significant for
    /// single-object korok classification.
    #[serde(rename = "LinksToRail", default, skip_serializing_if = "Option::is_none")]
    pub links_to_rail: Option<Value>,

    /// Any other fields from the source map, kept verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ObjectData {
    /// Look up a parameter value by key.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.parameters.as_ref().and_then(|p| p.get(key))
    }

    /// String parameter, `None` when absent or not a string.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.param(key).and_then(Value::as_str)
    }

    /// Integer parameter, `None` when absent or not numeric.
    pub fn param_i64(&self, key: &str) -> Option<i64> {
        self.param(key).and_then(Value::as_i64)
    }

    /// Truthiness of a parameter, matching the source data's loose typing:
    /// booleans as-is, numbers by non-zero, strings by non-empty.
    pub fn param_truthy(&self, key: &str) -> bool {
        match self.param(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            _ => false,
        }
    }
}

/// One placement object together with its generation-group id.
///
/// The group id is assigned by the external map parser; it groups objects
/// that spawn and despawn together, and is only meaningful within one map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementObject {
    pub gen_group_id: i64,
    pub data: ObjectData,
}

impl PlacementObject {
    pub fn name(&self) -> &str {
        &self.data.unit_config_name
    }
}

/// A rail object; carried through untouched for the persistence sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailObject {
    #[serde(rename = "HashId")]
    pub hash_id: u32,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A named, typed collection of placement objects plus rails.
///
/// The `is_static` flag distinguishes the two physically distinct object
/// sets that share identifiers across the static and dynamic layers.
#[derive(Debug, Clone)]
pub struct PlacementMap {
    pub map_type: String,
    pub map_name: String,
    pub is_static: bool,
    pub objs: Vec<PlacementObject>,
    pub rails: Vec<RailObject>,
}

impl PlacementMap {
    pub fn new(map_type: impl Into<String>, map_name: impl Into<String>, is_static: bool) -> Self {
        Self {
            map_type: map_type.into(),
            map_name: map_name.into(),
            is_static,
            objs: Vec::new(),
            rails: Vec::new(),
        }
    }

    /// Whether region and field-area resolution applies to this map.
    pub fn is_main_field(&self) -> bool {
        self.map_type == MAIN_FIELD
    }
}

// ============================================================================
// Derived output
// ============================================================================

/// Drop summary: a direct drop actor always beats a drop-table reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropSpec {
    /// A specific actor is dropped.
    Actor(String),
    /// A named drop table is rolled.
    Table(String),
}

impl DropSpec {
    /// Numeric tag used in the serialized form: 1 = actor, 2 = table.
    pub fn code(&self) -> u8 {
        match self {
            DropSpec::Actor(_) => 1,
            DropSpec::Table(_) => 2,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DropSpec::Actor(name) | DropSpec::Table(name) => name,
        }
    }
}

// Serialized as the legacy `[code, name]` pair the sink schema expects.
impl Serialize for DropSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.code())?;
        tup.serialize_element(self.name())?;
        tup.end()
    }
}

/// Fully-derived record for one placement object, ready for persistence.
///
/// Created once per object per pipeline run and immutable afterwards;
/// ownership passes to the sink.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRecord {
    pub map_type: String,
    pub map_name: String,
    pub map_static: bool,
    pub gen_group: i64,
    pub hash_id: u32,
    pub unit_config_name: String,
    pub ui_name: String,
    /// Full object data after metadata merge, as stored in the sink.
    pub data: Value,
    pub one_hit_mode: bool,
    pub last_boss_mode: bool,
    pub hard_mode: bool,
    pub disable_rankup_for_hard_mode: bool,
    pub scale: Option<i64>,
    pub sharp_weapon_judge_type: i64,
    pub drop: Option<DropSpec>,
    pub equip: Option<Vec<String>>,
    pub ui_drop: Option<String>,
    pub ui_equip: Option<String>,
    pub message_id: Option<String>,
    pub region: String,
    pub field_area: Option<i32>,
    pub spawns_with_lotm: bool,
    pub korok_id: Option<String>,
    pub korok_type: Option<KorokArchetype>,
    pub location: Option<String>,
}
