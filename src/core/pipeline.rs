//! Per-map enrichment orchestration.
//!
//! [`Enricher`] ties the lookup components together: for each placement
//! map it buckets objects into generation groups, memoizes the per-group
//! last-boss eligibility, then derives the full [`EnrichedRecord`] for
//! every object in input order. The whole pass is a pure function of the
//! loaded static tables and the map; maps are independent of each other
//! and can be processed on separate threads by the caller.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;

use crate::core::catalog::ActorCatalog;
use crate::core::classify::{GroupClassifier, KOROK_DISPLAY_NAME};
use crate::core::error::Result;
use crate::core::models::{DropSpec, EnrichedRecord, PlacementMap, PlacementObject};
use crate::core::polygon::PolygonLocator;
use crate::core::region::{AreaLookup, RegionResolver};
use crate::core::tables::StaticTables;

/// Field area whose objects may spawn with the Lord of the Mountain.
const LOTM_FIELD_AREA: i32 = 64;

/// Item tag gating the Lord of the Mountain spawn.
const LOTM_TAG: &str = "UnderGodForest";

/// Equipment parameter slots, checked in order.
const EQUIP_SLOTS: [&str; 6] = [
    "EquipItem1",
    "EquipItem2",
    "EquipItem3",
    "EquipItem4",
    "EquipItem5",
    "RideHorseName",
];

// ============================================================================
// Generation-group arena
// ============================================================================

#[derive(Debug, Default)]
struct GroupEntry {
    /// Indexes into the map's object list.
    members: Vec<usize>,
    /// Memoized last-boss suppression flag for the whole group.
    skipped: bool,
}

/// Generation groups of one map pass, indexed by group id.
///
/// Membership is recomputed per map and never outlives the pass; the
/// eligibility flag is computed once here so every member sees the same
/// answer regardless of processing order.
pub struct GenGroups {
    groups: HashMap<i64, GroupEntry>,
}

impl GenGroups {
    /// Bucket a map's objects and memoize each group's suppression flag.
    pub fn build(map: &PlacementMap, classifier: &GroupClassifier<'_>) -> Result<Self> {
        let mut groups: HashMap<i64, GroupEntry> = HashMap::new();
        for (idx, obj) in map.objs.iter().enumerate() {
            groups.entry(obj.gen_group_id).or_default().members.push(idx);
        }
        for entry in groups.values_mut() {
            let members: Vec<&PlacementObject> =
                entry.members.iter().map(|&i| &map.objs[i]).collect();
            entry.skipped = classifier.group_skipped_for_last_boss_mode(&members)?;
        }
        Ok(Self { groups })
    }

    /// Member list of a group, in map order.
    pub fn members<'m>(&self, map: &'m PlacementMap, id: i64) -> Vec<&'m PlacementObject> {
        self.groups
            .get(&id)
            .map(|entry| entry.members.iter().map(|&i| &map.objs[i]).collect())
            .unwrap_or_default()
    }

    /// Whether a group is suppressed under last-boss mode.
    pub fn skipped(&self, id: i64) -> bool {
        self.groups.get(&id).is_some_and(|entry| entry.skipped)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ============================================================================
// Enricher
// ============================================================================

/// The enrichment pipeline over one set of loaded static tables.
///
/// All lookups are immutable and shared; the enricher itself is cheap to
/// construct and holds only references.
pub struct Enricher<'a> {
    tables: &'a StaticTables,
    catalog: ActorCatalog<'a>,
    locator: PolygonLocator<'a>,
    regions: RegionResolver<'a>,
}

impl<'a> Enricher<'a> {
    /// Build an enricher from the static tables and the two externally
    /// decoded area grids.
    pub fn new(
        tables: &'a StaticTables,
        tower: &'a dyn AreaLookup,
        field: &'a dyn AreaLookup,
    ) -> Self {
        Self {
            tables,
            catalog: ActorCatalog::new(&tables.actor_info),
            locator: PolygonLocator::new(&tables.polygons),
            regions: RegionResolver::new(tower, field),
        }
    }

    /// Enrich every object of one map, in input order.
    ///
    /// Two passes: group membership and eligibility first, then one
    /// record per object. Any error aborts the whole map pass.
    pub fn enrich_map(&self, map: &PlacementMap) -> Result<Vec<EnrichedRecord>> {
        log::debug!(
            "processing {}/{} (static: {})",
            map.map_type,
            map.map_name,
            map.is_static
        );
        let classifier = GroupClassifier::new(self.catalog, &self.tables.names);
        let groups = GenGroups::build(map, &classifier)?;

        let mut records = Vec::with_capacity(map.objs.len());
        for obj in &map.objs {
            records.push(self.enrich_obj(map, obj, &groups, &classifier)?);
        }
        log::debug!(
            "enriched {} objects across {} groups in {}/{}",
            records.len(),
            groups.len(),
            map.map_type,
            map.map_name
        );
        Ok(records)
    }

    fn enrich_obj(
        &self,
        map: &PlacementMap,
        obj: &PlacementObject,
        groups: &GenGroups,
        classifier: &GroupClassifier<'_>,
    ) -> Result<EnrichedRecord> {
        let name = obj.name();
        let params = obj.data.parameters.as_ref();

        // Scale only applies to weapons and enemies; for those, missing
        // parameters degrade to level 0 rather than unknown.
        let scale = if name.starts_with("Weapon_") || name.starts_with("Enemy_") {
            match params {
                Some(_) => obj.data.param_i64("LevelSensorMode"),
                None => Some(0),
            }
        } else {
            None
        };

        let (region, raw_area) = if map.is_main_field() {
            let [x, _, z] = obj.data.translate;
            (
                self.regions.tower_region_name(x, z).to_string(),
                Some(self.regions.field_area(x, z)),
            )
        } else {
            (String::new(), None)
        };
        let field_area = raw_area.filter(|area| *area >= 0);

        let spawns_with_lotm = raw_area == Some(LOTM_FIELD_AREA)
            && self
                .tables
                .item_tags
                .get(name)
                .is_some_and(|tags| tags.iter().any(|t| t == LOTM_TAG));

        let ui_name = self.tables.names.display_name_for(obj);
        let korok_id = self.tables.korok_ids.get(&obj.data.hash_id).cloned();
        let korok_type = if ui_name == KOROK_DISPLAY_NAME {
            let members = groups.members(map, obj.gen_group_id);
            Some(classifier.classify_korok(&members, obj)?)
        } else {
            None
        };

        // Static-table location is the default; a polygon hit always wins.
        let mut location = self.tables.locations.get(&obj.data.hash_id).cloned();
        if let Some(poly) = self.locator.locate(obj.data.translate) {
            location = Some(poly.name.clone());
        }

        let data = self.merged_data(obj)?;

        let drop = params.and_then(drops_from);
        let equip = params.map(equipment_from);
        let ui_drop = params.map(|p| ui_drops_from(p, self.tables));
        let ui_equip = equip.as_ref().map(|items| {
            items
                .iter()
                .map(|item| self.tables.names.display_name(item))
                .collect::<Vec<_>>()
                .join(", ")
        });

        Ok(EnrichedRecord {
            map_type: map.map_type.clone(),
            map_name: map.map_name.clone(),
            map_static: map.is_static,
            gen_group: obj.gen_group_id,
            hash_id: obj.data.hash_id,
            unit_config_name: name.to_string(),
            ui_name,
            data,
            one_hit_mode: obj.data.param_truthy("IsIchigekiActor"),
            last_boss_mode: !groups.skipped(obj.gen_group_id),
            hard_mode: obj.data.param_truthy("IsHardModeActor"),
            disable_rankup_for_hard_mode: obj.data.param_truthy("DisableRankUpForHardMode"),
            scale,
            sharp_weapon_judge_type: obj.data.param_i64("SharpWeaponJudgeType").unwrap_or(0),
            drop,
            equip,
            ui_drop,
            ui_equip,
            message_id: obj.data.param_str("MessageID").map(str::to_string),
            region,
            field_area,
            spawns_with_lotm,
            korok_id,
            korok_type,
            location,
        })
    }

    /// Object data with traverse metadata and profile override injected
    /// into a copy of the parameter map. The input object and the static
    /// tables are never mutated.
    fn merged_data(&self, obj: &PlacementObject) -> Result<Value> {
        let name = obj.name();
        let mut data = serde_json::to_value(&obj.data)?;

        let meta = self.tables.actor_meta.get(name);
        let profile = self.tables.actor_profiles.get(name);
        if meta.is_none() && profile.is_none() {
            return Ok(data);
        }
        if let Value::Object(fields) = &mut data {
            let params = fields
                .entry("!Parameters")
                .or_insert_with(|| Value::Object(Default::default()));
            if let Value::Object(params) = params {
                if let Some(meta) = meta {
                    params.insert("ActorMeta".to_string(), serde_json::to_value(meta)?);
                }
                if let Some(profile) = profile {
                    params.insert("ProfileUser".to_string(), Value::String(profile.clone()));
                }
            }
        }
        Ok(data)
    }
}

// ============================================================================
// Parameter-derived summaries
// ============================================================================

/// Drop summary: a direct drop actor always beats a drop-table
/// reference, and the `"Normal"` sentinel table counts as absent.
fn drops_from(params: &IndexMap<String, Value>) -> Option<DropSpec> {
    if let Some(actor) = str_param(params, "DropActor") {
        return Some(DropSpec::Actor(actor.to_string()));
    }
    match str_param(params, "DropTable") {
        Some(table) if table != "Normal" => Some(DropSpec::Table(table.to_string())),
        _ => None,
    }
}

/// Equipment carried by the actor: the five item slots and the horse,
/// minus `Default` placeholders, plus any non-standard arrow.
fn equipment_from(params: &IndexMap<String, Value>) -> Vec<String> {
    let mut info = Vec::new();
    for slot in EQUIP_SLOTS {
        if let Some(item) = params.get(slot).and_then(Value::as_str) {
            if item != "Default" {
                info.push(item.to_string());
            }
        }
    }
    if let Some(arrow) = str_param(params, "ArrowName") {
        if arrow != "NormalArrow" {
            info.push(arrow.to_string());
        }
    }
    info
}

fn ui_drops_from(params: &IndexMap<String, Value>, tables: &StaticTables) -> String {
    if let Some(actor) = str_param(params, "DropActor") {
        return tables.names.display_name(actor).to_string();
    }
    match str_param(params, "DropTable") {
        Some(table) if table != "Normal" => format!("Table:{table}"),
        _ => String::new(),
    }
}

/// Non-empty string parameter.
fn str_param<'p>(params: &'p IndexMap<String, Value>, key: &str) -> Option<&'p str> {
    params.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}
