//! Generation-group classification.
//!
//! A generation group is the set of placement objects sharing a
//! `gen_group_id` within one map pass; the group spawns and despawns as a
//! unit. Two derived facts are computed per group:
//!
//! - whether the group is suppressed under last-boss mode (any ineligible
//!   member suppresses the whole group)
//! - for korok groups, which puzzle archetype the group represents

pub mod korok;

use crate::core::catalog::ActorCatalog;
use crate::core::error::Result;
use crate::core::models::PlacementObject;
use crate::core::naming::NameTable;

pub use korok::KorokArchetype;

/// Canonical display name marking the korok member of a puzzle group.
pub const KOROK_DISPLAY_NAME: &str = "Korok";

/// Suppressed by name even though its profile check alone would already
/// suppress it; kept as an explicit rule since the profile data has
/// changed across game versions.
const LAST_BOSS_NAME_EXCEPTION: &str = "Enemy_Guardian_A";

/// Name fragments of entrance/warp/terminal markers that never spawn
/// under last-boss mode.
const LAST_BOSS_EXCLUDED_MARKERS: [&str; 3] = ["Entrance", "WarpPoint", "Terminal"];

/// Classifier over one generation group's member list.
#[derive(Clone, Copy)]
pub struct GroupClassifier<'a> {
    catalog: ActorCatalog<'a>,
    names: &'a NameTable,
}

impl<'a> GroupClassifier<'a> {
    pub fn new(catalog: ActorCatalog<'a>, names: &'a NameTable) -> Self {
        Self { catalog, names }
    }

    /// Whether a single object spawns under last-boss mode.
    ///
    /// Ineligible when the actor is enemy/NPC-like, when the name is the
    /// fixed exception, or when it contains an excluded marker fragment.
    /// An unknown actor is an error, not an answer.
    pub fn should_spawn_for_last_boss_mode(&self, obj: &PlacementObject) -> Result<bool> {
        let name = obj.name();
        if self.catalog.is_enemy_or_npc_like(name)? {
            return Ok(false);
        }
        if name == LAST_BOSS_NAME_EXCEPTION {
            return Ok(false);
        }
        if LAST_BOSS_EXCLUDED_MARKERS.iter().any(|m| name.contains(m)) {
            return Ok(false);
        }
        Ok(true)
    }

    /// Whether the whole group is suppressed under last-boss mode:
    /// true as soon as any member is individually ineligible.
    pub fn group_skipped_for_last_boss_mode(&self, members: &[&PlacementObject]) -> Result<bool> {
        for member in members {
            if !self.should_spawn_for_last_boss_mode(member)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Puzzle archetype for a korok group. `trigger` is the member whose
    /// display name resolved to [`KOROK_DISPLAY_NAME`].
    pub fn classify_korok(
        &self,
        group: &[&PlacementObject],
        trigger: &PlacementObject,
    ) -> Result<KorokArchetype> {
        korok::classify(group, trigger, self.names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::actor_name_hash;
    use crate::core::models::ObjectData;
    use crate::core::tables::{ActorInfoTable, ActorRecord};
    use serde_json::json;

    fn obj(name: &str) -> PlacementObject {
        let data: ObjectData = serde_json::from_value(json!({
            "HashId": 1u32,
            "UnitConfigName": name,
            "Translate": [0.0, 0.0, 0.0]
        }))
        .unwrap();
        PlacementObject { gen_group_id: 7, data }
    }

    fn table() -> ActorInfoTable {
        ActorInfoTable::from_pairs(
            [
                ("Enemy_Bokoblin", "Enemy"),
                ("Enemy_Guardian_A", "Weapon"),
                ("Item_Fruit_A", "Item"),
                ("DgnObj_EntranceElevator", "System"),
                ("WarpPointTag", "System"),
                ("RemainsLithograph_Terminal", "System"),
                ("Obj_Plant_Korok_A_01", "System"),
            ]
            .into_iter()
            .map(|(name, profile)| {
                (
                    actor_name_hash(name),
                    ActorRecord { profile: profile.to_string(), ..Default::default() },
                )
            })
            .collect(),
        )
    }

    fn classifier<'a>(table: &'a ActorInfoTable, names: &'a NameTable) -> GroupClassifier<'a> {
        GroupClassifier::new(ActorCatalog::new(table), names)
    }

    #[test]
    fn test_enemy_is_ineligible() {
        let (t, n) = (table(), NameTable::default());
        let c = GroupClassifier::new(ActorCatalog::new(&t), &n);
        assert!(!c.should_spawn_for_last_boss_mode(&obj("Enemy_Bokoblin")).unwrap());
    }

    #[test]
    fn test_plain_item_is_eligible() {
        let (t, n) = (table(), NameTable::default());
        let c = classifier(&t, &n);
        assert!(c.should_spawn_for_last_boss_mode(&obj("Item_Fruit_A")).unwrap());
    }

    #[test]
    fn test_named_exception_is_ineligible() {
        // Enemy_Guardian_A carries a non-enemy profile here; the name rule
        // still suppresses it.
        let (t, n) = (table(), NameTable::default());
        let c = classifier(&t, &n);
        assert!(!c.should_spawn_for_last_boss_mode(&obj("Enemy_Guardian_A")).unwrap());
    }

    #[test]
    fn test_marker_fragments_are_ineligible() {
        let (t, n) = (table(), NameTable::default());
        let c = classifier(&t, &n);
        for name in ["DgnObj_EntranceElevator", "WarpPointTag", "RemainsLithograph_Terminal"] {
            assert!(!c.should_spawn_for_last_boss_mode(&obj(name)).unwrap(), "{name}");
        }
    }

    #[test]
    fn test_ganon_beast_exception_is_eligible() {
        let (t, n) = (table(), NameTable::default());
        let c = classifier(&t, &n);
        assert!(c.should_spawn_for_last_boss_mode(&obj("Enemy_GanonBeast")).unwrap());
    }

    #[test]
    fn test_unknown_actor_fails_eligibility() {
        let (t, n) = (table(), NameTable::default());
        let c = classifier(&t, &n);
        assert!(c.should_spawn_for_last_boss_mode(&obj("Enemy_Unmapped")).is_err());
    }

    #[test]
    fn test_one_ineligible_member_skips_the_group() {
        let (t, n) = (table(), NameTable::default());
        let c = classifier(&t, &n);
        let a = obj("Item_Fruit_A");
        let b = obj("Enemy_Bokoblin");

        assert!(!c.group_skipped_for_last_boss_mode(&[&a]).unwrap());
        assert!(c.group_skipped_for_last_boss_mode(&[&a, &b]).unwrap());
    }
}
