//! Display-name resolution for placement objects.
//!
//! Korok classification and the UI summary columns operate on display
//! names, not raw actor keys: the name table maps `UnitConfigName` to the
//! localized string, falling back to the raw key when no entry exists.
//! `LocationTag` markers are special-cased through their `MessageID`
//! parameter against the location-marker and dungeon message texts.

use std::collections::HashMap;

use crate::core::models::PlacementObject;

/// Actor name to display name mapping plus the message text tables.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    /// `UnitConfigName` to localized display name.
    pub names: HashMap<String, String>,
    /// Location-marker message texts keyed by `MessageID`.
    pub location_markers: HashMap<String, String>,
    /// Dungeon message texts keyed by `MessageID`.
    pub dungeons: HashMap<String, String>,
}

impl NameTable {
    /// Display name for a raw actor key; the key itself when unmapped.
    pub fn display_name<'a>(&'a self, unit_config_name: &'a str) -> &'a str {
        self.names
            .get(unit_config_name)
            .map(String::as_str)
            .unwrap_or(unit_config_name)
    }

    /// Display name for a placement object, resolving `LocationTag`
    /// markers through the message texts.
    pub fn display_name_for(&self, obj: &PlacementObject) -> String {
        if obj.data.unit_config_name != "LocationTag" {
            return self.display_name(&obj.data.unit_config_name).to_string();
        }
        let id = obj.data.param_str("MessageID").unwrap_or("");
        let location_name = self
            .location_markers
            .get(id)
            .or_else(|| self.dungeons.get(id))
            .map(String::as_str)
            .unwrap_or(id);
        let mut s = format!("Location: {location_name}");
        if let Some(sub) = self.dungeons.get(&format!("{id}_sub")) {
            s.push_str(" - ");
            s.push_str(sub);
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ObjectData, PlacementObject};
    use serde_json::json;

    fn obj(unit_config_name: &str, params: serde_json::Value) -> PlacementObject {
        let data: ObjectData = serde_json::from_value(json!({
            "HashId": 1u32,
            "UnitConfigName": unit_config_name,
            "Translate": [0.0, 0.0, 0.0],
            "!Parameters": params
        }))
        .unwrap();
        PlacementObject { gen_group_id: 0, data }
    }

    fn table() -> NameTable {
        let mut t = NameTable::default();
        t.names.insert("Weapon_Sword_001".into(), "Traveler's Sword".into());
        t.location_markers.insert("Tower06".into(), "Central Tower".into());
        t.dungeons.insert("Dungeon042".into(), "Mirro Shaz Shrine".into());
        t.dungeons
            .insert("Dungeon042_sub".into(), "Tempered Power".into());
        t
    }

    #[test]
    fn test_display_name_mapped() {
        assert_eq!(table().display_name("Weapon_Sword_001"), "Traveler's Sword");
    }

    #[test]
    fn test_display_name_fallback_is_raw_key() {
        assert_eq!(table().display_name("Obj_KorokPot_A_01"), "Obj_KorokPot_A_01");
    }

    #[test]
    fn test_location_tag_marker_text() {
        let o = obj("LocationTag", json!({ "MessageID": "Tower06" }));
        assert_eq!(table().display_name_for(&o), "Location: Central Tower");
    }

    #[test]
    fn test_location_tag_dungeon_with_sub() {
        let o = obj("LocationTag", json!({ "MessageID": "Dungeon042" }));
        assert_eq!(
            table().display_name_for(&o),
            "Location: Mirro Shaz Shrine - Tempered Power"
        );
    }

    #[test]
    fn test_location_tag_unknown_id_falls_back_to_id() {
        let o = obj("LocationTag", json!({ "MessageID": "Nowhere" }));
        assert_eq!(table().display_name_for(&o), "Location: Nowhere");
    }
}
