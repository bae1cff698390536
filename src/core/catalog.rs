//! Read-only actor metadata lookup keyed by hashed name.
//!
//! The actor info table arrives as a sorted array of CRC32 hashes with a
//! parallel record array; lookups binary-search the hash of the queried
//! name. A miss is a hard error: every actor referenced by placement data
//! is expected to be present (spawn-eligibility decisions on an unknown
//! actor would otherwise be silently wrong).

use crate::core::error::{EnrichError, Result};
use crate::core::hash::actor_name_hash;
use crate::core::tables::{ActorInfoTable, ActorRecord};

/// Profiles that mark an actor as a combatant or creature.
const COMBAT_PROFILES: [&str; 6] = ["Enemy", "GelEnemy", "SandWorm", "Prey", "Dragon", "Guardian"];

/// The one boss actor that is never treated as enemy-like, regardless of
/// its profile. Checked before the table lookup.
const ENEMY_LIKE_OVERRIDE: &str = "Enemy_GanonBeast";

/// Read-only lookup of static per-actor-type metadata.
#[derive(Clone, Copy)]
pub struct ActorCatalog<'a> {
    table: &'a ActorInfoTable,
}

impl<'a> ActorCatalog<'a> {
    pub fn new(table: &'a ActorInfoTable) -> Self {
        Self { table }
    }

    /// Record for an actor type name; `UnknownActor` when the hash is
    /// absent from the table.
    pub fn lookup(&self, name: &str) -> Result<&'a ActorRecord> {
        let hash = actor_name_hash(name);
        self.table
            .hashes
            .binary_search(&hash)
            .ok()
            .and_then(|idx| self.table.actors.get(idx))
            .ok_or_else(|| EnrichError::UnknownActor {
                name: name.to_string(),
                hash,
            })
    }

    /// Whether the actor counts as an enemy or NPC for spawn suppression.
    ///
    /// True when the profile is one of the combat/creature profiles or
    /// contains `"NPC"`. The lookup failure propagates; a missing actor is
    /// never treated as a plain `false`.
    pub fn is_enemy_or_npc_like(&self, name: &str) -> Result<bool> {
        if name == ENEMY_LIKE_OVERRIDE {
            return Ok(false);
        }
        let record = self.lookup(name)?;
        Ok(COMBAT_PROFILES.contains(&record.profile.as_str()) || record.profile.contains("NPC"))
    }
}
