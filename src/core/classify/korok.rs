//! Korok puzzle archetype classification.
//!
//! Every generation group containing the canonical "Korok" object encodes
//! exactly one of a closed set of puzzle archetypes. Classification works
//! over the lexicographically sorted multiset of member display names and
//! applies an ordered rule cascade; the first match wins, and exhausting
//! the cascade is a fatal [`EnrichError::UnmodeledKorokPattern`]. Later
//! rules assume earlier ones did not match, so rule order is part of the
//! contract and is pinned by the data tables below rather than spread
//! across a conditional chain.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::error::{EnrichError, Result};
use crate::core::models::PlacementObject;
use crate::core::naming::NameTable;

/// Pinwheel marker actor; dispatches purely on group size.
const PINWHEEL: &str = "FldObj_KorokPinwheel_A_01";

// ============================================================================
// KorokArchetype
// ============================================================================

/// The closed set of known korok puzzle archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KorokArchetype {
    MovingLights,
    StationaryLights,
    RockLift,
    RockLiftDoor,
    RockLiftBoulder,
    RockLiftRockPile,
    RockLiftSlab,
    RockLiftLeaves,
    RockPattern,
    CubePuzzle,
    GoalRingRace,
    FlowerTrail,
    FlowerOrder,
    PinwheelBalloons,
    PinwheelAcorns,
    Dive,
    AcornInAHole,
    HangingAcorn,
    RollABoulder,
    OfferingPlate,
    StationaryBalloon,
    CircleOfRocks,
    MatchingTrees,
    MeltIceBlock,
    BallAndChain,
    ShootTheCrest,
    JumpTheFences,
    LightTorch,
    BurnTheLeavesGoatee,
    TakeTheStick,
    ShootTheTargets,
    TakeAppleFromPalmTree,
    RemoveLuminousStone,
}

impl KorokArchetype {
    /// Display string, matching the archetype names in persisted data.
    pub fn as_str(&self) -> &'static str {
        use KorokArchetype::*;
        match self {
            MovingLights => "Moving Lights",
            StationaryLights => "Stationary Lights",
            RockLift => "Rock Lift",
            RockLiftDoor => "Rock Lift (Door)",
            RockLiftBoulder => "Rock Lift (Boulder)",
            RockLiftRockPile => "Rock Lift (Rock Pile)",
            RockLiftSlab => "Rock Lift (Slab)",
            RockLiftLeaves => "Rock Lift (Leaves)",
            RockPattern => "Rock Pattern",
            CubePuzzle => "Cube Puzzle",
            GoalRingRace => "Goal Ring (Race)",
            FlowerTrail => "Flower Trail",
            FlowerOrder => "Flower Order",
            PinwheelBalloons => "Pinwheel Balloons",
            PinwheelAcorns => "Pinwheel Acorns",
            Dive => "Dive",
            AcornInAHole => "Acorn in a Hole",
            HangingAcorn => "Hanging Acorn",
            RollABoulder => "Roll a Boulder",
            OfferingPlate => "Offering Plate",
            StationaryBalloon => "Stationary Balloon",
            CircleOfRocks => "Circle of Rocks",
            MatchingTrees => "Matching Trees",
            MeltIceBlock => "Melt Ice Block",
            BallAndChain => "Ball and Chain",
            ShootTheCrest => "Shoot the Crest",
            JumpTheFences => "Jump the Fences",
            LightTorch => "Light Torch",
            BurnTheLeavesGoatee => "Burn the Leaves (Goatee)",
            TakeTheStick => "Take the Stick",
            ShootTheTargets => "Shoot the Targets",
            TakeAppleFromPalmTree => "Take Apple from Palm Tree",
            RemoveLuminousStone => "Remove Luminous Stone",
        }
    }
}

impl fmt::Display for KorokArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for KorokArchetype {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// Rule tables
// ============================================================================

/// Per-name archetype table, consulted for each sorted member name once
/// the lift-rock, pinwheel, and single-object rules have passed.
///
/// Entries mix raw actor keys and localized display names deliberately:
/// the name table only maps a subset of actors, and these strings are
/// whatever `display_name_for` yields for the shipped data. The
/// `FidObj_TorchStandOff_A_01` spelling is the data's own typo.
const NAME_ARCHETYPES: &[(&str, KorokArchetype)] = &[
    ("Obj_Plant_KorokColor_A_01", KorokArchetype::FlowerOrder),
    ("Obj_Plant_Korok_A_01", KorokArchetype::FlowerTrail),
    ("FldObj_RuinStonePavement_A_06", KorokArchetype::OfferingPlate),
    ("Obj_KorokPlate_A_01", KorokArchetype::OfferingPlate),
    ("FldObj_KorokGoal_A_01", KorokArchetype::GoalRingRace),
    ("Obj_TreeCactusMini_A_01", KorokArchetype::MatchingTrees),
    ("Obj_TreeDorian_A_01", KorokArchetype::MatchingTrees),
    ("Obj_Plant_IvyBurn_A_01", KorokArchetype::BurnTheLeavesGoatee),
    ("FidObj_TorchStandOff_A_01", KorokArchetype::LightTorch),
    ("Tree Branch", KorokArchetype::TakeTheStick),
    ("Luminous Stone", KorokArchetype::RemoveLuminousStone),
    ("YabusameBow", KorokArchetype::ShootTheTargets),
    ("TwnObj_Village_FishingHouse_S_A_02", KorokArchetype::TakeAppleFromPalmTree),
    ("Obj_TreeApple_A_M_01", KorokArchetype::MatchingTrees),
    ("SignalFlowchart", KorokArchetype::JumpTheFences),
    ("Obj_BoxIron_A_M_01", KorokArchetype::RockPattern),
    ("BrokenSnowBall", KorokArchetype::RollABoulder),
    ("IceWall", KorokArchetype::MeltIceBlock),
    ("PointWindSetTag", KorokArchetype::RollABoulder),
];

/// How a signature rule matches a sorted name multiset.
#[derive(Debug)]
enum Matcher {
    /// Any member has this display name.
    Contains(&'static str),
    /// Exact group size and all listed names present.
    ContainsAll {
        size: usize,
        names: &'static [&'static str],
    },
    /// The sorted multiset equals this signature exactly.
    Exact(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, sorted_names: &[String]) -> bool {
        match self {
            Matcher::Contains(name) => sorted_names.iter().any(|n| n == name),
            Matcher::ContainsAll { size, names } => {
                sorted_names.len() == *size
                    && names.iter().all(|n| sorted_names.iter().any(|m| m == n))
            }
            Matcher::Exact(signature) => {
                sorted_names.len() == signature.len()
                    && sorted_names.iter().zip(signature.iter()).all(|(a, b)| a == b)
            }
        }
    }
}

struct SignatureRule {
    matcher: Matcher,
    archetype: KorokArchetype,
}

const fn rule(matcher: Matcher, archetype: KorokArchetype) -> SignatureRule {
    SignatureRule { matcher, archetype }
}

/// Ordered signature cascade, evaluated after the per-name table.
///
/// Order matters: the acorn-pot rules must precede the chain and target
/// rules that reuse the same base names, and the boulder-korok exact
/// signature must precede the plain push-rock membership rules.
static SIGNATURE_RULES: &[SignatureRule] = &[
    rule(
        Matcher::ContainsAll { size: 6, names: &["Obj_KorokPot_A_01"] },
        KorokArchetype::AcornInAHole,
    ),
    rule(Matcher::Contains("Obj_KorokPot_A_01"), KorokArchetype::HangingAcorn),
    // Must follow the acorn rules.
    rule(Matcher::Contains("FldObj_ChainEyeBolt_A_01"), KorokArchetype::BallAndChain),
    rule(Matcher::Contains("FldObj_KorokTarget_A_01"), KorokArchetype::StationaryBalloon),
    rule(
        Matcher::ContainsAll {
            size: 21,
            names: &["FldObj_KorokStoneLift_A_01", "FldObj_KorokStone_A_01"],
        },
        KorokArchetype::CubePuzzle,
    ),
    // Must precede the plain push-rock membership rules.
    rule(
        Matcher::Exact(&[
            "ActorObserverTag",
            "Area",
            "Area",
            "FldObj_PushRock_Korok",
            "FldObj_PushRock_Korok",
            "FldObj_PushRock_Korok",
            "Korok",
            "KorokAnswerResponce",
            "LinkTagAnd",
            "LinkTagAnd",
            "LinkTagNone",
            "LinkTagOr",
            "LinkTagOr",
            "SwitchTimeLag",
        ]),
        KorokArchetype::RollABoulder,
    ),
    rule(Matcher::Contains("FldObj_PushRock_A_M_01"), KorokArchetype::RollABoulder),
    rule(Matcher::Contains("FldObj_PushRock_Korok"), KorokArchetype::RollABoulder),
    rule(Matcher::Contains("Obj_KorokIronRock_A_01"), KorokArchetype::BallAndChain),
    rule(Matcher::Contains("FldObj_PushRockIron_A_M_01"), KorokArchetype::RollABoulder),
    // Canonical signatures for groups without a distinguishing actor.
    rule(
        Matcher::Exact(&["Area", "Korok", "LinkTagOr", "LinkTagOr"]),
        KorokArchetype::StationaryLights,
    ),
    rule(
        Matcher::Exact(&["Area", "Korok", "LinkTagAnd", "LinkTagOr"]),
        KorokArchetype::Dive,
    ),
    rule(
        Matcher::Exact(&[
            "ActorObserverTag",
            "ActorObserverTag",
            "ActorObserverTag",
            "Area",
            "Korok",
            "KorokAnswerResponce",
            "LinkTagAnd",
            "LinkTagAnd",
            "LinkTagOr",
            "LinkTagOr",
            "SwitchTimeLag",
        ]),
        KorokArchetype::CircleOfRocks,
    ),
    rule(
        Matcher::Exact(&[
            "ActorObserverByGroupTag",
            "Area",
            "Area",
            "Korok",
            "LinkTagAnd",
            "LinkTagAnd",
            "LinkTagNAnd",
            "LinkTagOr",
        ]),
        KorokArchetype::ShootTheCrest,
    ),
    rule(
        Matcher::Exact(&[
            "ActorObserverTag",
            "ActorObserverTag",
            "Area",
            "Area",
            "Korok",
            "KorokAnswerResponce",
            "KorokAnswerResponce",
            "LinkTagAnd",
            "LinkTagAnd",
            "LinkTagAnd",
            "LinkTagOr",
            "SwitchTimeLag",
        ]),
        KorokArchetype::BallAndChain,
    ),
    // The egg-in-water variant of the offering plate.
    rule(
        Matcher::Exact(&[
            "ActorObserverTag",
            "ActorObserverTag",
            "ActorObserverTag",
            "Area",
            "Area",
            "Area",
            "Korok",
            "LinkTagAnd",
            "LinkTagAnd",
            "LinkTagOr",
            "SwitchTimeLag",
        ]),
        KorokArchetype::OfferingPlate,
    ),
    rule(
        Matcher::Exact(&[
            "ActorObserverTag",
            "Area",
            "Area",
            "Korok",
            "KorokAnswerResponce",
            "LinkTagAnd",
            "LinkTagAnd",
            "LinkTagAnd",
            "LinkTagNone",
            "LinkTagOr",
            "SwitchTimeLag",
        ]),
        KorokArchetype::RollABoulder,
    ),
    // Shrine of Resurrection one-off.
    rule(
        Matcher::Exact(&["Korok", "LinkTagAnd", "LinkTagAnd", "LinkTagAnd", "LinkTagNAnd"]),
        KorokArchetype::StationaryLights,
    ),
];

// ============================================================================
// Classification
// ============================================================================

/// Lift-rock marker present among the display names, excluding the
/// korok-specific variant of the marker.
fn has_lift_rock(names: &[String]) -> bool {
    names
        .iter()
        .any(|n| n.contains("LiftRock") && !n.contains("Korok"))
}

/// Classify a korok generation group into its puzzle archetype.
///
/// `group` is the full member list; `trigger` is the member whose display
/// name resolved to "Korok" (used for error context only). Deterministic
/// for any permutation of the member list.
pub fn classify(
    group: &[&PlacementObject],
    trigger: &PlacementObject,
    name_table: &NameTable,
) -> Result<KorokArchetype> {
    let mut names: Vec<String> = group.iter().map(|o| name_table.display_name_for(o)).collect();
    names.sort_unstable();
    let len = group.len();

    if has_lift_rock(&names) {
        match len {
            7 => return Ok(KorokArchetype::RockLift),
            9 => return Ok(KorokArchetype::RockLiftRockPile),
            11 => {
                if names.iter().any(|n| n == "Treasure Chest") {
                    return Ok(KorokArchetype::RockLiftRockPile);
                }
                if names.iter().any(|n| n == "Obj_BoardIron_C_01") {
                    return Ok(KorokArchetype::RockLiftDoor);
                }
                if names.iter().any(|n| n == "FldObj_PushRock_A_M_01") {
                    return Ok(KorokArchetype::RockLiftBoulder);
                }
                return Ok(KorokArchetype::RockLiftSlab);
            }
            23 => return Ok(KorokArchetype::RockLiftLeaves),
            14 | 22 | 30 => return Ok(KorokArchetype::RockPattern),
            _ => {}
        }
    }
    if names.iter().any(|n| n == PINWHEEL) {
        match len {
            5 => return Ok(KorokArchetype::StationaryLights),
            15 | 23 | 31 => return Ok(KorokArchetype::PinwheelBalloons),
            27 | 46 | 64 => return Ok(KorokArchetype::PinwheelAcorns),
            _ => {}
        }
    }

    if len == 1 {
        return Ok(if group[0].data.links_to_rail.is_some() {
            KorokArchetype::MovingLights
        } else {
            KorokArchetype::StationaryLights
        });
    }

    for name in &names {
        if let Some((_, archetype)) = NAME_ARCHETYPES.iter().find(|(n, _)| n == name) {
            return Ok(*archetype);
        }
    }

    for rule in SIGNATURE_RULES {
        if rule.matcher.matches(&names) {
            return Ok(rule.archetype);
        }
    }

    Err(EnrichError::UnmodeledKorokPattern {
        names,
        size: len,
        hash_id: trigger.data.hash_id,
    })
}

// ============================================================================
// Census
// ============================================================================

/// Known per-archetype puzzle counts for the shipped game data.
pub const EXPECTED_CENSUS: &[(KorokArchetype, usize)] = &[
    (KorokArchetype::MovingLights, 39),
    (KorokArchetype::StationaryLights, 51),
    (KorokArchetype::RockLiftDoor, 8),
    (KorokArchetype::RockLiftBoulder, 6),
    (KorokArchetype::RockLiftRockPile, 41),
    (KorokArchetype::RockLiftSlab, 12),
    (KorokArchetype::RockLift, 174),
    (KorokArchetype::RockPattern, 73),
    (KorokArchetype::CubePuzzle, 66),
    (KorokArchetype::GoalRingRace, 51),
    (KorokArchetype::FlowerTrail, 46),
    (KorokArchetype::PinwheelBalloons, 44),
    (KorokArchetype::Dive, 35),
    (KorokArchetype::AcornInAHole, 29),
    (KorokArchetype::RollABoulder, 31),
    (KorokArchetype::OfferingPlate, 28),
    (KorokArchetype::StationaryBalloon, 26),
    (KorokArchetype::CircleOfRocks, 20),
    (KorokArchetype::MatchingTrees, 20),
    (KorokArchetype::RockLiftLeaves, 19),
    (KorokArchetype::MeltIceBlock, 18),
    (KorokArchetype::BallAndChain, 16),
    (KorokArchetype::HangingAcorn, 14),
    (KorokArchetype::FlowerOrder, 11),
    (KorokArchetype::PinwheelAcorns, 10),
    (KorokArchetype::ShootTheCrest, 4),
    (KorokArchetype::JumpTheFences, 2),
    (KorokArchetype::LightTorch, 1),
    (KorokArchetype::BurnTheLeavesGoatee, 1),
    (KorokArchetype::TakeTheStick, 1),
    (KorokArchetype::ShootTheTargets, 1),
    (KorokArchetype::TakeAppleFromPalmTree, 1),
    (KorokArchetype::RemoveLuminousStone, 1),
];

/// Total puzzle count across all archetypes.
pub const EXPECTED_TOTAL: usize = 900;

/// Validate an observed per-archetype tally against the known census.
///
/// Intended for full-dataset runs; any deviation means a classification
/// rule regressed or the input data changed.
pub fn verify_census(counts: &HashMap<KorokArchetype, usize>) -> Result<()> {
    let mut total = 0;
    for (archetype, expected) in EXPECTED_CENSUS {
        let actual = counts.get(archetype).copied().unwrap_or(0);
        if actual != *expected {
            return Err(EnrichError::CensusMismatch {
                archetype: archetype.as_str(),
                expected: *expected,
                actual,
            });
        }
        total += actual;
    }
    if total != EXPECTED_TOTAL {
        return Err(EnrichError::CensusTotal {
            expected: EXPECTED_TOTAL,
            actual: total,
        });
    }
    Ok(())
}
