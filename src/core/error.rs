//! Error types for the enrichment engine.
//!
//! All failures here are terminal for the running map pass: the pipeline is
//! a deterministic batch transform over pre-validated data, so a miss in a
//! static table or an unmatched classification rule indicates a data or
//! rule-table gap, not a transient condition. There is no retry path.

use thiserror::Error;

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichError>;

/// Error enum covering every failure mode of the enrichment pipeline.
#[derive(Error, Debug)]
pub enum EnrichError {
    /// An actor name hashed to a value absent from the actor info table.
    ///
    /// Every actor referenced by a placement object is expected to be known
    /// a priori, so this is a hard failure rather than a `false` answer.
    #[error("unknown actor '{name}' (crc32 {hash:#010x}): not in the actor info table")]
    UnknownActor {
        /// The actor name that failed to resolve
        name: String,
        /// Its CRC32 hash, for cross-checking against the table dump
        hash: u32,
    },

    /// A korok generation group matched none of the known archetype rules.
    ///
    /// Classification runs under a closed-world assumption over the known
    /// puzzle archetypes; silently defaulting would corrupt downstream
    /// aggregate counts, so this always aborts the run.
    #[error(
        "unmodeled korok pattern for group of {size} (hash id {hash_id}): {names:?}"
    )]
    UnmodeledKorokPattern {
        /// Sorted display names of the group members
        names: Vec<String>,
        /// Group size, the primary dispatch key of several rules
        size: usize,
        /// Hash id of the object that triggered classification
        hash_id: u32,
    },

    /// A placement object is structurally unusable for enrichment.
    #[error("malformed placement object {hash_id}: {reason}")]
    MalformedObject {
        /// Hash id of the offending object
        hash_id: u32,
        /// What was missing or inconsistent
        reason: String,
    },

    /// A per-archetype korok count deviated from the known census.
    #[error("korok census mismatch for '{archetype}': expected {expected}, counted {actual}")]
    CensusMismatch {
        /// Archetype display name
        archetype: &'static str,
        /// Count expected from the shipped game data
        expected: usize,
        /// Count actually observed
        actual: usize,
    },

    /// The korok grand total deviated from the known census.
    #[error("korok census total mismatch: expected {expected}, counted {actual}")]
    CensusTotal {
        /// Expected grand total
        expected: usize,
        /// Observed grand total
        actual: usize,
    },

    /// Reading a static side table from disk failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing a static side table failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_actor_display() {
        let err = EnrichError::UnknownActor {
            name: "Enemy_Missing".to_string(),
            hash: 0xdeadbeef,
        };
        let msg = err.to_string();
        assert!(msg.contains("Enemy_Missing"));
        assert!(msg.contains("0xdeadbeef"));
    }

    #[test]
    fn test_unmodeled_pattern_display() {
        let err = EnrichError::UnmodeledKorokPattern {
            names: vec!["Area".to_string(), "Korok".to_string()],
            size: 2,
            hash_id: 42,
        };
        let msg = err.to_string();
        assert!(msg.contains("group of 2"));
        assert!(msg.contains("Korok"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing table");
        let err: EnrichError = io_err.into();
        match err {
            EnrichError::Io(_) => (),
            _ => panic!("Expected Io variant"),
        }
    }
}
