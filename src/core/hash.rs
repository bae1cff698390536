//! CRC32 hashing of actor names.
//!
//! The actor info table is keyed by the unsigned 32-bit CRC of the actor
//! type name. The same polynomial is used by the table producer, so values
//! computed here must match the table's `Hashes` array exactly.

/// CRC32 of an actor type name, as used by the actor info table key space.
#[inline]
pub fn actor_name_hash(name: &str) -> u32 {
    crc32fast::hash(name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_check_value() {
        // Standard CRC-32 (IEEE) check value.
        assert_eq!(actor_name_hash("123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(actor_name_hash(""), 0);
    }

    #[test]
    fn test_distinct_names_distinct_hashes() {
        assert_ne!(
            actor_name_hash("Weapon_Sword_001"),
            actor_name_hash("Weapon_Sword_002")
        );
    }
}
