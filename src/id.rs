//! Record identifier generation.
//!
//! Identifiers are random UUIDs assigned once at creation (or import) and
//! never reused. Two records created in the same clock tick still get
//! distinct ids.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use uuid::Uuid;

/// Unique key of a record within its collection.
pub type RecordId = Uuid;

/// Global counter for deterministic ID generation in tests.
static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Whether to use deterministic IDs (for testing).
static USE_DETERMINISTIC_IDS: AtomicBool = AtomicBool::new(false);

/// Minimum prefix length accepted by [`resolve_prefix`].
pub const MIN_PREFIX_LEN: usize = 4;

/// Enable deterministic ID generation for testing.
///
/// When enabled, IDs are built from a counter starting at 1.
pub fn enable_deterministic_ids() {
    USE_DETERMINISTIC_IDS.store(true, Ordering::SeqCst);
    TEST_COUNTER.store(0, Ordering::SeqCst);
}

/// Disable deterministic ID generation.
pub fn disable_deterministic_ids() {
    USE_DETERMINISTIC_IDS.store(false, Ordering::SeqCst);
}

/// Generate a fresh record id.
#[must_use]
pub fn generate_id() -> RecordId {
    if USE_DETERMINISTIC_IDS.load(Ordering::SeqCst) {
        let count = TEST_COUNTER.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(u128::from(count))
    } else {
        Uuid::new_v4()
    }
}

/// Short display form of an id (first 8 hex characters).
#[must_use]
pub fn short_id(id: &RecordId) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Resolve a user-typed id or id prefix against a set of ids.
///
/// Returns `None` when the prefix is shorter than [`MIN_PREFIX_LEN`], matches
/// nothing, or is ambiguous.
pub fn resolve_prefix<'a>(prefix: &str, ids: impl IntoIterator<Item = &'a RecordId>) -> Option<RecordId> {
    let needle: String =
        prefix.trim().chars().filter(|c| *c != '-').collect::<String>().to_ascii_lowercase();
    if needle.len() < MIN_PREFIX_LEN {
        return None;
    }

    let mut found = None;
    for id in ids {
        if id.simple().to_string().starts_with(&needle) {
            if found.is_some() {
                return None;
            }
            found = Some(*id);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashSet;

    #[test]
    #[serial]
    fn test_generated_ids_are_unique() {
        disable_deterministic_ids();
        let ids: HashSet<RecordId> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    #[serial]
    fn test_deterministic_ids_count_up() {
        enable_deterministic_ids();
        let first = generate_id();
        let second = generate_id();
        disable_deterministic_ids();

        // Other tests may draw from the counter concurrently.
        assert!(first.as_u128() < second.as_u128());
        assert!(second.as_u128() < 1_000_000);
    }

    #[test]
    fn test_short_id_is_eight_chars() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(short_id(&id), "67e55044");
    }

    #[test]
    fn test_resolve_prefix_unique_match() {
        let a = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let b = Uuid::parse_str("12345678-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(resolve_prefix("67e5", [&a, &b]), Some(a));
        assert_eq!(resolve_prefix("67E55044-10B1", [&a, &b]), Some(a));
    }

    #[test]
    fn test_resolve_prefix_full_id() {
        let a = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(resolve_prefix(&a.to_string(), [&a]), Some(a));
    }

    #[test]
    fn test_resolve_prefix_too_short_or_ambiguous() {
        let a = Uuid::parse_str("abcd0000-0000-0000-0000-000000000001").unwrap();
        let b = Uuid::parse_str("abcd0000-0000-0000-0000-000000000002").unwrap();
        assert_eq!(resolve_prefix("abc", [&a, &b]), None);
        assert_eq!(resolve_prefix("abcd", [&a, &b]), None);
        assert_eq!(resolve_prefix("ffff", [&a, &b]), None);
    }
}
