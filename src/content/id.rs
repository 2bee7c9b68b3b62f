//! Stable numeric ids derived from content file names
//!
//! The hash is `acc * 31 + unit` over the UTF-16 code units of the name,
//! wrapping as a 32-bit signed integer at every step. Ids already handed
//! out by the website depend on this exact arithmetic, so it must not be
//! swapped for a wider or different hash. It is not collision free.

/// Derive the id for a content file from its base name, extension already removed
pub fn generate_id(name: &str) -> u32 {
    let hash = name.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit))
    });

    hash.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_values() {
        assert_eq!(generate_id("2025-07-31-another-test"), 79542449);
        assert_eq!(generate_id("hello"), 99162322);
        assert_eq!(generate_id("a"), 97);
        assert_eq!(generate_id(""), 0);
    }

    #[test]
    fn test_negative_accumulator_is_made_positive() {
        // accumulator ends at -290618879
        assert_eq!(generate_id("faith-and-works"), 290618879);
        assert_eq!(generate_id("2024-01-01-new-year"), 868783817);
    }

    #[test]
    fn test_non_ascii_names_hash_utf16_units() {
        assert_eq!(generate_id("مرحبا"), 1531039712);
    }

    #[test]
    fn test_name_is_hashed_as_given() {
        assert_eq!(generate_id("notes.md"), 1582000100);
        assert_eq!(generate_id("notes"), 105008833);
    }

    #[test]
    fn test_deterministic() {
        let first = generate_id("the-gospel-of-john");
        let second = generate_id("the-gospel-of-john");
        assert_eq!(first, second);
        assert_eq!(first, 1444783100);
        assert_ne!(generate_id("good-1"), generate_id("good-2"));
    }
}
