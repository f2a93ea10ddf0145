use sha2::{Digest, Sha256};

pub const PIN_LENGTH: usize = 4;

/// Doctor PINs are exactly four ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit())
}

/// Hex SHA-256 of `"{salt}:{pin}"`, the format stored in `doctors.json`.
pub fn hash_pin(salt: &str, pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{salt}:{pin}").as_bytes());
    format!("{:x}", hasher.finalize())
}

/// An empty stored hash never matches.
pub fn verify_pin(salt: &str, pin: &str, pin_hash: &str) -> bool {
    !pin_hash.is_empty() && hash_pin(salt, pin) == pin_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_hex_sha256() {
        let h = hash_pin("salt", "1234");
        assert_eq!(h.len(), 64);
        assert!(h.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_ne!(h, hash_pin("other", "1234"));
        assert!(verify_pin("salt", "1234", &h));
        assert!(!verify_pin("salt", "1235", &h));
        assert!(!verify_pin("salt", "1234", ""));
    }

    #[test]
    fn hash_matches_known_digest() {
        // sha256("a:b")
        assert_eq!(
            hash_pin("a", "b"),
            "6783a31eabf68ccc0660f935c0826282bdd2241f3a80a9f2d10d59aea9ebb5d8"
        );
    }

    #[test]
    fn pin_format() {
        assert!(is_valid_pin("0042"));
        assert!(!is_valid_pin("042"));
        assert!(!is_valid_pin("12a4"));
        assert!(!is_valid_pin("12345"));
    }
}
