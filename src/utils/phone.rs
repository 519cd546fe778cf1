//! Phone number normalization.
//!
//! Phones are stored and compared as bare digit strings (country code
//! included, no `+`, spaces or punctuation), matching what the gateway
//! expects in its `phone` fields. Group ids keep their `@g.us` suffix and
//! are compared verbatim.

/// Strips everything but digits from a phone number.
///
/// Returns the input unchanged when it looks like a group id (contains
/// `@`), since those are gateway identifiers, not phone numbers.
pub fn normalize_phone(raw: &str) -> String {
    if raw.contains('@') {
        return raw.trim().to_string();
    }
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// A plausible normalized phone: digits only, 8 to 15 of them (E.164
/// upper bound).
pub fn is_valid_phone(normalized: &str) -> bool {
    let len = normalized.chars().count();
    (8..=15).contains(&len) && normalized.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_spaces() {
        assert_eq!(normalize_phone("+55 (11) 99999-0001"), "5511999990001");
        assert_eq!(normalize_phone("5511999990001"), "5511999990001");
    }

    #[test]
    fn group_ids_pass_through() {
        assert_eq!(
            normalize_phone(" 120363025463428000@g.us "),
            "120363025463428000@g.us"
        );
    }

    #[test]
    fn validity_bounds() {
        assert!(is_valid_phone("5511999990001"));
        assert!(!is_valid_phone("1234567"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("55119999x0001"));
        assert!(!is_valid_phone(""));
    }
}
