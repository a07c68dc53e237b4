//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Bare national/international digits, no separators
static DIGITS_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10,15}$").unwrap());

// International phone number regex (E.164 format)
static E164_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is 10 to 15 bare digits
pub fn is_valid_digits_phone(phone: &str) -> bool {
    DIGITS_PHONE_REGEX.is_match(phone)
}

/// Check if a phone number is in E.164 format
pub fn is_valid_e164_phone(phone: &str) -> bool {
    E164_PHONE_REGEX.is_match(phone)
}

/// Convert a phone number to E.164, prefixing bare digits with `country_code`
///
/// Returns `None` when the result is not valid E.164.
pub fn to_e164(phone: &str, country_code: &str) -> Option<String> {
    let normalized = normalize_phone_number(phone);
    let candidate = if normalized.starts_with('+') {
        normalized
    } else {
        let code = country_code.trim_start_matches('+');
        format!("+{}{}", code, normalized)
    };

    is_valid_e164_phone(&candidate).then_some(candidate)
}

/// Mask a phone number for logs (e.g., `987****3210`)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
