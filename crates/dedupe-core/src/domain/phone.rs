pub const NORMALIZED_PHONE_LEN: usize = 10;

/// Reduces a raw phone value to its digits, dropping a leading `1` country
/// code from 11-digit numbers. The result is not validated; see
/// [`is_normalized_phone`].
pub fn normalize_phone(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == NORMALIZED_PHONE_LEN + 1 && digits.starts_with('1') {
        return digits[1..].to_string();
    }
    digits
}

pub fn is_normalized_phone(value: &str) -> bool {
    value.len() == NORMALIZED_PHONE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}
