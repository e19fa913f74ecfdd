use crate::domain::{is_normalized_phone, normalize_phone};

/// Value written to the normalized phone property: the first of `phone` or
/// `mobilephone` that normalizes to ten digits, otherwise whichever
/// normalized value is non-empty, otherwise an empty string.
pub fn select_normalized_phone(phone: Option<&str>, mobilephone: Option<&str>) -> String {
    let phone = normalize_phone(phone.unwrap_or(""));
    let mobile = normalize_phone(mobilephone.unwrap_or(""));

    if is_normalized_phone(&phone) {
        phone
    } else if is_normalized_phone(&mobile) {
        mobile
    } else if !phone.is_empty() {
        phone
    } else {
        mobile
    }
}
