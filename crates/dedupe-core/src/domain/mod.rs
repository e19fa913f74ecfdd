pub mod address;
pub mod contact;
pub mod ids;
pub mod phone;

pub use address::normalize_address;
pub use contact::{ContactFields, PhoneSource, PropertyBag, ADDRESS_PROPERTIES};
pub use ids::ContactId;
pub use phone::{is_normalized_phone, normalize_phone, NORMALIZED_PHONE_LEN};
