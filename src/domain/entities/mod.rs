pub mod auth;
pub mod comment;
pub mod inspection;
pub mod maintenance_record;
pub mod page;
pub mod thermal_image;
pub mod timestamp;
pub mod transformer;

use std::borrow::Cow;

use validator::ValidationError;

// ───── Validation Helpers ───────────────────────────────────────────

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("blank", "This field is required"));
    }
    Ok(())
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
