//! Input checks for ticket creation and replies. Lengths count characters
//! after trimming surrounding whitespace; the input itself is stored as
//! supplied.

use helpline_core::constants::{DESCRIPTION_MIN_CHARS, SUBJECT_MIN_CHARS};

use crate::error::{ServiceError, ServiceResult};

fn require_min_chars(field: &'static str, value: &str, min_chars: usize) -> ServiceResult<()> {
    if value.trim().chars().count() < min_chars {
        return Err(ServiceError::validation(
            field,
            format!("{field} must be at least {min_chars} characters"),
        ));
    }
    Ok(())
}

/// ## Summary
/// Validates the subject and description of a new ticket.
///
/// ## Errors
/// Returns a validation error naming `subject` or `description`.
pub fn validate_new_ticket(subject: &str, description: &str) -> ServiceResult<()> {
    require_min_chars("subject", subject, SUBJECT_MIN_CHARS)?;
    require_min_chars("description", description, DESCRIPTION_MIN_CHARS)
}

/// ## Summary
/// Validates a reply body.
///
/// ## Errors
/// Returns a validation error naming `message` when the body is blank.
pub fn validate_reply(message: &str) -> ServiceResult<()> {
    require_min_chars("message", message, 1)
}
