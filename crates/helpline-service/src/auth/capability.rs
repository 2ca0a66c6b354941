//! Ticket capability check.
//!
//! Every ticket-scoped operation asks one question: may this caller perform
//! this action on a ticket owned by that user? Owners and administrators
//! may read and reply; only administrators may change status.

use std::fmt;

use helpline_core::types::{CallerRole, SenderType};

use crate::error::{ServiceError, ServiceResult};

/// Verified caller identity as seen by the ticket operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: uuid::Uuid,
    pub role: CallerRole,
}

impl Caller {
    #[must_use]
    pub const fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }

    /// Owner restriction for listings: `None` lifts it for administrators.
    #[must_use]
    pub const fn scope_owner(&self) -> Option<uuid::Uuid> {
        if self.is_administrator() {
            None
        } else {
            Some(self.user_id)
        }
    }

    #[must_use]
    pub const fn sender_type(&self) -> SenderType {
        self.role.sender_type()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketAction {
    Read,
    Reply,
    ChangeStatus,
}

impl TicketAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Reply => "reply",
            Self::ChangeStatus => "change status",
        }
    }
}

impl fmt::Display for TicketAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// Returns whether `caller` may perform `action` on a ticket owned by `owner_id`.
#[must_use]
pub fn is_permitted(caller: &Caller, owner_id: uuid::Uuid, action: TicketAction) -> bool {
    if caller.is_administrator() {
        return true;
    }

    match action {
        TicketAction::Read | TicketAction::Reply => caller.user_id == owner_id,
        TicketAction::ChangeStatus => false,
    }
}

/// ## Summary
/// Like [`is_permitted`], as a `Result`.
///
/// ## Errors
/// Returns `AuthorizationError` if the action is not permitted.
pub fn check(caller: &Caller, owner_id: uuid::Uuid, action: TicketAction) -> ServiceResult<()> {
    if is_permitted(caller, owner_id, action) {
        Ok(())
    } else {
        tracing::debug!(user_id = %caller.user_id, %owner_id, %action, "Ticket access denied");
        Err(ServiceError::AuthorizationError(format!(
            "Access denied: {action} on ticket"
        )))
    }
}
