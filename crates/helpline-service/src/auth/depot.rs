//! Depot helpers for extracting the caller and the scoped ticket from Salvo requests.

use helpline_db::model::ticket::Ticket;

use super::authenticate::Identity;
use super::capability::Caller;
use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const AUTHENTICATED_IDENTITY: &str = "__authenticated_identity";
    pub const SCOPED_TICKET: &str = "__scoped_ticket";
}

/// Get the authenticated identity from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if no identity was stored by the auth middleware.
pub fn get_identity_from_depot(depot: &salvo::Depot) -> ServiceResult<&Identity> {
    depot
        .get::<Identity>(depot_keys::AUTHENTICATED_IDENTITY)
        .map_err(|_e| ServiceError::NotAuthenticated)
}

/// Get the authenticated caller from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if no identity was stored by the auth middleware.
pub fn get_caller_from_depot(depot: &salvo::Depot) -> ServiceResult<Caller> {
    get_identity_from_depot(depot).map(Identity::caller)
}

/// Get the ticket loaded and access-checked by the ticket middleware.
///
/// ## Errors
///
/// Returns `InvariantViolation` if the route is not behind the ticket middleware.
pub fn get_ticket_from_depot(depot: &salvo::Depot) -> ServiceResult<&Ticket> {
    depot
        .get::<Ticket>(depot_keys::SCOPED_TICKET)
        .map_err(|_e| ServiceError::InvariantViolation("ticket not found in depot"))
}
