mod app_specific;
mod tickets;

use salvo::Router;

// Re-export route constants from core
pub use helpline_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX,
    TICKETS_ROUTE_COMPONENT, TICKETS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router.
///
/// Only the healthcheck is reachable without an identity; every other route
/// sits behind `AuthMiddleware`.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(tickets::routes()))
}
