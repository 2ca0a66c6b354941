// Service-level endpoints outside the ticket resource.

use salvo::Router;

use crate::app::api::APP_ROUTE_COMPONENT;
use crate::middleware::auth::AuthMiddleware;

mod healthcheck;
mod whoami;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(APP_ROUTE_COMPONENT)
        .push(healthcheck::routes())
        .push(Router::new().hoop(AuthMiddleware).push(whoami::routes()))
}
