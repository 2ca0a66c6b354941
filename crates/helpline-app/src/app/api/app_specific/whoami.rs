use salvo::prelude::Json;
use salvo::{Depot, Router, handler};
use serde::Serialize;

use helpline_core::types::CallerRole;
use helpline_service::auth::depot::get_identity_from_depot;

use crate::error::AppResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WhoAmI {
    id: uuid::Uuid,
    name: String,
    email: String,
    role: CallerRole,
}

/// ## Summary
/// Returns the authenticated caller's identity as JSON.
/// The identity is retrieved from the depot set by the `AuthMiddleware`.
#[handler]
async fn whoami(depot: &Depot) -> AppResult<Json<WhoAmI>> {
    let identity = get_identity_from_depot(depot)?;

    Ok(Json(WhoAmI {
        id: identity.user.id,
        name: identity.user.name.clone(),
        email: identity.user.email.clone(),
        role: identity.role,
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("whoami").get(whoami)
}
