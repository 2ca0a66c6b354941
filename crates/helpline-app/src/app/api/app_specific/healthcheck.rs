use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Response, Router, handler};
use serde_json::json;

use crate::db_handler::get_db_from_depot;

/// ## Summary
/// Reports liveness, and whether a database connection can be checked out.
/// Responds 503 when the database is unreachable.
#[handler]
async fn healthcheck(depot: &Depot, res: &mut Response) {
    let database_ok = match get_db_from_depot(depot) {
        Ok(provider) => provider.get_connection().await.is_ok(),
        Err(_e) => false,
    };

    if !database_ok {
        tracing::warn!("Healthcheck could not reach the database");
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
    }

    res.render(Json(json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "database": if database_ok { "ok" } else { "unavailable" },
    })));
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(healthcheck)
}
