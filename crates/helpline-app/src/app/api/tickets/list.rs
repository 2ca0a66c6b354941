use salvo::prelude::Json;
use salvo::{Depot, Request, handler};

use helpline_service::auth::get_caller_from_depot;
use helpline_service::ticket::{ListQuery, TicketPage, list_tickets as list};

use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// Lists the caller's tickets, or every ticket for administrators.
///
/// Query parameters: `page` (default 1), `limit` (default 10, clamped to
/// 1..=50) and `status` (a status name or `All`).
///
/// ## Errors
/// Returns 400 naming a malformed parameter, 500 for storage failures.
#[handler]
#[tracing::instrument(skip_all)]
pub async fn list_tickets(req: &mut Request, depot: &mut Depot) -> AppResult<Json<TicketPage>> {
    let caller = get_caller_from_depot(depot)?;

    let page = req.query::<String>("page");
    let limit = req.query::<String>("limit");
    let status = req.query::<String>("status");
    let query = ListQuery::parse(page.as_deref(), limit.as_deref(), status.as_deref())?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(list(&mut conn, &caller, &query).await?))
}
