use salvo::prelude::Json;
use salvo::{Depot, Request, handler};
use serde::Deserialize;

use helpline_core::types::TicketStatus;
use helpline_service::auth::get_ticket_from_depot;
use helpline_service::ticket::{TicketStatusView, update_status as overwrite_status};

use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: String,
}

/// ## Summary
/// Returns only the status of a ticket.
#[handler]
#[tracing::instrument(skip_all)]
pub async fn get_status(depot: &mut Depot) -> AppResult<Json<TicketStatusView>> {
    let ticket = get_ticket_from_depot(depot)?;
    Ok(Json(TicketStatusView::from(ticket.clone())))
}

/// ## Summary
/// Overwrites the status of a ticket from a JSON body `{ "status": ... }`.
/// Administrators only; the capability check runs in `TicketAccess`.
///
/// ## Errors
/// Returns 400 for a missing or unknown status.
#[handler]
#[tracing::instrument(skip_all)]
pub async fn update_status(req: &mut Request, depot: &mut Depot) -> AppResult<Json<TicketStatusView>> {
    let ticket_id = get_ticket_from_depot(depot)?.id;

    let update = req
        .parse_json::<StatusUpdate>()
        .await
        .map_err(|e| AppError::BadRequest {
            field: "status",
            message: format!("expected a JSON body with a status: {e}"),
        })?;
    let status = update.status.parse::<TicketStatus>()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(overwrite_status(&mut conn, ticket_id, status).await?))
}
