use salvo::prelude::Json;
use salvo::{Depot, handler};

use helpline_service::auth::get_ticket_from_depot;
use helpline_service::ticket::{TicketDetail, fetch_ticket};

use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// Returns a ticket with its owner and full thread.
#[handler]
#[tracing::instrument(skip_all)]
pub async fn get_ticket(depot: &mut Depot) -> AppResult<Json<TicketDetail>> {
    let ticket_id = get_ticket_from_depot(depot)?.id;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(fetch_ticket(&mut conn, ticket_id).await?))
}
