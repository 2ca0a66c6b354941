use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, handler};

use helpline_service::auth::get_caller_from_depot;
use helpline_service::ticket::validation::validate_new_ticket;
use helpline_service::ticket::{NewTicketInput, TicketDetail, create_ticket as create};

use super::{form_text, read_attachment};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// Files a ticket for the caller from `subject`, `description` and an
/// optional `attachment` file.
///
/// ## Side Effects
/// - Stores the attachment, if any
/// - Creates the ticket and its first message
/// - Returns 201 Created with the ticket, its thread and owner
///
/// ## Errors
/// Returns 400 naming the invalid field, 500 for storage failures.
#[handler]
#[tracing::instrument(skip_all)]
pub async fn create_ticket(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<TicketDetail>> {
    let caller = get_caller_from_depot(depot)?;

    let subject = form_text(req, "subject").await;
    let description = form_text(req, "description").await;
    // Reject before the upload is stored.
    validate_new_ticket(&subject, &description)?;

    let attachment = read_attachment(req, depot).await?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let detail = create(
        &mut conn,
        NewTicketInput {
            owner_id: caller.user_id,
            subject,
            description,
            attachment,
        },
    )
    .await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(detail))
}
