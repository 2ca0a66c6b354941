use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, handler};

use helpline_service::auth::{get_caller_from_depot, get_ticket_from_depot};
use helpline_service::ticket::validation::validate_reply;
use helpline_service::ticket::{MessageView, ReplyCoordinator, ReplyInput};

use super::{form_text, read_attachment};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// Appends a reply from `message` and an optional `attachment` file. The
/// sender type follows the caller's role.
///
/// ## Side Effects
/// - Stores the attachment, if any
/// - Inserts the message and refreshes the ticket's `updatedAt`
/// - Returns 201 Created with the message
///
/// ## Errors
/// Returns 400 for a blank message and 409 when the ticket no longer
/// accepts replies.
#[handler]
#[tracing::instrument(skip_all)]
pub async fn reply(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<MessageView>> {
    let caller = get_caller_from_depot(depot)?;
    let ticket_id = get_ticket_from_depot(depot)?.id;
    let config = get_config_from_depot(depot)?;

    let message = form_text(req, "message").await;
    validate_reply(&message)?;

    let attachment = read_attachment(req, depot).await?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let created = ReplyCoordinator::new(config.tickets.resolved_reply_policy)
        .reply(
            &mut conn,
            ReplyInput {
                ticket_id,
                sender_type: caller.sender_type(),
                sender_id: Some(caller.user_id),
                message,
                attachment,
            },
        )
        .await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}
