//! Ticket resource handlers.
//!
//! Routes under `/{id}` run behind `TicketAccess`, which loads the ticket
//! and applies the capability check for the route's action.

use salvo::{Depot, Request, Router};

use helpline_core::types::Attachment;
use helpline_service::attachment::AttachmentStore as _;
use helpline_service::auth::TicketAction;
use helpline_service::error::ServiceError;

use crate::app::api::TICKETS_ROUTE_COMPONENT;
use crate::attachment_handler::get_attachment_store_from_depot;
use crate::error::AppResult;
use crate::middleware::auth::AuthMiddleware;
use crate::middleware::ticket_access::TicketAccess;

mod create;
mod get;
mod list;
mod reply;
mod status;

/// Multipart field carrying an optional uploaded file.
const ATTACHMENT_FIELD: &str = "attachment";

/// ## Summary
/// Reads a text field from a urlencoded or multipart body. Missing fields
/// read as empty so validation can name them.
async fn form_text(req: &mut Request, field: &str) -> String {
    req.form::<String>(field).await.unwrap_or_default()
}

/// ## Summary
/// Hands the uploaded `attachment` file, if any, to the attachment store.
///
/// ## Errors
/// Returns an error if the upload cannot be read or the store rejects it.
async fn read_attachment(req: &mut Request, depot: &Depot) -> AppResult<Attachment> {
    let Some(file) = req.file(ATTACHMENT_FIELD).await else {
        return Ok(Attachment::None);
    };
    let file_name = file.name().map(ToOwned::to_owned);
    let path = file.path().clone();

    let bytes = tokio::fs::read(&path).await.map_err(ServiceError::from)?;
    let store = get_attachment_store_from_depot(depot)?;

    Ok(store.store(file_name.as_deref(), bytes).await?)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(TICKETS_ROUTE_COMPONENT)
        .hoop(AuthMiddleware)
        .get(list::list_tickets)
        .post(create::create_ticket)
        .push(
            Router::with_path("{id}")
                .push(
                    Router::new()
                        .hoop(TicketAccess::new(TicketAction::Read))
                        .get(get::get_ticket),
                )
                .push(
                    Router::with_path("status")
                        .push(
                            Router::new()
                                .hoop(TicketAccess::new(TicketAction::Read))
                                .get(status::get_status),
                        )
                        .push(
                            Router::new()
                                .hoop(TicketAccess::new(TicketAction::ChangeStatus))
                                .patch(status::update_status),
                        ),
                )
                .push(
                    Router::with_path("reply")
                        .hoop(TicketAccess::new(TicketAction::Reply))
                        .post(reply::reply),
                ),
        )
}
