use salvo::Depot;

use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};
use helpline_service::auth::capability::{TicketAction, check};
use helpline_service::auth::depot::{depot_keys, get_caller_from_depot};
use helpline_service::error::ServiceError;
use helpline_service::ticket::find_ticket_header;

/// Name of the path parameter holding the ticket handle.
pub const TICKET_ID_PARAM: &str = "id";

/// ## Summary
/// Loads the ticket named by the `{id}` path parameter and applies the
/// capability check for `action`. Every ticket-scoped route sits behind one
/// of these.
///
/// ## Side Effects
/// Inserts the ticket row into the depot under `depot_keys::SCOPED_TICKET`.
///
/// ## Errors
/// Responds 404 for an unknown or malformed handle and 403 when the caller
/// may not perform `action`. The two are never conflated.
pub struct TicketAccess {
    action: TicketAction,
}

impl TicketAccess {
    #[must_use]
    pub const fn new(action: TicketAction) -> Self {
        Self { action }
    }

    async fn authorize(&self, req: &salvo::Request, depot: &Depot) -> AppResult<helpline_db::model::ticket::Ticket> {
        let caller = get_caller_from_depot(depot)?;

        let raw_id = req.param::<String>(TICKET_ID_PARAM).unwrap_or_default();
        let ticket_id = raw_id
            .parse::<uuid::Uuid>()
            .map_err(|_e| ServiceError::NotFound(format!("ticket {raw_id}")))?;

        let provider = get_db_from_depot(depot)?;
        let mut conn = provider.get_connection().await?;
        let ticket = find_ticket_header(&mut conn, ticket_id).await?;

        check(&caller, ticket.owner_id, self.action).map_err(AppError::from)?;

        Ok(ticket)
    }
}

#[salvo::async_trait]
impl salvo::Handler for TicketAccess {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        action = %self.action,
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        match self.authorize(req, depot).await {
            Ok(ticket) => {
                tracing::trace!(ticket_id = %ticket.id, "Ticket access granted");
                depot.insert(depot_keys::SCOPED_TICKET, ticket);
            }
            Err(err) => {
                err.render_into(res);
                ctrl.skip_rest();
            }
        }
    }
}
