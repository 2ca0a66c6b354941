//! Ticket store: the only writer of tickets and their first message.
//!
//! Replies go through [`crate::ticket::reply::ReplyCoordinator`]; listings
//! through [`crate::ticket::query`].

use chrono::{DateTime, Local, SubsecRound, Utc};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection};

use helpline_core::types::{Attachment, TicketStatus};
use helpline_db::db::connection::DbConnection;
use helpline_db::db::enums;
use helpline_db::db::query::{message, ticket, user};
use helpline_db::model::ticket::message::NewTicketMessage;
use helpline_db::model::ticket::{NewTicket, Ticket};

use super::priority::classify_priority;
use super::ticket_ref::allocate_ticket_ref;
use super::validation::validate_new_ticket;
use super::view::{OwnerView, TicketDetail, TicketStatusView};
use crate::error::{ServiceError, ServiceResult};

/// Input for ticket creation. The owner comes from the verified caller.
#[derive(Debug, Clone)]
pub struct NewTicketInput {
    pub owner_id: uuid::Uuid,
    pub subject: String,
    pub description: String,
    pub attachment: Attachment,
}

fn ticket_not_found(id: uuid::Uuid) -> ServiceError {
    ServiceError::NotFound(format!("ticket {id}"))
}

async fn load_owner(conn: &mut AsyncPgConnection, owner_id: uuid::Uuid) -> ServiceResult<OwnerView> {
    user::owner_profile(conn, owner_id)
        .await?
        .map(OwnerView::from)
        .ok_or(ServiceError::InvariantViolation("ticket owner missing from user directory"))
}

/// ## Summary
/// Creates a ticket and its first message at the current local time.
///
/// ## Errors
/// See [`create_ticket_at`].
pub async fn create_ticket(
    conn: &mut DbConnection<'_>,
    input: NewTicketInput,
) -> ServiceResult<TicketDetail> {
    create_ticket_at(conn, input, Local::now()).await
}

/// ## Summary
/// Creates a ticket as if filed at `now`.
///
/// The identifier is minted for `now`'s local date and the priority is
/// scored once from subject and description. The ticket starts `OPEN`;
/// its first message is the description, authored by the owner, carrying
/// the attachment.
///
/// ## Side Effects
/// - Advances the day's ticket counter
/// - Inserts the ticket and its first message in one transaction
///
/// ## Errors
/// Returns a validation error for a short subject or description, or a
/// database error. Nothing is persisted on failure.
#[tracing::instrument(skip(conn, input), fields(owner_id = %input.owner_id))]
pub async fn create_ticket_at(
    conn: &mut DbConnection<'_>,
    input: NewTicketInput,
    now: DateTime<Local>,
) -> ServiceResult<TicketDetail> {
    validate_new_ticket(&input.subject, &input.description)?;
    let NewTicketInput {
        owner_id,
        subject,
        description,
        attachment,
    } = input;
    let priority = classify_priority(&subject, &description);
    let attachment_url: Option<String> = attachment.into();
    let created_at = now.with_timezone(&Utc).trunc_subsecs(6);

    let detail = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let ticket_ref = allocate_ticket_ref(tx, now).await?;

                let new_ticket = NewTicket {
                    id: uuid::Uuid::now_v7(),
                    ticket_ref: &ticket_ref,
                    owner_id,
                    subject: &subject,
                    description: &description,
                    status: enums::TicketStatus::Open,
                    priority: priority.into(),
                    created_at,
                    updated_at: created_at,
                };
                let created = ticket::insert(tx, &new_ticket).await?;

                let first_message = NewTicketMessage {
                    id: uuid::Uuid::now_v7(),
                    ticket_id: created.id,
                    sender_type: enums::SenderType::User,
                    sender_id: Some(owner_id),
                    message: &description,
                    attachment_url: attachment_url.as_deref(),
                    created_at,
                };
                let first_message = message::insert(tx, &first_message).await?;

                let owner = load_owner(tx, owner_id).await?;

                Ok(TicketDetail::new(created, owner, vec![first_message]))
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(
        ticket_id = %detail.id,
        ticket_ref = %detail.ticket_id,
        priority = %detail.priority,
        "Ticket created"
    );

    Ok(detail)
}

/// ## Summary
/// Loads a ticket with its owner and its thread in replay order.
///
/// Performs no ownership check; callers go through the capability check first.
/// The row and the thread are read in one read-only repeatable-read
/// transaction, so a reply committed concurrently is seen together with its
/// `updated_at` or not at all.
///
/// ## Errors
/// Returns `NotFound` for an unknown handle, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn fetch_ticket(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<TicketDetail> {
    conn.build_transaction()
        .read_only()
        .repeatable_read()
        .run(move |tx| load_ticket_detail(tx, id).scope_boxed())
        .await
}

/// ## Summary
/// Reads a ticket, its owner and its thread on `conn`.
///
/// Consistent only inside a snapshot transaction; see [`fetch_ticket`].
///
/// ## Errors
/// Returns `NotFound` for an unknown handle, or a database error.
pub async fn load_ticket_detail(
    conn: &mut AsyncPgConnection,
    id: uuid::Uuid,
) -> ServiceResult<TicketDetail> {
    let found = ticket::find(conn, id).await?.ok_or_else(|| ticket_not_found(id))?;
    let messages = message::load_thread(conn, id).await?;
    let owner = load_owner(conn, found.owner_id).await?;

    Ok(TicketDetail::new(found, owner, messages))
}

/// ## Summary
/// Loads only the ticket row.
///
/// ## Errors
/// Returns `NotFound` for an unknown handle, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn find_ticket_header(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<Ticket> {
    ticket::find(conn, id).await?.ok_or_else(|| ticket_not_found(id))
}

/// ## Summary
/// Returns the status of a ticket.
///
/// ## Errors
/// Returns `NotFound` for an unknown handle, or a database error.
pub async fn fetch_status(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> ServiceResult<TicketStatusView> {
    find_ticket_header(conn, id).await.map(TicketStatusView::from)
}

/// ## Summary
/// Overwrites the status of a ticket. Any status may follow any other and
/// `updated_at` is left alone.
///
/// ## Errors
/// Returns `NotFound` for an unknown handle, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn update_status(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    status: TicketStatus,
) -> ServiceResult<TicketStatusView> {
    let updated = ticket::set_status(conn, id, status.into())
        .await?
        .ok_or_else(|| ticket_not_found(id))?;

    tracing::info!(ticket_id = %id, %status, "Ticket status updated");

    Ok(TicketStatusView::from(updated))
}
