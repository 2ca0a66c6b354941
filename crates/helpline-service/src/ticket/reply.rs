//! Reply threading.
//!
//! A reply inserts a message and refreshes the ticket's `updated_at` in the
//! same transaction, under a row lock on the ticket, so readers never see
//! one without the other.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;

use helpline_core::config::ResolvedReplyPolicy;
use helpline_core::types::{Attachment, SenderType, TicketStatus};
use helpline_db::db::connection::DbConnection;
use helpline_db::db::query::{message, ticket};
use helpline_db::model::ticket::message::NewTicketMessage;

use super::validation::validate_reply;
use super::view::MessageView;
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct ReplyInput {
    pub ticket_id: uuid::Uuid,
    /// Derived from the caller's role, never from request content.
    pub sender_type: SenderType,
    pub sender_id: Option<uuid::Uuid>,
    pub message: String,
    pub attachment: Attachment,
}

/// Timestamp for a message appended after `previous`: the current time,
/// bumped by one microsecond when the clock has not moved past `previous`.
#[must_use]
pub fn next_activity_at(now: DateTime<Utc>, previous: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(6).max(previous + TimeDelta::microseconds(1))
}

/// Appends messages to ticket threads.
#[derive(Debug, Clone, Copy)]
pub struct ReplyCoordinator {
    policy: ResolvedReplyPolicy,
}

impl ReplyCoordinator {
    #[must_use]
    pub const fn new(policy: ResolvedReplyPolicy) -> Self {
        Self { policy }
    }

    fn admits(&self, status: TicketStatus) -> bool {
        !status.is_terminal() || self.policy == ResolvedReplyPolicy::Accept
    }

    /// ## Summary
    /// Appends a reply and sets the ticket's `updated_at` to the reply's
    /// `created_at`. The ticket status is never changed.
    ///
    /// ## Side Effects
    /// - Locks the ticket row until commit
    /// - Inserts one message and updates one ticket
    ///
    /// ## Errors
    /// Returns a validation error for a blank message, `NotFound` for an
    /// unknown ticket, `Conflict` when the ticket is resolved or closed and
    /// the policy rejects such replies, or a database error. Nothing is
    /// persisted on failure.
    #[tracing::instrument(skip(self, conn, input), fields(ticket_id = %input.ticket_id, sender_type = %input.sender_type))]
    pub async fn reply(
        &self,
        conn: &mut DbConnection<'_>,
        input: ReplyInput,
    ) -> ServiceResult<MessageView> {
        validate_reply(&input.message)?;
        let body = input.message;
        let attachment_url: Option<String> = input.attachment.into();
        let ticket_id = input.ticket_id;
        let sender_type = input.sender_type;
        let sender_id = input.sender_id;
        let coordinator = *self;

        let created = conn
            .transaction::<_, ServiceError, _>(move |tx| {
                async move {
                    let locked = ticket::find_for_update(tx, ticket_id)
                        .await?
                        .ok_or_else(|| ServiceError::NotFound(format!("ticket {ticket_id}")))?;

                    let status = TicketStatus::from(locked.status);
                    if !coordinator.admits(status) {
                        return Err(ServiceError::Conflict(format!(
                            "ticket {} is {status} and does not accept replies",
                            locked.ticket_ref
                        )));
                    }

                    let created_at = next_activity_at(Utc::now(), locked.updated_at);

                    let new_message = NewTicketMessage {
                        id: uuid::Uuid::now_v7(),
                        ticket_id,
                        sender_type: sender_type.into(),
                        sender_id,
                        message: &body,
                        attachment_url: attachment_url.as_deref(),
                        created_at,
                    };
                    let created = message::insert(tx, &new_message).await?;

                    let touched = ticket::set_updated_at(tx, ticket_id, created_at).await?;
                    if touched != 1 {
                        return Err(ServiceError::InvariantViolation(
                            "locked ticket vanished before its recency update",
                        ));
                    }

                    Ok(created)
                }
                .scope_boxed()
            })
            .await?;

        tracing::info!(message_id = %created.id, "Reply appended");

        Ok(MessageView::from(created))
    }
}
