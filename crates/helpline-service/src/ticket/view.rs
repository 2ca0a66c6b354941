//! Response shapes for the ticket read model.
//!
//! Single fetches carry the full thread; listings carry summaries without
//! message bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use helpline_core::types::{SenderType, TicketPriority, TicketStatus};
use helpline_db::model::ticket::Ticket;
use helpline_db::model::ticket::message::TicketMessage;
use helpline_db::model::user::OwnerProfile;

/// Public projection of the ticket owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerView {
    pub name: String,
    pub email: String,
}

impl From<OwnerProfile> for OwnerView {
    fn from(profile: OwnerProfile) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: uuid::Uuid,
    /// Opaque handle of the owning ticket.
    pub ticket_id: uuid::Uuid,
    pub sender_type: SenderType,
    pub sender_id: Option<uuid::Uuid>,
    pub message: String,
    pub attachment_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TicketMessage> for MessageView {
    fn from(row: TicketMessage) -> Self {
        Self {
            id: row.id,
            ticket_id: row.ticket_id,
            sender_type: row.sender_type.into(),
            sender_id: row.sender_id,
            message: row.message,
            attachment_url: row.attachment_url,
            created_at: row.created_at,
        }
    }
}

/// A ticket with its owner and full thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
    pub id: uuid::Uuid,
    /// Human-readable `TCK-YYYYMMDD-NNNN` identifier.
    pub ticket_id: String,
    pub owner_id: uuid::Uuid,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: OwnerView,
    pub messages: Vec<MessageView>,
}

impl TicketDetail {
    #[must_use]
    pub fn new(ticket: Ticket, owner: OwnerView, messages: Vec<TicketMessage>) -> Self {
        Self {
            id: ticket.id,
            ticket_id: ticket.ticket_ref,
            owner_id: ticket.owner_id,
            subject: ticket.subject,
            description: ticket.description,
            status: ticket.status.into(),
            priority: ticket.priority.into(),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            owner,
            messages: messages.into_iter().map(MessageView::from).collect(),
        }
    }
}

/// Listing entry. No bodies, only the size of the thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
    pub id: uuid::Uuid,
    pub ticket_id: String,
    pub subject: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: i64,
}

impl TicketSummary {
    #[must_use]
    pub fn new(ticket: Ticket, message_count: i64) -> Self {
        Self {
            id: ticket.id,
            ticket_id: ticket.ticket_ref,
            subject: ticket.subject,
            status: ticket.status.into(),
            priority: ticket.priority.into(),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            message_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// `total_pages` is `ceil(total / limit)`, zero when there is nothing to show.
    #[must_use]
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(u64::from(limit.max(1))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPage {
    pub tickets: Vec<TicketSummary>,
    pub pagination: Pagination,
}

/// Status-only view of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStatusView {
    pub id: uuid::Uuid,
    pub ticket_id: String,
    pub status: TicketStatus,
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketStatusView {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            ticket_id: ticket.ticket_ref,
            status: ticket.status.into(),
            updated_at: ticket.updated_at,
        }
    }
}
