pub mod message;

use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::{
    enums::{TicketPriority, TicketStatus},
    schema,
};

/// Support ticket row. Everything except `status` and `updated_at` is
/// immutable once inserted.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Queryable, Selectable, Identifiable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::ticket)]
#[diesel(check_for_backend(Pg))]
pub struct Ticket {
    pub id: uuid::Uuid,
    pub ticket_ref: String,
    pub owner_id: uuid::Uuid,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Insert struct for creating new tickets
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::ticket)]
pub struct NewTicket<'a> {
    pub id: uuid::Uuid,
    pub ticket_ref: &'a str,
    pub owner_id: uuid::Uuid,
    pub subject: &'a str,
    pub description: &'a str,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
