use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::{enums::SenderType, schema};

/// One entry in a ticket's thread. `seq` is assigned by the database and
/// breaks ties between messages sharing a `created_at`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Queryable, Selectable, Identifiable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::ticket_message)]
#[diesel(check_for_backend(Pg))]
pub struct TicketMessage {
    pub id: uuid::Uuid,
    pub ticket_id: uuid::Uuid,
    pub seq: i64,
    pub sender_type: SenderType,
    pub sender_id: Option<uuid::Uuid>,
    pub message: String,
    pub attachment_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::ticket_message)]
pub struct NewTicketMessage<'a> {
    pub id: uuid::Uuid,
    pub ticket_id: uuid::Uuid,
    pub sender_type: SenderType,
    pub sender_id: Option<uuid::Uuid>,
    pub message: &'a str,
    pub attachment_url: Option<&'a str>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
