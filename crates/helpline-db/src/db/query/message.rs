//! Query builder functions and statements for ticket messages.

use std::collections::HashMap;

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::ticket_message;
use crate::error::DbResult;
use crate::model::ticket::message::{NewTicketMessage, TicketMessage};

/// ## Summary
/// Returns a query for a ticket's thread in replay order: `created_at`
/// ascending, insertion order breaking ties.
#[must_use]
pub fn thread(ticket_id: uuid::Uuid) -> ticket_message::BoxedQuery<'static, Pg> {
    ticket_message::table
        .filter(ticket_message::ticket_id.eq(ticket_id))
        .order((ticket_message::created_at.asc(), ticket_message::seq.asc()))
        .into_boxed()
}

/// ## Summary
/// Inserts a message and returns the stored row.
///
/// ## Errors
/// Returns an error if the insert fails, for example when the ticket does not exist.
pub async fn insert(
    conn: &mut AsyncPgConnection,
    new_message: &NewTicketMessage<'_>,
) -> DbResult<TicketMessage> {
    Ok(diesel::insert_into(ticket_message::table)
        .values(new_message)
        .returning(TicketMessage::as_returning())
        .get_result(conn)
        .await?)
}

/// ## Summary
/// Loads the full thread of a ticket.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn load_thread(
    conn: &mut AsyncPgConnection,
    ticket_id: uuid::Uuid,
) -> DbResult<Vec<TicketMessage>> {
    Ok(thread(ticket_id)
        .select(TicketMessage::as_select())
        .load(conn)
        .await?)
}

/// ## Summary
/// Counts messages per ticket. Tickets without rows are absent from the map.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn count_by_ticket(
    conn: &mut AsyncPgConnection,
    ticket_ids: &[uuid::Uuid],
) -> DbResult<HashMap<uuid::Uuid, i64>> {
    if ticket_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let counts = ticket_message::table
        .filter(ticket_message::ticket_id.eq_any(ticket_ids.to_vec()))
        .group_by(ticket_message::ticket_id)
        .select((ticket_message::ticket_id, diesel::dsl::count_star()))
        .load::<(uuid::Uuid, i64)>(conn)
        .await?;

    Ok(counts.into_iter().collect())
}
