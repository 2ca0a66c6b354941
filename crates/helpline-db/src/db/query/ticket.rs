//! Query builder functions and statements for tickets.

use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::enums::TicketStatus;
use crate::db::schema::ticket;
use crate::error::DbResult;
use crate::model::ticket::{NewTicket, Ticket};

/// ## Summary
/// Returns a query to select all tickets.
#[must_use]
pub fn all() -> ticket::BoxedQuery<'static, Pg> {
    ticket::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a ticket by its opaque handle.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> ticket::BoxedQuery<'static, Pg> {
    all().filter(ticket::id.eq(id))
}

/// ## Summary
/// Returns a query for the tickets visible under an ownership scope and an
/// optional status filter. `owner_id = None` means every owner.
#[must_use]
pub fn visible(
    owner_id: Option<uuid::Uuid>,
    status: Option<TicketStatus>,
) -> ticket::BoxedQuery<'static, Pg> {
    let mut query = all();
    if let Some(owner_id) = owner_id {
        query = query.filter(ticket::owner_id.eq(owner_id));
    }
    if let Some(status) = status {
        query = query.filter(ticket::status.eq(status));
    }
    query
}

/// ## Summary
/// Inserts a ticket row and returns it.
///
/// ## Errors
/// Returns an error if the insert fails, including a duplicate `ticket_ref`.
pub async fn insert(conn: &mut AsyncPgConnection, new_ticket: &NewTicket<'_>) -> DbResult<Ticket> {
    Ok(diesel::insert_into(ticket::table)
        .values(new_ticket)
        .returning(Ticket::as_returning())
        .get_result(conn)
        .await?)
}

/// ## Summary
/// Loads a ticket by handle.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find(conn: &mut AsyncPgConnection, id: uuid::Uuid) -> DbResult<Option<Ticket>> {
    Ok(by_id(id)
        .select(Ticket::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Loads a ticket and takes a row lock held until the surrounding
/// transaction ends.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_for_update(
    conn: &mut AsyncPgConnection,
    id: uuid::Uuid,
) -> DbResult<Option<Ticket>> {
    Ok(ticket::table
        .find(id)
        .select(Ticket::as_select())
        .for_update()
        .get_result(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Sets `updated_at` on a ticket. Returns the number of rows touched.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn set_updated_at(
    conn: &mut AsyncPgConnection,
    id: uuid::Uuid,
    at: DateTime<Utc>,
) -> DbResult<usize> {
    Ok(diesel::update(ticket::table.find(id))
        .set(ticket::updated_at.eq(at))
        .execute(conn)
        .await?)
}

/// ## Summary
/// Overwrites the status of a ticket, returning the updated row or `None`
/// when no ticket has that handle.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn set_status(
    conn: &mut AsyncPgConnection,
    id: uuid::Uuid,
    status: TicketStatus,
) -> DbResult<Option<Ticket>> {
    Ok(diesel::update(ticket::table.find(id))
        .set(ticket::status.eq(status))
        .returning(Ticket::as_returning())
        .get_result(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Counts tickets created within `[start, end]`, both ends inclusive.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn count_created_between(
    conn: &mut AsyncPgConnection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DbResult<i64> {
    Ok(ticket::table
        .filter(ticket::created_at.ge(start))
        .filter(ticket::created_at.le(end))
        .count()
        .get_result(conn)
        .await?)
}

/// ## Summary
/// Loads one page of visible tickets, most recently created first.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn load_page(
    conn: &mut AsyncPgConnection,
    owner_id: Option<uuid::Uuid>,
    status: Option<TicketStatus>,
    offset: i64,
    limit: i64,
) -> DbResult<Vec<Ticket>> {
    Ok(visible(owner_id, status)
        .order((ticket::created_at.desc(), ticket::id.desc()))
        .offset(offset)
        .limit(limit)
        .select(Ticket::as_select())
        .load(conn)
        .await?)
}

/// ## Summary
/// Counts visible tickets, ignoring pagination.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn count_visible(
    conn: &mut AsyncPgConnection,
    owner_id: Option<uuid::Uuid>,
    status: Option<TicketStatus>,
) -> DbResult<i64> {
    Ok(visible(owner_id, status).count().get_result(conn).await?)
}
