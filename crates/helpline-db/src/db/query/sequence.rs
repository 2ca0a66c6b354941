//! Per-day ticket sequence counter.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::ticket_daily_sequence;
use crate::error::DbResult;

/// ## Summary
/// Atomically allocates the next sequence number for `day`.
///
/// The first allocation of a day stores `seed`; later ones increment the
/// stored value. Concurrent callers serialize on the day's row, so no two
/// committed allocations share a number.
///
/// ## Errors
/// Returns an error if the statement fails.
pub async fn allocate(conn: &mut AsyncPgConnection, day: NaiveDate, seed: i32) -> DbResult<i32> {
    Ok(diesel::insert_into(ticket_daily_sequence::table)
        .values((
            ticket_daily_sequence::day.eq(day),
            ticket_daily_sequence::last_sequence.eq(seed),
        ))
        .on_conflict(ticket_daily_sequence::day)
        .do_update()
        .set(ticket_daily_sequence::last_sequence.eq(ticket_daily_sequence::last_sequence + 1))
        .returning(ticket_daily_sequence::last_sequence)
        .get_result(conn)
        .await?)
}
