//! Human-readable ticket identifiers of the form `TCK-YYYYMMDD-NNNN`.
//!
//! The date is the service's local calendar date at creation. `NNNN` counts
//! tickets created that date starting at `0001`, zero-padded to four digits
//! and widening past `9999`.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use diesel_async::AsyncPgConnection;

use helpline_core::constants::{TICKET_REF_PREFIX, TICKET_REF_SEQUENCE_WIDTH};
use helpline_db::db::query::{sequence, ticket};

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Formats an identifier from a calendar date and a 1-based sequence number.
#[must_use]
pub fn format_ticket_ref(day: NaiveDate, sequence: u32) -> String {
    format!(
        "{TICKET_REF_PREFIX}-{}-{sequence:0width$}",
        day.format("%Y%m%d"),
        width = TICKET_REF_SEQUENCE_WIDTH
    )
}

/// ## Summary
/// Returns the first and last instant of `day` in `tz`, both inclusive,
/// expressed in UTC.
///
/// A midnight skipped by a DST transition falls back to midnight UTC.
#[must_use]
pub fn day_bounds<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(tz, day);
    let end = day.succ_opt().map_or(DateTime::<Utc>::MAX_UTC, |next| {
        start_of_day(tz, next) - TimeDelta::microseconds(1)
    });
    (start, end)
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| midnight.and_utc(), |start| start.with_timezone(&Utc))
}

/// ## Summary
/// Allocates the identifier for a ticket created at `now`.
///
/// Must run inside the creation transaction: the day's counter row stays
/// locked until commit, and a rolled back creation releases its number.
/// The first allocation of a day is seeded from the tickets already
/// created that day, so pre-existing data continues its sequence.
///
/// ## Errors
/// Returns an error if the count or the counter update fails, or if the
/// counter leaves its representable range.
#[tracing::instrument(skip(conn))]
pub async fn allocate_ticket_ref(
    conn: &mut AsyncPgConnection,
    now: DateTime<Local>,
) -> ServiceResult<String> {
    let day = now.date_naive();
    let (start, end) = day_bounds(&Local, day);

    let created_today = ticket::count_created_between(conn, start, end).await?;
    let seed = i32::try_from(created_today + 1)
        .map_err(|_e| ServiceError::InvariantViolation("daily ticket count exceeds counter range"))?;

    let allocated = sequence::allocate(conn, day, seed).await?;
    let allocated = u32::try_from(allocated)
        .map_err(|_e| ServiceError::InvariantViolation("daily ticket counter is negative"))?;

    let ticket_ref = format_ticket_ref(day, allocated);
    tracing::debug!(%ticket_ref, created_today, "Allocated ticket identifier");

    Ok(ticket_ref)
}
