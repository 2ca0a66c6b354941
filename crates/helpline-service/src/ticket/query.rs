//! Paginated, ownership-scoped ticket listing.

use diesel_async::scoped_futures::ScopedFutureExt;

use helpline_core::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use helpline_core::types::StatusFilter;
use helpline_db::db::connection::DbConnection;
use helpline_db::db::enums;
use helpline_db::db::query::{message, ticket};

use super::view::{Pagination, TicketPage, TicketSummary};
use crate::auth::capability::Caller;
use crate::error::{ServiceError, ServiceResult};

/// Normalized listing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size, within `[1, MAX_PAGE_LIMIT]`.
    pub limit: u32,
    pub status: StatusFilter,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
            status: StatusFilter::All,
        }
    }
}

impl ListQuery {
    /// ## Summary
    /// Builds a query from raw request parameters. Missing values take their
    /// defaults; `limit` is clamped rather than rejected.
    ///
    /// ## Errors
    /// Returns a validation error naming `page`, `limit` or `status` when a
    /// value is malformed, or when `page` is below 1.
    pub fn parse(page: Option<&str>, limit: Option<&str>, status: Option<&str>) -> ServiceResult<Self> {
        let page = match page.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => DEFAULT_PAGE,
            Some(raw) => {
                let page: i64 = raw
                    .parse()
                    .map_err(|_e| ServiceError::validation("page", "page must be an integer"))?;
                if page < 1 {
                    return Err(ServiceError::validation("page", "page must be at least 1"));
                }
                u32::try_from(page)
                    .map_err(|_e| ServiceError::validation("page", "page is too large"))?
            }
        };

        let limit = match limit.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => DEFAULT_PAGE_LIMIT,
            Some(raw) => parse_limit(raw)?,
        };

        let status = match status.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => StatusFilter::All,
            Some(raw) => raw.parse::<StatusFilter>()?,
        };

        Ok(Self { page, limit, status })
    }

    /// Rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

/// Integers of any magnitude are clamped; only non-integers are rejected.
fn parse_limit(raw: &str) -> ServiceResult<u32> {
    if let Ok(limit) = raw.parse::<i64>() {
        return Ok(clamp_limit(limit));
    }

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServiceError::validation("limit", "limit must be an integer"));
    }

    Ok(if negative { 1 } else { MAX_PAGE_LIMIT })
}

fn clamp_limit(limit: i64) -> u32 {
    let clamped = limit.clamp(1, i64::from(MAX_PAGE_LIMIT));
    u32::try_from(clamped).unwrap_or(MAX_PAGE_LIMIT)
}

/// ## Summary
/// Lists tickets visible to `caller`, newest first.
///
/// Administrators see every ticket; everyone else only their own. The page
/// and the total are read in one repeatable-read snapshot so they agree.
///
/// ## Errors
/// Returns a database error if either query fails.
#[tracing::instrument(skip(conn), fields(user_id = %caller.user_id))]
pub async fn list_tickets(
    conn: &mut DbConnection<'_>,
    caller: &Caller,
    query: &ListQuery,
) -> ServiceResult<TicketPage> {
    let owner_id = caller.scope_owner();
    let status = query.status.status().map(enums::TicketStatus::from);
    let offset = query.offset();
    let limit = i64::from(query.limit);

    let (rows, counts, total) = conn
        .build_transaction()
        .read_only()
        .repeatable_read()
        .run(move |tx| {
            async move {
                let rows = ticket::load_page(tx, owner_id, status, offset, limit).await?;
                let ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
                let counts = message::count_by_ticket(tx, &ids).await?;
                let total = ticket::count_visible(tx, owner_id, status).await?;
                Ok::<_, ServiceError>((rows, counts, total))
            }
            .scope_boxed()
        })
        .await?;

    let tickets = rows
        .into_iter()
        .map(|row| {
            let message_count = counts.get(&row.id).copied().unwrap_or_default();
            TicketSummary::new(row, message_count)
        })
        .collect::<Vec<_>>();

    let total = u64::try_from(total).unwrap_or_default();
    tracing::debug!(returned = tickets.len(), total, "Listed tickets");

    Ok(TicketPage {
        tickets,
        pagination: Pagination::new(query.page, query.limit, total),
    })
}
