//! Ticket lifecycle operations.
//!
//! ## Module Organization
//!
//! - `ticket_ref`: `TCK-YYYYMMDD-NNNN` identifiers backed by a per-day counter
//! - `priority`: keyword-based urgency classifier
//! - `validation`: input checks shared by creation and replies
//! - `store`: creation, single fetch, status overwrite
//! - `query`: paginated, ownership-scoped listing
//! - `reply`: message append plus recency refresh
//! - `view`: response shapes

pub mod priority;
pub mod query;
pub mod reply;
pub mod store;
pub mod ticket_ref;
pub mod validation;
pub mod view;

pub use priority::classify_priority;
pub use query::{ListQuery, list_tickets};
pub use reply::{ReplyCoordinator, ReplyInput};
pub use store::{
    NewTicketInput, create_ticket, create_ticket_at, fetch_status, fetch_ticket,
    find_ticket_header, load_ticket_detail, update_status,
};
pub use view::{MessageView, OwnerView, Pagination, TicketDetail, TicketPage, TicketStatusView, TicketSummary};
