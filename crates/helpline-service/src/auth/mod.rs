//! Caller identity and ticket access.
//!
//! ## Module Organization
//!
//! - `authenticate`: caller identity from the configured single user or proxy headers
//! - `capability`: the owner/administrator capability check
//! - `depot`: helpers for extracting the caller and scoped ticket from Salvo requests

pub mod authenticate;
pub mod capability;
pub mod depot;

pub use authenticate::{Identity, authenticate};
pub use capability::{Caller, TicketAction, check, is_permitted};
pub use depot::{get_caller_from_depot, get_identity_from_depot, get_ticket_from_depot};
