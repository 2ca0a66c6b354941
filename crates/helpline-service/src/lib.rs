//! Ticket lifecycle: identifiers, priority scoring, the ticket store, the
//! paginated read path, reply threading, and the caller boundary in front of
//! all of them.

pub mod attachment;
pub mod auth;
pub mod error;
pub mod ticket;
