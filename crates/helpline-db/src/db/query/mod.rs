//! Query builders and statements, one module per table.

pub mod message;
pub mod sequence;
pub mod ticket;
pub mod user;
