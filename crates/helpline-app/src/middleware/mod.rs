pub mod auth;
pub mod ticket_access;
