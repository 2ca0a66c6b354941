//! Shared configuration, constants and domain types for the Helpline
//! ticket lifecycle service.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
