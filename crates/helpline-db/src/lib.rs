//! Persistence for tickets, their message threads and the caller directory.

pub mod db;
pub mod error;
pub mod model;
