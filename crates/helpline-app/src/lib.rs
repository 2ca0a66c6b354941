//! HTTP surface of the Helpline ticket service.

pub mod app;
pub mod attachment_handler;
pub mod config;
pub mod db_handler;
pub mod error;
pub mod middleware;
