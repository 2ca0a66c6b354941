//! Database enum types with Diesel serialization.
//!
//! This module provides type-safe enum wrappers for database CHECK constraints.
//! Each enum implements `ToSql` and `FromSql` for automatic conversion between Rust and `PostgreSQL`,
//! and converts losslessly to and from its counterpart in `helpline_core::types`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

use helpline_core::types as domain;

/// Ticket lifecycle stage.
///
/// Maps to `ticket.status` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    Pending,
    Resolved,
    Closed,
}

impl ToSql<Text, Pg> for TicketStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for TicketStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"OPEN" => Ok(Self::Open),
            b"PENDING" => Ok(Self::Pending),
            b"RESOLVED" => Ok(Self::Resolved),
            b"CLOSED" => Ok(Self::Closed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl TicketStatus {
    /// Returns the database string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Pending => "PENDING",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TicketStatus> for domain::TicketStatus {
    fn from(db_status: TicketStatus) -> Self {
        match db_status {
            TicketStatus::Open => Self::Open,
            TicketStatus::Pending => Self::Pending,
            TicketStatus::Resolved => Self::Resolved,
            TicketStatus::Closed => Self::Closed,
        }
    }
}

impl From<domain::TicketStatus> for TicketStatus {
    fn from(status: domain::TicketStatus) -> Self {
        match status {
            domain::TicketStatus::Open => Self::Open,
            domain::TicketStatus::Pending => Self::Pending,
            domain::TicketStatus::Resolved => Self::Resolved,
            domain::TicketStatus::Closed => Self::Closed,
        }
    }
}

/// Ticket urgency.
///
/// Maps to `ticket.priority` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

impl ToSql<Text, Pg> for TicketPriority {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        out.write_all(s.as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for TicketPriority {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"LOW" => Ok(Self::Low),
            b"MEDIUM" => Ok(Self::Medium),
            b"HIGH" => Ok(Self::High),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl From<TicketPriority> for domain::TicketPriority {
    fn from(db_priority: TicketPriority) -> Self {
        match db_priority {
            TicketPriority::Low => Self::Low,
            TicketPriority::Medium => Self::Medium,
            TicketPriority::High => Self::High,
        }
    }
}

impl From<domain::TicketPriority> for TicketPriority {
    fn from(priority: domain::TicketPriority) -> Self {
        match priority {
            domain::TicketPriority::Low => Self::Low,
            domain::TicketPriority::Medium => Self::Medium,
            domain::TicketPriority::High => Self::High,
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(domain::TicketPriority::from(*self).as_str())
    }
}

/// Author side of a message.
///
/// Maps to `ticket_message.sender_type` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SenderType {
    User,
    Admin,
}

impl ToSql<Text, Pg> for SenderType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        };
        out.write_all(s.as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for SenderType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"USER" => Ok(Self::User),
            b"ADMIN" => Ok(Self::Admin),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl From<SenderType> for domain::SenderType {
    fn from(db_sender: SenderType) -> Self {
        match db_sender {
            SenderType::User => Self::User,
            SenderType::Admin => Self::Admin,
        }
    }
}

impl From<domain::SenderType> for SenderType {
    fn from(sender: domain::SenderType) -> Self {
        match sender {
            domain::SenderType::User => Self::User,
            domain::SenderType::Admin => Self::Admin,
        }
    }
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(domain::SenderType::from(*self).as_str())
    }
}
