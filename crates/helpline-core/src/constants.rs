/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const TICKETS_ROUTE_COMPONENT: &str = "tickets";
pub const TICKETS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", TICKETS_ROUTE_COMPONENT);

/// Prefix of every human-readable ticket identifier.
pub const TICKET_REF_PREFIX: &str = "TCK";

/// Minimum sequence width; larger sequences grow instead of truncating.
pub const TICKET_REF_SEQUENCE_WIDTH: usize = 4;

pub const SUBJECT_MIN_CHARS: usize = 5;
pub const DESCRIPTION_MIN_CHARS: usize = 10;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 50;
