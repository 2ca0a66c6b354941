//! Keyword-based urgency classifier.
//!
//! Matching is plain substring containment on the lower-cased text, so
//! "uncharged" matches "charge". Only `HIGH` and `MEDIUM` are produced.

use helpline_core::types::TicketPriority;

/// Substrings that mark a ticket as urgent.
pub const HIGH_PRIORITY_KEYWORDS: [&str; 12] = [
    "urgent",
    "refund",
    "not delivered",
    "emergency",
    "failed",
    "stuck",
    "lost",
    "broken",
    "cancel",
    "charge",
    "payment",
    "missing",
];

/// ## Summary
/// Scores a ticket from its subject and description.
#[must_use]
pub fn classify_priority(subject: &str, description: &str) -> TicketPriority {
    let text = format!("{subject} {description}").to_lowercase();

    if HIGH_PRIORITY_KEYWORDS
        .iter()
        .any(|keyword| text.contains(keyword))
    {
        TicketPriority::High
    } else {
        TicketPriority::Medium
    }
}
