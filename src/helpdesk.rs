//! Helpdesk state and priority id tables
//!
//! The external helpdesk identifies ticket states and priorities by numeric
//! ids. Local values map onto a fixed subset of those ids and every id maps
//! back onto a local value, so a local value always survives a round trip.
//! Ids the portal does not know fall back to the least alarming local value.

use crate::tickets::{TicketPriority, TicketStatus};

/// Helpdesk state id for "new".
pub const STATE_NEW: i64 = 1;

/// Helpdesk state id for "open" (being worked on).
pub const STATE_OPEN: i64 = 2;

/// Helpdesk state id for "pending reminder".
pub const STATE_PENDING_REMINDER: i64 = 3;

/// Helpdesk state id for "resolved".
pub const STATE_RESOLVED: i64 = 4;

/// Helpdesk state id for "pending close".
pub const STATE_PENDING_CLOSE: i64 = 5;

/// Helpdesk state id for "closed".
pub const STATE_CLOSED: i64 = 6;

/// Helpdesk state id for "merged".
pub const STATE_MERGED: i64 = 7;

/// Helpdesk priority id for "low".
pub const PRIORITY_LOW: i64 = 1;

/// Helpdesk priority id for "normal".
pub const PRIORITY_NORMAL: i64 = 2;

/// Helpdesk priority id for "high".
pub const PRIORITY_HIGH: i64 = 3;

/// Helpdesk priority id for "very high".
pub const PRIORITY_VERY_HIGH: i64 = 4;

/// Helpdesk state id for a local status.
#[must_use]
pub const fn state_id(status: TicketStatus) -> i64 {
    match status {
        TicketStatus::Open => STATE_NEW,
        TicketStatus::InProgress => STATE_OPEN,
        TicketStatus::Resolved => STATE_RESOLVED,
        TicketStatus::Closed => STATE_CLOSED,
    }
}

/// Local status for a helpdesk state id.
#[must_use]
pub const fn status_for_state(state_id: i64) -> TicketStatus {
    match state_id {
        STATE_OPEN | STATE_PENDING_REMINDER | STATE_PENDING_CLOSE => TicketStatus::InProgress,
        STATE_RESOLVED => TicketStatus::Resolved,
        STATE_CLOSED | STATE_MERGED => TicketStatus::Closed,
        _ => TicketStatus::Open,
    }
}

/// Helpdesk priority id for a local priority.
#[must_use]
pub const fn priority_id(priority: TicketPriority) -> i64 {
    match priority {
        TicketPriority::Low => PRIORITY_LOW,
        TicketPriority::Medium => PRIORITY_NORMAL,
        TicketPriority::High => PRIORITY_HIGH,
    }
}

/// Local priority for a helpdesk priority id.
#[must_use]
pub const fn priority_for_id(priority_id: i64) -> TicketPriority {
    match priority_id {
        PRIORITY_LOW => TicketPriority::Low,
        PRIORITY_HIGH | PRIORITY_VERY_HIGH => TicketPriority::High,
        _ => TicketPriority::Medium,
    }
}
