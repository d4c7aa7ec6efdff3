//! Ticket enumerations and external references

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roles::{ParseEnumError, Role};

/// Ticket workflow state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Newly filed, not yet picked up.
    #[default]
    Open,

    /// Being worked on (includes "waiting" states reported by the helpdesk).
    InProgress,

    /// Fixed, awaiting confirmation.
    Resolved,

    /// Finished.
    Closed,
}

impl TicketStatus {
    /// All statuses, in workflow order.
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    /// Stable snake case name used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Closed tickets drop out of the open ticket views.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseEnumError::new("ticket status", value))
    }
}

/// Ticket urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    /// Can wait.
    Low,

    /// Normal handling.
    #[default]
    Medium,

    /// Needs attention first.
    High,
}

impl TicketPriority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Stable lowercase name used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| ParseEnumError::new("ticket priority", value))
    }
}

/// Who filed a ticket, encoded in its external reference prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketOrigin {
    /// Filed by the customer through self-service.
    Customer,

    /// Filed by staff, usually on a customer's behalf.
    Staff,
}

impl TicketOrigin {
    /// Origin implied by the role of the account that owns the ticket.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        if role.is_staff() {
            Self::Staff
        } else {
            Self::Customer
        }
    }

    /// Reference prefix.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Customer => "CUS",
            Self::Staff => "STF",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "CUS" => Some(Self::Customer),
            "STF" => Some(Self::Staff),
            _ => None,
        }
    }
}

/// Human-facing ticket reference such as `CUS-7K2QX9AB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketReference {
    origin: TicketOrigin,
    code: String,
}

impl TicketReference {
    /// Characters a reference code is drawn from.
    pub const ALPHABET: &'static [u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Length of the random code after the prefix.
    pub const CODE_LEN: usize = 8;

    /// Build a reference from an origin and a code.
    ///
    /// # Errors
    ///
    /// Returns an error when the code has the wrong length or contains
    /// characters outside [`Self::ALPHABET`].
    pub fn new(origin: TicketOrigin, code: &str) -> Result<Self, TicketReferenceError> {
        if code.len() != Self::CODE_LEN {
            return Err(TicketReferenceError::CodeLength);
        }

        if !code.bytes().all(|byte| Self::ALPHABET.contains(&byte)) {
            return Err(TicketReferenceError::CodeCharacters);
        }

        Ok(Self {
            origin,
            code: code.to_string(),
        })
    }

    /// Origin encoded in the prefix.
    #[must_use]
    pub const fn origin(&self) -> TicketOrigin {
        self.origin
    }
}

impl fmt::Display for TicketReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.origin.prefix(), self.code)
    }
}

impl FromStr for TicketReference {
    type Err = TicketReferenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (prefix, code) = value
            .split_once('-')
            .ok_or(TicketReferenceError::MissingSeparator)?;

        let origin = TicketOrigin::from_prefix(prefix).ok_or(TicketReferenceError::Prefix)?;

        Self::new(origin, code)
    }
}

/// Malformed ticket reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TicketReferenceError {
    /// No `-` between prefix and code.
    #[error("ticket reference is missing its separator")]
    MissingSeparator,

    /// Prefix is not a known origin.
    #[error("ticket reference prefix is unknown")]
    Prefix,

    /// Code is not [`TicketReference::CODE_LEN`] characters long.
    #[error("ticket reference code has the wrong length")]
    CodeLength,

    /// Code contains characters outside the reference alphabet.
    #[error("ticket reference code contains invalid characters")]
    CodeCharacters,
}
