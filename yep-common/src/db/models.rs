//! Database models and status vocabularies

use serde::{Deserialize, Serialize};

/// Role tokens stored in the `user_roles` table (upper-case)
pub mod roles {
    pub const ADMIN: &str = "ADMIN";
    pub const CHAPTER_LEAD: &str = "CHAPTER_LEAD";
    pub const INSTRUCTOR: &str = "INSTRUCTOR";
    pub const APPLICANT: &str = "APPLICANT";
    pub const MENTOR: &str = "MENTOR";
    pub const ALUMNI: &str = "ALUMNI";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Directory record for a portal user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub guid: String,
    pub display_name: String,
    pub chapter_id: Option<String>,
}

/// Lifecycle state of a concrete interview slot (hiring or readiness)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Proposed,
    Posted,
    Confirmed,
    Completed,
    Cancelled,
}

impl SlotStatus {
    /// Parse the stored token; unknown tokens yield `None` so callers can
    /// skip the row instead of failing the whole query.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PROPOSED" => Some(Self::Proposed),
            "POSTED" => Some(Self::Posted),
            "CONFIRMED" => Some(Self::Confirmed),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "PROPOSED",
            Self::Posted => "POSTED",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Slots the scheduling workflow still considers live
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Posted | Self::Confirmed)
    }
}

/// Lifecycle state of an instructor readiness gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    Required,
    Scheduled,
    Completed,
    Waived,
}

impl GateStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "REQUIRED" => Some(Self::Required),
            "SCHEDULED" => Some(Self::Scheduled),
            "COMPLETED" => Some(Self::Completed),
            "WAIVED" => Some(Self::Waived),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Waived => "WAIVED",
        }
    }

    /// A waived gate needs no further interview work
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Completed | Self::Waived)
    }
}

/// Recorded result of a completed readiness interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateOutcome {
    Passed,
    Failed,
}

impl GateOutcome {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PASSED" => Some(Self::Passed),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_status_round_trip() {
        for status in [
            SlotStatus::Proposed,
            SlotStatus::Posted,
            SlotStatus::Confirmed,
            SlotStatus::Completed,
            SlotStatus::Cancelled,
        ] {
            assert_eq!(SlotStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_slot_status_unknown_token() {
        assert_eq!(SlotStatus::parse("RESCHEDULED"), None);
        assert_eq!(SlotStatus::parse("posted"), None);
    }

    #[test]
    fn test_active_slots() {
        assert!(SlotStatus::Posted.is_active());
        assert!(SlotStatus::Confirmed.is_active());
        assert!(!SlotStatus::Proposed.is_active());
        assert!(!SlotStatus::Completed.is_active());
        assert!(!SlotStatus::Cancelled.is_active());
    }

    #[test]
    fn test_gate_status_resolution() {
        assert!(GateStatus::Completed.is_resolved());
        assert!(GateStatus::Waived.is_resolved());
        assert!(!GateStatus::Required.is_resolved());
        assert!(!GateStatus::Scheduled.is_resolved());
    }

    #[test]
    fn test_gate_outcome_parse() {
        assert_eq!(GateOutcome::parse("PASSED"), Some(GateOutcome::Passed));
        assert_eq!(GateOutcome::parse("FAILED"), Some(GateOutcome::Failed));
        assert_eq!(GateOutcome::parse("PENDING"), None);
    }
}
