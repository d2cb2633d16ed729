//! The frontier entry state machine
//!
//! ```text
//!          admit                 begin                success
//!   (none) ──────▶ PENDING ───────────▶ PROCESSING ───────────▶ PROCESSED
//!                    │                      │
//!                    │ skip (dup seed)      │ fault
//!                    ▼                      ▼
//!                 SKIPPED                 FAILED
//! ```

use std::fmt;

/// Status of a single frontier entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontierStatus {
    Pending,
    Processing,
    Processed,
    Failed,
    Skipped,
}

impl FrontierStatus {
    /// PROCESSED and FAILED are terminal for an entry's processing; so is SKIPPED.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FrontierStatus::Processed | FrontierStatus::Failed | FrontierStatus::Skipped
        )
    }

    /// Whether `self -> to` is a legal transition per the state machine above.
    pub fn can_transition_to(&self, to: FrontierStatus) -> bool {
        use FrontierStatus::*;
        matches!(
            (self, to),
            (Pending, Processing)
                | (Pending, Skipped)
                | (Processing, Processed)
                | (Processing, Failed)
        )
    }

    pub fn to_db_string(&self) -> &'static str {
        match self {
            FrontierStatus::Pending => "PENDING",
            FrontierStatus::Processing => "PROCESSING",
            FrontierStatus::Processed => "PROCESSED",
            FrontierStatus::Failed => "FAILED",
            FrontierStatus::Skipped => "SKIPPED",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(FrontierStatus::Pending),
            "PROCESSING" => Some(FrontierStatus::Processing),
            "PROCESSED" => Some(FrontierStatus::Processed),
            "FAILED" => Some(FrontierStatus::Failed),
            "SKIPPED" => Some(FrontierStatus::Skipped),
            _ => None,
        }
    }
}

impl fmt::Display for FrontierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(FrontierStatus::Processed.is_terminal());
        assert!(FrontierStatus::Failed.is_terminal());
        assert!(FrontierStatus::Skipped.is_terminal());
        assert!(!FrontierStatus::Pending.is_terminal());
        assert!(!FrontierStatus::Processing.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        assert!(FrontierStatus::Pending.can_transition_to(FrontierStatus::Processing));
        assert!(FrontierStatus::Pending.can_transition_to(FrontierStatus::Skipped));
        assert!(FrontierStatus::Processing.can_transition_to(FrontierStatus::Processed));
        assert!(FrontierStatus::Processing.can_transition_to(FrontierStatus::Failed));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!FrontierStatus::Processed.can_transition_to(FrontierStatus::Processing));
        assert!(!FrontierStatus::Failed.can_transition_to(FrontierStatus::Processed));
        assert!(!FrontierStatus::Pending.can_transition_to(FrontierStatus::Processed));
        assert!(!FrontierStatus::Skipped.can_transition_to(FrontierStatus::Pending));
    }

    #[test]
    fn test_db_string_round_trip() {
        for state in [
            FrontierStatus::Pending,
            FrontierStatus::Processing,
            FrontierStatus::Processed,
            FrontierStatus::Failed,
            FrontierStatus::Skipped,
        ] {
            let s = state.to_db_string();
            assert_eq!(FrontierStatus::from_db_string(s), Some(state));
        }
    }
}
