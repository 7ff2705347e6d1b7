use serde::Serialize;

use crate::errors::AppError;
use crate::models::review::ReviewStatus;

/// A moderator's verdict on a pending review.
///
/// A rejection can only be built with a non-blank reason, so a request that
/// would violate that rule never exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationDecision {
    Approve,
    Reject { reason: String },
}

impl ModerationDecision {
    pub fn approve() -> Self {
        ModerationDecision::Approve
    }

    pub fn reject(reason: &str) -> Result<Self, AppError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation(
                "A reason is required to reject a review".to_string(),
            ));
        }
        Ok(ModerationDecision::Reject {
            reason: reason.to_string(),
        })
    }

    pub fn target_status(&self) -> ReviewStatus {
        match self {
            ModerationDecision::Approve => ReviewStatus::Approved,
            ModerationDecision::Reject { .. } => ReviewStatus::Rejected,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ModerationDecision::Approve => None,
            ModerationDecision::Reject { reason } => Some(reason),
        }
    }

    /// Body of the status update request.
    pub fn to_body(&self) -> StatusUpdateBody {
        StatusUpdateBody {
            status: self.target_status(),
            reason: self.reason().map(str::to_string),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusUpdateBody {
    pub status: ReviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reasons_cannot_build_a_rejection() {
        for reason in ["", "   ", "\n\t"] {
            let err = ModerationDecision::reject(reason).unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn rejection_body_carries_the_trimmed_reason() {
        let decision = ModerationDecision::reject("  spam link ").unwrap();
        let body = serde_json::to_value(decision.to_body()).unwrap();
        assert_eq!(body, serde_json::json!({"status": "rejected", "reason": "spam link"}));
    }

    #[test]
    fn approval_body_has_no_reason() {
        let body = serde_json::to_value(ModerationDecision::approve().to_body()).unwrap();
        assert_eq!(body, serde_json::json!({"status": "approved"}));
    }
}
