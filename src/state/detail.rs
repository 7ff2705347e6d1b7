use leptos::logging::{error, log};

use crate::api::ReviewBackend;
use crate::errors::AppError;
use crate::models::decision::ModerationDecision;
use crate::models::review::Review;
use crate::session::Credentials;

/// The rejection reason form shown in the detail view and on list rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RejectForm {
    open: bool,
    reason: String,
    submitting: bool,
    error: Option<String>,
}

impl RejectForm {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes and forgets whatever was typed.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn set_reason(&mut self, reason: String) {
        self.reason = reason;
        self.error = None;
    }

    /// Whether the confirm button is enabled.
    pub fn can_submit(&self) -> bool {
        self.open && !self.submitting && !self.reason.trim().is_empty()
    }

    /// Builds the decision and marks the form busy. Blank reasons fail here,
    /// before anything is sent.
    pub fn begin_submit(&mut self) -> Result<ModerationDecision, AppError> {
        if !self.open {
            return Err(AppError::Validation("Open the rejection form first".to_string()));
        }
        let decision = ModerationDecision::reject(&self.reason).inspect_err(|err| {
            self.error = Some(err.to_string());
        })?;
        self.submitting = true;
        self.error = None;
        Ok(decision)
    }

    /// The form stays open with the message so the user can retry.
    pub fn fail(&mut self, err: &AppError) {
        self.submitting = false;
        self.error = Some(err.to_string());
    }

    pub fn succeed(&mut self) {
        self.close();
    }
}

/// Sends a decision for `review` and returns the updated record merged over
/// what we already held.
///
/// Reviews that are no longer pending are refused locally.
pub async fn submit_decision<B: ReviewBackend>(
    backend: &B,
    credentials: &Credentials,
    review: &Review,
    decision: &ModerationDecision,
) -> Result<Review, AppError> {
    let target = decision.target_status();
    if !review.status.can_transition_to(target) {
        return Err(AppError::Validation(format!(
            "Review #{} is already {}",
            review.review_id, review.status
        )));
    }

    match backend.update_status(credentials, review.review_id, decision).await {
        Ok(updated) => {
            log!("[MODERATION] Review #{} is now {}", review.review_id, updated.status);
            Ok(review.merged_with(updated))
        }
        Err(err) => {
            error!("[MODERATION] Failed to set review #{} to {}: {}", review.review_id, target, err);
            Err(err)
        }
    }
}
