// src/models/review.rs
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ReviewId = u64;

/// Moderation state of a review. Only `Pending` has outgoing transitions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Presentation attached to a status. Looked up, never assembled from strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub badge_class: &'static str,
    pub row_class: &'static str,
}

const STATUS_STYLES: [(ReviewStatus, StatusStyle); 3] = [
    (
        ReviewStatus::Pending,
        StatusStyle {
            label: "Pending",
            badge_class: "badge badge-warning",
            row_class: "row-pending",
        },
    ),
    (
        ReviewStatus::Approved,
        StatusStyle {
            label: "Approved",
            badge_class: "badge badge-success",
            row_class: "row-approved",
        },
    ),
    (
        ReviewStatus::Rejected,
        StatusStyle {
            label: "Rejected",
            badge_class: "badge badge-danger",
            row_class: "row-rejected",
        },
    ),
];

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Pending,
        ReviewStatus::Approved,
        ReviewStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    pub fn style(self) -> StatusStyle {
        STATUS_STYLES
            .iter()
            .find(|(status, _)| *status == self)
            .map(|(_, style)| *style)
            .unwrap_or(STATUS_STYLES[0].1)
    }

    pub fn is_terminal(self) -> bool {
        self != ReviewStatus::Pending
    }

    /// Pending may move to either terminal state; nothing re-opens.
    pub fn can_transition_to(self, target: ReviewStatus) -> bool {
        self == ReviewStatus::Pending && target.is_terminal()
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ProductSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, alias = "image_url")]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AuthorSummary {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A customer review as the admin API returns it. Lists may send a trimmed
/// record and the update endpoint may answer with only id and status, so
/// everything else defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub review_id: ReviewId,
    pub status: ReviewStatus,
    #[serde(default)]
    pub rate: u8,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(
        default,
        alias = "reason",
        alias = "reject_reason",
        skip_serializing_if = "Option::is_none"
    )]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub product: Option<ProductSummary>,
    #[serde(default, alias = "user")]
    pub author: Option<AuthorSummary>,
}

impl Review {
    /// Drops a rejection reason that does not belong to the current status.
    pub fn normalized(mut self) -> Self {
        if self.status != ReviewStatus::Rejected {
            self.rejection_reason = None;
        }
        self
    }

    /// Filled stars for display, always within 0..=5.
    pub fn star_count(&self) -> u8 {
        self.rate.min(5)
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReviewStatus::Pending
    }

    pub fn product_name(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown product")
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.username.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Anonymous")
    }

    /// Layers a (possibly partial) record returned by the update endpoint
    /// over the record we already hold.
    pub fn merged_with(&self, updated: Review) -> Review {
        Review {
            review_id: updated.review_id,
            status: updated.status,
            rate: if updated.rate == 0 { self.rate } else { updated.rate },
            content: updated.content.or_else(|| self.content.clone()),
            rejection_reason: updated.rejection_reason,
            created_at: updated.created_at.or_else(|| self.created_at.clone()),
            product: updated.product.or_else(|| self.product.clone()),
            author: updated.author.or_else(|| self.author.clone()),
        }
        .normalized()
    }
}

/// One page of a status partition, replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total: u64,
    pub pages: u32,
}

/// Human-readable form of a backend timestamp. Unknown formats are shown raw.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return parsed.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    raw.to_string()
}
