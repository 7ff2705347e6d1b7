//! Client for the storefront admin REST API.
//!
//! Every call takes explicit [`Credentials`]. Responses share one envelope:
//! `{"success": true, ...payload}` or `{"success": false, "message": "..."}`.

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::logging::{error, log};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::dashboard::{
    CustomerStats, DashboardStats, DateRange, KolPerformance, KolSortKey, RevenuePoint, TopProduct,
};
use crate::models::decision::ModerationDecision;
use crate::models::query::ReviewQuery;
use crate::models::review::{Review, ReviewId, ReviewPage, ReviewStatus};
use crate::session::Credentials;

const REVIEWS_PATH: &str = "admin/reviews";
const DASHBOARD_PATH: &str = "admin/dashboard";

/// The review endpoints the moderation views depend on.
#[allow(async_fn_in_trait)]
pub trait ReviewBackend {
    /// One page of a status partition.
    async fn query_reviews(
        &self,
        credentials: &Credentials,
        status: ReviewStatus,
        query: &ReviewQuery,
    ) -> Result<ReviewPage, AppError>;

    /// The full record, including product and author detail.
    async fn fetch_review(&self, credentials: &Credentials, id: ReviewId) -> Result<Review, AppError>;

    /// Moves a review to the decision's target status.
    async fn update_status(
        &self,
        credentials: &Credentials,
        id: ReviewId,
        decision: &ModerationDecision,
    ) -> Result<Review, AppError>;
}

#[derive(Deserialize, Debug, Default)]
struct PaginationBody {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    pages: u32,
}

#[derive(Deserialize, Debug)]
struct ReviewListBody {
    #[serde(default)]
    reviews: Vec<Review>,
    #[serde(default)]
    pagination: PaginationBody,
}

#[derive(Deserialize, Debug)]
struct DataBody<T> {
    data: T,
}

/// Decodes a list response into a [`ReviewPage`].
pub fn decode_review_page(http_ok: bool, http_status: u16, text: &str) -> Result<ReviewPage, AppError> {
    let body: ReviewListBody = decode_envelope(http_ok, http_status, text)?;
    Ok(ReviewPage {
        reviews: body.reviews.into_iter().map(Review::normalized).collect(),
        total: body.pagination.total,
        pages: body.pagination.pages,
    })
}

/// Decodes a `{"success": true, "data": ...}` response.
pub fn decode_data<T: DeserializeOwned>(http_ok: bool, http_status: u16, text: &str) -> Result<T, AppError> {
    let body: DataBody<T> = decode_envelope(http_ok, http_status, text)?;
    Ok(body.data)
}

/// Checks the success flag and decodes the rest of the body as `T`.
///
/// A failure message from the body wins over the bare HTTP status, so a 401
/// with `{"message": "Token expired"}` reads as "Token expired".
pub fn decode_envelope<T: DeserializeOwned>(
    http_ok: bool,
    http_status: u16,
    text: &str,
) -> Result<T, AppError> {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) if !http_ok => return Err(AppError::Api(format!("Request failed with HTTP {http_status}"))),
        Err(err) => return Err(err.into()),
    };

    let success = value.get("success").and_then(|s| s.as_bool()).unwrap_or(false);
    if !http_ok || !success {
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if http_ok {
                    "Request failed".to_string()
                } else {
                    format!("Request failed with HTTP {http_status}")
                }
            });
        return Err(AppError::Api(message));
    }

    Ok(serde_json::from_value(value)?)
}

/// Appends percent-encoded query pairs to a URL.
pub fn with_query(url: String, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return url;
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{url}?{query}")
}

/// HTTP implementation over `gloo-net`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    config: AppConfig,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn authorized(builder: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        match credentials.authorization_header() {
            Some(header) => builder.header("Authorization", &header),
            None => builder,
        }
    }

    async fn read(response: Response) -> Result<(bool, u16, String), AppError> {
        let ok = response.ok();
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read response: {e}")))?;
        Ok((ok, status, text))
    }

    async fn get_text(
        &self,
        credentials: &Credentials,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<(bool, u16, String), AppError> {
        let url = with_query(self.config.endpoint(path), params);
        log!("[API] GET {}", url);

        let response = Self::authorized(Request::get(&url), credentials)
            .send()
            .await
            .map_err(|e| {
                error!("[API] GET {} failed: {}", url, e);
                AppError::Network(e.to_string())
            })?;
        Self::read(response).await
    }

    pub async fn dashboard_stats(
        &self,
        credentials: &Credentials,
        range: &DateRange,
    ) -> Result<DashboardStats, AppError> {
        let (ok, status, text) = self
            .get_text(credentials, &format!("{DASHBOARD_PATH}/stats"), &range.to_params())
            .await?;
        decode_data(ok, status, &text)
    }

    pub async fn revenue_series(
        &self,
        credentials: &Credentials,
        range: &DateRange,
    ) -> Result<Vec<RevenuePoint>, AppError> {
        let (ok, status, text) = self
            .get_text(credentials, &format!("{DASHBOARD_PATH}/revenue"), &range.to_params())
            .await?;
        decode_data(ok, status, &text)
    }

    pub async fn top_products(
        &self,
        credentials: &Credentials,
        range: &DateRange,
    ) -> Result<Vec<TopProduct>, AppError> {
        let (ok, status, text) = self
            .get_text(credentials, &format!("{DASHBOARD_PATH}/top-products"), &range.to_params())
            .await?;
        decode_data(ok, status, &text)
    }

    pub async fn kol_performance(
        &self,
        credentials: &Credentials,
        range: &DateRange,
        sort_by: KolSortKey,
    ) -> Result<Vec<KolPerformance>, AppError> {
        let mut params = range.to_params();
        params.push(("sort_by", sort_by.as_str().to_string()));
        let (ok, status, text) = self
            .get_text(credentials, &format!("{DASHBOARD_PATH}/kol-performance"), &params)
            .await?;
        decode_data(ok, status, &text)
    }

    pub async fn customer_stats(
        &self,
        credentials: &Credentials,
        range: &DateRange,
    ) -> Result<CustomerStats, AppError> {
        let (ok, status, text) = self
            .get_text(credentials, &format!("{DASHBOARD_PATH}/customers"), &range.to_params())
            .await?;
        decode_data(ok, status, &text)
    }
}

impl ReviewBackend for ApiClient {
    async fn query_reviews(
        &self,
        credentials: &Credentials,
        status: ReviewStatus,
        query: &ReviewQuery,
    ) -> Result<ReviewPage, AppError> {
        let (ok, http_status, text) = self
            .get_text(credentials, REVIEWS_PATH, &query.to_params(status))
            .await?;
        let page = decode_review_page(ok, http_status, &text)?;
        log!(
            "[API] Loaded {} {} reviews (page {}/{})",
            page.reviews.len(),
            status,
            query.page(),
            page.pages
        );
        Ok(page)
    }

    async fn fetch_review(&self, credentials: &Credentials, id: ReviewId) -> Result<Review, AppError> {
        let (ok, status, text) = self
            .get_text(credentials, &format!("{REVIEWS_PATH}/{id}"), &[])
            .await?;
        decode_data::<Review>(ok, status, &text).map(Review::normalized)
    }

    async fn update_status(
        &self,
        credentials: &Credentials,
        id: ReviewId,
        decision: &ModerationDecision,
    ) -> Result<Review, AppError> {
        let url = self.config.endpoint(&format!("{REVIEWS_PATH}/{id}/status"));
        log!("[API] PUT {} -> {}", url, decision.target_status());

        let request = Self::authorized(Request::put(&url), credentials).json(&decision.to_body())?;
        let response = request.send().await.map_err(|e| {
            error!("[API] PUT {} failed: {}", url, e);
            AppError::Network(e.to_string())
        })?;
        let (ok, status, text) = Self::read(response).await?;
        decode_data::<Review>(ok, status, &text).map(Review::normalized)
    }
}
