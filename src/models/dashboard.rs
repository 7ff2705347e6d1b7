use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Inclusive reporting window sent to every analytics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::Validation(
                "Start date must not be after end date".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// The `days` days ending on `today`.
    pub fn trailing_days(today: NaiveDate, days: i64) -> Self {
        let span = days.max(1) - 1;
        Self {
            start: today - Duration::days(span),
            end: today,
        }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, AppError> {
        let parse = |raw: &str| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| AppError::Validation(format!("Invalid date: {raw}")))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_date", self.start.format("%Y-%m-%d").to_string()),
            ("end_date", self.end.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Ordering for the KOL leaderboard.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KolSortKey {
    Clicks,
    Orders,
    #[default]
    Commission,
}

impl KolSortKey {
    pub const ALL: [KolSortKey; 3] = [KolSortKey::Clicks, KolSortKey::Orders, KolSortKey::Commission];

    pub fn as_str(self) -> &'static str {
        match self {
            KolSortKey::Clicks => "clicks",
            KolSortKey::Orders => "orders",
            KolSortKey::Commission => "commission",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub total_customers: u64,
    pub average_order_value: f64,
    pub pending_reviews: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RevenuePoint {
    pub date: String,
    pub revenue: f64,
    pub orders: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TopProduct {
    pub product_id: u64,
    pub name: String,
    pub sku: Option<String>,
    #[serde(alias = "total_sold")]
    pub units_sold: u64,
    pub revenue: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct KolPerformance {
    pub kol_id: u64,
    #[serde(alias = "username")]
    pub name: String,
    pub clicks: u64,
    pub orders: u64,
    pub commission: f64,
}

impl KolPerformance {
    /// Orders per click, as a percentage.
    pub fn conversion_rate(&self) -> f64 {
        if self.clicks == 0 {
            0.0
        } else {
            self.orders as f64 / self.clicks as f64 * 100.0
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct CustomerStats {
    pub total_customers: u64,
    pub new_customers: u64,
    pub returning_customers: u64,
    pub average_lifetime_value: f64,
}

/// Money with two decimals and thousands separators.
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, cents % 100)
}
