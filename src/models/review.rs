use serde::{Deserialize, Serialize};
use std::fmt;

/// Label applied when the sentiment service gives no answer.
pub const DEFAULT_SENTIMENT: &str = "neutral";

/// Purchase details attached to a review.
///
/// Upstream entries either carry all four fields or the review is built
/// without any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewVehicle {
    pub car_make: String,
    pub car_model: String,
    pub car_year: i32,
    pub purchase_date: String,
}

/// A dealer review enriched with a sentiment label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealerReview {
    pub id: i64,
    pub dealership: i64,
    pub name: String,
    pub review: String,
    pub purchase: bool,
    #[serde(flatten)]
    pub vehicle: Option<ReviewVehicle>,
    pub sentiment: String,
}

impl DealerReview {
    /// Stores the analyzer's label verbatim, or the neutral default.
    #[must_use]
    pub fn with_sentiment(mut self, label: Option<String>) -> Self {
        self.sentiment = label.unwrap_or_else(|| DEFAULT_SENTIMENT.to_string());
        self
    }
}

impl fmt::Display for DealerReview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reviewer: {} Review: {}", self.name, self.review)
    }
}

/// A review submitted by a client, before it is forwarded upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReview {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub review: String,
    #[serde(default)]
    pub purchase: bool,
    #[serde(default)]
    pub car_make: Option<String>,
    #[serde(default)]
    pub car_model: Option<String>,
    #[serde(default)]
    pub car_year: Option<i32>,
    #[serde(default)]
    pub purchase_date: Option<String>,
}

/// The `review` object posted to the review cloud function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub dealership: i64,
    pub name: String,
    pub purchase: bool,
    pub review: String,
    #[serde(flatten)]
    pub vehicle: Option<ReviewVehicle>,
}
