//! Dealer reviews from the review cloud function, enriched with sentiment.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::clients::http::{HttpError, HttpOutcome, RawResponse, get_request, post_request};
use crate::clients::nlu::SentimentAnalyzer;
use crate::models::catalog::{FIRST_MODEL_YEAR, current_year, is_valid_year};
use crate::models::review::{
    DEFAULT_SENTIMENT, DealerReview, NewReview, ReviewSubmission, ReviewVehicle,
};
use crate::models::upstream::{bool_like, lenient_option};

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Malformed review response: {0}")]
    MalformedResponse(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Http(#[from] HttpError),
}

#[derive(Debug, Deserialize)]
struct ReviewEntries {
    entries: Vec<ReviewEntry>,
}

#[derive(Debug, Deserialize)]
struct ReviewEntry {
    id: i64,
    dealership: i64,
    name: String,
    #[serde(deserialize_with = "bool_like")]
    purchase: bool,
    review: String,
    #[serde(default, deserialize_with = "lenient_option")]
    car_make: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    car_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    car_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_option")]
    purchase_date: Option<String>,
}

impl ReviewEntry {
    /// Builds the review with its vehicle block only when all four vehicle
    /// fields are present; otherwise none of them are kept.
    fn into_review(self) -> DealerReview {
        let vehicle = match (self.car_make, self.car_model, self.car_year, self.purchase_date) {
            (Some(car_make), Some(car_model), Some(car_year), Some(purchase_date)) => {
                Some(ReviewVehicle {
                    car_make,
                    car_model,
                    car_year,
                    purchase_date,
                })
            }
            _ => {
                debug!(review_id = self.id, "Review lacks vehicle details");
                None
            }
        };

        DealerReview {
            id: self.id,
            dealership: self.dealership,
            name: self.name,
            review: self.review,
            purchase: self.purchase,
            vehicle,
            sentiment: DEFAULT_SENTIMENT.to_string(),
        }
    }
}

/// Mirrors truthiness of a JSON payload: null, false, zero and empty
/// strings/collections count as "nothing returned".
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Unpacks the `entries[]` envelope into reviews without sentiment.
pub fn parse_review_entries(payload: Value) -> Result<Vec<DealerReview>, ReviewError> {
    let envelope: ReviewEntries = serde_json::from_value(payload)
        .map_err(|e| ReviewError::MalformedResponse(e.to_string()))?;

    Ok(envelope
        .entries
        .into_iter()
        .map(ReviewEntry::into_review)
        .collect())
}

/// Checks a client submission and shapes it for the cloud function.
pub fn build_submission(
    dealer_id: i64,
    review: NewReview,
) -> Result<ReviewSubmission, ReviewError> {
    let name = review.name.trim();
    if name.is_empty() {
        return Err(ReviewError::Validation("Reviewer name cannot be empty".into()));
    }
    if review.review.trim().is_empty() {
        return Err(ReviewError::Validation("Review text cannot be empty".into()));
    }

    let vehicle = match (
        review.car_make,
        review.car_model,
        review.car_year,
        review.purchase_date,
    ) {
        (Some(car_make), Some(car_model), Some(car_year), Some(purchase_date)) => {
            if !is_valid_year(car_year) {
                return Err(ReviewError::Validation(format!(
                    "Invalid car year: {car_year}. Year must be between {FIRST_MODEL_YEAR} and {}",
                    current_year()
                )));
            }
            Some(ReviewVehicle {
                car_make,
                car_model,
                car_year,
                purchase_date,
            })
        }
        _ if review.purchase => {
            return Err(ReviewError::Validation(
                "Purchase reviews require car_make, car_model, car_year and purchase_date".into(),
            ));
        }
        _ => None,
    };

    Ok(ReviewSubmission {
        id: review.id,
        dealership: dealer_id,
        name: name.to_string(),
        purchase: review.purchase,
        review: review.review,
        vehicle,
    })
}

pub struct ReviewService {
    client: Client,
    reviews_url: String,
    sentiment: Arc<dyn SentimentAnalyzer>,
}

impl ReviewService {
    #[must_use]
    pub fn new(
        client: Client,
        reviews_url: impl Into<String>,
        sentiment: Arc<dyn SentimentAnalyzer>,
    ) -> Self {
        Self {
            client,
            reviews_url: reviews_url.into(),
            sentiment,
        }
    }

    /// Lists reviews for a dealer in upstream order, each labelled with a
    /// sentiment. An upstream failure or empty payload yields no reviews.
    pub async fn list_reviews_for_dealer(
        &self,
        dealer_id: i64,
    ) -> Result<Vec<DealerReview>, ReviewError> {
        let outcome = get_request(
            &self.client,
            &self.reviews_url,
            None,
            &[("dealerId", dealer_id.to_string())],
        )
        .await?;

        let payload = match outcome {
            HttpOutcome::Success(payload) if !is_empty_payload(&payload) => payload,
            HttpOutcome::Success(_) => return Ok(Vec::new()),
            HttpOutcome::Failure(status) => {
                debug!(dealer_id, status, "No reviews returned");
                return Ok(Vec::new());
            }
        };

        let parsed = parse_review_entries(payload)?;
        let mut reviews = Vec::with_capacity(parsed.len());

        for review in parsed {
            let label = self.sentiment.analyze(&review.review).await;
            reviews.push(review.with_sentiment(label));
        }

        Ok(reviews)
    }

    /// Forwards a review to the cloud function and returns its raw answer.
    pub async fn post_review(
        &self,
        dealer_id: i64,
        review: NewReview,
    ) -> Result<HttpOutcome<RawResponse>, ReviewError> {
        let submission = build_submission(dealer_id, review)?;

        Ok(post_request(
            &self.client,
            &self.reviews_url,
            &json!({ "review": submission }),
            &[("dealerId", dealer_id.to_string())],
        )
        .await)
    }
}
