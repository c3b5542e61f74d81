//! Thin GET/POST helpers shared by the cloud-function adapters.
//!
//! Transport failures never surface as errors: they are logged and reported
//! as [`HttpOutcome::Failure`] carrying [`TRANSPORT_FAILURE_STATUS`].

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Status reported when a request never produced a response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Username paired with the API key for HTTP basic auth.
const API_KEY_USERNAME: &str = "apikey";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpOutcome<T> {
    Success(T),
    Failure(u16),
}

impl<T> HttpOutcome<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }
}

/// Unparsed response returned by [`post_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Issues a JSON GET.
///
/// A 2xx response with a body is parsed and returned as `Success`; any other
/// response yields `Failure(status)`.
///
/// # Errors
/// Returns [`HttpError::Decode`] when a 2xx body is not valid JSON.
pub async fn get_request(
    client: &Client,
    url: &str,
    api_key: Option<&str>,
    query: &[(&str, String)],
) -> Result<HttpOutcome<Value>, HttpError> {
    let mut request = client
        .get(url)
        .header(CONTENT_TYPE, "application/json")
        .query(query);

    if let Some(key) = api_key {
        request = request.basic_auth(API_KEY_USERNAME, Some(key));
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(url = %url, error = %e, "GET request failed");
            return Ok(HttpOutcome::Failure(TRANSPORT_FAILURE_STATUS));
        }
    };

    let status = response.status().as_u16();
    debug!(url = %url, status, "GET response");

    if !response.status().is_success() {
        return Ok(HttpOutcome::Failure(status));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(url = %url, error = %e, "Failed to read GET response body");
            return Ok(HttpOutcome::Failure(TRANSPORT_FAILURE_STATUS));
        }
    };

    if body.is_empty() {
        return Ok(HttpOutcome::Failure(status));
    }

    serde_json::from_str(&body)
        .map(HttpOutcome::Success)
        .map_err(|source| HttpError::Decode {
            url: url.to_string(),
            source,
        })
}

/// Issues a JSON POST and hands back the response untouched, whatever its status.
pub async fn post_request<P>(
    client: &Client,
    url: &str,
    payload: &P,
    query: &[(&str, String)],
) -> HttpOutcome<RawResponse>
where
    P: Serialize + ?Sized,
{
    let response = match client.post(url).query(query).json(payload).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(url = %url, error = %e, "POST request failed");
            return HttpOutcome::Failure(TRANSPORT_FAILURE_STATUS);
        }
    };

    let status = response.status().as_u16();
    debug!(url = %url, status, "POST response");

    match response.text().await {
        Ok(body) => HttpOutcome::Success(RawResponse { status, body }),
        Err(e) => {
            warn!(url = %url, error = %e, "Failed to read POST response body");
            HttpOutcome::Failure(TRANSPORT_FAILURE_STATUS)
        }
    }
}
