//! Dealer directory backed by the dealership cloud function.
//!
//! The three lookups read three differently shaped envelopes:
//!
//! - full listing: `{ body: { rows: [ { doc: {..} } ] } }`
//! - by id:        `{ entries: [ {..} ] }`
//! - by state:     `{ body: { docs: [ {..} ] } }`
//!
//! Each shape is its own contract; a payload that does not match is a
//! [`DealerError::MalformedResponse`].

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::clients::http::{HttpError, HttpOutcome, get_request};
use crate::models::dealer::CarDealer;

#[derive(Debug, Error)]
pub enum DealerError {
    #[error("Dealer service returned status {status}")]
    Upstream { status: u16 },

    #[error("Malformed dealer response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Http(#[from] HttpError),
}

#[derive(Debug, Deserialize)]
struct RowsEnvelope {
    body: RowsBody,
}

#[derive(Debug, Deserialize)]
struct RowsBody {
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Row {
    doc: CarDealer,
}

#[derive(Debug, Deserialize)]
struct DocsEnvelope {
    body: DocsBody,
}

#[derive(Debug, Deserialize)]
struct DocsBody {
    docs: Vec<CarDealer>,
}

#[derive(Debug, Deserialize)]
struct EntriesEnvelope {
    entries: Vec<CarDealer>,
}

fn parse<T: DeserializeOwned>(payload: Value) -> Result<T, DealerError> {
    serde_json::from_value(payload).map_err(|e| DealerError::MalformedResponse(e.to_string()))
}

/// Unpacks the `body.rows[].doc` listing envelope.
pub fn parse_dealer_rows(payload: Value) -> Result<Vec<CarDealer>, DealerError> {
    let envelope: RowsEnvelope = parse(payload)?;
    Ok(envelope.body.rows.into_iter().map(|row| row.doc).collect())
}

/// Unpacks the `body.docs[]` state-filter envelope.
pub fn parse_dealer_docs(payload: Value) -> Result<Vec<CarDealer>, DealerError> {
    let envelope: DocsEnvelope = parse(payload)?;
    Ok(envelope.body.docs)
}

/// Unpacks the `entries[]` envelope and keeps the first entry.
pub fn parse_dealer_entry(payload: Value) -> Result<Option<CarDealer>, DealerError> {
    let envelope: EntriesEnvelope = parse(payload)?;
    Ok(envelope.entries.into_iter().next())
}

pub struct DealerDirectory {
    client: Client,
    dealers_url: String,
}

impl DealerDirectory {
    #[must_use]
    pub fn new(client: Client, dealers_url: impl Into<String>) -> Self {
        Self {
            client,
            dealers_url: dealers_url.into(),
        }
    }

    async fn fetch(&self, query: &[(&str, String)]) -> Result<Value, DealerError> {
        match get_request(&self.client, &self.dealers_url, None, query).await? {
            HttpOutcome::Success(payload) => Ok(payload),
            HttpOutcome::Failure(status) => Err(DealerError::Upstream { status }),
        }
    }

    /// Lists every dealer in upstream order.
    pub async fn list_dealers(&self) -> Result<Vec<CarDealer>, DealerError> {
        let dealers = parse_dealer_rows(self.fetch(&[]).await?)?;
        debug!(count = dealers.len(), "Fetched dealers");
        Ok(dealers)
    }

    /// Looks up one dealer; `Ok(None)` when upstream has no matching entry.
    pub async fn get_dealer_by_id(&self, dealer_id: i64) -> Result<Option<CarDealer>, DealerError> {
        let payload = self.fetch(&[("dealerId", dealer_id.to_string())]).await?;
        parse_dealer_entry(payload)
    }

    pub async fn list_dealers_by_state(&self, state: &str) -> Result<Vec<CarDealer>, DealerError> {
        let dealers = parse_dealer_docs(self.fetch(&[("state", state.to_string())]).await?)?;
        debug!(state, count = dealers.len(), "Fetched dealers by state");
        Ok(dealers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dealer_json(id: i64, st: &str) -> Value {
        json!({
            "_id": format!("doc-{id}"),
            "_rev": "1-abc",
            "id": id,
            "city": "El Paso",
            "state": "Texas",
            "st": st,
            "address": "3 Nova Court",
            "zip": "88563",
            "lat": 31.6948,
            "long": -106.3,
            "short_name": "Holdlamis",
            "full_name": "Holdlamis Car Dealership"
        })
    }

    #[test]
    fn test_parse_rows_keeps_order_and_fields() {
        let payload = json!({
            "body": {
                "rows": [
                    { "id": "a", "doc": dealer_json(3, "TX") },
                    { "id": "b", "doc": dealer_json(1, "CA") },
                    { "id": "c", "doc": dealer_json(2, "NY") }
                ]
            }
        });

        let dealers = parse_dealer_rows(payload).unwrap();
        let ids: Vec<i64> = dealers.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(dealers[1].st, "CA");
        assert_eq!(dealers[0].zip, "88563");
        assert!((dealers[0].lat - 31.6948).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_rows_missing_envelope_is_malformed() {
        let err = parse_dealer_rows(json!({ "rows": [] })).unwrap_err();
        assert!(matches!(err, DealerError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_docs_is_distinct_from_rows() {
        let docs = json!({ "body": { "docs": [dealer_json(5, "TX")] } });
        assert_eq!(parse_dealer_docs(docs.clone()).unwrap().len(), 1);
        assert!(parse_dealer_rows(docs).is_err());
    }

    #[test]
    fn test_parse_entry_empty_is_none() {
        assert_eq!(parse_dealer_entry(json!({ "entries": [] })).unwrap(), None);

        let found = parse_dealer_entry(json!({ "entries": [dealer_json(9, "TX")] })).unwrap();
        assert_eq!(found.map(|d| d.id), Some(9));
    }

    #[test]
    fn test_parse_entry_missing_field_is_malformed() {
        let mut dealer = dealer_json(9, "TX");
        dealer.as_object_mut().unwrap().remove("zip");

        let err = parse_dealer_entry(json!({ "entries": [dealer] })).unwrap_err();
        assert!(err.to_string().contains("zip"));
    }
}
