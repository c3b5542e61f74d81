//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use dealership::clients::nlu::SentimentAnalyzer;
use dealership::config::Config;
use serde_json::{Value, json};
use std::sync::Mutex;

/// Config pointing at a fresh temp-file database and the given upstreams.
pub fn test_config(dealers_url: &str, reviews_url: &str) -> Config {
    let db_path =
        std::env::temp_dir().join(format!("dealership-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.dealerships.dealers_url = dealers_url.to_string();
    config.dealerships.reviews_url = reviews_url.to_string();
    config.dealerships.request_timeout_seconds = 5;
    config.observability.metrics_enabled = false;
    config
}

pub async fn spawn_store() -> dealership::db::Store {
    let config = test_config("http://127.0.0.1:1/dealers", "http://127.0.0.1:1/reviews");
    dealership::db::Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
        .await
        .expect("failed to open store")
}

/// Analyzer that answers with a fixed label and records what it was asked.
pub struct FixedSentiment {
    label: Option<String>,
    pub seen: Mutex<Vec<String>>,
}

impl FixedSentiment {
    pub fn new(label: Option<&str>) -> Self {
        Self {
            label: label.map(ToString::to_string),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentimentAnalyzer for FixedSentiment {
    async fn analyze(&self, text: &str) -> Option<String> {
        self.seen.lock().unwrap().push(text.to_string());
        self.label.clone()
    }
}

pub fn dealer_json(id: i64, state: &str, st: &str) -> Value {
    json!({
        "_id": format!("doc-{id}"),
        "_rev": "1-a1b2",
        "id": id,
        "city": "El Paso",
        "state": state,
        "st": st,
        "address": "3 Nova Court",
        "zip": "88563",
        "lat": 31.6948,
        "long": -106.3194,
        "short_name": "Holdlamis",
        "full_name": format!("Holdlamis Car Dealership {id}")
    })
}

pub fn review_json(id: i64, dealership: i64, text: &str) -> Value {
    json!({
        "id": id,
        "name": "Berkly Shepley",
        "dealership": dealership,
        "review": text,
        "purchase": true,
        "purchase_date": "07/11/2020",
        "car_make": "Audi",
        "car_model": "A6",
        "car_year": 2010
    })
}
