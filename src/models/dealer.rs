use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::upstream::string_or_number;

/// A dealership as served by the dealer cloud function.
///
/// Built fresh from every upstream response and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDealer {
    pub id: i64,
    pub full_name: String,
    pub short_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Two-letter state abbreviation.
    pub st: String,
    #[serde(deserialize_with = "string_or_number")]
    pub zip: String,
    pub lat: f64,
    pub long: f64,
}

impl fmt::Display for CarDealer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.full_name, self.state)
    }
}
