use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Earliest model year the catalog accepts.
pub const FIRST_MODEL_YEAR: i32 = 1969;

#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Valid model years, recomputed on each call so the range follows the clock.
#[must_use]
pub fn year_choices() -> RangeInclusive<i32> {
    FIRST_MODEL_YEAR..=current_year()
}

#[must_use]
pub fn is_valid_year(year: i32) -> bool {
    year_choices().contains(&year)
}

/// Closed set of body styles a car model can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BodyType {
    #[default]
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Wagon,
    Sport,
    Coupe,
    #[serde(rename = "Mini")]
    MiniVan,
    Van,
    Pickup,
    Truck,
    Bike,
    Scooter,
    Other,
}

impl BodyType {
    pub const ALL: [Self; 12] = [
        Self::Sedan,
        Self::Suv,
        Self::Wagon,
        Self::Sport,
        Self::Coupe,
        Self::MiniVan,
        Self::Van,
        Self::Pickup,
        Self::Truck,
        Self::Bike,
        Self::Scooter,
        Self::Other,
    ];

    /// Value stored in the `model_type` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedan => "Sedan",
            Self::Suv => "SUV",
            Self::Wagon => "Wagon",
            Self::Sport => "Sport",
            Self::Coupe => "Coupe",
            Self::MiniVan => "Mini",
            Self::Van => "Van",
            Self::Pickup => "Pickup",
            Self::Truck => "Truck",
            Self::Bike => "Bike",
            Self::Scooter => "Scooter",
            Self::Other => "Other",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sedan => "Sedan",
            Self::Suv => "SUV",
            Self::Wagon => "Station wagon",
            Self::Sport => "Sports Car",
            Self::Coupe => "Coupe",
            Self::MiniVan => "Mini van",
            Self::Van => "Van",
            Self::Pickup => "Pick-up truck",
            Self::Truck => "Truck",
            Self::Bike => "Motor bike",
            Self::Scooter => "Scooter",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown body type: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarMake {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl fmt::Display for CarMake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarModel {
    pub id: i32,
    pub car_make_id: Option<i32>,
    pub name: String,
    pub dealer_id: Option<i32>,
    pub model_type: BodyType,
    pub year: i32,
}

impl fmt::Display for CarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.year, self.model_type)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarMakeInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fields accepted when creating or replacing a car model.
///
/// `model_type` and `year` fall back to `Sedan` and the current year.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarModelInput {
    #[serde(default)]
    pub car_make_id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub dealer_id: Option<i32>,
    #[serde(default)]
    pub model_type: Option<BodyType>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_choices_bounds() {
        let years = year_choices();
        assert_eq!(*years.start(), 1969);
        assert_eq!(*years.end(), current_year());
        assert!(is_valid_year(1969));
        assert!(is_valid_year(current_year()));
        assert!(!is_valid_year(1968));
        assert!(!is_valid_year(current_year() + 1));
    }

    #[test]
    fn test_body_type_round_trip_through_column_value() {
        for t in BodyType::ALL {
            assert_eq!(t.as_str().parse::<BodyType>().unwrap(), t);
            assert!(t.as_str().len() <= 15);
        }
        assert!("Hatchback".parse::<BodyType>().is_err());
    }

    #[test]
    fn test_body_type_serde_uses_column_value() {
        assert_eq!(serde_json::to_value(BodyType::MiniVan).unwrap(), "Mini");
        assert_eq!(serde_json::to_value(BodyType::Suv).unwrap(), "SUV");
        let parsed: BodyType = serde_json::from_str("\"Pickup\"").unwrap();
        assert_eq!(parsed, BodyType::Pickup);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(BodyType::default(), BodyType::Sedan);
        assert_eq!(BodyType::Wagon.label(), "Station wagon");
    }

    #[test]
    fn test_car_model_display() {
        let model = CarModel {
            id: 1,
            car_make_id: None,
            name: "Corolla".to_string(),
            dealer_id: Some(3),
            model_type: BodyType::Sedan,
            year: 2020,
        };
        assert_eq!(model.to_string(), "Corolla, 2020, Sedan");
    }
}
