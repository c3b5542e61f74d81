use serde::Serialize;

use crate::models::catalog::BodyType;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BodyTypeDto {
    pub value: &'static str,
    pub label: &'static str,
}

impl From<BodyType> for BodyTypeDto {
    fn from(t: BodyType) -> Self {
        Self {
            value: t.as_str(),
            label: t.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct YearChoicesDto {
    pub first: i32,
    pub last: i32,
    pub default: i32,
    pub years: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct CarMakeDetailDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub model_count: u64,
}

/// What the review cloud function answered to a submitted review.
#[derive(Debug, Serialize)]
pub struct ReviewPostedDto {
    pub status: u16,
    pub body: serde_json::Value,
}
