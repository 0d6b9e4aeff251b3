use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Body of the generic error view.
///
/// `stack` is only populated outside production.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorPageDto {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthDto {
    pub status: String,
}
