use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;
use test_utils::{builder::TestBuilder, fixture};
use url::Url;

use crate::server::error::AppError;


fn url(raw: String) -> Url {
    Url::parse(&raw).unwrap()
}
