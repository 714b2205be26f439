pub mod drawing_handler;
pub mod job_handler;
pub mod temp_handler;
pub mod user_handler;

use crate::util::error::HandlerError;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use bson::oid::ObjectId;
use tracing::debug;

pub const INVALID_ID: &str = "Invalid ID";

/// JSON body extractor whose rejections render as `{"error": ...}` with status 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(HandlerError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for HandlerError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        HandlerError::bad_request(rejection.body_text())
    }
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request(INVALID_ID))
}
