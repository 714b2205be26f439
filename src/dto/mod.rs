pub mod job_dto;
pub mod temp_dto;
pub mod user_dto;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body, e.g. `{"message": "Job updated"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<T: Into<String>>(message: T) -> Self {
        MessageResponse { message: message.into() }
    }
}
