use serde::{Deserialize, Serialize};

/// Named monotonically increasing sequence, stored one document per name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub id: String,
    pub seq: i64,
}
