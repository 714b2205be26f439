use bson::{oid::ObjectId, Binary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempImage {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    /// Lookup key. Not unique: retrieval returns whichever match the store yields first.
    pub name: String,
    pub image: Binary,
    pub file_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
}
