use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    /// One-way hash; the plaintext never reaches the store.
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub created_at: Option<String>,
}
