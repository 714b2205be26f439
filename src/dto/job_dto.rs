use crate::model::job::{Job, Room};
use bson::Document;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

type RawRoom = Map<String, Value>;

/// Decode client rooms, rejecting any key a `Room` does not carry.
fn strict_rooms<E: serde::de::Error>(raw: Vec<RawRoom>) -> Result<Vec<Room>, E> {
    let known = serde_json::to_value(Room::default()).map_err(E::custom)?;
    raw.into_iter()
        .map(|room| {
            if let Some(key) = room.keys().find(|key| known.get(key.as_str()).is_none()) {
                return Err(E::custom(format!("unknown room field `{}`", key)));
            }
            serde_json::from_value(Value::Object(room)).map_err(E::custom)
        })
        .collect()
}

fn deserialize_rooms<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Room>, D::Error> {
    strict_rooms(Vec::<RawRoom>::deserialize(deserializer)?)
}

fn deserialize_optional_rooms<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Room>>, D::Error> {
    Option::<Vec<RawRoom>>::deserialize(deserializer)?
        .map(strict_rooms)
        .transpose()
}

/// Body of `POST /api/jobs`.
///
/// Omitted fields default to their zero value. `_id` and `quoteId` are
/// accepted so a fetched job can be resubmitted (duplicated), but both are
/// discarded: identity and quote number are always server-assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct JobRequest {
    #[serde(rename = "_id", skip_serializing)]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing)]
    pub quote_id: Option<serde_json::Value>,
    pub completed: bool,
    pub date: String,
    pub customer_name: String,
    pub address: String,
    pub address_line_one: String,
    pub address_line_two: String,
    pub address_line_three: String,
    pub email: String,
    pub phone: String,
    pub post_code: String,
    #[serde(deserialize_with = "deserialize_rooms")]
    pub rooms: Vec<Room>,
    pub options: Vec<String>,
    pub planning_permission: String,
    pub site_notes: String,
}

impl JobRequest {
    pub fn into_job(self, quote_id: String) -> Job {
        Job {
            id: None,
            quote_id,
            completed: self.completed,
            date: self.date,
            customer_name: self.customer_name,
            address: self.address,
            address_line_one: self.address_line_one,
            address_line_two: self.address_line_two,
            address_line_three: self.address_line_three,
            email: self.email,
            phone: self.phone,
            post_code: self.post_code,
            rooms: self.rooms,
            options: self.options,
            planning_permission: self.planning_permission,
            site_notes: self.site_notes,
        }
    }
}

/// Body of `PUT /api/jobs/{id}` and `PUT /api/drawings/{id}`.
///
/// Only the fields present are written (shallow top-level merge). A present
/// `rooms` list replaces the stored list as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UpdateJobRequest {
    #[serde(rename = "_id", skip_serializing)]
    pub id: Option<serde_json::Value>,
    /// Quote numbers are never reassigned
    #[serde(skip_serializing)]
    pub quote_id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_one: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_two: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_three: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_optional_rooms")]
    pub rooms: Option<Vec<Room>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planning_permission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_notes: Option<String>,
}

impl UpdateJobRequest {
    /// The `$set` payload: wire field names mapped to the supplied values.
    pub fn to_set_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// Job or drawing as returned to clients, with `_id` as a hex string.
#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub job: Job,
}

impl From<Job> for JobResponse {
    fn from(mut job: Job) -> Self {
        let id = job.id.take().map(|id| id.to_hex()).unwrap_or_default();
        JobResponse { id, job }
    }
}
