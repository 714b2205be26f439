use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Renovation specification for one window, embedded in a job.
///
/// Rooms are only ever read and written through their parent document.
/// Omitted fields take their zero value and unrecognised stored fields are
/// skipped; request bodies are checked more strictly in `dto::job_dto`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Room {
    #[serde(rename = "ref")]
    pub reference: String,
    pub room_name: String,
    pub width: i64,
    pub height: i64,
    pub count: i64,
    pub putty: bool,
    pub mastic: bool,
    pub mastic_patch: bool,
    pub paint: bool,
    pub tenon: bool,
    pub e_c: bool,
    pub encapsulation: i64,
    pub bottom_rail: bool,
    pub dormer: bool,
    pub easy_clean: bool,
    pub pully_wheel: bool,
    pub panes_number: i64,
    pub stain_repairs: i64,
    pub cill: String,
    pub sash: String,
    pub notes: String,
    pub formation: String,
    pub custom_formation: String,
    pub glass_type: String,
    pub glass_type_top_bottom: String,
    pub casement: bool,
    pub outside_patch: bool,
    pub concealed_vent: bool,
    pub trickle_vent: bool,
    pub shutters: bool,
    pub handles: bool,
    pub sash_restrictor: bool,
    pub price_change: f64,
    pub price_change2: String,
    /// Direction of `price_change`, "positive" or "negative" as sent by the client
    pub positive_negative: String,
    pub price_change_notes: String,
    pub custom_item: bool,
    pub custom_item_text: String,
    pub custom_item2: i64,
    pub quote_notes: String,
    pub window_notes: String,
    pub center_mullion: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub quote_id: String,
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
    pub rooms: Vec<Room>,
    pub options: Vec<String>,
    pub planning_permission: String,
    pub site_notes: String,
}

/// Drawings share the job document shape but live in their own collection.
pub type Drawing = Job;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_wire_names() {
        let room = Room {
            reference: "R1".to_string(),
            e_c: true,
            price_change2: "10".to_string(),
            custom_item2: 3,
            ..Room::default()
        };
        let value = serde_json::to_value(&room).unwrap();
        assert_eq!(value["ref"], "R1");
        assert_eq!(value["eC"], true);
        assert_eq!(value["priceChange2"], "10");
        assert_eq!(value["customItem2"], 3);
        assert!(value.get("roomName").is_some());
        assert!(value.get("glassTypeTopBottom").is_some());
    }

    #[test]
    fn test_stored_room_tolerates_extra_fields() {
        let stored = bson::doc! { "ref": "R1", "width": 90_i32, "legacyFlag": true };
        let room: Room = bson::from_document(stored).unwrap();
        assert_eq!(room.reference, "R1");
        assert_eq!(room.width, 90);
    }

    #[test]
    fn test_job_without_id_omits_it() {
        let job = Job::default();
        let doc = bson::to_document(&job).unwrap();
        assert!(!doc.contains_key("_id"));
        assert!(doc.contains_key("quoteId"));
    }
}
