use crate::model::job::Job;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::{DRAWINGS_COLLECTION, JOBS_COLLECTION};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use futures::stream::StreamExt;
use mongodb::{Collection, Database};
use tracing::{error, info};

/// Job fields stored under a different name than they carry on the wire,
/// as `(wire, stored)`. Existing databases hold these lower-cased.
const JOB_STORED_NAMES: &[(&str, &str)] = &[("customerName", "customername"), ("postCode", "postcode")];
const ROOM_STORED_NAMES: &[(&str, &str)] = &[("roomName", "roomname")];

fn rename_keys(doc: Document, names: &[(&str, &str)], to_stored: bool) -> Document {
    doc.into_iter()
        .map(|(key, value)| {
            let renamed = names.iter().find_map(|&(wire, stored)| {
                let (from, to) = if to_stored { (wire, stored) } else { (stored, wire) };
                (key == from).then(|| to.to_string())
            });
            (renamed.unwrap_or(key), value)
        })
        .collect()
}

fn rename_document(doc: Document, to_stored: bool) -> Document {
    rename_keys(doc, JOB_STORED_NAMES, to_stored)
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Bson::Array(rooms) if key == "rooms" => Bson::Array(
                    rooms
                        .into_iter()
                        .map(|room| match room {
                            Bson::Document(room) => Bson::Document(rename_keys(room, ROOM_STORED_NAMES, to_stored)),
                            other => other,
                        })
                        .collect(),
                ),
                other => other,
            };
            (key, value)
        })
        .collect()
}

/// Job-shaped document (or `$set` payload) renamed to its stored field names.
pub fn to_stored(doc: Document) -> Document {
    rename_document(doc, true)
}

/// Stored document renamed back to wire field names and decoded.
pub fn from_stored(doc: Document) -> RepositoryResult<Job> {
    Ok(bson::from_document(rename_document(doc, false))?)
}

/// Storage for job-shaped documents. Jobs and drawings each get their own instance.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Every document in the store's natural order.
    async fn list(&self) -> RepositoryResult<Vec<Job>>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Job>;
    /// Insert under a freshly generated id; any id already on `job` is replaced.
    async fn insert(&self, job: Job) -> RepositoryResult<Job>;
    /// `$set` exactly the top-level fields in `changes`.
    async fn set_fields(&self, id: ObjectId, changes: Document) -> RepositoryResult<()>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
}

pub struct MongoJobRepository {
    collection: Collection<Document>,
    /// Entity name used in log lines and not-found messages
    label: &'static str,
}

impl MongoJobRepository {
    pub fn new(db: &Database, collection_name: &str, label: &'static str) -> Self {
        MongoJobRepository {
            collection: db.collection::<Document>(collection_name),
            label,
        }
    }

    pub fn jobs(db: &Database) -> Self {
        Self::new(db, JOBS_COLLECTION, "Job")
    }

    pub fn drawings(db: &Database) -> Self {
        Self::new(db, DRAWINGS_COLLECTION, "Drawing")
    }

    fn not_found(&self) -> RepositoryError {
        RepositoryError::not_found(format!("{} not found", self.label))
    }
}

#[async_trait]
impl JobRepository for MongoJobRepository {
    #[tracing::instrument(skip(self), fields(label = self.label))]
    async fn list(&self) -> RepositoryResult<Vec<Job>> {
        let mut cursor = self.collection.find(None, None).await.map_err(|e| {
            error!("Failed to list {}s: {}", self.label, e);
            RepositoryError::database(format!("Failed to list {}s: {}", self.label, e))
        })?;

        let mut jobs = Vec::new();
        while let Some(doc) = cursor.next().await {
            match doc.map_err(RepositoryError::from).and_then(from_stored) {
                Ok(job) => jobs.push(job),
                Err(e) => {
                    error!("Failed to decode {}: {}", self.label, e);
                    return Err(RepositoryError::serialization(format!(
                        "Error decoding {} data: {}",
                        self.label, e
                    )));
                }
            }
        }
        info!("Fetched {} {}s", jobs.len(), self.label);
        Ok(jobs)
    }

    #[tracing::instrument(skip(self), fields(label = self.label, id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Job> {
        let result = self.collection.find_one(doc! { "_id": id }, None).await;
        match result {
            Ok(Some(doc)) => from_stored(doc).map_err(|e| {
                error!("Failed to decode {}: {}", self.label, e);
                e
            }),
            Ok(None) => {
                info!("{} not found for ID: {}", self.label, id);
                Err(self.not_found())
            }
            Err(e) => {
                error!("Failed to fetch {} by ID: {}", self.label, e);
                Err(RepositoryError::database(format!("Failed to fetch {}: {}", self.label, e)))
            }
        }
    }

    #[tracing::instrument(skip(self, job), fields(label = self.label, quote_id = %job.quote_id))]
    async fn insert(&self, mut job: Job) -> RepositoryResult<Job> {
        job.id = Some(ObjectId::new());
        let stored = to_stored(bson::to_document(&job)?);
        match self.collection.insert_one(stored, None).await {
            Ok(_) => {
                info!("{} created with ID: {:?}", self.label, job.id);
                Ok(job)
            }
            Err(e) => {
                error!("Failed to create {}: {}", self.label, e);
                Err(RepositoryError::database(format!("Failed to create {}: {}", self.label, e)))
            }
        }
    }

    #[tracing::instrument(skip(self, changes), fields(label = self.label, id = %id, keys = changes.len()))]
    async fn set_fields(&self, id: ObjectId, changes: Document) -> RepositoryResult<()> {
        let update = doc! { "$set": to_stored(changes) };
        match self.collection.update_one(doc! { "_id": id }, update, None).await {
            // matched, not modified: an identical resubmission is still a success
            Ok(result) if result.matched_count > 0 => {
                info!("{} updated for ID: {}", self.label, id);
                Ok(())
            }
            Ok(_) => Err(self.not_found()),
            Err(e) => {
                error!("Failed to update {}: {}", self.label, e);
                Err(RepositoryError::database(format!("Could not update {}: {}", self.label, e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(label = self.label, id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) if result.deleted_count > 0 => {
                info!("{} deleted for ID: {}", self.label, id);
                Ok(())
            }
            Ok(_) => Err(self.not_found()),
            Err(e) => {
                error!("Failed to delete {}: {}", self.label, e);
                Err(RepositoryError::database(format!("Could not delete {}: {}", self.label, e)))
            }
        }
    }
}
