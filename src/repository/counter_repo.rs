use crate::model::counter::Counter;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::COUNTERS_COLLECTION;
use async_trait::async_trait;
use bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Collection, Database};
use tracing::{debug, error};

/// Counter that feeds human-readable quote numbers.
pub const QUOTE_ID_COUNTER: &str = "quoteId";

#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Atomically increment the named counter and return the new value.
    ///
    /// A name seen for the first time starts at 1.
    async fn next_value(&self, name: &str) -> RepositoryResult<i64>;
}

pub struct MongoCounterRepository {
    collection: Collection<Counter>,
}

impl MongoCounterRepository {
    pub fn new(db: &Database) -> Self {
        MongoCounterRepository {
            collection: db.collection::<Counter>(COUNTERS_COLLECTION),
        }
    }
}

#[async_trait]
impl CounterRepository for MongoCounterRepository {
    #[tracing::instrument(skip(self))]
    async fn next_value(&self, name: &str) -> RepositoryResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .collection
            .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "seq": 1_i64 } }, options)
            .await
            .map_err(|e| {
                error!("Failed to advance counter {}: {}", name, e);
                RepositoryError::from(e)
            })?;

        match counter {
            Some(counter) => {
                debug!(counter = %name, seq = counter.seq, "Counter advanced");
                Ok(counter.seq)
            }
            // upsert with ReturnDocument::After always yields a document
            None => Err(RepositoryError::database(format!("Counter {} was not upserted", name))),
        }
    }
}
