use async_trait::async_trait;
use futures::TryStreamExt;
use models::bson::{doc, oid::ObjectId, Document};
use models::catalog::service_detail_projection;
use mongodb::{options::FindOneOptions, Collection};

use crate::errors::ServiceError;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Document>, ServiceError>;
    /// Fetch one service projected to its detail fields.
    async fn find_detail(&self, id: ObjectId) -> Result<Option<Document>, ServiceError>;
}

/// MongoDB-backed repository implementation.
pub struct MongoServiceRepository {
    pub collection: Collection<Document>,
}

#[async_trait]
impl ServiceRepository for MongoServiceRepository {
    async fn list(&self) -> Result<Vec<Document>, ServiceError> {
        let cursor = self.collection.find(None, None).await.map_err(ServiceError::db)?;
        cursor.try_collect().await.map_err(ServiceError::db)
    }

    async fn find_detail(&self, id: ObjectId) -> Result<Option<Document>, ServiceError> {
        let options = FindOneOptions::builder()
            .projection(service_detail_projection())
            .build();
        self.collection
            .find_one(doc! { "_id": id }, options)
            .await
            .map_err(ServiceError::db)
    }
}

/// In-memory repository for tests and local runs without a deployment.
pub mod mock {
    use super::*;
    use models::catalog::project_service_detail;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryServiceRepository {
        docs: RwLock<Vec<Document>>,
    }

    impl InMemoryServiceRepository {
        /// Seed with documents; any without `_id` get a fresh ObjectId.
        pub fn with_documents(docs: Vec<Document>) -> Self {
            let docs = docs
                .into_iter()
                .map(|mut d| {
                    if !d.contains_key("_id") {
                        d.insert("_id", ObjectId::new());
                    }
                    d
                })
                .collect();
            Self { docs: RwLock::new(docs) }
        }
    }

    #[async_trait]
    impl ServiceRepository for InMemoryServiceRepository {
        async fn list(&self) -> Result<Vec<Document>, ServiceError> {
            Ok(self.docs.read().await.clone())
        }

        async fn find_detail(&self, id: ObjectId) -> Result<Option<Document>, ServiceError> {
            let docs = self.docs.read().await;
            Ok(docs
                .iter()
                .find(|d| d.get_object_id("_id").ok() == Some(id))
                .map(project_service_detail))
        }
    }
}
