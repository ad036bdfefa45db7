use std::sync::Arc;

use models::bson::Document;
use models::document::parse_object_id;
use tracing::{debug, instrument};

use super::repository::ServiceRepository;
use crate::errors::ServiceError;

/// Application service over the services collection.
pub struct CatalogService {
    repo: Arc<dyn ServiceRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ServiceRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Document>, ServiceError> {
        self.repo.list().await
    }

    /// Unparsable ids resolve to `None`, same as an id with no document.
    #[instrument(skip(self))]
    pub async fn get(&self, raw_id: &str) -> Result<Option<Document>, ServiceError> {
        let Some(id) = parse_object_id(raw_id) else {
            debug!("service id is not an ObjectId");
            return Ok(None);
        };
        self.repo.find_detail(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::mock::InMemoryServiceRepository;
    use models::bson::{doc, oid::ObjectId};

    fn svc(id: ObjectId) -> CatalogService {
        let repo = InMemoryServiceRepository::with_documents(vec![
            doc! { "_id": id, "title": "Oil Change", "price": "20.00", "service_id": "02", "img": "x.jpg", "description": "d" },
            doc! { "title": "Battery Charge", "price": "30.00", "service_id": "03", "img": "y.jpg" },
        ]);
        CatalogService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn lists_full_documents() {
        let id = ObjectId::new();
        let all = svc(id).list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].get_str("description").unwrap(), "d");
    }

    #[tokio::test]
    async fn get_projects_detail_fields() {
        let id = ObjectId::new();
        let found = svc(id).get(&id.to_hex()).await.unwrap().unwrap();
        assert_eq!(found.get_str("title").unwrap(), "Oil Change");
        assert!(found.get("description").is_none());
    }

    #[tokio::test]
    async fn bad_or_unknown_ids_are_none() {
        let id = ObjectId::new();
        let s = svc(id);
        assert!(s.get("not-an-id").await.unwrap().is_none());
        assert!(s.get(&ObjectId::new().to_hex()).await.unwrap().is_none());
    }
}
