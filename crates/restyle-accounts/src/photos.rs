use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;

/// A finished batch to be recorded in the user's history
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub user_id: String,
    /// Upload as received from the client
    pub original_url: String,
    /// Generated image references in template order
    pub generated_urls: Vec<String>,
}

/// A stored batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: String,
    pub original_url: String,
    pub generated_urls: Vec<String>,
    pub created_at: Timestamp,
}

/// Persistence for generated batches
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store a batch, assigning its id and creation time
    async fn save(&self, photo: NewPhoto) -> Result<PhotoRecord>;

    /// All batches of a user, newest first
    async fn list(&self, user_id: &str) -> Result<Vec<PhotoRecord>>;
}

/// Process-local store for development and tests
///
/// Keeps every upload in full, including its base64 payload, with no
/// bound or eviction. Production deployments plug a database-backed
/// `PhotoStore` in through `Server::with_accounts`.
#[derive(Default)]
pub struct MemoryPhotoStore {
    photos: DashMap<String, Vec<PhotoRecord>>,
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn save(&self, photo: NewPhoto) -> Result<PhotoRecord> {
        let record = PhotoRecord {
            id: Uuid::new_v4(),
            user_id: photo.user_id,
            original_url: photo.original_url,
            generated_urls: photo.generated_urls,
            created_at: Timestamp::now(),
        };

        self.photos
            .entry(record.user_id.clone())
            .or_default()
            .push(record.clone());

        tracing::debug!(user_id = %record.user_id, photo_id = %record.id, "photo batch stored");

        Ok(record)
    }

    async fn list(&self, user_id: &str) -> Result<Vec<PhotoRecord>> {
        let photos = self
            .photos
            .get(user_id)
            .map(|photos| photos.iter().rev().cloned().collect())
            .unwrap_or_default();

        Ok(photos)
    }
}
