pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum SipFetchError {
    #[error("sip {0} not found")]
    NotFound(Uuid),
    #[error("unknown sip fetch error: {0}")]
    OtherError(BoxError),
}

#[derive(Debug, thiserror::Error)]
pub enum SipStoreError {
    #[error("unknown sip store error: {0}")]
    OtherError(BoxError),
}

/// A stored sip: one snippet of information, keyed by a client-assigned guid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SipEntity {
    pub guid: Uuid,
    pub title: String,
    pub text: Option<String>,
    pub source_uri: Option<String>,
    /// When this revision of the sip was handed to the store.
    pub stored_at: DateTime<Utc>,
}

/// Persistence seam for sips.
#[async_trait]
pub trait SipStore {
    /// Stores a sip, replacing any previous sip with the same guid.
    async fn store(&self, sip: SipEntity) -> Result<(), SipStoreError>;

    /// Fetches the sip with the given guid.
    async fn fetch(&self, guid: Uuid) -> Result<SipEntity, SipFetchError>;
}
