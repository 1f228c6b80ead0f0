//! An in-memory sip store.
//!
//! Keeps everything in one map behind an async rwlock; reads are concurrent,
//! writes exclusive. Suitable for local runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{SipEntity, SipFetchError, SipStore, SipStoreError};

/// Memory-backed sip store.
///
/// FIXME: nothing ever evicts sips, so a long-lived instance grows without
/// bound. Needs a TTL sweep if this outlives test usage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sips: RwLock<HashMap<Uuid, SipEntity>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

#[async_trait]
impl SipStore for MemoryStore {
    #[tracing::instrument(level = "debug", skip(self, sip), fields(guid = %sip.guid))]
    async fn store(&self, sip: SipEntity) -> Result<(), SipStoreError> {
        self.sips.write().await.insert(sip.guid, sip);
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn fetch(&self, guid: Uuid) -> Result<SipEntity, SipFetchError> {
        self.sips
            .read()
            .await
            .get(&guid)
            .cloned()
            .ok_or(SipFetchError::NotFound(guid))
    }
}
