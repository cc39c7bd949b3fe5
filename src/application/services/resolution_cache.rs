use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::DateResolution;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub organization_id: String,
    pub location_id: String,
    pub date: NaiveDate,
    pub policy_version: String,
}

impl CacheKey {
    pub fn new(organization_id: &str, location_id: &str, date: NaiveDate, policy_version: &str) -> Self {
        Self {
            organization_id: organization_id.to_string(),
            location_id: location_id.to_string(),
            date,
            policy_version: policy_version.to_string(),
        }
    }
}

/// Write-once resolution cache owned by one engine instance.
///
/// Entries are never invalidated individually. Whoever mutates holidays or
/// weekly-off rules must call `clear` afterwards.
#[derive(Clone, Default)]
pub struct ResolutionCache {
    entries: Arc<RwLock<HashMap<CacheKey, DateResolution>>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &CacheKey) -> Option<DateResolution> {
        self.entries.read().await.get(key).cloned()
    }

    /// Store a freshly computed resolution and return the cached value.
    ///
    /// When two tasks computed the same key concurrently the first insert wins
    /// and both callers get that value back.
    pub async fn insert(&self, key: CacheKey, resolution: DateResolution) -> DateResolution {
        let mut entries = self.entries.write().await;
        entries.entry(key).or_insert(resolution).clone()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
