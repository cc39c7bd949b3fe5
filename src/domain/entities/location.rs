use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// Work site within an organization. Calendar rules are scoped per location,
/// but no calendar logic depends on its attributes beyond identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub status: RecordStatus,
    pub created_at: String,
}

impl Location {
    pub fn new(organization_id: String, name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            organization_id,
            name,
            status: RecordStatus::Active,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
