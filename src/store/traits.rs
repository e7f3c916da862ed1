use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{NewOwner, Owner, OwnerUpdate, Property, PropertyStatus, Role, UserProfile};

/// Durable store behind the dashboard
///
/// Row-level authorization is enforced by the backend; implementations only
/// carry the caller's credentials.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// All listings, newest first. Metrics are left at their defaults.
    async fn fetch_properties(&self) -> Result<Vec<Property>, StoreError>;

    async fn update_property_status(
        &self,
        property_id: &str,
        status: PropertyStatus,
    ) -> Result<(), StoreError>;

    /// `Ok(None)` when no profile row exists for the user.
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError>;

    async fn update_profile_role(&self, user_id: &str, role: Role)
        -> Result<UserProfile, StoreError>;

    /// CRM leads, newest first.
    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError>;

    async fn create_owner(&self, owner: &NewOwner) -> Result<Owner, StoreError>;

    async fn update_owner(&self, owner_id: &str, update: &OwnerUpdate)
        -> Result<Owner, StoreError>;

    async fn delete_owner(&self, owner_id: &str) -> Result<(), StoreError>;
}
