use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::{NewOwner, Owner, OwnerUpdate, Property, PropertyStatus, Role, UserProfile};
use crate::store::traits::DataStore;

const PROPERTIES_TABLE: &str = "propiedades";
const OWNERS_TABLE: &str = "propietarios";
const PROFILES_TABLE: &str = "profiles";

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// PostgREST client for the hosted backend
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self::with_client(client, base_url, anon_key))
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    /// Same store acting on behalf of a signed-in user.
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..self.clone()
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    fn get(&self, table: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.table_url(table)))
    }

    fn post(&self, table: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
    }

    fn patch(&self, table: &str, id: &str) -> RequestBuilder {
        self.authorize(self.client.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
    }

    fn delete(&self, table: &str, id: &str) -> RequestBuilder {
        self.authorize(self.client.delete(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
    }

    /// Send and decode a row list, turning non-2xx answers into `StoreError::Api`.
    async fn rows<T: DeserializeOwned>(request: RequestBuilder) -> Result<Vec<T>, StoreError> {
        let response = check(request.send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Like [`Self::rows`] but the request must touch exactly the row `id`.
    async fn single_row<T: DeserializeOwned>(
        request: RequestBuilder,
        table: &'static str,
        id: &str,
    ) -> Result<T, StoreError> {
        Self::rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound {
                table,
                id: id.to_string(),
            })
    }
}

async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    warn!("Backend returned {}: {}", status, message);

    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl DataStore for RestStore {
    async fn fetch_properties(&self) -> Result<Vec<Property>, StoreError> {
        debug!("Fetching properties");
        let request = self
            .get(PROPERTIES_TABLE)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let properties: Vec<Property> = Self::rows(request).await?;
        info!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    async fn update_property_status(
        &self,
        property_id: &str,
        status: PropertyStatus,
    ) -> Result<(), StoreError> {
        debug!("Setting property {} to {}", property_id, status);
        let request = self
            .patch(PROPERTIES_TABLE, property_id)
            .json(&json!({ "status": status }));
        Self::single_row::<serde_json::Value>(request, PROPERTIES_TABLE, property_id).await?;
        Ok(())
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let request = self.get(PROFILES_TABLE).query(&[
            ("select", "id,email,role".to_string()),
            ("id", format!("eq.{user_id}")),
        ]);
        let profiles: Vec<UserProfile> = Self::rows(request).await?;
        Ok(profiles.into_iter().next())
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError> {
        let request = self
            .get(PROFILES_TABLE)
            .query(&[("select", "id,email,role"), ("order", "email.asc")]);
        Self::rows(request).await
    }

    async fn update_profile_role(
        &self,
        user_id: &str,
        role: Role,
    ) -> Result<UserProfile, StoreError> {
        info!("Changing role of {} to {:?}", user_id, role);
        let request = self
            .patch(PROFILES_TABLE, user_id)
            .query(&[("select", "id,email,role")])
            .json(&json!({ "role": role, "updated_at": chrono::Utc::now() }));
        Self::single_row(request, PROFILES_TABLE, user_id).await
    }

    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError> {
        let request = self
            .get(OWNERS_TABLE)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        Self::rows(request).await
    }

    async fn create_owner(&self, owner: &NewOwner) -> Result<Owner, StoreError> {
        info!("Creating CRM lead for {}", owner.property_address);
        let request = self.post(OWNERS_TABLE).json(owner);
        Self::single_row(request, OWNERS_TABLE, "<new>").await
    }

    async fn update_owner(
        &self,
        owner_id: &str,
        update: &OwnerUpdate,
    ) -> Result<Owner, StoreError> {
        let request = self.patch(OWNERS_TABLE, owner_id).json(update);
        Self::single_row(request, OWNERS_TABLE, owner_id).await
    }

    async fn delete_owner(&self, owner_id: &str) -> Result<(), StoreError> {
        info!("Deleting CRM lead {}", owner_id);
        let request = self.delete(OWNERS_TABLE, owner_id);
        Self::single_row::<serde_json::Value>(request, OWNERS_TABLE, owner_id).await?;
        Ok(())
    }
}
