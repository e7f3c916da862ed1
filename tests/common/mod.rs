#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sourcing_scout::error::{AuthError, StoreError};
use sourcing_scout::models::{
    NewOwner, Owner, OwnerUpdate, Property, PropertyMetrics, PropertyStatus, Role, UserProfile,
};
use sourcing_scout::session::Session;
use sourcing_scout::store::{AuthGateway, DataStore};

pub fn listing(id: &str, zone: Option<&str>, price: f64, covered: Option<f64>) -> Property {
    Property {
        id: id.to_string(),
        title: format!("Listing {id}"),
        price,
        currency: "USD".to_string(),
        location: format!("Calle {id}"),
        zone: zone.map(str::to_string),
        link: format!("https://example.com/{id}"),
        image_url: None,
        bedrooms: None,
        bathrooms: None,
        description: None,
        status: PropertyStatus::New,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        seller_name: None,
        days_on_market: None,
        listed_total_area: None,
        covered_area: covered,
        uncovered_area: None,
        balcony_area: None,
        views: None,
        latitude: None,
        longitude: None,
        metrics: PropertyMetrics::default(),
    }
}

pub fn profile(id: &str, role: Role) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        role,
    }
}

pub fn session(id: &str) -> Session {
    Session {
        user_id: id.to_string(),
        email: format!("{id}@example.com"),
        access_token: format!("token-{id}"),
    }
}

fn failure() -> StoreError {
    StoreError::Api {
        status: 500,
        message: "boom".to_string(),
    }
}

/// In-memory stand-in for the hosted backend
#[derive(Default)]
pub struct FakeStore {
    pub properties: Mutex<Vec<Property>>,
    pub profiles: Mutex<Vec<UserProfile>>,
    pub owners: Mutex<Vec<Owner>>,
    pub status_updates: Mutex<Vec<(String, PropertyStatus)>>,
    pub fail_fetch: AtomicBool,
    pub fail_updates: AtomicBool,
    pub fail_profiles: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub profile_delay: Mutex<Option<Duration>>,
}

impl FakeStore {
    pub fn with_properties(properties: Vec<Property>) -> Self {
        let store = Self::default();
        *store.properties.lock().unwrap() = properties;
        store
    }

    pub fn push_property(&self, property: Property) {
        self.properties.lock().unwrap().push(property);
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataStore for FakeStore {
    async fn fetch_properties(&self) -> Result<Vec<Property>, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(self.properties.lock().unwrap().clone())
    }

    async fn update_property_status(
        &self,
        property_id: &str,
        status: PropertyStatus,
    ) -> Result<(), StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(failure());
        }
        self.status_updates
            .lock()
            .unwrap()
            .push((property_id.to_string(), status));
        let mut properties = self.properties.lock().unwrap();
        match properties.iter_mut().find(|p| p.id == property_id) {
            Some(p) => {
                p.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                table: "propiedades",
                id: property_id.to_string(),
            }),
        }
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let delay = *self.profile_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_profiles.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 403,
                message: "permission denied for table profiles".to_string(),
            });
        }
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == user_id)
            .cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.profiles.lock().unwrap().clone())
    }

    async fn update_profile_role(
        &self,
        user_id: &str,
        role: Role,
    ) -> Result<UserProfile, StoreError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == user_id)
            .ok_or_else(|| StoreError::NotFound {
                table: "profiles",
                id: user_id.to_string(),
            })?;
        profile.role = role;
        Ok(profile.clone())
    }

    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError> {
        Ok(self.owners.lock().unwrap().clone())
    }

    async fn create_owner(&self, owner: &NewOwner) -> Result<Owner, StoreError> {
        let mut owners = self.owners.lock().unwrap();
        let created = Owner {
            id: format!("owner-{}", owners.len() + 1),
            created_at: Utc::now(),
            name: owner.name.clone(),
            email: owner.email.clone(),
            phone: owner.phone.clone(),
            property_address: owner.property_address.clone(),
            status: owner.status,
            notes: owner.notes.clone(),
            visit_date: owner.visit_date.clone(),
            appraisal_value: owner.appraisal_value,
        };
        owners.insert(0, created.clone());
        Ok(created)
    }

    async fn update_owner(
        &self,
        owner_id: &str,
        update: &OwnerUpdate,
    ) -> Result<Owner, StoreError> {
        let mut owners = self.owners.lock().unwrap();
        let owner = owners
            .iter_mut()
            .find(|o| o.id == owner_id)
            .ok_or_else(|| StoreError::NotFound {
                table: "propietarios",
                id: owner_id.to_string(),
            })?;
        if let Some(status) = update.status {
            owner.status = status;
        }
        if let Some(value) = update.appraisal_value {
            owner.appraisal_value = Some(value);
        }
        if let Some(notes) = &update.notes {
            owner.notes = Some(notes.clone());
        }
        Ok(owner.clone())
    }

    async fn delete_owner(&self, owner_id: &str) -> Result<(), StoreError> {
        let mut owners = self.owners.lock().unwrap();
        let before = owners.len();
        owners.retain(|o| o.id != owner_id);
        if owners.len() == before {
            return Err(StoreError::NotFound {
                table: "propietarios",
                id: owner_id.to_string(),
            });
        }
        Ok(())
    }
}

/// Auth provider that records sign-outs
#[derive(Default)]
pub struct FakeAuth {
    pub signed_out: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl AuthGateway for FakeAuth {
    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        self.signed_out.lock().unwrap().push(session.user_id.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(AuthError::Api {
                status: 500,
                message: "logout failed".to_string(),
            });
        }
        Ok(())
    }
}
