//! In-memory dashboard state.
//!
//! One `Dashboard` per signed-in user. Every mutation goes through `&mut self`,
//! so there is a single writer, and every change to the property set re-runs
//! the scoring pipeline in full.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::access::{can_access, View};
use crate::commands::StatusChange;
use crate::config::{Config, DEFAULT_LISTING_PORTAL};
use crate::error::{DashboardError, ScrapeError};
use crate::filters::Filters;
use crate::metrics::PipelineMetrics;
use crate::models::{NewOwner, Owner, OwnerUpdate, Property, PropertyStatus, Role, UserProfile};
use crate::scoring::{ranked_opportunities, score, zone_summaries, ZoneSummary};
use crate::scrapers::{build_payload, ScrapeTrigger, ScraperConfig};
use crate::store::DataStore;

pub const LOAD_ERROR_MESSAGE: &str = "No se pudieron cargar las propiedades desde la base de datos.";

pub struct Dashboard {
    store: Arc<dyn DataStore>,
    user: UserProfile,
    properties: Vec<Property>,
    scored: Vec<Property>,
    error: Option<String>,
    filters: Filters,
    view: View,
    selected: Option<String>,
    listing_portal_url: String,
    refetch_delay: Duration,
}

impl Dashboard {
    pub fn new(store: Arc<dyn DataStore>, user: UserProfile) -> Self {
        Self {
            store,
            user,
            properties: Vec::new(),
            scored: Vec::new(),
            error: None,
            filters: Filters::default(),
            view: View::default(),
            selected: None,
            listing_portal_url: DEFAULT_LISTING_PORTAL.to_string(),
            refetch_delay: Duration::from_secs(1),
        }
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.listing_portal_url = config.listing_portal_url.clone();
        self.refetch_delay = config.refetch_delay;
        self
    }

    pub fn with_refetch_delay(mut self, delay: Duration) -> Self {
        self.refetch_delay = delay;
        self
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) -> Result<(), DashboardError> {
        self.require(view)?;
        self.view = view;
        Ok(())
    }

    fn require(&self, view: View) -> Result<(), DashboardError> {
        if can_access(self.user.role, view) {
            Ok(())
        } else {
            warn!("{} tried to open {:?}", self.user.email, view);
            Err(DashboardError::Forbidden(view))
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
    }

    pub fn reset_filters(&mut self) {
        self.filters = Filters::default();
    }

    /// Banner text for the last failed load, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Properties as last fetched, without metrics.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Properties with derived metrics.
    pub fn scored(&self) -> &[Property] {
        &self.scored
    }

    /// Scored properties passing the current filters in the current view.
    pub fn filtered(&self) -> Vec<&Property> {
        self.filters.apply(&self.scored, self.view)
    }

    pub fn opportunities(&self) -> Vec<&Property> {
        ranked_opportunities(&self.scored)
    }

    pub fn zone_summaries(&self) -> Vec<ZoneSummary> {
        zone_summaries(&self.scored)
    }

    pub fn metrics(&self) -> PipelineMetrics {
        PipelineMetrics::from_scored(&self.scored)
    }

    /// Distinct zones present in the current set, sorted.
    pub fn zones(&self) -> Vec<&str> {
        let mut zones: Vec<&str> = self.properties.iter().filter_map(Property::zone).collect();
        zones.sort_unstable();
        zones.dedup();
        zones
    }

    pub fn select_property(&mut self, property_id: Option<&str>) {
        self.selected = property_id.map(str::to_string);
    }

    pub fn selected_property(&self) -> Option<&Property> {
        let id = self.selected.as_deref()?;
        self.scored.iter().find(|p| p.id == id)
    }

    fn rescore(&mut self) {
        self.scored = score(&self.properties);
    }

    /// Refetch the property set.
    ///
    /// On failure the previous set stays in place and a banner is raised.
    pub async fn load_properties(&mut self) -> Result<(), DashboardError> {
        self.error = None;

        let result = self.store.fetch_properties().await;
        match result {
            Ok(properties) => {
                info!("Loaded {} properties", properties.len());
                self.properties = properties;
                self.rescore();
                Ok(())
            }
            Err(e) => {
                error!("Property load failed: {}", e);
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                Err(e.into())
            }
        }
    }

    /// Optimistically apply a status edit. The returned change must be passed
    /// to [`Self::persist_status_change`].
    pub fn begin_status_change(
        &mut self,
        property_id: &str,
        status: PropertyStatus,
    ) -> Result<StatusChange, DashboardError> {
        let change = StatusChange::apply(&mut self.properties, property_id, status)
            .ok_or_else(|| DashboardError::PropertyNotFound(property_id.to_string()))?;
        self.rescore();
        Ok(change)
    }

    /// Persist a change started with [`Self::begin_status_change`]. If the
    /// store rejects it, only the edited property reverts, and only if nothing
    /// has overwritten it since.
    pub async fn persist_status_change(&mut self, change: StatusChange) -> Result<(), DashboardError> {
        let result = self
            .store
            .update_property_status(change.property_id(), change.status())
            .await;

        match result {
            Ok(()) => {
                info!("Property {} is now {}", change.property_id(), change.status());
                Ok(())
            }
            Err(source) => {
                error!("Status update for {} failed: {}", change.property_id(), source);
                let property_id = change.property_id().to_string();
                if change.rollback(&mut self.properties) {
                    self.rescore();
                }
                Err(DashboardError::StatusUpdateFailed {
                    property_id,
                    source,
                })
            }
        }
    }

    pub async fn update_property_status(
        &mut self,
        property_id: &str,
        status: PropertyStatus,
    ) -> Result<(), DashboardError> {
        let change = self.begin_status_change(property_id, status)?;
        self.persist_status_change(change).await
    }

    /// Create a CRM lead from a snapshot of a loaded property.
    pub async fn add_to_crm(
        &self,
        property_id: &str,
        owner_name: Option<String>,
    ) -> Result<Owner, DashboardError> {
        self.require(View::Crm)?;
        let property = self
            .properties
            .iter()
            .find(|p| p.id == property_id)
            .ok_or_else(|| DashboardError::PropertyNotFound(property_id.to_string()))?;

        let owner = self
            .store
            .create_owner(&NewOwner::from_property(property, owner_name))
            .await?;
        info!("Property {} added to CRM as lead {}", property_id, owner.id);
        Ok(owner)
    }

    pub async fn owners(&self) -> Result<Vec<Owner>, DashboardError> {
        self.require(View::Crm)?;
        Ok(self.store.list_owners().await?)
    }

    pub async fn create_owner(&self, owner: &NewOwner) -> Result<Owner, DashboardError> {
        self.require(View::Crm)?;
        Ok(self.store.create_owner(owner).await?)
    }

    pub async fn update_owner(
        &self,
        owner_id: &str,
        update: &OwnerUpdate,
    ) -> Result<Owner, DashboardError> {
        self.require(View::Crm)?;
        Ok(self.store.update_owner(owner_id, update).await?)
    }

    pub async fn delete_owner(&self, owner_id: &str) -> Result<(), DashboardError> {
        self.require(View::Crm)?;
        Ok(self.store.delete_owner(owner_id).await?)
    }

    pub async fn profiles(&self) -> Result<Vec<UserProfile>, DashboardError> {
        self.require(View::UserManagement)?;
        Ok(self.store.list_profiles().await?)
    }

    pub async fn set_role(&self, user_id: &str, role: Role) -> Result<UserProfile, DashboardError> {
        self.require(View::UserManagement)?;
        Ok(self.store.update_profile_role(user_id, role).await?)
    }

    /// Trigger a scraper for the chosen zones, then reload after the refetch
    /// delay.
    ///
    /// The delay is not tied to the workflow actually finishing its writes, so
    /// the reload may miss listings that land later. The reload happens even
    /// when the trigger fails; the trigger's result is returned.
    pub async fn run_scraping_cycle(
        &mut self,
        trigger: &dyn ScrapeTrigger,
        scraper: &ScraperConfig,
        zones: &[String],
    ) -> Result<(), ScrapeError> {
        let payload = build_payload(scraper, zones, &self.listing_portal_url);
        let outcome = trigger.trigger(scraper, &payload).await;
        if let Err(e) = &outcome {
            warn!("Scraping with {} failed: {}", scraper.name, e);
        }

        tokio::time::sleep(self.refetch_delay).await;
        if self.load_properties().await.is_err() {
            warn!("Reload after scraping failed; keeping previous listings");
        }

        outcome
    }
}
