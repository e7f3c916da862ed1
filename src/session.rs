use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::access::{can_access, View};
use crate::error::SessionError;
use crate::models::UserProfile;
use crate::store::{AuthGateway, DataStore};

/// Identity handed over by the auth provider after sign-in
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No auth event seen yet
    Loading,
    Unauthenticated,
    Authenticated {
        session: Session,
        profile: UserProfile,
    },
}

/// Turns auth events into a resolved user.
///
/// A session whose profile cannot be resolved is signed out; there is no
/// guest mode.
pub struct SessionProvider {
    store: Arc<dyn DataStore>,
    auth: Arc<dyn AuthGateway>,
    profile_timeout: Duration,
    state: SessionState,
}

impl SessionProvider {
    pub fn new(
        store: Arc<dyn DataStore>,
        auth: Arc<dyn AuthGateway>,
        profile_timeout: Duration,
    ) -> Self {
        Self {
            store,
            auth,
            profile_timeout,
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Loading
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match &self.state {
            SessionState::Authenticated { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn can_access(&self, view: View) -> bool {
        self.user().is_some_and(|user| can_access(user.role, view))
    }

    pub async fn handle(&mut self, event: AuthEvent) -> &SessionState {
        match event {
            AuthEvent::SignedOut => {
                info!("Session ended");
                self.state = SessionState::Unauthenticated;
            }
            AuthEvent::SignedIn(session) => match self.resolve_profile(&session).await {
                Ok(profile) => {
                    info!("Signed in {} as {:?}", profile.email, profile.role);
                    self.state = SessionState::Authenticated { session, profile };
                }
                Err(e) => {
                    error!("Could not resolve profile for {}: {}", session.email, e);
                    if let Err(sign_out_error) = self.auth.sign_out(&session).await {
                        error!("Error during cleanup sign out: {}", sign_out_error);
                    }
                    self.state = SessionState::Unauthenticated;
                }
            },
        }
        &self.state
    }

    async fn resolve_profile(&self, session: &Session) -> Result<UserProfile, SessionError> {
        let lookup = self.store.fetch_profile(&session.user_id);
        let profile = tokio::time::timeout(self.profile_timeout, lookup)
            .await
            .map_err(|_| SessionError::Timeout(self.profile_timeout))??
            .ok_or_else(|| SessionError::ProfileMissing {
                email: session.email.clone(),
            })?;

        Ok(UserProfile {
            id: session.user_id.clone(),
            email: session.email.clone(),
            role: profile.role,
        })
    }
}
