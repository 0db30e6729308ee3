//! Storefront facade
//!
//! Wires the backend contracts, identity provider and configuration
//! together and applies the per-screen session rules:
//! - Home and VIP screens render for everyone
//! - Player, my list and profile need a session, otherwise `Login`
//! - Admin console needs an admin, otherwise `Login` or `Home`

use crate::account::ProfileView;
use crate::admin::{check_access, AdminAccess, AdminConsole};
use crate::config::StorefrontConfig;
use crate::error::{AuthError, StorefrontResult};
use crate::home::{load_home, CategoryFilter, HomeFeed};
use crate::identity::{AuthUser, IdentityProvider, LocalIdentityProvider, Session};
use crate::my_list::load_my_list;
use crate::navigation::{Outcome, Route};
use crate::player::{PlayerService, PlayerView};
use crate::profile::load_viewer;
use crate::vip::{load_vip_page, VipPage};
use chrono::Utc;
use reel_entitlement::{EntitlementDecision, EntitlementPolicy, Viewer};
use reel_store::{
    CatalogProvider, Episode, ListStore, MemoryBackend, ProfileStore, Series, SeriesId,
    UserProfile,
};
use serde::Serialize;
use std::sync::Arc;

/// Backend contract implementations
#[derive(Clone)]
pub struct Backends {
    pub catalog: Arc<dyn CatalogProvider>,
    pub profiles: Arc<dyn ProfileStore>,
    pub lists: Arc<dyn ListStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl Backends {
    /// All store contracts served by one in-memory backend
    #[must_use]
    pub fn memory(backend: Arc<MemoryBackend>) -> Self {
        Self {
            catalog: backend.clone(),
            profiles: backend.clone(),
            lists: backend,
            identity: Arc::new(LocalIdentityProvider::new()),
        }
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends").finish_non_exhaustive()
    }
}

/// Session plus the screen to land on after authenticating
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedIn {
    pub session: Session,
    pub landing: Route,
}

/// The storefront
#[derive(Debug, Clone)]
pub struct Storefront {
    backends: Backends,
    config: StorefrontConfig,
}

impl Storefront {
    #[must_use]
    pub fn new(config: StorefrontConfig, backends: Backends) -> Self {
        Self { backends, config }
    }

    /// Storefront over an empty in-memory backend with the standard plans
    #[must_use]
    pub fn in_memory(config: StorefrontConfig) -> Self {
        Self::with_memory_backend(config, Arc::new(MemoryBackend::with_default_plans()))
    }

    /// Storefront over an existing in-memory backend
    #[must_use]
    pub fn with_memory_backend(config: StorefrontConfig, backend: Arc<MemoryBackend>) -> Self {
        Self::new(config, Backends::memory(backend))
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> EntitlementPolicy {
        self.config.entitlement
    }

    #[inline]
    #[must_use]
    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    /// Gate decision under the configured policy
    #[inline]
    #[must_use]
    pub fn evaluate(&self, viewer: &Viewer, episode: &Episode) -> EntitlementDecision {
        self.config.entitlement.evaluate(viewer, episode)
    }

    // --- sessions ---

    /// Register, create the profile row and sign in
    ///
    /// When the profile row cannot be written the new session is closed
    /// before the error is returned.
    ///
    /// # Errors
    /// Credential validation, duplicate email or store failures
    pub async fn sign_up(&self, email: &str, password: &str) -> StorefrontResult<SignedIn> {
        let session = self.backends.identity.sign_up(email, password).await?;
        if let Err(e) = self
            .backends
            .profiles
            .insert_profile(UserProfile::new(session.user.id, session.user.email.clone()))
            .await
        {
            tracing::warn!(user_id = %session.user.id, error = %e, "Profile insert failed after sign-up");
            if let Err(close) = self.backends.identity.sign_out(&session).await {
                tracing::warn!(user_id = %session.user.id, error = %close, "Could not close session");
            }
            return Err(e.into());
        }
        let landing = self.landing_for(&session.user).await;
        Ok(SignedIn { session, landing })
    }

    /// Sign in; admins land on the admin panel, everyone else on home
    ///
    /// # Errors
    /// `AuthError::InvalidCredentials` or identity provider failures
    pub async fn sign_in(&self, email: &str, password: &str) -> StorefrontResult<SignedIn> {
        let session = self.backends.identity.sign_in(email, password).await?;
        let landing = self.landing_for(&session.user).await;
        tracing::info!(user_id = %session.user.id, landing = %landing, "Signed in");
        Ok(SignedIn { session, landing })
    }

    /// Sign out and return to the login screen
    ///
    /// # Errors
    /// Identity provider failures
    pub async fn sign_out(&self, session: &Session) -> StorefrontResult<Route> {
        self.backends.identity.sign_out(session).await?;
        Ok(Route::Login)
    }

    /// Account behind an optional session; expired sessions resolve to `None`
    ///
    /// # Errors
    /// Identity provider failures other than an expired session
    pub async fn authenticate(&self, session: Option<&Session>) -> StorefrontResult<Option<AuthUser>> {
        let Some(session) = session else {
            return Ok(None);
        };
        match self.backends.identity.current_user(session).await {
            Ok(user) => Ok(Some(user)),
            Err(AuthError::SessionExpired) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn landing_for(&self, user: &AuthUser) -> Route {
        match self.backends.profiles.profile(user.id).await {
            Ok(Some(profile)) if profile.is_admin() => Route::AdminPanel,
            Ok(_) => Route::Home,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Profile fetch failed after sign-in");
                Route::Home
            }
        }
    }

    async fn viewer_for(&self, session: Option<&Session>) -> StorefrontResult<Option<(AuthUser, Viewer, Option<UserProfile>)>> {
        let Some(user) = self.authenticate(session).await? else {
            return Ok(None);
        };
        let (viewer, profile) = load_viewer(self.backends.profiles.as_ref(), user.id, Utc::now()).await;
        Ok(Some((user, viewer, profile)))
    }

    fn player_service(&self) -> PlayerService<'_> {
        PlayerService {
            catalog: self.backends.catalog.as_ref(),
            profiles: self.backends.profiles.as_ref(),
            lists: self.backends.lists.as_ref(),
            policy: self.policy(),
            config: &self.config.player,
        }
    }

    // --- screens ---

    /// Home feed for a category chip
    ///
    /// # Errors
    /// Store failures
    pub async fn home(&self, filter: CategoryFilter) -> StorefrontResult<HomeFeed> {
        load_home(self.backends.catalog.as_ref(), &self.config.home, filter).await
    }

    /// Player for a series
    ///
    /// # Errors
    /// Store failures reading the series or its episodes
    pub async fn player(
        &self,
        session: Option<&Session>,
        series_id: SeriesId,
    ) -> StorefrontResult<Outcome<PlayerView>> {
        let Some(user) = self.authenticate(session).await? else {
            return Ok(Outcome::Redirect(Route::Login));
        };
        let view = self.player_service().open(user.id, series_id, Utc::now()).await?;
        Ok(Outcome::Render(view))
    }

    /// Add or remove a series from my list; renders the new bookmark state
    ///
    /// # Errors
    /// Store failures, including an unknown series
    pub async fn toggle_bookmark(
        &self,
        session: Option<&Session>,
        series_id: SeriesId,
    ) -> StorefrontResult<Outcome<bool>> {
        let Some(user) = self.authenticate(session).await? else {
            return Ok(Outcome::Redirect(Route::Login));
        };
        let state = self.player_service().toggle_bookmark(user.id, series_id).await?;
        Ok(Outcome::Render(state))
    }

    /// Bookmarked series
    ///
    /// # Errors
    /// Store failures
    pub async fn my_list(&self, session: Option<&Session>) -> StorefrontResult<Outcome<Vec<Series>>> {
        let Some(user) = self.authenticate(session).await? else {
            return Ok(Outcome::Redirect(Route::Login));
        };
        let series = load_my_list(
            self.backends.catalog.as_ref(),
            self.backends.lists.as_ref(),
            user.id,
        )
        .await?;
        Ok(Outcome::Render(series))
    }

    /// VIP plans, with the viewer's state when signed in
    ///
    /// # Errors
    /// Store failures reading plans
    pub async fn vip_page(&self, session: Option<&Session>) -> StorefrontResult<VipPage> {
        let viewer = self.viewer_for(session).await?.map(|(_, viewer, _)| viewer);
        load_vip_page(self.backends.catalog.as_ref(), viewer).await
    }

    /// Profile screen
    ///
    /// # Errors
    /// Identity provider failures
    pub async fn profile(&self, session: Option<&Session>) -> StorefrontResult<Outcome<ProfileView>> {
        let Some((user, viewer, profile)) = self.viewer_for(session).await? else {
            return Ok(Outcome::Redirect(Route::Login));
        };
        Ok(Outcome::Render(ProfileView::new(&user.email, &viewer, profile.as_ref())))
    }

    /// Admin console
    ///
    /// # Errors
    /// Identity provider failures
    pub async fn admin(&self, session: Option<&Session>) -> StorefrontResult<Outcome<AdminConsole<'_>>> {
        let Some(user) = self.authenticate(session).await? else {
            return Ok(Outcome::Redirect(Route::Login));
        };
        match check_access(&self.config.admin, self.backends.profiles.as_ref(), &user).await {
            AdminAccess::Granted => Ok(Outcome::Render(AdminConsole::new(
                self.backends.catalog.as_ref(),
                self.backends.profiles.as_ref(),
                user,
            ))),
            AdminAccess::Denied => {
                tracing::debug!(user_id = %user.id, "Admin console denied");
                Ok(Outcome::Redirect(Route::Home))
            }
        }
    }
}
