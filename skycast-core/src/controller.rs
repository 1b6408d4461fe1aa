//! Session state and the wiring between user actions, the provider, and
//! the favorites store.

use tracing::warn;

use crate::{
    favorites::{self, FavoritesStore},
    model::{FavoriteLocation, WeatherSnapshot},
    provider::WeatherProvider,
};

/// Message shown for any failed lookup, regardless of cause.
const FETCH_ERROR_MESSAGE: &str = "Could not fetch weather data. Please try again.";

/// Lifecycle of the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Owns the current query, the last snapshot or error, and the favorites
/// list.
///
/// `search` takes `&mut self`, so lookups are serialised: a second search
/// cannot start while one is in flight and a stale response can never
/// overwrite a newer one.
#[derive(Debug)]
pub struct WeatherApp {
    provider: Box<dyn WeatherProvider>,
    store: FavoritesStore,
    favorites: Vec<FavoriteLocation>,
    query: String,
    snapshot: Option<WeatherSnapshot>,
    error: Option<String>,
    status: FetchStatus,
}

impl WeatherApp {
    /// Loads the persisted favorites once, at construction.
    pub fn new(provider: Box<dyn WeatherProvider>, store: FavoritesStore) -> Self {
        let favorites = store.load();
        Self {
            provider,
            store,
            favorites,
            query: String::new(),
            snapshot: None,
            error: None,
            status: FetchStatus::Idle,
        }
    }

    /// Look up `city` and replace the displayed state with the outcome.
    ///
    /// On failure the snapshot is cleared and a generic message is set; the
    /// caller re-invokes to retry.
    pub async fn search(&mut self, city: &str) {
        self.status = FetchStatus::Loading;
        self.error = None;

        match self.provider.fetch_weather(city).await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.status = FetchStatus::Success;
            }
            Err(e) => {
                warn!(city, error = %e, "weather lookup failed");
                self.snapshot = None;
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
                self.status = FetchStatus::Failed;
            }
        }
    }

    /// Bookmark `city`, or drop the bookmark if it already exists, then
    /// write the list through to storage.
    pub fn toggle_favorite(&mut self, city: &str) {
        self.favorites = favorites::toggle(city, &self.favorites);
        if let Err(e) = self.store.persist(&self.favorites) {
            warn!(error = %e, "failed to persist favorites");
        }
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorites.iter().any(|fav| fav.name == city)
    }

    /// Jump to a bookmarked city: adopt it as the query and search.
    pub async fn select_favorite(&mut self, name: &str) {
        self.query = name.to_string();
        self.search(name).await;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn favorites(&self) -> &[FavoriteLocation] {
        &self.favorites
    }
}
