use chrono::Utc;
use reelguess_client::CancelScope;
use reelguess_engine::{
    censor_title, format_rating, group_crew_by_department, join_genre_names, sort_cast_by_order,
};
use reelguess_types::{CastMember, Credits, CrewMember, Entity, EntityKey, GuessState, GuessStatus};
use serde::Serialize;
use std::collections::BTreeMap;

use super::genre::cached_genres;
use super::{GuessActions, GuessOutcome, as_display, shown_answer};
use crate::Result;
use crate::services::Services;

/// What the title screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleDetail {
    #[serde(serialize_with = "as_display")]
    pub key: EntityKey,
    /// The answer, or `?` per character while it is hidden
    pub title: String,
    pub status: GuessStatus,
    /// Title occurrences are censored while the answer is hidden
    pub overview: String,
    pub genres: String,
    pub year: Option<i32>,
    pub rating: String,
    pub poster_path: Option<String>,
    /// Initials hint, once the player has asked for it
    pub hint: Option<String>,
    pub favorite: bool,
    pub watchlist: bool,
}

impl TitleDetail {
    fn build(entity: &Entity, state: &GuessState, genres: String) -> Self {
        let answer = entity.display_name();
        let overview = if state.answer_visible() {
            entity.overview().to_string()
        } else {
            censor_title(entity.overview(), answer)
        };
        Self {
            key: entity.key(),
            title: shown_answer(answer, state),
            status: state.status(),
            overview,
            genres,
            year: entity.release_year(),
            rating: format_rating(entity.vote_average().unwrap_or_default()),
            poster_path: entity.poster_path().map(str::to_string),
            hint: state
                .hint_shown
                .then(|| reelguess_engine::hint_mask(answer)),
            favorite: state.favorite,
            watchlist: state.watchlist,
        }
    }
}

/// Cast in billing order and crew keyed by department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleCredits {
    pub cast: Vec<CastMember>,
    pub crew: BTreeMap<String, Vec<CrewMember>>,
}

/// Title screen for one movie or TV show.
pub struct DetailPresenter {
    entity: Entity,
    actions: GuessActions,
    scope: CancelScope,
}

impl DetailPresenter {
    /// Open the screen for an entity the caller already has, typically a grid
    /// cell. Records the visit and the entity's genres locally.
    pub fn open(services: Services, entity: Entity) -> Result<Self> {
        Self::open_in(services, entity, CancelScope::new())
    }

    /// Open the screen by key, fetching the full record first.
    pub async fn open_key(services: Services, key: EntityKey) -> Result<Self> {
        let scope = CancelScope::new();
        let entity = services.api.details(key, &scope).await?;
        Self::open_in(services, entity, scope)
    }

    fn open_in(services: Services, entity: Entity, scope: CancelScope) -> Result<Self> {
        let key = entity.key();
        let store = &services.store;
        store.fetch_or_create(key, Some(entity.display_name()), entity.poster_path())?;
        store.touch_viewed(key, Utc::now())?;

        let genre_ids = entity.genre_ids();
        if !genre_ids.is_empty() {
            store.set_entity_genres(key, &genre_ids)?;
        }

        let actions = GuessActions {
            services,
            key,
            answer: entity.display_name().to_string(),
        };
        Ok(Self {
            entity,
            actions,
            scope,
        })
    }

    pub fn key(&self) -> EntityKey {
        self.actions.key
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn scope(&self) -> &CancelScope {
        &self.scope
    }

    pub async fn view(&self) -> Result<TitleDetail> {
        let state = self.actions.state()?;
        let genres = self.genre_line().await?;
        Ok(TitleDetail::build(&self.entity, &state, genres))
    }

    /// Genre names from the local junction, falling back to the global list
    /// when the junction is missing some ids. A failed genre fetch leaves the
    /// line short rather than failing the screen.
    async fn genre_line(&self) -> Result<String> {
        let ids = self.entity.genre_ids();
        if ids.is_empty() {
            return Ok(String::new());
        }

        let services = &self.actions.services;
        let known = services.store.entity_genres(self.key())?;
        if ids.iter().all(|id| known.iter().any(|genre| genre.id == *id)) {
            return Ok(join_genre_names(&ids, &known));
        }

        let kind = self.entity.kind();
        match cached_genres(services, kind, &self.scope, Utc::now()).await {
            Ok(genres) => Ok(join_genre_names(&ids, &genres)),
            Err(err) if err.is_cancelled() => Err(err),
            Err(err) => {
                tracing::warn!(key = %self.key(), error = %err, "genre list unavailable");
                Ok(join_genre_names(&ids, &known))
            }
        }
    }

    /// Cast and crew, read from the store when present and fetched once
    /// otherwise.
    pub async fn credits(&self) -> Result<TitleCredits> {
        let credits = self.load_credits().await?;
        Ok(TitleCredits {
            crew: group_crew_by_department(&credits.crew),
            cast: sort_cast_by_order(credits.cast),
        })
    }

    async fn load_credits(&self) -> Result<Credits> {
        let services = &self.actions.services;
        let key = self.key();
        if let Some(cached) = services.store.credits::<Credits>(key)? {
            tracing::debug!(%key, "credits cache hit");
            return Ok(cached);
        }

        let credits = services.api.credits(key, &self.scope).await?;
        services.store.store_credits(key, &credits, Utc::now())?;
        Ok(credits)
    }

    pub fn reveal(&self) -> Result<GuessStatus> {
        self.actions.reveal()
    }

    /// Needs the `upgraded` entitlement. Returns the initials hint.
    pub fn show_hint(&self) -> Result<String> {
        self.actions.show_hint()
    }

    pub fn guess(&self, text: &str) -> Result<GuessOutcome> {
        self.actions.guess(text)
    }

    pub fn toggle_favorite(&self) -> Result<bool> {
        self.actions.toggle_favorite()
    }

    pub fn toggle_watchlist(&self) -> Result<bool> {
        self.actions.toggle_watchlist()
    }

    pub fn close(&self) {
        self.scope.cancel();
    }
}

impl Drop for DetailPresenter {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
