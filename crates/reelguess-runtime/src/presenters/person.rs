use chrono::Utc;
use reelguess_client::CancelScope;
use reelguess_engine::{CrewJobGroups, group_crew_by_job, hint_mask, sort_person_credits};
use reelguess_types::{Entity, EntityKey, GuessStatus, Person, PersonCastCredit, PersonCredits};
use serde::Serialize;
use std::collections::HashSet;

use super::{GuessActions, GuessOutcome, as_display, shown_answer};
use crate::services::Services;
use crate::{Error, Result};

const KNOWN_FOR_LIMIT: usize = 3;

/// What the person screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonDetail {
    #[serde(serialize_with = "as_display")]
    pub key: EntityKey,
    /// The name, or `?` per character while it is hidden
    pub name: String,
    pub status: GuessStatus,
    pub department: Option<String>,
    pub known_for: Vec<String>,
    pub profile_path: Option<String>,
    pub hint: Option<String>,
    pub favorite: bool,
    pub watchlist: bool,
}

/// Acting credits newest first, plus the three crew buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonCreditsView {
    pub acting: Vec<PersonCastCredit>,
    pub crew: CrewJobGroups,
}

/// Person screen.
pub struct PersonPresenter {
    person: Person,
    actions: GuessActions,
    scope: CancelScope,
}

impl PersonPresenter {
    pub fn open(services: Services, person: Person) -> Result<Self> {
        Self::open_in(services, person, CancelScope::new())
    }

    /// Open by id, fetching the person record first.
    pub async fn open_id(services: Services, id: u64) -> Result<Self> {
        let key = EntityKey::person(id);
        let scope = CancelScope::new();
        match services.api.details(key, &scope).await? {
            Entity::Person(person) => Self::open_in(services, person, scope),
            _ => Err(Error::NotFound(key)),
        }
    }

    fn open_in(services: Services, person: Person, scope: CancelScope) -> Result<Self> {
        let key = EntityKey::person(person.id);
        let store = &services.store;
        store.fetch_or_create(key, Some(&person.name), person.profile_path.as_deref())?;
        store.touch_viewed(key, Utc::now())?;

        let actions = GuessActions {
            services,
            key,
            answer: person.name.clone(),
        };
        Ok(Self {
            person,
            actions,
            scope,
        })
    }

    pub fn key(&self) -> EntityKey {
        self.actions.key
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn scope(&self) -> &CancelScope {
        &self.scope
    }

    pub async fn view(&self) -> Result<PersonDetail> {
        let state = self.actions.state()?;
        let known_for = self.known_for_titles().await?;
        Ok(PersonDetail {
            key: self.key(),
            name: shown_answer(&self.person.name, &state),
            status: state.status(),
            department: self.person.known_for_department.clone(),
            known_for,
            profile_path: self.person.profile_path.clone(),
            hint: state.hint_shown.then(|| hint_mask(&self.person.name)),
            favorite: state.favorite,
            watchlist: state.watchlist,
        })
    }

    /// Titles the person is known for. The popular-people listing carries
    /// them; a person opened by id falls back to their best-rated acting
    /// credits.
    pub async fn known_for_titles(&self) -> Result<Vec<String>> {
        if !self.person.known_for.is_empty() {
            return Ok(self
                .person
                .known_for
                .iter()
                .map(|title| title.title().to_string())
                .collect());
        }

        let mut cast = self.load_credits().await?.cast;
        cast.sort_by(|a, b| b.title.vote_average.total_cmp(&a.title.vote_average));

        let mut seen = HashSet::new();
        Ok(cast
            .iter()
            .filter(|credit| seen.insert(credit.title.key()))
            .map(|credit| credit.title.display_title().to_string())
            .take(KNOWN_FOR_LIMIT)
            .collect())
    }

    pub async fn credits(&self) -> Result<PersonCreditsView> {
        let credits = self.load_credits().await?;
        Ok(PersonCreditsView {
            crew: group_crew_by_job(&credits.crew),
            acting: sort_person_credits(credits.cast),
        })
    }

    /// Director, Writer and Producer credits.
    pub async fn crew_by_job(&self) -> Result<CrewJobGroups> {
        Ok(group_crew_by_job(&self.load_credits().await?.crew))
    }

    async fn load_credits(&self) -> Result<PersonCredits> {
        let services = &self.actions.services;
        let key = self.key();
        if let Some(cached) = services.store.credits::<PersonCredits>(key)? {
            tracing::debug!(%key, "credits cache hit");
            return Ok(cached);
        }

        let credits = services.api.person_credits(self.person.id, &self.scope).await?;
        services.store.store_credits(key, &credits, Utc::now())?;
        Ok(credits)
    }

    pub fn reveal(&self) -> Result<GuessStatus> {
        self.actions.reveal()
    }

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

impl Drop for PersonPresenter {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
