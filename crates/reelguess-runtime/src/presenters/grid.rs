use reelguess_client::CancelScope;
use reelguess_engine::{dedupe_by_key, filter_with_posters, hide_revealed};
use reelguess_index::ShadowRecord;
use reelguess_types::{Entity, EntityKey, GuessState, GuessStatus, MediaKind, Page};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::as_display;
use crate::Result;
use crate::services::Services;

const RECENT_LIMIT: usize = 50;

/// What a grid screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Popular titles, optionally for one genre
    Discover {
        kind: MediaKind,
        genre: Option<u64>,
    },
    PopularPeople,
    Search {
        kind: MediaKind,
        query: String,
    },
    /// Store-only grids
    Favorites(Option<MediaKind>),
    Watchlist(Option<MediaKind>),
    RecentlyViewed,
}

impl Category {
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Category::Discover { .. } | Category::PopularPeople | Category::Search { .. }
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind_suffix = |kind: &Option<MediaKind>| match kind {
            Some(kind) => format!(" ({})", kind),
            None => String::new(),
        };
        match self {
            Category::Discover { kind, genre: None } => write!(f, "Discover {}", kind),
            Category::Discover {
                kind,
                genre: Some(genre),
            } => write!(f, "Discover {} (genre {})", kind, genre),
            Category::PopularPeople => write!(f, "Popular people"),
            Category::Search { kind, query } => write!(f, "Search {} \"{}\"", kind, query),
            Category::Favorites(kind) => write!(f, "Favorites{}", kind_suffix(kind)),
            Category::Watchlist(kind) => write!(f, "Watchlist{}", kind_suffix(kind)),
            Category::RecentlyViewed => write!(f, "Recently viewed"),
        }
    }
}

/// Display options for remote grids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridOptions {
    /// Leave out entities whose answer is already visible
    pub hide_revealed: bool,
}

/// One poster cell. The answer text is only present once the player has
/// revealed or guessed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridItem {
    #[serde(serialize_with = "as_display")]
    pub key: EntityKey,
    pub poster_path: Option<String>,
    pub title: Option<String>,
    pub status: GuessStatus,
    pub favorite: bool,
    pub watchlist: bool,
    /// Remote record behind the cell; absent for store-only grids
    #[serde(skip)]
    pub entity: Option<Entity>,
    /// Stored answer of a store-only cell, shown once it becomes visible
    #[serde(skip)]
    stored_title: Option<String>,
}

impl GridItem {
    pub fn from_entity(entity: Entity, state: Option<&GuessState>) -> Self {
        let state = state.cloned().unwrap_or_default();
        Self {
            key: entity.key(),
            poster_path: entity.poster_path().map(str::to_string),
            title: state
                .answer_visible()
                .then(|| entity.display_name().to_string()),
            status: state.status(),
            favorite: state.favorite,
            watchlist: state.watchlist,
            entity: Some(entity),
            stored_title: None,
        }
    }

    pub fn from_record(record: ShadowRecord) -> Self {
        let state = record.state;
        Self {
            key: record.key,
            poster_path: record.poster_path,
            title: record.title.clone().filter(|_| state.answer_visible()),
            status: state.status(),
            favorite: state.favorite,
            watchlist: state.watchlist,
            entity: None,
            stored_title: record.title,
        }
    }

    fn with_state(self, state: &GuessState) -> Self {
        Self {
            title: self
                .stored_title
                .clone()
                .filter(|_| state.answer_visible()),
            status: state.status(),
            favorite: state.favorite,
            watchlist: state.watchlist,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridPage {
    pub items: Vec<GridItem>,
    pub page: u32,
    pub total_pages: u32,
}

impl GridPage {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    fn local(items: Vec<GridItem>) -> Self {
        Self {
            items,
            page: 1,
            total_pages: 1,
        }
    }
}

struct GridState {
    category: Category,
    page: u32,
    total_pages: u32,
    seen: HashSet<EntityKey>,
    items: Vec<GridItem>,
}

/// Grid screen: one category, loaded page by page.
pub struct GridPresenter {
    services: Services,
    scope: CancelScope,
    options: GridOptions,
    state: Option<GridState>,
}

impl GridPresenter {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            scope: CancelScope::new(),
            options: GridOptions::default(),
            state: None,
        }
    }

    pub fn with_options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    pub fn scope(&self) -> &CancelScope {
        &self.scope
    }

    /// Load one page of `category`, joined with local guess state.
    pub async fn load(&self, category: &Category, page: u32) -> Result<GridPage> {
        let store = &self.services.store;
        let records = match category {
            Category::Favorites(kind) => Some(store.list_favorites(*kind)?),
            Category::Watchlist(kind) => Some(store.list_watchlist(*kind)?),
            Category::RecentlyViewed => Some(store.recently_viewed(RECENT_LIMIT)?),
            _ => None,
        };
        if let Some(records) = records {
            let items = records.into_iter().map(GridItem::from_record).collect();
            return Ok(GridPage::local(items));
        }

        let remote = match self.fetch(category, page).await? {
            Some(remote) => remote,
            None => return Ok(GridPage::local(Vec::new())),
        };

        let entities = dedupe_by_key(filter_with_posters(remote.results));
        let keys: Vec<EntityKey> = entities.iter().map(Entity::key).collect();
        let states = store.states(&keys)?;
        let entities = if self.options.hide_revealed {
            hide_revealed(entities, &states)
        } else {
            entities
        };

        let items = entities
            .into_iter()
            .map(|entity| {
                let state = states.get(&entity.key());
                GridItem::from_entity(entity, state)
            })
            .collect();

        Ok(GridPage {
            items,
            page: remote.page,
            total_pages: remote.total_pages,
        })
    }

    async fn fetch(&self, category: &Category, page: u32) -> Result<Option<Page<Entity>>> {
        let api = &self.services.api;
        let page = match category {
            Category::Discover { kind, genre } => {
                let genre_id = genre.and_then(|id| i64::try_from(id).ok()).unwrap_or(-1);
                api.discover(*kind, genre_id, page, &self.scope).await?
            }
            Category::PopularPeople => api
                .popular_people(page, &self.scope)
                .await?
                .map(Entity::from),
            Category::Search { query, .. } if query.trim().is_empty() => return Ok(None),
            Category::Search { kind, query } => {
                api.search(*kind, query, page, &self.scope).await?
            }
            _ => return Ok(None),
        };
        Ok(Some(page))
    }

    /// Start a category from its first page, dropping what was loaded before.
    pub async fn open(&mut self, category: Category) -> Result<&[GridItem]> {
        let first = self.load(&category, 1).await?;
        let seen = first.items.iter().map(|item| item.key).collect();
        let state = self.state.insert(GridState {
            category,
            page: first.page,
            total_pages: first.total_pages,
            seen,
            items: first.items,
        });
        Ok(state.items.as_slice())
    }

    /// Append the next page. Entities already on screen are skipped. Returns
    /// how many cells were added.
    pub async fn load_more(&mut self) -> Result<usize> {
        let (category, next) = match &self.state {
            Some(state) if state.page < state.total_pages => {
                (state.category.clone(), state.page + 1)
            }
            _ => return Ok(0),
        };

        let page = self.load(&category, next).await?;
        let Some(state) = self.state.as_mut() else {
            return Ok(0);
        };
        state.page = page.page;
        state.total_pages = page.total_pages;

        let before = state.items.len();
        for item in page.items {
            if state.seen.insert(item.key) {
                state.items.push(item);
            }
        }
        Ok(state.items.len() - before)
    }

    pub fn items(&self) -> &[GridItem] {
        self.state
            .as_ref()
            .map(|state| state.items.as_slice())
            .unwrap_or_default()
    }

    pub fn category(&self) -> Option<&Category> {
        self.state.as_ref().map(|state| &state.category)
    }

    pub fn has_more(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.page < state.total_pages)
    }

    /// Re-read guess state for every loaded cell, e.g. after returning from a
    /// detail screen. Cells that are now revealed drop out when the grid
    /// hides revealed entities.
    pub fn refresh_states(&mut self) -> Result<()> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let keys: Vec<EntityKey> = state.items.iter().map(|item| item.key).collect();
        let states = self.services.store.states(&keys)?;

        let hide = self.options.hide_revealed && state.category.is_remote();
        state.items = std::mem::take(&mut state.items)
            .into_iter()
            .filter_map(|item| {
                let fresh = states.get(&item.key);
                if hide && fresh.is_some_and(GuessState::answer_visible) {
                    return None;
                }
                Some(match item.entity {
                    Some(entity) => GridItem::from_entity(entity, fresh),
                    None => match fresh {
                        Some(fresh) => item.with_state(fresh),
                        None => item,
                    },
                })
            })
            .collect();
        Ok(())
    }

    pub fn close(&self) {
        self.scope.cancel();
    }
}

impl Drop for GridPresenter {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
