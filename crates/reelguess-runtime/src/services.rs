use reelguess_client::{ApiClient, HttpTransport, ImageLoader, ReqwestTransport};
use reelguess_types::{Entity, Person};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{Config, DATABASE_FILE};
use crate::entitlements::Entitlements;
use crate::presenters::{DetailPresenter, GenrePresenter, GridPresenter, PersonPresenter};
use crate::store::Store;
use crate::{Error, Result};

/// Everything a presenter needs, constructed once and passed down.
///
/// Cloning is cheap; clones share the same store, client and poster cache.
#[derive(Clone)]
pub struct Services {
    pub config: Arc<Config>,
    pub store: Arc<Store>,
    pub api: Arc<ApiClient>,
    pub images: Arc<ImageLoader>,
}

impl Services {
    pub fn new(config: Config, store: Store, transport: Arc<dyn HttpTransport>) -> Self {
        let api = ApiClient::new(config.api.clone(), transport);
        let images = ImageLoader::for_client(&api);
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            api: Arc::new(api),
            images: Arc::new(images),
        }
    }

    /// Production wiring: on-disk store in `data_dir` and the reqwest transport.
    pub fn open(data_dir: &Path, config: Config) -> Result<Self> {
        let store = Store::open(&database_path(data_dir))?;
        let transport = ReqwestTransport::from_config(&config.api)
            .map_err(|e| Error::Config(format!("Could not create HTTP client: {}", e)))?;
        Ok(Self::new(config, store, Arc::new(transport)))
    }

    /// In-memory store over the given transport.
    pub fn in_memory(config: Config, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        Ok(Self::new(config, Store::in_memory()?, transport))
    }

    pub fn entitlements(&self) -> Entitlements {
        Entitlements::new(Arc::clone(&self.store))
    }

    pub fn genre_presenter(&self) -> GenrePresenter {
        GenrePresenter::new(self.clone())
    }

    pub fn grid_presenter(&self) -> GridPresenter {
        GridPresenter::new(self.clone())
    }

    pub fn detail_presenter(&self, entity: Entity) -> Result<DetailPresenter> {
        DetailPresenter::open(self.clone(), entity)
    }

    pub fn person_presenter(&self, person: Person) -> Result<PersonPresenter> {
        PersonPresenter::open(self.clone(), person)
    }
}

pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}
