pub mod config;
pub mod entitlements;
pub mod error;
pub mod presenters;
pub mod services;
pub mod store;

pub use config::{CacheConfig, Config, resolve_data_dir};
pub use entitlements::Entitlements;
pub use error::{Error, Result};
pub use presenters::{
    Category, DetailPresenter, GenrePresenter, GridItem, GridOptions, GridPage, GridPresenter,
    GuessOutcome, PersonCreditsView, PersonDetail, PersonPresenter, TitleCredits, TitleDetail,
};
pub use services::{Services, database_path};
pub use store::Store;

/// The error views receive from any presenter.
pub type PresenterError = Error;
