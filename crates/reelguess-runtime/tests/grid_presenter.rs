use reelguess_runtime::{Category, Config, GridOptions, Services};
use reelguess_testing::FakeTransport;
use reelguess_testing::fixtures::{DARK_KNIGHT_ID, INCEPTION_ID, INTERSTELLAR_ID, NOLAN_ID};
use reelguess_types::{EntityKey, GuessStatus, MediaKind};
use std::sync::Arc;

fn services(transport: &Arc<FakeTransport>) -> Services {
    Services::in_memory(Config::default(), transport.clone()).expect("in-memory services")
}

fn discover_movies() -> Category {
    Category::Discover {
        kind: MediaKind::Movie,
        genre: None,
    }
}

#[tokio::test]
async fn test_posterless_titles_are_left_out() {
    let transport = FakeTransport::tmdb().into_shared();
    let services = services(&transport);

    let page = services
        .grid_presenter()
        .load(&discover_movies(), 1)
        .await
        .unwrap();

    let keys: Vec<EntityKey> = page.items.iter().map(|item| item.key).collect();
    assert_eq!(
        keys,
        vec![EntityKey::movie(INCEPTION_ID), EntityKey::movie(INTERSTELLAR_ID)]
    );
    assert!(page.has_more());
    assert!(page.items.iter().all(|item| item.title.is_none()));
}

#[tokio::test]
async fn test_load_more_skips_entities_already_shown() {
    let transport = FakeTransport::tmdb().into_shared();
    let services = services(&transport);
    let mut grid = services.grid_presenter();

    assert_eq!(grid.open(discover_movies()).await.unwrap().len(), 2);
    let added = grid.load_more().await.unwrap();

    assert_eq!(added, 1);
    assert_eq!(grid.items()[2].key, EntityKey::movie(DARK_KNIGHT_ID));
    assert!(!grid.has_more());
    assert_eq!(grid.load_more().await.unwrap(), 0);
    assert_eq!(transport.count("/discover/movie"), 2);
}

#[tokio::test]
async fn test_grid_joins_local_state() {
    let transport = FakeTransport::tmdb().into_shared();
    let services = services(&transport);
    services
        .store
        .mark_correctly_guessed(EntityKey::movie(INCEPTION_ID))
        .unwrap();
    services
        .store
        .toggle_favorite(EntityKey::movie(INTERSTELLAR_ID))
        .unwrap();

    let page = services
        .grid_presenter()
        .load(&discover_movies(), 1)
        .await
        .unwrap();

    assert_eq!(page.items[0].status, GuessStatus::Guessed);
    assert_eq!(page.items[0].title.as_deref(), Some("Inception"));
    assert_eq!(page.items[1].status, GuessStatus::Hidden);
    assert!(page.items[1].favorite);
    assert!(page.items[1].title.is_none());
}

#[tokio::test]
async fn test_hide_revealed_option() {
    let transport = FakeTransport::tmdb().into_shared();
    let services = services(&transport);
    let mut grid = services
        .grid_presenter()
        .with_options(GridOptions { hide_revealed: true });

    grid.open(discover_movies()).await.unwrap();
    assert_eq!(grid.items().len(), 2);

    services
        .store
        .mark_revealed(EntityKey::movie(INCEPTION_ID))
        .unwrap();
    grid.refresh_states().unwrap();

    assert_eq!(grid.items().len(), 1);
    assert_eq!(grid.items()[0].key, EntityKey::movie(INTERSTELLAR_ID));
}

#[tokio::test]
async fn test_genre_filter_is_sent_only_when_set() {
    let transport = FakeTransport::tmdb().into_shared();
    let services = services(&transport);
    let grid = services.grid_presenter();

    grid.load(&discover_movies(), 1).await.unwrap();
    let all = transport.last_request().unwrap();
    assert_eq!(all.query_value("with_genres"), None);

    let action = Category::Discover {
        kind: MediaKind::Movie,
        genre: Some(28),
    };
    grid.load(&action, 1).await.unwrap();
    let filtered = transport.last_request().unwrap();
    assert_eq!(filtered.query_value("with_genres"), Some("28"));
}

#[tokio::test]
async fn test_popular_people_grid() {
    let transport = FakeTransport::tmdb().into_shared();
    let services = services(&transport);

    let page = services
        .grid_presenter()
        .load(&Category::PopularPeople, 1)
        .await
        .unwrap();

    assert_eq!(page.items[0].key, EntityKey::person(NOLAN_ID));
    assert!(page.items.iter().all(|item| item.key.kind == MediaKind::Person));
}

#[tokio::test]
async fn test_empty_search_makes_no_request() {
    let transport = FakeTransport::tmdb().into_shared();
    let services = services(&transport);

    let page = services
        .grid_presenter()
        .load(
            &Category::Search {
                kind: MediaKind::Movie,
                query: "   ".to_string(),
            },
            1,
        )
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_favorites_grid_reads_only_the_store() {
    let transport = FakeTransport::tmdb().into_shared();
    let services = services(&transport);
    services
        .store
        .fetch_or_create(
            EntityKey::movie(INCEPTION_ID),
            Some("Inception"),
            Some("/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg"),
        )
        .unwrap();
    services
        .store
        .toggle_favorite(EntityKey::movie(INCEPTION_ID))
        .unwrap();

    let page = services
        .grid_presenter()
        .load(&Category::Favorites(Some(MediaKind::Movie)), 1)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(page.items[0].favorite);
    assert!(page.items[0].title.is_none());
    assert!(page.items[0].entity.is_none());
    assert!(!page.has_more());
    assert_eq!(transport.request_count(), 0);

    let people = services
        .grid_presenter()
        .load(&Category::Favorites(Some(MediaKind::Person)), 1)
        .await
        .unwrap();
    assert!(people.items.is_empty());
}

#[tokio::test]
async fn test_refreshed_favorite_shows_answer_after_reveal() {
    let transport = FakeTransport::tmdb().into_shared();
    let services = services(&transport);
    let key = EntityKey::movie(INCEPTION_ID);
    services
        .store
        .fetch_or_create(key, Some("Inception"), Some("/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg"))
        .unwrap();
    services.store.toggle_favorite(key).unwrap();

    let mut grid = services.grid_presenter();
    let items = grid.open(Category::Favorites(None)).await.unwrap();
    assert!(items[0].title.is_none());

    services.store.mark_revealed(key).unwrap();
    grid.refresh_states().unwrap();

    let item = &grid.items()[0];
    assert_eq!(item.status, GuessStatus::Revealed);
    assert_eq!(item.title.as_deref(), Some("Inception"));
    assert!(item.favorite);

    let reloaded = grid.load(&Category::Favorites(None), 1).await.unwrap();
    assert_eq!(reloaded.items[0], *item);
}
