use reelguess_client::ApiError;
use reelguess_runtime::presenters::DetailPresenter;
use reelguess_runtime::{Category, Config, Error, Services};
use reelguess_testing::FakeTransport;
use reelguess_testing::fixtures::INCEPTION_ID;
use reelguess_types::{EntityKey, MediaKind};
use std::sync::Arc;
use std::time::Duration;

fn slow_services(delay: Duration) -> (Arc<FakeTransport>, Services) {
    let transport = FakeTransport::tmdb().with_delay(delay).into_shared();
    let services =
        Services::in_memory(Config::default(), transport.clone()).expect("in-memory services");
    (transport, services)
}

#[tokio::test(start_paused = true)]
async fn test_close_cancels_pending_load() {
    let (_transport, services) = slow_services(Duration::from_secs(3600));
    let presenter = services.genre_presenter();
    let scope = presenter.scope().clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        scope.cancel();
    });

    let err = presenter.load(MediaKind::Movie).await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(matches!(err, Error::Api(ApiError::Cancelled)));
}

#[tokio::test(start_paused = true)]
async fn test_closed_presenter_fails_fast() {
    let (transport, services) = slow_services(Duration::from_millis(10));
    let grid = services.grid_presenter();
    grid.close();

    let category = Category::Discover {
        kind: MediaKind::Movie,
        genre: None,
    };
    let err = grid.load(&category, 1).await.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_a_presenter_cancels_its_scope() {
    let (_transport, services) = slow_services(Duration::from_millis(10));
    let detail = DetailPresenter::open_key(services.clone(), EntityKey::movie(INCEPTION_ID))
        .await
        .unwrap();
    let scope = detail.scope().clone();
    assert!(!scope.is_cancelled());

    drop(detail);
    assert!(scope.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_screens_share_one_fetch() {
    let (transport, services) = slow_services(Duration::from_millis(50));
    let first = services.grid_presenter();
    let second = services.grid_presenter();
    let category = Category::Discover {
        kind: MediaKind::Movie,
        genre: None,
    };

    let (a, b) = tokio::join!(first.load(&category, 1), second.load(&category, 1));
    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(transport.count("/discover/movie"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancelling_one_screen_leaves_the_other_running() {
    let (transport, services) = slow_services(Duration::from_millis(50));
    let first = services.grid_presenter();
    let second = services.grid_presenter();
    let category = Category::Discover {
        kind: MediaKind::Movie,
        genre: None,
    };

    let cancel_first = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        first.close();
    };
    let (a, b, ()) = tokio::join!(
        first.load(&category, 1),
        second.load(&category, 1),
        cancel_first
    );

    assert!(a.unwrap_err().is_cancelled());
    assert_eq!(b.unwrap().items.len(), 2);
    assert_eq!(transport.count("/discover/movie"), 1);
}
