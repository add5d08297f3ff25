//! Store-only commands
//!
//! Favorites, watchlist, upgrade and stats never touch the network, so these
//! run against an isolated data directory without any API configured.

use anyhow::Result;
use reelguess_testing::TestWorld;
use reelguess_testing::assertions::{assert_item_count, assert_item_status};

#[test]
fn test_favorite_toggles_and_lists() -> Result<()> {
    let world = TestWorld::new();

    let added = world.run_json(&["favorite", "movie", "27205"])?;
    assert_eq!(added["favorite"], true);
    assert_eq!(added["key"], "movie:27205");

    let list = world.run_json(&["list", "favorites"])?;
    assert_item_count(&list, 1)?;
    assert_item_status(&list, "movie:27205", "hidden")?;
    assert_eq!(list["items"][0]["favorite"], true);

    let removed = world.run_json(&["favorite", "movie", "27205"])?;
    assert_eq!(removed["favorite"], false);
    assert_item_count(&world.run_json(&["list", "favorites"])?, 0)?;
    Ok(())
}

#[test]
fn test_list_filters_by_kind() -> Result<()> {
    let world = TestWorld::new();
    world.run_json(&["watchlist", "movie", "27205"])?;
    world.run_json(&["watchlist", "tv", "1399"])?;

    assert_item_count(&world.run_json(&["list", "watchlist"])?, 2)?;
    let shows = world.run_json(&["list", "watchlist", "--kind", "tv"])?;
    assert_item_count(&shows, 1)?;
    assert_eq!(shows["items"][0]["key"], "tv:1399");
    Ok(())
}

#[test]
fn test_state_survives_between_runs() -> Result<()> {
    let world = TestWorld::new();
    world.run(&["favorite", "person", "525"])?;

    assert!(world.data_dir().join("reelguess.db").exists());
    let stats = world.run_json(&["stats"])?;
    assert_eq!(stats["by_kind"]["person"]["favorites"], 1);
    Ok(())
}

#[test]
fn test_plain_output() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["favorite", "movie", "27205"])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Added movie:27205 to favorites"));

    let list = world.run(&["list", "favorites"])?;
    assert!(list.stdout().contains("Favorites"));
    assert!(list.stdout().contains("movie:27205"));
    assert!(list.stdout().contains("[fav]"));
    Ok(())
}

#[test]
fn test_empty_recent_list() -> Result<()> {
    let world = TestWorld::new();
    assert_item_count(&world.run_json(&["list", "recent"])?, 0)?;
    Ok(())
}

#[test]
fn test_upgrade_switch() -> Result<()> {
    let world = TestWorld::new();
    assert_eq!(world.run_json(&["upgrade", "on"])?["upgraded"], true);
    assert_eq!(world.run_json(&["upgrade", "off"])?["upgraded"], false);
    Ok(())
}

#[test]
fn test_people_have_no_genres() -> Result<()> {
    let world = TestWorld::new();
    let genres = world.run_json(&["genres", "person"])?;
    assert_eq!(genres, serde_json::json!([]));
    Ok(())
}
