//! JSON output shapes that scripts depend on

use anyhow::Result;
use reelguess_testing::TestWorld;

#[test]
fn test_stats_json() -> Result<()> {
    let world = TestWorld::new();
    world.run_json(&["favorite", "movie", "27205"])?;
    world.run_json(&["watchlist", "movie", "27205"])?;
    world.run_json(&["watchlist", "tv", "1399"])?;
    world.run_json(&["favorite", "person", "525"])?;

    let stats = world.run_json(&["stats"])?;
    insta::assert_json_snapshot!("stats_after_toggles", stats);
    Ok(())
}
