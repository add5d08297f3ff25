use anyhow::Result;
use reelguess_testing::TestWorld;

#[test]
fn test_init_then_show_masks_the_key() -> Result<()> {
    let world = TestWorld::new();

    let init = world.run_json(&["config", "init", "--api-key", "secret-key"])?;
    assert!(init["path"].as_str().unwrap_or_default().ends_with("config.toml"));
    assert!(world.config_path().exists());

    let written = std::fs::read_to_string(world.config_path())?;
    assert!(written.contains("secret-key"));

    let shown = world.run_json(&["config", "show"])?;
    assert_eq!(shown["api"]["api_key"], "***");
    assert_eq!(shown["api"]["language"], "en-US");
    assert_eq!(shown["cache"]["genre_ttl_hours"], 168);
    Ok(())
}

#[test]
fn test_api_key_from_environment() -> Result<()> {
    let without = TestWorld::new();
    assert_eq!(without.run_json(&["config", "show"])?["api"]["api_key"], "");

    let with_env = TestWorld::new().with_env("REELGUESS_API_KEY", "from-env");
    let plain = with_env.run(&["config", "show"])?;
    assert!(plain.success());
    assert!(plain.stdout().contains("api_key = \"***\""));
    Ok(())
}

#[test]
#[allow(deprecated)]
fn test_data_dir_from_environment() -> Result<()> {
    let world = TestWorld::new();
    let other = world.temp_dir().join("elsewhere");

    let mut cmd = assert_cmd::Command::cargo_bin("reelguess")?;
    cmd.env("REELGUESS_PATH", &other)
        .env_remove("RUST_LOG")
        .args(["favorite", "movie", "27205"])
        .assert()
        .success();

    assert!(other.join("reelguess.db").exists());
    Ok(())
}
