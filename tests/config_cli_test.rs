use anyhow::Result;
use std::fs;
use tempfile::TempDir;

// It tests the complete flow: CLI args -> config loading -> app initialization
#[test]
fn test_config_and_cli_integration() -> Result<()> {
    // Setup: Create a temporary directory for our test config
    let temp_dir = TempDir::new()?;
    let config_dir = temp_dir.path().join(".config").join("starfeed");
    fs::create_dir_all(&config_dir)?;

    let config_file = config_dir.join("starfeed.toml");

    // Create a test config file with the expected schema
    let test_config = r#"
version = 1
days_window = 14

[ui]
show_avatar_url = true
show_star_icon = false
"#;
    fs::write(&config_file, test_config)?;

    // Test 1: Load config from file
    let config = starfeed::config::Config::load(Some(config_file.clone()))?;

    assert_eq!(config.version, 1);
    assert_eq!(config.days_window, 14);
    assert_eq!(config.ui.show_avatar_url, true);
    assert_eq!(config.ui.show_star_icon, false);

    // Test 2: CLI override should work
    let cli_args = starfeed::cli::CliArgs {
        days: Some(5),
        config: None,
    };

    let final_config = starfeed::config::Config::from_cli_and_file(cli_args, Some(config_file))?;
    assert_eq!(final_config.days_window, 5); // CLI should override
    assert_eq!(final_config.ui.show_avatar_url, true); // Other settings preserved

    // Test 3: Save and reload should work
    let new_config_file = temp_dir.path().join("new_config.toml");
    final_config.save(&new_config_file)?;

    // Verify saved config can be loaded back
    let reloaded_config = starfeed::config::Config::load(Some(new_config_file))?;
    assert_eq!(reloaded_config.days_window, 5);

    // Test 4: Default config creation
    let nonexistent_file = temp_dir.path().join("nonexistent.toml");
    let default_config = starfeed::config::Config::load(Some(nonexistent_file.clone()))?;

    // Should create default config with the 10-day window
    assert_eq!(default_config.version, 1);
    assert_eq!(default_config.days_window, 10);
    assert!(nonexistent_file.exists());

    Ok(())
}

#[test]
fn test_config_missing_ui_section_uses_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_file = temp_dir.path().join("minimal.toml");

    // A config written before the [ui] section existed
    fs::write(&config_file, "version = 1\ndays_window = 10\n")?;

    let config = starfeed::config::Config::load(Some(config_file))?;
    assert_eq!(config.days_window, 10);
    assert!(!config.ui.show_avatar_url);
    assert!(config.ui.show_star_icon);

    Ok(())
}

#[test]
fn test_app_uses_config_window() -> Result<()> {
    let mut config = starfeed::config::Config::default();
    config.days_window = 21;

    let app = starfeed::app::App::new(config);
    assert_eq!(app.config.days_window, 21);
    assert_eq!(app.page, 1);
    assert!(!app.loading);

    Ok(())
}
