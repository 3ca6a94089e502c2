/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;

use crate::common;
use mixsub::app_config::{Config, FilterConfig, LogLevel};
use mixsub::errors::ConfigError;

/// Test that saving then loading a config gives the same values
#[test]
fn test_save_withCustomValues_shouldLoadBackIdentically() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("mixsub.json");

    let mut config = Config::default();
    config.tag = "chat".to_string();
    config.filters.videos.push("1080p".to_string());
    config.discovery.probe_embedded = false;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;

    assert_eq!(loaded, config);
    Ok(())
}

/// Test that a missing config file is created with defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("mixsub.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::from_file(&path)?, Config::default());
    Ok(())
}

/// Test that a malformed config file is reported
#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "mixsub.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

/// Test the default extension lists
#[test]
fn test_default_shouldListKnownExtensions() {
    let config = Config::default();
    assert!(config.discovery.video_extensions.iter().any(|e| e == "rmvb"));
    assert!(config.discovery.subtitle_extensions.iter().any(|e| e == "ass"));
    assert!(config.discovery.comment_extensions.iter().any(|e| e == "protobuf"));
}

/// Test that an invalid filter expression fails validation
#[test]
fn test_validate_withBrokenRegex_shouldReportPattern() {
    let config = Config {
        filters: FilterConfig {
            subtitles: vec!["(unclosed".to_string()],
            ..FilterConfig::default()
        },
        ..Config::default()
    };

    match config.validate() {
        Err(ConfigError::InvalidFilter { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
        other => panic!("expected InvalidFilter, got {:?}", other),
    }
}

/// Test that empty extension lists fail validation
#[test]
fn test_validate_withNoCommentExtensions_shouldFail() {
    let mut config = Config::default();
    config.discovery.comment_extensions.clear();

    assert!(matches!(config.validate(), Err(ConfigError::EmptyExtensions("comment"))));
}

/// Test that an empty tag fails validation
#[test]
fn test_validate_withBlankTag_shouldFail() {
    let mut config = Config::default();
    config.tag = "  ".to_string();

    assert!(matches!(config.validate(), Err(ConfigError::InvalidTag(_))));
}

/// Test that a tag with surrounding spaces is rejected rather than trimmed
#[test]
fn test_validate_withPaddedTag_shouldFail() {
    let mut config = Config::default();
    config.tag = " danmaku ".to_string();

    match config.validate() {
        Err(ConfigError::InvalidTag(tag)) => assert_eq!(tag, " danmaku "),
        other => panic!("expected InvalidTag, got {:?}", other),
    }
}

/// Test that a zero concurrency limit fails validation
#[test]
fn test_validate_withZeroConcurrencyLimit_shouldFail() {
    let mut config = Config::default();
    config.discovery.max_concurrent_probes = 0;

    assert!(matches!(config.validate(), Err(ConfigError::NoProbeConcurrency)));
}

/// Test that log levels use lowercase names in JSON
#[test]
fn test_logLevel_shouldSerializeLowercase() -> Result<()> {
    assert_eq!(serde_json::to_string(&LogLevel::Trace)?, "\"trace\"");
    let level: LogLevel = serde_json::from_str("\"warn\"")?;
    assert_eq!(level, LogLevel::Warn);
    Ok(())
}
