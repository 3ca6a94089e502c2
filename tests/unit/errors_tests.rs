/*!
 * Tests for error types
 */

use mixsub::errors::{AlignError, AppError, ConfigError, DiscoveryError};

/// Test error messages name the failing item
#[test]
fn test_display_withDetails_shouldIncludeThem() {
    let error = AlignError::OrderNotInferred { count: 4 };
    assert_eq!(error.to_string(), "Episode order could not be inferred from 4 video name(s)");

    let error = ConfigError::InvalidFilter {
        pattern: "(".to_string(),
        message: "unclosed group".to_string(),
    };
    assert!(error.to_string().contains("\"(\""));
    assert!(error.to_string().contains("unclosed group"));

    let error = ConfigError::EmptyExtensions("video");
    assert_eq!(error.to_string(), "No video extensions configured");
}

/// Test conversions into the application error
#[test]
fn test_appError_fromSpecificErrors_shouldWrapThem() {
    let error: AppError = DiscoveryError::Probe("ffprobe missing".to_string()).into();
    assert!(matches!(error, AppError::Discovery(_)));
    assert!(error.to_string().contains("ffprobe missing"));

    let error: AppError = AlignError::OrderNotInferred { count: 1 }.into();
    assert!(matches!(error, AppError::Align(_)));

    let error: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, AppError::File(_)));

    let error: AppError = anyhow::anyhow!("something else").into();
    assert!(matches!(error, AppError::Unknown(_)));
}

/// Test the align error survives a trip through anyhow
#[test]
fn test_alignError_throughAnyhow_shouldDowncast() {
    let error: anyhow::Error = AlignError::OrderNotInferred { count: 2 }.into();
    assert!(matches!(
        error.downcast_ref::<AlignError>(),
        Some(AlignError::OrderNotInferred { count: 2 })
    ));
}
