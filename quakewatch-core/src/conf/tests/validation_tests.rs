use crate::conf::{ConfigError, DashboardConfig, validate_config};
use pretty_assertions::assert_eq;

#[test]
fn default_config_is_valid() {
    assert!(validate_config(&DashboardConfig::default()).is_ok());
}

#[test]
fn zero_interval_is_rejected() {
    // Arrange
    let mut cfg = DashboardConfig::default();
    cfg.polling.interval_secs = 0;

    // Act
    let err = validate_config(&cfg).unwrap_err();

    // Assert
    let ConfigError::Validation { issues } = err else {
        panic!("expected validation error");
    };
    assert_eq!(issues.len(), 1);
    assert!(issues[0].starts_with("polling.interval_secs"));
}

#[test]
fn all_violations_are_reported_together() {
    // Arrange
    let mut cfg = DashboardConfig::default();
    cfg.feed.url = "ftp://example.test/feed".to_string();
    cfg.feed.timeout_secs = 0;
    cfg.display.limit = 0;
    cfg.filter.max_depth_km = Some(-5.0);

    // Act
    let err = validate_config(&cfg).unwrap_err();

    // Assert
    let ConfigError::Validation { issues } = &err else {
        panic!("expected validation error");
    };
    assert_eq!(issues.len(), 4);
    assert!(err.to_string().contains("feed.url"));
    assert!(err.to_string().contains("display.limit"));
}

#[test]
fn max_depth_of_zero_is_allowed() {
    let mut cfg = DashboardConfig::default();
    cfg.filter.max_depth_km = Some(0.0);

    assert!(validate_config(&cfg).is_ok());
}

#[test]
fn nan_min_magnitude_is_rejected() {
    let mut cfg = DashboardConfig::default();
    cfg.filter.min_magnitude = f64::NAN;

    let err = validate_config(&cfg).unwrap_err();

    assert!(err.to_string().contains("filter.min_magnitude must be a finite number"));
}
