use super::*;

#[test]
fn from_values_defaults_to_same_origin_and_info() {
    let cfg = ClientConfig::from_values(None, None).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base_url, "");
    assert_eq!(cfg.log_level, log::Level::Info);
}

#[test]
fn from_values_trims_trailing_slash_from_base_url() {
    let cfg = ClientConfig::from_values(Some(" https://campus.example.test/ "), None).unwrap();
    assert_eq!(cfg.api_base_url, "https://campus.example.test");
}

#[test]
fn from_values_parses_log_level_case_insensitively() {
    let cfg = ClientConfig::from_values(None, Some("DEBUG")).unwrap();
    assert_eq!(cfg.log_level, log::Level::Debug);
}

#[test]
fn from_values_blank_log_level_uses_default() {
    let cfg = ClientConfig::from_values(None, Some("  ")).unwrap();
    assert_eq!(cfg.log_level, DEFAULT_LOG_LEVEL);
}

#[test]
fn from_values_rejects_unknown_log_level() {
    let err = ClientConfig::from_values(None, Some("loud")).unwrap_err();
    assert_eq!(err, ConfigError::InvalidLogLevel("loud".to_owned()));
}
