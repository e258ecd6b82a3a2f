use vetted_core::{ConfigError, ConfigValue, ServerConfig, VettedConfig};

#[test]
fn empty_config_has_no_keys() {
    let config = VettedConfig::empty();
    assert!(matches!(config.get::<String>("missing"), Err(ConfigError::NotFound(_))));
    assert_eq!(config.profile(), "test");
}

#[test]
fn set_and_get() {
    let mut config = VettedConfig::empty();
    config.set("app.name", "authors");
    config.set("app.workers", 4i64);
    assert_eq!(config.get::<String>("app.name").unwrap(), "authors");
    assert_eq!(config.get::<i64>("app.workers").unwrap(), 4);
    assert_eq!(config.get_or("app.missing", 7i64), 7);
}

#[test]
fn nested_yaml_is_flattened() {
    let yaml = r#"
server:
  host: 127.0.0.1
  port: 8080
openapi:
  title: Authors
  tags: [a, b]
  enabled: true
"#;
    let config = VettedConfig::from_yaml_str(yaml, "dev").unwrap();
    assert_eq!(config.get::<String>("server.host").unwrap(), "127.0.0.1");
    assert_eq!(config.get::<u16>("server.port").unwrap(), 8080);
    assert_eq!(config.get::<Vec<String>>("openapi.tags").unwrap(), vec!["a", "b"]);
    assert!(config.get::<bool>("openapi.enabled").unwrap());
    assert_eq!(config.profile(), "dev");
}

#[test]
fn strings_convert_like_yaml_values() {
    let mut config = VettedConfig::empty();
    config.set("port", "9000");
    config.set("ratio", "0.5");
    config.set("flag", "yes");
    config.set("nothing", ConfigValue::Null);
    assert_eq!(config.get::<u16>("port").unwrap(), 9000);
    assert_eq!(config.get::<f64>("ratio").unwrap(), 0.5);
    assert!(config.get::<bool>("flag").unwrap());
    assert_eq!(config.get::<Option<String>>("nothing").unwrap(), None);
}

#[test]
fn out_of_range_port_is_type_mismatch() {
    let mut config = VettedConfig::empty();
    config.set("server.port", 70000i64);
    let err = config.get::<u16>("server.port").unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { expected: "u16", .. }));
    assert!(ServerConfig::from_config(&config).is_err());
}

#[test]
fn get_optional_distinguishes_missing_from_invalid() {
    let mut config = VettedConfig::empty();
    config.set("flag", "maybe");
    assert_eq!(config.get_optional::<bool>("absent").unwrap(), None);
    assert!(config.get_optional::<bool>("flag").is_err());
}

#[test]
fn invalid_yaml_is_load_error() {
    let err = VettedConfig::from_yaml_str("server: [unclosed", "dev").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn server_config_defaults() {
    let server = ServerConfig::from_config(&VettedConfig::empty()).unwrap();
    assert_eq!(server, ServerConfig::default());
    assert_eq!(server.addr(), "0.0.0.0:3000");
}

#[test]
fn server_config_reads_values() {
    let config = VettedConfig::from_yaml_str("server:\n  host: localhost\n  port: 4000\n", "dev").unwrap();
    let server = ServerConfig::from_config(&config).unwrap();
    assert_eq!(server.addr(), "localhost:4000");
}

#[test]
fn load_from_reads_base_and_profile_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "vettedtest:\n  greeting: hello\n  level: base\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-staging.yaml"),
        "vettedtest:\n  level: staging\n",
    )
    .unwrap();

    let config = VettedConfig::load_from(dir.path(), "staging").unwrap();
    assert_eq!(config.get::<String>("vettedtest.greeting").unwrap(), "hello");
    assert_eq!(config.get::<String>("vettedtest.level").unwrap(), "staging");
}

#[test]
fn load_from_missing_files_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = VettedConfig::load_from(dir.path(), "dev").unwrap();
    assert!(!config.contains_key("vettedtest.greeting"));
}

#[test]
fn load_from_malformed_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("application.yaml"), "a: [b").unwrap();
    let err = VettedConfig::load_from(dir.path(), "dev").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}
