use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(contents: &str) -> (PathBuf, PathBuf) {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("homeboard_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join(CONFIG_FILE_NAME);
    fs::write(&path, contents).expect("write config");
    (temp_root, path)
}

#[test]
fn normalizes_server_url() {
    assert_eq!(normalize_server_url(" localhost:4001/ "), "http://localhost:4001");
    assert_eq!(
        normalize_server_url("https://school.example/api/"),
        "https://school.example/api"
    );
    assert_eq!(normalize_server_url(""), "http://127.0.0.1:4001");
}

#[test]
fn file_values_override_defaults() {
    let (temp_root, path) = temp_config(
        "server_url = \"http://roster.local:9000/\"\nrequest_timeout_secs = 3\n",
    );
    let mut settings = StartupConfig::default();

    apply_file(&mut settings, &path).expect("apply file");

    assert_eq!(settings.server_url, "http://roster.local:9000/");
    assert_eq!(settings.request_timeout_secs, 3);
    assert_eq!(settings.log_filter, "info");
    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn malformed_file_is_an_error() {
    let (temp_root, path) = temp_config("server_url = [");
    let mut settings = StartupConfig::default();

    let err = apply_file(&mut settings, &path).expect_err("invalid toml");

    assert!(err.to_string().starts_with("invalid config file"));
    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let args = CliArgs {
        config: Some(env::temp_dir().join("homeboard_missing_dir/none.toml")),
        ..CliArgs::default()
    };
    assert!(load_startup_config(&args).is_err());
}

#[test]
fn env_overrides_file_and_ignores_bad_numbers() {
    let mut settings = StartupConfig::default();
    apply_env(&mut settings, |name| match name {
        "HOMEBOARD_SERVER_URL" => Some("http://a:1".to_string()),
        "APP__SERVER_URL" => Some("http://b:2".to_string()),
        "APP__REQUEST_TIMEOUT_SECS" => Some("soon".to_string()),
        _ => None,
    });

    assert_eq!(settings.server_url, "http://b:2");
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn cli_flags_win_over_everything() {
    let (temp_root, path) = temp_config("server_url = \"http://from-file:1\"\n");
    let args = CliArgs {
        server_url: Some("cli-host:7/".to_string()),
        config: Some(path),
        request_timeout_secs: Some(0),
        log_filter: Some("debug".to_string()),
    };

    let settings = load_startup_config(&args).expect("config");

    assert_eq!(settings.server_url, "http://cli-host:7");
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));
    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn parses_cli_flags() {
    let args = CliArgs::parse_from([
        "homeboard",
        "--server-url",
        "http://10.1.1.1:4001",
        "--request-timeout-secs",
        "5",
    ]);
    assert_eq!(args.server_url.as_deref(), Some("http://10.1.1.1:4001"));
    assert_eq!(args.request_timeout_secs, Some(5));
    assert!(args.config.is_none());
}
