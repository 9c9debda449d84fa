use std::io::Write;

use clap::Parser;
use tempfile::Builder;

use super::*;

fn cli(args: &[&str]) -> CliArgs {
    CliArgs::parse_from(std::iter::once("postfeed").chain(args.iter().copied()))
}

#[test]
fn defaults_resolve_to_local_endpoint() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.remote.endpoint.as_str(), "http://localhost:8080/");
    assert_eq!(settings.remote.asset_base, settings.remote.endpoint);
    assert!(settings.remote.token_file.is_none());
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.remote.endpoint = Some("http://from-file:9000".to_string());
    raw.logging.level = Some("info".to_string());

    let args = cli(&[
        "--endpoint",
        "https://api.example.com",
        "--log-level",
        "debug",
        "feed",
    ]);
    raw.apply_cli_overrides(&args);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.remote.endpoint.host_str(), Some("api.example.com"));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    raw.apply_cli_overrides(&cli(&["--log-json", "true", "shell"]));
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn explicit_asset_base_is_kept() {
    let mut raw = RawSettings::default();
    raw.remote.asset_base = Some("https://cdn.example.com/media/".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(
        settings.remote.asset_base.as_str(),
        "https://cdn.example.com/media/"
    );
}

#[test]
fn non_http_endpoint_is_rejected() {
    let mut raw = RawSettings::default();
    raw.remote.endpoint = Some("ftp://example.com".to_string());

    let err = Settings::from_raw(raw).expect_err("scheme rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "remote.endpoint",
            ..
        }
    ));
}

#[test]
fn bad_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    let err = Settings::from_raw(raw).expect_err("level rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "logging.level",
            ..
        }
    ));
}

#[test]
fn config_file_is_layered_under_cli() {
    let mut file = Builder::new().suffix(".toml").tempfile().expect("tmp config");
    writeln!(
        file,
        "[remote]\nendpoint = \"http://from-file:7000\"\n\n[logging]\nlevel = \"error\"\n"
    )
    .expect("write config");
    let path = file.path().to_str().expect("utf-8 path").to_string();

    let from_file = load(&cli(&["--config-file", &path, "feed"])).expect("settings");
    assert_eq!(from_file.remote.endpoint.port(), Some(7000));
    assert_eq!(from_file.logging.level, LevelFilter::ERROR);

    let overridden =
        load(&cli(&["--config-file", &path, "--log-level", "trace", "feed"])).expect("settings");
    assert_eq!(overridden.remote.endpoint.port(), Some(7000));
    assert_eq!(overridden.logging.level, LevelFilter::TRACE);
}

#[test]
fn parse_feed_arguments() {
    let args = cli(&["feed", "--page", "3"]);
    match args.command {
        Command::Feed(feed) => assert_eq!(feed.page, 3),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn feed_page_must_be_positive() {
    let result = CliArgs::try_parse_from(["postfeed", "feed", "--page", "0"]);
    assert!(result.is_err());
}

#[test]
fn parse_status_arguments() {
    let args = cli(&["status", "--set", "busy"]);
    match args.command {
        Command::Status(status) => assert_eq!(status.set.as_deref(), Some("busy")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn global_flags_are_accepted_after_subcommand() {
    let args = cli(&["show", "abc", "--token-file", "/tmp/token"]);
    assert_eq!(
        args.token_file.as_deref(),
        Some(std::path::Path::new("/tmp/token"))
    );
    assert!(matches!(args.command, Command::Show(ShowArgs { ref id }) if id == "abc"));
}
