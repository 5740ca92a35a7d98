//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

const MISSING_CONFIG: &str = "/nonexistent/plex-notifier.toml";

/// Clean command pointed at a config file that does not exist
fn plex_notify() -> Command {
    let mut cmd = clean_command();
    cmd.args(["--config", MISSING_CONFIG]);
    cmd
}

/// Command with a clean environment so developer settings don't leak in
fn clean_command() -> Command {
    let mut cmd = Command::cargo_bin("plex-notify").unwrap();
    for var in [
        "PLEX_NOTIFIER_CONFIG",
        "PLEX_ENABLED",
        "PLEX_HOST",
        "PLEX_SERVER_HOST",
        "PLEX_USERNAME",
        "PLEX_PASSWORD",
        "PLEX_UPDATE_LIBRARY",
        "PLEX_NOTIFY_ONSNATCH",
        "PLEX_NOTIFY_ONDOWNLOAD",
        "PLEX_NOTIFY_ONSUBTITLEDOWNLOAD",
        "PLEX_NOTIFY_ONUPDATE",
        "PLEX_AUTH_URL",
        "HTTP_PROXY",
        "LOG_LEVEL",
        "VERBOSE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("plex-notify").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("plex-notify").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("notify"))
        .stdout(predicate::str::contains("update-library"))
        .stdout(predicate::str::contains("subtitle"));
}

#[test]
fn test_disabled_notify_prints_false() {
    plex_notify()
        .args(["notify", "--message", "hello", "--host", "127.0.0.1:9"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::diff("false\n"));
}

#[test]
fn test_update_library_without_server_prints_false() {
    plex_notify()
        .env("PLEX_ENABLED", "true")
        .env("PLEX_UPDATE_LIBRARY", "true")
        .arg("update-library")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::diff("false\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_test_subcommand_prints_report() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/xbmcCmds/xbmcHttp/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let host = server.address().to_string();

    let output = plex_notify()
        .args(["test", "--host", &host])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["results"][0]["host"], host.as_str());
    assert_eq!(json["results"][0]["status"], "ok");
}

#[test]
fn test_invalid_env_value_fails_instead_of_using_defaults() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        r#"
[plex]
enabled = true
host = "10.0.0.5:3005"
server_host = "10.0.0.2:32400"
"#
    )
    .unwrap();

    clean_command()
        .env("PLEX_NOTIFY_ONSNATCH", "maybe")
        .args(["--config", config.path().to_str().unwrap()])
        .args(["snatch", "Show - S01E01"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("PLEX_NOTIFY_ONSNATCH"));
}
