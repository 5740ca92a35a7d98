//! Library update integration tests against a mocked Plex Media Server

use plex_notifier::{Error, PlexSettings, SkipReason, UpdateOutcome};
use pretty_assertions::assert_eq;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

mod common;
use common::{MockData, MockServerFactory, TestConfig, TestUtils, updater, updater_with};

async fn mount_sections(server: &MockServer, body: &str, expected_calls: u64) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/library/sections"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_refresh(server: &MockServer, key: &str, expected_calls: u64) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path(format!("/library/sections/{}/refresh", key)))
        .respond_with(ResponseTemplate::new(200))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_no_server_host_makes_no_requests() {
    TestUtils::init_logger();
    let server = MockServerFactory::untouched().await;

    let mut settings = TestConfig::library(&server);
    settings.plex.server_host = String::new();

    assert!(!updater(&settings).update_library(None, None, None).await);
}

#[tokio::test]
async fn test_disabled_update_makes_no_requests() {
    let server = MockServerFactory::untouched().await;

    let mut settings = TestConfig::library(&server);
    settings.plex.update_library = false;
    let outcome = updater(&settings)
        .try_update_library(None, None, None)
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::UpdatesOff));
}

#[tokio::test]
async fn test_only_show_sections_are_refreshed() {
    let server = MockServer::start().await;
    mount_sections(&server, MockData::sections(), 1).await;
    mount_refresh(&server, "2", 1).await;
    mount_refresh(&server, "1", 0).await;

    let settings = TestConfig::library(&server);
    let outcome = updater(&settings)
        .try_update_library(None, None, None)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Refreshed {
            sections: vec!["2".to_string()]
        }
    );
}

#[tokio::test]
async fn test_update_without_credentials_skips_sign_in() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/users/sign_in.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MockData::sign_in()))
        .expect(0)
        .mount(&server)
        .await;
    mount_sections(&server, MockData::sections(), 1).await;
    mount_refresh(&server, "2", 1).await;

    let settings = TestConfig::library(&server);
    assert!(updater(&settings).update_library(None, None, None).await);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.query().is_none()));
}

#[tokio::test]
async fn test_sign_in_token_is_passed_to_server() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/users/sign_in.xml"))
        // base64("user:pass")
        .and(matchers::header("Authorization", "Basic dXNlcjpwYXNz"))
        .and(matchers::header(
            "X-Plex-Client-Identifier",
            "Sick-Beard-Notifier",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_string(MockData::sign_in()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/library/sections"))
        .and(matchers::query_param("X-Plex-Token", MockData::TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_string(MockData::sections()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/library/sections/2/refresh"))
        .and(matchers::query_param("X-Plex-Token", MockData::TOKEN))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let settings = TestConfig::library(&server);
    assert!(
        updater(&settings)
            .update_library(None, Some("user"), Some("pass"))
            .await
    );
}

#[tokio::test]
async fn test_missing_token_stops_before_sections() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/users/sign_in.xml"))
        .respond_with(
            ResponseTemplate::new(201).set_body_string(MockData::sign_in_without_token()),
        )
        // one sign-in per update attempt below
        .expect(2)
        .mount(&server)
        .await;
    mount_sections(&server, MockData::sections(), 0).await;

    let mut settings = TestConfig::library(&server);
    settings.plex.username = "user".to_string();
    settings.plex.password = "pass".to_string();

    let updater = updater(&settings);
    let err = updater
        .try_update_library(None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));

    assert!(!updater.update_library(None, None, None).await);
}

#[tokio::test]
async fn test_rejected_credentials_fail() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/users/sign_in.xml"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            "<errors><error>Invalid email, username, or password.</error></errors>",
        ))
        .mount(&server)
        .await;
    mount_sections(&server, MockData::sections(), 0).await;

    let settings = TestConfig::library(&server);
    let err = updater(&settings)
        .try_update_library(None, Some("user"), Some("wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.category(), "auth");
}

#[tokio::test]
async fn test_unreachable_sign_in_stops_before_sections() {
    let server = MockServer::start().await;
    mount_sections(&server, MockData::sections(), 0).await;

    let mut settings = TestConfig::library(&server);
    // Nothing listens on the discard port
    settings.plex.auth_url = "http://127.0.0.1:9/users/sign_in.xml".to_string();

    let updater = updater(&settings);
    assert!(
        !updater
            .update_library(None, Some("user"), Some("pass"))
            .await
    );

    let err = updater
        .try_update_library(None, Some("user"), Some("pass"))
        .await
        .unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn test_truncated_section_list_refreshes_nothing() {
    let server = MockServer::start().await;
    mount_sections(
        &server,
        r#"<MediaContainer size="2"><Directory key="2" type="show"/>"#,
        1,
    )
    .await;
    mount_refresh(&server, "2", 0).await;

    let settings = TestConfig::library(&server);
    let err = updater(&settings)
        .try_update_library(None, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.category(), "protocol");
}

#[tokio::test]
async fn test_empty_section_list_means_server_not_running() {
    let server = MockServer::start().await;
    mount_sections(&server, MockData::no_sections(), 1).await;

    let settings = TestConfig::library(&server);
    assert!(!updater(&settings).update_library(None, None, None).await);
}

#[tokio::test]
async fn test_section_without_type_fails_before_refresh() {
    let server = MockServer::start().await;
    mount_sections(
        &server,
        r#"<MediaContainer><Directory key="2" type="show"/><Directory key="7"/></MediaContainer>"#,
        1,
    )
    .await;
    mount_refresh(&server, "2", 0).await;

    let settings = TestConfig::library(&server);
    let err = updater(&settings)
        .try_update_library(None, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.category(), "protocol");
}

#[tokio::test]
async fn test_refresh_failure_aborts_remaining_sections() {
    let server = MockServer::start().await;
    mount_sections(
        &server,
        r#"<MediaContainer>
  <Directory key="2" type="show"/>
  <Directory key="3" type="show"/>
  <Directory key="4" type="show"/>
</MediaContainer>"#,
        1,
    )
    .await;
    mount_refresh(&server, "2", 1).await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/library/sections/3/refresh"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "4", 0).await;

    let settings = TestConfig::library(&server);
    assert!(!updater(&settings).update_library(None, None, None).await);
}

#[tokio::test]
async fn test_unreachable_server_returns_false() {
    let plex = PlexSettings {
        enabled: true,
        update_library: true,
        server_host: "127.0.0.1:9".to_string(),
        ..PlexSettings::default()
    };

    let err = updater_with(plex)
        .try_update_library(None, None, None)
        .await
        .unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn test_explicit_host_overrides_configured_server() {
    let configured = MockServerFactory::untouched().await;
    let explicit = MockServer::start().await;
    mount_sections(&explicit, MockData::sections(), 1).await;
    mount_refresh(&explicit, "2", 1).await;

    let settings = TestConfig::library(&configured);
    let host = explicit.address().to_string();
    assert!(
        updater(&settings)
            .update_library(Some(&host), None, None)
            .await
    );
}
