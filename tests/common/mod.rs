//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use plex_notifier::{
    LibraryUpdater, PlexNotifier, PlexSettings, Settings, client::NetworkManager,
};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

/// `host:port` of a mock server, the form Plex hosts are configured in
pub fn host_of(server: &MockServer) -> String {
    server.address().to_string()
}

/// Test configuration factory
pub struct TestConfig;

impl TestConfig {
    /// Enabled notifier with short timeouts and no hosts
    pub fn enabled() -> Settings {
        let mut settings = Settings::default();
        settings.plex.enabled = true;
        settings.network.connect_timeout = 2;
        settings.network.request_timeout = 5;
        settings
    }

    /// Enabled notifier pointing at the given client host list
    pub fn with_hosts(hosts: &str) -> Settings {
        let mut settings = Self::enabled();
        settings.plex.host = hosts.to_string();
        settings
    }

    /// Library updates switched on against `server`; sign-in goes to the
    /// same mock server
    pub fn library(server: &MockServer) -> Settings {
        let mut settings = Self::enabled();
        settings.plex.update_library = true;
        settings.plex.server_host = host_of(server);
        settings.plex.auth_url = format!("{}/users/sign_in.xml", server.uri());
        settings
    }
}

pub fn notifier(settings: &Settings) -> PlexNotifier {
    PlexNotifier::new(settings).unwrap()
}

pub fn updater(settings: &Settings) -> LibraryUpdater {
    LibraryUpdater::new(settings).unwrap()
}

pub fn updater_with(plex: PlexSettings) -> LibraryUpdater {
    let network = NetworkManager::new(&TestConfig::enabled().network).unwrap();
    LibraryUpdater::with_network(plex, network)
}

/// Response fixtures
pub struct MockData;

impl MockData {
    pub const TOKEN: &'static str = "qwErTy-TokEn-123";

    pub fn sign_in() -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<user email="viewer@example.com" id="1234" username="viewer">
  <subscription active="0" status="Inactive"/>
  <username>viewer</username>
  <authentication-token>{}</authentication-token>
</user>"#,
            Self::TOKEN
        )
    }

    pub fn sign_in_without_token() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<user email="viewer@example.com" id="1234" username="viewer">
  <username>viewer</username>
</user>"#
    }

    /// One show section (key 2) and one movie section (key 1)
    pub fn sections() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<MediaContainer size="2" allowSync="0" title1="Plex Library">
  <Directory allowSync="1" key="2" type="show" title="TV Shows">
    <Location id="2" path="/media/tv"/>
  </Directory>
  <Directory allowSync="1" key="1" type="movie" title="Movies">
    <Location id="1" path="/media/movies"/>
  </Directory>
</MediaContainer>"#
    }

    pub fn no_sections() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<MediaContainer size="0" allowSync="0"></MediaContainer>"#
    }
}

/// Mock server factory
pub struct MockServerFactory;

impl MockServerFactory {
    /// Plex client that accepts any xbmcCmds command
    pub async fn client_accepting(expected_calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/xbmcCmds/xbmcHttp/"))
            .and(matchers::query_param("command", "ExecBuiltIn"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><li>OK</html>"))
            .expect(expected_calls)
            .mount(&server)
            .await;
        server
    }

    /// Plex client that answers every request with a 500
    pub async fn client_failing() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(matchers::any())
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;
        server
    }

    /// Server that must not receive any request
    pub async fn untouched() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        server
    }
}

/// Test utilities
pub struct TestUtils;

impl TestUtils {
    /// Initialize test logging
    pub fn init_logger() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();
    }
}
