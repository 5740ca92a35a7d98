//! Network configuration and request helpers
//!
//! This module owns the shared HTTP client (timeouts, user agent, proxy)
//! and the Basic-auth header used by both the client commands and the
//! Plex.tv sign-in.

use crate::config::NetworkSettings;
use crate::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Proxy, Response};
use tracing::debug;

/// Username/password pair for Basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Basic base64(username:password)`
    pub fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Network manager for HTTP requests
#[derive(Debug, Clone)]
pub struct NetworkManager {
    /// Base HTTP client
    client: Client,
    /// Request timeout in seconds, kept for error reporting
    request_timeout: u64,
}

impl NetworkManager {
    /// Create new network manager from settings
    pub fn new(settings: &NetworkSettings) -> Result<Self> {
        let mut client_builder = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.request_timeout());

        if let Some(proxy_url) = &settings.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::config("proxy", &format!("Invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder.build().map_err(|e| {
            Error::config(
                "network",
                &format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self {
            client,
            request_timeout: settings.request_timeout,
        })
    }

    /// Perform a single HTTP request; no retries are attempted
    ///
    /// Transport failures are classified as timeout or network errors. The
    /// response status is not checked here.
    pub async fn send(&self, url: &str, options: &RequestOptions) -> Result<Response> {
        let mut request = self
            .client
            .request(options.method.clone(), url)
            .headers(options.headers.clone());

        if let Some(credentials) = &options.credentials {
            request = request.header(AUTHORIZATION, credentials.basic_auth_header());
        }
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }

        debug!(
            "PLEX: {} {} (auth header: {})",
            options.method,
            url,
            options.credentials.is_some()
        );

        request
            .send()
            .await
            .map_err(|e| self.classify(url, e))
    }

    /// Perform a request and return the body of a successful (2xx) response
    pub async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Vec<u8>> {
        let response = self.send(url, options).await?;
        let response = response.error_for_status()?;
        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify(url, e))?;
        Ok(body.to_vec())
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(url.to_string(), self.request_timeout)
        } else if e.is_connect() {
            Error::network(format!("Couldn't connect to {}: {}", url, e))
        } else {
            Error::Http(e)
        }
    }
}

/// HTTP request options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Extra request headers
    pub headers: HeaderMap,
    /// Basic-auth credentials
    pub credentials: Option<Credentials>,
    /// Request body
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            credentials: None,
            body: None,
        }
    }
}

impl RequestOptions {
    /// Create new request options (GET, no headers)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set HTTP method
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add header
    pub fn with_header(mut self, name: &'static str, value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value).map_err(|e| {
            Error::config(name, &format!("Invalid header value: {}", e))
        })?;
        self.headers.insert(HeaderName::from_static(name), value);
        Ok(self)
    }

    /// Attach Basic-auth credentials
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set request body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
