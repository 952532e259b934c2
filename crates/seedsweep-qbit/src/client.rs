//! Session-based client for the qBittorrent Web API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, REFERER, SET_COOKIE};
use reqwest::{Client, Response, StatusCode};
use seedsweep_torrent_core::{
    TorrentError, TorrentFilter, TorrentLister, TorrentRecord, TorrentResult,
};
use tracing::debug;
use url::Url;

use crate::model::QbitTorrent;

const LOGIN_PATH: &str = "api/v2/auth/login";
const TORRENTS_INFO_PATH: &str = "api/v2/torrents/info";
const SESSION_COOKIE: &str = "SID";
const LOGIN_OK_BODY: &str = "Ok.";
const DETAIL_LIMIT: usize = 200;

/// Web UI credentials.
#[derive(Clone)]
pub struct QbitCredentials {
    /// Web UI username.
    pub username: String,
    /// Web UI password.
    pub password: String,
}

impl std::fmt::Debug for QbitCredentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("QbitCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Client bound to one qBittorrent instance.
///
/// Every listing logs in afresh when credentials are configured; without
/// credentials the daemon is expected to bypass authentication (for example
/// for localhost clients).
#[derive(Debug, Clone)]
pub struct QbitClient {
    http: Client,
    base_url: Url,
    credentials: Option<QbitCredentials>,
}

impl QbitClient {
    /// Build a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed (for
    /// example when the TLS backend fails to initialise).
    pub fn new(
        base_url: Url,
        credentials: Option<QbitCredentials>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(http, base_url, credentials))
    }

    /// Build a client on top of an existing HTTP client.
    #[must_use]
    pub fn with_http_client(
        http: Client,
        mut base_url: Url,
        credentials: Option<QbitCredentials>,
    ) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// Base URL every API path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Log in when credentials are configured and return the session cookie.
    async fn login(&self) -> TorrentResult<Option<String>> {
        let Some(credentials) = &self.credentials else {
            debug!("no credentials configured; skipping login");
            return Ok(None);
        };

        let url = self.endpoint(LOGIN_PATH, "auth_login")?;
        let response = self
            .http
            .post(url)
            .header(REFERER, self.base_url.as_str())
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|err| self.unreachable(err))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(self.rejected(Some(status)));
        }
        if !status.is_success() {
            return Err(query_failed("auth_login", response).await);
        }

        let session = session_cookie(&response);
        let body = response.text().await.map_err(|err| TorrentError::Decode {
            operation: "auth_login",
            source: Box::new(err),
        })?;
        if body.trim() != LOGIN_OK_BODY {
            return Err(self.rejected(None));
        }

        debug!(session = session.is_some(), "logged in to qBittorrent");
        Ok(session)
    }

    async fn torrents_info(
        &self,
        filter: TorrentFilter,
        session: Option<&str>,
    ) -> TorrentResult<Vec<QbitTorrent>> {
        let url = self.endpoint(TORRENTS_INFO_PATH, "torrents_info")?;
        let mut request = self
            .http
            .get(url)
            .query(&[("filter", filter.as_str())]);
        if let Some(session) = session {
            request = request.header(COOKIE, format!("{SESSION_COOKIE}={session}"));
        }

        let response = request.send().await.map_err(|err| self.unreachable(err))?;
        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(self.rejected(Some(status)));
        }
        if !status.is_success() {
            return Err(query_failed("torrents_info", response).await);
        }

        response
            .json::<Vec<QbitTorrent>>()
            .await
            .map_err(|err| TorrentError::Decode {
                operation: "torrents_info",
                source: Box::new(err),
            })
    }

    fn endpoint(&self, path: &str, operation: &'static str) -> TorrentResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| TorrentError::Decode {
                operation,
                source: Box::new(err),
            })
    }

    fn unreachable(&self, err: reqwest::Error) -> TorrentError {
        TorrentError::Unreachable {
            endpoint: self.base_url.to_string(),
            source: Box::new(err),
        }
    }

    fn rejected(&self, status: Option<StatusCode>) -> TorrentError {
        TorrentError::AuthenticationRejected {
            endpoint: self.base_url.to_string(),
            status: status.map(|status| status.as_u16()),
        }
    }
}

#[async_trait]
impl TorrentLister for QbitClient {
    async fn list_torrents(&self, filter: TorrentFilter) -> TorrentResult<Vec<TorrentRecord>> {
        let session = self.login().await?;
        let torrents = self.torrents_info(filter, session.as_deref()).await?;
        debug!(
            filter = filter.as_str(),
            count = torrents.len(),
            "fetched torrent list"
        );
        Ok(torrents.into_iter().map(TorrentRecord::from).collect())
    }
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

async fn query_failed(operation: &'static str, response: Response) -> TorrentError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let trimmed = body.trim();
    let detail = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(DETAIL_LIMIT).collect())
    };
    TorrentError::QueryFailed {
        operation,
        status,
        detail,
    }
}
