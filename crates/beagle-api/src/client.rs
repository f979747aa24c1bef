// reqwest-backed `Transport` for the beagle-wind REST API.
//
// Base path: /api/v1/
// Auth: optional bearer token (installed by `TransportConfig`)

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::{Transport, TransportConfig};

const API_PREFIX: &str = "api/v1";

// ── Error response shape from the API ────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// HTTP transport for the game platform API.
///
/// All request paths are resolved under `{base_url}/api/v1/`. Responses are
/// returned as raw JSON; envelope handling happens in the data layer, which
/// has to tolerate several envelope shapes.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a server URL and transport config.
    pub fn new(base_url: &str, config: &TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The resolved API root, always ending in `/api/v1/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `/api/v1/` unless the caller already pointed at it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with(&format!("/{API_PREFIX}")) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/{API_PREFIX}/"));
        }
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve a relative path, percent-encoding each segment so ids
    /// cannot escape their position in the path.
    fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        trace!(bytes = body.len(), "response body received");
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..floor_char_boundary(&body, 200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw[..floor_char_boundary(&raw, 200)].to_owned()
                }
            });

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Authentication { message };
        }

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, Error> {
        let url = self.url(path);
        debug!("GET {url} params={query:?}");

        let resp = self.http.get(url).query(query).send().await?;
        Self::handle_response(resp).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let builder = self.http.post(url);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<Value, Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_response(resp).await
    }
}

/// Largest index `<= max` that sits on a char boundary of `s`.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
