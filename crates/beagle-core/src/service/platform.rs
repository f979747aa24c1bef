// ── Platform remote-access links ──
//
// Unlike every other service call, these return errors: a dashboard has to
// tell "this platform has no link" (`Ok("")`) apart from "the link service
// is down right now" (`Err`).

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::extract::extract_one;
use crate::mock;
use crate::model::{Platform, Resource};

use super::{ResourceService, unix_millis};

const MOCK_ACCESS_HOST: &str = "https://remote-access.example.com";

impl ResourceService<Platform> {
    /// Current remote-access URL for the platform.
    pub async fn get_access(&self, id: &str) -> Result<String, CoreError> {
        if !self.is_live() {
            mock::delay(self.latency.read).await;
            return Ok(mock_access_url(id));
        }

        let path = format!("{}/access", self.item_path(id));
        let response = self
            .transport
            .get(&path, &[])
            .await
            .map_err(|e| CoreError::transport("get_access", e));
        access_url("get_access", id, response)
    }

    /// Rotate the access token and return the new URL.
    pub async fn refresh_access(&self, id: &str) -> Result<String, CoreError> {
        if !self.is_live() {
            mock::delay(self.latency.write).await;
            return Ok(mock_access_url(id));
        }

        let path = format!("{}/access/refresh", self.item_path(id));
        let response = self
            .transport
            .post(&path, None)
            .await
            .map_err(|e| CoreError::transport("refresh_access", e));
        access_url("refresh_access", id, response)
    }
}

fn mock_access_url(id: &str) -> String {
    format!("{MOCK_ACCESS_HOST}/{id}?token=mock-token-{}", unix_millis())
}

fn access_url(
    operation: &'static str,
    id: &str,
    response: Result<Value, CoreError>,
) -> Result<String, CoreError> {
    let response = response.inspect_err(|e| {
        debug!(kind = Platform::KIND, operation, id, error = %e, "access link request failed");
    })?;

    match extract_one(response, Value::Null) {
        Value::Object(map) => match map.get("url") {
            Some(Value::String(url)) => Ok(url.clone()),
            Some(Value::Null) | None => {
                warn!(kind = Platform::KIND, operation, id, "no access link configured");
                Ok(String::new())
            }
            Some(other) => Err(CoreError::shape(
                operation,
                format!("`url` is not a string: {other}"),
            )),
        },
        other => Err(CoreError::shape(
            operation,
            format!("expected an object, got {other}"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mock_url_carries_id_and_token() {
        let url = mock_access_url("steam");
        assert!(url.starts_with("https://remote-access.example.com/steam?token=mock-token-"));
    }

    #[test]
    fn enveloped_url_is_extracted() {
        let url = access_url("get_access", "steam", Ok(json!({"data": {"url": "https://x/y"}})));
        assert_eq!(url.unwrap(), "https://x/y");
    }

    #[test]
    fn object_without_url_is_empty_link() {
        let url = access_url("get_access", "steam", Ok(json!({"expiresAt": 0})));
        assert_eq!(url.unwrap(), "");
    }

    #[test]
    fn non_object_is_shape_mismatch() {
        let err = access_url("get_access", "steam", Ok(json!(["https://x"]))).unwrap_err();
        assert!(matches!(err, CoreError::ShapeMismatch { .. }));

        let err = access_url("get_access", "steam", Ok(Value::Null)).unwrap_err();
        assert!(matches!(err, CoreError::ShapeMismatch { .. }));
    }
}
