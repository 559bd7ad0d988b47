//! Request execution and response mapping

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::NexusClient;
use crate::error::{CoreError, CoreResult};

/// Maximum characters of a response body included in logs and messages
const TRUNCATE_LIMIT: usize = 256;

/// Retries for idempotent reads that failed at the transport level
const MAX_READ_RETRIES: u32 = 2;

impl NexusClient {
    /// GET a JSON document
    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        kind: &str,
        id: &str,
    ) -> CoreResult<T> {
        let mut attempt = 0;
        let text = loop {
            match execute(self.request(Method::GET, path), "GET", path).await {
                Err(CoreError::NetworkError(detail)) if attempt < MAX_READ_RETRIES => {
                    let delay = backoff_delay(attempt);
                    log::warn!(
                        "GET {path} failed (attempt {}/{MAX_READ_RETRIES}), retrying in {:.1}s: {detail}",
                        attempt + 1,
                        delay.as_secs_f32()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
                Ok((status, body)) => break check_status(status, body, kind, id)?,
            }
        };

        serde_json::from_str(&text).map_err(|e| {
            log::error!("JSON parse failed for {path}: {e}");
            log::error!("Raw response: {}", truncate_for_log(&text));
            CoreError::SerializationError(e.to_string())
        })
    }

    /// POST/PUT a JSON body, ignoring the response body
    pub(super) async fn send_json<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        kind: &str,
        id: &str,
    ) -> CoreResult<()> {
        let method_name = method.to_string();
        let request = self.request(method, path).json(body);
        let (status, text) = execute(request, &method_name, path).await?;
        check_status(status, text, kind, id).map(|_| ())
    }

    pub(super) async fn delete_item(&self, path: &str, kind: &str, id: &str) -> CoreResult<()> {
        let (status, text) = execute(self.request(Method::DELETE, path), "DELETE", path).await?;
        check_status(status, text, kind, id).map(|_| ())
    }
}

/// Send a request and read the body
async fn execute(request: RequestBuilder, method: &str, path: &str) -> CoreResult<(u16, String)> {
    log::debug!("{method} {path}");

    let response = request
        .send()
        .await
        .map_err(|e| CoreError::NetworkError(e.to_string()))?;

    let status = response.status().as_u16();
    log::debug!("Response Status: {status}");

    let text = response
        .text()
        .await
        .map_err(|e| CoreError::NetworkError(format!("Failed to read response body: {e}")))?;
    log::debug!("Response Body: {}", truncate_for_log(&text));

    Ok((status, text))
}

/// Map non-success statuses to errors, pass the body through otherwise
fn check_status(status: u16, body: String, kind: &str, id: &str) -> CoreResult<String> {
    match status {
        200..=299 => Ok(body),
        401 | 403 => Err(CoreError::Unauthorized(
            error_message(&body).unwrap_or_else(|| format!("HTTP {status}")),
        )),
        404 => Err(CoreError::not_found(kind, id)),
        _ => Err(CoreError::ApiError {
            status,
            message: error_message(&body).unwrap_or_else(|| format!("HTTP {status}")),
        }),
    }
}

/// Validation failure entry as returned by the server
#[derive(Debug, Deserialize)]
struct ValidationErrorEntry {
    #[serde(default)]
    id: Option<String>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract a human message from an error body.
///
/// The server answers validation failures with `[{"id": ..., "message": ...}]`,
/// other failures with `{"message": ...}` or plain text.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(entries) = serde_json::from_str::<Vec<ValidationErrorEntry>>(body) {
        let messages: Vec<String> = entries
            .into_iter()
            .map(|entry| match entry.id {
                Some(id) if !id.is_empty() && id != "*" => format!("{id}: {}", entry.message),
                _ => entry.message,
            })
            .collect();
        if !messages.is_empty() {
            return Some(messages.join("; "));
        }
    }
    if let Ok(error) = serde_json::from_str::<ErrorBody>(body) {
        return Some(error.message);
    }
    Some(truncate_for_log(body))
}

/// Exponential backoff: 200ms, 400ms, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(200_u64.saturating_mul(1_u64 << attempt.min(10)))
}

/// MSRV-compatible replacement for `str::floor_char_boundary`
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging
fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(check_status(204, String::new(), "Role", "x"), Ok(String::new()));
        assert!(matches!(
            check_status(401, String::new(), "Role", "x"),
            Err(CoreError::Unauthorized(message)) if message == "HTTP 401"
        ));
        assert_eq!(
            check_status(404, String::new(), "Role", "nx-dev"),
            Err(CoreError::not_found("Role", "nx-dev"))
        );
        assert!(matches!(
            check_status(500, "boom".to_string(), "Role", "x"),
            Err(CoreError::ApiError { status: 500, message }) if message == "boom"
        ));
    }

    #[test]
    fn validation_messages_are_joined() {
        let body = r#"[{"id":"name","message":"Name is already used"},{"id":"*","message":"Bad request"}]"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("name: Name is already used; Bad request")
        );
        assert_eq!(
            error_message(r#"{"message":"Policy in use"}"#).as_deref(),
            Some("Policy in use")
        );
        assert_eq!(error_message("  "), None);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "é".repeat(200);
        let truncated = truncate_for_log(&long);
        assert!(truncated.contains("[truncated, total 400 bytes]"));
        assert_eq!(truncate_for_log("short"), "short");
    }

    #[test]
    fn backoff_grows() {
        assert_eq!(backoff_delay(0), Duration::from_millis(200));
        assert_eq!(backoff_delay(1), Duration::from_millis(400));
    }
}
