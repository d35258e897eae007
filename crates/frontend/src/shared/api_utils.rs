//! API utilities for frontend-backend communication
//!
//! All integration endpoints take `application/x-www-form-urlencoded`
//! bodies and report failures as `{"detail": ...}`.

use contracts::usecases::u502_hubspot_oauth::ApiErrorBody;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Default integrations server
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Get the base URL for API requests
///
/// Can be overridden at build time with `INTEGRATIONS_API_BASE`.
pub fn api_base() -> String {
    normalize_base(option_env!("INTEGRATIONS_API_BASE").unwrap_or(DEFAULT_API_BASE))
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/integrations/hubspot/authorize");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Origin API в виде, в котором его отдаёт браузер (`MessageEvent::origin`).
///
/// `None`, если базовый URL не разбирается.
pub fn api_origin() -> Option<String> {
    web_sys::Url::new(&api_base()).ok().map(|url| url.origin())
}

/// Ошибка запроса к API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP статус, если ответ вообще был получен
    pub status: Option<u16>,
    /// `detail` из тела ошибки сервера
    pub detail: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: None,
            message: message.into(),
        }
    }

    /// Текст для пользователя: detail сервера или `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.detail) {
            (Some(status), Some(detail)) => write!(f, "HTTP {}: {}", status, detail),
            (Some(status), None) => write!(f, "HTTP {}: {}", status, self.message),
            (None, _) => write!(f, "{}", self.message),
        }
    }
}

/// Разобрать неуспешный ответ сервера
pub fn error_from_response(status: u16, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message());
    ApiError {
        status: Some(status),
        detail,
        message: format!("HTTP {}", status),
    }
}

/// POST form-urlencoded, вернуть тело ответа как текст
pub async fn post_form_text<F: Serialize>(path: &str, form: &F) -> Result<String, ApiError> {
    let body = serde_qs::to_string(form)
        .map_err(|e| ApiError::transport(format!("Failed to encode form: {}", e)))?;
    let url = api_url(path);

    log::debug!("POST {}", url);

    let response = Request::post(&url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Accept", "application/json")
        .body(body)
        .map_err(|e| ApiError::transport(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to read response: {}", e)))?;

    if !response.ok() {
        let err = error_from_response(status, &text);
        log::warn!("POST {} failed: {}", url, err);
        return Err(err);
    }

    Ok(text)
}

/// POST form-urlencoded, разобрать JSON-ответ
pub async fn post_form<F, T>(path: &str, form: &F) -> Result<T, ApiError>
where
    F: Serialize,
    T: DeserializeOwned,
{
    let text = post_form_text(path, form).await?;
    serde_json::from_str(&text)
        .map_err(|e| ApiError::transport(format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000", "/integrations/hubspot/load"),
            "http://localhost:8000/integrations/hubspot/load"
        );
        assert_eq!(
            join_url("http://localhost:8000/", "integrations/notion/load"),
            "http://localhost:8000/integrations/notion/load"
        );
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("https://api.example.com/ "), "https://api.example.com");
        assert_eq!(normalize_base(""), DEFAULT_API_BASE);
    }

    #[test]
    fn test_error_with_detail() {
        let err = error_from_response(500, r#"{"detail":"bad creds"}"#);
        assert_eq!(err.status, Some(500));
        assert_eq!(err.user_message("Error loading data"), "bad creds");
        assert_eq!(err.to_string(), "HTTP 500: bad creds");
    }

    #[test]
    fn test_error_without_detail() {
        let err = error_from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.detail, None);
        assert_eq!(err.user_message("Error loading data"), "Error loading data");

        let err = ApiError::transport("Failed to send request: offline");
        assert_eq!(err.user_message("fallback"), "fallback");
        assert_eq!(err.to_string(), "Failed to send request: offline");
    }
}
