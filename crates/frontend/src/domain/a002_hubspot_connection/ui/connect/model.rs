use crate::shared::api_utils::{post_form, post_form_text, ApiError};
use contracts::domain::a001_integration::credentials_present;
use contracts::usecases::u502_hubspot_oauth::OAuthIdentityForm;
use serde_json::Value;

pub const AUTHORIZE_PATH: &str = "/integrations/hubspot/authorize";
pub const CREDENTIALS_PATH: &str = "/integrations/hubspot/credentials";

/// Получить URL авторизации Hubspot
pub async fn authorize(identity: &OAuthIdentityForm) -> Result<String, ApiError> {
    let url: String = post_form(AUTHORIZE_PATH, identity).await?;
    if url.trim().is_empty() {
        return Err(ApiError::transport("Empty authorization URL"));
    }
    Ok(url)
}

/// Забрать креды после закрытия окна авторизации
pub async fn fetch_credentials(identity: &OAuthIdentityForm) -> Result<Option<Value>, ApiError> {
    let text = post_form_text(CREDENTIALS_PATH, identity).await?;
    parse_credentials(&text)
}

/// Пустое тело или пустые креды — `None`
pub fn parse_credentials(text: &str) -> Result<Option<Value>, ApiError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ApiError::transport(format!("Failed to parse credentials: {}", e)))?;
    Ok(Some(value).filter(credentials_present))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_credentials() {
        assert_eq!(
            parse_credentials(r#"{"access_token":"at"}"#).unwrap(),
            Some(json!({"access_token": "at"}))
        );
        assert_eq!(parse_credentials("").unwrap(), None);
        assert_eq!(parse_credentials("  \n").unwrap(), None);
        assert_eq!(parse_credentials("null").unwrap(), None);
        assert_eq!(parse_credentials("{}").unwrap(), None);
    }

    #[test]
    fn test_parse_credentials_garbage() {
        assert!(parse_credentials("<html>").is_err());
    }
}
