use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Тело формы для `/integrations/hubspot/authorize` и `/credentials`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthIdentityForm {
    pub user_id: String,
    pub org_id: String,
}

impl OAuthIdentityForm {
    pub fn new(user_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            org_id: org_id.into(),
        }
    }
}

/// Стандартное тело ошибки сервера: `{"detail": ...}`.
///
/// Ошибки валидации приходят с `detail`-массивом, поэтому поле не строка.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ApiErrorBody {
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"detail":"bad creds"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("bad creds"));
    }

    #[test]
    fn test_detail_missing_or_empty() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"x"}"#).unwrap();
        assert_eq!(body.message(), None);
        let body: ApiErrorBody = serde_json::from_str(r#"{"detail":""}"#).unwrap();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn test_detail_structured() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","user_id"]}]}"#).unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some(r#"[{"loc":["body","user_id"]}]"#)
        );
    }
}
