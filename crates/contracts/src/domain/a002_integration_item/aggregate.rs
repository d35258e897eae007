use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Нормализованная запись, которую отдаёт `/integrations/{provider}/load`.
///
/// Все поля опциональны: разные провайдеры заполняют разный набор, а id
/// у некоторых приходит числом.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationItem {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "loose_string")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "truthy")]
    pub directory: Option<bool>,

    #[serde(default, deserialize_with = "truthy")]
    pub visibility: Option<bool>,

    #[serde(default, deserialize_with = "loose_string")]
    pub creation_time: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub last_modified_time: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub url: Option<String>,
}

impl IntegrationItem {
    pub fn is_directory(&self) -> bool {
        self.directory.unwrap_or(false)
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.unwrap_or(false)
    }

    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.creation_time.as_deref())
    }

    pub fn modified_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.last_modified_time.as_deref())
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Some(Value::String(s)) => Some(!s.is_empty()),
        Some(_) => Some(true),
    })
}
