use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Enums
// ============================================================================

/// Сторонний сервис, к которому подключается дашборд
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Notion,
    Airtable,
    Hubspot,
}

impl Default for Provider {
    fn default() -> Self {
        Self::Hubspot
    }
}

impl Provider {
    pub const ALL: [Provider; 3] = [Self::Notion, Self::Airtable, Self::Hubspot];

    /// Отображаемое имя, оно же тег `type` в параметрах интеграции
    pub fn name(&self) -> &'static str {
        match self {
            Self::Notion => "Notion",
            Self::Airtable => "Airtable",
            Self::Hubspot => "Hubspot",
        }
    }

    /// Сегмент URL: `/integrations/{endpoint}/...`
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Notion => "notion",
            Self::Airtable => "airtable",
            Self::Hubspot => "hubspot",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

// ============================================================================
// Integration params
// ============================================================================

/// Параметры подключённой интеграции.
///
/// Объектом владеет родительский компонент; дочерние компоненты только
/// читают его или заменяют целиком.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationParams {
    #[serde(default)]
    pub credentials: Option<Value>,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl IntegrationParams {
    pub fn for_provider(provider: Provider, credentials: Value) -> Self {
        Self {
            credentials: Some(credentials),
            kind: Some(provider.name().to_string()),
        }
    }

    pub fn provider(&self) -> Option<Provider> {
        self.kind.as_deref().and_then(Provider::from_name)
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.as_ref().is_some_and(credentials_present)
    }

    /// Подключено ли к `provider`: тег совпадает и креды не пустые
    pub fn is_connected_to(&self, provider: Provider) -> bool {
        self.kind.as_deref() == Some(provider.name()) && self.has_credentials()
    }
}

/// Непустой ли набор кредов.
///
/// Пустыми считаются `null`, `false`, `0`, `""`, `{}` и `[]`.
pub fn credentials_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
