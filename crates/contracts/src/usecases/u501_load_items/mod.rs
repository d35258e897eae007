use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Тип объектов Hubspot, которые можно загрузить
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HubspotObjectType {
    Contacts,
    Deals,
    Companies,
}

impl HubspotObjectType {
    pub const ALL: [HubspotObjectType; 3] = [Self::Contacts, Self::Deals, Self::Companies];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Deals => "deals",
            Self::Companies => "companies",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Тело формы для `POST /integrations/{provider}/load`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadItemsForm {
    /// Креды, сериализованные в JSON-строку
    pub credentials: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}

impl LoadItemsForm {
    pub fn new(credentials: &Value, object_type: Option<HubspotObjectType>) -> Self {
        Self {
            credentials: credentials.to_string(),
            object_type: object_type.map(|t| t.as_str().to_string()),
        }
    }
}
