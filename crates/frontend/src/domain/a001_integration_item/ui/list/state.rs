use crate::shared::api_utils::ApiError;
use contracts::domain::a001_integration::Provider;
use contracts::domain::a002_integration_item::IntegrationItem;
use contracts::usecases::u501_load_items::{HubspotObjectType, LoadItemsForm};
use leptos::prelude::*;
use serde_json::Value;

pub const LOAD_ERROR_FALLBACK: &str = "Error loading data";

/// Креды, с которыми стоит идти на сервер: всё, кроме `null`, `false`, `0`
/// и `""`. Пустые `{}` и `[]` отправляются, сервер сам ответит ошибкой.
fn credentials_loadable(credentials: &Value) -> bool {
    match credentials {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Состояние панели загрузки записей
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataFormState {
    pub items: Vec<IntegrationItem>,
    pub loading: bool,
    pub selected_object_type: Option<HubspotObjectType>,
}

impl DataFormState {
    /// Подготовить запрос загрузки.
    ///
    /// `None` — запрос не нужен: нет кредов или загрузка уже идёт.
    pub fn begin_load(
        &mut self,
        provider: Provider,
        credentials: Option<&Value>,
    ) -> Option<LoadItemsForm> {
        if self.loading {
            return None;
        }
        let credentials = credentials.filter(|c| credentials_loadable(c))?;

        let object_type = match provider {
            Provider::Hubspot => self.selected_object_type,
            _ => None,
        };
        self.loading = true;
        Some(LoadItemsForm::new(credentials, object_type))
    }

    /// Применить результат загрузки. Возвращает текст алерта при ошибке.
    pub fn finish_load(&mut self, result: Result<Vec<IntegrationItem>, ApiError>) -> Option<String> {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                None
            }
            Err(e) => {
                self.items.clear();
                Some(e.user_message(LOAD_ERROR_FALLBACK))
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn select_object_type(&mut self, object_type: Option<HubspotObjectType>) {
        self.selected_object_type = object_type;
    }
}

pub fn create_state() -> RwSignal<DataFormState> {
    RwSignal::new(DataFormState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::error_from_response;
    use serde_json::json;

    fn item(id: &str) -> IntegrationItem {
        IntegrationItem {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_credentials_no_request() {
        let mut state = DataFormState::default();
        assert!(state.begin_load(Provider::Notion, None).is_none());
        assert!(state.begin_load(Provider::Notion, Some(&Value::Null)).is_none());
        assert!(state.begin_load(Provider::Notion, Some(&json!(false))).is_none());
        assert!(state.begin_load(Provider::Notion, Some(&json!(0))).is_none());
        assert!(state.begin_load(Provider::Notion, Some(&json!(""))).is_none());
        assert!(!state.loading);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_empty_object_credentials_still_load() {
        let mut state = DataFormState::default();
        let form = state.begin_load(Provider::Notion, Some(&json!({}))).unwrap();
        assert_eq!(form.credentials, "{}");
        assert!(state.loading);

        state.finish_load(Ok(Vec::new()));
        let form = state.begin_load(Provider::Airtable, Some(&json!([]))).unwrap();
        assert_eq!(form.credentials, "[]");
    }

    #[test]
    fn test_single_load_in_flight() {
        let mut state = DataFormState::default();
        let creds = json!({"access_token": "t"});
        assert!(state.begin_load(Provider::Airtable, Some(&creds)).is_some());
        assert!(state.loading);
        assert!(state.begin_load(Provider::Airtable, Some(&creds)).is_none());
    }

    #[test]
    fn test_object_type_only_for_hubspot() {
        let creds = json!({"access_token": "t"});
        let mut state = DataFormState::default();
        state.select_object_type(Some(HubspotObjectType::Deals));

        let form = state.begin_load(Provider::Hubspot, Some(&creds)).unwrap();
        assert_eq!(form.object_type.as_deref(), Some("deals"));
        state.finish_load(Ok(vec![]));

        let form = state.begin_load(Provider::Notion, Some(&creds)).unwrap();
        assert_eq!(form.object_type, None);
        assert_eq!(form.credentials, r#"{"access_token":"t"}"#);
    }

    #[test]
    fn test_hubspot_without_selection() {
        let creds = json!({"access_token": "t"});
        let mut state = DataFormState::default();
        let form = state.begin_load(Provider::Hubspot, Some(&creds)).unwrap();
        assert_eq!(form.object_type, None);
    }

    #[test]
    fn test_success_replaces_items() {
        let mut state = DataFormState {
            items: vec![item("old-1"), item("old-2")],
            ..Default::default()
        };
        state.loading = true;
        let alert = state.finish_load(Ok(vec![item("new-1")]));
        assert!(alert.is_none());
        assert!(!state.loading);
        assert_eq!(state.items, vec![item("new-1")]);
    }

    #[test]
    fn test_failure_clears_and_alerts_detail() {
        let mut state = DataFormState {
            items: vec![item("old")],
            loading: true,
            ..Default::default()
        };
        let alert = state.finish_load(Err(error_from_response(500, r#"{"detail":"bad creds"}"#)));
        assert_eq!(alert.as_deref(), Some("bad creds"));
        assert!(state.items.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_failure_without_detail_uses_fallback() {
        let mut state = DataFormState::default();
        let alert = state.finish_load(Err(ApiError::transport("Failed to send request")));
        assert_eq!(alert.as_deref(), Some(LOAD_ERROR_FALLBACK));
    }

    #[test]
    fn test_clear() {
        let mut state = DataFormState {
            items: vec![item("a"), item("b")],
            ..Default::default()
        };
        state.clear();
        assert!(state.items.is_empty());
        state.clear();
        assert!(state.items.is_empty());
    }
}
