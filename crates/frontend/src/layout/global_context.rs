use contracts::domain::a001_integration::{IntegrationParams, Provider};
use leptos::prelude::*;

pub const DEFAULT_USER_ID: &str = "TestUser";
pub const DEFAULT_ORG_ID: &str = "TestOrg";

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub user_id: RwSignal<String>,
    pub org_id: RwSignal<String>,
    /// Параметры подключённой интеграции; единственный владелец — этот контекст.
    /// Живут только в памяти страницы.
    pub integration_params: RwSignal<Option<IntegrationParams>>,
    pub selected_provider: RwSignal<Provider>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            user_id: RwSignal::new(DEFAULT_USER_ID.to_string()),
            org_id: RwSignal::new(DEFAULT_ORG_ID.to_string()),
            integration_params: RwSignal::new(None),
            selected_provider: RwSignal::new(Provider::default()),
        }
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
