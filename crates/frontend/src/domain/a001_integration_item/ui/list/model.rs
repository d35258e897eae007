use crate::shared::api_utils::{post_form, ApiError};
use contracts::domain::a001_integration::Provider;
use contracts::domain::a002_integration_item::IntegrationItem;
use contracts::usecases::u501_load_items::LoadItemsForm;

pub fn load_path(provider: Provider) -> String {
    format!("/integrations/{}/load", provider.endpoint())
}

/// Загрузить записи интеграции
pub async fn load_items(
    provider: Provider,
    form: &LoadItemsForm,
) -> Result<Vec<IntegrationItem>, ApiError> {
    post_form(&load_path(provider), form).await
}
