use crate::domain::a001_integration_item::ui::DataForm;
use crate::domain::a002_hubspot_connection::ui::HubspotIntegration;
use crate::layout::global_context::AppGlobalContext;
use contracts::domain::a001_integration::Provider;
use leptos::prelude::*;
use thaw::*;

/// Записать провайдера из селекта; без записи, если он не изменился
fn sync_selected_provider(selected: RwSignal<Provider>, value: &str) -> bool {
    match Provider::from_name(value) {
        Some(provider) if selected.get_untracked() != provider => {
            selected.set(provider);
            true
        }
        _ => false,
    }
}

/// Страница интеграций: идентификация, выбор провайдера, подключение и
/// загрузка данных
#[component]
pub fn IntegrationsPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let provider_value = RwSignal::new(ctx.selected_provider.get_untracked().name().to_string());
    Effect::new(move |_| {
        sync_selected_provider(ctx.selected_provider, &provider_value.get());
    });

    // Провайдер, для которого есть креды (не обязательно выбранный)
    let connected_provider = Memo::new(move |_| {
        ctx.integration_params.with(|params| {
            params
                .as_ref()
                .filter(|p| p.has_credentials())
                .and_then(|p| p.provider())
        })
    });
    let credentials = Signal::derive(move || {
        ctx.integration_params
            .with(|params| params.as_ref().and_then(|p| p.credentials.clone()))
    });

    view! {
        <div class="integrations-page" style="display: flex; flex-direction: column; align-items: center; padding: 24px; gap: 16px;">
            <h2 style="margin: 0; font-size: 1.2rem; font-weight: 600;">"Integrations"</h2>

            <div style="display: grid; grid-template-columns: 1fr 1fr 1fr; gap: 10px; width: 100%; max-width: 900px;">
                <div class="form__group">
                    <label style="font-size: 13px; display: block; margin-bottom: 4px;">"User"</label>
                    <Input value=ctx.user_id placeholder="User ID" />
                </div>
                <div class="form__group">
                    <label style="font-size: 13px; display: block; margin-bottom: 4px;">"Organization"</label>
                    <Input value=ctx.org_id placeholder="Organization ID" />
                </div>
                <div class="form__group">
                    <label style="font-size: 13px; display: block; margin-bottom: 4px;">"Integration Type"</label>
                    <Select value=provider_value>
                        {Provider::ALL
                            .into_iter()
                            .map(|p| view! { <option value=p.name()>{p.name()}</option> })
                            .collect_view()}
                    </Select>
                </div>
            </div>

            <div>
                {move || match ctx.selected_provider.get() {
                    Provider::Hubspot => view! {
                        <HubspotIntegration
                            user=ctx.user_id
                            org=ctx.org_id
                            integration_params=ctx.integration_params
                        />
                    }
                    .into_any(),
                    other => view! {
                        <p style="color: var(--thaw-color-neutral-foreground-2);">
                            {format!("{} connection is not available here.", other.name())}
                        </p>
                    }
                    .into_any(),
                }}
            </div>

            {move || connected_provider.get().map(|provider| view! {
                <DataForm integration_type=provider credentials=credentials />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_selected_provider() {
        let owner = Owner::new();
        owner.with(|| {
            let selected = RwSignal::new(Provider::Hubspot);

            assert!(!sync_selected_provider(selected, "Hubspot"));
            assert!(!sync_selected_provider(selected, "Unknown"));
            assert_eq!(selected.get_untracked(), Provider::Hubspot);

            assert!(sync_selected_provider(selected, "Notion"));
            assert_eq!(selected.get_untracked(), Provider::Notion);
        });
    }
}
