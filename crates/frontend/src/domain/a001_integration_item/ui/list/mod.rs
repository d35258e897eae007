pub mod model;
pub mod state;

use self::state::create_state;
use crate::shared::alert::show_alert;
use crate::shared::date_utils::{format_timestamp, NOT_AVAILABLE};
use contracts::domain::a001_integration::Provider;
use contracts::domain::a002_integration_item::IntegrationItem;
use contracts::usecases::u501_load_items::HubspotObjectType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thaw::*;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn item_row(item: IntegrationItem) -> impl IntoView {
    let directory = yes_no(item.is_directory());
    let visibility = yes_no(item.is_visible());
    let created = format_timestamp(item.creation_time.as_deref());
    let modified = format_timestamp(item.last_modified_time.as_deref());
    let url_cell = match item.url {
        Some(url) if !url.is_empty() => view! {
            <a href=url.clone() target="_blank" rel="noopener noreferrer">{url.clone()}</a>
        }
        .into_any(),
        _ => view! { <span>{NOT_AVAILABLE}</span> }.into_any(),
    };

    view! {
        <TableRow>
            <TableCell>{item.id.unwrap_or_default()}</TableCell>
            <TableCell>{item.kind.unwrap_or_default()}</TableCell>
            <TableCell>{item.name.unwrap_or_default()}</TableCell>
            <TableCell>{item.email.unwrap_or_default()}</TableCell>
            <TableCell>{directory}</TableCell>
            <TableCell>{visibility}</TableCell>
            <TableCell>{created}</TableCell>
            <TableCell>{modified}</TableCell>
            <TableCell>{url_cell}</TableCell>
        </TableRow>
    }
}

/// Панель загрузки записей подключённой интеграции
#[component]
#[allow(non_snake_case)]
pub fn DataForm(
    #[prop(into)] integration_type: Signal<Provider>,
    #[prop(into)] credentials: Signal<Option<Value>>,
) -> impl IntoView {
    let state = create_state();
    let select_value = RwSignal::new(String::new());

    // Выбор типа объекта Hubspot → состояние
    Effect::new(move |_| {
        let selected = HubspotObjectType::from_str(&select_value.get());
        state.update(|s| s.select_object_type(selected));
    });

    // Автозагрузка при смене типа объекта намеренно не делается:
    // загрузка только по кнопке.

    let load_data = move || {
        let provider = integration_type.get_untracked();
        let creds = credentials.get_untracked();

        let Some(form) = state
            .try_update(|s| s.begin_load(provider, creds.as_ref()))
            .flatten()
        else {
            log::debug!("DataForm: load skipped for {}", provider.name());
            return;
        };

        log::info!(
            "DataForm: loading {} items (object_type={:?})",
            provider.name(),
            form.object_type
        );

        spawn_local(async move {
            let result = model::load_items(provider, &form).await;
            match &result {
                Ok(items) => log::info!("DataForm: loaded {} items", items.len()),
                Err(e) => log::error!("DataForm: load failed: {}", e),
            }
            if let Some(message) = state.try_update(|s| s.finish_load(result)).flatten() {
                show_alert(&message);
            }
        });
    };

    let handle_clear = move || {
        state.update(|s| s.clear());
    };

    let is_loading = Signal::derive(move || state.with(|s| s.loading));

    view! {
        <div class="data-form" style="display: flex; flex-direction: column; align-items: center; width: 100%; padding: 16px; box-sizing: border-box;">
            <Show when=move || integration_type.get() == Provider::Hubspot>
                <div style="width: 300px; margin-bottom: 16px;">
                    <label style="font-size: 13px; display: block; margin-bottom: 4px;">"Select Data Type"</label>
                    <Select value=select_value>
                        <option value="">"-- Select Data Type --"</option>
                        {HubspotObjectType::ALL
                            .into_iter()
                            .map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> })
                            .collect_view()}
                    </Select>
                </div>
            </Show>

            <div style="display: flex; gap: 16px; margin-bottom: 16px;">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| load_data()
                    disabled=is_loading
                >
                    {move || if is_loading.get() { "Loading..." } else { "Load Data" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| handle_clear()
                    disabled=is_loading
                >
                    "Clear Data"
                </Button>
            </div>

            <Show
                when=move || state.with(|s| !s.items.is_empty())
                fallback=|| view! {
                    <p style="color: var(--thaw-color-neutral-foreground-2);">"No data loaded."</p>
                }
            >
                <div style="max-height: 400px; width: 100%; overflow: auto;">
                    <Table attr:aria-label="integration items table">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell><b>"ID"</b></TableHeaderCell>
                                <TableHeaderCell><b>"Type"</b></TableHeaderCell>
                                <TableHeaderCell><b>"Name"</b></TableHeaderCell>
                                <TableHeaderCell><b>"Email"</b></TableHeaderCell>
                                <TableHeaderCell><b>"Directory"</b></TableHeaderCell>
                                <TableHeaderCell><b>"Visibility"</b></TableHeaderCell>
                                <TableHeaderCell><b>"Creation Time"</b></TableHeaderCell>
                                <TableHeaderCell><b>"Last Modified Time"</b></TableHeaderCell>
                                <TableHeaderCell><b>"URL"</b></TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                state
                                    .with(|s| s.items.clone())
                                    .into_iter()
                                    .map(item_row)
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </Show>
        </div>
    }
}
