pub mod model;
pub mod state;

use self::state::{
    ConnectAttempt, ConnectState, ConnectionStatus, AUTHORIZE_ERROR_FALLBACK,
    CREDENTIALS_ERROR_FALLBACK,
};
use crate::shared::alert::show_alert;
use crate::shared::popup::{open_popup, wait_for_popup, PopupCancel, PopupOutcome};
use contracts::domain::a001_integration::IntegrationParams;
use contracts::usecases::u502_hubspot_oauth::OAuthIdentityForm;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const POPUP_NAME: &str = "Hubspot Authorization";

fn attempt_is_current(state: RwSignal<ConnectState>, attempt: u64) -> bool {
    state
        .try_with_untracked(|s| s.is_current(attempt))
        .unwrap_or(false)
}

/// Откатить попытку и показать алерт, если попытка ещё актуальна
fn fail_attempt(state: RwSignal<ConnectState>, attempt: u64, message: &str) {
    if state.try_update(|s| s.fail(attempt)).unwrap_or(false) {
        show_alert(message);
    }
}

/// Итог завершения попытки кредами
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Connected,
    NoCredentials,
    Stale,
}

/// Завершить попытку и записать Hubspot-параметры в общее состояние
fn commit_credentials(
    state: RwSignal<ConnectState>,
    integration_params: RwSignal<Option<IntegrationParams>>,
    attempt: u64,
    credentials: Option<serde_json::Value>,
) -> Completion {
    if !attempt_is_current(state, attempt) {
        return Completion::Stale;
    }
    match state.try_update(|s| s.complete(attempt, credentials)).flatten() {
        Some(params) => {
            let _ = integration_params.try_set(Some(params));
            Completion::Connected
        }
        None => Completion::NoCredentials,
    }
}

/// Отключение из любого состояния; общие параметры всегда сбрасываются
fn disconnect_and_clear(
    state: RwSignal<ConnectState>,
    integration_params: RwSignal<Option<IntegrationParams>>,
) {
    state.update(|s| s.disconnect());
    integration_params.set(None);
}

/// authorize → окно → credentials
async fn run_connect_flow(
    state: RwSignal<ConnectState>,
    integration_params: RwSignal<Option<IntegrationParams>>,
    identity: OAuthIdentityForm,
    attempt: ConnectAttempt,
) {
    let url = match model::authorize(&identity).await {
        Ok(url) => url,
        Err(e) => {
            log::error!("Hubspot authorize failed: {}", e);
            fail_attempt(state, attempt.id, &e.user_message(AUTHORIZE_ERROR_FALLBACK));
            return;
        }
    };

    if !attempt_is_current(state, attempt.id) {
        log::debug!("Hubspot attempt {} dropped after authorize", attempt.id);
        return;
    }

    let popup = match open_popup(&url, POPUP_NAME) {
        Ok(popup) => popup,
        Err(e) => {
            log::error!("Hubspot popup failed: {}", e);
            fail_attempt(state, attempt.id, &e);
            return;
        }
    };

    if wait_for_popup(&popup, &attempt.cancel).await == PopupOutcome::Cancelled {
        log::info!("Hubspot attempt {} cancelled", attempt.id);
        return;
    }

    match model::fetch_credentials(&identity).await {
        Ok(credentials) => {
            match commit_credentials(state, integration_params, attempt.id, credentials) {
                Completion::Connected => {
                    log::info!("Hubspot connected for {}/{}", identity.org_id, identity.user_id)
                }
                Completion::NoCredentials => log::warn!("Hubspot returned no credentials"),
                Completion::Stale => {
                    log::debug!("Hubspot attempt {} dropped after credentials", attempt.id)
                }
            }
        }
        Err(e) => {
            log::error!("Hubspot credentials fetch failed: {}", e);
            fail_attempt(state, attempt.id, &e.user_message(CREDENTIALS_ERROR_FALLBACK));
        }
    }
}

/// Кнопки подключения / отключения Hubspot.
///
/// `integration_params` принадлежит родителю; этот компонент — единственный
/// писатель и заменяет значение целиком.
#[component]
#[allow(non_snake_case)]
pub fn HubspotIntegration(
    #[prop(into)] user: Signal<String>,
    #[prop(into)] org: Signal<String>,
    integration_params: RwSignal<Option<IntegrationParams>>,
) -> impl IntoView {
    let state = RwSignal::new(ConnectState::from_params(
        integration_params.get_untracked().as_ref(),
    ));

    // Отменяет ожидание окна при размонтировании
    let teardown = PopupCancel::new();
    on_cleanup({
        let teardown = teardown.clone();
        move || {
            log!("HubspotIntegration DESTROYED");
            teardown.cancel();
        }
    });

    let handle_connect = move || {
        let Some(attempt) = state
            .try_update(|s| s.begin_connect(teardown.child()))
            .flatten()
        else {
            return;
        };
        log::info!("Hubspot connect attempt {}", attempt.id);
        let identity = OAuthIdentityForm::new(user.get_untracked(), org.get_untracked());
        spawn_local(run_connect_flow(state, integration_params, identity, attempt));
    };

    let handle_disconnect = move || {
        disconnect_and_clear(state, integration_params);
        log::info!("Hubspot disconnected");
    };

    let status = Signal::derive(move || state.with(|s| s.status()));

    view! {
        <div style="display: flex; align-items: center; justify-content: center; gap: 32px;">
            <span style=move || {
                if status.get() == ConnectionStatus::Connected {
                    "pointer-events: none; cursor: default;"
                } else {
                    ""
                }
            }>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| {
                        if status.get_untracked() == ConnectionStatus::Disconnected {
                            handle_connect();
                        }
                    }
                    disabled=move || status.get() == ConnectionStatus::Connecting
                    loading=move || status.get() == ConnectionStatus::Connecting
                >
                    {move || match status.get() {
                        ConnectionStatus::Connected => "Hubspot Connected",
                        ConnectionStatus::Connecting => "Connecting...",
                        ConnectionStatus::Disconnected => "Connect to Hubspot",
                    }}
                </Button>
            </span>
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| handle_disconnect()
                disabled=move || status.get() == ConnectionStatus::Disconnected
            >
                "Disconnect Hubspot"
            </Button>
        </div>
    }
}
