use crate::shared::popup::PopupCancel;
use contracts::domain::a001_integration::{credentials_present, IntegrationParams, Provider};
use serde_json::Value;

pub const AUTHORIZE_ERROR_FALLBACK: &str = "Hubspot authorization failed";
pub const CREDENTIALS_ERROR_FALLBACK: &str = "Failed to fetch Hubspot credentials";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Одна попытка подключения.
///
/// Результаты устаревшей попытки (после disconnect или новой попытки)
/// игнорируются.
#[derive(Debug, Clone)]
pub struct ConnectAttempt {
    pub id: u64,
    pub cancel: PopupCancel,
}

/// Состояние кнопки подключения Hubspot
#[derive(Debug, Clone, Default)]
pub struct ConnectState {
    status: ConnectionStatus,
    attempt: u64,
    watch: Option<PopupCancel>,
}

impl ConnectState {
    /// Начальное состояние по общим параметрам интеграции
    pub fn from_params(params: Option<&IntegrationParams>) -> Self {
        let connected = params.is_some_and(|p| p.is_connected_to(Provider::Hubspot));
        Self {
            status: if connected {
                ConnectionStatus::Connected
            } else {
                ConnectionStatus::Disconnected
            },
            ..Default::default()
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn is_connecting(&self) -> bool {
        self.status == ConnectionStatus::Connecting
    }

    /// disconnected → connecting
    pub fn begin_connect(&mut self, cancel: PopupCancel) -> Option<ConnectAttempt> {
        if self.status != ConnectionStatus::Disconnected {
            return None;
        }
        self.attempt += 1;
        self.status = ConnectionStatus::Connecting;
        self.watch = Some(cancel.clone());
        Some(ConnectAttempt {
            id: self.attempt,
            cancel,
        })
    }

    pub fn is_current(&self, attempt: u64) -> bool {
        self.status == ConnectionStatus::Connecting && self.attempt == attempt
    }

    /// connecting → disconnected после ошибки. `false` для устаревшей попытки.
    pub fn fail(&mut self, attempt: u64) -> bool {
        if !self.is_current(attempt) {
            return false;
        }
        self.status = ConnectionStatus::Disconnected;
        self.watch = None;
        true
    }

    /// Завершить попытку с полученными кредами.
    ///
    /// Возвращает параметры для записи в общее состояние, если креды
    /// непустые; иначе попытка считается неудачной.
    pub fn complete(&mut self, attempt: u64, credentials: Option<Value>) -> Option<IntegrationParams> {
        if !self.is_current(attempt) {
            return None;
        }
        self.watch = None;
        match credentials.filter(credentials_present) {
            Some(credentials) => {
                self.status = ConnectionStatus::Connected;
                Some(IntegrationParams::for_provider(Provider::Hubspot, credentials))
            }
            None => {
                self.status = ConnectionStatus::Disconnected;
                None
            }
        }
    }

    /// Любое состояние → disconnected. Идущая попытка отменяется.
    pub fn disconnect(&mut self) {
        if let Some(watch) = self.watch.take() {
            watch.cancel();
        }
        self.attempt += 1;
        self.status = ConnectionStatus::Disconnected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn creds() -> Value {
        json!({"access_token": "at", "refresh_token": "rt", "expires_in": 1800})
    }

    #[test]
    fn test_initial_from_params() {
        let hubspot = IntegrationParams::for_provider(Provider::Hubspot, creds());
        assert!(ConnectState::from_params(Some(&hubspot)).is_connected());

        let notion = IntegrationParams::for_provider(Provider::Notion, creds());
        assert!(!ConnectState::from_params(Some(&notion)).is_connected());

        let empty = IntegrationParams {
            credentials: None,
            kind: Some("Hubspot".to_string()),
        };
        assert!(!ConnectState::from_params(Some(&empty)).is_connected());
        assert_eq!(
            ConnectState::from_params(None).status(),
            ConnectionStatus::Disconnected
        );
    }

    #[test]
    fn test_connect_success() {
        let mut state = ConnectState::default();
        let attempt = state.begin_connect(PopupCancel::new()).unwrap();
        assert!(state.is_connecting());

        let stored = state.complete(attempt.id, Some(creds())).unwrap();
        assert!(state.is_connected());
        assert_eq!(stored.kind.as_deref(), Some("Hubspot"));
        assert_eq!(stored.credentials, Some(creds()));
    }

    #[test]
    fn test_connect_empty_credentials() {
        let mut state = ConnectState::default();
        let attempt = state.begin_connect(PopupCancel::new()).unwrap();
        assert!(state.complete(attempt.id, None).is_none());
        assert_eq!(state.status(), ConnectionStatus::Disconnected);

        let attempt = state.begin_connect(PopupCancel::new()).unwrap();
        assert!(state.complete(attempt.id, Some(json!({}))).is_none());
        assert_eq!(state.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_connect_failure_is_retriggerable() {
        let mut state = ConnectState::default();
        let attempt = state.begin_connect(PopupCancel::new()).unwrap();
        assert!(state.fail(attempt.id));
        assert_eq!(state.status(), ConnectionStatus::Disconnected);
        assert!(state.begin_connect(PopupCancel::new()).is_some());
    }

    #[test]
    fn test_no_double_connect() {
        let mut state = ConnectState::default();
        assert!(state.begin_connect(PopupCancel::new()).is_some());
        assert!(state.begin_connect(PopupCancel::new()).is_none());

        let mut connected =
            ConnectState::from_params(Some(&IntegrationParams::for_provider(Provider::Hubspot, creds())));
        assert!(connected.begin_connect(PopupCancel::new()).is_none());
    }

    #[test]
    fn test_disconnect_while_connecting() {
        let mut state = ConnectState::default();
        let attempt = state.begin_connect(PopupCancel::new()).unwrap();

        state.disconnect();
        assert_eq!(state.status(), ConnectionStatus::Disconnected);
        assert!(attempt.cancel.is_cancelled());

        // Late result of the cancelled attempt is ignored
        assert!(state.complete(attempt.id, Some(creds())).is_none());
        assert!(!state.fail(attempt.id));
        assert_eq!(state.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_disconnect_when_connected() {
        let mut state =
            ConnectState::from_params(Some(&IntegrationParams::for_provider(Provider::Hubspot, creds())));
        state.disconnect();
        assert_eq!(state.status(), ConnectionStatus::Disconnected);
        assert!(state.begin_connect(PopupCancel::new()).is_some());
    }

    #[test]
    fn test_stale_attempt_after_reconnect() {
        let mut state = ConnectState::default();
        let first = state.begin_connect(PopupCancel::new()).unwrap();
        state.disconnect();
        let second = state.begin_connect(PopupCancel::new()).unwrap();

        assert!(state.complete(first.id, Some(creds())).is_none());
        assert!(state.is_connecting());
        assert!(state.complete(second.id, Some(creds())).is_some());
    }
}
