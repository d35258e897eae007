//! Окно авторизации OAuth.
//!
//! Завершение определяется по сообщению `oauth_complete` из окна (через
//! `postMessage` с origin API) либо по закрытию окна. Ожидание всегда
//! снимается явно: по исходу, по отмене или при размонтировании компонента.

use gloo_timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MessageEvent, Window};

use crate::shared::api_utils::api_origin;

pub const POPUP_FEATURES: &str = "width=600, height=600";
pub const POPUP_POLL_INTERVAL_MS: u32 = 200;
pub const OAUTH_COMPLETE_MESSAGE: &str = "oauth_complete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupOutcome {
    /// Пользователь (или страница callback) закрыл окно
    Closed,
    /// Окно прислало сигнал завершения
    Completed,
    /// Ожидание отменено
    Cancelled,
}

/// Токен отмены ожидания окна.
///
/// Дочерний токен считается отменённым, если отменён он сам или родитель.
#[derive(Debug, Clone, Default)]
pub struct PopupCancel {
    own: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl PopupCancel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self) -> Self {
        Self {
            own: Arc::new(AtomicBool::new(false)),
            parent: Some(self.own.clone()),
        }
    }

    pub fn cancel(&self) {
        self.own.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.own.load(Ordering::SeqCst)
            || self
                .parent
                .as_ref()
                .is_some_and(|p| p.load(Ordering::SeqCst))
    }
}

/// Открыть окно авторизации
pub fn open_popup(url: &str, name: &str) -> Result<Window, String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    window
        .open_with_url_and_target_and_features(url, name, POPUP_FEATURES)
        .map_err(|e| format!("{e:?}"))?
        .ok_or_else(|| "Popup window was blocked by the browser".to_string())
}

/// Является ли сообщение сигналом завершения авторизации.
///
/// Без известного origin API сообщения не принимаются, остаётся опрос `closed`.
pub fn is_completion_message(
    origin: &str,
    data: Option<&str>,
    expected_origin: Option<&str>,
) -> bool {
    expected_origin == Some(origin) && data == Some(OAUTH_COMPLETE_MESSAGE)
}

/// Дождаться завершения работы окна
pub async fn wait_for_popup(popup: &Window, cancel: &PopupCancel) -> PopupOutcome {
    let completed = Rc::new(Cell::new(false));
    let expected_origin = api_origin();

    let listener = {
        let completed = completed.clone();
        Closure::wrap(Box::new(move |event: MessageEvent| {
            let data = event.data().as_string();
            if is_completion_message(&event.origin(), data.as_deref(), expected_origin.as_deref()) {
                completed.set(true);
            }
        }) as Box<dyn FnMut(MessageEvent)>)
    };

    let host = web_sys::window();
    if let Some(w) = &host {
        let _ = w.add_event_listener_with_callback("message", listener.as_ref().unchecked_ref());
    }

    let outcome = loop {
        if cancel.is_cancelled() {
            break PopupOutcome::Cancelled;
        }
        if completed.get() {
            break PopupOutcome::Completed;
        }
        if popup.closed().unwrap_or(true) {
            break PopupOutcome::Closed;
        }
        TimeoutFuture::new(POPUP_POLL_INTERVAL_MS).await;
    };

    if let Some(w) = &host {
        let _ =
            w.remove_event_listener_with_callback("message", listener.as_ref().unchecked_ref());
    }
    if outcome != PopupOutcome::Closed {
        let _ = popup.close();
    }

    log::debug!("popup wait finished: {:?}", outcome);
    outcome
}
