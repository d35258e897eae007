/// Показать блокирующий `window.alert`
pub fn show_alert(message: &str) {
    log::warn!("alert: {}", message);
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
