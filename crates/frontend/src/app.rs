use crate::layout::global_context::AppGlobalContext;
use crate::system::pages::integrations::IntegrationsPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    let ctx = AppGlobalContext::new();
    provide_context(ctx);

    view! {
        <IntegrationsPage />
    }
}
