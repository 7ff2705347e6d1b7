//! Main application entry point for the storefront admin.
//! Sets up shared context (config, API client, session, toasts) and routes
//! between the analytics dashboard and review moderation.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::api::ApiClient;
use crate::components::dashboard::DashboardPage;
use crate::components::moderation_page::ModerationPage;
use crate::components::toast::{ToastStack, Toaster};
use crate::config::AppConfig;
use crate::session;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_build_env();
    // The session is read once here and handed down; nothing below touches storage.
    provide_context(session::load_persisted());
    provide_context(Toaster::new(config.toast_timeout_ms));
    provide_context(ApiClient::new(config.clone()));
    provide_context(config);

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront-admin.css" />
        <Title text="Storefront Admin" />
        <Router>
            <nav class="main-nav">
                <A href="/" exact=true>{ "Dashboard" }</A>
                <A href="/reviews">{ "Reviews" }</A>
            </nav>
            <main>
                <Routes>
                    <Route path="/" view=DashboardPage />
                    <Route path="/reviews" view=ModerationPage />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
            <ToastStack />
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>{ "Page not found" }</h1>
            <A href="/">{ "Back to dashboard" }</A>
        </div>
    }
}
