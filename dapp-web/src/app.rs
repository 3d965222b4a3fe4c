//! Panda Wallet dapp - Leptos frontend

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use crate::components::{screen, LogPanel, NoProvider, Screen, Sidebar};
use crate::services::ethereum::InjectedLocator;
use crate::services::provider::ProviderLocator;
use crate::state::{provide_dapp_context, use_dapp_context};
use crate::utils::config::DappConfig;

#[component]
pub fn App() -> impl IntoView {
    let config = DappConfig::from_location();
    let ctx = provide_dapp_context(config.clone());

    // Locate the injected provider once; extensions may inject late
    leptos::task::spawn_local(async move {
        let provider = InjectedLocator::new(config).locate().await;
        ctx.install(provider);
    });

    on_cleanup(move || ctx.release());

    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=path!("/") view=DappPage/>
            </Routes>
        </Router>
    }
}

#[component]
fn DappPage() -> impl IntoView {
    let ctx = use_dapp_context();

    // Recomputed on account or balance changes, not on every log append
    let current = Memo::new(move |_| ctx.session.with(|s| screen(ctx.presence.get(), s)));

    move || match current.get() {
        Screen::Locating => view! {
            <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: 100vh;">
                <p style="color: var(--text-secondary);">"Looking for a wallet..."</p>
            </div>
        }
        .into_any(),
        Screen::NoProvider => view! { <NoProvider/> }.into_any(),
        Screen::Disconnected | Screen::Connected { .. } => view! {
            <div class="app-container dapp-layout">
                <Sidebar/>
                <LogPanel/>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: 100vh;">
            <div class="card" style="max-width: 500px; text-align: center;">
                <h1 style="margin-bottom: 16px; font-size: 32px; font-weight: 700;">"404 - Page Not Found"</h1>
                <p style="color: var(--text-secondary); margin-bottom: 24px;">"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <span class="btn" style="margin-top: 20px; display: inline-block;">
                        "Go to Home"
                    </span>
                </A>
            </div>
        </div>
    }
}
