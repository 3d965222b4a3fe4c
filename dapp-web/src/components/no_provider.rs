//! Shown when no wallet injected a provider

use leptos::prelude::*;

use crate::utils::constants::WALLET_INSTALL_URL;

#[component]
pub fn NoProvider() -> impl IntoView {
    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: 100vh;">
            <div class="card" style="max-width: 500px; text-align: center;">
                <h1 class="card-title" style="margin-bottom: var(--spacing-md);">
                    "Could not find a provider"
                </h1>
                <p style="color: var(--text-secondary); margin-bottom: var(--spacing-lg);">
                    "Install a browser wallet and reload the page to continue."
                </p>
                <a href=WALLET_INSTALL_URL target="_blank" rel="noopener noreferrer" class="btn">
                    "Get Phantom"
                </a>
            </div>
        </div>
    }
}
