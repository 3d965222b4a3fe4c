//! Sidebar: brand, account badge, balance and action buttons

use leptos::prelude::*;

use crate::components::screen::{screen, Screen};
use crate::services::dispatcher::ActionKind;
use crate::state::context::use_dapp_context;
use crate::utils::constants::WALLET_INSTALL_URL;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_dapp_context();
    let symbol = ctx.config().native_symbol;

    view! {
        <aside class="sidebar">
            <a href=WALLET_INSTALL_URL target="_blank" rel="noopener noreferrer" class="sidebar-brand">
                <span class="brand-title">"Panda Wallet"</span>
            </a>

            {move || match ctx.session.with(|s| screen(ctx.presence.get(), s)) {
                Screen::Connected { address, balance } => {
                    let symbol = symbol.clone();
                    view! {
                        <div class="sidebar-account">
                            <p style="color: var(--text-secondary); margin-bottom: var(--spacing-sm);">
                                "Connected as"
                            </p>
                            <p class="badge" style="font-family: monospace; word-break: break-all;">
                                {address}
                            </p>
                            <p style="color: var(--text-secondary); margin-top: var(--spacing-lg);">
                                "Balance"
                            </p>
                            <p style="font-weight: bold;">
                                {balance} " " {symbol}
                            </p>
                            <div class="sidebar-actions">
                                {ctx
                                    .connected_actions()
                                    .iter()
                                    .map(|item| {
                                        let action = item.action;
                                        view! {
                                            <button class="btn" on:click=move |_| ctx.dispatch(action)>
                                                {item.name}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                    .into_any()
                }
                _ => view! {
                    <div class="sidebar-actions">
                        <button class="btn" on:click=move |_| ctx.dispatch(ActionKind::Connect)>
                            "Connect to Phantom"
                        </button>
                    </div>
                }
                .into_any(),
            }}
        </aside>
    }
}
