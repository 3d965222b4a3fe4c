//! Activity log panel

use leptos::prelude::*;
use shared::dto::log::LogEntry;

use crate::components::screen::log_header;
use crate::state::context::use_dapp_context;

#[component]
pub fn LogPanel() -> impl IntoView {
    let ctx = use_dapp_context();
    let entries = Memo::new(move |_| ctx.session.with(|s| s.logs().entries().to_vec()));

    view! {
        <section class="log-panel">
            <div class="log-header">
                <h2 class="card-title">{move || ctx.session.with(log_header)}</h2>
                <button class="btn btn-secondary" on:click=move |_| ctx.clear_logs()>
                    "Clear Logs"
                </button>
            </div>

            <Show
                when=move || entries.with(|e| !e.is_empty())
                fallback=|| view! {
                    <p class="log-empty" style="color: var(--text-secondary);">
                        "No activity yet. Connect a wallet to get started."
                    </p>
                }
            >
                <div class="log-list">
                    <For
                        each=move || entries.get()
                        key=|entry| entry.id
                        children=|entry| view! { <LogRow entry=entry/> }
                    />
                </div>
            </Show>
        </section>
    }
}

#[component]
fn LogRow(entry: LogEntry) -> impl IntoView {
    let status = entry.status.as_str();

    view! {
        <div class=format!("log-entry log-{}", status)>
            <div class="log-meta">
                <span class="log-status">{status}</span>
                <span class="log-method">{entry.method.as_str()}</span>
            </div>
            <p class="log-message" style="word-break: break-all;">{entry.message}</p>
            {entry.secondary_message.map(|secondary| view! {
                <pre class="log-secondary">{secondary}</pre>
            })}
        </div>
    }
}
