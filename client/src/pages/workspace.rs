//! The dual-chat workspace page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two sessions render side by side and share one input line. Submit
//! starts both sends synchronously, joins the two backend calls, applies
//! each outcome, and clears the shared input only after both settle, so
//! a slow or failing session never blocks the other.

use leptos::prelude::*;

use chat::{ColorFetch, DualSessionCoordinator, ModelVariant};

use crate::components::chat_panel::ChatPanel;
use crate::components::color_popover::ColorPopover;
use crate::components::notice_banner::NoticeBanner;

/// Notice shown when a chat send fails.
pub const SEND_FAILED_NOTICE: &str = "Failed to fetch bot response.";

/// The single page: header, both panels, shared input row.
#[component]
pub fn WorkspacePage() -> impl IntoView {
    let chats = expect_context::<RwSignal<DualSessionCoordinator>>();
    let color = expect_context::<RwSignal<ColorFetch>>();
    let notice = expect_context::<RwSignal<Option<String>>>();

    let bot_color = Signal::derive(move || color.with(|c| c.color().to_owned()));

    let can_send = move || chats.with(|c| !c.input.trim().is_empty() && !c.busy());

    let do_send = move || {
        let now = crate::net::api::now_ms();
        let begun = chats
            .try_update(|c| {
                if c.input.trim().is_empty() || c.busy() {
                    return None;
                }
                let text = c.input.clone();
                let fine_tuned = c.fine_tuned.begin_send(&text, now)?;
                let baseline = c.baseline.begin_send(&text, now)?;
                Some((fine_tuned, baseline))
            })
            .flatten();
        let Some((fine_tuned_history, baseline_history)) = begun else {
            return;
        };

        #[cfg(feature = "csr")]
        wasm_bindgen_futures::spawn_local(async move {
            let (fine_tuned, baseline) = futures::future::join(
                crate::net::api::chat(ModelVariant::FineTuned, fine_tuned_history),
                crate::net::api::chat(ModelVariant::Baseline, baseline_history),
            )
            .await;

            let now = crate::net::api::now_ms();
            let failed = fine_tuned.is_err() || baseline.is_err();
            chats.update(|c| {
                match fine_tuned {
                    Ok(body) => {
                        c.fine_tuned.complete_send(&body, now);
                    }
                    Err(_) => c.fine_tuned.fail_send(),
                }
                match baseline {
                    Ok(body) => {
                        c.baseline.complete_send(&body, now);
                    }
                    Err(_) => c.baseline.fail_send(),
                }
                // Both settled: release the shared input.
                c.input.clear();
            });
            if failed {
                notice.set(Some(SEND_FAILED_NOTICE.to_owned()));
            }
        });

        #[cfg(not(feature = "csr"))]
        {
            let _ = (fine_tuned_history, baseline_history);
            chats.update(|c| {
                c.fine_tuned.fail_send();
                c.baseline.fail_send();
                c.input.clear();
            });
            notice.set(Some(SEND_FAILED_NOTICE.to_owned()));
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    view! {
        <div class="workspace">
            <NoticeBanner/>
            <div class="workspace__header">
                <h1 class="workspace__title">"Chat"</h1>
                <ColorPopover/>
            </div>
            <div class="workspace__panels">
                <ChatPanel title="Chat - Fine Tune" variant=ModelVariant::FineTuned bot_color=bot_color/>
                <ChatPanel title="Chat - Original" variant=ModelVariant::Baseline bot_color=bot_color/>
            </div>
            <form
                class="workspace__input-row"
                on:submit=move |ev| {
                    ev.prevent_default();
                    do_send();
                }
            >
                <input
                    class="workspace__input"
                    type="text"
                    placeholder="Type your message..."
                    prop:value=move || chats.with(|c| c.input.clone())
                    on:input=move |ev| chats.update(|c| c.input = event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button type="submit" class="workspace__send" disabled=move || !can_send()>
                    "Send"
                </button>
            </form>
        </div>
    }
}
