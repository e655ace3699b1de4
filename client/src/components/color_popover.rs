//! Bot bubble color customization popover.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the bounded-retry color machine: one backend call per attempt,
//! a fixed pause between retries, fallback plus notice when the machine
//! gives up. The committed color feeds the bot bubbles on both panels.

use leptos::prelude::*;

use chat::ColorFetch;
#[cfg(feature = "csr")]
use chat::ColorStep;

/// Notice shown when the machine falls back to the default color.
pub const COLOR_FALLBACK_NOTICE: &str = "Failed to fetch color. Using the default.";

/// Settings popover with the color query input and fetch button.
#[component]
pub fn ColorPopover() -> impl IntoView {
    let color = expect_context::<RwSignal<ColorFetch>>();
    let notice = expect_context::<RwSignal<Option<String>>>();
    let open = RwSignal::new(false);

    let loading = move || color.with(|c| c.in_flight());

    let on_fetch = move |_| {
        let started = color.try_update(ColorFetch::begin).unwrap_or(false);
        if !started {
            return;
        }

        #[cfg(feature = "csr")]
        wasm_bindgen_futures::spawn_local(async move {
            loop {
                let query = color.with_untracked(|c| c.query().to_owned());
                let step = match crate::net::api::fetch_color(&query).await {
                    Ok(body) => color.try_update(|c| c.observe_response(&body)),
                    Err(error) => color.try_update(|c| c.observe_failure(&error)),
                };
                match step {
                    Some(ColorStep::RetryAfter(seconds)) => {
                        gloo_timers::future::TimeoutFuture::new(seconds * 1000).await;
                    }
                    Some(ColorStep::FellBack) => {
                        notice.set(Some(COLOR_FALLBACK_NOTICE.to_owned()));
                        return;
                    }
                    // Applied, or the surface was torn down mid-flight.
                    _ => return,
                }
            }
        });

        #[cfg(not(feature = "csr"))]
        {
            let error = chat::ApiError::Transport("not available off the browser".to_owned());
            color.update(|c| {
                let _ = c.observe_failure(&error);
            });
            notice.set(Some(COLOR_FALLBACK_NOTICE.to_owned()));
        }
    };

    view! {
        <div class="color-popover">
            <button class="color-popover__toggle" on:click=move |_| open.update(|o| *o = !*o)>
                "Customize Chat"
            </button>
            <Show when=move || open.get()>
                <div class="color-popover__body">
                    <p class="color-popover__hint">"Set the color of the robot's text box."</p>
                    <input
                        class="color-popover__input"
                        type="text"
                        placeholder="e.g. light orange"
                        aria-label="Enter color"
                        prop:value=move || color.with(|c| c.query().to_owned())
                        on:input=move |ev| color.update(|c| c.set_query(event_target_value(&ev)))
                    />
                    <button class="color-popover__fetch" on:click=on_fetch disabled=loading>
                        {move || if loading() { "Loading..." } else { "Fetch Color" }}
                    </button>
                    <span
                        class="color-popover__swatch"
                        style=move || color.with(|c| format!("background-color: {}", c.color()))
                    ></span>
                </div>
            </Show>
        </div>
    }
}
