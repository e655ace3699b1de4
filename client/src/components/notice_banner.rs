//! Dismissible banner for send and color fetch failures.

use leptos::prelude::*;

/// Renders the current notice, if any, with a dismiss control.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let notice = expect_context::<RwSignal<Option<String>>>();

    view! {
        {move || {
            notice
                .get()
                .map(|text| {
                    view! {
                        <div class="notice" role="alert">
                            <span class="notice__text">{text}</span>
                            <button class="notice__dismiss" on:click=move |_| notice.set(None)>
                                "Dismiss"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
