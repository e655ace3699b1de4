//! Root application component and shared state contexts.

use leptos::prelude::*;

use chat::{ColorFetch, DualSessionCoordinator};

use crate::pages::workspace::WorkspacePage;

/// Root component. Provides the coordinator, color machine, and notice
/// banner state as reactive contexts for everything below.
#[component]
pub fn App() -> impl IntoView {
    let chats = RwSignal::new(DualSessionCoordinator::new());
    let color = RwSignal::new(ColorFetch::new());
    let notice = RwSignal::new(None::<String>);

    provide_context(chats);
    provide_context(color);
    provide_context(notice);

    view! { <WorkspacePage/> }
}
