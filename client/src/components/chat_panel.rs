//! One chat surface: header, message list, reactions, typing indicator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders one session out of the shared coordinator. Reactions feed the
//! session's feedback monitor, which may append the support escalation
//! message; everything re-renders from coordinator state.

use leptos::prelude::*;
use pulldown_cmark::{Event, Options, Parser, html};

use chat::{DualSessionCoordinator, Media, MediaKind, Message, ModelVariant, Reaction, Role};

use crate::util::time::format_clock;

/// One chat panel bound to a model variant.
#[component]
pub fn ChatPanel(title: &'static str, variant: ModelVariant, bot_color: Signal<String>) -> impl IntoView {
    let chats = expect_context::<RwSignal<DualSessionCoordinator>>();

    let messages_ref = NodeRef::<leptos::html::Div>::new();

    let messages = move || chats.with(|c| c.session(variant).log.messages().to_vec());
    let typing = move || chats.with(|c| c.session(variant).is_typing());

    // Keep the newest message in view.
    Effect::new(move || {
        let _ = messages().len();
        let _ = typing();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let on_react = move |index: usize, reaction: Reaction| {
        chats.update(|c| {
            c.session_mut(variant).react(index, reaction, crate::net::api::now_ms());
        });
    };

    view! {
        <div class="chat-panel">
            <div class="chat-panel__header">{title}</div>
            <div class="chat-panel__messages" node_ref=messages_ref>
                {move || {
                    messages()
                        .into_iter()
                        .enumerate()
                        .map(|(index, msg)| message_view(index, &msg, bot_color, on_react))
                        .collect::<Vec<_>>()
                }}
                {move || typing().then(|| view! { <div class="chat-panel__typing">"Bot is typing..."</div> })}
            </div>
        </div>
    }
}

fn message_view(
    index: usize,
    msg: &Message,
    bot_color: Signal<String>,
    on_react: impl Fn(usize, Reaction) + Copy + 'static,
) -> impl IntoView {
    let role = msg.role;
    let is_user = role == Role::User;
    let is_bot = role == Role::Bot;
    let is_system = role == Role::System;
    let content = msg.content.clone();
    let clock = format_clock(msg.timestamp_ms);
    let reaction = msg.reaction;
    let media = msg.media.clone();

    let markdown = is_bot.then(|| render_markdown_html(&content));
    let bubble_style = move || {
        if is_bot {
            format!("background-color: {}", bot_color.get())
        } else {
            String::new()
        }
    };

    view! {
        <div
            class="chat-panel__row"
            class:chat-panel__row--user=is_user
            class:chat-panel__row--bot=is_bot
            class:chat-panel__row--system=is_system
        >
            <div class="chat-panel__bubble" style=bubble_style>
                {match markdown {
                    Some(rendered) => view! {
                        <div class="chat-panel__markdown" inner_html=rendered></div>
                    }
                        .into_any(),
                    None => view! { <span>{content}</span> }.into_any(),
                }}
                {media.map(media_view)}
                <div class="chat-panel__meta">
                    <span class="chat-panel__clock">{clock}</span>
                    {is_bot.then(|| reaction_buttons(index, reaction, on_react))}
                </div>
            </div>
        </div>
    }
}

fn reaction_buttons(
    index: usize,
    current: Option<Reaction>,
    on_react: impl Fn(usize, Reaction) + Copy + 'static,
) -> impl IntoView {
    let liked = current == Some(Reaction::Like);
    let disliked = current == Some(Reaction::Dislike);

    view! {
        <span class="chat-panel__reactions">
            <button
                class="chat-panel__reaction"
                class:chat-panel__reaction--active=liked
                aria-label="Thumbs up"
                on:click=move |_| on_react(index, Reaction::Like)
            >
                "👍"
            </button>
            <button
                class="chat-panel__reaction"
                class:chat-panel__reaction--active=disliked
                aria-label="Thumbs down"
                on:click=move |_| on_react(index, Reaction::Dislike)
            >
                "👎"
            </button>
        </span>
    }
}

fn media_view(media: Media) -> impl IntoView {
    match media.kind {
        MediaKind::Image => view! { <img class="chat-panel__media" src=media.url/> }.into_any(),
        MediaKind::Link => view! {
            <a class="chat-panel__media" href=media.url.clone() target="_blank">{media.url}</a>
        }
            .into_any(),
    }
}

fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    // Raw HTML from model output is never rendered.
    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
