//! # client
//!
//! Leptos + WASM frontend for the dual-model chat workspace: two chat
//! panels sharing one input line, per-message reactions with support
//! escalation, and a model-driven bot bubble color picker. The state
//! machines live in the `chat` crate; this crate binds them to signals,
//! gloo transport, and markup.
//!
//! Built as a CSR bundle (trunk) and served as static files by the
//! `server` crate. Browser-only dependencies sit behind the `csr`
//! feature so the pure helpers compile and test natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod util;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
