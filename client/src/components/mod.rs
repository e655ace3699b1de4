pub mod chat_panel;
pub mod color_popover;
pub mod notice_banner;
