pub mod event_card;
pub mod meta_panel;
pub mod timeline;
