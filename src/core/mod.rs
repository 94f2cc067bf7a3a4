//! Portfolio state machines and data – content, reveal tracking, navigation,
//! theme persistence, overlays, forms and the outbound relay.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod contact;
pub mod content;
pub mod form;
pub mod nav;
pub mod overlay;
pub mod relay;
pub mod reveal;
pub mod storage;
pub mod theme;
