//! Image gallery state, independent of any output surface.
//!
//! ```text
//! submit ──► Controller ──► ImageSearch (pixgal-api)
//!               │
//!               ├─ Gallery   cards, markup
//!               ├─ Lightbox  enlarge-on-click bindings
//!               ├─ Sentinel  armed while more pages remain
//!               └─ Notifier  success / info / error
//! ```

pub mod controller;
pub mod lightbox;
pub mod notify;
pub mod render;
pub mod sentinel;

pub use controller::{Controller, Outcome, PageRequest, PaginationState, State};
pub use lightbox::{Lightbox, LightboxOptions, LightboxView};
pub use notify::{Level, Notification, Notifications, Notifier};
pub use render::{render_card, render_cards, Card, Gallery};
pub use sentinel::Sentinel;
