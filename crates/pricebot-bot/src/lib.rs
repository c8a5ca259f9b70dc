//! Telegram front-end for price lookups.
//!
//! [`PriceBot`] implements every user-facing operation against the provider
//! traits and returns a transport-neutral [`Reply`]; the [`telegram`] module
//! only decodes updates and delivers replies.

mod action;
pub mod format;
mod reply;
mod service;
pub mod telegram;

pub use action::{Action, ActionError, MAX_TOKEN_LEN};
pub use reply::{Button, Keyboard, Reply};
pub use service::{PriceBot, PriceBotSettings};
