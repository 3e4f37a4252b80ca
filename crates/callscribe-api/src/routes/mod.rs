//! HTTP routes: provider callbacks, call reads, and health.

pub mod callbacks;
pub mod calls;
pub mod health;
