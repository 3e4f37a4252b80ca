//! Callscribe Core — shared domain abstractions.
//!
//! This crate defines the call record model, the typed webhook events, the
//! repository seam, and the error taxonomy that every other crate depends on.
//! It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod event;
pub mod record;
pub mod repository;
