//! Callscribe — call event correlation bounded context.
//!
//! Applies transcription and recording-completion events to the call record
//! they belong to. The two callbacks arrive independently and in any order;
//! this crate decides how each one mutates the shared record and enforces the
//! existence and idempotency rules around it.

pub mod application;
