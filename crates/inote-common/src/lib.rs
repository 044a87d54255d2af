//! Shared data model for the IDERI note notification bridge.
//!
//! [`context::EventContext`] is the read-only snapshot of one Checkmk
//! notification event; [`types::OutboundMessage`] is the JSON record the
//! IDERI note API accepts on `POST /v1/messages`.

pub mod context;
pub mod types;
