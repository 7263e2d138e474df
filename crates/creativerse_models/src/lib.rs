//! HTTP generation gateway for Creativerse.
//!
//! [`HttpGateway`] implements [`creativerse_interface::GenerationGateway`]
//! against the Creativerse backend, which fronts the actual text and image
//! models. Calls are plain JSON `POST`s:
//!
//! | Operation | Route |
//! |-----------|-------|
//! | `generate_round` | `/api/generate-story-and-images` |
//! | `regenerate_illustration` | `/api/regenerate-image` |
//! | `critique` | `/api/feedback` |
//! | `realize_portrait` | `/api/character-image` |
//! | `realize_symbol` | `/api/symbolic-concept` then `/api/symbolic-image` |
//!
//! Request, error and latency metrics are exported through OpenTelemetry
//! via [`GatewayMetrics`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod dto;
mod metrics;

pub use client::HttpGateway;
pub use metrics::{classify_error, GatewayMetrics};
