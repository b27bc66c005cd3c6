//! Language-model completion client for askdoc.
//!
//! [`CompletionService`] is the single-call contract the pipeline depends on;
//! [`OpenAiClient`] implements it against a chat completions endpoint.

mod client;
mod error;
mod service;
mod types;

pub use client::OpenAiClient;
pub use error::CompletionError;
pub use service::CompletionService;
