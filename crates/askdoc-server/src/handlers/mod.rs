//! HTTP request handlers.

pub(crate) mod ask;
pub(crate) mod health;
