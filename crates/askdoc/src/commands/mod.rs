//! CLI command implementations.

pub(crate) mod chat;
pub(crate) mod convert;
pub(crate) mod serve;

pub(crate) use chat::ChatArgs;
pub(crate) use convert::ConvertArgs;
pub(crate) use serve::ServeArgs;
