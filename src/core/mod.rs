//! Core types shared by every layer of modgraph.
//!
//! - [`error`] - the [`ModgraphError`] taxonomy and CLI-facing [`ErrorContext`]
//! - [`Visibility`] - the public/private tag carried by dependencies and edges

pub mod error;
mod visibility;

pub use error::{ErrorContext, ModgraphError, Result, user_friendly_error};
pub use visibility::Visibility;
