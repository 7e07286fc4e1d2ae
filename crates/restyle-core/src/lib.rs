#![allow(clippy::must_use_candidate)]

mod context;
mod error;

pub use context::{RequestContext, UserIdentity};
pub use error::HttpError;
