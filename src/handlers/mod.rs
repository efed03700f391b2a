//! HTTP request handlers.

pub mod extract;
pub mod http;
pub mod posts;
pub mod users;

pub use extract::{AppJson, AppPath};
pub use http::*;
pub use posts::*;
pub use users::*;
