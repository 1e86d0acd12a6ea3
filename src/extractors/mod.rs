//! Request extractors: session cookie, authenticated user, JSON body.

mod json;
mod session;

pub use json::JsonBody;
pub use session::{SessionToken, SessionUser};
