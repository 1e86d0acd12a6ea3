//! Library data model: rows as the backend returns them, request bodies, and response shapes.

pub mod dto;
pub mod rows;
mod timestamp;

pub use dto::*;
pub use rows::*;
pub use timestamp::PublishedAt;
