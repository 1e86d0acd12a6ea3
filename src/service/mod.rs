//! Classifier-wrapped backend operations used by the handlers.

mod account;
mod library;

pub use account::AccountService;
pub use library::LibraryService;
