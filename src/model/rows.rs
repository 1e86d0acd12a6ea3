//! Typed rows decoded from backend query results.
//!
//! Join queries embed related entities as nested JSON; each embedded relation has a
//! fixed optionality here instead of being discovered at runtime.

use super::PublishedAt;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRow {
    pub author_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherRow {
    pub publisher_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRow {
    pub isbn: String,
    pub name: String,
    pub published_at: Option<PublishedAt>,
    /// Nullable: a book may outlive the reference to its author.
    pub author_id: Option<i64>,
    pub publisher_id: Option<i64>,
}

/// Book row embedded under an author, carrying the book's publisher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookWithPublisherRow {
    #[serde(flatten)]
    pub book: BookRow,
    pub publisher: Option<PublisherRow>,
}

/// Book row embedded under a publisher, carrying the book's author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookWithAuthorRow {
    #[serde(flatten)]
    pub book: BookRow,
    pub author: Option<AuthorRow>,
}

/// `authors` joined through `books` to `publishers`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorWithBooksRow {
    pub author_id: i64,
    pub name: String,
    #[serde(default)]
    pub books: Vec<BookWithPublisherRow>,
}

/// `publishers` joined through `books` to `authors`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherWithBooksRow {
    pub publisher_id: i64,
    pub name: String,
    #[serde(default)]
    pub books: Vec<BookWithAuthorRow>,
}

/// A book with both of its to-one relations embedded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookWithRelationsRow {
    #[serde(flatten)]
    pub book: BookRow,
    pub author: Option<AuthorRow>,
    pub publisher: Option<PublisherRow>,
}
