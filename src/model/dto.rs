//! Request bodies and response shapes. Field names are camelCase on the wire.

use super::PublishedAt;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub author_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub publisher_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub isbn: String,
    pub name: String,
    pub published_at: Option<PublishedAt>,
    pub author_id: Option<i64>,
    pub publisher_id: Option<i64>,
}

/// Author with every book it wrote and the distinct publishers of those books.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResult {
    pub author_id: i64,
    pub name: String,
    pub books: Vec<Book>,
    pub related_publishers: Vec<Publisher>,
}

/// Publisher with every book it published and the distinct authors of those books.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherResult {
    pub publisher_id: i64,
    pub name: String,
    pub books: Vec<Book>,
    pub related_authors: Vec<Author>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResult {
    #[serde(flatten)]
    pub book: Book,
    pub authors: Option<Author>,
    pub publishers: Option<Publisher>,
}

/// The only user fields ever returned to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub email: String,
    pub id: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInsert {
    pub author_id: i64,
    pub name: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorUpdate {
    pub author_id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherInsert {
    pub publisher_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherUpdate {
    pub publisher_id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInsert {
    pub isbn: String,
    pub name: String,
    pub author_id: Option<i64>,
    pub publisher_id: Option<i64>,
    pub published_at: Option<PublishedAt>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    pub isbn: Option<String>,
    pub name: Option<String>,
    pub author_id: Option<i64>,
    pub publisher_id: Option<i64>,
    pub published_at: Option<PublishedAt>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FavoriteRequest {
    pub isbn: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteMove {
    pub isbn_from: String,
    pub isbn_to: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PasswordUpdate {
    pub password: String,
}
