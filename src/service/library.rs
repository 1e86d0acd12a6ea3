//! Books, authors, publishers and favorites: backend call, classification, flattening.

use crate::classify::{classify_ack, classify_insert, classify_list, classify_one, Outcome};
use crate::flatten::{flatten_author, flatten_book, flatten_publisher};
use crate::model::{
    AuthorInsert, AuthorResult, AuthorUpdate, BookInsert, BookResult, BookUpdate, PublisherInsert, PublisherResult,
    PublisherUpdate,
};
use crate::store::{LibraryStore, StoreError};
use std::future::Future;

pub struct LibraryService;

/// Read-then-delete: the delete only runs when the existence read found the row,
/// so a missing key is reported as `Nothing` rather than a silent success.
async fn delete_if_present<T>(
    op: &str,
    exists: Outcome<T>,
    delete: impl Future<Output = Result<(), StoreError>>,
) -> Outcome<()> {
    match exists {
        Outcome::Success(_) => classify_ack(op, delete.await),
        Outcome::Nothing => Outcome::Nothing,
        Outcome::Error => Outcome::Error,
    }
}

impl LibraryService {
    pub async fn get_book(store: &dyn LibraryStore, isbn: &str) -> Outcome<BookResult> {
        classify_one("select_book", store.select_book(isbn).await).map(flatten_book)
    }

    pub async fn insert_book(store: &dyn LibraryStore, book: &BookInsert) -> Outcome<BookResult> {
        classify_insert("insert_book", store.insert_book(book).await).map(flatten_book)
    }

    pub async fn update_book(store: &dyn LibraryStore, isbn: &str, book: &BookUpdate) -> Outcome<BookResult> {
        classify_one("update_book", store.update_book(isbn, book).await).map(flatten_book)
    }

    pub async fn delete_book(store: &dyn LibraryStore, isbn: &str) -> Outcome<()> {
        let exists = Self::get_book(store, isbn).await;
        delete_if_present("delete_book", exists, store.delete_book(isbn)).await
    }

    pub async fn get_author(store: &dyn LibraryStore, author_id: i64) -> Outcome<AuthorResult> {
        classify_one("select_author", store.select_author(author_id).await).map(flatten_author)
    }

    pub async fn insert_author(store: &dyn LibraryStore, author: &AuthorInsert) -> Outcome<AuthorResult> {
        classify_insert("insert_author", store.insert_author(author).await).map(flatten_author)
    }

    pub async fn update_author(
        store: &dyn LibraryStore,
        author_id: i64,
        author: &AuthorUpdate,
    ) -> Outcome<AuthorResult> {
        classify_one("update_author", store.update_author(author_id, author).await).map(flatten_author)
    }

    pub async fn delete_author(store: &dyn LibraryStore, author_id: i64) -> Outcome<()> {
        let exists = Self::get_author(store, author_id).await;
        delete_if_present("delete_author", exists, store.delete_author(author_id)).await
    }

    pub async fn get_publisher(store: &dyn LibraryStore, publisher_id: i64) -> Outcome<PublisherResult> {
        classify_one("select_publisher", store.select_publisher(publisher_id).await).map(flatten_publisher)
    }

    pub async fn insert_publisher(store: &dyn LibraryStore, publisher: &PublisherInsert) -> Outcome<PublisherResult> {
        classify_insert("insert_publisher", store.insert_publisher(publisher).await).map(flatten_publisher)
    }

    pub async fn update_publisher(
        store: &dyn LibraryStore,
        publisher_id: i64,
        publisher: &PublisherUpdate,
    ) -> Outcome<PublisherResult> {
        classify_one("update_publisher", store.update_publisher(publisher_id, publisher).await).map(flatten_publisher)
    }

    pub async fn delete_publisher(store: &dyn LibraryStore, publisher_id: i64) -> Outcome<()> {
        let exists = Self::get_publisher(store, publisher_id).await;
        delete_if_present("delete_publisher", exists, store.delete_publisher(publisher_id)).await
    }

    pub async fn get_favorite(store: &dyn LibraryStore, user_id: &str, isbn: &str) -> Outcome<BookResult> {
        classify_one("select_favorite", store.select_favorite(user_id, isbn).await).map(flatten_book)
    }

    pub async fn list_favorites(store: &dyn LibraryStore, user_id: &str) -> Outcome<Vec<BookResult>> {
        classify_list("select_favorites", store.select_favorites(user_id).await)
            .map(|rows| rows.into_iter().map(flatten_book).collect())
    }

    pub async fn insert_favorite(store: &dyn LibraryStore, user_id: &str, isbn: &str) -> Outcome<BookResult> {
        classify_insert("insert_favorite", store.insert_favorite(user_id, isbn).await).map(flatten_book)
    }

    pub async fn move_favorite(store: &dyn LibraryStore, user_id: &str, from: &str, to: &str) -> Outcome<BookResult> {
        classify_one("move_favorite", store.move_favorite(user_id, from, to).await).map(flatten_book)
    }

    pub async fn delete_favorite(store: &dyn LibraryStore, user_id: &str, isbn: &str) -> Outcome<()> {
        let exists = Self::get_favorite(store, user_id, isbn).await;
        delete_if_present("delete_favorite", exists, store.delete_favorite(user_id, isbn)).await
    }
}
