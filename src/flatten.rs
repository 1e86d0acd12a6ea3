//! Turns nested join rows into flat response shapes.
//!
//! Related entities are collected in first-seen order while walking the embedded books,
//! de-duplicated by primary key. Books without an embedded relation still appear in `books`.

use crate::model::{
    Author, AuthorResult, AuthorRow, AuthorWithBooksRow, Book, BookResult, BookRow, BookWithRelationsRow,
    Publisher, PublisherResult, PublisherRow, PublisherWithBooksRow,
};

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            isbn: row.isbn,
            name: row.name,
            published_at: row.published_at,
            author_id: row.author_id,
            publisher_id: row.publisher_id,
        }
    }
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            author_id: row.author_id,
            name: row.name,
        }
    }
}

impl From<PublisherRow> for Publisher {
    fn from(row: PublisherRow) -> Self {
        Publisher {
            publisher_id: row.publisher_id,
            name: row.name,
        }
    }
}

pub fn flatten_author(src: AuthorWithBooksRow) -> AuthorResult {
    let mut dst = AuthorResult {
        author_id: src.author_id,
        name: src.name,
        books: Vec::with_capacity(src.books.len()),
        related_publishers: Vec::new(),
    };
    for row in src.books {
        if let Some(publisher) = row.publisher {
            if !dst.related_publishers.iter().any(|p| p.publisher_id == publisher.publisher_id) {
                dst.related_publishers.push(publisher.into());
            }
        }
        dst.books.push(row.book.into());
    }
    dst
}

pub fn flatten_publisher(src: PublisherWithBooksRow) -> PublisherResult {
    let mut dst = PublisherResult {
        publisher_id: src.publisher_id,
        name: src.name,
        books: Vec::with_capacity(src.books.len()),
        related_authors: Vec::new(),
    };
    for row in src.books {
        if let Some(author) = row.author {
            if !dst.related_authors.iter().any(|a| a.author_id == author.author_id) {
                dst.related_authors.push(author.into());
            }
        }
        dst.books.push(row.book.into());
    }
    dst
}

pub fn flatten_book(src: BookWithRelationsRow) -> BookResult {
    BookResult {
        book: src.book.into(),
        authors: src.author.map(Author::from),
        publishers: src.publisher.map(Publisher::from),
    }
}
