//! In-memory store and auth provider behind the real router.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use bookshelf_api::auth::{AuthError, AuthProvider, ProviderSession, ProviderUser, SignInResult};
use bookshelf_api::model::{
    AuthorInsert, AuthorRow, AuthorUpdate, AuthorWithBooksRow, BookInsert, BookRow, BookUpdate, BookWithAuthorRow,
    BookWithPublisherRow, BookWithRelationsRow, PublisherInsert, PublisherRow, PublisherUpdate,
    PublisherWithBooksRow,
};
use bookshelf_api::store::{LibraryStore, StoreError, StoreResult};
use bookshelf_api::{app, AppState};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// One user's bookmark on one book.
struct FavoriteRow {
    user_id: String,
    isbn: String,
}

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i64, String>,
    publishers: BTreeMap<i64, String>,
    books: BTreeMap<String, BookRow>,
    favorites: Vec<FavoriteRow>,
}

impl Tables {
    fn author(&self, id: Option<i64>) -> Option<AuthorRow> {
        let id = id?;
        self.authors.get(&id).map(|name| AuthorRow {
            author_id: id,
            name: name.clone(),
        })
    }

    fn publisher(&self, id: Option<i64>) -> Option<PublisherRow> {
        let id = id?;
        self.publishers.get(&id).map(|name| PublisherRow {
            publisher_id: id,
            name: name.clone(),
        })
    }

    fn book(&self, isbn: &str) -> Option<BookWithRelationsRow> {
        self.books.get(isbn).map(|b| BookWithRelationsRow {
            book: b.clone(),
            author: self.author(b.author_id),
            publisher: self.publisher(b.publisher_id),
        })
    }

    fn author_with_books(&self, id: i64) -> Option<AuthorWithBooksRow> {
        let name = self.authors.get(&id)?.clone();
        let books = self
            .books
            .values()
            .filter(|b| b.author_id == Some(id))
            .map(|b| BookWithPublisherRow {
                book: b.clone(),
                publisher: self.publisher(b.publisher_id),
            })
            .collect();
        Some(AuthorWithBooksRow {
            author_id: id,
            name,
            books,
        })
    }

    fn publisher_with_books(&self, id: i64) -> Option<PublisherWithBooksRow> {
        let name = self.publishers.get(&id)?.clone();
        let books = self
            .books
            .values()
            .filter(|b| b.publisher_id == Some(id))
            .map(|b| BookWithAuthorRow {
                book: b.clone(),
                author: self.author(b.author_id),
            })
            .collect();
        Some(PublisherWithBooksRow {
            publisher_id: id,
            name,
            books,
        })
    }

    fn check_references(&self, author_id: Option<i64>, publisher_id: Option<i64>) -> Result<(), StoreError> {
        if author_id.is_some_and(|id| !self.authors.contains_key(&id)) {
            return Err(StoreError::Constraint("books_author_id_fkey".into()));
        }
        if publisher_id.is_some_and(|id| !self.publishers.contains_key(&id)) {
            return Err(StoreError::Constraint("books_publisher_id_fkey".into()));
        }
        Ok(())
    }

    fn remove_book(&mut self, isbn: &str) {
        self.books.remove(isbn);
        self.favorites.retain(|f| f.isbn != isbn);
    }
}

/// Relational store in memory, with the same foreign keys and cascades as the Postgres schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Every following call reports a backend error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn favorite_isbns(&self, user_id: &str) -> Vec<String> {
        let t = self.tables.lock().unwrap();
        t.favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .map(|f| f.isbn.clone())
            .collect()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Tables) -> Result<R, StoreError>) -> Result<R, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store failing".into()));
        }
        let mut t = self.tables.lock().unwrap();
        f(&mut t)
    }
}

fn rows<T>(row: Option<T>) -> Option<Vec<T>> {
    Some(row.into_iter().collect())
}

#[async_trait]
impl LibraryStore for MemoryStore {
    async fn select_book(&self, isbn: &str) -> StoreResult<BookWithRelationsRow> {
        self.with(|t| Ok(rows(t.book(isbn))))
    }

    async fn insert_book(&self, book: &BookInsert) -> StoreResult<BookWithRelationsRow> {
        self.with(|t| {
            if t.books.contains_key(&book.isbn) {
                return Err(StoreError::Constraint("books_pkey".into()));
            }
            t.check_references(book.author_id, book.publisher_id)?;
            t.books.insert(
                book.isbn.clone(),
                BookRow {
                    isbn: book.isbn.clone(),
                    name: book.name.clone(),
                    published_at: book.published_at,
                    author_id: book.author_id,
                    publisher_id: book.publisher_id,
                },
            );
            Ok(rows(t.book(&book.isbn)))
        })
    }

    async fn update_book(&self, isbn: &str, book: &BookUpdate) -> StoreResult<BookWithRelationsRow> {
        self.with(|t| {
            let Some(mut row) = t.books.get(isbn).cloned() else {
                return Ok(Some(vec![]));
            };
            let new_isbn = book.isbn.clone().unwrap_or_else(|| isbn.to_string());
            if new_isbn != isbn && t.books.contains_key(&new_isbn) {
                return Err(StoreError::Constraint("books_pkey".into()));
            }
            row.author_id = book.author_id.or(row.author_id);
            row.publisher_id = book.publisher_id.or(row.publisher_id);
            t.check_references(row.author_id, row.publisher_id)?;
            row.name = book.name.clone().unwrap_or(row.name);
            row.published_at = book.published_at.or(row.published_at);
            row.isbn = new_isbn.clone();
            t.books.remove(isbn);
            t.books.insert(new_isbn.clone(), row);
            for f in t.favorites.iter_mut().filter(|f| f.isbn == isbn) {
                f.isbn = new_isbn.clone();
            }
            Ok(rows(t.book(&new_isbn)))
        })
    }

    async fn delete_book(&self, isbn: &str) -> Result<(), StoreError> {
        self.with(|t| {
            t.remove_book(isbn);
            Ok(())
        })
    }

    async fn select_author(&self, author_id: i64) -> StoreResult<AuthorWithBooksRow> {
        self.with(|t| Ok(rows(t.author_with_books(author_id))))
    }

    async fn insert_author(&self, author: &AuthorInsert) -> StoreResult<AuthorWithBooksRow> {
        self.with(|t| {
            if t.authors.contains_key(&author.author_id) {
                return Err(StoreError::Constraint("authors_pkey".into()));
            }
            t.authors.insert(author.author_id, author.name.clone());
            Ok(rows(t.author_with_books(author.author_id)))
        })
    }

    async fn update_author(&self, author_id: i64, author: &AuthorUpdate) -> StoreResult<AuthorWithBooksRow> {
        self.with(|t| {
            let Some(name) = t.authors.get(&author_id).cloned() else {
                return Ok(Some(vec![]));
            };
            let new_id = author.author_id.unwrap_or(author_id);
            if new_id != author_id && t.authors.contains_key(&new_id) {
                return Err(StoreError::Constraint("authors_pkey".into()));
            }
            t.authors.remove(&author_id);
            t.authors.insert(new_id, author.name.clone().unwrap_or(name));
            for b in t.books.values_mut().filter(|b| b.author_id == Some(author_id)) {
                b.author_id = Some(new_id);
            }
            Ok(rows(t.author_with_books(new_id)))
        })
    }

    async fn delete_author(&self, author_id: i64) -> Result<(), StoreError> {
        self.with(|t| {
            t.authors.remove(&author_id);
            let owned: Vec<String> = t
                .books
                .values()
                .filter(|b| b.author_id == Some(author_id))
                .map(|b| b.isbn.clone())
                .collect();
            for isbn in owned {
                t.remove_book(&isbn);
            }
            Ok(())
        })
    }

    async fn select_publisher(&self, publisher_id: i64) -> StoreResult<PublisherWithBooksRow> {
        self.with(|t| Ok(rows(t.publisher_with_books(publisher_id))))
    }

    async fn insert_publisher(&self, publisher: &PublisherInsert) -> StoreResult<PublisherWithBooksRow> {
        self.with(|t| {
            if t.publishers.contains_key(&publisher.publisher_id) {
                return Err(StoreError::Constraint("publishers_pkey".into()));
            }
            t.publishers.insert(publisher.publisher_id, publisher.name.clone());
            Ok(rows(t.publisher_with_books(publisher.publisher_id)))
        })
    }

    async fn update_publisher(
        &self,
        publisher_id: i64,
        publisher: &PublisherUpdate,
    ) -> StoreResult<PublisherWithBooksRow> {
        self.with(|t| {
            let Some(name) = t.publishers.get(&publisher_id).cloned() else {
                return Ok(Some(vec![]));
            };
            let new_id = publisher.publisher_id.unwrap_or(publisher_id);
            if new_id != publisher_id && t.publishers.contains_key(&new_id) {
                return Err(StoreError::Constraint("publishers_pkey".into()));
            }
            t.publishers.remove(&publisher_id);
            t.publishers.insert(new_id, publisher.name.clone().unwrap_or(name));
            for b in t.books.values_mut().filter(|b| b.publisher_id == Some(publisher_id)) {
                b.publisher_id = Some(new_id);
            }
            Ok(rows(t.publisher_with_books(new_id)))
        })
    }

    async fn delete_publisher(&self, publisher_id: i64) -> Result<(), StoreError> {
        self.with(|t| {
            t.publishers.remove(&publisher_id);
            let owned: Vec<String> = t
                .books
                .values()
                .filter(|b| b.publisher_id == Some(publisher_id))
                .map(|b| b.isbn.clone())
                .collect();
            for isbn in owned {
                t.remove_book(&isbn);
            }
            Ok(())
        })
    }

    async fn select_favorite(&self, user_id: &str, isbn: &str) -> StoreResult<BookWithRelationsRow> {
        self.with(|t| {
            let hit = t.favorites.iter().any(|f| f.user_id == user_id && f.isbn == isbn);
            Ok(rows(if hit { t.book(isbn) } else { None }))
        })
    }

    async fn select_favorites(&self, user_id: &str) -> StoreResult<BookWithRelationsRow> {
        self.with(|t| {
            Ok(Some(
                t.favorites
                    .iter()
                    .filter(|f| f.user_id == user_id)
                    .filter_map(|f| t.book(&f.isbn))
                    .collect(),
            ))
        })
    }

    async fn insert_favorite(&self, user_id: &str, isbn: &str) -> StoreResult<BookWithRelationsRow> {
        self.with(|t| {
            if !t.books.contains_key(isbn) {
                return Err(StoreError::Constraint("favorites_isbn_fkey".into()));
            }
            if t.favorites.iter().any(|f| f.user_id == user_id && f.isbn == isbn) {
                return Err(StoreError::Constraint("favorites_pkey".into()));
            }
            t.favorites.push(FavoriteRow {
                user_id: user_id.into(),
                isbn: isbn.into(),
            });
            Ok(rows(t.book(isbn)))
        })
    }

    async fn move_favorite(&self, user_id: &str, from: &str, to: &str) -> StoreResult<BookWithRelationsRow> {
        self.with(|t| {
            let Some(pos) = t.favorites.iter().position(|f| f.user_id == user_id && f.isbn == from) else {
                return Ok(Some(vec![]));
            };
            if !t.books.contains_key(to) {
                return Err(StoreError::Constraint("favorites_isbn_fkey".into()));
            }
            if from != to && t.favorites.iter().any(|f| f.user_id == user_id && f.isbn == to) {
                return Err(StoreError::Constraint("favorites_pkey".into()));
            }
            t.favorites[pos].isbn = to.into();
            Ok(rows(t.book(to)))
        })
    }

    async fn delete_favorite(&self, user_id: &str, isbn: &str) -> Result<(), StoreError> {
        self.with(|t| {
            t.favorites.retain(|f| !(f.user_id == user_id && f.isbn == isbn));
            Ok(())
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.with(|_| Ok(()))
    }
}

struct Account {
    id: String,
    password: String,
}

/// Auth service stand-in: accounts by email, sessions by opaque token.
#[derive(Default)]
pub struct FakeAuth {
    accounts: Mutex<HashMap<String, Account>>,
    sessions: Mutex<HashMap<String, String>>,
    next: AtomicU64,
}

impl FakeAuth {
    fn user(&self, user_id: &str) -> Option<ProviderUser> {
        let accounts = self.accounts.lock().unwrap();
        accounts.iter().find(|(_, a)| a.id == user_id).map(|(email, a)| ProviderUser {
            id: a.id.clone(),
            email: Some(email.clone()),
            identities: Some(vec![json!({ "provider": "email" })]),
        })
    }

    fn open_session(&self, user_id: &str) -> ProviderSession {
        let token = format!("token-{}", self.next.fetch_add(1, Ordering::SeqCst));
        self.sessions.lock().unwrap().insert(token.clone(), user_id.to_string());
        ProviderSession {
            access_token: token,
            expires_in: Some(3600),
        }
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

fn rejected(status: u16, message: &str) -> AuthError {
    AuthError::Service {
        status,
        message: message.into(),
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignInResult, AuthError> {
        if password.len() < 6 {
            return Err(rejected(422, "password too short"));
        }
        let existing = self.accounts.lock().unwrap().get(email).map(|a| a.id.clone());
        if let Some(id) = existing {
            return Ok(SignInResult {
                user: Some(ProviderUser {
                    id,
                    email: Some(email.into()),
                    identities: Some(vec![]),
                }),
                session: None,
            });
        }
        let id = format!("user-{}", self.next.fetch_add(1, Ordering::SeqCst));
        self.accounts.lock().unwrap().insert(
            email.into(),
            Account {
                id: id.clone(),
                password: password.into(),
            },
        );
        Ok(SignInResult {
            user: self.user(&id),
            session: Some(self.open_session(&id)),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResult, AuthError> {
        let id = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                Some(a) if a.password == password => a.id.clone(),
                _ => return Err(rejected(400, "invalid login credentials")),
            }
        };
        Ok(SignInResult {
            user: self.user(&id),
            session: Some(self.open_session(&id)),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.sessions.lock().unwrap().remove(access_token);
        Ok(())
    }

    async fn update_password(&self, access_token: &str, password: &str) -> Result<Option<ProviderUser>, AuthError> {
        let user_id = self.sessions.lock().unwrap().get(access_token).cloned();
        let Some(user_id) = user_id else {
            return Ok(None);
        };
        if password.len() < 6 {
            return Err(rejected(422, "password too short"));
        }
        for a in self.accounts.lock().unwrap().values_mut().filter(|a| a.id == user_id) {
            a.password = password.into();
        }
        Ok(self.user(&user_id))
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<ProviderUser>, AuthError> {
        let user_id = self.sessions.lock().unwrap().get(access_token).cloned();
        Ok(user_id.and_then(|id| self.user(&id)))
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), AuthError> {
        self.accounts.lock().unwrap().retain(|_, a| a.id != user_id);
        self.sessions.lock().unwrap().retain(|_, id| id != user_id);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub auth: Arc<FakeAuth>,
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let auth = Arc::new(FakeAuth::default());
        let router = app(AppState::new(store.clone(), auth.clone()));
        TestApp { router, store, auth }
    }

    /// Registers `email` directly with the auth stand-in and returns its session cookie.
    pub async fn login(&self, email: &str) -> String {
        let res = self.auth.sign_up(email, "secret-pw").await.unwrap();
        let token = res.session.unwrap().access_token;
        format!("sb-access-token={token}")
    }

    pub async fn user_id(&self, cookie: &str) -> String {
        let token = cookie.trim_start_matches("sb-access-token=");
        self.auth.get_user(token).await.unwrap().unwrap().id
    }

    pub async fn raw(&self, method: Method, uri: &str, cookie: Option<&str>, body: Body) -> Reply {
        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(c) = cookie {
            req = req.header(header::COOKIE, c);
        }
        let res = self.router.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).unwrap())
        };
        Reply { status, headers, body }
    }

    pub async fn send(&self, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Reply {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        self.raw(method, uri, cookie, body).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Reply {
        self.send(Method::GET, uri, cookie, None).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> Reply {
        self.send(Method::POST, uri, cookie, Some(body)).await
    }

    pub async fn put(&self, uri: &str, cookie: Option<&str>, body: Value) -> Reply {
        self.send(Method::PUT, uri, cookie, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> Reply {
        self.send(Method::DELETE, uri, cookie, None).await
    }

    /// Author 801, publisher 900, and books Z00/Z01 referencing both.
    pub async fn seed_library(&self, cookie: &str) {
        let c = Some(cookie);
        assert_eq!(
            self.post("/authors", c, json!({ "authorId": 801, "name": "Ursula" })).await.status,
            StatusCode::CREATED
        );
        assert_eq!(
            self.post("/publishers", c, json!({ "publisherId": 900, "name": "Ace" })).await.status,
            StatusCode::CREATED
        );
        for (isbn, name) in [("Z00", "The Dispossessed"), ("Z01", "The Lathe of Heaven")] {
            let book = json!({ "isbn": isbn, "name": name, "authorId": 801, "publisherId": 900 });
            assert_eq!(self.post("/books", c, book).await.status, StatusCode::CREATED);
        }
    }
}
