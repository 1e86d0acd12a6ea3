//! Builds the joined SELECTs and the keyed writes used by the Postgres store.
//!
//! Every read yields one `json` column per row; embedded relations are scalar subqueries
//! (`json_build_object` for to-one, `json_agg` for to-many) so the nested shape comes
//! back from a single statement.

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// Qualified names of the four library tables in one schema.
#[derive(Clone, Debug)]
pub struct Tables {
    pub authors: String,
    pub publishers: String,
    pub books: String,
    pub favorites: String,
}

impl Tables {
    pub fn new(schema: &str) -> Self {
        Tables {
            authors: qualified_table(schema, "authors"),
            publishers: qualified_table(schema, "publishers"),
            books: qualified_table(schema, "books"),
            favorites: qualified_table(schema, "favorites"),
        }
    }
}

fn author_object(t: &Tables, key: &str) -> String {
    format!(
        "(SELECT json_build_object('author_id', a.author_id, 'name', a.name) FROM {} a WHERE a.author_id = {})",
        t.authors, key
    )
}

fn publisher_object(t: &Tables, key: &str) -> String {
    format!(
        "(SELECT json_build_object('publisher_id', p.publisher_id, 'name', p.name) FROM {} p WHERE p.publisher_id = {})",
        t.publishers, key
    )
}

/// Book scalar fields as `json_build_object` arguments, for alias `b`.
const BOOK_FIELDS: &str = "'isbn', b.isbn, 'name', b.name, 'published_at', b.published_at, \
                           'author_id', b.author_id, 'publisher_id', b.publisher_id";

/// Book with both to-one relations, for alias `b`.
fn book_with_relations(t: &Tables) -> String {
    format!(
        "json_build_object({}, 'author', {}, 'publisher', {})",
        BOOK_FIELDS,
        author_object(t, "b.author_id"),
        publisher_object(t, "b.publisher_id")
    )
}

/// Books whose isbn is in `$1` (text[]).
pub fn select_books_by_isbn(t: &Tables) -> String {
    format!(
        "SELECT {} FROM {} b WHERE b.isbn = ANY($1)",
        book_with_relations(t),
        t.books
    )
}

/// Authors whose id is in `$1` (bigint[]), each with its books and their publishers.
pub fn select_authors_by_id(t: &Tables) -> String {
    let book = format!("json_build_object({}, 'publisher', {})", BOOK_FIELDS, publisher_object(t, "b.publisher_id"));
    format!(
        "SELECT json_build_object('author_id', x.author_id, 'name', x.name, 'books', \
         (SELECT COALESCE(json_agg({} ORDER BY b.isbn), '[]'::json) FROM {} b WHERE b.author_id = x.author_id)) \
         FROM {} x WHERE x.author_id = ANY($1)",
        book, t.books, t.authors
    )
}

/// Publishers whose id is in `$1` (bigint[]), each with its books and their authors.
pub fn select_publishers_by_id(t: &Tables) -> String {
    let book = format!("json_build_object({}, 'author', {})", BOOK_FIELDS, author_object(t, "b.author_id"));
    format!(
        "SELECT json_build_object('publisher_id', x.publisher_id, 'name', x.name, 'books', \
         (SELECT COALESCE(json_agg({} ORDER BY b.isbn), '[]'::json) FROM {} b WHERE b.publisher_id = x.publisher_id)) \
         FROM {} x WHERE x.publisher_id = ANY($1)",
        book, t.books, t.publishers
    )
}

pub fn insert_book(t: &Tables) -> String {
    format!(
        "INSERT INTO {} (isbn, name, author_id, publisher_id, published_at) VALUES ($1, $2, $3, $4, $5) RETURNING isbn",
        t.books
    )
}

/// Partial update keyed by `$1`; NULL parameters keep the stored value.
pub fn update_book(t: &Tables) -> String {
    format!(
        "UPDATE {} SET isbn = COALESCE($2, isbn), name = COALESCE($3, name), \
         author_id = COALESCE($4, author_id), publisher_id = COALESCE($5, publisher_id), \
         published_at = COALESCE($6, published_at) WHERE isbn = $1 RETURNING isbn",
        t.books
    )
}

pub fn delete_book(t: &Tables) -> String {
    format!("DELETE FROM {} WHERE isbn = $1", t.books)
}

pub fn insert_author(t: &Tables) -> String {
    format!("INSERT INTO {} (author_id, name) VALUES ($1, $2) RETURNING author_id", t.authors)
}

pub fn update_author(t: &Tables) -> String {
    format!(
        "UPDATE {} SET author_id = COALESCE($2, author_id), name = COALESCE($3, name) \
         WHERE author_id = $1 RETURNING author_id",
        t.authors
    )
}

pub fn delete_author(t: &Tables) -> String {
    format!("DELETE FROM {} WHERE author_id = $1", t.authors)
}

pub fn insert_publisher(t: &Tables) -> String {
    format!(
        "INSERT INTO {} (publisher_id, name) VALUES ($1, $2) RETURNING publisher_id",
        t.publishers
    )
}

pub fn update_publisher(t: &Tables) -> String {
    format!(
        "UPDATE {} SET publisher_id = COALESCE($2, publisher_id), name = COALESCE($3, name) \
         WHERE publisher_id = $1 RETURNING publisher_id",
        t.publishers
    )
}

pub fn delete_publisher(t: &Tables) -> String {
    format!("DELETE FROM {} WHERE publisher_id = $1", t.publishers)
}

/// Favorited books of user `$1`, optionally narrowed to isbn `$2`.
pub fn select_favorites(t: &Tables, by_isbn: bool) -> String {
    let isbn_filter = if by_isbn {
        " AND f.isbn = $2"
    } else {
        " ORDER BY f.created_at, f.isbn"
    };
    format!(
        "SELECT {} FROM {} f JOIN {} b ON b.isbn = f.isbn WHERE f.user_id = $1{}",
        book_with_relations(t),
        t.favorites,
        t.books,
        isbn_filter
    )
}

/// Insert favorite (`$1` user, `$2` isbn) and return the favorited book in one statement.
pub fn insert_favorite(t: &Tables) -> String {
    format!(
        "WITH added AS (INSERT INTO {} (user_id, isbn) VALUES ($1, $2) RETURNING isbn) \
         SELECT {} FROM added JOIN {} b ON b.isbn = added.isbn",
        t.favorites,
        book_with_relations(t),
        t.books
    )
}

/// Re-point user `$1`'s favorite from isbn `$2` to `$3` with one conditional UPDATE.
pub fn move_favorite(t: &Tables) -> String {
    format!(
        "WITH moved AS (UPDATE {} SET isbn = $3 WHERE user_id = $1 AND isbn = $2 RETURNING isbn) \
         SELECT {} FROM moved JOIN {} b ON b.isbn = moved.isbn",
        t.favorites,
        book_with_relations(t),
        t.books
    )
}

pub fn delete_favorite(t: &Tables) -> String {
    format!("DELETE FROM {} WHERE user_id = $1 AND isbn = $2", t.favorites)
}
