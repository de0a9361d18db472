use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use thiserror::Error;

use super::data::{Book, Page, SortSpec};

/// Errors from the persistence boundary.
///
/// A missing record is never an error; lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("could not determine user data directory")]
    DataDir,
}

/// The Catalog manages the SQLite book database.
///
/// It is the only place in the application that speaks SQL; everything
/// above it works in terms of `Book` values.
pub struct Catalog {
    conn: Connection,
    db_path: PathBuf,
}

const BOOK_COLUMNS: &str = "id, name, author, publication_date, pages, isbn, image";

impl Catalog {
    /// Create a Catalog backed by the database in the user's data directory.
    ///
    /// - Linux: ~/.local/share/bookshelf/bookshelf.db
    /// - macOS: ~/Library/Application Support/bookshelf/bookshelf.db
    /// - Windows: %APPDATA%\bookshelf\bookshelf.db
    pub fn new() -> Result<Self, CatalogError> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(CatalogError::DataDir)?;
        path.push("bookshelf");
        path.push("bookshelf.db");
        Self::open(path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open(db_path: PathBuf) -> Result<Self, CatalogError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_| CatalogError::DataDir)?;
        }

        let conn = Connection::open(&db_path)?;

        println!("📁 Database initialized at: {}", db_path.display());

        let catalog = Catalog { conn, db_path };
        catalog.init_schema()?;

        Ok(catalog)
    }

    /// Initialize the database schema.
    /// Creates the books table if it doesn't exist.
    fn init_schema(&self) -> Result<(), CatalogError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS books (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                name             TEXT NOT NULL,
                author           TEXT NOT NULL,
                publication_date TEXT,
                pages            INTEGER,
                isbn             TEXT,
                image            TEXT
            )",
            [],
        )?;

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Look up a single book. `Ok(None)` when the id has no row.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Book>, CatalogError> {
        let book = self
            .conn
            .query_row(
                &format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"),
                [id],
                book_from_row,
            )
            .optional()?;
        Ok(book)
    }

    /// Persist a book.
    ///
    /// A book without an id is inserted and returned with its assigned id.
    /// A book with an id fully replaces the matching row; every column is
    /// written, so fields blanked in the draft become NULL in storage.
    pub fn save(&self, book: &Book) -> Result<Book, CatalogError> {
        let date_text = book.publication_date.map(|d| d.format("%Y-%m-%d").to_string());

        match book.id {
            None => {
                self.conn.execute(
                    "INSERT INTO books (name, author, publication_date, pages, isbn, image)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        book.name,
                        book.author,
                        date_text,
                        book.pages,
                        book.isbn,
                        book.image
                    ],
                )?;

                let mut stored = book.clone();
                stored.id = Some(self.conn.last_insert_rowid());
                Ok(stored)
            }
            Some(id) => {
                self.conn.execute(
                    "INSERT OR REPLACE INTO books (id, name, author, publication_date, pages, isbn, image)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        id,
                        book.name,
                        book.author,
                        date_text,
                        book.pages,
                        book.isbn,
                        book.image
                    ],
                )?;
                Ok(book.clone())
            }
        }
    }

    /// Remove a book by id. Deleting an id that has no row is a no-op.
    pub fn delete_by_id(&self, id: i64) -> Result<(), CatalogError> {
        self.conn.execute("DELETE FROM books WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Get every book in the catalog. Order is unspecified.
    pub fn find_all(&self) -> Result<Vec<Book>, CatalogError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books"))?;

        let book_iter = stmt.query_map([], book_from_row)?;

        let mut books = Vec::new();
        for book in book_iter {
            books.push(book?);
        }

        Ok(books)
    }

    /// Get one window of the catalog plus the total count.
    ///
    /// Rows are ordered by the requested sort column with the id as a
    /// tiebreak, so consecutive windows never overlap even when the sort
    /// key has duplicate values.
    pub fn find_page(&self, offset: u64, limit: u64, sort: &SortSpec) -> Result<Page, CatalogError> {
        let total = self.count()?;

        let direction = if sort.descending { "DESC" } else { "ASC" };
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books
             ORDER BY {column} {direction}, id {direction}
             LIMIT ?1 OFFSET ?2",
            column = sort.field.column(),
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let book_iter = stmt.query_map(params![limit as i64, offset as i64], book_from_row)?;

        let mut items = Vec::new();
        for book in book_iter {
            items.push(book?);
        }

        Ok(Page { items, total })
    }

    /// Total number of books in the catalog
    pub fn count(&self) -> Result<u64, CatalogError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Map a database row onto a Book.
/// A date cell that doesn't parse is treated as absent rather than failing the query.
fn book_from_row(row: &Row) -> rusqlite::Result<Book> {
    let date_text: Option<String> = row.get(3)?;
    Ok(Book {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        author: row.get(2)?,
        publication_date: date_text
            .and_then(|text| NaiveDate::parse_from_str(&text, "%Y-%m-%d").ok()),
        pages: row.get(4)?,
        isbn: row.get(5)?,
        image: row.get(6)?,
    })
}

// Implement Debug for better error messages
impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("db_path", &self.db_path)
            .finish()
    }
}
