/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer and the UI layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single book record in the catalog
///
/// `id` is `None` for a draft that has never been saved; the database
/// assigns it exactly once on insert and it never changes afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Book {
    /// Unique database ID (None = not yet persisted)
    pub id: Option<i64>,
    /// Title, required
    pub name: String,
    /// Author, required
    pub author: String,
    /// Publication date (ISO-8601 text in the database)
    pub publication_date: Option<NaiveDate>,
    /// Page count
    pub pages: Option<u32>,
    /// ISBN, free-form text
    pub isbn: Option<String>,
    /// Cover image as a data URL (`data:<mime>;base64,<payload>`)
    pub image: Option<String>,
}

/// Columns the list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Author,
    PublicationDate,
    Pages,
    Isbn,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::Author,
        SortField::PublicationDate,
        SortField::Pages,
        SortField::Isbn,
    ];

    /// Database column for this sort key.
    /// Sort keys map through this whitelist; user input never reaches the SQL text.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Author => "author",
            SortField::PublicationDate => "publication_date",
            SortField::Pages => "pages",
            SortField::Isbn => "isbn",
        }
    }

    /// Column header shown in the list panel
    pub fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Author => "Author",
            SortField::PublicationDate => "Published",
            SortField::Pages => "Pages",
            SortField::Isbn => "ISBN",
        }
    }
}

/// Requested ordering for a page query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            descending: false,
        }
    }
}

impl SortSpec {
    /// Re-sorting by the current field flips the direction;
    /// a new field starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.descending = !self.descending;
        } else {
            self.field = field;
            self.descending = false;
        }
    }
}

/// One window of the catalog plus the total record count
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub items: Vec<Book>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_field_flips_direction() {
        let mut sort = SortSpec::default();
        assert!(!sort.descending);

        sort.toggle(SortField::Name);
        assert!(sort.descending);

        sort.toggle(SortField::Name);
        assert!(!sort.descending);
    }

    #[test]
    fn test_toggle_new_field_starts_ascending() {
        let mut sort = SortSpec::default();
        sort.toggle(SortField::Name); // now descending by name

        sort.toggle(SortField::Pages);
        assert_eq!(sort.field, SortField::Pages);
        assert!(!sort.descending);
    }

    #[test]
    fn test_new_book_has_no_id() {
        let book = Book::default();
        assert!(book.id.is_none());
        assert!(book.name.is_empty());
    }
}
