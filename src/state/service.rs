/// Pass-through service between the UI and the catalog
///
/// This layer exists so the presentation code never touches the storage
/// interface directly. It adds no logic of its own; every call forwards
/// to the Catalog unchanged.

use super::catalog::{Catalog, CatalogError};
use super::data::{Book, Page, SortSpec};

pub struct BookService {
    catalog: Catalog,
}

impl BookService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Look up one book; `Ok(None)` when the id has no row.
    pub fn get(&self, id: i64) -> Result<Option<Book>, CatalogError> {
        self.catalog.find_by_id(id)
    }

    /// Insert or fully overwrite a book.
    pub fn update(&self, book: &Book) -> Result<Book, CatalogError> {
        self.catalog.save(book)
    }

    /// Delete a book by id.
    pub fn delete(&self, id: i64) -> Result<(), CatalogError> {
        self.catalog.delete_by_id(id)
    }

    /// One window of the catalog plus the total count.
    pub fn list(&self, offset: u64, limit: u64, sort: &SortSpec) -> Result<Page, CatalogError> {
        self.catalog.find_page(offset, limit, sort)
    }

    /// Total number of books.
    pub fn count(&self) -> Result<u64, CatalogError> {
        self.catalog.count()
    }

    /// Every book, unordered.
    pub fn find_all(&self) -> Result<Vec<Book>, CatalogError> {
        self.catalog.find_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_forwards_to_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::open(dir.path().join("books.db")).unwrap();
        let service = BookService::new(catalog);

        let book = Book {
            name: "Invisible Cities".to_string(),
            author: "Italo Calvino".to_string(),
            ..Book::default()
        };

        let stored = service.update(&book).unwrap();
        let id = stored.id.unwrap();

        assert_eq!(service.count().unwrap(), 1);
        assert_eq!(service.get(id).unwrap().unwrap().name, "Invisible Cities");
        assert_eq!(service.find_all().unwrap().len(), 1);

        let page = service.list(0, 10, &SortSpec::default()).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);

        service.delete(id).unwrap();
        assert!(service.get(id).unwrap().is_none());
    }
}
