use iced::widget::{column, container, row, text};
use iced::{Element, Length, Task, Theme};

// Declare the state and ui modules
mod state;
mod ui;

use state::catalog::{Catalog, CatalogError};
use state::data::{Book, SortField, SortSpec};
use state::service::BookService;
use ui::binder::{self, FormValues};
use ui::list::PAGE_SIZE;
use ui::upload;

/// Navigation targets within the app
///
/// `List` is the base route: list panel plus an empty editor. `Edit(id)`
/// is the editor pre-populated with that record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    List,
    Edit(i64),
}

/// Main application state
struct Bookshelf {
    /// Pass-through layer over the catalog database
    service: BookService,
    route: Route,
    /// The currently fetched window of the catalog
    books: Vec<Book>,
    total: u64,
    page_index: u64,
    sort: SortSpec,
    /// The record loaded into the editor (None = empty form or unsaved draft)
    selected: Option<Book>,
    form: FormValues,
    /// Cover data URL staged for the next save
    preview: Option<String>,
    /// Status line shown to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    Navigate(Route),
    SortBy(SortField),
    PrevPage,
    NextPage,
    /// A bound form field changed
    FieldEdited(&'static str, String),
    /// User clicked the cover upload button
    PickImage,
    Save,
    Cancel,
    Delete,
}

impl Bookshelf {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // If this fails, we panic because the app cannot function without its database
        let catalog =
            Catalog::new().expect("Failed to initialize database. Check permissions and disk space.");
        let service = BookService::new(catalog);

        let app = Self::with_service(service);
        println!("📚 Bookshelf initialized with {} books", app.total);

        (app, Task::none())
    }

    fn with_service(service: BookService) -> Self {
        let mut app = Bookshelf {
            service,
            route: Route::List,
            books: Vec::new(),
            total: 0,
            page_index: 0,
            sort: SortSpec::default(),
            selected: None,
            form: FormValues::default(),
            preview: None,
            status: String::new(),
        };
        app.load_page();
        app.status = format!("Ready. {} books in catalog.", app.total);
        app
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(Route::List) => {
                self.populate_form(None);
                self.route = Route::List;
            }
            Message::Navigate(Route::Edit(id)) => match self.service.get(id) {
                Ok(Some(book)) => {
                    self.populate_form(Some(book));
                    self.route = Route::Edit(id);
                }
                Ok(None) => {
                    // Stale id (row deleted elsewhere): notify and fall back
                    // to the base route.
                    self.status = format!("⚠️ The requested book was not found, ID = {id}");
                    self.populate_form(None);
                    self.load_page();
                    self.route = Route::List;
                }
                Err(err) => self.storage_failure(err),
            },
            Message::SortBy(field) => {
                self.sort.toggle(field);
                self.page_index = 0;
                self.load_page();
            }
            Message::PrevPage => {
                self.page_index = self.page_index.saturating_sub(1);
                self.load_page();
            }
            Message::NextPage => {
                if (self.page_index + 1) * PAGE_SIZE < self.total {
                    self.page_index += 1;
                    self.load_page();
                }
            }
            Message::FieldEdited(name, value) => self.form.set(name, value),
            Message::PickImage => {
                if let Some(path) = upload::pick_image_file() {
                    match upload::load_data_url(&path) {
                        Ok(url) => self.preview = Some(url),
                        Err(err) => self.status = format!("⚠️ {err}"),
                    }
                }
            }
            Message::Save => self.save(),
            Message::Cancel => {
                self.populate_form(None);
                self.load_page();
                self.route = Route::List;
            }
            Message::Delete => self.delete_selected(),
        }

        Task::none()
    }

    /// Save handler: validate, persist, clear the form, refresh the list,
    /// notify, navigate to the base route. On a validation failure the form
    /// keeps the user's input.
    fn save(&mut self) {
        let mut draft = self.selected.clone().unwrap_or_default();
        if let Err(err) = binder::write_book(&self.form, &mut draft) {
            self.status = format!("⚠️ {err}");
            return;
        }
        draft.image = self.preview.clone();

        match self.service.update(&draft) {
            Ok(_) => {
                self.populate_form(None);
                self.load_page();
                self.status = "✅ Book details stored.".to_string();
                self.route = Route::List;
            }
            Err(err) => self.storage_failure(err),
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected.as_ref().and_then(|book| book.id) else {
            return;
        };
        match self.service.delete(id) {
            Ok(()) => {
                self.populate_form(None);
                self.load_page();
                self.status = "🗑️ Book deleted.".to_string();
                self.route = Route::List;
            }
            Err(err) => self.storage_failure(err),
        }
    }

    /// Load the editor from a record, or clear it entirely.
    fn populate_form(&mut self, book: Option<Book>) {
        self.form = book.as_ref().map(binder::read_book).unwrap_or_default();
        self.preview = book.as_ref().and_then(|b| b.image.clone());
        self.selected = book;
    }

    /// Fetch the current window from the service. If the window fell off
    /// the end of the catalog (e.g. the last row of the last page was
    /// deleted), clamp to the last page and fetch again.
    fn load_page(&mut self) {
        for _ in 0..2 {
            match self
                .service
                .list(self.page_index * PAGE_SIZE, PAGE_SIZE, &self.sort)
            {
                Ok(page) => {
                    let last_page = page.total.saturating_sub(1) / PAGE_SIZE;
                    self.total = page.total;
                    self.books = page.items;
                    if self.page_index <= last_page {
                        return;
                    }
                    self.page_index = last_page;
                }
                Err(err) => {
                    self.storage_failure(err);
                    return;
                }
            }
        }
    }

    fn storage_failure(&mut self, err: CatalogError) {
        eprintln!("⚠️  Storage failure: {err}");
        self.status = "⚠️ Could not reach the catalog database.".to_string();
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let list = ui::list::view(
            &self.books,
            &self.sort,
            self.page_index,
            self.total,
            self.selected.as_ref().and_then(|book| book.id),
        );
        let editor = ui::editor::view(&self.form, self.preview.as_deref(), self.selected.is_some());

        let panels = row![
            container(list).width(Length::FillPortion(3)).padding(10),
            container(editor).width(Length::FillPortion(2)).padding(10),
        ]
        .spacing(10)
        .height(Length::Fill);

        column![panels, text(&self.status).size(14)]
            .spacing(8)
            .padding(10)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("Bookshelf", Bookshelf::update, Bookshelf::view)
        .theme(Bookshelf::theme)
        .centered()
        .run_with(Bookshelf::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An app backed by a throwaway database, driven headlessly.
    fn test_app() -> (Bookshelf, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::open(dir.path().join("books.db")).unwrap();
        (Bookshelf::with_service(BookService::new(catalog)), dir)
    }

    fn type_field(app: &mut Bookshelf, name: &'static str, value: &str) {
        let _ = app.update(Message::FieldEdited(name, value.to_string()));
    }

    #[test]
    fn test_save_persists_and_returns_to_the_base_route() {
        let (mut app, _dir) = test_app();

        type_field(&mut app, "name", "Roadside Picnic");
        type_field(&mut app, "author", "Arkady Strugatsky");
        let _ = app.update(Message::Save);

        assert_eq!(app.service.count().unwrap(), 1);
        assert!(app.status.contains("stored"));
        assert_eq!(app.route, Route::List);
        // Form cleared, list refreshed.
        assert_eq!(app.form.get("name"), "");
        assert_eq!(app.books.len(), 1);
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_validation_failure_keeps_the_form_as_typed() {
        let (mut app, _dir) = test_app();

        type_field(&mut app, "name", "Roadside Picnic");
        type_field(&mut app, "author", "Arkady Strugatsky");
        type_field(&mut app, "pages", "abc");
        let _ = app.update(Message::Save);

        // Nothing persisted, everything the user typed is still there.
        assert_eq!(app.service.count().unwrap(), 0);
        assert_eq!(app.form.get("name"), "Roadside Picnic");
        assert_eq!(app.form.get("author"), "Arkady Strugatsky");
        assert_eq!(app.form.get("pages"), "abc");
        assert!(app.status.contains("only numbers are allowed"));
    }

    #[test]
    fn test_navigating_to_an_unknown_id_lands_on_the_base_route() {
        let (mut app, _dir) = test_app();

        let _ = app.update(Message::Navigate(Route::Edit(999)));

        assert!(app.status.contains("was not found"));
        assert_eq!(app.route, Route::List);
        assert!(app.selected.is_none());
        assert_eq!(app.form.get("name"), "");
    }

    #[test]
    fn test_selecting_a_row_populates_the_editor() {
        let (mut app, _dir) = test_app();

        let stored = app
            .service
            .update(&Book {
                name: "Solaris".to_string(),
                author: "Stanisław Lem".to_string(),
                image: Some("data:image/png;base64,aGk%3D".to_string()),
                ..Book::default()
            })
            .unwrap();

        let _ = app.update(Message::Navigate(Route::Edit(stored.id.unwrap())));

        assert_eq!(app.route, Route::Edit(stored.id.unwrap()));
        assert_eq!(app.form.get("name"), "Solaris");
        assert_eq!(app.preview.as_deref(), Some("data:image/png;base64,aGk%3D"));
        assert!(app.selected.is_some());
    }

    #[test]
    fn test_editing_then_saving_fully_replaces_the_record() {
        let (mut app, _dir) = test_app();

        let stored = app
            .service
            .update(&Book {
                name: "Solaris".to_string(),
                author: "Stanisław Lem".to_string(),
                isbn: Some("978-0156027595".to_string()),
                ..Book::default()
            })
            .unwrap();
        let id = stored.id.unwrap();

        let _ = app.update(Message::Navigate(Route::Edit(id)));
        type_field(&mut app, "name", "Fiasco");
        type_field(&mut app, "isbn", ""); // blanked field must end up empty in storage
        let _ = app.update(Message::Save);

        let found = app.service.get(id).unwrap().unwrap();
        assert_eq!(found.name, "Fiasco");
        assert_eq!(found.isbn, None);
        assert_eq!(app.service.count().unwrap(), 1);
    }

    #[test]
    fn test_cancel_discards_the_draft() {
        let (mut app, _dir) = test_app();

        type_field(&mut app, "name", "Unsaved draft");
        let _ = app.update(Message::Cancel);

        assert_eq!(app.service.count().unwrap(), 0);
        assert_eq!(app.form.get("name"), "");
        assert_eq!(app.route, Route::List);
    }

    #[test]
    fn test_delete_removes_the_selected_record() {
        let (mut app, _dir) = test_app();

        let stored = app
            .service
            .update(&Book {
                name: "Solaris".to_string(),
                author: "Stanisław Lem".to_string(),
                ..Book::default()
            })
            .unwrap();
        let id = stored.id.unwrap();

        let _ = app.update(Message::Navigate(Route::Edit(id)));
        let _ = app.update(Message::Delete);

        assert!(app.service.get(id).unwrap().is_none());
        assert!(app.selected.is_none());
        assert_eq!(app.route, Route::List);
        assert!(app.books.is_empty());
    }

    #[test]
    fn test_delete_without_a_selection_is_ignored() {
        let (mut app, _dir) = test_app();
        let _ = app.update(Message::Delete);
        assert_eq!(app.service.count().unwrap(), 0);
    }

    #[test]
    fn test_deleting_the_last_row_of_the_last_page_clamps_the_window() {
        let (mut app, _dir) = test_app();

        // 11 books: page 0 holds 10, page 1 holds 1.
        let mut last_id = 0;
        for i in 0..11 {
            let stored = app
                .service
                .update(&Book {
                    name: format!("Book {i:02}"),
                    author: "Author".to_string(),
                    ..Book::default()
                })
                .unwrap();
            last_id = stored.id.unwrap();
        }
        app.load_page();

        let _ = app.update(Message::NextPage);
        assert_eq!(app.page_index, 1);
        assert_eq!(app.books.len(), 1);

        let _ = app.update(Message::Navigate(Route::Edit(last_id)));
        let _ = app.update(Message::Delete);

        assert_eq!(app.page_index, 0);
        assert_eq!(app.books.len(), 10);
    }

    #[test]
    fn test_sorting_resets_to_the_first_page() {
        let (mut app, _dir) = test_app();

        for i in 0..15 {
            app.service
                .update(&Book {
                    name: format!("Book {i:02}"),
                    author: "Author".to_string(),
                    ..Book::default()
                })
                .unwrap();
        }
        app.load_page();
        let _ = app.update(Message::NextPage);
        assert_eq!(app.page_index, 1);

        let _ = app.update(Message::SortBy(SortField::Author));
        assert_eq!(app.page_index, 0);
        assert_eq!(app.sort.field, SortField::Author);
    }

    #[test]
    fn test_clearing_the_form_hides_the_preview() {
        let (mut app, _dir) = test_app();

        let stored = app
            .service
            .update(&Book {
                name: "Solaris".to_string(),
                author: "Stanisław Lem".to_string(),
                image: Some("data:image/png;base64,aGk%3D".to_string()),
                ..Book::default()
            })
            .unwrap();

        let _ = app.update(Message::Navigate(Route::Edit(stored.id.unwrap())));
        assert!(app.preview.is_some());

        let _ = app.update(Message::Cancel);
        assert!(app.preview.is_none());
    }
}
