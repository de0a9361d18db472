/// Explicit field binding between the edit form and the Book entity
///
/// Each bound field carries a reader (entity -> form text) and a writer
/// (form text -> entity) that validates and converts its input. The table
/// is fixed at compile time; there is no runtime introspection.

use chrono::NaiveDate;
use thiserror::Error;

use crate::state::data::Book;

/// A save was rejected because a form field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

pub struct FieldBinding {
    /// Stable key used by messages and the form value store
    pub name: &'static str,
    /// Label shown next to the input
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Fill the form text from the entity
    pub read: fn(&Book) -> String,
    /// Validate/convert form text back into the entity
    pub write: fn(&mut Book, &str) -> Result<(), String>,
}

pub const BINDINGS: &[FieldBinding] = &[
    FieldBinding {
        name: "name",
        label: "Name",
        placeholder: "",
        read: |book| book.name.clone(),
        write: write_name,
    },
    FieldBinding {
        name: "author",
        label: "Author",
        placeholder: "",
        read: |book| book.author.clone(),
        write: write_author,
    },
    FieldBinding {
        name: "publication_date",
        label: "Publication Date",
        placeholder: "YYYY-MM-DD",
        read: |book| {
            book.publication_date
                .map(|d| d.to_string())
                .unwrap_or_default()
        },
        write: write_publication_date,
    },
    FieldBinding {
        name: "pages",
        label: "Pages",
        placeholder: "",
        read: |book| book.pages.map(|p| p.to_string()).unwrap_or_default(),
        write: write_pages,
    },
    FieldBinding {
        name: "isbn",
        label: "Isbn",
        placeholder: "",
        read: |book| book.isbn.clone().unwrap_or_default(),
        write: write_isbn,
    },
];

fn write_name(book: &mut Book, input: &str) -> Result<(), String> {
    let value = input.trim();
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    book.name = value.to_string();
    Ok(())
}

fn write_author(book: &mut Book, input: &str) -> Result<(), String> {
    let value = input.trim();
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    book.author = value.to_string();
    Ok(())
}

fn write_publication_date(book: &mut Book, input: &str) -> Result<(), String> {
    let value = input.trim();
    if value.is_empty() {
        book.publication_date = None;
        return Ok(());
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => {
            book.publication_date = Some(date);
            Ok(())
        }
        Err(_) => Err("expected a date like 1965-05-01".to_string()),
    }
}

fn write_pages(book: &mut Book, input: &str) -> Result<(), String> {
    let value = input.trim();
    if value.is_empty() {
        book.pages = None;
        return Ok(());
    }
    match value.parse::<u32>() {
        Ok(pages) => {
            book.pages = Some(pages);
            Ok(())
        }
        Err(_) => Err("only numbers are allowed".to_string()),
    }
}

fn write_isbn(book: &mut Book, input: &str) -> Result<(), String> {
    let value = input.trim();
    book.isbn = if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    };
    Ok(())
}

/// Text of every bound form field, keyed by binding name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(Vec<(&'static str, String)>);

impl FormValues {
    pub fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn set(&mut self, name: &'static str, value: String) {
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }
}

/// Fill the form from an entity.
pub fn read_book(book: &Book) -> FormValues {
    let mut form = FormValues::default();
    for binding in BINDINGS {
        form.set(binding.name, (binding.read)(book));
    }
    form
}

/// Validate the whole form and write it into the entity.
///
/// On the first failing field the entity is left untouched and the error
/// names the field; the caller keeps the form as the user typed it.
pub fn write_book(form: &FormValues, book: &mut Book) -> Result<(), ValidationError> {
    let mut draft = book.clone();
    for binding in BINDINGS {
        (binding.write)(&mut draft, form.get(binding.name)).map_err(|message| {
            ValidationError {
                field: binding.label,
                message,
            }
        })?;
    }
    *book = draft;
    Ok(())
}
