/// Paginated, sortable list panel
///
/// Renders only the window of books the app has fetched; paging and
/// sorting emit messages that make the app re-query the service for a
/// new window. The full catalog is never loaded here.

use iced::widget::{button, column, image, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::state::data::{Book, SortField, SortSpec};
use crate::ui::upload;
use crate::{Message, Route};

/// Rows fetched per window
pub const PAGE_SIZE: u64 = 10;

const THUMB_WIDTH: f32 = 68.0;

pub fn view<'a>(
    books: &'a [Book],
    sort: &SortSpec,
    page_index: u64,
    total: u64,
    selected: Option<i64>,
) -> Element<'a, Message> {
    let mut header = row![Space::with_width(Length::Fixed(THUMB_WIDTH))]
        .spacing(8)
        .align_y(Alignment::Center);
    for field in SortField::ALL {
        let marker = if sort.field == field {
            if sort.descending {
                " ▼"
            } else {
                " ▲"
            }
        } else {
            ""
        };
        header = header.push(
            button(text(format!("{}{marker}", field.label())).size(13))
                .on_press(Message::SortBy(field))
                .style(button::text)
                .width(column_width(field)),
        );
    }

    let mut rows = column![].spacing(2);
    for book in books {
        rows = rows.push(book_row(book, selected));
    }

    let page_count = total.div_ceil(PAGE_SIZE).max(1);
    let pager = row![
        button("Prev").on_press_maybe((page_index > 0).then_some(Message::PrevPage)),
        text(format!(
            "Page {} of {page_count} · {total} books",
            page_index + 1
        ))
        .size(13),
        button("Next").on_press_maybe((page_index + 1 < page_count).then_some(Message::NextPage)),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    column![header, rows.height(Length::Fill), pager]
        .spacing(8)
        .into()
}

/// One selectable row. Clicking navigates to the book's edit route;
/// clicking the already-selected row deselects back to the base route.
fn book_row<'a>(book: &'a Book, selected: Option<i64>) -> Element<'a, Message> {
    let is_selected = book.id.is_some() && selected == book.id;

    let thumbnail: Element<'a, Message> = match book.image.as_deref().and_then(upload::decode_data_url) {
        Some(bytes) => iced::widget::image(image::Handle::from_bytes(bytes))
            .height(Length::Fixed(48.0))
            .width(Length::Fixed(THUMB_WIDTH))
            .into(),
        None => Space::with_width(Length::Fixed(THUMB_WIDTH)).into(),
    };

    let cells = row![
        thumbnail,
        text(book.name.as_str()).width(column_width(SortField::Name)),
        text(book.author.as_str()).width(column_width(SortField::Author)),
        text(
            book.publication_date
                .map(|d| d.to_string())
                .unwrap_or_default()
        )
        .width(column_width(SortField::PublicationDate)),
        text(book.pages.map(|p| p.to_string()).unwrap_or_default())
            .width(column_width(SortField::Pages)),
        text(book.isbn.as_deref().unwrap_or_default()).width(column_width(SortField::Isbn)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let target = match book.id {
        Some(id) if !is_selected => Route::Edit(id),
        _ => Route::List,
    };

    button(cells)
        .on_press(Message::Navigate(target))
        .style(if is_selected {
            button::primary
        } else {
            button::text
        })
        .width(Length::Fill)
        .into()
}

fn column_width(field: SortField) -> Length {
    match field {
        SortField::Name | SortField::Author => Length::FillPortion(3),
        _ => Length::FillPortion(2),
    }
}
