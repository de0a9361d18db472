/// Detail/edit panel
///
/// A form column driven by the binding table, the cover preview with its
/// upload button, and the Save/Cancel/Delete row. Delete is only wired
/// while an existing record is selected.

use iced::widget::{button, column, image, row, scrollable, text, text_input};
use iced::{Element, Length};

use crate::ui::{binder, upload};
use crate::ui::binder::FormValues;
use crate::Message;

pub fn view<'a>(
    form: &'a FormValues,
    preview: Option<&'a str>,
    has_selection: bool,
) -> Element<'a, Message> {
    let mut fields = column![text("Image").size(12)].spacing(12);

    // Preview is hidden entirely while there is no image.
    if let Some(bytes) = preview.and_then(upload::decode_data_url) {
        fields = fields.push(
            iced::widget::image(image::Handle::from_bytes(bytes)).width(Length::Fill),
        );
    }
    fields = fields.push(button("Upload image…").on_press(Message::PickImage));

    for binding in binder::BINDINGS {
        let name = binding.name;
        fields = fields.push(
            column![
                text(binding.label).size(12),
                text_input(binding.placeholder, form.get(name))
                    .on_input(move |value| Message::FieldEdited(name, value)),
            ]
            .spacing(2),
        );
    }

    let buttons = row![
        button("Save").on_press(Message::Save).style(button::primary),
        button("Cancel").on_press(Message::Cancel),
        button("Delete")
            .on_press_maybe(has_selection.then_some(Message::Delete))
            .style(button::danger),
    ]
    .spacing(8);

    column![scrollable(fields).height(Length::Fill), buttons]
        .spacing(16)
        .into()
}
