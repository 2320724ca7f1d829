//! Lead-capture popup modal markup.
//!
//! The modal is an HTMX fragment swapped into `#popup-root`. Each control
//! posts its own value on `change`, so the server-side form state follows
//! the visitor's edits one event at a time.

use super::escape::html_escape;
use crate::popup::{Field, PopupForm};

/// Element the popup fragment is swapped into.
pub const POPUP_ROOT_ID: &str = "popup-root";

/// Static content of the popup that does not depend on the instance.
#[derive(Debug, Clone)]
pub struct PopupView<'a> {
    /// Heading above the form.
    pub heading: &'a str,
    /// Image shown on the left on wide screens.
    pub image_path: &'a str,
}

const INPUT_CLASSES: &str = "border-2 border-gray-300 rounded-md w-full p-1 text-sm";

fn control(id: &str, form: &PopupForm, field: Field) -> String {
    let key = field.key();
    let value = html_escape(form.values().value(field));
    let endpoint = format!("/popup/{id}/field");

    match field {
        Field::Address => format!(
            r#"<textarea name="{key}" class="{INPUT_CLASSES} h-24" hx-post="{endpoint}" hx-trigger="change" hx-swap="none">{value}</textarea>"#
        ),
        Field::Email => format!(
            r#"<input type="email" name="{key}" value="{value}" class="{INPUT_CLASSES}" hx-post="{endpoint}" hx-trigger="change" hx-swap="none">"#
        ),
        Field::Name | Field::MobileNo => format!(
            r#"<input type="text" name="{key}" value="{value}" class="{INPUT_CLASSES}" hx-post="{endpoint}" hx-trigger="change" hx-swap="none">"#
        ),
    }
}

fn labelled(id: &str, form: &PopupForm, field: Field) -> String {
    let error = form
        .errors()
        .for_field(field)
        .map(|message| {
            format!(
                r#"<p class="text-red-500 text-xs" data-error-for="{key}">{message}</p>"#,
                key = field.key(),
                message = html_escape(message),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<label class="block mb-1 text-sm">{label}{control}</label>{error}"#,
        label = field.label(),
        control = control(id, form, field),
    )
}

/// Render the open popup `id` with its current values and errors.
#[must_use]
pub fn render_popup(id: &str, form: &PopupForm, view: &PopupView<'_>) -> String {
    let id = html_escape(id);
    format!(
        r##"<div class="fixed inset-0 bg-gray-800 bg-opacity-50 flex justify-center items-center z-50" data-popup-id="{id}">
    <div class="bg-white flex rounded shadow-md relative m-6" style="width: 90%; max-width: 800px; min-height: 200px;">
        <div class="md:block hidden w-1/2">
            <img src="{image}" alt="{heading}" class="w-full h-full object-contain rounded-l">
        </div>
        <div class="w-full md:w-1/2 p-4 overflow-hidden flex flex-col">
            <button type="button" class="absolute top-2 right-2 text-gray-500 hover:text-gray-900" aria-label="Close"
                hx-post="/popup/{id}/close" hx-target="#{root}" hx-swap="innerHTML">
                <svg xmlns="http://www.w3.org/2000/svg" class="h-6 w-6" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                </svg>
            </button>
            <h2 class="text-lg font-bold mb-4 text-center">{heading}</h2>
            <form class="flex flex-col" hx-post="/popup/{id}/submit" hx-target="#{root}" hx-swap="innerHTML">
                <div class="flex mb-2 space-x-2">
                    <div class="flex-1">{name}</div>
                    <div class="flex-1">{mobile}</div>
                </div>
                <div class="mb-2">{email}</div>
                <div class="mb-2">{address}</div>
                <div class="mt-4">
                    <button type="submit" class="bg-blue-500 text-sm text-white rounded px-4 py-2">Submit</button>
                </div>
            </form>
        </div>
    </div>
</div>"##,
        image = html_escape(view.image_path),
        heading = html_escape(view.heading),
        root = POPUP_ROOT_ID,
        name = labelled(&id, form, Field::Name),
        mobile = labelled(&id, form, Field::MobileNo),
        email = labelled(&id, form, Field::Email),
        address = labelled(&id, form, Field::Address),
    )
}
