//! Builders for chat and inline keypads.
//!
//! Pure data construction over the keypad DTOs in `rubot-core`; nothing here
//! talks to the network.

use rubot_core::{
    Button, ButtonCalendar, ButtonLocation, ButtonNumberPicker, ButtonSelection,
    ButtonStringPicker, ButtonTextbox, Keypad, KeypadRow,
};

fn base_button(text: &str, id: &str, kind: &str) -> Button {
    Button {
        id: Some(id.to_string()),
        kind: Some(kind.to_string()),
        button_text: Some(text.to_string()),
        ..Default::default()
    }
}

/// A chat keypad where every entry is a simple text button (the button id is
/// the text itself).
pub fn simple_keyboard(rows: &[&[&str]]) -> Keypad {
    Keypad {
        rows: rows
            .iter()
            .map(|row| KeypadRow {
                buttons: row.iter().map(|text| base_button(text, text, "Simple")).collect(),
            })
            .collect(),
        ..Default::default()
    }
}

/// Fluent builder for inline keypads.
///
/// ```
/// use rubot::keyboards::InlineKeyboardBuilder;
///
/// let keypad = InlineKeyboardBuilder::new()
///     .row(vec![
///         InlineKeyboardBuilder::button("Yes", "vote_yes"),
///         InlineKeyboardBuilder::button("No", "vote_no"),
///     ])
///     .row(vec![InlineKeyboardBuilder::button_link("Docs", "https://example.com")])
///     .build();
/// assert_eq!(keypad.rows.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct InlineKeyboardBuilder {
    rows: Vec<KeypadRow>,
}

impl InlineKeyboardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row of buttons.
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        self.rows.push(KeypadRow { buttons });
        self
    }

    /// A simple action button.
    pub fn button(text: &str, button_id: &str) -> Button {
        base_button(text, button_id, "Simple")
    }

    /// A link button; the URL doubles as the button id.
    pub fn button_link(text: &str, url: &str) -> Button {
        base_button(text, url, "Link")
    }

    /// A button that opens a list of selectable items.
    pub fn button_selection(text: &str, button_id: &str, selection: ButtonSelection) -> Button {
        let mut button = base_button(text, button_id, "Selection");
        button.button_selection = Some(selection);
        button
    }

    /// A date-picker button.
    pub fn button_calendar(text: &str, button_id: &str, calendar: ButtonCalendar) -> Button {
        let mut button = base_button(text, button_id, "Calendar");
        button.button_calendar = Some(calendar);
        button
    }

    /// A numeric range picker.
    pub fn button_number_picker(
        text: &str,
        button_id: &str,
        min_value: &str,
        max_value: &str,
    ) -> Button {
        let mut button = base_button(text, button_id, "NumberPicker");
        button.button_number_picker = Some(ButtonNumberPicker {
            min_value: Some(min_value.to_string()),
            max_value: Some(max_value.to_string()),
            ..Default::default()
        });
        button
    }

    /// A picker over a fixed list of strings.
    pub fn button_string_picker(text: &str, button_id: &str, items: &[&str]) -> Button {
        let mut button = base_button(text, button_id, "StringPicker");
        button.button_string_picker = Some(ButtonStringPicker {
            items: items.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        });
        button
    }

    /// A location picker/viewer button.
    pub fn button_location(text: &str, button_id: &str, location: ButtonLocation) -> Button {
        let mut button = base_button(text, button_id, "Location");
        button.button_location = Some(location);
        button
    }

    /// A text-input button.
    pub fn button_textbox(text: &str, button_id: &str, textbox: ButtonTextbox) -> Button {
        let mut button = base_button(text, button_id, "Textbox");
        button.button_textbox = Some(textbox);
        button
    }

    pub fn button_payment(text: &str, button_id: &str) -> Button {
        base_button(text, button_id, "Payment")
    }

    pub fn button_camera_image(text: &str, button_id: &str) -> Button {
        base_button(text, button_id, "CameraImage")
    }

    pub fn button_gallery_video(text: &str, button_id: &str) -> Button {
        base_button(text, button_id, "GalleryVideo")
    }

    pub fn build(self) -> Keypad {
        Keypad {
            rows: self.rows,
            ..Default::default()
        }
    }
}

/// Fluent builder for chat keypads (rows of simple text buttons).
#[derive(Debug)]
pub struct ChatKeyboardBuilder {
    rows: Vec<KeypadRow>,
    resize: bool,
    on_time: bool,
}

impl ChatKeyboardBuilder {
    /// Resizable keyboard, not one-time, no rows.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            resize: true,
            on_time: false,
        }
    }

    pub fn resize(mut self, resize: bool) -> Self {
        self.resize = resize;
        self
    }

    pub fn on_time(mut self, on_time: bool) -> Self {
        self.on_time = on_time;
        self
    }

    /// Appends a row of simple text buttons.
    pub fn row(mut self, texts: &[&str]) -> Self {
        self.rows.push(KeypadRow {
            buttons: texts
                .iter()
                .map(|text| base_button(text, text, "Simple"))
                .collect(),
        });
        self
    }

    pub fn build(self) -> Keypad {
        Keypad {
            rows: self.rows,
            resize_keyboard: self.resize,
            on_time_keyboard: self.on_time,
        }
    }
}

impl Default for ChatKeyboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_keyboard_shapes_rows() {
        let keypad = simple_keyboard(&[&["A", "B"], &["C"]]);
        assert_eq!(keypad.rows.len(), 2);
        assert_eq!(keypad.rows[0].buttons.len(), 2);
        let button = &keypad.rows[1].buttons[0];
        assert_eq!(button.id.as_deref(), Some("C"));
        assert_eq!(button.kind.as_deref(), Some("Simple"));
        assert_eq!(button.button_text.as_deref(), Some("C"));
    }

    #[test]
    fn inline_builder_attaches_sub_payloads() {
        let keypad = InlineKeyboardBuilder::new()
            .row(vec![InlineKeyboardBuilder::button_number_picker(
                "Pick", "picker", "1", "10",
            )])
            .build();
        let button = &keypad.rows[0].buttons[0];
        assert_eq!(button.kind.as_deref(), Some("NumberPicker"));
        let picker = button.button_number_picker.as_ref().unwrap();
        assert_eq!(picker.min_value.as_deref(), Some("1"));
        assert_eq!(picker.max_value.as_deref(), Some("10"));
    }

    #[test]
    fn link_button_uses_url_as_id() {
        let button = InlineKeyboardBuilder::button_link("Open", "https://example.com");
        assert_eq!(button.id.as_deref(), Some("https://example.com"));
        assert_eq!(button.kind.as_deref(), Some("Link"));
    }

    #[test]
    fn chat_builder_carries_flags() {
        let keypad = ChatKeyboardBuilder::new()
            .resize(false)
            .on_time(true)
            .row(&["One", "Two"])
            .build();
        assert!(!keypad.resize_keyboard);
        assert!(keypad.on_time_keyboard);
        assert_eq!(keypad.rows[0].buttons[1].button_text.as_deref(), Some("Two"));
    }
}
