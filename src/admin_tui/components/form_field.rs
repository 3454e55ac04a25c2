//! Form field component for user input

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::admin_tui::{traits::FormHandler, ui::Styles};

/// Type of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    Text,
    Number,
    Password,
    Dropdown,
    TextArea,
}

/// Client-side validation failure. Never reaches the network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{message}")]
    MissingFields { message: &'static str },

    #[error("{label} must be a number")]
    InvalidNumber { key: &'static str, label: String },

    #[error("{label} must be a whole number")]
    InvalidInteger { key: &'static str, label: String },

    #[error("{label} cannot be negative")]
    Negative { key: &'static str, label: String },

    #[error("{label} must be between {min} and {max}")]
    OutOfRange {
        key: &'static str,
        label: String,
        min: i64,
        max: i64,
    },
}

impl FormError {
    /// Key of the offending field, if the error concerns a single field
    pub fn field_key(&self) -> Option<&'static str> {
        match self {
            FormError::MissingFields { .. } => None,
            FormError::InvalidNumber { key, .. }
            | FormError::InvalidInteger { key, .. }
            | FormError::Negative { key, .. }
            | FormError::OutOfRange { key, .. } => Some(*key),
        }
    }

    /// Short message shown in the field's border
    pub fn field_message(&self) -> &'static str {
        match self {
            FormError::MissingFields { .. } => "Required",
            FormError::InvalidNumber { .. } => "Not a number",
            FormError::InvalidInteger { .. } => "Not a whole number",
            FormError::Negative { .. } => "Negative",
            FormError::OutOfRange { .. } => "Out of range",
        }
    }
}

/// Dropdown entry: the value stored in the form and the label shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    /// Cursor position in characters, not bytes
    pub cursor_position: usize,
    pub dropdown_options: Vec<DropdownOption>,
    pub dropdown_state: ListState,
    pub show_dropdown: bool,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(key: &'static str, label: &str, field_type: FormFieldType) -> Self {
        Self {
            key,
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            is_focused: false,
            cursor_position: 0,
            dropdown_options: Vec::new(),
            dropdown_state: ListState::default(),
            show_dropdown: false,
            validation_error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_dropdown_options(mut self, options: Vec<DropdownOption>) -> Self {
        self.dropdown_options = options;
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
        if !focused {
            self.show_dropdown = false;
        }
    }

    /// Whether the field accepts this character as typed input
    pub fn accepts_char(&self, c: char) -> bool {
        match self.field_type {
            FormFieldType::Dropdown => false,
            FormFieldType::Number => c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'),
            _ => !c.is_control(),
        }
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.accepts_char(c) {
            return;
        }
        let index = self.byte_index();
        self.value.insert(index, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.field_type == FormFieldType::Dropdown {
            return;
        }
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index();
            self.value.remove(index);
            self.validation_error = None;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.field_type == FormFieldType::Dropdown {
            return;
        }
        if self.cursor_position < self.char_count() {
            let index = self.byte_index();
            self.value.remove(index);
            self.validation_error = None;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    /// Replace the whole value, e.g. from command line arguments
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.char_count();
        self.validation_error = None;
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
        self.show_dropdown = false;
        self.dropdown_state.select(None);
        self.validation_error = None;
    }

    /// Empty or whitespace-only values count as missing
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Text shown inside the field box
    pub fn display_value(&self) -> String {
        match self.field_type {
            FormFieldType::Password => "•".repeat(self.char_count()),
            FormFieldType::Dropdown => self
                .dropdown_options
                .iter()
                .find(|option| option.value == self.value)
                .map(|option| option.label.clone())
                .unwrap_or_else(|| self.value.clone()),
            _ => self.value.clone(),
        }
    }

    /// Open the dropdown with the current value (or the first option) highlighted
    pub fn open_dropdown(&mut self) {
        if self.field_type != FormFieldType::Dropdown || self.dropdown_options.is_empty() {
            return;
        }
        let current = self
            .dropdown_options
            .iter()
            .position(|option| option.value == self.value)
            .unwrap_or(0);
        self.dropdown_state.select(Some(current));
        self.show_dropdown = true;
    }

    pub fn close_dropdown(&mut self) {
        self.show_dropdown = false;
    }

    /// Handle dropdown navigation
    pub fn dropdown_up(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.dropdown_options.len() - 1
        } else {
            selected - 1
        };
        self.dropdown_state.select(Some(new_selected));
    }

    pub fn dropdown_down(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = (selected + 1) % self.dropdown_options.len();
        self.dropdown_state.select(Some(new_selected));
    }

    pub fn select_dropdown_value(&mut self) {
        if let Some(selected) = self.dropdown_state.selected() {
            if let Some(option) = self.dropdown_options.get(selected) {
                self.value = option.value.clone();
                self.cursor_position = self.char_count();
                self.show_dropdown = false;
                self.validation_error = None;
            }
        }
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            self.placeholder.clone()
        } else {
            self.display_value()
        };

        let border_style = if self.is_focused {
            Styles::active_border()
        } else if self.validation_error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let title = match (&self.validation_error, &self.field_type) {
            (Some(error), _) => format!("{} - {}", self.label, error),
            (None, FormFieldType::Dropdown) => format!("{} (Enter to choose)", self.label),
            (None, _) => self.label.clone(),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let text_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text).style(text_style).block(block);

        f.render_widget(paragraph, area);

        // Render cursor if focused and not a dropdown
        if self.is_focused && self.field_type != FormFieldType::Dropdown {
            let prefix: String = self
                .display_value()
                .chars()
                .take(self.cursor_position)
                .collect();
            let cursor_x = area.x + 1 + UnicodeWidthStr::width(prefix.as_str()) as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }

    /// Render dropdown if visible
    pub fn render_dropdown(&mut self, f: &mut Frame, area: Rect) {
        if !self.show_dropdown || self.dropdown_options.is_empty() {
            return;
        }

        let items: Vec<ListItem> = self
            .dropdown_options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if Some(i) == self.dropdown_state.selected() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(option.label.clone()).style(style)
            })
            .collect();

        let block = Block::default()
            .title(self.label.clone())
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        let list = List::new(items).block(block);

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut self.dropdown_state);
    }
}

/// Form container that manages multiple fields
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.key == key)
    }

    pub fn current(&self) -> Option<&FormField> {
        self.fields.get(self.current_field)
    }

    pub fn current_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    /// Current value of a field, empty if the key is unknown
    pub fn value(&self, key: &str) -> &str {
        self.field(key).map(|field| field.value.as_str()).unwrap_or("")
    }

    /// Returns false if the form has no field with this key
    pub fn set_value(&mut self, key: &str, value: &str) -> bool {
        match self.field_mut(key) {
            Some(field) => {
                field.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Snapshot of `(key, value)` pairs in form order
    pub fn values(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .map(|field| (field.key, field.value.clone()))
            .collect()
    }

    /// Clear every declared field and move focus back to the first one
    pub fn clear_all(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.current_field = 0;
        self.update_focus();
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.fields.iter().any(|field| field.show_dropdown)
    }

    /// Flag every blank field. Returns true if any field is blank.
    pub fn mark_missing(&mut self) -> bool {
        let mut missing = false;
        for field in &mut self.fields {
            if field.is_blank() {
                field.validation_error = Some("Required".to_string());
                missing = true;
            }
        }
        missing
    }

    /// Attach a field-level marker for a coercion failure
    pub fn mark_error(&mut self, error: &FormError) {
        if let Some(key) = error.field_key() {
            if let Some(field) = self.field_mut(key) {
                field.validation_error = Some(error.field_message().to_string());
            }
        }
    }

    fn label(&self, key: &'static str) -> String {
        self.field(key)
            .map(|field| field.label.clone())
            .unwrap_or_else(|| key.to_string())
    }

    /// Field value as typed
    pub fn text(&self, key: &str) -> String {
        self.value(key).to_string()
    }

    pub fn integer(&self, key: &'static str) -> Result<i64, FormError> {
        self.value(key)
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::InvalidInteger {
                key,
                label: self.label(key),
            })
    }

    pub fn integer_in_range(&self, key: &'static str, min: i64, max: i64) -> Result<i64, FormError> {
        let value = self.integer(key)?;
        if value < min || value > max {
            return Err(FormError::OutOfRange {
                key,
                label: self.label(key),
                min,
                max,
            });
        }
        Ok(value)
    }

    pub fn non_negative_integer(&self, key: &'static str) -> Result<i64, FormError> {
        let value = self.integer(key)?;
        if value < 0 {
            return Err(FormError::Negative {
                key,
                label: self.label(key),
            });
        }
        Ok(value)
    }

    pub fn number(&self, key: &'static str) -> Result<f64, FormError> {
        match self.value(key).trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(FormError::InvalidNumber {
                key,
                label: self.label(key),
            }),
        }
    }

    pub fn non_negative_number(&self, key: &'static str) -> Result<f64, FormError> {
        let value = self.number(key)?;
        if value < 0.0 {
            return Err(FormError::Negative {
                key,
                label: self.label(key),
            });
        }
        Ok(value)
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.current_mut() {
            field.insert_char(c);
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.current_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.current_mut() {
            field.delete_char_forward();
        }
    }
}
