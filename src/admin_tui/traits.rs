//! Core traits for the admin TUI architecture
//!
//! This module defines the foundational traits shared by the screens and
//! their components.

use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::api::Backend;

/// Actions that can be returned from screen event handling. Network work is
/// returned to the app instead of being run inside the key handler so the
/// app can redraw the loading state first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenAction {
    /// Validate the form and create a record
    Submit,
    /// Re-fetch the collection
    Reload,
    /// No action taken
    None,
}

/// Object-safe view of a list-and-form screen, used by the app to drive
/// whichever screen is active.
#[async_trait]
pub trait AdminScreen: Send {
    /// Draw the screen content
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Handle keyboard input and return an optional action
    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction;

    /// Whether the initial load has been issued
    fn is_mounted(&self) -> bool;

    fn is_loading(&self) -> bool;

    fn set_loading(&mut self, loading: bool);

    /// Last error message, if any
    fn error(&self) -> Option<&str>;

    /// Load once, the first time the screen is displayed
    async fn mount(&mut self, backend: &dyn Backend);

    /// Re-fetch the collection
    async fn reload(&mut self, backend: &dyn Backend);

    /// Validate and create a record
    async fn submit(&mut self, backend: &dyn Backend);
}

/// Trait for screens with navigable lists
pub trait Navigable {
    /// Move selection up
    fn navigate_up(&mut self);

    /// Move selection down
    fn navigate_down(&mut self);

    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        }
    }

    /// Navigate to last item
    fn navigate_to_last(&mut self) {
        let count = self.get_item_count();
        if count > 0 {
            self.set_selected_index(Some(count - 1));
        }
    }
}

/// Trait for form handling
pub trait FormHandler {
    /// Get current field index
    fn get_current_field(&self) -> usize;

    /// Set current field
    fn set_current_field(&mut self, field: usize);

    /// Get total number of fields
    fn get_field_count(&self) -> usize;

    /// Move to next field
    fn next_field(&mut self) {
        let total = self.get_field_count();
        if total == 0 {
            return;
        }
        let current = self.get_current_field();
        self.set_current_field((current + 1) % total);
    }

    /// Move to previous field
    fn previous_field(&mut self) {
        let total = self.get_field_count();
        if total == 0 {
            return;
        }
        let current = self.get_current_field();
        self.set_current_field(if current == 0 { total - 1 } else { current - 1 });
    }

    /// Handle character input for current field
    fn handle_char_input(&mut self, c: char);

    /// Handle backspace for current field
    fn handle_backspace(&mut self);

    /// Handle delete for current field
    fn handle_delete(&mut self);
}
