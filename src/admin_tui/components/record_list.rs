//! Scrollable list of fetched records

use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::admin_tui::{traits::Navigable, ui::Styles};

/// Records of one screen in server order, plus the selection used for scrolling
#[derive(Debug)]
pub struct RecordList<T> {
    items: Vec<T>,
    pub state: ListState,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: ListState::default(),
        }
    }
}

impl<T> RecordList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the items wholesale and keep the selection if still valid
    pub fn set_items(&mut self, items: Vec<T>) {
        let selected = self.state.selected();
        self.items = items;

        if let Some(idx) = selected {
            if idx < self.items.len() {
                self.state.select(Some(idx));
            } else if !self.items.is_empty() {
                self.state.select(Some(self.items.len() - 1));
            } else {
                self.state.select(None);
            }
        }
    }

    /// Render the records, or the empty message when there are none
    pub fn render<F>(&mut self, f: &mut Frame, area: Rect, title: &str, empty_message: &str, item_formatter: F)
    where
        F: Fn(&T) -> ListItem<'static>,
    {
        let block = Block::default()
            .title(format!("{} ({})", title, self.len()))
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        if self.items.is_empty() {
            let paragraph = Paragraph::new(empty_message.to_string())
                .style(Styles::inactive())
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self.items.iter().map(|item| item_formatter(item)).collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol("▶ ")
            .highlight_style(Styles::bold());

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

impl<T> Navigable for RecordList<T> {
    fn navigate_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        self.state.select(Some(selected.saturating_sub(1)));
    }

    fn navigate_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let new_selected = match self.state.selected() {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        };
        self.state.select(Some(new_selected));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_items_clamps_selection() {
        let mut list = RecordList::new();
        list.set_items(vec![1, 2, 3]);
        assert_eq!(list.get_selected_index(), None);

        list.navigate_to_last();
        assert_eq!(list.get_selected_index(), Some(2));

        list.set_items(vec![1]);
        assert_eq!(list.get_selected_index(), Some(0));

        list.set_items(Vec::new());
        assert_eq!(list.get_selected_index(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_navigation_stops_at_edges() {
        let mut list = RecordList::new();
        list.set_items(vec!["a", "b"]);
        list.navigate_down();
        list.navigate_down();
        list.navigate_down();
        assert_eq!(list.get_selected_index(), Some(1));
        list.navigate_up();
        list.navigate_up();
        assert_eq!(list.get_selected_index(), Some(0));
        assert_eq!(list.items(), &["a", "b"]);
    }
}
