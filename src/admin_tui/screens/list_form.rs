//! Generic list-and-form screen
//!
//! Mount loads the collection once; submit validates the form, creates a
//! record, clears the form and loads again. The in-memory list is only ever
//! replaced by a successful load.

use std::marker::PhantomData;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, warn};

use super::resource::Resource;
use crate::admin_tui::{
    components::{Form, FormError, FormFieldType, RecordList},
    traits::{AdminScreen, FormHandler, Navigable, ScreenAction},
    ui::Styles,
};
use crate::api::{ApiError, Backend};

/// Result of [`ListFormScreen::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent
    Rejected,
    /// The create request failed; the form is untouched
    Failed,
    /// The record was created and the list reloaded
    Created,
}

/// Screen state for one resource
pub struct ListFormScreen<R: Resource> {
    pub form: Form,
    pub records: RecordList<R::Record>,
    pub error: Option<String>,
    pub is_loading: bool,
    mounted: bool,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Default for ListFormScreen<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ListFormScreen<R> {
    pub fn new() -> Self {
        Self {
            form: Form::new(R::fields()),
            records: RecordList::new(),
            error: None,
            is_loading: false,
            mounted: false,
            _resource: PhantomData,
        }
    }

    pub fn records(&self) -> &[R::Record] {
        self.records.items()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Load the collection the first time the screen is displayed
    pub async fn mount<B: Backend + ?Sized>(&mut self, backend: &B) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.load(backend).await;
    }

    /// Fetch the collection and replace the list. On failure the previous
    /// list stays in place. Returns true on success.
    pub async fn load<B: Backend + ?Sized>(&mut self, backend: &B) -> bool {
        let path = R::KIND.collection_path();
        debug!("Loading {} from {}", R::KIND, path);
        self.is_loading = true;

        let result = match backend.get_json(path).await {
            Ok(body) => serde_json::from_value::<Vec<R::Record>>(body).map_err(|e| {
                warn!("Unexpected {} payload: {}", R::KIND, e);
                R::LOAD_FAILED_MESSAGE.to_string()
            }),
            Err(e) => {
                warn!("Failed to load {}: {}", R::KIND, e);
                Err(R::failure_message(&e, R::LOAD_FAILED_MESSAGE))
            }
        };

        self.is_loading = false;
        match result {
            Ok(records) => {
                info!("Loaded {} {}", records.len(), R::KIND);
                self.records.set_items(records);
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    /// Validate, create, clear the form and reload.
    pub async fn submit<B: Backend + ?Sized>(&mut self, backend: &B) -> SubmitOutcome {
        if self.form.mark_missing() {
            self.reject(FormError::MissingFields {
                message: R::MISSING_FIELDS_MESSAGE,
            });
            return SubmitOutcome::Rejected;
        }

        let body = {
            let payload = match R::build_payload(&self.form) {
                Ok(payload) => payload,
                Err(e) => {
                    self.reject(e);
                    return SubmitOutcome::Rejected;
                }
            };

            match serde_json::to_value(&payload).map_err(ApiError::Encode) {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to encode {} payload: {}", R::KIND, e);
                    self.error = Some(R::failure_message(&e, R::CREATE_FAILED_MESSAGE));
                    return SubmitOutcome::Failed;
                }
            }
        };

        let path = R::KIND.creation_path();
        debug!("Creating {} via {}", R::KIND, path);
        self.is_loading = true;
        let result = backend.post_json(path, &body).await;
        self.is_loading = false;

        if let Err(e) = result {
            warn!("Failed to create {}: {}", R::KIND, e);
            self.error = Some(R::failure_message(&e, R::CREATE_FAILED_MESSAGE));
            return SubmitOutcome::Failed;
        }

        info!("Created a new record in {}", R::KIND);
        self.form.clear_all();
        self.error = None;
        self.load(backend).await;
        SubmitOutcome::Created
    }

    /// Clear every declared field. The list and the error are kept.
    pub fn reset_form(&mut self) {
        self.form.clear_all();
    }

    fn reject(&mut self, error: FormError) {
        debug!("Rejected {} form: {}", R::KIND, error);
        self.is_loading = false;
        self.form.mark_error(&error);
        self.error = Some(error.to_string());
    }

    /// Handle key events for the screen
    pub fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        if self.form.is_dropdown_open() {
            self.handle_dropdown_event(key);
            return ScreenAction::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('r') if ctrl => self.reset_form(),
            KeyCode::Char('l') if ctrl => return ScreenAction::Reload,
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.previous_field(),
            KeyCode::Enter => {
                if let Some(field) = self.form.current_mut() {
                    if field.field_type == FormFieldType::Dropdown && field.value.is_empty() {
                        field.open_dropdown();
                        return ScreenAction::None;
                    }
                }
                return ScreenAction::Submit;
            }
            KeyCode::Char(' ') if self.current_is_dropdown() => {
                if let Some(field) = self.form.current_mut() {
                    field.open_dropdown();
                }
            }
            KeyCode::Char(c) if !ctrl => self.form.handle_char_input(c),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Left => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_right();
                }
            }
            KeyCode::Home => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_to_start();
                }
            }
            KeyCode::End => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_to_end();
                }
            }
            KeyCode::Up => self.records.navigate_up(),
            KeyCode::Down => self.records.navigate_down(),
            KeyCode::PageUp => self.records.navigate_to_first(),
            KeyCode::PageDown => self.records.navigate_to_last(),
            _ => {}
        }
        ScreenAction::None
    }

    fn current_is_dropdown(&self) -> bool {
        self.form
            .current()
            .map(|field| field.field_type == FormFieldType::Dropdown)
            .unwrap_or(false)
    }

    fn handle_dropdown_event(&mut self, key: KeyEvent) {
        let Some(field) = self.form.current_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up => field.dropdown_up(),
            KeyCode::Down => field.dropdown_down(),
            KeyCode::Enter | KeyCode::Char(' ') => field.select_dropdown_value(),
            KeyCode::Esc => field.close_dropdown(),
            KeyCode::Tab => {
                field.select_dropdown_value();
                self.form.next_field();
            }
            _ => {}
        }
    }

    /// Draw the form, the message line and the record list
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(R::KIND.title())
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border())
            .title_style(Styles::title());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let field_rows = (self.form.fields.len() as u16 + 1) / 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(field_rows * 3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
            ])
            .split(inner);

        let heading = Paragraph::new(R::KIND.form_title()).style(Styles::heading());
        f.render_widget(heading, chunks[0]);

        let field_areas = field_rects(chunks[1], self.form.fields.len());
        for (field, rect) in self.form.fields.iter().zip(field_areas.iter()) {
            field.render(f, *rect);
        }

        f.render_widget(Paragraph::new(self.message_line()), chunks[2]);

        let hint = Paragraph::new(
            "Enter: submit · Space: choose option · Ctrl-R: reset form · Ctrl-L: reload · ↑/↓: scroll",
        )
        .style(Styles::inactive());
        f.render_widget(hint, chunks[3]);

        self.records.render(
            f,
            chunks[4],
            R::KIND.list_title(),
            R::KIND.empty_message(),
            R::record_item,
        );

        // Dropdown popup goes last so it overlays the list
        let current = self.form.current_field;
        if let (Some(field), Some(rect)) = (self.form.fields.get_mut(current), field_areas.get(current)) {
            if field.show_dropdown {
                let y = rect.y + rect.height;
                let height = (field.dropdown_options.len() as u16 + 2).min(area.bottom().saturating_sub(y));
                let popup = Rect::new(rect.x, y, rect.width, height);
                field.render_dropdown(f, popup);
            }
        }
    }

    fn message_line(&self) -> Line<'static> {
        if self.is_loading {
            Line::from(Span::styled("⟳ Loading...", Styles::warning()))
        } else if let Some(error) = &self.error {
            Line::from(Span::styled(format!("✗ {}", error), Styles::error()))
        } else {
            Line::from("")
        }
    }
}

/// Lay fields out two per row
fn field_rects(area: Rect, count: usize) -> Vec<Rect> {
    let rows = (count + 1) / 2;
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); rows])
        .split(area);

    let mut rects = Vec::with_capacity(count);
    for row in row_areas.iter() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for column in columns.iter() {
            if rects.len() < count {
                rects.push(*column);
            }
        }
    }
    rects
}

#[async_trait]
impl<R: Resource> AdminScreen for ListFormScreen<R> {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        ListFormScreen::draw(self, f, area)
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        ListFormScreen::handle_key_event(self, key)
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    async fn mount(&mut self, backend: &dyn Backend) {
        ListFormScreen::mount(self, backend).await
    }

    async fn reload(&mut self, backend: &dyn Backend) {
        self.load(backend).await;
    }

    async fn submit(&mut self, backend: &dyn Backend) {
        ListFormScreen::submit(self, backend).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin_tui::screens::{Orders, Products, Reviews, Users};
    use crate::api::testing::{closed_port_url, status_error, Call, ScriptedBackend};
    use crate::api::ApiClient;
    use crate::models::ResourceKind;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text<R: Resource>(screen: &mut ListFormScreen<R>, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    async fn empty_field_never_hits_network<R: Resource>(filled: &[(&str, &str)]) {
        let backend = ScriptedBackend::new().on_post_ok();
        let mut screen = ListFormScreen::<R>::new();
        for (field, value) in filled {
            assert!(screen.form.set_value(field, value), "unknown field {}", field);
        }

        let outcome = screen.submit(&backend).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(backend.calls().is_empty());
        assert_eq!(screen.error(), Some(R::MISSING_FIELDS_MESSAGE));
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected_without_network() {
        empty_field_never_hits_network::<Orders>(&[("user_id", "3"), ("total_amount", "25.5")]).await;
        empty_field_never_hits_network::<Products>(&[("name", "Lamp"), ("price", "10"), ("stock", "2")]).await;
        empty_field_never_hits_network::<Reviews>(&[("user_id", "1"), ("product_id", "2"), ("rating", "5")]).await;
        empty_field_never_hits_network::<Users>(&[("name", "alice"), ("email", "a@example.com")]).await;
    }

    #[tokio::test]
    async fn test_whitespace_only_counts_as_missing() {
        empty_field_never_hits_network::<Users>(&[
            ("name", "   "),
            ("email", "a@example.com"),
            ("password", "pw"),
        ])
        .await;
    }

    async fn successful_create_reloads_once<R: Resource>(filled: &[(&str, &str)]) {
        let backend = ScriptedBackend::new().on_post_ok().on_get(json!([]));
        let mut screen = ListFormScreen::<R>::new();
        screen.error = Some("stale".to_string());
        for (field, value) in filled {
            assert!(screen.form.set_value(field, value), "unknown field {}", field);
        }

        let outcome = screen.submit(&backend).await;

        assert_eq!(outcome, SubmitOutcome::Created);
        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], Call::Post(path, _) if path == R::KIND.creation_path()));
        assert_eq!(calls[1], Call::Get(R::KIND.collection_path().to_string()));
        assert!(screen.form.values().iter().all(|(_, value)| value.is_empty()));
        assert_eq!(screen.error(), None);
    }

    #[tokio::test]
    async fn test_successful_create_resets_form_and_reloads_once() {
        successful_create_reloads_once::<Orders>(&[("user_id", "3"), ("total_amount", "25.5"), ("status", "pending")]).await;
        successful_create_reloads_once::<Products>(&[
            ("name", "Lamp"),
            ("description", "Desk lamp"),
            ("price", "19.99"),
            ("stock", "4"),
        ])
        .await;
        successful_create_reloads_once::<Reviews>(&[
            ("user_id", "1"),
            ("product_id", "2"),
            ("rating", "4"),
            ("review_text", "Solid"),
        ])
        .await;
        successful_create_reloads_once::<Users>(&[("name", "alice"), ("email", "a@example.com"), ("password", "pw")]).await;
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let backend = ScriptedBackend::new()
            .on_get(json!([{ "user_id": 1, "username": "alice", "email": "a@example.com" }]))
            .on_get_error(status_error(500));
        let mut screen = ListFormScreen::<Users>::new();

        assert!(screen.load(&backend).await);
        assert_eq!(screen.records().len(), 1);

        assert!(!screen.load(&backend).await);
        assert_eq!(screen.records().len(), 1);
        assert_eq!(screen.records()[0].username, "alice");
        assert_eq!(screen.error(), Some("Failed to fetch users"));
        assert!(!screen.is_loading);
    }

    #[tokio::test]
    async fn test_undecodable_list_counts_as_failed_load() {
        let backend = ScriptedBackend::new().on_get(json!({ "unexpected": true }));
        let mut screen = ListFormScreen::<Products>::new();

        assert!(!screen.load(&backend).await);
        assert!(screen.records().is_empty());
        assert_eq!(screen.error(), Some("Failed to load products"));
    }

    #[tokio::test]
    async fn test_numeric_strings_and_integral_floats_load() {
        let backend = ScriptedBackend::new().on_get(json!([
            { "product_id": 1, "product_name": "Lamp", "price": 19.99, "stock": 12.0 },
            { "product_id": 2, "product_name": "Desk", "price": "19.99", "stock": "12" }
        ]));
        let mut screen = ListFormScreen::<Products>::new();

        assert!(screen.load(&backend).await);
        assert_eq!(screen.records().len(), 2);
        assert!(screen.records().iter().all(|product| product.stock == 12));
        assert_eq!(screen.error(), None);
    }

    #[tokio::test]
    async fn test_unreachable_backend_keeps_list_and_reports_failure() {
        let client = ApiClient::with_client(
            reqwest::Client::builder().no_proxy().build().unwrap(),
            &closed_port_url().await,
        );
        let mut screen = ListFormScreen::<Reviews>::new();
        screen.records.set_items(vec![crate::models::Review {
            review_id: 1,
            user_id: 7,
            product_id: 12,
            rating: 5,
            review_text: "Great".to_string(),
            created_at: None,
        }]);

        assert!(!screen.load(&client).await);
        assert_eq!(screen.records().len(), 1);
        assert_eq!(screen.error(), Some("Failed to fetch reviews"));
        assert!(!screen.is_loading);
    }

    /// Payload that serde_json cannot turn into a JSON value
    struct Unencodable;

    impl Resource for Unencodable {
        type Record = crate::models::User;
        type Payload = std::collections::BTreeMap<(i32, i32), i32>;

        const KIND: ResourceKind = ResourceKind::Users;
        const MISSING_FIELDS_MESSAGE: &'static str = "All fields are required";
        const LOAD_FAILED_MESSAGE: &'static str = "Failed to fetch users";
        const CREATE_FAILED_MESSAGE: &'static str = "Failed to create user";
        const COLUMNS: &'static [&'static str] = &[];

        fn fields() -> Vec<crate::admin_tui::components::FormField> {
            Users::fields()
        }

        fn build_payload(_form: &Form) -> Result<Self::Payload, FormError> {
            Ok([((1, 2), 3)].into_iter().collect())
        }

        fn record_item(record: &Self::Record) -> ratatui::widgets::ListItem<'static> {
            Users::record_item(record)
        }

        fn table_row(record: &Self::Record) -> Vec<String> {
            Users::table_row(record)
        }
    }

    #[tokio::test]
    async fn test_unencodable_payload_fails_without_network() {
        let backend = ScriptedBackend::new().on_post_ok();
        let mut screen = ListFormScreen::<Unencodable>::new();
        screen.form.set_value("name", "alice");
        screen.form.set_value("email", "a@example.com");
        screen.form.set_value("password", "pw");

        assert_eq!(screen.submit(&backend).await, SubmitOutcome::Failed);
        assert!(backend.calls().is_empty());
        assert_eq!(screen.error(), Some("Failed to create user"));
        assert_eq!(screen.form.value("name"), "alice");
        assert!(!screen.is_loading);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_form_values() {
        let backend = ScriptedBackend::new().on_post_error(status_error(500));
        let mut screen = ListFormScreen::<Products>::new();
        screen.form.set_value("name", "Lamp");
        screen.form.set_value("description", "Desk lamp");
        screen.form.set_value("price", "19.99");
        screen.form.set_value("stock", "4");
        let before = screen.form.values();

        let outcome = screen.submit(&backend).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(screen.form.values(), before);
        assert_eq!(screen.error(), Some("Failed to create product"));
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_reviews_surface_server_message() {
        let backend = ScriptedBackend::new()
            .on_get_error(crate::api::ApiError::Status {
                status: 503,
                message: Some("Database unavailable".to_string()),
            })
            .on_post_error(crate::api::ApiError::Status {
                status: 400,
                message: Some("Product does not exist".to_string()),
            })
            .on_post_error(status_error(500));
        let mut screen = ListFormScreen::<Reviews>::new();

        screen.mount(&backend).await;
        assert_eq!(screen.error(), Some("Database unavailable"));

        screen.form.set_value("user_id", "1");
        screen.form.set_value("product_id", "99");
        screen.form.set_value("rating", "5");
        screen.form.set_value("review_text", "Great");
        screen.submit(&backend).await;
        assert_eq!(screen.error(), Some("Product does not exist"));

        screen.submit(&backend).await;
        assert_eq!(screen.error(), Some("Error creating review"));
    }

    #[tokio::test]
    async fn test_other_screens_ignore_server_message() {
        let backend = ScriptedBackend::new().on_post_error(crate::api::ApiError::Status {
            status: 400,
            message: Some("duplicate email".to_string()),
        });
        let mut screen = ListFormScreen::<Users>::new();
        screen.form.set_value("name", "alice");
        screen.form.set_value("email", "a@example.com");
        screen.form.set_value("password", "pw");

        screen.submit(&backend).await;
        assert_eq!(screen.error(), Some("Failed to create user"));
    }

    #[tokio::test]
    async fn test_mount_loads_only_once() {
        let backend = ScriptedBackend::new().on_get(json!([])).on_get(json!([]));
        let mut screen = ListFormScreen::<Orders>::new();

        screen.mount(&backend).await;
        screen.mount(&backend).await;

        assert!(screen.is_mounted());
        assert_eq!(backend.calls(), vec![Call::Get("/orders".to_string())]);
    }

    #[tokio::test]
    async fn test_uncoercible_number_is_rejected_client_side() {
        let backend = ScriptedBackend::new();
        let mut screen = ListFormScreen::<Orders>::new();
        screen.form.set_value("user_id", "3.5");
        screen.form.set_value("total_amount", "25.5");
        screen.form.set_value("status", "pending");

        let outcome = screen.submit(&backend).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(backend.calls().is_empty());
        assert_eq!(screen.error(), Some("User ID must be a whole number"));
        assert_eq!(
            screen.form.field("user_id").unwrap().validation_error.as_deref(),
            Some("Not a whole number")
        );
    }

    #[test]
    fn test_reset_form_keeps_list_and_error() {
        let mut screen = ListFormScreen::<Users>::new();
        screen.form.set_value("name", "alice");
        screen.form.set_value("email", "a@example.com");
        screen.form.set_value("password", "pw");
        screen.error = Some("Failed to fetch users".to_string());

        screen.handle_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));

        assert!(screen.form.values().iter().all(|(_, value)| value.is_empty()));
        assert_eq!(screen.error(), Some("Failed to fetch users"));
    }

    #[test]
    fn test_keyboard_entry_fills_fields() {
        let mut screen = ListFormScreen::<Orders>::new();
        type_text(&mut screen, "3");
        screen.handle_key_event(key(KeyCode::Tab));
        type_text(&mut screen, "25.5");
        screen.handle_key_event(key(KeyCode::Tab));

        // Enter on an empty dropdown opens it instead of submitting
        assert_eq!(screen.handle_key_event(key(KeyCode::Enter)), ScreenAction::None);
        assert!(screen.form.is_dropdown_open());
        screen.handle_key_event(key(KeyCode::Enter));
        assert!(!screen.form.is_dropdown_open());

        assert_eq!(screen.form.value("user_id"), "3");
        assert_eq!(screen.form.value("total_amount"), "25.5");
        assert_eq!(screen.form.value("status"), "pending");
        assert_eq!(screen.handle_key_event(key(KeyCode::Enter)), ScreenAction::Submit);
    }

    #[test]
    fn test_ctrl_l_requests_reload() {
        let mut screen = ListFormScreen::<Products>::new();
        let action = screen.handle_key_event(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(action, ScreenAction::Reload);
        assert_eq!(screen.form.value("name"), "");
    }
}
