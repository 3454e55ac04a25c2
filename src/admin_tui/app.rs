//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use super::screens::{OrdersScreen, ProductsScreen, ReviewsScreen, UsersScreen};
use super::traits::{AdminScreen, ScreenAction};
use super::ui::{centered_rect, Styles};
use crate::api::Backend;
use crate::models::ResourceKind;

/// Main TUI application state
pub struct App<C: Backend> {
    /// Current active screen
    pub current_screen: ResourceKind,
    /// Backend shared by every screen
    pub backend: C,
    /// Shown in the status bar
    pub base_url: String,

    // Screen states
    pub orders: OrdersScreen,
    pub products: ProductsScreen,
    pub reviews: ReviewsScreen,
    pub users: UsersScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
}

impl<C: Backend> App<C> {
    /// Create a new TUI application
    pub fn new(backend: C, base_url: &str) -> Self {
        Self {
            current_screen: ResourceKind::Orders,
            backend,
            base_url: base_url.to_string(),

            orders: OrdersScreen::new(),
            products: ProductsScreen::new(),
            reviews: ReviewsScreen::new(),
            users: UsersScreen::new(),

            should_quit: false,
            show_help_popup: false,
        }
    }

    pub fn with_screen(mut self, screen: ResourceKind) -> Self {
        self.current_screen = screen;
        self
    }

    /// Run the main application loop
    pub async fn run<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting on the {} screen", self.current_screen);

        loop {
            // First display of a screen triggers its initial load
            if !self.active_screen().is_mounted() {
                self.active_screen_mut().set_loading(true);
                terminal.draw(|f| self.draw(f))?;
                self.mount_active().await;
            }

            // Draw the UI
            terminal.draw(|f| self.draw(f))?;

            // Handle events
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = self.handle_key_event(key);
                    if action != ScreenAction::None {
                        self.active_screen_mut().set_loading(true);
                        terminal.draw(|f| self.draw(f))?;
                        self.perform(action).await;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn active_screen(&self) -> &dyn AdminScreen {
        match self.current_screen {
            ResourceKind::Orders => &self.orders,
            ResourceKind::Products => &self.products,
            ResourceKind::Reviews => &self.reviews,
            ResourceKind::Users => &self.users,
        }
    }

    pub fn active_screen_mut(&mut self) -> &mut dyn AdminScreen {
        self.split_active().0
    }

    fn split_active(&mut self) -> (&mut dyn AdminScreen, &dyn Backend) {
        let screen: &mut dyn AdminScreen = match self.current_screen {
            ResourceKind::Orders => &mut self.orders,
            ResourceKind::Products => &mut self.products,
            ResourceKind::Reviews => &mut self.reviews,
            ResourceKind::Users => &mut self.users,
        };
        (screen, &self.backend)
    }

    /// Issue the initial load of the active screen if it has not happened yet
    pub async fn mount_active(&mut self) {
        let (screen, backend) = self.split_active();
        screen.mount(backend).await;
    }

    /// Run the network work requested by a screen
    pub async fn perform(&mut self, action: ScreenAction) {
        let (screen, backend) = self.split_active();
        match action {
            ScreenAction::Submit => screen.submit(backend).await,
            ScreenAction::Reload => screen.reload(backend).await,
            ScreenAction::None => {}
        }
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global shortcuts
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return ScreenAction::None;
            }
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return ScreenAction::None;
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return ScreenAction::None;
            }
            _ => {}
        }

        if self.show_help_popup {
            return ScreenAction::None;
        }

        match key.code {
            KeyCode::F(n @ 2..=5) => {
                self.navigate_to_screen(ResourceKind::ALL[(n - 2) as usize]);
                ScreenAction::None
            }
            KeyCode::Right if ctrl => {
                self.navigate_to_screen(self.current_screen.next());
                ScreenAction::None
            }
            KeyCode::Left if ctrl => {
                self.navigate_to_screen(self.current_screen.previous());
                ScreenAction::None
            }
            _ => self.active_screen_mut().handle_key_event(key),
        }
    }

    /// Navigate to a specific screen
    pub fn navigate_to_screen(&mut self, screen: ResourceKind) {
        if self.current_screen != screen {
            debug!("Switching to {} screen", screen);
            self.current_screen = screen;
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_tabs(f, chunks[0]);

        let content = chunks[1];
        self.active_screen_mut().draw(f, content);

        self.draw_status_bar(f, chunks[2]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn draw_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ResourceKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| Line::from(format!("F{} {}", i + 2, kind.tab_label())))
            .collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("shopadmin"))
            .select(self.current_screen.index())
            .style(Styles::inactive())
            .highlight_style(Styles::selected());

        f.render_widget(tabs, area);
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let screen = self.active_screen();

        let status_text = if screen.is_loading() {
            "⟳ Waiting for backend...".to_string()
        } else if let Some(err) = screen.error() {
            format!("Error: {}", err)
        } else {
            format!(
                "{} | Backend: {} | F1: Help | Ctrl-Q: Quit",
                self.current_screen.title(),
                self.base_url
            )
        };

        let style = if screen.is_loading() {
            Styles::warning()
        } else if screen.error().is_some() {
            Styles::error()
        } else {
            Styles::inactive()
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border())
                    .title_style(Styles::title()),
            )
            .style(Styles::default())
            .wrap(Wrap { trim: false });

        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            F2-F5 / Ctrl+←/→ - Switch screen\n\
            F1 - Toggle this help\n\
            Esc - Close popup\n\
            Ctrl+Q / Ctrl+C - Quit\n\n";

        let form_help = "Form:\n\
            Tab / Shift+Tab - Next / previous field\n\
            Space - Open option list\n\
            Enter - Submit (or choose an option)\n\
            Ctrl+R - Reset form\n\
            Ctrl+L - Reload list\n\
            ↑/↓, PgUp/PgDn - Scroll list\n\n";

        let screen_help = match self.current_screen {
            ResourceKind::Orders => "Orders: status colors are yellow (pending), blue (shipped), green (delivered).",
            ResourceKind::Products => "Products: price and stock must not be negative; stock is a whole number.",
            ResourceKind::Reviews => "Reviews: choose a rating from 1 to 5 stars.",
            ResourceKind::Users => "Users: the password is sent once and never displayed.",
        };

        format!("{}{}{}", global_help, form_help, screen_help)
    }
}
