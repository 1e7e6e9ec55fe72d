use std::time::Duration;

use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use super::{events::AppEvent, render};
use crate::{
    client::CatalogApi,
    ui::{current_year, CatalogController, FormField, Modal},
};

/// Main application struct
pub struct App<C> {
    pub(super) controller: CatalogController<C>,
    /// Row selected in the filtered table
    pub(super) selected: usize,
    /// Whether keystrokes go to the search bar
    pub(super) searching: bool,
    pub(super) search_input: Input,
    /// Field being edited in the form modal
    pub(super) focused: FormField,
    pub(super) field_input: Input,
    should_quit: bool,
}

impl<C: CatalogApi> App<C> {
    pub fn new(client: C) -> Self {
        Self {
            controller: CatalogController::new(client),
            selected: 0,
            searching: false,
            search_input: Input::default(),
            focused: FormField::Title,
            field_input: Input::default(),
            should_quit: false,
        }
    }

    /// Run the application
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();

        // crossterm reads block, keep them off the runtime threads
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(_) => break,
                }
                let app_event = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(Event::Resize(..)) => AppEvent::Resize,
                    Ok(_) => continue,
                    Err(_) => break,
                };
                if event_tx.send(app_event).is_err() {
                    break;
                }
            }
        });

        self.controller.reload().await;

        let result = self.main_loop(&mut terminal, &mut event_rx).await;

        ratatui::restore();
        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        event_rx: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
    ) -> std::io::Result<()> {
        loop {
            terminal.draw(|frame| render::render(frame, self))?;

            match event_rx.recv().await {
                Some(AppEvent::Key(key)) => self.handle_key(key).await,
                Some(AppEvent::Resize) => {}
                None => break,
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub(super) fn selected_id(&self) -> Option<i64> {
        self.controller
            .state()
            .filtered_books()
            .get(self.selected)
            .map(|b| b.b_id)
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.state().filtered_books().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Notices last until the next key press
        self.controller.state_mut().clear_notice();

        match self.controller.state().modal() {
            Modal::Browsing if self.searching => self.handle_search_key(key),
            Modal::Browsing => self.handle_browse_key(key).await,
            Modal::FormOpen(_) => self.handle_form_key(key).await,
            Modal::DeleteConfirm(_) => self.handle_confirm_key(key).await,
        }
        self.clamp_selection();
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.searching = false,
            _ => {
                self.search_input.handle_event(&Event::Key(key));
                let search = self.search_input.value().to_string();
                self.controller.state_mut().set_search(search);
                self.selected = 0;
            }
        }
    }

    async fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Char('r') => {
                self.controller.reload().await;
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = self.selected.saturating_add(1),
            KeyCode::Char('a') => {
                if self.controller.state_mut().open_create() {
                    self.focus(FormField::Title);
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    if self.controller.state_mut().open_edit(id) {
                        self.focus(FormField::Title);
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.controller.state_mut().request_delete(id);
                }
            }
            _ => {}
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.controller.state_mut().cancel(),
            KeyCode::Tab | KeyCode::Down => {
                self.commit_field();
                self.focus(self.focused.next());
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.commit_field();
                self.focus(self.focused.prev());
            }
            KeyCode::Enter => {
                self.commit_field();
                self.controller.submit(current_year()).await;
            }
            _ => {
                self.field_input.handle_event(&Event::Key(key));
            }
        }
    }

    async fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.controller.confirm_delete().await;
            }
            KeyCode::Char('n') | KeyCode::Esc => self.controller.state_mut().cancel(),
            _ => {}
        }
    }

    /// Move editing to `field`, loading its current value
    fn focus(&mut self, field: FormField) {
        self.focused = field;
        let value = self.controller.state().form().get(field).to_string();
        self.field_input = Input::new(value);
    }

    /// Write the edited value back into the form
    fn commit_field(&mut self) {
        let value = self.field_input.value().to_string();
        self.controller.state_mut().form_mut().set(self.focused, value);
    }
}
