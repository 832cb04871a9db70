//! Main application state and event loop

use super::ui;
use super::worker::{spawn_worker, PageResponse};
use anyhow::Result;
use arboard::Clipboard;
use crossterm::{
    cursor::SetCursorStyle,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pixgal_api::{ImageSearch, PixabayClient};
use pixgal_gallery::{Controller, Level, Notification, Notifier, Outcome, PageRequest};
use ratatui::{backend::CrosstermBackend, widgets::ListState, Terminal};
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

/// Single-line text input with a byte-offset cursor
#[derive(Debug, Default, Clone)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor
    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Delete the character at the cursor
    pub fn delete_char_at(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.cursor);
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns false for keys it doesn't handle.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.clear(),
            (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => self.move_start(),
            (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => self.move_end(),
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => self.insert_char(c),
            (KeyCode::Backspace, _) => self.delete_char_before(),
            (KeyCode::Delete, _) => self.delete_char_at(),
            (KeyCode::Left, _) => self.move_left(),
            (KeyCode::Right, _) => self.move_right(),
            _ => return false,
        }
        true
    }
}

/// Toast notification state
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: Level,
    pub title: String,
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(notification: Notification) -> Self {
        let duration = match notification.level {
            Level::Success => Duration::from_secs(2),
            Level::Info => Duration::from_secs(3),
            Level::Error => Duration::from_secs(5),
        };
        Self {
            level: notification.level,
            title: notification.title,
            message: notification.message,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Notifications waiting to be shown as toasts, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: VecDeque<Notification>,
}

impl ToastQueue {
    pub fn pop(&mut self) -> Option<Notification> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        self.pending.push_back(notification);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Gallery,
}

/// Application state
pub struct App<C> {
    pub input: TextInput,
    pub controller: Controller<C, ToastQueue>,
    /// Selection + scroll over the gallery cards
    pub list_state: ListState,
    pub focus: Focus,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    /// Duration of the last completed fetch
    pub last_fetch: Option<Duration>,
    /// When the current fetch started, for the spinner
    pub loading_since: Option<Instant>,
    /// Last time the lightbox switched cards, for the caption delay
    pub lightbox_changed_at: Instant,
    request_tx: Sender<PageRequest>,
    response_rx: Receiver<PageResponse>,
    clipboard: Option<Clipboard>,
}

impl<C: ImageSearch> App<C> {
    pub fn new(
        controller: Controller<C, ToastQueue>,
        request_tx: Sender<PageRequest>,
        response_rx: Receiver<PageResponse>,
    ) -> Self {
        Self {
            input: TextInput::new(),
            controller,
            list_state: ListState::default(),
            focus: Focus::Search,
            toast: None,
            should_quit: false,
            last_fetch: None,
            loading_since: None,
            lightbox_changed_at: Instant::now(),
            request_tx,
            response_rx,
            clipboard: None,
        }
    }

    fn send(&mut self, request: PageRequest) {
        self.loading_since = Some(Instant::now());
        if self.request_tx.send(request).is_err() {
            self.controller.notifier_mut().error("Search worker stopped");
        }
    }

    /// Submit the text in the search box
    pub fn submit(&mut self) {
        let text = self.input.text.clone();
        self.list_state.select(None);
        match self.controller.begin_submit(&text) {
            Some(request) => {
                self.send(request);
                self.focus = Focus::Gallery;
            }
            None => self.loading_since = None,
        }
    }

    /// Load the next page if the selection is within the sentinel's margin
    pub fn check_sentinel(&mut self) {
        let len = self.controller.gallery().len();
        if len == 0 {
            return;
        }
        let selected = self.selected_index();
        let remaining = (len - 1).saturating_sub(selected) as u32;

        if self.controller.sentinel().intersects(remaining) {
            if let Some(request) = self.controller.begin_next_page() {
                self.send(request);
            }
        }
    }

    /// Apply responses from the worker (non-blocking)
    pub fn poll_responses(&mut self) {
        while let Ok(response) = self.response_rx.try_recv() {
            let outcome = self
                .controller
                .complete(&response.request, response.result);
            if outcome == Outcome::Stale {
                continue;
            }

            self.loading_since = None;
            self.last_fetch = Some(response.duration);

            if let Outcome::Rendered { .. } = outcome {
                if self.list_state.selected().is_none() {
                    self.list_state.select(Some(0));
                }
                self.check_sentinel();
            }
        }
    }

    pub fn selected_index(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    fn select(&mut self, index: usize) {
        let len = self.controller.gallery().len();
        if len == 0 {
            return;
        }
        self.list_state.select(Some(index.min(len - 1)));
        self.check_sentinel();
    }

    fn select_next(&mut self, step: usize) {
        self.select(self.selected_index().saturating_add(step));
    }

    fn select_prev(&mut self, step: usize) {
        self.select(self.selected_index().saturating_sub(step));
    }

    fn open_lightbox(&mut self) {
        let index = self.selected_index();
        if self.controller.lightbox_mut().open(index).is_none() {
            log::debug!("no lightbox binding for card {}", index);
            return;
        }
        self.lightbox_changed_at = Instant::now();
    }

    /// Step the open lightbox and keep the list selection in sync
    fn step_lightbox(&mut self, forward: bool) {
        let lightbox = self.controller.lightbox_mut();
        let index = if forward {
            lightbox.next().map(|view| view.index)
        } else {
            lightbox.prev().map(|view| view.index)
        };
        if let Some(index) = index {
            self.lightbox_changed_at = Instant::now();
            self.select(index);
        }
    }

    /// Full-size URL of the card being looked at
    fn focused_url(&self) -> Option<String> {
        if let Some(view) = self.controller.lightbox().current() {
            return Some(view.source.to_string());
        }
        self.controller
            .gallery()
            .get(self.selected_index())
            .map(|card| card.full_url.clone())
    }

    fn open_in_browser(&mut self) {
        let Some(url) = self.focused_url() else {
            return;
        };
        if let Err(e) = open::that(&url) {
            self.controller
                .notifier_mut()
                .error(&format!("Failed to open browser: {}", e));
        }
    }

    fn copy_url(&mut self) {
        let Some(url) = self.focused_url() else {
            return;
        };
        if self.clipboard.is_none() {
            self.clipboard = Clipboard::new().ok();
        }
        let copied = self
            .clipboard
            .as_mut()
            .is_some_and(|clipboard| clipboard.set_text(&url).is_ok());

        let notifier = self.controller.notifier_mut();
        if copied {
            notifier.info(&format!("Copied: {}", url));
        } else {
            notifier.error("Clipboard not available");
        }
    }

    /// Drop an expired toast and show the next queued one
    pub fn update_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired()) {
            self.toast = None;
        }
        if self.toast.is_none() {
            self.toast = self.controller.notifier_mut().pop().map(Toast::new);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        if self.controller.lightbox().is_open() {
            self.handle_lightbox_key(key);
            return;
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Gallery => self.handle_gallery_key(key),
        }
    }

    fn handle_lightbox_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.controller.lightbox_mut().close(),
            KeyCode::Right | KeyCode::Char('l') => self.step_lightbox(true),
            KeyCode::Left | KeyCode::Char('h') => self.step_lightbox(false),
            KeyCode::Char('o') => self.open_in_browser(),
            KeyCode::Char('y') => self.copy_url(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down if !self.controller.gallery().is_empty() => {
                self.focus = Focus::Gallery
            }
            _ => {
                self.input.handle_key(&key);
            }
        }
    }

    fn handle_gallery_key(&mut self, key: KeyEvent) {
        const PAGE: usize = 5;

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') | KeyCode::Tab => self.focus = Focus::Search,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(1),
            KeyCode::PageDown => self.select_next(PAGE),
            KeyCode::PageUp => self.select_prev(PAGE),
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(usize::MAX),
            KeyCode::Enter => self.open_lightbox(),
            KeyCode::Char('o') => self.open_in_browser(),
            KeyCode::Char('y') => self.copy_url(),
            _ => {}
        }
    }
}

/// Run the terminal gallery, optionally starting with a search
pub fn run(client: PixabayClient, scroll_margin: u32, initial_query: Option<String>) -> Result<()> {
    let (request_tx, request_rx) = mpsc::channel::<PageRequest>();
    let (response_tx, response_rx) = mpsc::channel::<PageResponse>();
    spawn_worker(client.clone(), request_rx, response_tx);

    let controller = Controller::new(client, ToastQueue::default(), scroll_margin);
    let mut app = App::new(controller, request_tx, response_rx);
    if let Some(query) = initial_query {
        app.input = TextInput::with_text(&query);
        app.submit();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::BlinkingBar)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<C: ImageSearch>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<C>,
) -> Result<()> {
    loop {
        app.poll_responses();
        app.update_toast();

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(16))? {
            let event = event::read()?;
            app.handle_event(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
