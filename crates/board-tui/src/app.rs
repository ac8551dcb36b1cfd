//! App — terminal lifecycle, event loop, and action dispatch.

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use board_core::config::Config;
use board_core::listing::Listing;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::action::Action;
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::listing_tabs::ListingTabs;
use crate::widgets::status_bar::{self, InputMode};
use crate::widgets::toast::{Severity, ToastManager};

/// Messages flowing into the event loop from background tasks.
enum AppMessage {
    Event(Event),
    ListingsLoaded(Vec<Listing>),
    FetchFailed(String),
}

pub struct App {
    state: AppState,
    listing_tabs: ListingTabs,
    toast: ToastManager,
    should_quit: bool,
    /// Area the tabs pane occupied on the last draw, for mouse routing.
    tabs_area: Rect,
    poll_interval: Duration,
    tx: mpsc::Sender<AppMessage>,
    rx: mpsc::Receiver<AppMessage>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (tx, rx) = mpsc::channel(1024);
        let state = AppState {
            listings: None,
            is_loading: false,
            fetch_error: false,
            last_refresh: None,
            base_url: config.api.base_url.clone(),
            take: config.ui.take,
            show_view_all: config.ui.show_view_all,
            view_all_link: config.ui.view_all_link.clone(),
            check_language: config.ui.check_language,
            language: config.ui.language.clone(),
            input_mode: InputMode::Normal,
            logs: Vec::new(),
        };
        Self {
            state,
            listing_tabs: ListingTabs::new(),
            toast: ToastManager::new(),
            should_quit: false,
            tabs_area: Rect::default(),
            poll_interval: Duration::from_secs(config.api.poll_interval_secs.max(30)),
            tx,
            rx,
        }
    }

    fn log(&mut self, message: impl Into<String>) {
        let msg = message.into();
        debug!("{msg}");
        self.state.logs.push(msg);
        if self.state.logs.len() > 200 {
            self.state.logs.remove(0);
        }
    }

    fn spawn_fetch(&mut self) {
        if self.state.is_loading {
            return;
        }
        self.state.is_loading = true;
        self.listing_tabs.sync(&self.state);
        let tx = self.tx.clone();
        let base_url = self.state.base_url.clone();
        tokio::spawn(async move {
            let msg = match board_core::api::fetch_listings(&base_url).await {
                Ok(listings) => AppMessage::ListingsLoaded(listings),
                Err(e) => AppMessage::FetchFailed(format!("{e:#}")),
            };
            let _ = tx.send(msg).await;
        });
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::ListingsLoaded(listings) => {
                let count = listings.len();
                self.state.listings = Some(listings);
                self.state.is_loading = false;
                self.state.fetch_error = false;
                self.state.last_refresh = Some(chrono::Local::now());
                self.toast.resolve_spinner(
                    Severity::Success,
                    format!("{count} listings"),
                    Duration::from_secs(2),
                );
                self.log(format!("fetched {count} listings"));
                self.listing_tabs.sync(&self.state);
            }
            AppMessage::FetchFailed(err) => {
                self.state.is_loading = false;
                self.state.fetch_error = true;
                self.toast
                    .resolve_spinner(Severity::Error, "fetch failed", Duration::from_secs(5));
                error!("listing fetch failed: {err}");
                self.log(format!("fetch failed: {err}"));
                self.listing_tabs.sync(&self.state);
            }
            AppMessage::Event(_) => unreachable!("events handled by caller"),
        }
    }

    fn dispatch(&mut self, actions: Vec<Action>) {
        let mut queue = actions;
        while let Some(action) = queue.pop() {
            match &action {
                Action::SelectTab(_) | Action::NextTab | Action::PrevTab => {
                    let follow = self.listing_tabs.on_action(&action, &self.state);
                    queue.extend(follow);
                }
                Action::OpenFilter => {
                    self.state.input_mode = InputMode::Filter;
                }
                Action::CloseFilter => {
                    self.state.input_mode = InputMode::Normal;
                }
                Action::Refresh => {
                    if !self.state.is_loading {
                        self.toast.spinner("refreshing listings…");
                        self.spawn_fetch();
                    }
                }
                Action::CopyToClipboard(text) => {
                    self.copy_to_clipboard(text.clone());
                }
                Action::Quit => {
                    self.should_quit = true;
                }
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: String) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
            Ok(()) => {
                info!("copied to clipboard: {text}");
                self.toast.success("copied");
            }
            Err(e) => {
                warn!("clipboard unavailable: {e}");
                self.toast.error("clipboard unavailable");
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        // Global keys only apply in normal mode; filter mode owns the keyboard.
        if self.state.input_mode == InputMode::Normal {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('r') => {
                    self.dispatch(vec![Action::Refresh]);
                    return;
                }
                _ => {}
            }
        }

        let actions = self.listing_tabs.handle_key(key, &self.state);
        self.dispatch(actions);
    }

    fn handle_mouse(&mut self, event: MouseEvent) {
        let area = self.tabs_area;
        if event.column >= area.x
            && event.column < area.x + area.width
            && event.row >= area.y
            && event.row < area.y + area.height
        {
            let actions = self.listing_tabs.handle_mouse(event, area, &self.state);
            self.dispatch(actions);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 5 {
            return;
        }

        // Bottom three rows: separator, keys bar, log bar.
        let tabs_area = Rect {
            height: area.height - 3,
            ..area
        };
        let separator_area = Rect {
            y: area.y + area.height - 3,
            height: 1,
            ..area
        };
        let keys_area = Rect {
            y: area.y + area.height - 2,
            height: 1,
            ..area
        };
        let log_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };

        self.tabs_area = tabs_area;
        self.listing_tabs.draw(frame, tabs_area, true, &self.state);
        status_bar::draw_separator(frame, separator_area);
        status_bar::draw_keys_bar(frame, keys_area, self.state.input_mode);
        status_bar::draw_log_bar(
            frame,
            log_area,
            self.state.last_log(),
            !self.state.fetch_error,
        );

        self.toast.draw(frame, area);
    }

    pub async fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(out);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        // Blocking crossterm reader feeding the async loop.
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("terminal event read failed: {e}");
                    break;
                }
            }
        });

        self.log("starting up");
        self.spawn_fetch();

        let mut refresh = tokio::time::interval(self.poll_interval);
        refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        refresh.tick().await; // first tick resolves immediately

        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        terminal.draw(|f| self.draw(f))?;

        while !self.should_quit {
            let mut needs_redraw = false;

            tokio::select! {
                Some(msg) = self.rx.recv() => {
                    match msg {
                        AppMessage::Event(Event::Key(key)) => self.handle_key(key),
                        AppMessage::Event(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                        AppMessage::Event(Event::Resize(_, _)) => {}
                        AppMessage::Event(_) => {}
                        other => self.handle_message(other),
                    }
                    needs_redraw = true;
                }
                _ = refresh.tick() => {
                    debug!("periodic refresh");
                    self.dispatch(vec![Action::Refresh]);
                    needs_redraw = true;
                }
                _ = ui_tick.tick() => {
                    let actions = self.listing_tabs.tick(&self.state);
                    self.dispatch(actions);
                    self.toast.tick();
                    needs_redraw = true;
                }
            }

            // Drain anything else that queued up before redrawing.
            while let Ok(msg) = self.rx.try_recv() {
                match msg {
                    AppMessage::Event(Event::Key(key)) => self.handle_key(key),
                    AppMessage::Event(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                    AppMessage::Event(_) => {}
                    other => self.handle_message(other),
                }
                needs_redraw = true;
            }

            if needs_redraw && !self.should_quit {
                terminal.draw(|f| self.draw(f))?;
            }
        }

        info!("shutting down");
        Ok(())
    }
}
