//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, one grid per screen, and
//! the event loop that ties widgets to the reducer.
//!
//! ## Event flow
//!
//! ```text
//! key ──► Host::handle_event ──► navigation (main screen, outside insert mode)
//!                          └───► focused widget ──► Action
//! Action ──► update(session) ──► Effect ──► spawned task ──► Action (channel)
//!        └─► every widget as Msg::Notify
//! ```
//!
//! Host keys: `Ctrl+C` always quits; `q` quits and `?` toggles the full help
//! outside insert mode; any key dismisses the error screen.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only draws after a key, a resize or an
//! action from a background task. Idle, it sleeps in `poll` between checks
//! of the action channel.

mod component;
mod components;
mod event;
pub mod layout;
mod styles;
mod ui;
mod views;

use log::{debug, info, warn};
use std::collections::VecDeque;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::credentials;
use crate::core::state::{Session, ViewId};
use crate::deepl::{DeeplClient, SharedLanguages, TranslateParams, TranslationProvider};
use crate::tui::components::HelpBar;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::layout::{Direction, Msg};
use crate::tui::views::{Views, navigates};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste, Hide)?;
        info!("Terminal modes enabled (bracketed paste, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Show);
    }
}

fn build_client(api_key: String, base_url: Option<String>) -> Arc<dyn TranslationProvider> {
    Arc::new(DeeplClient::new(api_key, base_url))
}

/// Everything the event loop mutates: session, screens, and the handles
/// needed to start background work.
struct Host {
    session: Session,
    views: Views,
    client: Option<Arc<dyn TranslationProvider>>,
    base_url: Option<String>,
    credentials_path: Option<PathBuf>,
    tx: mpsc::Sender<Action>,
    terminal_size: (u16, u16),
}

impl Host {
    /// Lay out, enter the first screen and look up languages given as bare
    /// codes. Returns `true` to quit.
    fn start(&mut self) -> bool {
        self.relayout();
        let mut actions = self.enter_view();
        if self.session.has_api_key && self.session.has_unresolved_languages() {
            actions.push(Action::LanguagesRequested);
        }

        let mut should_quit = false;
        for action in actions {
            should_quit |= self.dispatch(action);
        }
        should_quit
    }

    /// Apply `action` and everything it sets off. Returns `true` to quit.
    fn dispatch(&mut self, action: Action) -> bool {
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            let previous_view = self.session.view;
            let relayout = matches!(action, Action::ToggleHelp);

            let effect = update(&mut self.session, action.clone());

            let notify = Msg::Notify(action);
            for view in ViewId::ALL {
                if let Some(grid) = self.views.get_mut(view) {
                    queue.extend(grid.update_all(&notify, &self.session));
                }
            }

            if self.session.view != previous_view {
                queue.extend(self.enter_view());
            }
            if relayout {
                self.relayout();
            }
            if self.run_effect(effect, &mut queue) {
                return true;
            }
        }
        false
    }

    /// Init the grid of the current screen.
    fn enter_view(&mut self) -> Vec<Action> {
        let view = self.session.view;
        debug!("Entering view {:?}", view);
        match self.views.get_mut(view) {
            Some(grid) => grid.init(&self.session),
            None => Vec::new(),
        }
    }

    fn run_effect(&mut self, effect: Effect, queue: &mut VecDeque<Action>) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::FetchLanguages => match self.client.clone() {
                Some(client) => {
                    spawn_fetch_languages(client, self.session.languages.clone(), self.tx.clone())
                }
                None => queue.push_back(Action::Error("no API key set".to_string())),
            },
            Effect::Translate(params) => match self.client.clone() {
                Some(client) => spawn_translate(client, params, self.tx.clone()),
                None => queue.push_back(Action::Error("no API key set".to_string())),
            },
            Effect::SaveApiKey(key) => {
                self.client = Some(build_client(key.clone(), self.base_url.clone()));
                if self.session.has_unresolved_languages() {
                    queue.push_back(Action::LanguagesRequested);
                }
                match self.credentials_path.clone() {
                    Some(path) => spawn_save_api_key(path, key, self.tx.clone()),
                    None => warn!("No home directory, API key is kept for this run only"),
                }
            }
        }
        false
    }

    /// Route a terminal event. Returns `true` to quit.
    fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::ForceQuit => return self.dispatch(Action::Quit),
            TuiEvent::Resize(width, height) => {
                self.terminal_size = (width, height);
                self.relayout();
                return false;
            }
            _ => {}
        }

        if self.session.view == ViewId::Error {
            return self.dispatch(Action::ErrorDismissed);
        }

        if !self.session.insert_mode {
            match event {
                TuiEvent::InputChar('q') => return self.dispatch(Action::Quit),
                TuiEvent::InputChar('?') => return self.dispatch(Action::ToggleHelp),
                _ => {}
            }

            let direction = direction_for(&event).filter(|_| navigates(self.session.view));
            if let Some(direction) = direction {
                if let Some(grid) = self.views.get_mut(self.session.view) {
                    grid.navigate(direction);
                }
                return false;
            }
        }

        let action = self
            .views
            .get_mut(self.session.view)
            .and_then(|grid| grid.update_active(&Msg::Input(event), &self.session));
        match action {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    /// Recompute the grid area from the terminal size and resize every grid.
    fn relayout(&mut self) {
        let (width, height) = self.terminal_size;
        let help_height = HelpBar::from_session(&self.session).height();
        let areas = ui::frame_areas(Rect::new(0, 0, width, height), help_height);
        let content = areas.content;

        update(
            &mut self.session,
            Action::ContentResized {
                width: content.width,
                height: content.height,
            },
        );
        self.views.resize(content.width, content.height);
        debug!(
            "Layout: terminal {}x{}, content {}x{}",
            width, height, content.width, content.height
        );
    }
}

/// Arrow keys and vim keys as grid directions.
fn direction_for(event: &TuiEvent) -> Option<Direction> {
    match event {
        TuiEvent::Up | TuiEvent::InputChar('k') => Some(Direction::Up),
        TuiEvent::Down | TuiEvent::InputChar('j') => Some(Direction::Down),
        TuiEvent::Left | TuiEvent::InputChar('h') => Some(Direction::Left),
        TuiEvent::Right | TuiEvent::InputChar('l') => Some(Direction::Right),
        _ => None,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let session = Session::from_config(&config);
    let views = Views::new().map_err(std::io::Error::other)?;
    let (tx, rx) = mpsc::channel();

    let mut host = Host {
        session,
        views,
        client: config
            .api_key
            .clone()
            .map(|key| build_client(key, config.base_url.clone())),
        base_url: config.base_url.clone(),
        credentials_path: credentials::credentials_path(),
        tx,
        terminal_size: (0, 0),
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let size = terminal.size()?;
    host.terminal_size = (size.width, size.height);
    let mut should_quit = host.start();

    let mut needs_redraw = true;
    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &host.session, &host.views))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(POLL_INTERVAL);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if host.handle_event(event) {
                should_quit = true;
                break;
            }
        }

        // Handle background task results
        while !should_quit {
            let Ok(action) = rx.try_recv() else {
                break;
            };
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit = host.dispatch(action);
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

fn spawn_translate(
    client: Arc<dyn TranslationProvider>,
    params: TranslateParams,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning translate request ({} -> {}, {} chars)",
        params.source_lang.as_deref().unwrap_or("auto"),
        params.target_lang,
        params.text.iter().map(|t| t.len()).sum::<usize>()
    );
    tokio::spawn(async move {
        let action = match client.translate(&params).await {
            Ok(response) => match response.translations.into_iter().next() {
                Some(translation) => Action::TranslationReceived(translation),
                None => Action::Error("the translation service returned no text".to_string()),
            },
            Err(e) => {
                warn!("Translate request failed: {}", e);
                Action::Error(e.to_string())
            }
        };
        send(&tx, action);
    });
}

fn spawn_fetch_languages(
    client: Arc<dyn TranslationProvider>,
    cache: SharedLanguages,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning language list request");
    tokio::spawn(async move {
        let action = match client.languages().await {
            Ok(languages) => {
                info!(
                    "Fetched {} source and {} target languages",
                    languages.source.len(),
                    languages.target.len()
                );
                cache.store(languages);
                Action::LanguagesReceived
            }
            Err(e) => {
                warn!("Language request failed: {}", e);
                Action::Error(e.to_string())
            }
        };
        send(&tx, action);
    });
}

fn spawn_save_api_key(path: PathBuf, key: String, tx: mpsc::Sender<Action>) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = credentials::save_api_key_to(&path, &key) {
            warn!("Failed to save API key: {}", e);
            send(&tx, Action::Error(format!("Failed to save API key: {e}")));
        }
    });
}
