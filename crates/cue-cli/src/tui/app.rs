//! Main TUI application
//!
//! Core application state and event loop. Handler implementations are in
//! the handlers/ module.
//!
//! The loop owns the two periodic tick sources as `Option<Interval>`s that
//! are re-derived from the engine's paused flag before every iteration, so
//! pause/stop cancel both in the same dispatch turn and nothing fires
//! afterwards.

use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, EventStream,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::tui::components::{Toast, ToastQueue};
use crate::tui::input::ScriptEditor;
use crate::tui::popups::{PathPrompt, SettingsForm};
use crate::tui::prompter::Prompter;
use crate::tui::state::LayoutState;
use crate::tui::themes::Theme;
use cue_core::{DisplaySettings, ScriptSource};

/// View types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Editor,
    Prompter,
}

/// Active popup, carrying its state.
pub enum Popup {
    None,
    Settings(SettingsForm),
    Path(PathPrompt),
}

impl Popup {
    pub fn is_none(&self) -> bool {
        matches!(self, Popup::None)
    }
}

/// Destructive action awaiting a confirming second request while the
/// script has unsaved changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    CloseFile,
    Exit,
}

/// Application state
pub struct App {
    pub view: View,
    pub popup: Popup,
    pub theme: Theme,
    pub should_quit: bool,

    pub editor: ScriptEditor,
    pub script: ScriptSource,
    pub settings: DisplaySettings,

    /// At most one prompter exists; play re-uses it when open.
    pub prompter: Option<Prompter>,

    pub toasts: ToastQueue,
    pub layout: LayoutState,
    pub pending_discard: Option<PendingAction>,

    // Dirty-tracking for render optimization
    pub(crate) needs_redraw: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            view: View::Editor,
            popup: Popup::None,
            theme: Theme::default(),
            should_quit: false,
            editor: ScriptEditor::new(),
            script: ScriptSource::new(),
            settings: DisplaySettings::default(),
            prompter: None,
            toasts: ToastQueue::new(),
            layout: LayoutState::new(),
            pending_discard: None,
            needs_redraw: true,
        }
    }

    pub fn show_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
        self.needs_redraw = true;
    }

    /// Enter the terminal, run the event loop, restore on the way out.
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;
        result
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        // Async event stream so timers keep firing while no input arrives.
        let mut event_stream = EventStream::new();
        let mut scroll_timer: Option<Interval> = None;
        let mut stopwatch_timer: Option<Interval> = None;

        loop {
            self.sync_timers(&mut scroll_timer, &mut stopwatch_timer);

            // Tick toasts (auto-dismiss expired)
            if self.toasts.tick() {
                self.needs_redraw = true;
            }

            // Only render if something changed
            if self.needs_redraw {
                terminal.draw(|f| self.ui(f))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased; // Prefer input over timer ticks when both are ready

                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            Event::Key(key) => self.handle_key(key),
                            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                            Event::Paste(text) => self.handle_paste(text),
                            Event::Resize(_, _) => {}
                            _ => {}
                        }
                        self.needs_redraw = true;
                    }
                }
                _ = next_tick(&mut scroll_timer) => {
                    if let Some(prompter) = self.prompter.as_mut() {
                        prompter.engine.scroll_tick();
                    }
                    self.needs_redraw = true;
                }
                _ = next_tick(&mut stopwatch_timer) => {
                    if let Some(prompter) = self.prompter.as_mut() {
                        prompter.engine.stopwatch_tick();
                    }
                    self.needs_redraw = true;
                }
                _ = tokio::time::sleep(Duration::from_millis(200)) => {
                    // Timeout - fall through for toast expiry
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Derive both timers from the engine state: created together when the
    /// engine runs, dropped together when it pauses. The scroll timer is
    /// recreated when a settings change re-derived its interval.
    fn sync_timers(&self, scroll: &mut Option<Interval>, stopwatch: &mut Option<Interval>) {
        let running = self
            .prompter
            .as_ref()
            .is_some_and(|p| !p.engine.is_paused());
        if !running {
            *scroll = None;
            *stopwatch = None;
            return;
        }

        let period = self
            .prompter
            .as_ref()
            .map(|p| p.engine.interval())
            .unwrap_or(Duration::from_millis(20));

        let stale = scroll.as_ref().map(|i| i.period() != period).unwrap_or(true);
        if stale {
            *scroll = Some(make_interval(period));
        }
        if stopwatch.is_none() {
            *stopwatch = Some(make_interval(Duration::from_secs(1)));
        }
    }

    fn handle_paste(&mut self, text: String) {
        if self.popup.is_none() && self.view == View::Editor {
            self.editor.insert_str(&text);
            self.script.set_text(self.editor.content().to_string());
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// First tick lands one full period out, late ticks are skipped rather
/// than bursted.
fn make_interval(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Await the next tick of an optional timer; absent timers never fire.
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
