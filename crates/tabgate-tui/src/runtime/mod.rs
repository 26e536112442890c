//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and produces
//! effects; spawned tasks report back through the inbox channel.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tabgate_core::config::Config;
use tabgate_core::identity::{IdentityProvider, SignInRequest, SimulatedProvider};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame cadence while something is animating.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    provider: Arc<dyn IdentityProvider>,
    exchange_delay: Duration,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a runtime backed by the simulated identity provider.
    ///
    /// # Errors
    /// Returns an error if the tab configuration is invalid or the terminal
    /// cannot be set up.
    pub fn new(config: &Config) -> Result<Self> {
        let provider = Arc::new(SimulatedProvider::new(config.sign_in.apple_outcome));
        Self::with_provider(config, provider)
    }

    /// Creates a runtime with an explicit identity provider.
    ///
    /// # Errors
    /// Returns an error if the tab configuration is invalid or the terminal
    /// cannot be set up.
    pub fn with_provider(config: &Config, provider: Arc<dyn IdentityProvider>) -> Result<Self> {
        // Build state first so a bad config never touches the terminal.
        let state = AppState::new(config)?;

        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            provider,
            exchange_delay: Duration::from_millis(config.sign_in.exchange_delay_ms),
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the app quits.
    ///
    /// Must be called from within a Tokio runtime context.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;
            for event in events {
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tui.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        // Key presses also trigger a redraw through the tick below.
        if self.last_tick.elapsed() >= tick_interval || !events.is_empty() {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform `TaskStarted`/completion lifecycle.
    fn spawn_task<R, F, Fut>(
        &self,
        kind: TaskKind,
        id: TaskId,
        cancelable: bool,
        wrap: fn(TaskCompleted<R>) -> UiEvent,
        f: F,
    ) where
        R: Send + 'static,
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = cancelable.then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let result = f(cancel).await;
            let _ = tx.send(wrap(TaskCompleted { id, result }));
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::StartIdentityExchange {
                task,
                channel,
                phone,
            } => {
                let provider = Arc::clone(&self.provider);
                let delay = self.exchange_delay;
                let request = SignInRequest { channel, phone };
                self.spawn_task(
                    TaskKind::IdentityExchange,
                    task,
                    true,
                    UiEvent::IdentityCompleted,
                    move |cancel| handlers::identity_exchange(provider, request, delay, cancel),
                );
            }
            UiEffect::CancelTask { kind, token } => {
                if let Some(cancel) = token {
                    debug!(?kind, "cancelling task");
                    cancel.cancel();
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
