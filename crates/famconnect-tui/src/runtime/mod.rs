//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - The session subscription and effect handlers send `UiEvent`s to `inbox_tx`
//! - The runtime drains `inbox_rx` each loop iteration
//!
//! Structure:
//! - `mod.rs`: Core runtime (ShellRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers.rs`: Effect handler implementations

mod handlers;
mod inbox;

use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use famconnect_core::AppContext;
use famconnect_core::session::SubscriptionId;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, SessionView};
use crate::{render, terminal, update};

/// How long to wait for terminal input before draining the inbox again.
pub const POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal, the application context and the UI state.
/// Terminal state is restored on drop or panic.
pub struct ShellRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    ctx: AppContext,
    pub state: AppState,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    subscription: SubscriptionId,
}

impl ShellRuntime {
    /// Creates the runtime and enters the alternate screen.
    ///
    /// # Errors
    /// Returns an error if the startup route cannot be resolved or the
    /// terminal cannot be set up.
    pub fn new(mut ctx: AppContext) -> Result<Self> {
        let route = ctx.initial_route().context("Failed to resolve start screen")?;
        let session = SessionView {
            logged_in: ctx.session.logged_in(),
            stay_signed_in: ctx.session.stay_signed_in(),
            username: None,
        };

        let (inbox_tx, inbox_rx) = inbox::channel();
        let session_tx = inbox_tx.clone();
        let subscription = ctx.session.subscribe(move |change| {
            let _ = session_tx.send(UiEvent::Session(change));
        });

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        tracing::info!(
            event = "tui.started",
            route = route.title(),
            restored = ctx.session.was_restored(),
        );

        Ok(Self {
            terminal,
            ctx,
            state: AppState::new(route, session),
            inbox_tx,
            inbox_rx,
            subscription,
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let startup = self.state.startup_effects();
        self.execute_effects(startup);

        while !self.state.should_quit {
            self.terminal.draw(|frame| render::render(&self.state, frame))?;

            for event in self.collect_events()? {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }
        }

        tracing::info!(event = "tui.stopped", logged_in = self.ctx.session.logged_in());
        Ok(())
    }

    /// Collects terminal input and everything queued in the inbox.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();
        if event::poll(POLL_DURATION)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }
        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Executes a single effect. Result events go through the inbox so they
    /// reach the reducer after any session notifications the effect caused.
    fn execute_effect(&mut self, effect: UiEffect) {
        let result = match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
                None
            }
            UiEffect::MarkWelcomeShown => handlers::mark_welcome_shown(&self.ctx),
            UiEffect::SignUp { form } => Some(handlers::sign_up(&self.ctx, &form)),
            UiEffect::Login { username, password } => {
                Some(handlers::login(&mut self.ctx, username, &password))
            }
            UiEffect::SetStaySignedIn(value) => {
                handlers::set_stay_signed_in(&mut self.ctx, value)
            }
            UiEffect::LogOut => {
                self.ctx.log_out();
                None
            }
        };
        if let Some(event) = result {
            let _ = self.inbox_tx.send(event);
        }
    }
}

impl Drop for ShellRuntime {
    fn drop(&mut self) {
        self.ctx.session.unsubscribe(self.subscription);
        let _ = terminal::restore_terminal();
    }
}
