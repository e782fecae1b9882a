//! Runtime: event loop and input routing for the key entry TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (raw mode, alternate screen, mouse capture,
//!   bracketed paste). The terminal is driven through stderr so stdout stays
//!   free for whatever the caller does with the submitted key.
//! - Forward `crossterm` events from a dedicated task over a channel.
//! - Route input to the key entry component and turn its `Effect`s into an
//!   `Outcome` that ends the session.
//! - Redraw after every handled event.
use std::io::Stderr;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event, EventStream, KeyCode,
    KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use futures_util::StreamExt;
use keyentry_types::{Effect, Msg, Outcome};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::App;
use crate::ui::components::{Component, KeyEntryComponent};
use crate::ui::components::key_entry::KeyEntryForm;
use crate::ui::main::draw;
use crate::ui::theme::LoadedTheme;

type TuiTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Spawn a task that reads terminal input and forwards `crossterm` events
/// over a Tokio channel.
fn spawn_input_task() -> (mpsc::Receiver<Event>, JoinHandle<()>) {
    let (sender, receiver) = mpsc::channel(100);
    let handle = tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(next) = events.next().await {
            match next {
                Ok(event) => {
                    if let Err(e) = sender.send(event).await {
                        debug!("Input receiver dropped: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    (receiver, handle)
}

/// Aborts the input task when dropped, so the reader stops consuming
/// terminal input on every exit path, errors included.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<TuiTerminal> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stderr = std::io::stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)
        .context("failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut TuiTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn render<B>(terminal: &mut Terminal<B>, app: &mut App<'_>, key_entry: &mut KeyEntryComponent) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    terminal.draw(|frame| draw(frame, app, key_entry))?;
    Ok(())
}

/// Handle raw crossterm input events and update `App`/components.
fn handle_input_event(app: &mut App<'_>, key_entry: &mut KeyEntryComponent, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => key_entry.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => key_entry.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => key_entry.handle_message(app, Msg::Resize(width, height)),
        Event::Paste(text) => key_entry.handle_message(app, Msg::Paste(text)),
        Event::Key(_) | Event::FocusGained | Event::FocusLost => Vec::new(),
    }
}

fn is_ctrl_c(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// The session outcome implied by a batch of effects, if any.
fn outcome_for(effects: &[Effect]) -> Option<Outcome> {
    effects.iter().find_map(|effect| match effect {
        Effect::Submitted => Some(Outcome::Submitted),
        Effect::Cancel => Some(Outcome::Cancelled),
    })
}

async fn event_loop<B>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_>,
    key_entry: &mut KeyEntryComponent,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<Outcome>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    render(terminal, app, key_entry)?;

    let outcome = loop {
        let effects = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; treat as cancellation.
                    break Outcome::Cancelled;
                };
                if is_ctrl_c(&event) {
                    break Outcome::Cancelled;
                }
                handle_input_event(app, key_entry, event)
            }
            _ = signal::ctrl_c() => { break Outcome::Cancelled; }
        };

        if let Some(outcome) = outcome_for(&effects) {
            break outcome;
        }
        render(terminal, app, key_entry)?;
    };

    Ok(outcome)
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop until the key is submitted or the user cancels, and restores the
/// terminal on every exit path.
pub async fn run_app(form: KeyEntryForm<'_>, theme: LoadedTheme) -> Result<Outcome> {
    let mut app = App::new(form, theme);
    let mut key_entry = KeyEntryComponent::default();
    info!(theme = ?app.theme_id, "Starting key entry session");

    let mut terminal = setup_terminal()?;
    let (mut input_receiver, input_task) = spawn_input_task();
    let input_task = AbortOnDrop(input_task);
    let result = event_loop(&mut terminal, &mut app, &mut key_entry, &mut input_receiver).await;
    drop(input_task);
    let cleanup = cleanup_terminal(&mut terminal).context("failed to restore terminal");

    let outcome = result?;
    cleanup?;
    info!(?outcome, "Key entry session finished");
    Ok(outcome)
}
