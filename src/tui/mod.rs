//! Terminal User Interface for modelprefs

mod input;
pub mod render;

use crate::api::PreferencesApi;
use crate::app::{App, Dispatcher, Event, Handler};
use anyhow::Result;
use ratatui::crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Instant;
use tracing::info;

pub use input::handle_key_event;

/// Run the TUI application until the user quits
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to
pub fn run<A: PreferencesApi + 'static>(mut app: App, dispatcher: &Dispatcher<A>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = Handler::new(app.config.poll_interval());
    let result = run_loop(&mut terminal, &mut app, &event_handler, dispatcher);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<A: PreferencesApi + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &Handler,
    dispatcher: &Dispatcher<A>,
) -> Result<()> {
    info!("Mounting preferences panel");
    dispatcher.submit_all(app.mount());

    loop {
        pump(app, dispatcher);
        app.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        match event_handler.next()? {
            Event::Key(key) => {
                let requests = handle_key_event(app, key.code, key.modifiers);
                dispatcher.submit_all(requests);
            }
            Event::Tick | Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Apply every finished request and dispatch the follow-ups
pub fn pump<A: PreferencesApi + 'static>(app: &mut App, dispatcher: &Dispatcher<A>) {
    for completion in dispatcher.drain() {
        let follow_ups = app.apply(completion);
        dispatcher.submit_all(follow_ups);
    }
}
