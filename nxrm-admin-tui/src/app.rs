//! Main loop
//!
//! Each iteration:
//! 1. draw the UI from the model
//! 2. stop if the app asked to quit
//! 3. poll terminal input (up to 100 ms) and turn it into a message
//! 4. pump machine completions that arrived in the meantime
//! 5. drain messages posted by completion callbacks

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the main loop until the user quits
pub fn run(terminal: &mut Term, app: &mut App, messages: &mut UnboundedReceiver<AppMessage>) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        if app.should_quit {
            break;
        }

        if let Some(event) = event::poll_event(POLL_INTERVAL)? {
            let msg = event::handle_event(event, app);
            update::update(app, msg);
        }

        app.pump();
        while let Ok(msg) = messages.try_recv() {
            update::update(app, msg);
        }
    }

    Ok(())
}
