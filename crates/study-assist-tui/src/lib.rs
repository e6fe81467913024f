pub mod action;
pub mod app;
pub mod form;
pub mod region;
mod render;

use std::collections::HashMap;
use std::sync::Arc;

use crossterm::ExecutableCommand;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use study_assist::{ActionInvoker, PlainRenderer, Transport};
use tokio::sync::mpsc;
use tokio::time::{Duration, interval};

use crate::action::{Action, AppCommand};
use crate::app::App;
use crate::region::ChannelRegion;

/// Invoker shared by every request task the UI spawns.
pub type SharedInvoker = Arc<ActionInvoker<Arc<dyn Transport>, PlainRenderer>>;

/// Launch the interactive TUI. Returns when the user quits.
///
/// `defaults` pre-fills form inputs by input id.
pub async fn run(
    invoker: SharedInvoker,
    endpoint_label: String,
    defaults: HashMap<String, String>,
) -> anyhow::Result<()> {
    // Terminal setup.
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(endpoint_label, &defaults);
    let result = run_event_loop(&mut terminal, invoker, app).await;

    // Terminal teardown (always runs).
    disable_raw_mode()?;
    std::io::stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    invoker: SharedInvoker,
    mut app: App,
) -> anyhow::Result<()> {
    use futures::StreamExt;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut event_stream = EventStream::new();
    let mut busy = invoker.busy().subscribe();
    let mut tick_interval = interval(Duration::from_millis(250));

    loop {
        app.in_flight = *busy.borrow_and_update();

        terminal.draw(|frame| render::render(frame, &app))?;

        // Wait for next event.
        let command = tokio::select! {
            Some(event_result) = event_stream.next() => {
                match event_result {
                    Ok(event) => {
                        // Only key presses (not release/repeat).
                        match &event {
                            Event::Key(key) if key.kind == KeyEventKind::Press => {}
                            _ => continue,
                        }
                        app.handle_event(event)
                    }
                    Err(_) => continue,
                }
            }
            Some(action) = action_rx.recv() => {
                app.handle_action(action)
            }
            Ok(()) = busy.changed() => AppCommand::None,
            _ = tick_interval.tick() => {
                app.tick();
                AppCommand::None
            }
        };

        // Execute side effects.
        match command {
            AppCommand::None => {}
            AppCommand::Quit => break,
            AppCommand::Submit { spec, inputs } => {
                tracing::debug!(operation = spec.name, "submitting from form");
                let invoker = Arc::clone(&invoker);
                let tx = action_tx.clone();
                tokio::spawn(async move {
                    let region = ChannelRegion::new(spec.region_id(), tx.clone());
                    let result = invoker
                        .invoke(spec, &inputs, &region)
                        .await
                        .map(|_| ())
                        .map_err(|e| e.display_message());
                    let _ = tx.send(Action::Completed {
                        operation: spec.name,
                        result,
                    });
                });
            }
        }
    }

    Ok(())
}
