use crate::config::Config;
use crate::logger::Logger;
use crate::recent_activity::KeyValueStore;
use crate::ui::app::App;
use crate::ui::core::{Component, EventHandler};
use ratatui::DefaultTerminal;
use std::sync::Arc;

/// Run the terminal host until the user quits
pub async fn run_app(config: Config, logger: Logger, store: Arc<dyn KeyValueStore>) -> anyhow::Result<()> {
    let mut app = App::new(&config, logger, store)?;

    // Setup terminal
    let mut terminal = ratatui::init();
    let result = run_app_loop(&mut terminal, &mut app).await;

    // Restore terminal
    ratatui::restore();

    result
}

async fn run_app_loop(terminal: &mut DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    let mut event_handler = EventHandler::new();
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| {
                let area = f.area();
                app.render(f, area);
            })?;
            needs_render = false;
        }

        let event = event_handler.next_event().await?;
        needs_render = app.handle_event(event);

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
