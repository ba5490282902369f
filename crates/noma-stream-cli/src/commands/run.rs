use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::debug;

use noma_stream_core::{
    AppConfig, ContentSource, FixtureSource, HttpSource, StreamMode, StreamSession,
};
use noma_stream_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    theme::load_theme,
    widgets::{PopupWidget, StatusBarWidget, StreamWidget},
    App, Overlay,
};

use crate::fixtures;

pub async fn run(config: Arc<AppConfig>, remote: Option<String>, latest: bool) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    let (source, remote_url) = resolve_source(&config, remote)?;
    debug!(
        "Content source: {}",
        remote_url.as_deref().unwrap_or("bundled demo pool")
    );

    let mode = if latest {
        StreamMode::Chronological
    } else {
        StreamMode::Paced
    };

    // Viewport height is corrected on the first draw
    let mut session = StreamSession::new(&config, source, mode, 1)?;
    session.start().await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("NOMA")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load theme from config
    let theme = load_theme(&config.ui.theme);

    let mut app = App::new(Arc::clone(&config), session, theme);

    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.scroll.animation_fps);

    // Track if we need high frame rate for the page transition
    // This is checked at the END of each iteration to determine NEXT iteration's poll rate
    let mut needs_fast_update = false;

    // Main loop
    loop {
        // Drive the stream: completed fetches, the transition animation,
        // and whatever the viewport emitted since the last frame
        let events = app.session.pump(Instant::now());
        app.apply_stream_events(events);

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            // Keep the paging math in step with the terminal size
            app.sync_viewport(main_layout[0].height);

            StreamWidget::render(frame, main_layout[0], &app);
            StatusBarWidget::render(frame, main_layout[1], &app);

            // Render popups on top
            match app.overlay {
                Overlay::Help => PopupWidget::render_help(frame, &app),
                Overlay::Comments => PopupWidget::render_comments(frame, &app),
                Overlay::None => {}
            }
        })?;

        // Handle events (use faster poll rate while a transition is running)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app, &keymap);
                    app.handle_action(action, Instant::now());
                }
                AppEvent::Mouse(mouse) => {
                    app.handle_mouse(mouse, Instant::now());
                }
                AppEvent::Resize(_, _) => {
                    // Next draw picks up the new size through sync_viewport
                }
                AppEvent::Tick => {}
            }
        }

        // Update fast update flag for next iteration
        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Pick the content source: an explicit --remote wins over the configured
/// base URL, and without either the bundled pool serves. The second element
/// is the remote URL in play, `None` when the bundled pool backs the stream.
fn resolve_source(
    config: &AppConfig,
    remote: Option<String>,
) -> Result<(Arc<dyn ContentSource>, Option<String>)> {
    match remote.or_else(|| config.source.base_url.clone()) {
        Some(base_url) => {
            let mut remote_config = (*config).clone();
            remote_config.source.base_url = Some(base_url.clone());
            let source: Arc<dyn ContentSource> = Arc::new(HttpSource::new(&remote_config)?);
            Ok((source, Some(base_url)))
        }
        None => {
            let source: Arc<dyn ContentSource> = Arc::new(FixtureSource::new(
                fixtures::pool(),
                config.stream.page_size,
            ));
            Ok((source, None))
        }
    }
}
