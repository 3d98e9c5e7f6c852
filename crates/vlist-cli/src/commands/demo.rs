use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing::info;

use vlist_core::AppConfig;
use vlist_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets::{ListViewWidget, ScrollbarWidget, StatusBarWidget},
};

/// Poll timeout while nothing is animating
const TICK_RATE_MS: u64 = 250;

pub fn run(config: &AppConfig) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("vlist"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(config, Rect::new(0, 0, size.width, size.height));
    info!(
        data_size = app.list.window_manager().data_size(),
        "Demo started"
    );

    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(TICK_RATE_MS, config.scroll.animation_fps);

    let result = run_loop(&mut terminal, &mut app, &keymap, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        app.tick(app.now_ms());
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(event) = event_handler.next(app.needs_frames())? {
            let now = app.now_ms();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, keymap, app.pending_g);
                    app.handle_action(action, now);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse, now),
                AppEvent::Resize(width, height) => app.resize(Rect::new(0, 0, width, height), now),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let layout = app.layout;
    let coordinator = app.list.coordinator();
    let thumb = if app.list.window_manager().metrics().is_vertical() {
        coordinator.vertical_thumb()
    } else {
        coordinator.horizontal_thumb()
    };

    ListViewWidget::render(frame, layout.list, app);
    ScrollbarWidget::render(frame, layout.scrollbar, thumb, &app.theme);
    StatusBarWidget::render(frame, layout.status, app);
}
