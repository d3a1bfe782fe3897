use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::session::Session;
use crate::transport::RodioTransport;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> anyhow::Result<()> {
    let (settings, config_warning) = settings::load_settings();

    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("medley: logging disabled: {e:#}");
    }
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting medley");

    let dir = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let (transport, events) = RodioTransport::spawn(settings.audio.clone());
    let mut session = Session::new(transport)
        .with_policy(startup::sequence_policy(settings.playback.on_sequence_change));
    startup::apply_playback_defaults(&mut session, &settings);

    let report = session.import_dir(&dir, &settings.library);
    let mut app = App::new(settings.ui.follow_playback);
    app.set_notice(startup::import_notice(&dir, &report));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: anyhow::Result<()> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut session,
            &events,
            &mut state,
        )
    })();

    session
        .transport()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("bye");
    run_result
}
