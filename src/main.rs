//! Terminal vowel grid (default binary).
//!
//! Reads its options from the environment (see `SessionConfig::from_env` and
//! `VOWEL_GRID_DATA`), then runs a render/poll loop on the alternate screen.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use vowel_grid::audio::{AudioDispatcher, LogOnlyBackend};
use vowel_grid::core::{QuizSession, QuizSnapshot, SessionConfig};
use vowel_grid::host::{load_catalog, HostObserver, QuizHost, DATA_PATH_VAR};
use vowel_grid::input::{handle_key_event, should_quit};
use vowel_grid::logging;
use vowel_grid::term::{FrameBuffer, GridView, TerminalRenderer, Viewport};

const POLL_MS: u64 = 100;

fn main() -> Result<()> {
    logging::init_from_env()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("vowel-grid-audio")
        .build()?;

    let mut config = SessionConfig::from_env();
    if !SessionConfig::seed_is_pinned() {
        config.seed = rand::random::<u32>();
    }
    let data_path = std::env::var_os(DATA_PATH_VAR).map(PathBuf::from);
    let catalog = load_catalog(data_path.as_deref(), config.mode);
    log::info!(
        "starting {} quiz: {} items, seed {}",
        config.mode.as_str(),
        catalog.item_count(),
        config.seed
    );

    let session = QuizSession::with_observer(catalog, config, HostObserver::default());
    let audio = AudioDispatcher::new(LogOnlyBackend, runtime.handle().clone());
    let mut host = QuizHost::new(session, Some(audio));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut host);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, host: &mut QuizHost<LogOnlyBackend>) -> Result<()> {
    let view = GridView::default();
    let mut snap = QuizSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        host.snapshot_into(&mut snap);
        view.render_into(&snap, host.session().catalog(), &host.status(), Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    host.handle(action);
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
