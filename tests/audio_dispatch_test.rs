use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use vowel_grid::audio::{AudioBackend, AudioDispatcher, Played};
use vowel_grid::core::{Catalog, QuizSession, SessionConfig};
use vowel_grid::types::{CellId, InteractionMode};

/// Takes a while per URL and fails on `.mp3`, so every cue needs its fallback.
struct SlowOggOnly {
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl AudioBackend for SlowOggOnly {
    fn play(&self, url: &str) -> anyhow::Result<()> {
        std::thread::sleep(self.delay);
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.ends_with(".mp3") {
            anyhow::bail!("unsupported codec");
        }
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cue_does_not_block_placement() {
    let calls = Arc::new(AtomicUsize::new(0));
    let dispatcher = AudioDispatcher::from_current(SlowOggOnly {
        delay: Duration::from_millis(150),
        calls: Arc::clone(&calls),
    })
    .unwrap();

    let mode = InteractionMode::default();
    let mut session = QuizSession::new(Catalog::placeholder(mode), SessionConfig::new(mode));
    let item = session.catalog().items()[0].clone();

    let started = Instant::now();
    let handle = dispatcher.cue(&item).unwrap();
    session.swap_cells(CellId(0), CellId(1)).unwrap();
    assert!(started.elapsed() < Duration::from_millis(150));

    assert_eq!(handle.await.unwrap().unwrap(), Played::Fallback);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
