//! Audio cue dispatch
//!
//! Placement logic never waits on audio. [`AudioDispatcher::cue`] hands the
//! item's sources to a blocking task on a tokio runtime and returns at once;
//! the returned handle may be awaited (tests do) or dropped (the game does).
//!
//! Each item has at most two sources. The first is tried, and on failure the
//! second is tried once:
//!
//! | Primary | Fallback | Log |
//! |---------|----------|-----|
//! | ok | - | - |
//! | failed | ok | `warn` |
//! | failed | failed / absent | `warn` + `error` |
//! | absent | - | `debug` |

use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use vowel_grid_core::Item;

/// Something that can play an audio resource by URL.
///
/// Implementations may block; they always run on a blocking worker.
pub trait AudioBackend: Send + Sync + 'static {
    fn play(&self, url: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no tokio runtime available for audio dispatch")]
    NoRuntime,
    #[error("could not play {url}: {reason}")]
    Playback { url: String, reason: String },
    #[error("audio task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Primary and optional fallback source of one cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueSources {
    pub primary: String,
    pub fallback: Option<String>,
}

impl CueSources {
    /// Sources of `item`, or `None` if it has no audio.
    pub fn of(item: &Item) -> Option<Self> {
        let mut urls = item.audio_urls.iter().filter(|u| !u.trim().is_empty());
        let primary = urls.next()?.clone();
        Some(Self {
            primary,
            fallback: urls.next().cloned(),
        })
    }
}

/// Which source ended up playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Played {
    Primary,
    Fallback,
}

pub type CueHandle = JoinHandle<Result<Played, AudioError>>;

/// Fire-and-forget cue player.
#[derive(Clone)]
pub struct AudioDispatcher<B> {
    backend: Arc<B>,
    runtime: Handle,
}

impl<B: AudioBackend> AudioDispatcher<B> {
    pub fn new(backend: B, runtime: Handle) -> Self {
        Self {
            backend: Arc::new(backend),
            runtime,
        }
    }

    /// Bind to the runtime of the calling context.
    pub fn from_current(backend: B) -> Result<Self, AudioError> {
        let runtime = Handle::try_current().map_err(|_| AudioError::NoRuntime)?;
        Ok(Self::new(backend, runtime))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Start playing `item`'s cue. Returns `None` if the item has no audio.
    pub fn cue(&self, item: &Item) -> Option<CueHandle> {
        let Some(sources) = CueSources::of(item) else {
            log::debug!("no audio for '{}'", item.key);
            return None;
        };
        let backend = Arc::clone(&self.backend);
        let key = item.key.clone();
        Some(
            self.runtime
                .spawn_blocking(move || play_with_fallback(backend.as_ref(), &key, &sources)),
        )
    }
}

/// Play `sources` on `backend`, trying the fallback once.
pub fn play_with_fallback<B: AudioBackend + ?Sized>(
    backend: &B,
    key: &str,
    sources: &CueSources,
) -> Result<Played, AudioError> {
    let err = match backend.play(&sources.primary) {
        Ok(()) => return Ok(Played::Primary),
        Err(err) => err,
    };
    log::warn!("audio for '{key}' failed at {}: {err:#}", sources.primary);

    let Some(fallback) = &sources.fallback else {
        log::error!("audio for '{key}' unavailable: no fallback source");
        return Err(AudioError::Playback {
            url: sources.primary.clone(),
            reason: format!("{err:#}"),
        });
    };

    backend.play(fallback).map(|()| Played::Fallback).map_err(|err| {
        log::error!("audio for '{key}' failed at fallback {fallback}: {err:#}");
        AudioError::Playback {
            url: fallback.clone(),
            reason: format!("{err:#}"),
        }
    })
}

/// Backend that only records what would have played.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyBackend;

impl AudioBackend for LogOnlyBackend {
    fn play(&self, url: &str) -> anyhow::Result<()> {
        log::info!("cue {url}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use vowel_grid_core::types::{InteractionMode, ItemId, Position};
    use vowel_grid_core::Catalog;

    /// Records every URL; fails on URLs containing "missing".
    #[derive(Default)]
    struct Recording {
        played: Mutex<Vec<String>>,
    }

    impl AudioBackend for Recording {
        fn play(&self, url: &str) -> anyhow::Result<()> {
            self.played.lock().unwrap().push(url.to_string());
            if url.contains("missing") {
                anyhow::bail!("404 for {url}");
            }
            Ok(())
        }
    }

    fn item(urls: &[&str]) -> Item {
        Item {
            id: ItemId(0),
            key: "i".to_string(),
            label: "i".to_string(),
            pronunciation: None,
            audio_urls: urls.iter().map(|u| u.to_string()).collect(),
            canonical: Position::new(0, 0),
        }
    }

    #[test]
    fn test_sources_skip_blank_urls() {
        let sources = CueSources::of(&item(&["", "a.mp3", "b.ogg", "c.wav"])).unwrap();
        assert_eq!(sources.primary, "a.mp3");
        assert_eq!(sources.fallback.as_deref(), Some("b.ogg"));
        assert_eq!(CueSources::of(&item(&[])), None);
    }

    #[tokio::test]
    async fn test_cue_plays_primary() {
        let dispatcher = AudioDispatcher::from_current(Recording::default()).unwrap();
        let handle = dispatcher.cue(&item(&["a.mp3", "a.ogg"])).unwrap();
        assert_eq!(handle.await.unwrap().unwrap(), Played::Primary);
        assert_eq!(*dispatcher.backend().played.lock().unwrap(), vec!["a.mp3"]);
    }

    #[tokio::test]
    async fn test_cue_falls_back_once() {
        let dispatcher = AudioDispatcher::from_current(Recording::default()).unwrap();
        let handle = dispatcher.cue(&item(&["missing.mp3", "a.ogg"])).unwrap();
        assert_eq!(handle.await.unwrap().unwrap(), Played::Fallback);

        let handle = dispatcher
            .cue(&item(&["missing.mp3", "missing.ogg"]))
            .unwrap();
        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(err, AudioError::Playback { ref url, .. } if url == "missing.ogg"));
        assert_eq!(dispatcher.backend().played.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_cue_without_audio_is_skipped() {
        let dispatcher = AudioDispatcher::from_current(Recording::default()).unwrap();
        assert!(dispatcher.cue(&item(&[])).is_none());
        assert!(dispatcher.backend().played.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_placeholder_items_have_cues() {
        let catalog = Catalog::placeholder(InteractionMode::default());
        let dispatcher = AudioDispatcher::from_current(LogOnlyBackend).unwrap();
        for item in catalog.items() {
            let handle = dispatcher.cue(item).unwrap();
            assert_eq!(handle.await.unwrap().unwrap(), Played::Primary);
        }
    }

    #[test]
    fn test_no_runtime_is_reported() {
        assert!(matches!(
            AudioDispatcher::from_current(LogOnlyBackend),
            Err(AudioError::NoRuntime)
        ));
    }
}
