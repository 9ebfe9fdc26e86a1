//! Broadcast medium backed by a directory shared by processes on one host.
//!
//! Each key lives in `<dir>/<key>.json` as an envelope naming the writer, so
//! a watcher can drop its own writes. Writes go through a temp file and a
//! rename so readers never see half a payload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_mini::notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::medium::{BroadcastMedium, StorageEvent, StorageListener, Subscription};
use crate::error::{DeckError, Result};

const DEBOUNCE: Duration = Duration::from_millis(30);
const EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    origin: String,
    value: String,
}

#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
    origin: String,
}

impl FileMedium {
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|source| DeckError::ChannelDir {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            origin: Uuid::new_v4().to_string(),
        })
    }

    /// `<cache dir>/skideck/channel`, falling back to the temp dir.
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("skideck")
            .join("channel")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{EXTENSION}"))
    }
}

/// The key a channel file stands for, or `None` for temp files and strays.
fn key_for_path(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() || stem.starts_with('.') {
        return None;
    }
    Some(stem.to_string())
}

fn read_envelope(path: &Path) -> Result<Option<Envelope>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&contents)?))
}

impl BroadcastMedium for FileMedium {
    fn write(&self, key: &str, value: &str) -> Result<()> {
        let envelope = Envelope {
            origin: self.origin.clone(),
            value: value.to_string(),
        };
        let tmp = self.dir.join(format!(".{key}.{}.tmp", self.origin));
        std::fs::write(&tmp, serde_json::to_vec(&envelope)?)?;
        std::fs::rename(&tmp, self.key_path(key))?;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(read_envelope(&self.key_path(key))?.map(|e| e.value))
    }

    fn subscribe(&self, listener: StorageListener) -> Result<Subscription> {
        let origin = self.origin.clone();
        let mut debouncer = new_debouncer(DEBOUNCE, move |events: DebounceEventResult| {
            let events = match events {
                Ok(events) => events,
                Err(e) => {
                    warn!("channel watcher error: {e:?}");
                    return;
                }
            };
            for event in events {
                let Some(key) = key_for_path(&event.path) else {
                    continue;
                };
                match read_envelope(&event.path) {
                    Ok(Some(envelope)) if envelope.origin == origin => {}
                    Ok(Some(envelope)) => listener(&StorageEvent {
                        key,
                        new_value: Some(envelope.value),
                    }),
                    Ok(None) => listener(&StorageEvent {
                        key,
                        new_value: None,
                    }),
                    Err(e) => debug!("skipping unreadable channel file {}: {e}", event.path.display()),
                }
            }
        })
        .map_err(|e| DeckError::Watcher(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&self.dir, RecursiveMode::NonRecursive)
            .map_err(|e| DeckError::Watcher(e.to_string()))?;
        info!("listening on channel {}", self.dir.display());

        Ok(Subscription::new(move || drop(debouncer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Instant;

    /// Run `write` until `events` is non-empty, giving slow watch backends
    /// several chances to arm.
    fn write_until_seen(
        events: &Mutex<Vec<StorageEvent>>,
        mut write: impl FnMut(),
    ) -> bool {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            write();
            let retry_at = Instant::now() + Duration::from_millis(500);
            while Instant::now() < retry_at {
                if !events.lock().is_empty() {
                    return true;
                }
                std::thread::sleep(Duration::from_millis(20));
            }
        }
        false
    }

    #[test]
    fn test_key_for_path() {
        assert_eq!(
            key_for_path(Path::new("/tmp/ch/deckState.json")).as_deref(),
            Some("deckState")
        );
        assert_eq!(key_for_path(Path::new("/tmp/ch/.deckState.abc.tmp")), None);
        assert_eq!(key_for_path(Path::new("/tmp/ch/notes.txt")), None);
    }

    #[test]
    fn test_write_then_read_from_other_handle() {
        let dir = tempfile::tempdir().unwrap();
        let a = FileMedium::open(dir.path()).unwrap();
        let b = FileMedium::open(dir.path()).unwrap();

        assert_eq!(b.read("deckState").unwrap(), None);
        a.write("deckState", "{\"slideIndex\":1}").unwrap();
        assert_eq!(
            b.read("deckState").unwrap().as_deref(),
            Some("{\"slideIndex\":1}")
        );
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let medium = FileMedium::open(&nested).unwrap();
        assert!(medium.dir().is_dir());
    }

    #[test]
    fn test_malformed_channel_file_reads_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("deckState.json"), "not json").unwrap();
        assert!(medium.read("deckState").is_err());
    }

    #[test]
    fn test_watcher_delivers_other_writers_only() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileMedium::open(dir.path()).unwrap();
        let reader = FileMedium::open(dir.path()).unwrap();

        let own = Arc::new(Mutex::new(Vec::new()));
        let other = Arc::new(Mutex::new(Vec::new()));
        let own_sink = Arc::clone(&own);
        let other_sink = Arc::clone(&other);
        let _own = writer
            .subscribe(Arc::new(move |e: &StorageEvent| own_sink.lock().push(e.clone())))
            .unwrap();
        let _other = reader
            .subscribe(Arc::new(move |e: &StorageEvent| other_sink.lock().push(e.clone())))
            .unwrap();

        let seen_write = write_until_seen(&other, || {
            writer.write("deckState", "hello").unwrap();
        });
        assert!(seen_write, "reader never saw the write");
        let seen = other.lock();
        assert!(seen.iter().all(|e| e.key == "deckState"));
        assert!(seen.iter().all(|e| e.new_value.as_deref() == Some("hello")));
        assert!(own.lock().is_empty());
    }
}
