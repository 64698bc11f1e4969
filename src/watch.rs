//! Debounced change notifications for a single file.
//!
//! The parent directory is watched rather than the file itself, since many
//! editors save by writing a temp file and renaming it over the original.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Watches one file and yields debounced change notifications.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<()>,
    debounce: Duration,
}

impl FileWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths from the OS are canonical.
        let target = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target.file_name().map(std::ffi::OsStr::to_os_string);
        let root = watch_root_for(&target);

        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let relevant = match res {
                Ok(event) => is_relevant(&event, &target, target_name.as_ref()),
                Err(_) => true,
            };
            if relevant {
                let _ = tx.send(());
            }
        })?;
        watcher.watch(&root, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            debounce,
        })
    }

    /// Wait for the next change, folding bursts into one.
    ///
    /// Returns `None` once the watcher has shut down.
    pub async fn changed(&mut self) -> Option<()> {
        self.rx.recv().await?;

        let sleep = tokio::time::sleep_until(Instant::now() + self.debounce);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                () = &mut sleep => break,
                maybe = self.rx.recv() => {
                    if maybe.is_none() {
                        break;
                    }
                    sleep.as_mut().reset(Instant::now() + self.debounce);
                }
            }
        }
        Some(())
    }
}

fn is_relevant(event: &Event, target: &Path, target_name: Option<&OsString>) -> bool {
    if event.kind.is_access() {
        return false;
    }
    event.paths.iter().any(|path| {
        path == target
            || target_name.is_some_and(|name| path.file_name().is_some_and(|f| f == name))
    })
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
