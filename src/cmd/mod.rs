pub mod new;
pub mod plan;
pub mod run;
pub mod url;
pub mod watch;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use luapad::{
    load_settings, FileStore, KeyValueStore, MemoryStore, ScriptClient, ScriptRunner, Settings,
};

/// Settings and store shared by every subcommand.
pub struct Env {
    pub settings: Settings,
    pub store: Arc<dyn KeyValueStore>,
}

impl Env {
    pub fn load(config: Option<&Path>, no_store: bool) -> Result<Self> {
        let settings = load_settings(config)?;
        let store: Arc<dyn KeyValueStore> = if no_store {
            Arc::new(MemoryStore::default())
        } else {
            let path = settings.store_path();
            debug!(path = %path.display(), "Using store");
            Arc::new(FileStore::new(path))
        };
        Ok(Self { settings, store })
    }

    pub fn runner(&self) -> Result<ScriptRunner> {
        let client = ScriptClient::from_settings(&self.settings)?;
        Ok(ScriptRunner::new(
            Arc::new(client),
            Arc::clone(&self.store),
            self.settings.fallback(),
        ))
    }
}

/// Read a script from a file, or from stdin when `source` is `-`.
pub fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read script from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
}
