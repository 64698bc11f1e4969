use std::path::Path;

use anyhow::{bail, Result};
use tracing::warn;

use luapad::template::starter;
use luapad::{Document, DEFAULT_URL_KEY};

use super::Env;

pub fn cmd_new(path: &Path, force: bool, env: &Env) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let stored = env.store.get(DEFAULT_URL_KEY).unwrap_or_else(|e| {
        warn!(error = %e, "Could not read {DEFAULT_URL_KEY}");
        None
    });

    let mut doc = Document::new(path);
    doc.write(&starter(stored.as_deref()))?;
    println!("📝 Created {}", path.display());
    Ok(())
}
