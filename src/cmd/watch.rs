use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use luapad::template::starter;
use luapad::{Document, Edit, FileWatcher, RunOutcome, ScriptRunner, DEFAULT_URL_KEY};

use super::Env;

pub async fn cmd_watch(path: &Path, env: &Env) -> Result<()> {
    let mut doc = Document::new(path);
    let stored = env.store.get(DEFAULT_URL_KEY).unwrap_or_else(|e| {
        warn!(error = %e, "Could not read {DEFAULT_URL_KEY}");
        None
    });
    if doc.create_if_missing(&starter(stored.as_deref()))? {
        eprintln!("📝 Created {} from the starter template", path.display());
    }

    let runner = Arc::new(env.runner()?);
    let mut watcher = FileWatcher::new(path, env.settings.debounce())
        .with_context(|| format!("failed to watch {}", path.display()))?;
    let (tx, mut rx) = mpsc::unbounded_channel::<RunOutcome>();

    eprintln!("👀 Watching {} (Ctrl-C to stop)", path.display());

    // The file as found counts as the first change.
    spawn_run(&runner, &doc.read()?, &tx);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                eprintln!("\n👋 Stopped watching {}", path.display());
                break;
            }
            changed = watcher.changed() => {
                if changed.is_none() {
                    bail!("file watcher for {} stopped", path.display());
                }
                match doc.read_change() {
                    Ok(Some(text)) => spawn_run(&runner, &text, &tx),
                    Ok(None) => {}
                    // Editors that save via rename can leave a brief gap.
                    Err(e) => warn!(error = %e, "Could not read {}", path.display()),
                }
            }
            Some(outcome) = rx.recv() => match outcome {
                RunOutcome::Replaced(text) => {
                    doc.write(&text)?;
                    eprintln!("✅ Result written to {}", path.display());
                }
                RunOutcome::Superseded => debug!("Superseded result dropped"),
                RunOutcome::Idle => {}
            },
        }
    }

    Ok(())
}

/// Start a run for `text` in the background if it carries a run marker.
fn spawn_run(runner: &Arc<ScriptRunner>, text: &str, tx: &mpsc::UnboundedSender<RunOutcome>) {
    let Edit::Run(plan) = runner.plan(text) else {
        return;
    };

    info!(url = %plan.url, namespace = %plan.namespace, "Sending script");
    eprintln!("🚀 Sending to {} ({})", plan.url, plan.namespace);

    // Taken before spawning: tasks may start out of trigger order.
    let ticket = runner.begin();
    let runner = Arc::clone(runner);
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.send(runner.run(&plan, ticket).await);
    });
}
