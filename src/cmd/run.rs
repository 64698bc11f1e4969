use anyhow::{bail, Result};
use tracing::info;

use luapad::{Document, RunOutcome};

use super::{read_source, Env};

pub async fn cmd_run(source: &str, write: bool, env: &Env) -> Result<()> {
    if write && source == "-" {
        bail!("--write needs a file, not stdin");
    }

    let text = read_source(source)?;
    let runner = env.runner()?;

    let result = match runner.on_change(&text).await {
        RunOutcome::Replaced(result) => result,
        RunOutcome::Idle | RunOutcome::Superseded => {
            info!("No run marker, text left unchanged");
            text
        }
    };

    if write {
        Document::new(source).write(&result)?;
        eprintln!("💾 Wrote {} bytes to {source}", result.len());
    } else {
        print!("{result}");
    }

    Ok(())
}
