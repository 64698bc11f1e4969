use anyhow::Result;

use luapad::{apply_edit, Edit};

use super::{read_source, Env};

pub fn cmd_plan(source: &str, env: &Env) -> Result<()> {
    let text = read_source(source)?;

    match apply_edit(&text, &env.settings.fallback()) {
        Edit::Accept => println!("No run marker, nothing would be sent"),
        Edit::Run(plan) => {
            println!("URL: {}", plan.url);
            println!("Namespace: {}", plan.namespace);
            println!("Body: {}", serde_json::to_string(&plan.request())?);
        }
    }

    Ok(())
}
