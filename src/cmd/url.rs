use anyhow::Result;

use luapad::DEFAULT_URL_KEY;

use super::Env;

pub fn cmd_url(env: &Env) -> Result<()> {
    match env.store.get(DEFAULT_URL_KEY)? {
        Some(url) => println!("{url}"),
        None => eprintln!("No {DEFAULT_URL_KEY} stored yet"),
    }
    Ok(())
}
