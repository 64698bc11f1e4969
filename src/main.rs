//! `luapad` CLI - send Lua scripts to a LuAPI server and splice back the result

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cmd::Env;

#[derive(Parser)]
#[command(name = "luapad")]
#[command(about = "Run Lua scripts against a LuAPI server from your editor")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (default: ~/.config/luapad/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Neither read nor write the stored defaultURL
    #[arg(long, global = true)]
    no_store: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new script from the starter template
    New {
        /// Script file to create
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Run a script once and print the resulting text
    Run {
        /// Script file, or `-` for stdin
        file: String,

        /// Write the result back into the file instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// Show what a run would send, without sending it
    Plan {
        /// Script file, or `-` for stdin
        file: String,
    },

    /// Watch a script file and run it every time it is saved with a run marker
    Watch {
        /// Script file (created from the starter template if missing)
        file: PathBuf,
    },

    /// Print the stored default URL
    Url,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr, stdout carries script text)
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let env = Env::load(cli.config.as_deref(), cli.no_store)?;

    match cli.command {
        Commands::New { file, force } => {
            cmd::new::cmd_new(&file, force, &env)?;
        }
        Commands::Run { file, write } => {
            cmd::run::cmd_run(&file, write, &env).await?;
        }
        Commands::Plan { file } => {
            cmd::plan::cmd_plan(&file, &env)?;
        }
        Commands::Watch { file } => {
            cmd::watch::cmd_watch(&file, &env).await?;
        }
        Commands::Url => {
            cmd::url::cmd_url(&env)?;
        }
    }

    Ok(())
}
