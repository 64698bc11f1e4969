//! `luapad` - run Lua scripts against a LuAPI server from any editor
//!
//! # Features
//!
//! - **Run markers**: a line starting with `--!` sends the script
//! - **Config markers**: `--: <url>` then `--: <namespace>` pick the endpoint
//! - **Inline results**: the reply replaces the run marker as a `--[[ ... --]]` block
//! - **Watch mode**: every save of the script file is a change event
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use luapad::{Fallback, MemoryStore, RunOutcome, ScriptClient, ScriptRunner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runner = ScriptRunner::new(
//!         Arc::new(ScriptClient::new()?),
//!         Arc::new(MemoryStore::default()),
//!         Fallback::default(),
//!     );
//!     let script = "--!\n--: http://localhost\n--: global\nrespond('hi')\n";
//!     if let RunOutcome::Replaced(text) = runner.on_change(script).await {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod http_client;
pub mod marker;
pub mod protocol;
pub mod runner;
pub mod store;
pub mod template;
pub mod watch;

pub use config::{load_settings, Settings};
pub use document::Document;
pub use error::{RunError, StoreError, TransportError};
pub use http_client::{ScriptClient, Transport};
pub use marker::{classify, scan, LineKind};
pub use protocol::{apply_edit, Edit, Fallback, HttpReply, Outcome, RunPlan, ScriptRequest, ScriptResponse};
pub use runner::{RunOutcome, ScriptRunner};
pub use store::{FileStore, KeyValueStore, MemoryStore, DEFAULT_URL_KEY};
pub use watch::FileWatcher;

/// Version of luapad
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
