//! Pure edit planning for the run-marker protocol.
//!
//! [`apply_edit`] decides what a full-text change means without doing any
//! I/O. The caller performs the [`SideEffect`]s of a [`RunPlan`] and feeds
//! the [`Outcome`] back through [`RunPlan::complete`] to get the new buffer.
//!
//! ```rust
//! use luapad::protocol::{apply_edit, Edit, Fallback, Outcome};
//!
//! let edit = apply_edit("--!\n--: http://x\n--: ns\n", &Fallback::default());
//! let Edit::Run(plan) = edit else { panic!("expected a run") };
//! assert_eq!(plan.url, "http://x");
//! assert_eq!(plan.namespace, "ns");
//!
//! let text = plan.complete(&Outcome::TransportFailed("boom".into()));
//! assert!(text.starts_with("--[[\n  Error:\n  boom\n--]]"));
//! ```

use serde::{Deserialize, Serialize};

use crate::marker::{replace_run_markers, scan};

/// Endpoint used when the buffer has fewer than two config markers.
pub const FALLBACK_URL: &str = "http://luapi.example.org";

/// Namespace used when the buffer has fewer than two config markers.
pub const FALLBACK_NAMESPACE: &str = "global";

/// Values substituted when config extraction comes up short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub url: String,
    pub namespace: String,
}

impl Default for Fallback {
    fn default() -> Self {
        Self {
            url: FALLBACK_URL.to_string(),
            namespace: FALLBACK_NAMESPACE.to_string(),
        }
    }
}

/// JSON body POSTed to the script server.
///
/// Field order is part of the wire format: `script` first, then `namespace`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptRequest {
    pub script: String,
    pub namespace: String,
}

/// JSON body expected back from the script server.
///
/// `status` is the server's own status and is distinct from the HTTP one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptResponse {
    pub status: serde_json::Number,
    pub body: String,
}

/// Raw HTTP reply as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    /// `"<code> <reason>"`, e.g. `200 OK`.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status, self.status_text)
    }

    /// Decode the body as a [`ScriptResponse`].
    pub fn parse(&self) -> Result<ScriptResponse, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// How a triggered run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered; the body may or may not be a valid [`ScriptResponse`].
    Replied(HttpReply),
    /// No HTTP response was received.
    TransportFailed(String),
}

/// Work the caller must carry out for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    /// Overwrite the durable `defaultURL` slot.
    StoreDefaultUrl(String),
    /// POST the request to the URL.
    Post { url: String, request: ScriptRequest },
}

/// What a full-text change means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// No run marker: the text simply becomes the buffer.
    Accept,
    /// A run marker is present.
    Run(RunPlan),
}

/// A resolved run, bound to the buffer that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub url: String,
    pub namespace: String,
    pub script: String,
}

impl RunPlan {
    pub fn request(&self) -> ScriptRequest {
        ScriptRequest {
            script: self.script.clone(),
            namespace: self.namespace.clone(),
        }
    }

    /// Side effects in the order they must run.
    pub fn effects(&self) -> [SideEffect; 2] {
        [
            SideEffect::StoreDefaultUrl(self.url.clone()),
            SideEffect::Post {
                url: self.url.clone(),
                request: self.request(),
            },
        ]
    }

    /// Render the buffer that replaces the triggering one.
    pub fn complete(&self, outcome: &Outcome) -> String {
        let block = match outcome {
            Outcome::Replied(reply) => match reply.parse() {
                Ok(response) => status_block(&reply.status_line(), &response.body),
                Err(err) => error_block(&format!(
                    "invalid response ({}): {err}",
                    reply.status_line()
                )),
            },
            Outcome::TransportFailed(message) => error_block(message),
        };
        replace_run_markers(&self.script, &block)
    }
}

/// Decide what `buffer` asks for.
pub fn apply_edit(buffer: &str, fallback: &Fallback) -> Edit {
    let scan = scan(buffer);
    if !scan.has_run_marker() {
        return Edit::Accept;
    }

    let (url, namespace) = match scan.config.as_slice() {
        [url, namespace, ..] => ((*url).to_string(), (*namespace).to_string()),
        _ => (fallback.url.clone(), fallback.namespace.clone()),
    };

    Edit::Run(RunPlan {
        url,
        namespace,
        script: buffer.to_string(),
    })
}

fn status_block(status_line: &str, body: &str) -> String {
    format!("--[[\n  Status: {status_line}\n  {body}\n--]]")
}

fn error_block(message: &str) -> String {
    format!("--[[\n  Error:\n  {message}\n--]]")
}
